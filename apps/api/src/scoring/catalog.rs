//! Keyword Catalog: category name → keyword set, loaded from a directory of `*.txt` files.
//!
//! Loading is best-effort: every file is read independently, a failing file is
//! skipped with a warning, and an empty result falls back to the built-in
//! "General" catalog. The returned catalog is never empty.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Category used when no keyword files could be loaded.
pub const DEFAULT_CATEGORY: &str = "General";

const DEFAULT_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "sql",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "microservices",
    "rest",
    "graphql",
    "machine learning",
    "nlp",
    "cv",
    "mlops",
    "pandas",
    "numpy",
    "scikit-learn",
    "tensorflow",
    "pytorch",
    "communication",
    "leadership",
    "agile",
    "scrum",
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read keyword directory {path}: {source}")]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read keyword file {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Immutable mapping from category label to its keywords.
///
/// Every category holds at least one keyword. Categories iterate in label order.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordCatalog {
    categories: BTreeMap<String, BTreeSet<String>>,
}

impl KeywordCatalog {
    /// Builds a catalog from raw category data, dropping empty categories.
    /// Falls back to the default catalog if nothing is left.
    pub fn from_categories<I, K>(categories: I) -> Self
    where
        I: IntoIterator<Item = (String, K)>,
        K: IntoIterator<Item = String>,
    {
        let categories: BTreeMap<String, BTreeSet<String>> = categories
            .into_iter()
            .map(|(name, kws)| {
                let set: BTreeSet<String> = kws
                    .into_iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (name, set)
            })
            .filter(|(_, set)| !set.is_empty())
            .collect();

        if categories.is_empty() {
            Self::builtin()
        } else {
            Self { categories }
        }
    }

    /// The built-in single-category catalog.
    pub fn builtin() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(
            DEFAULT_CATEGORY.to_string(),
            DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        );
        Self { categories }
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn category(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.categories.get(name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Union of every category's keywords.
    pub fn vocabulary(&self) -> BTreeSet<String> {
        self.categories.values().flatten().cloned().collect()
    }
}

/// Loads the catalog from `dir`. Never fails; see module docs for the fallback rules.
pub fn load_catalog(dir: &Path) -> KeywordCatalog {
    let files = match keyword_files(dir) {
        Ok(files) => files,
        Err(e) => {
            warn!("{e}; using built-in keyword catalog");
            return KeywordCatalog::builtin();
        }
    };

    let mut categories = Vec::with_capacity(files.len());
    for path in files {
        match read_category(&path) {
            Ok(Some(category)) => categories.push(category),
            Ok(None) => debug!("Skipping empty keyword file {}", path.display()),
            Err(e) => warn!("Skipping keyword file: {e}"),
        }
    }

    if categories.is_empty() {
        info!(
            "No keyword categories found in {}; using built-in catalog",
            dir.display()
        );
        return KeywordCatalog::builtin();
    }

    let catalog = KeywordCatalog::from_categories(categories);
    info!(
        "Loaded {} keyword categories from {}",
        catalog.len(),
        dir.display()
    );
    catalog
}

/// Lists `*.txt` files in `dir`, sorted by file name.
fn keyword_files(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let entries = fs::read_dir(dir).map_err(|source| CatalogError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    Ok(files)
}

/// Reads one keyword file. `Ok(None)` means the file had no keywords.
fn read_category(path: &Path) -> Result<Option<(String, BTreeSet<String>)>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::File {
        path: path.to_path_buf(),
        source,
    })?;

    let keywords: BTreeSet<String> = content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect();

    if keywords.is_empty() {
        return Ok(None);
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Some((category_label(&stem), keywords)))
}

/// "cloud_platforms" → "Cloud Platforms". A letter is uppercased when it follows
/// a non-letter and lowercased otherwise.
pub fn category_label(stem: &str) -> String {
    let mut label = String::with_capacity(stem.len());
    let mut prev_is_letter = false;
    for c in stem.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                label.extend(c.to_lowercase());
            } else {
                label.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            label.push(c);
            prev_is_letter = false;
        }
    }
    label
}
