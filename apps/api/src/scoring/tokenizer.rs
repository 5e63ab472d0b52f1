//! Tokenizer: turns raw text into the set of normalized keyword tokens.
//!
//! A token starts with a letter and continues with letters, digits, and the
//! punctuation that shows up inside technology names (`c++`, `c#`, `node.js`,
//! `ci/cd`, `scikit-learn`). Tokens are the pattern matches as-is, lowercased;
//! a period ending a sentence stays on the word ("AWS." → "aws.").

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Set of distinct lowercase tokens. No ordering guarantee.
pub type TokenSet = HashSet<String>;

static WORD_RE: OnceLock<Regex> = OnceLock::new();

fn word_re() -> &'static Regex {
    WORD_RE.get_or_init(|| {
        Regex::new(r"[A-Za-z][A-Za-z0-9_+#./-]*").expect("word pattern is a valid regex")
    })
}

/// Produces the distinct lowercase tokens found in `text`. Never fails.
pub fn tokenize(text: &str) -> TokenSet {
    word_re()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}
