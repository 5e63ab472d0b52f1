use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"[\w.-]+@[\w.-]+\.[a-zA-Z]{2,}").expect("email pattern is a valid regex")
    })
}

fn phone_re() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"(?:\+\d{1,3}[\s-]?)?(?:\(?\d{3}\)?[\s-]?)?\d{3}[\s-]?\d{4}")
            .expect("phone pattern is a valid regex")
    })
}

/// Contact details pulled from resume text. Empty string when not found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFields {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ResumeFields {
    pub fn extract(text: &str) -> Self {
        let first_line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
        let word_count = first_line.split_whitespace().count();

        Self {
            name: if (1..=5).contains(&word_count) {
                first_line.to_string()
            } else {
                String::new()
            },
            email: first_match(email_re(), text),
            phone: first_match(phone_re(), text),
        }
    }
}

fn first_match(re: &Regex, text: &str) -> String {
    re.find(text).map(|m| m.as_str().to_string()).unwrap_or_default()
}
