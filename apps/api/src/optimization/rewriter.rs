//! Resume Rewriter: two terminal behaviours, no intermediate states.
//!
//! `Generated`: the generation service was available, requested, and returned
//! non-blank text. `Template`: everything else. The template path is pure and
//! total, so `rewrite` itself never fails.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::TextGenerator;
use crate::optimization::prompts::{build_rewrite_prompt, REWRITE_SYSTEM};

/// Longest keyword (exclusive, in chars) the template will list.
const MAX_TEMPLATE_KEYWORD_LEN: usize = 40;
const SKILLS_ALREADY_ALIGNED: &str = "Aligned with JD; core skills already present.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteSource {
    Generated,
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewriteOutcome {
    pub text: String,
    pub source: RewriteSource,
}

#[derive(Clone, Default)]
pub struct ResumeRewriter {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl ResumeRewriter {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub fn generation_available(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn rewrite(
        &self,
        resume_text: &str,
        jd_text: &str,
        missing: &BTreeSet<String>,
        use_generation: bool,
    ) -> RewriteOutcome {
        if let (true, Some(generator)) = (use_generation, &self.generator) {
            let listed = missing.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
            let prompt = build_rewrite_prompt(resume_text, jd_text, &listed);

            match generator.generate(REWRITE_SYSTEM, &prompt).await {
                Ok(text) if !text.trim().is_empty() => {
                    info!("Resume rewritten by generation service ({})", generator.model());
                    return RewriteOutcome {
                        text: text.trim().to_string(),
                        source: RewriteSource::Generated,
                    };
                }
                Ok(_) => warn!("Generation service returned blank text; using template"),
                Err(e) => warn!("Generation service failed: {e}; using template"),
            }
        }

        RewriteOutcome {
            text: template_rewrite(resume_text, missing.iter().map(String::as_str)),
            source: RewriteSource::Template,
        }
    }
}

/// Deterministic fallback: summary, skills listing the missing keywords, then
/// the original resume verbatim (trimmed) under "Experience".
pub fn template_rewrite<'a>(resume_text: &str, missing: impl IntoIterator<Item = &'a str>) -> String {
    let keywords: BTreeSet<&str> = missing
        .into_iter()
        .filter(|k| !k.is_empty() && k.chars().count() < MAX_TEMPLATE_KEYWORD_LEN)
        .collect();

    let skills = if keywords.is_empty() {
        SKILLS_ALREADY_ALIGNED.to_string()
    } else {
        keywords.into_iter().collect::<Vec<_>>().join(", ")
    };

    format!(
        "Professional Summary\n\
         Results-driven professional with experience relevant to the target role.\n\
         Tailored to the job description with emphasis on measurable impact, tools, and domain expertise.\n\
         \n\
         Key Skills\n\
         {skills}\n\
         \n\
         Experience\n\
         {}",
        resume_text.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Reply {
        Text(&'static str),
        Fail,
    }

    struct StubGenerator {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl StubGenerator {
        fn arc(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(system, REWRITE_SYSTEM);
            assert!(prompt.contains("Resume:"));
            match self.reply {
                Reply::Text(t) => Ok(t.to_string()),
                Reply::Fail => Err(LlmError::EmptyContent),
            }
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    fn missing(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_template_layout() {
        let text = template_rewrite("  Built things.\n", ["docker", "aws"]);
        assert_eq!(
            text,
            "Professional Summary\n\
             Results-driven professional with experience relevant to the target role.\n\
             Tailored to the job description with emphasis on measurable impact, tools, and domain expertise.\n\
             \n\
             Key Skills\n\
             aws, docker\n\
             \n\
             Experience\n\
             Built things."
        );
    }

    #[test]
    fn test_template_without_missing_keywords() {
        let text = template_rewrite("resume", std::iter::empty());
        assert!(text.contains("Key Skills\nAligned with JD; core skills already present.\n"));
    }

    #[test]
    fn test_template_filters_blank_and_overlong_keywords() {
        let long = "x".repeat(40);
        let text = template_rewrite("r", ["", long.as_str(), "sql", "sql"]);
        assert!(text.contains("Key Skills\nsql\n"));
        assert!(!text.contains(&long));
    }

    #[test]
    fn test_template_is_deterministic() {
        let a = template_rewrite("resume text", ["b", "a"]);
        let b = template_rewrite("resume text", ["a", "b"]);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_no_generator_uses_template() {
        let rewriter = ResumeRewriter::default();
        assert!(!rewriter.generation_available());
        let outcome = rewriter.rewrite("resume", "jd", &missing(&["aws"]), true).await;
        assert_eq!(outcome.source, RewriteSource::Template);
        assert!(outcome.text.ends_with("Experience\nresume"));
    }

    #[tokio::test]
    async fn test_generated_text_is_used_when_requested() {
        let stub = StubGenerator::arc(Reply::Text("  Polished resume  "));
        let rewriter = ResumeRewriter::new(Some(stub.clone()));
        let outcome = rewriter.rewrite("resume", "jd", &missing(&["aws"]), true).await;
        assert_eq!(outcome.source, RewriteSource::Generated);
        assert_eq!(outcome.text, "Polished resume");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_generator_not_called_when_not_requested() {
        let stub = StubGenerator::arc(Reply::Text("unused"));
        let rewriter = ResumeRewriter::new(Some(stub.clone()));
        let outcome = rewriter.rewrite("resume", "jd", &missing(&[]), false).await;
        assert_eq!(outcome.source, RewriteSource::Template);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_falls_back_after_single_attempt() {
        let stub = StubGenerator::arc(Reply::Fail);
        let rewriter = ResumeRewriter::new(Some(stub.clone()));
        let outcome = rewriter.rewrite("resume", "jd", &missing(&["aws"]), true).await;
        assert_eq!(outcome.source, RewriteSource::Template);
        assert_eq!(outcome.text, template_rewrite("resume", ["aws"]));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_reply_falls_back() {
        let stub = StubGenerator::arc(Reply::Text("   \n"));
        let rewriter = ResumeRewriter::new(Some(stub));
        let outcome = rewriter.rewrite("resume", "jd", &missing(&[]), true).await;
        assert_eq!(outcome.source, RewriteSource::Template);
    }
}
