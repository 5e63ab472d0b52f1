use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::scoring::blend::ScoreWeights;

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Application configuration loaded from environment variables.
/// Every value has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub keywords_dir: PathBuf,
    /// Generation credential. `None` disables the generation path.
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub llm_timeout_secs: u64,
    /// 0 disables the similarity cache.
    pub similarity_cache_capacity: usize,
    pub weights: ScoreWeights,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let weights = ScoreWeights {
            exact: parse_env("EXACT_WEIGHT", 0.7)?,
            semantic: parse_env("SEMANTIC_WEIGHT", 0.3)?,
        };
        validate_weights(&weights)?;

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            keywords_dir: std::env::var("KEYWORDS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/keywords")),
            groq_api_key: std::env::var("GROQ_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            groq_model: std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 60)?,
            similarity_cache_capacity: parse_env("SIMILARITY_CACHE_CAPACITY", 64)?,
            weights,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

fn validate_weights(weights: &ScoreWeights) -> Result<()> {
    for (name, value) in [("EXACT_WEIGHT", weights.exact), ("SEMANTIC_WEIGHT", weights.semantic)] {
        if !value.is_finite() || value < 0.0 {
            bail!("{name} must be a finite, non-negative number (got {value})");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "PORT",
            "KEYWORDS_DIR",
            "GROQ_API_KEY",
            "GROQ_MODEL",
            "LLM_TIMEOUT_SECS",
            "SIMILARITY_CACHE_CAPACITY",
            "EXACT_WEIGHT",
            "SEMANTIC_WEIGHT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_defaults_when_env_missing() {
        let _lock = env_guard().lock().unwrap_or_else(|e| e.into_inner());
        reset_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.keywords_dir, PathBuf::from("data/keywords"));
        assert!(config.groq_api_key.is_none());
        assert_eq!(config.groq_model, DEFAULT_MODEL);
        assert_eq!(config.similarity_cache_capacity, 64);
        assert_eq!(config.weights, ScoreWeights::default());
    }

    #[test]
    fn test_blank_api_key_is_treated_as_absent() {
        let _lock = env_guard().lock().unwrap_or_else(|e| e.into_inner());
        reset_env();
        env::set_var("GROQ_API_KEY", "   ");
        let config = Config::from_env().unwrap();
        assert!(config.groq_api_key.is_none());
        reset_env();
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let _lock = env_guard().lock().unwrap_or_else(|e| e.into_inner());
        reset_env();
        env::set_var("PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("PORT"));
        reset_env();
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let _lock = env_guard().lock().unwrap_or_else(|e| e.into_inner());
        reset_env();
        env::set_var("SEMANTIC_WEIGHT", "-0.1");
        assert!(Config::from_env().is_err());
        reset_env();
    }

    #[test]
    fn test_custom_weights_are_read() {
        let _lock = env_guard().lock().unwrap_or_else(|e| e.into_inner());
        reset_env();
        env::set_var("EXACT_WEIGHT", "0.5");
        env::set_var("SEMANTIC_WEIGHT", "0.5");
        let config = Config::from_env().unwrap();
        assert_eq!(config.weights.exact, 0.5);
        assert_eq!(config.weights.semantic, 0.5);
        reset_env();
    }
}
