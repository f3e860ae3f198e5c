use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup fails only on unparsable values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory where uploaded resumes are staged while being extracted.
    pub upload_dir: PathBuf,
    /// Local cache for the embedding model files.
    pub model_cache_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Number of embedding computations allowed to run at once.
    pub max_concurrent_inferences: usize,
    /// Clamp similarity percentages to [0, 100]. Off by default: raw cosine
    /// scores can be negative and are reported unchanged.
    pub clamp_score: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            model_cache_dir: std::env::var("MODEL_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".fastembed_cache")),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            max_concurrent_inferences: parse_env(
                "MAX_CONCURRENT_INFERENCES",
                default_inference_slots(),
            )?
            .max(1),
            clamp_score: parse_env("CLAMP_SCORE", false)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn default_inference_slots() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
impl Config {
    /// Configuration for in-process router tests.
    pub fn for_tests(upload_dir: PathBuf) -> Self {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            upload_dir,
            model_cache_dir: PathBuf::from(".fastembed_cache"),
            max_upload_bytes: 1024 * 1024,
            max_concurrent_inferences: 2,
            clamp_score: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("ANALYZER_TEST_UNSET_PORT", 5000).unwrap();
        assert_eq!(value, 5000);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("ANALYZER_TEST_BAD_BOOL", "maybe");
        let result: Result<bool> = parse_env("ANALYZER_TEST_BAD_BOOL", false);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("ANALYZER_TEST_BAD_BOOL"), "got {err}");
    }

    #[test]
    fn test_parse_env_trims_whitespace() {
        std::env::set_var("ANALYZER_TEST_SLOTS", " 4 ");
        let value: usize = parse_env("ANALYZER_TEST_SLOTS", 1).unwrap();
        assert_eq!(value, 4);
    }
}
