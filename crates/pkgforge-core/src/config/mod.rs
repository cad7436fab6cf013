//! Configuration: metadata files and environment settings

pub mod metadata_file;

use anyhow::{Context, Result};
use url::Url;

pub use metadata_file::{load_metadata, parse_metadata};

/// Environment variable holding the Gemini API key
pub const GEMINI_KEY_ENV: &str = "GEMINI_KEY";

/// Environment variable overriding the Gemini model
pub const GEMINI_MODEL_ENV: &str = "PKGFORGE_GEMINI_MODEL";

/// Environment variable overriding the Gemini API base URL
pub const GEMINI_URL_ENV: &str = "PKGFORGE_GEMINI_URL";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for the Gemini documentation generator
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Url,
}

impl GeminiSettings {
    /// Read settings from the environment, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(GEMINI_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty());
        let model =
            std::env::var(GEMINI_MODEL_ENV).unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        let url_str =
            std::env::var(GEMINI_URL_ENV).unwrap_or_else(|_| DEFAULT_GEMINI_URL.to_string());
        Self::new(api_key, model, &url_str)
    }

    pub fn new(api_key: Option<String>, model: String, base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid Gemini URL: {}", base_url))?;
        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}
