//! Documentation generators for `docs/index.md`
//!
//! A [`DocGenerator`] turns a prompt into a markdown page. The AI-backed
//! generator is optional: [`generate_or_fallback`] never fails, it falls back
//! to static text and reports the failure as a warning instead.

pub mod gemini;

use thiserror::Error;

pub use gemini::GeminiDocs;

/// Errors from a documentation generator
#[derive(Debug, Error)]
pub enum DocGenError {
    #[error("No GEMINI_KEY found in environment")]
    MissingKey,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned error status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response contained no generated text")]
    EmptyResponse,

    #[error("Invalid generator URL: {0}")]
    InvalidUrl(String),
}

/// Something that can write documentation from a prompt
#[allow(async_fn_in_trait)]
pub trait DocGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DocGenError>;
}

/// Generator that always returns the same page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticDocs {
    page: String,
}

impl StaticDocs {
    pub fn new(page: impl Into<String>) -> Self {
        Self { page: page.into() }
    }

    pub fn page(&self) -> &str {
        &self.page
    }
}

impl DocGenerator for StaticDocs {
    async fn generate(&self, _prompt: &str) -> Result<String, DocGenError> {
        Ok(self.page.clone())
    }
}

/// Generated content, plus a warning when the fallback had to be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsOutcome {
    pub content: String,
    pub warning: Option<String>,
}

/// Ask `primary` for a page; on any error use `fallback` instead
pub async fn generate_or_fallback<G: DocGenerator>(
    primary: &G,
    prompt: &str,
    fallback: &StaticDocs,
) -> DocsOutcome {
    match primary.generate(prompt).await {
        Ok(content) => DocsOutcome {
            content,
            warning: None,
        },
        Err(e) => DocsOutcome {
            content: fallback.page().to_string(),
            warning: Some(format!("Using built-in docs: {}", e)),
        },
    }
}

/// Prompt sent to the AI generator for a package's docs page
pub fn docs_prompt(package: &str, description: &str) -> String {
    format!(
        "Generate documentation for Python package '{}' that {}",
        package, description
    )
}
