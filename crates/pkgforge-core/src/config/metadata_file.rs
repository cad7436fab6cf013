//! Loading package metadata from a YAML file
//!
//! Every field is optional; missing fields keep their defaults.
//!
//! ```yaml
//! name: fastparse
//! version: 1.2.0
//! author: Ada
//! license: Apache-2.0
//! dependencies:
//!   - requests>=2.25.1
//! include_docs: false
//! ```

use crate::metadata::PackageMetadata;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse metadata from YAML text
pub fn parse_metadata(content: &str) -> Result<PackageMetadata> {
    if content.trim().is_empty() {
        return Ok(PackageMetadata::default());
    }
    serde_yaml::from_str(content).context("Failed to parse metadata file")
}

/// Read and parse a metadata file
pub fn load_metadata(path: &Path) -> Result<PackageMetadata> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_metadata(&content).with_context(|| format!("Invalid metadata in {}", path.display()))
}
