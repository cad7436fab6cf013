//! Package metadata collected from the user, and its validation

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// License choices offered for the generated package
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum License {
    #[default]
    #[serde(rename = "MIT", alias = "mit")]
    Mit,
    #[serde(rename = "Apache-2.0", alias = "apache-2.0", alias = "apache")]
    Apache2,
    #[serde(rename = "GPL-3.0", alias = "gpl-3.0", alias = "gpl")]
    Gpl3,
    #[serde(rename = "BSD-3-Clause", alias = "bsd-3-clause", alias = "bsd")]
    Bsd3Clause,
}

impl License {
    pub const ALL: [License; 4] = [
        License::Mit,
        License::Apache2,
        License::Gpl3,
        License::Bsd3Clause,
    ];

    /// SPDX identifier
    pub fn spdx(&self) -> &'static str {
        match self {
            License::Mit => "MIT",
            License::Apache2 => "Apache-2.0",
            License::Gpl3 => "GPL-3.0",
            License::Bsd3Clause => "BSD-3-Clause",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spdx())
    }
}

impl FromStr for License {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        License::ALL
            .into_iter()
            .find(|l| l.spdx().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let names: Vec<&str> = License::ALL.iter().map(|l| l.spdx()).collect();
                format!("Unknown license '{}'. Expected one of: {}", s, names.join(", "))
            })
    }
}

/// Everything needed to render a package skeleton
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub author: String,
    pub email: String,
    pub description: String,
    pub python_requires: String,
    pub keywords: Vec<String>,
    pub dependencies: Vec<String>,
    pub license: License,
    pub include_tests: bool,
    pub include_docs: bool,
    /// Ask the AI doc generator for `docs/index.md` instead of the static page
    pub ai_docs: bool,
}

impl Default for PackageMetadata {
    fn default() -> Self {
        Self {
            name: "my_package".to_string(),
            version: "0.1.0".to_string(),
            author: "Your Name".to_string(),
            email: String::new(),
            description: "A short description of your package".to_string(),
            python_requires: ">=3.8".to_string(),
            keywords: Vec::new(),
            dependencies: Vec::new(),
            license: License::Mit,
            include_tests: true,
            include_docs: true,
            ai_docs: false,
        }
    }
}

impl PackageMetadata {
    /// Validate the free-text fields. Returns one message per problem.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !is_valid_package_name(&self.name) {
            errors.push("Invalid package name format".to_string());
        }

        if !is_plain_version(&self.version) {
            errors.push("Invalid version format (use X.Y.Z)".to_string());
        }

        if !self.email.is_empty() && !is_valid_email(&self.email) {
            errors.push("Invalid email format".to_string());
        }

        for dep in &self.dependencies {
            let dep = dep.trim();
            if !dep.is_empty() && !is_valid_dependency(dep) {
                errors.push(format!("Invalid dependency format: {}", dep));
            }
        }

        errors
    }
}

/// Split a comma-separated keyword field
pub fn split_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

/// Split a one-per-line dependency field
pub fn split_dependencies(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
        .collect()
}

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("valid package name regex")
});

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("valid email regex"));

static DEPENDENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]+([><=]=?\d+\.\d+\.\d+)?$").expect("valid dependency regex")
});

/// Letter first, then letters, digits or underscores
pub fn is_valid_package_name(name: &str) -> bool {
    PACKAGE_NAME.is_match(name)
}

/// `X.Y.Z` with numeric parts only (no pre-release or build suffix)
pub fn is_plain_version(version: &str) -> bool {
    match semver::Version::parse(version) {
        Ok(v) => v.pre.is_empty() && v.build.is_empty(),
        Err(_) => false,
    }
}

/// `local@domain.tld` with a single `@` and a dot somewhere after it
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// `name` or `name<op>X.Y.Z`, e.g. `requests>=2.25.1`
pub fn is_valid_dependency(dep: &str) -> bool {
    DEPENDENCY.is_match(dep)
}
