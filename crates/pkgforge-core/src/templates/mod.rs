//! Package skeleton rendering
//!
//! Renderers are flat string substitution over [`PackageMetadata`]. Their
//! output is pushed into a [`VirtualFileStore`] under `<name>/...`:
//!
//! - `pyproject.toml`, `<name>/__init__.py`, `README.md`, `LICENSE`
//! - `tests/` and `pytest.ini` when tests are enabled
//! - `docs/index.md` when docs are enabled (AI-generated if requested)

pub mod extras;
pub mod license;
pub mod project;

use crate::docgen::{docs_prompt, generate_or_fallback, DocGenerator, StaticDocs};
use crate::metadata::PackageMetadata;
use crate::store::VirtualFileStore;
use chrono::Datelike;

/// What a generation run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Paths written, in write order
    pub files: Vec<String>,
    /// Non-fatal problems (e.g. AI docs fell back to the static page)
    pub warnings: Vec<String>,
}

struct Writer<'a> {
    store: &'a mut VirtualFileStore,
    root: String,
    report: GenerationReport,
}

impl Writer<'_> {
    fn add(&mut self, relative: &str, content: impl Into<String>) {
        let path = format!("{}/{}", self.root, relative);
        self.store.add_or_update(path.as_str(), content);
        self.report.files.push(path);
    }
}

/// Render every file for `meta` into `store`, using the current year for LICENSE
pub async fn generate_package<G: DocGenerator>(
    meta: &PackageMetadata,
    store: &mut VirtualFileStore,
    docs: &G,
) -> GenerationReport {
    let year = chrono::Local::now().year();
    generate_package_for_year(meta, store, docs, year).await
}

/// Same as [`generate_package`] with an explicit copyright year
pub async fn generate_package_for_year<G: DocGenerator>(
    meta: &PackageMetadata,
    store: &mut VirtualFileStore,
    docs: &G,
    year: i32,
) -> GenerationReport {
    let name = meta.name.as_str();
    let mut writer = Writer {
        store,
        root: name.to_string(),
        report: GenerationReport::default(),
    };

    writer.add("pyproject.toml", project::pyproject(meta));
    writer.add(&format!("{}/__init__.py", name), project::init_module(meta));
    writer.add("README.md", project::readme(meta));
    writer.add(
        "LICENSE",
        license::license_text(meta.license, year, &meta.author),
    );

    if meta.include_tests {
        writer.add("tests/__init__.py", "");
        writer.add("tests/test_main.py", extras::test_main(meta));
        writer.add("pytest.ini", extras::PYTEST_INI);
    }

    if meta.include_docs {
        let fallback = StaticDocs::new(extras::basic_docs(meta));
        let content = if meta.ai_docs {
            let prompt = docs_prompt(name, &meta.description);
            let outcome = generate_or_fallback(docs, &prompt, &fallback).await;
            if let Some(warning) = outcome.warning {
                writer.report.warnings.push(warning);
            }
            outcome.content
        } else {
            fallback.page().to_string()
        };
        writer.add("docs/index.md", content);
    }

    writer.report
}
