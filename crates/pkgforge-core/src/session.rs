//! Editing session: one file store, the metadata it was generated from,
//! and the file currently selected in the editor.
//!
//! UI handlers take `&mut Session`; nothing here is global.

use crate::archive::{self, ExportError};
use crate::docgen::DocGenerator;
use crate::metadata::PackageMetadata;
use crate::store::VirtualFileStore;
use crate::templates::{self, GenerationReport};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid package metadata:\n  {}", errors.join("\n  "))]
    Invalid { errors: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(String),
    NoSelection,
    /// The selected file was removed from the store in the meantime
    Missing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(String),
    NoSelection,
    Missing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(String),
    EmptyPath,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    store: VirtualFileStore,
    metadata: PackageMetadata,
    selected: Option<String>,
    generated: bool,
}

impl Session {
    pub fn new(metadata: PackageMetadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &VirtualFileStore {
        &self.store
    }

    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Validate the metadata and render the package into the store
    pub async fn generate<G: DocGenerator>(
        &mut self,
        docs: &G,
    ) -> Result<GenerationReport, GenerateError> {
        let errors = self.metadata.validate();
        if !errors.is_empty() {
            return Err(GenerateError::Invalid { errors });
        }

        let report = templates::generate_package(&self.metadata, &mut self.store, docs).await;
        self.generated = true;
        Ok(report)
    }

    /// Select a file for editing. Returns its content, or `None` (and clears
    /// the selection) if there is no such file.
    pub fn select(&mut self, path: &str) -> Option<&str> {
        if self.store.contains(path) {
            self.selected = Some(path.to_string());
            Some(self.store.get(path))
        } else {
            self.selected = None;
            None
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Save editor content into the selected file. Never creates a file.
    pub fn save(&mut self, content: &str) -> SaveOutcome {
        let Some(path) = self.selected.clone() else {
            return SaveOutcome::NoSelection;
        };
        if self.store.update(&path, content) {
            SaveOutcome::Saved(path)
        } else {
            self.selected = None;
            SaveOutcome::Missing(path)
        }
    }

    /// Delete the selected file and clear the selection
    pub fn delete_selected(&mut self) -> DeleteOutcome {
        let Some(path) = self.selected.take() else {
            return DeleteOutcome::NoSelection;
        };
        if self.store.delete(&path) {
            DeleteOutcome::Deleted(path)
        } else {
            DeleteOutcome::Missing(path)
        }
    }

    /// Add an empty file at `path` (trimmed). An existing file is emptied.
    pub fn add_file(&mut self, path: &str) -> AddOutcome {
        let path = path.trim();
        if path.is_empty() {
            return AddOutcome::EmptyPath;
        }
        self.store.add_or_update(path, "");
        AddOutcome::Added(path.to_string())
    }

    /// Export is offered once a package was generated or files were added by hand
    pub fn can_export(&self) -> bool {
        self.generated || !self.store.is_empty()
    }

    /// Suggested download name, `<package>.zip`
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.metadata.name)
    }

    pub fn export(&self) -> Result<Vec<u8>, ExportError> {
        archive::export_archive(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docgen::StaticDocs;

    async fn generated_session() -> Session {
        let mut session = Session::new(PackageMetadata::default());
        session.generate(&StaticDocs::default()).await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_generate_populates_store() {
        let session = generated_session().await;
        assert!(session.can_export());
        assert!(session.store().contains("my_package/README.md"));
        assert_eq!(session.archive_name(), "my_package.zip");
    }

    #[tokio::test]
    async fn test_generate_rejects_invalid_metadata() {
        let mut session = Session::new(PackageMetadata {
            name: "bad name".to_string(),
            ..PackageMetadata::default()
        });

        match session.generate(&StaticDocs::default()).await {
            Err(GenerateError::Invalid { errors }) => {
                assert_eq!(errors, vec!["Invalid package name format"]);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert!(session.store().is_empty());
        assert!(!session.can_export());
    }

    #[tokio::test]
    async fn test_select_and_save() {
        let mut session = generated_session().await;

        assert!(session.select("my_package/README.md").is_some());
        assert_eq!(
            session.save("# edited\n"),
            SaveOutcome::Saved("my_package/README.md".to_string())
        );
        assert_eq!(session.store().get("my_package/README.md"), "# edited\n");
    }

    #[tokio::test]
    async fn test_save_without_selection() {
        let mut session = generated_session().await;
        let before = session.store().clone();

        assert_eq!(session.save("content"), SaveOutcome::NoSelection);
        assert_eq!(session.store(), &before);
    }

    #[tokio::test]
    async fn test_select_missing_clears_selection() {
        let mut session = generated_session().await;
        session.select("my_package/README.md");

        assert!(session.select("nope.txt").is_none());
        assert_eq!(session.selected(), None);
        assert_eq!(session.save("x"), SaveOutcome::NoSelection);
    }

    #[tokio::test]
    async fn test_delete_selected() {
        let mut session = generated_session().await;
        session.select("my_package/LICENSE");

        assert_eq!(
            session.delete_selected(),
            DeleteOutcome::Deleted("my_package/LICENSE".to_string())
        );
        assert!(!session.store().contains("my_package/LICENSE"));
        assert_eq!(session.selected(), None);
        assert_eq!(session.delete_selected(), DeleteOutcome::NoSelection);
    }

    #[test]
    fn test_add_file() {
        let mut session = Session::default();

        assert_eq!(session.add_file("   "), AddOutcome::EmptyPath);
        assert!(!session.can_export());

        assert_eq!(
            session.add_file("  pkg/CHANGELOG.md "),
            AddOutcome::Added("pkg/CHANGELOG.md".to_string())
        );
        assert_eq!(session.store().list(), vec!["pkg/CHANGELOG.md"]);
        assert_eq!(session.store().get("pkg/CHANGELOG.md"), "");
        assert!(session.can_export());
    }

    #[tokio::test]
    async fn test_export_round_trips_edits() {
        let mut session = generated_session().await;
        session.select("my_package/README.md");
        session.save("edited");
        session.add_file("my_package/NOTES.md");

        let decoded = archive::read_archive(&session.export().unwrap()).unwrap();
        assert_eq!(&decoded, session.store());
        assert_eq!(decoded.get("my_package/README.md"), "edited");
    }

    #[test]
    fn test_export_error_reports_path() {
        let mut session = Session::default();
        session.add_file("/abs/path.txt");

        match session.export() {
            Err(ExportError::InvalidPath { path, .. }) => assert_eq!(path, "/abs/path.txt"),
            other => panic!("expected InvalidPath, got {:?}", other),
        }
    }
}
