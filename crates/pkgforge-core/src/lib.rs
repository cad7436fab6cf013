//! pkgforge core - scaffolding Python packages in memory
//!
//! Generated files never touch the disk until export: templates render into a
//! [`VirtualFileStore`], the user edits them there, and [`export_archive`]
//! turns the final file set into a zip.
//!
//! # Architecture
//!
//! - **Core**: [`store`] (path -> content map) and [`archive`] (zip export)
//! - **Rendering**: [`metadata`], [`templates`], and [`docgen`] for optional
//!   AI-written docs that fall back to a static page
//! - **Session**: [`Session`] owns one store and the editor selection
//! - **CLI/TUI**: cliclack prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use pkgforge_core::{PackageMetadata, Session, StaticDocs};
//!
//! let mut session = Session::new(PackageMetadata::default());
//! session.generate(&StaticDocs::default()).await?;
//! let zip_bytes = session.export()?;
//! ```

pub mod archive;
pub mod config;
pub mod docgen;
pub mod metadata;
pub mod session;
pub mod store;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use archive::{export_archive, read_archive, write_archive, ExportError};
pub use docgen::{DocGenError, DocGenerator, GeminiDocs, StaticDocs};
pub use metadata::{License, PackageMetadata};
pub use session::Session;
pub use store::VirtualFileStore;
pub use templates::{generate_package, GenerationReport};

#[cfg(feature = "tui")]
pub use tui::run;

/// User agent for outgoing HTTP requests
pub const USER_AGENT: &str = concat!("pkgforge/", env!("CARGO_PKG_VERSION"));
