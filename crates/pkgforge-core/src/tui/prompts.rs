//! Charm-style CLI prompts using cliclack

use crate::archive;
use crate::config::{self, GeminiSettings};
use crate::docgen::GeminiDocs;
use crate::metadata::{self, License, PackageMetadata};
use crate::session::{AddOutcome, DeleteOutcome, GenerateError, SaveOutcome, Session};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// YAML file with package metadata
    pub metadata_file: Option<PathBuf>,

    pub name: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub python_requires: Option<String>,
    pub license: Option<License>,
    pub keywords: Option<Vec<String>>,
    pub dependencies: Option<Vec<String>>,

    /// Skip the tests/ directory
    pub no_tests: bool,

    /// Skip the docs/ directory
    pub no_docs: bool,

    /// Generate docs/index.md with Gemini
    pub ai_docs: bool,

    /// Directory the archive is written to (defaults to the current directory)
    pub output: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Metadata from the file (or defaults) with command-line values applied on top
pub fn resolve_metadata(args: &CreateArgs) -> Result<PackageMetadata> {
    let mut meta = match &args.metadata_file {
        Some(path) => config::load_metadata(path)?,
        None => PackageMetadata::default(),
    };

    if let Some(name) = &args.name {
        meta.name = name.clone();
    }
    if let Some(version) = &args.version {
        meta.version = version.clone();
    }
    if let Some(author) = &args.author {
        meta.author = author.clone();
    }
    if let Some(email) = &args.email {
        meta.email = email.clone();
    }
    if let Some(description) = &args.description {
        meta.description = description.clone();
    }
    if let Some(python_requires) = &args.python_requires {
        meta.python_requires = python_requires.clone();
    }
    if let Some(license) = args.license {
        meta.license = license;
    }
    if let Some(keywords) = &args.keywords {
        meta.keywords = keywords.clone();
    }
    if let Some(dependencies) = &args.dependencies {
        meta.dependencies = dependencies.clone();
    }
    if args.no_tests {
        meta.include_tests = false;
    }
    if args.no_docs {
        meta.include_docs = false;
    }
    if args.ai_docs {
        meta.ai_docs = true;
    }

    Ok(meta)
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("pkgforge")?;

    // Step 1: Resolve output directory and metadata
    let output_dir = select_output_dir(&args)?;
    let mut meta = resolve_metadata(&args)?;
    if let Some(path) = &args.metadata_file {
        cliclack::log::info(format!("Loaded metadata from {}", path.display()))?;
    }

    // Step 2: Collect metadata
    if !args.yes {
        prompt_metadata(&mut meta)?;
    }

    // Step 3: Setup docs generator
    let docs = setup_docs(&meta)?;

    // Step 4: Generate package
    let mut session = Session::new(meta);
    generate(&mut session, &docs).await?;

    // Step 5: Edit files, then export
    if args.yes {
        export(&session, &output_dir, true)?;
    } else {
        file_manager(&mut session, &output_dir)?;
    }

    cliclack::outro("Happy packaging!")?;

    Ok(())
}

fn select_output_dir(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.output {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Output directory does not exist: {}", path.display());
    }

    Ok(path)
}

fn prompt_metadata(meta: &mut PackageMetadata) -> Result<()> {
    meta.name = cliclack::input("Package name")
        .default_input(&meta.name)
        .validate(|input: &String| {
            if metadata::is_valid_package_name(input) {
                Ok(())
            } else {
                Err("Invalid package name format")
            }
        })
        .interact()?;

    meta.version = cliclack::input("Version")
        .default_input(&meta.version)
        .validate(|input: &String| {
            if metadata::is_plain_version(input) {
                Ok(())
            } else {
                Err("Invalid version format (use X.Y.Z)")
            }
        })
        .interact()?;

    meta.author = cliclack::input("Author")
        .default_input(&meta.author)
        .interact()?;

    meta.email = cliclack::input("Email")
        .placeholder("optional")
        .default_input(&meta.email)
        .required(false)
        .validate(|input: &String| {
            if input.is_empty() || metadata::is_valid_email(input) {
                Ok(())
            } else {
                Err("Invalid email format")
            }
        })
        .interact()?;

    meta.description = cliclack::input("Description")
        .default_input(&meta.description)
        .interact()?;

    meta.python_requires = cliclack::input("Python required")
        .default_input(&meta.python_requires)
        .interact()?;

    let keywords: String = cliclack::input("Keywords")
        .placeholder("Comma-separated keywords")
        .default_input(&meta.keywords.join(", "))
        .required(false)
        .interact()?;
    meta.keywords = metadata::split_keywords(&keywords);

    let dependencies: String = cliclack::input("Dependencies")
        .placeholder("One package per line (e.g., requests>=2.25.1)")
        .default_input(&meta.dependencies.join("\n"))
        .multiline()
        .required(false)
        .validate(|input: &String| {
            if metadata::split_dependencies(input)
                .iter()
                .all(|dep| metadata::is_valid_dependency(dep))
            {
                Ok(())
            } else {
                Err("Invalid dependency format")
            }
        })
        .interact()?;
    meta.dependencies = metadata::split_dependencies(&dependencies);

    let mut license_select = cliclack::select("License").initial_value(meta.license);
    for license in License::ALL {
        license_select = license_select.item(license, license.spdx(), "");
    }
    meta.license = license_select.interact()?;

    meta.include_tests = cliclack::confirm("Include tests directory?")
        .initial_value(meta.include_tests)
        .interact()?;

    meta.include_docs = cliclack::confirm("Include docs directory?")
        .initial_value(meta.include_docs)
        .interact()?;

    if meta.include_docs {
        meta.ai_docs = cliclack::confirm("Use Gemini for docs?")
            .initial_value(meta.ai_docs)
            .interact()?;
    }

    Ok(())
}

fn setup_docs(meta: &PackageMetadata) -> Result<GeminiDocs> {
    let settings = GeminiSettings::from_env()?;
    let docs = GeminiDocs::new(settings, crate::USER_AGENT);

    if meta.include_docs && meta.ai_docs && !docs.is_configured() {
        cliclack::log::warning(format!(
            "{} is not set; docs/index.md will use the built-in page",
            config::GEMINI_KEY_ENV
        ))?;
    }

    Ok(docs)
}

async fn generate(session: &mut Session, docs: &GeminiDocs) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Generating package...");

    match session.generate(docs).await {
        Ok(report) => {
            spinner.stop(format!(
                "Package '{}' created successfully! ({} files)",
                session.metadata().name,
                report.files.len()
            ));
            for warning in &report.warnings {
                cliclack::log::warning(warning)?;
            }
            Ok(())
        }
        Err(GenerateError::Invalid { errors }) => {
            spinner.stop("Invalid package metadata");
            for error in &errors {
                cliclack::log::error(error)?;
            }
            anyhow::bail!("Fix the package metadata and try again.");
        }
    }
}

/// Pick one of the current files. Returns `None` when the store is empty.
fn pick_file(session: &Session, prompt: &str) -> Result<Option<String>> {
    let paths = session.store().list();
    if paths.is_empty() {
        cliclack::log::info("No files yet.")?;
        return Ok(None);
    }

    let mut select = cliclack::select(prompt.to_string());
    for path in &paths {
        let size = session.store().get(path).len();
        select = select.item(path.clone(), path, format!("{} bytes", size));
    }

    Ok(Some(select.interact()?))
}

fn file_manager(session: &mut Session, output_dir: &Path) -> Result<()> {
    loop {
        let action: &str = cliclack::select("File manager")
            .item("edit", "Edit a file", "")
            .item("view", "View a file", "")
            .item("add", "Add a file", "")
            .item("delete", "Delete a file", "")
            .item("export", "Download ZIP", "")
            .item("quit", "Quit without exporting", "")
            .interact()?;

        match action {
            "edit" => edit_file(session)?,
            "view" => {
                if let Some(path) = pick_file(session, "Select a file to view")? {
                    let content = session.select(&path).unwrap_or_default().to_string();
                    let body = if content.is_empty() {
                        "(empty)"
                    } else {
                        content.as_str()
                    };
                    cliclack::note(path, body)?;
                }
            }
            "add" => add_file(session)?,
            "delete" => delete_file(session)?,
            "export" => {
                if !session.can_export() {
                    cliclack::log::info("Nothing to export yet.")?;
                } else if export(session, output_dir, false)? {
                    return Ok(());
                }
            }
            "quit" => {
                let confirm: bool = cliclack::confirm("Discard all files?")
                    .initial_value(false)
                    .interact()?;
                if confirm {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}

fn edit_file(session: &mut Session) -> Result<()> {
    let Some(path) = pick_file(session, "Select a file to edit")? else {
        return Ok(());
    };

    let current = session.select(&path).unwrap_or_default().to_string();
    let content: String = cliclack::input(format!("Content of {}", path))
        .default_input(&current)
        .multiline()
        .required(false)
        .interact()?;

    match session.save(&content) {
        SaveOutcome::Saved(path) => {
            cliclack::log::success(format!("Changes saved for '{}'.", path))?
        }
        SaveOutcome::NoSelection => cliclack::log::info("No file selected to save.")?,
        SaveOutcome::Missing(path) => {
            cliclack::log::warning(format!("'{}' no longer exists.", path))?
        }
    }
    Ok(())
}

fn add_file(session: &mut Session) -> Result<()> {
    let input: String = cliclack::input("New file")
        .placeholder(&format!("{}/CHANGELOG.md", session.metadata().name))
        .required(false)
        .interact()?;

    match session.add_file(&input) {
        AddOutcome::Added(path) => cliclack::log::success(format!("File '{}' added.", path))?,
        AddOutcome::EmptyPath => cliclack::log::info("Enter a valid file path to add.")?,
    }
    Ok(())
}

fn delete_file(session: &mut Session) -> Result<()> {
    let Some(path) = pick_file(session, "Select a file to delete")? else {
        return Ok(());
    };
    session.select(&path);

    let confirm: bool = cliclack::confirm(format!("Delete '{}'?", path))
        .initial_value(false)
        .interact()?;
    if !confirm {
        session.clear_selection();
        return Ok(());
    }

    match session.delete_selected() {
        DeleteOutcome::Deleted(path) => {
            cliclack::log::success(format!("File '{}' deleted.", path))?
        }
        DeleteOutcome::NoSelection => cliclack::log::info("No file selected to delete.")?,
        DeleteOutcome::Missing(path) => {
            cliclack::log::warning(format!("'{}' no longer exists.", path))?
        }
    }
    Ok(())
}

/// Write the archive into `output_dir`. Returns whether a file was written.
fn export(session: &Session, output_dir: &Path, yes: bool) -> Result<bool> {
    let dest = output_dir.join(session.archive_name());

    if dest.exists() && !yes {
        let overwrite: bool = cliclack::confirm(format!("{} exists. Overwrite?", dest.display()))
            .initial_value(false)
            .interact()?;
        if !overwrite {
            return Ok(false);
        }
    }

    match archive::write_archive(session.store(), &dest) {
        Ok(path) => {
            cliclack::log::success(format!(
                "Wrote {} files to {}",
                session.store().len(),
                path.display()
            ))?;
            Ok(true)
        }
        Err(e) if yes => {
            Err(e).with_context(|| format!("Error preparing download: {}", dest.display()))
        }
        Err(e) => {
            cliclack::log::error(format!("Error preparing download: {}", e))?;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let meta = resolve_metadata(&CreateArgs::default()).unwrap();
        assert_eq!(meta, PackageMetadata::default());
    }

    #[test]
    fn test_resolve_applies_overrides_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.yaml");
        std::fs::write(&path, "name: from_file\nauthor: File Author\nai_docs: false\n").unwrap();

        let args = CreateArgs {
            metadata_file: Some(path),
            name: Some("from_cli".to_string()),
            python_requires: Some(">=3.10".to_string()),
            license: Some(License::Gpl3),
            dependencies: Some(vec!["click".to_string()]),
            no_tests: true,
            ai_docs: true,
            ..CreateArgs::default()
        };
        let meta = resolve_metadata(&args).unwrap();

        assert_eq!(meta.name, "from_cli");
        assert_eq!(meta.author, "File Author");
        assert_eq!(meta.python_requires, ">=3.10");
        assert_eq!(meta.license, License::Gpl3);
        assert_eq!(meta.dependencies, vec!["click"]);
        assert!(!meta.include_tests);
        assert!(meta.include_docs);
        assert!(meta.ai_docs);
    }

    #[test]
    fn test_resolve_missing_file_fails() {
        let args = CreateArgs {
            metadata_file: Some(PathBuf::from("/definitely/not/here.yaml")),
            ..CreateArgs::default()
        };
        assert!(resolve_metadata(&args).is_err());
    }

    #[test]
    fn test_output_dir_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let ok = CreateArgs {
            output: Some(dir.path().to_path_buf()),
            ..CreateArgs::default()
        };
        assert_eq!(select_output_dir(&ok).unwrap(), dir.path());

        let missing = CreateArgs {
            output: Some(dir.path().join("nope")),
            ..CreateArgs::default()
        };
        assert!(select_output_dir(&missing).is_err());
    }
}
