//! pkgforge CLI - Python package scaffolding into a zip archive

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pkgforge_core::tui::CreateArgs;
use pkgforge_core::License;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pkgforge")]
#[command(about = "CLI for scaffolding Python packages into a zip archive")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a package, edit its files, and export a zip
    Create(CliCreateArgs),
    /// List the files inside an exported archive
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// YAML file with package metadata
    #[arg(short, long)]
    pub metadata: Option<PathBuf>,

    /// Package name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Package version (X.Y.Z)
    #[arg(long = "version")]
    pub pkg_version: Option<String>,

    /// Author name
    #[arg(long)]
    pub author: Option<String>,

    /// Author email
    #[arg(long)]
    pub email: Option<String>,

    /// Short package description
    #[arg(long)]
    pub description: Option<String>,

    /// Python version requirement (e.g. >=3.8)
    #[arg(long = "python-requires")]
    pub python_requires: Option<String>,

    /// License (MIT, Apache-2.0, GPL-3.0, BSD-3-Clause)
    #[arg(short, long)]
    pub license: Option<License>,

    /// Keywords (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub keywords: Option<Vec<String>>,

    /// Dependencies (comma-separated, e.g. requests>=2.25.1,click)
    #[arg(long, value_delimiter = ',')]
    pub dependencies: Option<Vec<String>>,

    /// Do not generate the tests directory
    #[arg(long = "no-tests")]
    pub no_tests: bool,

    /// Do not generate the docs directory
    #[arg(long = "no-docs")]
    pub no_docs: bool,

    /// Generate docs/index.md with Gemini (needs GEMINI_KEY)
    #[arg(long = "ai-docs")]
    pub ai_docs: bool,

    /// Directory to write <name>.zip into
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            metadata_file: args.metadata,
            name: args.name,
            version: args.pkg_version,
            author: args.author,
            email: args.email,
            description: args.description,
            python_requires: args.python_requires,
            license: args.license,
            keywords: args.keywords,
            dependencies: args.dependencies,
            no_tests: args.no_tests,
            no_docs: args.no_docs,
            ai_docs: args.ai_docs,
            output: args.output,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Archive to inspect
    pub archive: PathBuf,
}

fn inspect(args: &InspectArgs) -> Result<()> {
    let bytes = std::fs::read(&args.archive)
        .with_context(|| format!("Failed to read {}", args.archive.display()))?;
    let store = pkgforge_core::read_archive(&bytes)
        .with_context(|| format!("Failed to decode {}", args.archive.display()))?;

    println!("{}", args.archive.display().to_string().cyan().bold());
    println!();

    for (path, content) in store.iter() {
        println!(
            "  {} {} {}",
            "->".blue(),
            path,
            format!("({} bytes)", content.len()).dimmed()
        );
    }

    println!();
    println!("{} {} file(s)", "Total".green().bold(), store.len());

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Some(Command::Create(create_args)) => {
            let result = pkgforge_core::run(create_args.into()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::Inspect(inspect_args)) => inspect(&inspect_args),
        None => {
            // No subcommand provided, default to interactive create
            let result = pkgforge_core::run(CreateArgs::default()).await;

            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
