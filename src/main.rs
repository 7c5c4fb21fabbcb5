//! # devtool CLI Entry Point
//!
//! Parses arguments with clap and routes each command to its flow in the library.
//!
//! ## Command Structure
//!
//! - **Build**: `configure`, `build`
//! - **Quality**: `format`, `tidy`
//! - **Docs**: `docs --open | --make | --delete`
//! - **Scaffolding**: `new-file`, `update-links`
//! - **Diagnostics**: `doctor`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use devtool::build::{self, BuildConfig};
use devtool::checker;
use devtool::commands;
use devtool::config::{BuildType, Project};
use devtool::doc::{DocsAction, DocsPipeline};
use devtool::error::DevtoolError;
use devtool::platform::Platform;
use devtool::process::SystemLauncher;
use devtool::prompt::{InquirePrompter, Prompter};
use devtool::scaffold::{ScaffoldOutcome, ScaffoldRequest, Scaffolder};
use devtool::templates::TemplateRegistry;
use devtool::ui;

#[derive(Parser)]
#[command(name = "devtool")]
#[command(about = "Configure, build, lint, document and scaffold a CMake C++ project", version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
struct Cli {
    /// Project root [default: nearest directory containing devtool.toml or CMakeLists.txt]
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the project using CMake
    Configure {
        /// Build type
        #[arg(short = 't', long, value_enum, ignore_case = true)]
        build_type: Option<BuildType>,
        /// Build directory, relative to the project root [default: build]
        #[arg(short = 'b', long)]
        build_dir: Option<PathBuf>,
        /// Hide the output of cmake
        #[arg(short = 'n', long)]
        no_echo: bool,
    },
    /// Build the project (Ninja when available, cmake --build otherwise)
    Build {
        /// Build directory, relative to the project root [default: build]
        #[arg(short = 'b', long)]
        build_dir: Option<PathBuf>,
        /// Hide the output of the build tool
        #[arg(short = 'n', long)]
        no_echo: bool,
    },
    /// Create a new file from the template for its extension
    NewFile {
        /// Path of the file to create (asked interactively if omitted)
        #[arg(short = 'f', long)]
        file_path: Option<PathBuf>,
        /// Brief description of the file (asked interactively if omitted)
        #[arg(short = 'b', long)]
        brief: Option<String>,
    },
    /// Update all CMake lists to link .hpp and .cpp files
    UpdateLinks,
    /// Generate, open or delete the documentation
    Docs {
        /// Open the index of the generated documentation
        #[arg(short, long)]
        open: bool,
        /// Generate or update the documentation
        #[arg(short, long)]
        make: bool,
        /// Delete all generated documentation files
        #[arg(short, long)]
        delete: bool,
        /// Show all tool output
        #[arg(short, long)]
        verbose: bool,
    },
    /// Format the sources using clang-format
    Format {
        /// Show all tool output
        #[arg(short, long)]
        verbose: bool,
    },
    /// Check the sources for issues using clang-tidy
    Tidy {
        /// Show all tool output
        #[arg(short, long)]
        verbose: bool,
        /// Apply clang-tidy's fixes
        #[arg(short, long)]
        fix: bool,
    },
    /// Report which external tools are installed
    Doctor,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "x".red(), err);
        let code = err
            .downcast_ref::<DevtoolError>()
            .map_or(1, DevtoolError::exit_code);
        std::process::exit(code);
    }
}

fn discover(root: Option<&PathBuf>) -> Result<Project> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Project::discover(root.map(PathBuf::as_path), &cwd)
}

fn run(cli: Cli) -> Result<()> {
    let platform = Platform::current();
    let launcher = SystemLauncher;
    let prompter = InquirePrompter;

    match cli.command {
        Commands::UpdateLinks => commands::update_links()?,

        Commands::Docs {
            open,
            make,
            delete,
            verbose,
        } => {
            let action = DocsAction::from_flags(open, make, delete)?;
            let project = discover(cli.root.as_ref())?;
            let docs = DocsPipeline::new(&project, platform);
            match action {
                DocsAction::Open => docs.open(&launcher)?,
                DocsAction::Make => docs.generate(&launcher, verbose)?,
                DocsAction::Delete => docs.delete(&prompter)?,
            }
        }

        Commands::Configure {
            build_type,
            build_dir,
            no_echo,
        } => {
            let project = discover(cli.root.as_ref())?;
            let config = build_config(&project, build_type, build_dir, no_echo);
            build::configure(&project, &launcher, platform, config)?;
        }

        Commands::Build { build_dir, no_echo } => {
            let project = discover(cli.root.as_ref())?;
            let config = build_config(&project, None, build_dir, no_echo);
            build::build(&launcher, config)?;
        }

        Commands::NewFile { file_path, brief } => {
            let project = discover(cli.root.as_ref())?;
            let target = match file_path {
                Some(path) => path,
                None => prompter.file_path()?,
            };
            let templates = TemplateRegistry::new(project.templates_dir());
            let today = chrono::Local::now().date_naive();
            let outcome = Scaffolder::new(&templates, &launcher, &prompter, today)
                .scaffold(ScaffoldRequest { target, brief })?;
            match outcome {
                ScaffoldOutcome::Empty(path) => ui::notice(&format!(
                    "No file type specified, created empty file {}.",
                    path.display()
                )),
                ScaffoldOutcome::Rendered(path) => {
                    ui::success(&format!("File {} created successfully.", path.display()))
                }
            }
        }

        Commands::Format { verbose } => {
            let project = discover(cli.root.as_ref())?;
            checker::format_code(&project, &launcher, verbose)?;
        }

        Commands::Tidy { verbose, fix } => {
            let project = discover(cli.root.as_ref())?;
            checker::tidy_code(&project, &launcher, platform, verbose, fix)?;
        }

        Commands::Doctor => commands::doctor::run_doctor(&launcher, platform)?,
    }
    Ok(())
}

/// CLI options win over `devtool.toml`, which wins over the defaults.
fn build_config(
    project: &Project,
    build_type: Option<BuildType>,
    build_dir: Option<PathBuf>,
    no_echo: bool,
) -> BuildConfig {
    let section = &project.config.build;
    let dir = build_dir.unwrap_or_else(|| section.dir.clone());
    BuildConfig::new(
        build_type.unwrap_or(section.build_type),
        project.path(&dir),
        !no_echo,
    )
}
