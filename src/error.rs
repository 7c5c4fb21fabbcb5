//! Error taxonomy for devtool.
//!
//! Every failure a command can report is a variant of [`DevtoolError`]. None of them are
//! retried; the binary prints the message and exits with [`DevtoolError::exit_code`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevtoolError {
    /// A required external tool could not be started.
    #[error("{tool} is not installed. Please install {tool} and try again.")]
    ToolMissing { tool: String },

    #[error("{tool} version must be at least {required} (found {found}). Please update {tool} and try again.")]
    ToolVersionTooLow {
        tool: String,
        found: String,
        required: String,
    },

    /// A step of a sequential pipeline failed to launch or exited non-zero.
    #[error("step {index} (`{command}`) {}", describe_exit(.code))]
    PipelineFailed {
        index: usize,
        command: String,
        code: Option<i32>,
    },

    #[error("No source files found under {}.", .dir.display())]
    NoSourceFiles { dir: PathBuf },

    #[error("{}", issues_message(.fixed, .verbose))]
    IssuesFound { fixed: bool, verbose: bool },

    #[error("File type {extension} is not supported.")]
    UnsupportedFileType { extension: String },

    #[error("File {} already exists.", .path.display())]
    FileAlreadyExists { path: PathBuf },

    #[error("Could not resolve the author name from git: {0}")]
    IdentityUnavailable(String),

    #[error("{0}")]
    PromptUnavailable(String),

    #[error("Failed to run doxygen ({}), please verify your input.", describe_exit(.code))]
    ExtractionFailed { code: Option<i32> },

    #[error("There was an error running Sphinx ({}), please verify your path and installation.", describe_exit(.code))]
    RenderFailed { code: Option<i32> },

    #[error("The documentation is not generated, could not find {}. Run `devtool docs --make` first.", .index.display())]
    DocsNotGenerated { index: PathBuf },

    #[error("Build directory {} does not exist. Run `devtool configure` first.", .build_dir.display())]
    NotConfigured { build_dir: PathBuf },

    #[error("You must provide exactly one of --open, --make or --delete to the docs command, see `devtool docs --help`.")]
    InvalidDocsAction,

    #[error("{0} is not implemented yet.")]
    NotImplemented(&'static str),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DevtoolError>;

impl DevtoolError {
    /// Exit status for the process: the failing tool's own code when there is one.
    pub fn exit_code(&self) -> i32 {
        let code = match self {
            DevtoolError::PipelineFailed { code, .. }
            | DevtoolError::ExtractionFailed { code }
            | DevtoolError::RenderFailed { code } => *code,
            _ => None,
        };
        match code {
            Some(c) if c != 0 => c,
            _ => 1,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exited with code {}", c),
        None => "could not be launched".to_string(),
    }
}

fn issues_message(fixed: &bool, verbose: &bool) -> String {
    let mut message = String::from("clang-tidy found issues.");
    if *fixed {
        message.push_str(" clang-tidy fixed the issues.");
    }
    if !*verbose {
        message.push_str(" Run with --verbose for more information.");
    }
    message
}
