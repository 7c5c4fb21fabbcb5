//! User interaction behind a trait.
//!
//! Flows that may need input (the brief of a new file, its path, a delete confirmation)
//! take a [`Prompter`] so they can be driven interactively, from a script, or not at all.

use crate::error::{DevtoolError, Result};
use inquire::{Confirm, Text};
use std::path::PathBuf;

pub trait Prompter {
    /// A non-empty one-line description for a new file.
    fn brief(&self) -> Result<String>;

    /// Path of the file to create.
    fn file_path(&self) -> Result<PathBuf>;

    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Asks on the terminal. Fails when nobody is attending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompter;

impl InquirePrompter {
    fn ensure_attended() -> Result<()> {
        if console::user_attended() {
            Ok(())
        } else {
            Err(DevtoolError::PromptUnavailable(
                "Input is required but no terminal is attached.".to_string(),
            ))
        }
    }
}

fn prompt_error(e: inquire::InquireError) -> DevtoolError {
    DevtoolError::PromptUnavailable(format!("Prompt failed: {}", e))
}

impl Prompter for InquirePrompter {
    fn brief(&self) -> Result<String> {
        Self::ensure_attended()?;
        let brief = Text::new("Brief description of the file")
            .with_validator(inquire::required!("A brief description is required"))
            .prompt()
            .map_err(prompt_error)?;
        Ok(brief.trim().to_string())
    }

    fn file_path(&self) -> Result<PathBuf> {
        Self::ensure_attended()?;
        let path = Text::new("Path of the new file")
            .with_help_message("Relative to the current directory, e.g. src/core/Engine.hpp")
            .prompt()
            .map_err(prompt_error)?;
        let path = path.trim();
        if path.is_empty() {
            return Err(DevtoolError::PromptUnavailable(
                "File creation was cancelled by the user!".to_string(),
            ));
        }
        Ok(PathBuf::from(path))
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        Self::ensure_attended()?;
        Confirm::new(question)
            .with_default(false)
            .prompt()
            .map_err(prompt_error)
    }
}

/// Fixed answers, for tests and non-interactive callers.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    pub brief: Option<String>,
    pub file_path: Option<PathBuf>,
    pub confirm: bool,
}

impl ScriptedPrompter {
    pub fn with_brief(brief: &str) -> Self {
        Self {
            brief: Some(brief.to_string()),
            ..Self::default()
        }
    }

    pub fn confirming(confirm: bool) -> Self {
        Self {
            confirm,
            ..Self::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn brief(&self) -> Result<String> {
        match self.brief.as_deref().map(str::trim) {
            Some(brief) if !brief.is_empty() => Ok(brief.to_string()),
            _ => Err(DevtoolError::PromptUnavailable(
                "A brief description is required.".to_string(),
            )),
        }
    }

    fn file_path(&self) -> Result<PathBuf> {
        self.file_path.clone().ok_or_else(|| {
            DevtoolError::PromptUnavailable("File creation was cancelled by the user!".to_string())
        })
    }

    fn confirm(&self, _question: &str) -> Result<bool> {
        Ok(self.confirm)
    }
}

/// Refuses every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeniedPrompter;

impl Prompter for DeniedPrompter {
    fn brief(&self) -> Result<String> {
        Err(DevtoolError::PromptUnavailable(
            "A brief description is required (pass --brief).".to_string(),
        ))
    }

    fn file_path(&self) -> Result<PathBuf> {
        Err(DevtoolError::PromptUnavailable(
            "A file path is required (pass --file-path).".to_string(),
        ))
    }

    fn confirm(&self, _question: &str) -> Result<bool> {
        Err(DevtoolError::PromptUnavailable(
            "Confirmation is required but prompting is disabled.".to_string(),
        ))
    }
}
