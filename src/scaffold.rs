//! New-file scaffolding.
//!
//! Every precondition (template lookup, existence check, author, date, brief) is resolved
//! before the first filesystem change, so a rejected request leaves nothing behind. A file
//! is never overwritten.

use crate::error::{DevtoolError, Result};
use crate::process::Launcher;
use crate::prompt::Prompter;
use crate::templates::{TemplateContext, TemplateRegistry};
use crate::toolchain::ToolDescriptor;
use chrono::NaiveDate;
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub target: PathBuf,
    pub brief: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    /// The target had no extension and was created empty.
    Empty(PathBuf),
    Rendered(PathBuf),
}

/// Author name from `git config user.name`.
pub fn resolve_author(launcher: &dyn Launcher) -> Result<String> {
    let command = [ToolDescriptor::git().name, "config", "user.name"].map(str::to_string);
    let captured = launcher
        .capture(&command, None)
        .map_err(|e| DevtoolError::IdentityUnavailable(format!("git could not be run ({})", e)))?;
    let name = captured.stdout.trim();
    if !captured.status.success() || name.is_empty() {
        return Err(DevtoolError::IdentityUnavailable(
            "user.name is not set, run `git config --global user.name <name>`".to_string(),
        ));
    }
    Ok(name.to_string())
}

pub struct Scaffolder<'a> {
    templates: &'a TemplateRegistry,
    launcher: &'a dyn Launcher,
    prompter: &'a dyn Prompter,
    today: NaiveDate,
}

impl<'a> Scaffolder<'a> {
    pub fn new(
        templates: &'a TemplateRegistry,
        launcher: &'a dyn Launcher,
        prompter: &'a dyn Prompter,
        today: NaiveDate,
    ) -> Self {
        Self {
            templates,
            launcher,
            prompter,
            today,
        }
    }

    pub fn scaffold(&self, request: ScaffoldRequest) -> Result<ScaffoldOutcome> {
        let target = request.target;
        let Some(extension) = target
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
        else {
            create_parent_dirs(&target)?;
            write_new(&target, "")?;
            return Ok(ScaffoldOutcome::Empty(target));
        };

        let template = self
            .templates
            .resolve(&extension)?
            .ok_or(DevtoolError::UnsupportedFileType { extension })?;

        if target.exists() {
            return Err(DevtoolError::FileAlreadyExists { path: target });
        }

        let author = resolve_author(self.launcher)?;
        let date = self.today.format("%Y-%m-%d").to_string();
        let brief = match request.brief.filter(|b| !b.trim().is_empty()) {
            Some(brief) => brief,
            None => self.prompter.brief()?,
        };
        let filename = target
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        debug!(
            "rendering .{} template into {}",
            template.extension(),
            target.display()
        );
        let rendered = template.render(&TemplateContext {
            filename,
            author,
            date,
            brief,
        })?;

        create_parent_dirs(&target)?;
        write_new(&target, &rendered)?;
        Ok(ScaffoldOutcome::Rendered(target))
    }
}

fn create_parent_dirs(target: &Path) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Create `path` with `contents`, failing if anything already exists there.
fn write_new(path: &Path, contents: &str) -> Result<()> {
    debug!("writing {}", path.display());
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => DevtoolError::FileAlreadyExists {
                path: path.to_path_buf(),
            },
            _ => DevtoolError::Io(e),
        })?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}
