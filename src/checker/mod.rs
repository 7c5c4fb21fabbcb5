//! Code quality tools (clang-format, clang-tidy).
//!
//! Both commands first collect the project's sources. An empty source tree fails with
//! `NoSourceFiles` before either tool is probed or run.

use crate::config::Project;
use crate::error::{DevtoolError, Result};
use crate::pipeline::Pipeline;
use crate::platform::Platform;
use crate::process::{Launcher, OutputPolicy, PipelineStep};
use crate::toolchain::{self, ToolDescriptor};
use crate::ui;
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source files under `dir` whose extension is in `extensions`, relative to `root` when
/// possible, in a stable order.
pub fn collect_sources(root: &Path, dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let files: Vec<PathBuf> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| extensions.iter().any(|want| ext == want.as_str()))
        })
        .map(|path| {
            path.strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or(path)
        })
        .collect();
    debug!("found {} source files under {}", files.len(), dir.display());
    files
}

fn project_sources(project: &Project) -> Result<Vec<PathBuf>> {
    let dir = project.sources_dir();
    let files = collect_sources(&project.root, &dir, &project.config.sources.extensions);
    if files.is_empty() {
        return Err(DevtoolError::NoSourceFiles { dir });
    }
    Ok(files)
}

/// `clang-format -style=file -i <files...>` at the project root.
pub fn format_step(project: &Project, files: &[PathBuf], verbose: bool) -> PipelineStep {
    let command = ["clang-format", "-style=file", "-i"]
        .into_iter()
        .map(str::to_string)
        .chain(files.iter().map(|f| f.display().to_string()));
    PipelineStep::new(command)
        .in_dir(&project.root)
        .output(OutputPolicy::echo_if(verbose))
}

pub fn format_code(project: &Project, launcher: &dyn Launcher, verbose: bool) -> Result<()> {
    let files = project_sources(project)?;
    toolchain::require(launcher, &ToolDescriptor::clang_format())?;

    ui::header("🎨", &format!("Formatting {} source files...", files.len()));
    Pipeline::single(format_step(project, &files, verbose)).run(launcher)?;

    ui::success("Project formatted successfully.");
    Ok(())
}

/// `<python> <wrapper> -p <build-dir> <source-dir> -quiet -header-filter=.* [-fix]`.
pub fn tidy_step(project: &Project, platform: Platform, verbose: bool, fix: bool) -> PipelineStep {
    let config = &project.config;
    let mut command = vec![
        platform.python().to_string(),
        config.tidy.wrapper.display().to_string(),
        "-p".to_string(),
        config.build.dir.display().to_string(),
        config.sources.dir.display().to_string(),
        "-quiet".to_string(),
        "-header-filter=.*".to_string(),
    ];
    if fix {
        command.push("-fix".to_string());
    }
    PipelineStep::new(command)
        .in_dir(&project.root)
        .output(OutputPolicy::echo_if(verbose))
}

/// Run clang-tidy over the project through the wrapper script.
///
/// A non-zero exit means issues were found and is reported as a failure even when `fix`
/// applied corrections.
pub fn tidy_code(
    project: &Project,
    launcher: &dyn Launcher,
    platform: Platform,
    verbose: bool,
    fix: bool,
) -> Result<()> {
    project_sources(project)?;
    toolchain::require(launcher, &ToolDescriptor::clang_tidy())?;

    ui::header("🔍", "Checking project for issues...");
    let step = tidy_step(project, platform, verbose, fix);
    match Pipeline::single(step).run(launcher) {
        Ok(()) => {
            ui::success("Project checked successfully.");
            Ok(())
        }
        Err(DevtoolError::PipelineFailed { code: Some(_), .. }) => {
            Err(DevtoolError::IssuesFound { fixed: fix, verbose })
        }
        Err(e) => Err(e),
    }
}
