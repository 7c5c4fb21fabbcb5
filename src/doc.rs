//! Documentation pipeline: Doxygen extraction followed by a Sphinx render.
//!
//! The two stages have separate failure domains. A failed extraction stops the pipeline
//! with `ExtractionFailed` before Sphinx runs; a failed render reports `RenderFailed`.

use crate::config::Project;
use crate::error::{DevtoolError, Result};
use crate::pipeline::Pipeline;
use crate::platform::Platform;
use crate::process::{Launcher, OutputPolicy, PipelineStep};
use crate::prompt::Prompter;
use crate::ui;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What `devtool docs` should do. Exactly one action per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocsAction {
    Open,
    Make,
    Delete,
}

impl DocsAction {
    pub fn from_flags(open: bool, make: bool, delete: bool) -> Result<Self> {
        match (open, make, delete) {
            (true, false, false) => Ok(DocsAction::Open),
            (false, true, false) => Ok(DocsAction::Make),
            (false, false, true) => Ok(DocsAction::Delete),
            _ => Err(DevtoolError::InvalidDocsAction),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocsPipeline {
    root: PathBuf,
    docs_dir: PathBuf,
    doxyfile: PathBuf,
    platform: Platform,
}

impl DocsPipeline {
    pub fn new(project: &Project, platform: Platform) -> Self {
        Self {
            root: project.root.clone(),
            docs_dir: project.docs_dir(),
            doxyfile: project.config.docs.doxyfile.clone(),
            platform,
        }
    }

    /// Where Sphinx writes its output trees.
    pub fn output_dir(&self) -> PathBuf {
        self.docs_dir.join("build")
    }

    pub fn index_path(&self) -> PathBuf {
        self.output_dir().join("html").join("index.html")
    }

    /// `doxygen <doxyfile>` run at the project root.
    pub fn extraction_step(&self, verbose: bool) -> PipelineStep {
        PipelineStep::new(["doxygen".to_string(), self.doxyfile.display().to_string()])
            .in_dir(&self.root)
            .output(OutputPolicy::echo_if(verbose))
    }

    /// Sphinx HTML build from `<docs>/source` into `<docs>/build`.
    pub fn render_step(&self, verbose: bool) -> PipelineStep {
        let source = self.docs_dir.join("source").display().to_string();
        let build = self.output_dir().display().to_string();
        let prefix: &[&str] = match self.platform {
            Platform::Windows => &["python", "-m", "sphinx.cmd.build"],
            _ => &["sphinx-build"],
        };
        let command = prefix
            .iter()
            .map(|s| s.to_string())
            .chain(["-M".to_string(), "html".to_string(), source, build]);
        PipelineStep::new(command)
            .in_dir(&self.root)
            .output(OutputPolicy::echo_if(verbose))
    }

    /// Doxygen then Sphinx, as one fail-fast pipeline. A failure of step 0 is an
    /// extraction error; a failure of step 1 is a render error.
    pub fn generate(&self, launcher: &dyn Launcher, verbose: bool) -> Result<()> {
        ui::header(
            "📚",
            &format!(
                "Creating/Updating the documentation based on {}",
                self.doxyfile.display()
            ),
        );

        let pipeline =
            Pipeline::single(self.extraction_step(verbose)).then(self.render_step(verbose));
        let pb = (!verbose).then(|| ui::spinner("Running Doxygen and Sphinx..."));
        let result = pipeline.run(launcher);
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        result.map_err(|e| match e {
            DevtoolError::PipelineFailed { index: 0, code, .. } => {
                DevtoolError::ExtractionFailed { code }
            }
            DevtoolError::PipelineFailed { code, .. } => DevtoolError::RenderFailed { code },
            other => other,
        })?;

        ui::success(&format!(
            "Finished generating the documentation, run {} to open it.",
            "devtool docs --open".cyan()
        ));
        Ok(())
    }

    /// Open the generated index page. Never generates anything.
    pub fn open(&self, launcher: &dyn Launcher) -> Result<()> {
        let index = self.index_path();
        if !index.is_file() {
            return Err(DevtoolError::DocsNotGenerated { index });
        }
        ui::header("📖", "Opening the documentation...");
        let command = self
            .platform
            .opener()
            .into_iter()
            .chain(std::iter::once(index.display().to_string()));
        Pipeline::single(PipelineStep::new(command)).run(launcher)
    }

    /// Remove every generated file after confirmation. Directories are left in place.
    pub fn delete(&self, prompter: &dyn Prompter) -> Result<()> {
        if !prompter.confirm("Are you sure you want to delete all documentation files?")? {
            ui::notice("Cancelled delete operation.");
            return Ok(());
        }

        let files = generated_files(&self.output_dir());
        if files.is_empty() {
            ui::notice("No documentation files to delete.");
            return Ok(());
        }

        ui::header("🗑️", "Deleting files...");
        let pb = ui::progress_bar(files.len() as u64);
        for file in &files {
            pb.set_message(
                file.file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
            );
            if let Err(e) = fs::remove_file(file) {
                pb.abandon();
                return Err(e.into());
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        ui::success(&format!("Deleted {} documentation files.", files.len()));
        Ok(())
    }
}

fn generated_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DevtoolConfig;
    use crate::process::fake::FakeLauncher;
    use crate::prompt::ScriptedPrompter;

    fn pipeline(root: &Path, platform: Platform) -> DocsPipeline {
        DocsPipeline::new(&Project::new(root, DevtoolConfig::default()), platform)
    }

    #[test]
    fn test_docs_action_requires_exactly_one_flag() {
        assert_eq!(DocsAction::from_flags(true, false, false).unwrap(), DocsAction::Open);
        assert_eq!(DocsAction::from_flags(false, true, false).unwrap(), DocsAction::Make);
        assert_eq!(DocsAction::from_flags(false, false, true).unwrap(), DocsAction::Delete);
        assert!(DocsAction::from_flags(false, false, false).is_err());
        assert!(DocsAction::from_flags(true, true, false).is_err());
        assert!(DocsAction::from_flags(true, true, true).is_err());
    }

    #[test]
    fn test_generate_runs_both_stages() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FakeLauncher::new();

        pipeline(tmp.path(), Platform::Posix)
            .generate(&launcher, true)
            .unwrap();

        let calls = launcher.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].display(), "doxygen Doxyfile.in");
        assert_eq!(calls[0].cwd.as_deref(), Some(tmp.path()));
        assert_eq!(calls[1].program(), "sphinx-build");
    }

    #[test]
    fn test_extraction_failure_skips_render() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FakeLauncher::new().exit_with("doxygen", 1);

        let err = pipeline(tmp.path(), Platform::Posix)
            .generate(&launcher, true)
            .unwrap_err();

        assert!(matches!(err, DevtoolError::ExtractionFailed { code: Some(1) }));
        assert_eq!(launcher.calls().len(), 1);
    }

    #[test]
    fn test_missing_doxygen_is_extraction_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FakeLauncher::new().missing("doxygen");

        let err = pipeline(tmp.path(), Platform::Posix)
            .generate(&launcher, true)
            .unwrap_err();
        assert!(matches!(err, DevtoolError::ExtractionFailed { code: None }));
    }

    #[test]
    fn test_render_failure_carries_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FakeLauncher::new().exit_with("sphinx-build", 2);

        let err = pipeline(tmp.path(), Platform::Posix)
            .generate(&launcher, true)
            .unwrap_err();

        assert!(matches!(err, DevtoolError::RenderFailed { code: Some(2) }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_render_command_forms_share_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let posix = pipeline(tmp.path(), Platform::Posix).render_step(false);
        let windows = pipeline(tmp.path(), Platform::Windows).render_step(false);

        assert_eq!(posix.command[0], "sphinx-build");
        assert_eq!(windows.command[..3], ["python", "-m", "sphinx.cmd.build"]);
        assert_eq!(posix.command[1..], windows.command[3..]);

        let docs = tmp.path().join("docs");
        assert_eq!(
            posix.command[1..],
            [
                "-M".to_string(),
                "html".to_string(),
                docs.join("source").display().to_string(),
                docs.join("build").display().to_string(),
            ]
        );
    }

    #[test]
    fn test_open_without_index_generates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FakeLauncher::new();

        let err = pipeline(tmp.path(), Platform::Posix)
            .open(&launcher)
            .unwrap_err();

        assert!(matches!(err, DevtoolError::DocsNotGenerated { .. }));
        assert!(launcher.calls().is_empty());
        assert!(!tmp.path().join("docs").exists());
    }

    #[test]
    fn test_open_uses_platform_opener() {
        let tmp = tempfile::tempdir().unwrap();
        let docs = pipeline(tmp.path(), Platform::MacOs);
        fs::create_dir_all(docs.index_path().parent().unwrap()).unwrap();
        fs::write(docs.index_path(), "<html></html>").unwrap();
        let launcher = FakeLauncher::new();

        docs.open(&launcher).unwrap();

        assert_eq!(
            launcher.commands(),
            vec![format!("open {}", docs.index_path().display())]
        );
    }

    fn seed_output(docs: &DocsPipeline) -> Vec<PathBuf> {
        let html = docs.output_dir().join("html");
        fs::create_dir_all(html.join("_static")).unwrap();
        let files = vec![
            html.join("index.html"),
            html.join("_static").join("style.css"),
            docs.output_dir().join("xml.log"),
        ];
        for file in &files {
            fs::write(file, "x").unwrap();
        }
        files
    }

    #[test]
    fn test_delete_cancelled_keeps_files() {
        let tmp = tempfile::tempdir().unwrap();
        let docs = pipeline(tmp.path(), Platform::Posix);
        let files = seed_output(&docs);

        docs.delete(&ScriptedPrompter::confirming(false)).unwrap();

        assert!(files.iter().all(|f| f.exists()));
    }

    #[test]
    fn test_delete_removes_files_but_keeps_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let docs = pipeline(tmp.path(), Platform::Posix);
        let files = seed_output(&docs);

        docs.delete(&ScriptedPrompter::confirming(true)).unwrap();

        assert!(files.iter().all(|f| !f.exists()));
        assert!(docs.output_dir().join("html").join("_static").is_dir());
    }

    #[test]
    fn test_generate_quiet_hides_tool_output() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FakeLauncher::new();

        pipeline(tmp.path(), Platform::Posix)
            .generate(&launcher, false)
            .unwrap();

        assert!(launcher.calls().iter().all(|c| c.output == OutputPolicy::Silent));
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_failure_is_reported() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let docs = pipeline(tmp.path(), Platform::Posix);
        let files = seed_output(&docs);
        let locked = docs.output_dir().join("html").join("_static");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        let result = docs.delete(&ScriptedPrompter::confirming(true));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Running as root ignores directory permissions.
        if files[1].exists() {
            assert!(matches!(result, Err(DevtoolError::Io(_))));
        }
    }

    #[test]
    fn test_delete_with_nothing_generated() {
        let tmp = tempfile::tempdir().unwrap();
        let docs = pipeline(tmp.path(), Platform::Posix);
        docs.delete(&ScriptedPrompter::confirming(true)).unwrap();
    }
}
