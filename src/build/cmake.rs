use super::BuildConfig;
use crate::config::Project;
use crate::error::{DevtoolError, Result};
use crate::pipeline::Pipeline;
use crate::platform::Platform;
use crate::process::{Launcher, OutputPolicy, PipelineStep};
use crate::toolchain::{self, ProbeResult, ToolDescriptor, select_generator};
use crate::ui;
use log::warn;
use std::fs;

fn probe_build_tools(launcher: &dyn Launcher) -> Result<ProbeResult> {
    toolchain::require(launcher, &ToolDescriptor::cmake())?;
    let ninja = toolchain::probe(launcher, &ToolDescriptor::ninja())?;
    if !ninja.is_present() {
        ui::notice("Ninja is not installed. Ninja is the recommended build system.");
    }
    Ok(ninja)
}

/// `cmake -DCMAKE_BUILD_TYPE=<type> [-G<generator>] <root>`, run inside the build directory.
pub fn configure_step(project: &Project, config: &BuildConfig) -> PipelineStep {
    let mut command = vec![
        "cmake".to_string(),
        format!("-DCMAKE_BUILD_TYPE={}", config.build_type().as_str()),
    ];
    if let Some(generator) = config.generator() {
        command.push(generator.flag());
    }
    command.push(project.root.display().to_string());

    PipelineStep::new(command)
        .in_dir(config.build_dir())
        .output(OutputPolicy::echo_if(config.echo()))
}

pub fn configure(
    project: &Project,
    launcher: &dyn Launcher,
    platform: Platform,
    config: BuildConfig,
) -> Result<()> {
    ui::header("🛠️", "Configuring project...");

    let ninja = probe_build_tools(launcher)?;
    let config = config.with_generator(select_generator(&ninja, platform));
    if config.generator().is_none() {
        warn!("no generator known for platform {}", platform);
        ui::notice("No generator known for this platform, cmake will pick its default.");
    }

    fs::create_dir_all(config.build_dir())?;
    Pipeline::single(configure_step(project, &config)).run(launcher)?;

    ui::success("Project configured successfully.");
    Ok(())
}

/// `ninja` when available, otherwise cmake's generic build entry point.
pub fn build_step(config: &BuildConfig, ninja: &ProbeResult) -> PipelineStep {
    let command: &[&str] = if ninja.is_present() {
        &["ninja"]
    } else {
        &["cmake", "--build", "."]
    };
    PipelineStep::new(command.iter().copied())
        .in_dir(config.build_dir())
        .output(OutputPolicy::echo_if(config.echo()))
}

pub fn build(launcher: &dyn Launcher, config: BuildConfig) -> Result<()> {
    ui::header("🛠️", "Building project...");

    let ninja = probe_build_tools(launcher)?;
    if !config.build_dir().is_dir() {
        return Err(DevtoolError::NotConfigured {
            build_dir: config.build_dir().to_path_buf(),
        });
    }
    Pipeline::single(build_step(&config, &ninja)).run(launcher)?;

    ui::success("Project built successfully.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildType, DevtoolConfig};
    use crate::process::fake::FakeLauncher;
    use crate::toolchain::Generator;
    use std::path::Path;

    const CMAKE_OK: &str = "cmake version 3.28.1";

    fn project(root: &Path) -> Project {
        Project::new(root, DevtoolConfig::default())
    }

    #[test]
    fn test_configure_missing_cmake_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let build_dir = tmp.path().join("build");
        let launcher = FakeLauncher::new().missing("cmake");

        let err = configure(
            &project(tmp.path()),
            &launcher,
            Platform::Posix,
            BuildConfig::new(BuildType::Release, &build_dir, true),
        )
        .unwrap_err();

        assert!(matches!(err, DevtoolError::ToolMissing { .. }));
        assert!(!build_dir.exists());
        assert_eq!(launcher.commands(), vec!["cmake --version"]);
    }

    #[test]
    fn test_configure_old_cmake_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let build_dir = tmp.path().join("build");
        let launcher = FakeLauncher::new().stdout("cmake", "cmake version 3.16.3");

        let err = configure(
            &project(tmp.path()),
            &launcher,
            Platform::Posix,
            BuildConfig::new(BuildType::Release, &build_dir, true),
        )
        .unwrap_err();

        assert!(matches!(err, DevtoolError::ToolVersionTooLow { .. }));
        assert!(!build_dir.exists());
    }

    #[test]
    fn test_configure_with_ninja() {
        let tmp = tempfile::tempdir().unwrap();
        let build_dir = tmp.path().join("build");
        let launcher = FakeLauncher::new().stdout("cmake", CMAKE_OK);

        configure(
            &project(tmp.path()),
            &launcher,
            Platform::Windows,
            BuildConfig::new(BuildType::Debug, &build_dir, false),
        )
        .unwrap();

        assert!(build_dir.is_dir());
        let calls = launcher.calls();
        assert_eq!(calls.len(), 3);
        let step = &calls[2];
        assert_eq!(
            step.command,
            vec![
                "cmake".to_string(),
                "-DCMAKE_BUILD_TYPE=Debug".to_string(),
                "-GNinja".to_string(),
                tmp.path().display().to_string(),
            ]
        );
        assert_eq!(step.cwd.as_deref(), Some(build_dir.as_path()));
        assert_eq!(step.output, OutputPolicy::Silent);
    }

    #[test]
    fn test_configure_without_ninja_uses_platform_generator() {
        let tmp = tempfile::tempdir().unwrap();
        let build_dir = tmp.path().join("out");
        let launcher = FakeLauncher::new()
            .stdout("cmake", CMAKE_OK)
            .missing("ninja");

        configure(
            &project(tmp.path()),
            &launcher,
            Platform::Posix,
            BuildConfig::new(BuildType::Release, &build_dir, true),
        )
        .unwrap();

        let last = launcher.calls().pop().unwrap();
        assert!(last.command.contains(&"-GUnix Makefiles".to_string()));
        assert_eq!(last.output, OutputPolicy::Echo);
    }

    #[test]
    fn test_configure_unknown_platform_omits_generator() {
        let tmp = tempfile::tempdir().unwrap();
        let config = BuildConfig::new(BuildType::Release, tmp.path().join("build"), true);
        let step = configure_step(&project(tmp.path()), &config.with_generator(None));
        assert!(!step.command.iter().any(|arg| arg.starts_with("-G")));
    }

    #[test]
    fn test_configure_propagates_cmake_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FakeLauncher::new()
            .stdout("cmake", CMAKE_OK)
            .exit_with("cmake", 1);

        let err = configure(
            &project(tmp.path()),
            &launcher,
            Platform::Posix,
            BuildConfig::new(BuildType::Release, tmp.path().join("build"), true),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(matches!(err, DevtoolError::PipelineFailed { .. }));
    }

    #[test]
    fn test_build_with_ninja() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FakeLauncher::new().stdout("cmake", CMAKE_OK);

        build(
            &launcher,
            BuildConfig::new(BuildType::Release, tmp.path(), true),
        )
        .unwrap();

        assert_eq!(
            launcher.commands(),
            vec!["cmake --version", "ninja --version", "ninja"]
        );
    }

    #[test]
    fn test_build_without_ninja() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FakeLauncher::new()
            .stdout("cmake", CMAKE_OK)
            .missing("ninja");

        build(
            &launcher,
            BuildConfig::new(BuildType::Release, tmp.path(), true),
        )
        .unwrap();

        let last = launcher.calls().pop().unwrap();
        assert_eq!(last.display(), "cmake --build .");
        assert_eq!(last.cwd.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn test_build_requires_configured_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FakeLauncher::new().stdout("cmake", CMAKE_OK);

        let err = build(
            &launcher,
            BuildConfig::new(BuildType::Release, tmp.path().join("missing"), true),
        )
        .unwrap_err();

        assert!(matches!(err, DevtoolError::NotConfigured { .. }));
        assert_eq!(launcher.calls().len(), 2);
    }

    #[test]
    fn test_build_missing_cmake_issues_no_build_command() {
        let tmp = tempfile::tempdir().unwrap();
        let launcher = FakeLauncher::new().missing("cmake");

        let err = build(
            &launcher,
            BuildConfig::new(BuildType::Release, tmp.path(), true),
        )
        .unwrap_err();

        assert!(matches!(err, DevtoolError::ToolMissing { .. }));
        assert_eq!(launcher.commands(), vec!["cmake --version"]);
    }

    #[test]
    fn test_generator_is_fixed_once() {
        let config = BuildConfig::new(BuildType::Release, "build", true)
            .with_generator(Some(Generator::Xcode));
        assert_eq!(config.generator(), Some(Generator::Xcode));
    }
}
