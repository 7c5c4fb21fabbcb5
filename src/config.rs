//! Project configuration (`devtool.toml`) and project-root discovery.
//!
//! The file is optional and every key has a default; an absent file behaves like:
//!
//! ```toml
//! [build]
//! dir = "build"
//! type = "Release"
//!
//! [sources]
//! dir = "src"
//! extensions = ["cpp", "hpp"]
//!
//! [templates]
//! dir = "scripts/templates"
//!
//! [docs]
//! dir = "docs"
//! doxyfile = "Doxyfile.in"
//!
//! [tidy]
//! wrapper = "scripts/run-clang-tidy.py"
//! ```

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "devtool.toml";

const CMAKE_LISTS: &str = "CMakeLists.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BuildType {
    #[value(name = "Debug")]
    Debug,
    #[default]
    #[value(name = "Release")]
    Release,
    #[value(name = "RelWithDebInfo")]
    RelWithDebInfo,
    #[value(name = "MinSizeRel")]
    MinSizeRel,
}

impl BuildType {
    /// Value for `CMAKE_BUILD_TYPE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

/// Same case-insensitive names as `--build-type`.
impl<'de> Deserialize<'de> for BuildType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        BuildType::from_str(&name, true).map_err(|_| {
            serde::de::Error::custom(format!(
                "unknown build type `{}`, expected one of Debug, Release, RelWithDebInfo, MinSizeRel",
                name
            ))
        })
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DevtoolConfig {
    pub build: BuildSection,
    pub sources: SourcesSection,
    pub templates: TemplatesSection,
    pub docs: DocsSection,
    pub tidy: TidySection,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSection {
    pub dir: PathBuf,
    #[serde(rename = "type")]
    pub build_type: BuildType,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("build"),
            build_type: BuildType::Release,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesSection {
    pub dir: PathBuf,
    pub extensions: Vec<String>,
}

impl Default for SourcesSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("src"),
            extensions: vec!["cpp".to_string(), "hpp".to_string()],
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesSection {
    pub dir: PathBuf,
}

impl Default for TemplatesSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("scripts").join("templates"),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DocsSection {
    pub dir: PathBuf,
    pub doxyfile: PathBuf,
}

impl Default for DocsSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("docs"),
            doxyfile: PathBuf::from("Doxyfile.in"),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TidySection {
    pub wrapper: PathBuf,
}

impl Default for TidySection {
    fn default() -> Self {
        Self {
            wrapper: PathBuf::from("scripts").join("run-clang-tidy.py"),
        }
    }
}

/// A resolved project: its root directory plus the configuration found there.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: DevtoolConfig,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, config: DevtoolConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Resolve the project from an explicit root, or by searching upwards from `cwd`.
    pub fn discover(explicit_root: Option<&Path>, cwd: &Path) -> Result<Self> {
        let root = match explicit_root {
            Some(dir) => cwd.join(dir),
            None => find_root(cwd).unwrap_or_else(|| cwd.to_path_buf()),
        };
        let config = load_config(&root)?;
        Ok(Self { root, config })
    }

    /// Resolve a path from the configuration (or the CLI) against the project root.
    pub fn path(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn sources_dir(&self) -> PathBuf {
        self.path(&self.config.sources.dir)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.path(&self.config.templates.dir)
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.path(&self.config.docs.dir)
    }
}

/// Project root for `start` (inclusive): the nearest ancestor holding `devtool.toml`,
/// otherwise the outermost ancestor holding a `CMakeLists.txt`. Subdirectories of a CMake
/// project carry their own lists, so the nearest one is usually not the root.
pub fn find_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE).is_file())
        .or_else(|| {
            start
                .ancestors()
                .filter(|dir| dir.join(CMAKE_LISTS).is_file())
                .last()
        })
        .map(Path::to_path_buf)
}

/// Load `devtool.toml` from `root`, falling back to defaults when it does not exist.
pub fn load_config(root: &Path) -> Result<DevtoolConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(DevtoolConfig::default());
    }
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {} - check file permissions", path.display()))?;
    parse_config(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<DevtoolConfig> {
    Ok(toml::from_str(contents)?)
}
