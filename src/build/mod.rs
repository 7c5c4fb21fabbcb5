//! CMake configure and build flows.
//!
//! Both flows probe cmake (required, minimum 3.25) and ninja (optional) before touching
//! the filesystem or issuing any build command.

mod cmake;

pub use cmake::{build, build_step, configure, configure_step};

use crate::config::BuildType;
use crate::toolchain::Generator;
use std::path::{Path, PathBuf};

/// Options for one configure/build invocation.
///
/// The generator starts unset and is fixed once by [`BuildConfig::with_generator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    build_type: BuildType,
    build_dir: PathBuf,
    generator: Option<Generator>,
    echo: bool,
}

impl BuildConfig {
    pub fn new(build_type: BuildType, build_dir: impl Into<PathBuf>, echo: bool) -> Self {
        Self {
            build_type,
            build_dir: build_dir.into(),
            generator: None,
            echo,
        }
    }

    pub fn with_generator(self, generator: Option<Generator>) -> Self {
        Self { generator, ..self }
    }

    pub fn build_type(&self) -> BuildType {
        self.build_type
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn generator(&self) -> Option<Generator> {
        self.generator
    }

    pub fn echo(&self) -> bool {
        self.echo
    }
}
