//! # devtool - developer workflow CLI for CMake-based C++ projects
//!
//! devtool wraps the external tools a native project needs day to day behind one command
//! surface: CMake/Ninja for configuring and building, clang-format and clang-tidy for code
//! quality, Doxygen + Sphinx for documentation, and templated scaffolding of new sources.
//!
//! ## Quick Start
//!
//! ```bash
//! devtool configure --build-type Debug
//! devtool build
//! devtool new-file --file-path src/core/Engine.hpp --brief "Engine entry point"
//! devtool docs --make
//! ```
//!
//! ## Module Organization
//!
//! - [`toolchain`] - Tool probing and CMake generator selection
//! - [`pipeline`] - Fail-fast sequencing of external steps
//! - [`build`] - `configure` and `build`
//! - [`checker`] - `format` and `tidy`
//! - [`doc`] - Documentation pipeline
//! - [`scaffold`] - `new-file`

/// CMake configure/build flows.
pub mod build;

/// Code quality tools (clang-format, clang-tidy).
pub mod checker;

/// CLI command handlers that are not a flow of their own.
pub mod commands;

/// Configuration file parsing (`devtool.toml`) and project-root discovery.
pub mod config;

/// Documentation generation (Doxygen + Sphinx).
pub mod doc;

/// Error taxonomy and exit codes.
pub mod error;

/// Sequential external pipelines.
pub mod pipeline;

/// Host platform identity.
pub mod platform;

/// External process launching.
pub mod process;

/// Interactive prompts.
pub mod prompt;

/// New-file scaffolding.
pub mod scaffold;

/// Source file templates.
pub mod templates;

/// External tool probing and generator selection.
pub mod toolchain;

/// Terminal output helpers.
pub mod ui;

pub use error::{DevtoolError, Result};
