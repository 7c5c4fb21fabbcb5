//! External tool discovery.
//!
//! Tools are probed by running their version command. A tool that cannot be started is
//! reported absent; whether that is fatal is up to the caller (see [`require`]).

pub mod generator;
pub mod types;

pub use generator::{Generator, select_generator};
pub use types::{ProbeResult, ToolDescriptor};

use crate::error::{DevtoolError, Result};
use crate::process::Launcher;
use log::debug;
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"version\s+(\d+\.\d+\.\d+)").expect("version pattern is valid"));

/// Extract `<major>.<minor>.<patch>` from a `... version X.Y.Z ...` banner.
pub fn parse_version(output: &str) -> Option<String> {
    VERSION_PATTERN
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Probe a tool for presence and version.
///
/// Fails with `ToolVersionTooLow` when the tool has a minimum version and the reported
/// one is lower or cannot be parsed.
pub fn probe(launcher: &dyn Launcher, tool: &ToolDescriptor) -> Result<ProbeResult> {
    let captured = match launcher.capture(&tool.version_command(), None) {
        Ok(captured) => captured,
        Err(e) => {
            debug!("{} not found: {}", tool.name, e);
            return Ok(ProbeResult::absent(tool.clone()));
        }
    };

    if !captured.status.success() {
        debug!(
            "`{}` exited with {:?}; counting {} as present",
            tool.version_command().join(" "),
            captured.status.code,
            tool.name
        );
    }

    let version = parse_version(&captured.stdout);
    debug!("{} present, version {:?}", tool.name, version);

    if let Some(min) = &tool.min_version {
        let parsed = version.as_deref().and_then(|v| Version::parse(v).ok());
        if !parsed.is_some_and(|v| v >= *min) {
            return Err(DevtoolError::ToolVersionTooLow {
                tool: tool.name.to_string(),
                found: version.unwrap_or_else(|| "unknown".to_string()),
                required: min.to_string(),
            });
        }
    }

    Ok(ProbeResult::found(tool.clone(), version))
}

/// Probe a tool that the current flow cannot run without.
pub fn require(launcher: &dyn Launcher, tool: &ToolDescriptor) -> Result<ProbeResult> {
    let result = probe(launcher, tool)?;
    if !result.is_present() {
        return Err(DevtoolError::ToolMissing {
            tool: result.tool().name.to_string(),
        });
    }
    Ok(result)
}
