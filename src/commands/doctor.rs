//! Doctor command handler
//!
//! Handles `devtool doctor`: probes every external tool devtool can drive and reports
//! what is installed.

use colored::*;

use crate::error::{DevtoolError, Result};
use crate::platform::Platform;
use crate::process::Launcher;
use crate::toolchain::{self, ToolDescriptor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    Found(Option<String>),
    Missing,
    TooOld { found: String, required: String },
}

#[derive(Debug, Clone)]
pub struct ToolReport {
    pub tool: ToolDescriptor,
    pub status: ToolStatus,
}

impl ToolReport {
    /// Whether this result stops `configure`/`build` from working.
    fn blocks_build(&self) -> bool {
        self.tool.name == ToolDescriptor::cmake().name && self.status_is_fatal()
    }

    fn status_is_fatal(&self) -> bool {
        !matches!(self.status, ToolStatus::Found(_))
    }
}

pub fn diagnose(launcher: &dyn Launcher) -> Vec<ToolReport> {
    ToolDescriptor::catalog()
        .into_iter()
        .map(|tool| {
            let status = match toolchain::probe(launcher, &tool) {
                Ok(result) if result.is_present() => {
                    ToolStatus::Found(result.version().map(str::to_string))
                }
                Ok(_) => ToolStatus::Missing,
                Err(DevtoolError::ToolVersionTooLow {
                    found, required, ..
                }) => ToolStatus::TooOld { found, required },
                Err(_) => ToolStatus::Missing,
            };
            ToolReport { tool, status }
        })
        .collect()
}

/// Run the `devtool doctor` command to diagnose missing tools
pub fn run_doctor(launcher: &dyn Launcher, platform: Platform) -> Result<()> {
    println!("{} Running System Doctor...", "🚑".red());
    println!("-------------------------------");
    println!("Platform: {}", platform.to_string().green());

    let reports = diagnose(launcher);
    for report in &reports {
        print!("Checking {}... ", report.tool.name);
        match &report.status {
            ToolStatus::Found(Some(version)) => println!("{} ({})", "Found".green(), version),
            ToolStatus::Found(None) => println!("{}", "Found".green()),
            ToolStatus::TooOld { found, required } => println!(
                "{}",
                format!("Too old ({} < {})", found, required).red()
            ),
            ToolStatus::Missing if report.tool.required => println!("{}", "Not Found".red()),
            ToolStatus::Missing => println!("{}", "Not Found (Optional)".yellow()),
        }
    }

    if let Some(report) = reports.into_iter().find(ToolReport::blocks_build) {
        return Err(match report.status {
            ToolStatus::TooOld { found, required } => DevtoolError::ToolVersionTooLow {
                tool: report.tool.name.to_string(),
                found,
                required,
            },
            _ => DevtoolError::ToolMissing {
                tool: report.tool.name.to_string(),
            },
        });
    }
    Ok(())
}
