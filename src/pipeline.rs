//! Sequential, fail-fast execution of external steps.

use crate::error::{DevtoolError, Result};
use crate::process::{Launcher, PipelineStep};
use log::debug;

/// An ordered list of steps. Execution stops at the first step that fails to launch or
/// exits non-zero; later steps never run.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    steps: Vec<PipelineStep>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(step: PipelineStep) -> Self {
        Self { steps: vec![step] }
    }

    pub fn then(mut self, step: PipelineStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Run every step in order. No retries.
    pub fn run(&self, launcher: &dyn Launcher) -> Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            debug!("pipeline step {}: {}", index, step.display());
            let code = match launcher.run(step) {
                Ok(status) if status.success() => continue,
                Ok(status) => status.code,
                Err(e) => {
                    debug!("failed to launch `{}`: {}", step.program(), e);
                    None
                }
            };
            return Err(DevtoolError::PipelineFailed {
                index,
                command: step.display(),
                code,
            });
        }
        Ok(())
    }
}
