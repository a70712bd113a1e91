//! Generators run as external command-line tools

use crate::error::ScaffoldError;
use crate::runtime::ToolCommand;
use anyhow::Result;
use std::path::Path;

/// An external generator spawned in the project directory
#[derive(Debug, Clone)]
pub struct SubprocessGenerator {
    pub name: String,
    pub command: ToolCommand,
}

impl SubprocessGenerator {
    pub fn new(name: impl Into<String>, command: ToolCommand) -> Self {
        Self {
            name: name.into(),
            command,
        }
    }

    /// Spawn with inherited stdio; a non-zero exit is a generator failure
    pub async fn run(&self, target_dir: &Path, verbose: bool) -> Result<()> {
        let code = self
            .command
            .status_in(target_dir, verbose)
            .await
            .map_err(|e| ScaffoldError::generator(&self.name, format!("{:#}", e)))?;

        if code != 0 {
            return Err(ScaffoldError::generator(
                &self.name,
                format!("`{}` exited with code {}", self.command, code),
            )
            .into());
        }

        Ok(())
    }
}
