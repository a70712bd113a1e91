//! Generators backed by the project's locally installed CLI

use super::host::{Completion, Invocation, SubGenerator};
use super::ProjectInitializer;
use crate::runtime::ToolCommand;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Calls `init(root, name)` exported by a locally installed CLI module
///
/// The module path is resolved against the project directory, so the
/// generator version is whatever the install step fetched.
#[derive(Debug, Clone)]
pub struct LocalCliInit {
    name: String,
    /// Module path relative to the project directory
    module: PathBuf,
    node: String,
}

impl LocalCliInit {
    pub fn new(name: impl Into<String>, module: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            node: "node".to_string(),
        }
    }

    /// Use a different JavaScript runtime executable
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = node.into();
        self
    }

    /// Absolute module path for a project
    pub fn resolve(&self, target_dir: &Path) -> PathBuf {
        target_dir.join(&self.module)
    }
}

const INIT_SHIM: &str = "require(process.argv[1]).init(process.argv[2], process.argv[3])";

impl ProjectInitializer for LocalCliInit {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&self, target_dir: &Path, project_name: &str) -> Result<()> {
        let module = self.resolve(target_dir);
        if !module.is_file() {
            anyhow::bail!("Local CLI module not found: {}", module.display());
        }

        let status = Command::new(&self.node)
            .arg("-e")
            .arg(INIT_SHIM)
            .arg(&module)
            .arg(target_dir)
            .arg(project_name)
            .current_dir(target_dir)
            .status()
            .with_context(|| format!("Failed to spawn {}", self.node))?;

        if !status.success() {
            anyhow::bail!(
                "{} init exited with code {}",
                module.display(),
                status.code().unwrap_or(-1)
            );
        }

        Ok(())
    }
}

/// Sub-generator that runs a command in the invocation directory
#[derive(Debug, Clone)]
pub struct CommandSubGenerator {
    command: ToolCommand,
    verbose: bool,
}

impl CommandSubGenerator {
    pub fn new(command: ToolCommand) -> Self {
        Self {
            command,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl SubGenerator for CommandSubGenerator {
    fn run(&self, invocation: Invocation, done: Completion) {
        let command = self.command.clone();
        let verbose = self.verbose || invocation.options.verbose;

        tokio::spawn(async move {
            let result = match command.status_in(&invocation.cwd, verbose).await {
                Ok(0) => Ok(()),
                Ok(code) => Err(anyhow::anyhow!("`{}` exited with code {}", command, code)),
                Err(e) => Err(e),
            };
            done.complete(result);
        });
    }
}
