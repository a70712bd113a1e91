//! External command invocation

use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// A program plus its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run in `dir` with inherited stdio and wait for exit
    ///
    /// Returns the exit code; a process killed by a signal reports -1.
    pub async fn status_in(&self, dir: &Path, verbose: bool) -> Result<i32> {
        if verbose {
            println!("{} {}", "Running:".dimmed(), self.to_string().yellow());
        }

        let status = TokioCommand::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("Failed to spawn `{}`", self))?;

        Ok(status.code().unwrap_or(-1))
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
