//! Dependency installation through the selected package manager

use super::command::ToolCommand;
use super::pm::PackageManager;
use anyhow::Result;
use std::path::Path;

/// Outcome of the install step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    pub exit_code: i32,
    pub command: String,
    pub args: Vec<String>,
}

impl InstallResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `<manager> install` in `target_dir` and wait for it
///
/// No retries. Only a failure to spawn is an `Err`; a non-zero exit is
/// reported through `InstallResult::exit_code`.
pub async fn run_install(
    manager: &PackageManager,
    target_dir: &Path,
    verbose: bool,
) -> Result<InstallResult> {
    let cmd = ToolCommand::new(manager.program()).args(manager.install_args().iter().copied());
    let exit_code = cmd.status_in(target_dir, verbose).await?;

    Ok(InstallResult {
        exit_code,
        command: cmd.program,
        args: cmd.args,
    })
}
