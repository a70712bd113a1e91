//! Errors that decide how a scaffold run ends
//!
//! Anything not listed here travels as a plain `anyhow::Error` with context
//! attached at the failing file or command.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The default package manager is a release known to corrupt installs
    #[error("npm {version} is not supported (npm >= {major}.0.0 and < {major}.{fixed_minor}.0 are broken)")]
    UnsupportedPackageManager {
        version: String,
        major: u64,
        fixed_minor: u64,
    },

    /// The package manager could not report its version
    #[error("failed to query `{command} --version`: {reason}")]
    VersionQuery { command: String, reason: String },

    /// The install step exited non-zero
    #[error("`{command} {}` failed with exit code {code}", .args.join(" "))]
    InstallFailed {
        command: String,
        args: Vec<String>,
        code: i32,
    },

    /// A project generator failed or never signalled completion
    #[error("generator `{generator}` failed: {reason}")]
    GeneratorFailed { generator: String, reason: String },

    /// The variant's template directory does not exist
    #[error("template directory not found: {}", .path.display())]
    TemplateMissing { path: PathBuf },
}

impl ScaffoldError {
    /// Process exit status for this failure
    ///
    /// A failed install passes the installer's own status through when it is
    /// a usable exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScaffoldError::InstallFailed { code, .. } if *code > 0 => *code,
            _ => 1,
        }
    }

    pub(crate) fn generator(generator: impl Into<String>, reason: impl ToString) -> Self {
        ScaffoldError::GeneratorFailed {
            generator: generator.into(),
            reason: reason.to_string(),
        }
    }
}

/// Exit code for an arbitrary pipeline error
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ScaffoldError>()
        .map(ScaffoldError::exit_code)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_failed_message_includes_command_line() {
        let err = ScaffoldError::InstallFailed {
            command: "npm".to_string(),
            args: vec!["install".to_string()],
            code: 1,
        };
        assert_eq!(err.to_string(), "`npm install` failed with exit code 1");
    }

    #[test]
    fn test_exit_code_for_wrapped_error() {
        let err = anyhow::Error::new(ScaffoldError::generator("windows", "boom"))
            .context("Generation stage failed");
        assert_eq!(exit_code_for(&err), 1);

        let plain = anyhow::anyhow!("malformed manifest");
        assert_eq!(exit_code_for(&plain), 1);
    }

    #[test]
    fn test_install_exit_code_passes_through() {
        let failed = |code| ScaffoldError::InstallFailed {
            command: "yarn".to_string(),
            args: vec!["install".to_string()],
            code,
        };
        assert_eq!(failed(7).exit_code(), 7);
        assert_eq!(failed(-1).exit_code(), 1);
    }
}
