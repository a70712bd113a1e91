//! Package manager selection and the version precondition

use crate::error::ScaffoldError;
use crate::product::BrokenRelease;
use semver::Version;
use std::fmt;
use std::path::Path;
use std::process::Command;

/// Supported package managers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    kind: ManagerKind,
    program: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerKind {
    Npm,
    Yarn,
}

impl ManagerKind {
    fn default_program(&self) -> &'static str {
        match self {
            ManagerKind::Npm => "npm",
            ManagerKind::Yarn => "yarn",
        }
    }
}

impl PackageManager {
    pub fn new(kind: ManagerKind) -> Self {
        Self {
            kind,
            program: kind.default_program().to_string(),
        }
    }

    /// Use a different executable for the same manager
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn kind(&self) -> ManagerKind {
        self.kind
    }

    /// Executable actually spawned
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Prefix shown to the user in instructions
    pub fn display_command(&self) -> &'static str {
        self.kind.default_program()
    }

    pub fn install_args(&self) -> &'static [&'static str] {
        &["install"]
    }

    pub fn is_alternate(&self) -> bool {
        self.kind == ManagerKind::Yarn
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_command())
    }
}

/// Lock file whose presence selects the alternate manager
pub const ALTERNATE_LOCK_FILE: &str = "yarn.lock";

/// Pick the manager for `target_dir` without running anything
pub fn detect(target_dir: &Path) -> PackageManager {
    if target_dir.join(ALTERNATE_LOCK_FILE).is_file() {
        PackageManager::new(ManagerKind::Yarn)
    } else {
        PackageManager::new(ManagerKind::Npm)
    }
}

/// Parse version string, handling a leading `v` and surrounding whitespace
pub fn parse_version(version_str: &str) -> Result<Version, semver::Error> {
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned)
}

/// Run `<program> --version` synchronously and parse the output
pub fn query_version(program: &str) -> Result<Version, ScaffoldError> {
    let query_error = |reason: String| ScaffoldError::VersionQuery {
        command: program.to_string(),
        reason,
    };

    let output = Command::new(program)
        .arg("--version")
        .output()
        .map_err(|e| query_error(e.to_string()))?;

    if !output.status.success() {
        return Err(query_error(format!(
            "exited with status {}",
            output.status.code().unwrap_or(-1)
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_version(&stdout).map_err(|e| query_error(format!("'{}': {}", stdout.trim(), e)))
}

/// Reject a version inside the broken release range
pub fn check_supported(
    version: &Version,
    broken: Option<BrokenRelease>,
) -> Result<(), ScaffoldError> {
    match broken {
        Some(release) if version.major == release.major && version.minor < release.fixed_minor => {
            Err(ScaffoldError::UnsupportedPackageManager {
                version: version.to_string(),
                major: release.major,
                fixed_minor: release.fixed_minor,
            })
        }
        _ => Ok(()),
    }
}

/// Detect the manager and enforce the version precondition
///
/// Only the default manager has its version checked. `program` replaces the
/// detected manager's executable when given.
pub fn probe(
    target_dir: &Path,
    program: Option<&str>,
    broken: Option<BrokenRelease>,
) -> Result<PackageManager, ScaffoldError> {
    let mut manager = detect(target_dir);
    if let Some(program) = program {
        manager = manager.with_program(program);
    }

    if !manager.is_alternate() {
        let version = query_version(manager.program())?;
        check_supported(&version, broken)?;
    }

    Ok(manager)
}
