//! Package-manager detection and external process management
//!
//! This module provides:
//! - Package manager selection and the version precondition
//! - Spawning external commands with inherited standard I/O
//! - The install step

pub mod command;
pub mod install;
pub mod pm;

pub use command::ToolCommand;
pub use install::{run_install, InstallResult};
pub use pm::{check_supported, detect, parse_version, probe, ManagerKind, PackageManager};
