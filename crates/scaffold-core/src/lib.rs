//! Scaffold Core - Shared library for mobile app scaffolding CLIs
//!
//! This library turns a freshly created project directory into a consistent,
//! installable app: it rewrites the manifest, copies a template, installs
//! dependencies, runs project generators and reconciles their output with the
//! template.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Manifest transformation, template copying,
//!   package-manager probing, install and generator invocation
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and `Scaffolder`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts and progress output
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffold_core::{ProductConfig, ScaffoldOptions, Scaffolder, Silent};
//!
//! let options = ScaffoldOptions::new(&MyConfig, target_dir, None, None);
//! let outcome = Scaffolder::new(MyConfig).run(&options, &Silent).await?;
//! println!("{}", outcome.message);
//! ```

pub mod config;
pub mod error;
pub mod generators;
pub mod manifest;
pub mod pipeline;
pub mod product;
pub mod reconcile;
pub mod report;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use config::{GeneratorKind, ScaffoldOptions, Variant};
pub use error::{exit_code_for, ScaffoldError};
pub use generators::GeneratorStrategy;
pub use manifest::ProjectManifest;
pub use pipeline::{Outcome, Progress, Scaffolder, Silent, Stage};
pub use product::{BrokenRelease, IgnoreFile, Instruction, Placeholder, ProductConfig};
pub use runtime::{InstallResult, PackageManager};

#[cfg(feature = "tui")]
pub use tui::run;
