//! Product configuration trait for CLI binaries
//!
//! This trait collects every product-specific constant the scaffold pipeline
//! needs: default dependency sets, canonical scripts, template locations, the
//! generators to run and the files they produce that the template replaces.

use crate::config::{GeneratorKind, ScaffoldOptions, Variant};
use crate::generators::GeneratorStrategy;

/// A version-controlled exclusion file shipped under a neutral name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreFile {
    /// Name inside the template (survives packaging untouched)
    pub neutral: &'static str,
    /// Name the file must have in the project
    pub dotfile: &'static str,
}

/// Token in a generated file that is replaced by the project name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    /// Path relative to the target directory
    pub file: &'static str,
    pub token: &'static str,
}

/// Range of default package-manager releases that must not be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokenRelease {
    pub major: u64,
    /// First minor release of `major` with the fix
    pub fixed_minor: u64,
}

/// Configuration trait for scaffolded products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name, installed package name)
/// - Manifest contents (entry file, scripts, test preset, default dependencies)
/// - Template layout
/// - Generators and the files of theirs the template supersedes
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Name of this tool's own package inside `node_modules`
    fn package_name(&self) -> &'static str;

    /// Dependencies merged into every project (default wins on collision)
    fn default_dependencies(&self) -> &'static [(&'static str, &'static str)];

    /// Dev dependencies merged into every project (default wins on collision)
    fn default_dev_dependencies(&self) -> &'static [(&'static str, &'static str)];

    /// Manifest `main` for the variant
    fn entry_file(&self, variant: Variant) -> String;

    /// Canonical scripts; replaces whatever the manifest had
    fn scripts(&self, variant: Variant) -> Vec<(&'static str, &'static str)>;

    /// Top-level manifest key holding the test configuration
    fn test_config_key(&self) -> &'static str {
        "jest"
    }

    /// Preset written into the test configuration
    fn test_preset(&self) -> &'static str;

    /// Directory under the template root holding the variant's template
    fn template_dir_name(&self, variant: Variant) -> &'static str;

    /// The ignore-file and its neutral template name
    fn ignore_file(&self) -> IgnoreFile {
        IgnoreFile {
            neutral: "gitignore",
            dotfile: ".gitignore",
        }
    }

    /// Generator-produced files that the template replaces
    fn superseded_files(&self) -> &'static [&'static str];

    /// Project-name placeholder resolved after generation, if any
    fn placeholder(&self) -> Option<Placeholder> {
        None
    }

    /// Generators to run for the selected invocation shape
    fn generator_strategy(&self, kind: GeneratorKind, options: &ScaffoldOptions)
        -> GeneratorStrategy;

    /// Name an existing README is moved to
    fn readme_backup_name(&self) -> &'static str {
        "README.old.md"
    }

    /// Default package-manager releases that corrupt installs
    fn broken_npm_release(&self) -> Option<BrokenRelease> {
        None
    }

    /// Commands listed in the success message
    fn instructions(&self, variant: Variant) -> Vec<Instruction>;
}

/// One command in the success message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Arguments after the package manager, e.g. `run ios`
    pub command: &'static str,
    pub description: &'static str,
}

impl Instruction {
    pub const fn new(command: &'static str, description: &'static str) -> Self {
        Self {
            command,
            description,
        }
    }
}
