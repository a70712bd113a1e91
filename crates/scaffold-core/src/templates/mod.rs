//! Template materialization
//!
//! This module provides:
//! - Recursive copying of a template tree into the project directory
//! - Ignore-file renaming and merge-on-conflict

pub mod copier;
pub mod ignore;

use crate::product::ProductConfig;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub use copier::copy_template;
pub use ignore::{resolve_ignore_file, IgnoreResolution};

/// What a materialization wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    /// Paths relative to the target directory
    pub files: Vec<PathBuf>,
    pub ignore: IgnoreResolution,
}

/// Copy the template into `target_dir`, then settle the ignore-file
pub async fn materialize<C: ProductConfig>(
    config: &C,
    template_dir: &Path,
    target_dir: &Path,
) -> Result<Materialized> {
    let files = copy_template(template_dir, target_dir).await?;
    let ignore = resolve_ignore_file(target_dir, config.ignore_file()).await?;
    Ok(Materialized { files, ignore })
}
