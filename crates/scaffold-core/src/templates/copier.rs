//! Template file copying

use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Copy every file under `template_dir` into `target_dir`
///
/// Files already present at the same relative path are overwritten. Returns
/// the copied paths relative to `target_dir`, in walk order.
pub async fn copy_template(template_dir: &Path, target_dir: &Path) -> Result<Vec<PathBuf>> {
    if !template_dir.is_dir() {
        return Err(ScaffoldError::TemplateMissing {
            path: template_dir.to_path_buf(),
        }
        .into());
    }

    // Ensure target directory exists
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut copied_files = Vec::new();

    for entry in WalkDir::new(template_dir).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to walk template {}", template_dir.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(template_dir)
            .with_context(|| format!("Unexpected template path: {}", entry.path().display()))?
            .to_path_buf();
        let target_path = target_dir.join(&relative);

        // Ensure parent directories exist
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::copy(entry.path(), &target_path)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        copied_files.push(relative);
    }

    Ok(copied_files)
}
