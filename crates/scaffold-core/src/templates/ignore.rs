//! Ignore-file resolution
//!
//! Templates ship the ignore-file under a neutral name so packaging steps
//! leave it alone. After a copy, exactly one dotfile must remain.

use crate::product::IgnoreFile;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// How the ignore-file was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreResolution {
    /// The template carried no ignore-file
    Absent,
    /// Neutral file renamed to the dotfile
    Renamed,
    /// Neutral content appended to an existing dotfile
    Appended,
    /// Existing dotfile already ends with the neutral content
    AlreadyMerged,
}

/// Rename or merge the neutral-named ignore-file in `target_dir`
pub async fn resolve_ignore_file(target_dir: &Path, ignore: IgnoreFile) -> Result<IgnoreResolution> {
    let neutral = target_dir.join(ignore.neutral);
    let dotfile = target_dir.join(ignore.dotfile);

    if !fs::try_exists(&neutral).await.unwrap_or(false) {
        return Ok(IgnoreResolution::Absent);
    }

    if !fs::try_exists(&dotfile).await.unwrap_or(false) {
        fs::rename(&neutral, &dotfile).await.with_context(|| {
            format!("Failed to rename {} to {}", neutral.display(), dotfile.display())
        })?;
        return Ok(IgnoreResolution::Renamed);
    }

    let appended = fs::read(&neutral)
        .await
        .with_context(|| format!("Failed to read {}", neutral.display()))?;
    let mut existing = fs::read(&dotfile)
        .await
        .with_context(|| format!("Failed to read {}", dotfile.display()))?;

    let resolution = if existing.ends_with(&appended) {
        IgnoreResolution::AlreadyMerged
    } else {
        existing.extend_from_slice(&appended);
        fs::write(&dotfile, &existing)
            .await
            .with_context(|| format!("Failed to write {}", dotfile.display()))?;
        IgnoreResolution::Appended
    };

    fs::remove_file(&neutral)
        .await
        .with_context(|| format!("Failed to remove {}", neutral.display()))?;

    Ok(resolution)
}
