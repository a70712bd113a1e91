//! README preservation and the final instructions block

use crate::config::ScaffoldOptions;
use crate::product::{BrokenRelease, ProductConfig};
use crate::runtime::PackageManager;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;

pub const README: &str = "README.md";

/// Move an existing README aside so the template's copy doesn't clobber it
///
/// Returns whether a README was moved.
pub async fn backup_readme(target_dir: &Path, backup_name: &str) -> Result<bool> {
    let readme = target_dir.join(README);
    if !fs::try_exists(&readme).await.unwrap_or(false) {
        return Ok(false);
    }

    let backup = target_dir.join(backup_name);
    fs::rename(&readme, &backup)
        .await
        .with_context(|| format!("Failed to rename {} to {}", readme.display(), backup.display()))?;
    Ok(true)
}

/// Shortest way to reach the project: its bare name when it sits directly
/// under `cwd`, the full path otherwise
pub fn cd_path(cwd: &Path, target_dir: &Path, project_name: &str) -> String {
    if cwd.join(project_name) == target_dir {
        project_name.to_string()
    } else {
        target_dir.display().to_string()
    }
}

/// Render the success message
pub fn render_success<C: ProductConfig>(
    config: &C,
    options: &ScaffoldOptions,
    manager: &PackageManager,
    readme_backed_up: bool,
) -> String {
    let pm = manager.display_command();
    let instructions = config.instructions(options.variant);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Success! Created {} at {}",
        options.project_name,
        options.target_dir.display()
    );
    let _ = writeln!(out, "Inside that directory, you can run several commands:");

    for instruction in &instructions {
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", format!("{} {}", pm, instruction.command).cyan());
        for line in instruction.description.lines() {
            let _ = writeln!(out, "    {}", line);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "We suggest that you begin by typing:");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {}",
        format!(
            "cd {}",
            cd_path(&options.cwd, &options.target_dir, &options.project_name)
        )
        .cyan()
    );
    if let Some(first) = instructions.first() {
        let _ = writeln!(out, "  {}", format!("{} {}", pm, first.command).cyan());
    }

    if readme_backed_up {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            format!(
                "You had a `{}` file, we renamed it to `{}`",
                README,
                config.readme_backup_name()
            )
            .yellow()
        );
    }

    out
}

/// Banner printed before exiting on a broken package-manager release
pub fn render_unsupported_package_manager(release: BrokenRelease) -> String {
    let rule = "*".repeat(79);
    format!(
        "\n{rule}\n\
         ERROR: npm >= {major}.0.0 and < {major}.{minor}.0 are not supported\n\
         {rule}\n\n\
         It looks like you're using a version of npm that is buggy with this tool.\n\n\
         We recommend using npm >= {major}.{minor}.0 or yarn.\n\n\
         {rule}\n",
        rule = rule,
        major = release.major,
        minor = release.fixed_minor,
    )
    .yellow()
    .to_string()
}
