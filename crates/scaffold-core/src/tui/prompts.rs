//! Charm-style CLI flow using cliclack

use super::progress::ClackProgress;
use crate::config::{GeneratorKind, ScaffoldOptions, Variant};
use crate::error::ScaffoldError;
use crate::pipeline::{Outcome, Scaffolder};
use crate::product::ProductConfig;
use crate::report;
use crate::runtime::pm::ALTERNATE_LOCK_FILE;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Entries a freshly created project is expected to contain
const EXPECTED_ENTRIES: &[&str] = &[
    "package.json",
    "package-lock.json",
    ALTERNATE_LOCK_FILE,
    "node_modules",
];

/// CLI arguments for the init command
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Project directory; must already contain package.json
    pub directory: Option<PathBuf>,

    /// Project name (defaults to the directory name)
    pub name: Option<String>,

    /// Select the extended-support template and manifest variant
    pub with_extended_support: bool,

    /// Local directory holding the template directories
    pub template_dir: Option<PathBuf>,

    /// How project generators are invoked
    pub generator: GeneratorKind,

    /// Package manager executable override
    pub package_manager: Option<String>,

    /// Echo spawned commands
    pub verbose: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the scaffold with inline prompts and progress
pub async fn run<C: ProductConfig>(config: &C, args: InitArgs) -> Result<Outcome> {
    cliclack::intro(config.display_name())?;

    let target_dir = match select_directory(&args) {
        Ok(dir) => dir,
        Err(err) => {
            cliclack::outro_cancel(format!("{:#}", err))?;
            return Err(err);
        }
    };

    let variant = Variant::from_flag(args.with_extended_support);
    if variant.is_extended() {
        cliclack::log::info("Including extended platform support")?;
    }

    let options = ScaffoldOptions::new(
        config,
        target_dir,
        args.name.clone(),
        args.template_dir.clone(),
    )
    .with_variant(variant)
    .with_generator(args.generator)
    .with_package_manager(args.package_manager.clone())
    .with_verbose(args.verbose);

    let scaffolder = Scaffolder::new(config.clone());
    let progress = ClackProgress::new();

    match scaffolder.run(&options, &progress).await {
        Ok(outcome) => {
            println!();
            print!("{}", outcome.message);
            println!();
            cliclack::outro("Happy hacking!")?;
            Ok(outcome)
        }
        Err(err) => {
            if let Some(ScaffoldError::UnsupportedPackageManager { .. }) =
                err.downcast_ref::<ScaffoldError>()
            {
                if let Some(release) = config.broken_npm_release() {
                    eprintln!("{}", report::render_unsupported_package_manager(release));
                }
            }
            cliclack::outro_cancel(format!("Could not create {}", options.project_name))?;
            Err(err)
        }
    }
}

fn select_directory(args: &InitArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use the directory argument if provided
    let path = if let Some(dir) = &args.directory {
        let p = absolutize(&current_dir, dir);
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir
        } else {
            absolutize(&current_dir, Path::new(&input))
        }
    };

    if !path.is_dir() {
        anyhow::bail!("Project directory does not exist: {}", path.display());
    }
    if !path.join("package.json").is_file() {
        anyhow::bail!(
            "No package.json in {}; create the project before running init",
            path.display()
        );
    }

    // Warn if directory has files the template may overwrite
    let unexpected = unexpected_entries(&path);
    if unexpected > 0 {
        cliclack::log::warning(format!(
            "Directory has {} existing items; template files will overwrite matching names",
            unexpected
        ))?;

        // Auto-confirm with --yes flag
        let confirm = if args.yes {
            true
        } else {
            cliclack::confirm("Continue anyway?")
                .initial_value(true)
                .interact()?
        };

        if !confirm {
            anyhow::bail!("Setup cancelled.");
        }
    }

    Ok(path)
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Count directory entries beyond what a fresh project contains
fn unexpected_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| {
                    let name = e.file_name();
                    !EXPECTED_ENTRIES.iter().any(|expected| name.to_string_lossy() == *expected)
                })
                .count()
        })
        .unwrap_or(0)
}
