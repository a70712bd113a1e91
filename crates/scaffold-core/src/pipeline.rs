//! The scaffold pipeline
//!
//! Probe → manifest → template → install → generators → reconcile → report.
//! Every stage finishes all of its I/O before the next one starts. Nothing is
//! rolled back on failure: whatever earlier stages wrote stays on disk.

use crate::config::ScaffoldOptions;
use crate::error::ScaffoldError;
use crate::manifest::{self, ProjectManifest};
use crate::product::ProductConfig;
use crate::reconcile::{self, Reconciled};
use crate::report;
use crate::runtime::{self, InstallResult, PackageManager};
use crate::templates::{self, Materialized};
use anyhow::Result;
use std::fmt;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Probe,
    Manifest,
    Template,
    Install,
    Generate,
    Reconcile,
    Report,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Probe => "Checking package manager",
            Stage::Manifest => "Updating package.json",
            Stage::Template => "Copying template",
            Stage::Install => "Installing dependencies",
            Stage::Generate => "Running project generators",
            Stage::Reconcile => "Reconciling generated files",
            Stage::Report => "Preparing instructions",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Observer for pipeline progress
pub trait Progress {
    fn start(&self, stage: Stage);
    fn finish(&self, stage: Stage, detail: &str);
    fn fail(&self, stage: Stage, error: &anyhow::Error);
}

/// Progress observer that reports nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Progress for Silent {
    fn start(&self, _stage: Stage) {}
    fn finish(&self, _stage: Stage, _detail: &str) {}
    fn fail(&self, _stage: Stage, _error: &anyhow::Error) {}
}

/// Everything a completed run produced
#[derive(Debug, Clone)]
pub struct Outcome {
    pub manager: PackageManager,
    pub readme_backed_up: bool,
    pub manifest: ProjectManifest,
    pub materialized: Materialized,
    pub install: InstallResult,
    /// Generators that ran, in order
    pub generators: Vec<String>,
    /// `None` when no generators ran
    pub reconciled: Option<Reconciled>,
    /// Rendered success message
    pub message: String,
}

/// Drives one scaffold run for a product
pub struct Scaffolder<C: ProductConfig> {
    config: C,
}

impl<C: ProductConfig> Scaffolder<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Run every stage against `options.target_dir`
    pub async fn run(&self, options: &ScaffoldOptions, progress: &dyn Progress) -> Result<Outcome> {
        let config = &self.config;

        progress.start(Stage::Probe);
        let manager = stage(
            progress,
            Stage::Probe,
            runtime::probe(
                &options.target_dir,
                options.package_manager.as_deref(),
                config.broken_npm_release(),
            )
            .map_err(anyhow::Error::from),
        )?;
        progress.finish(Stage::Probe, &format!("Using {}", manager));

        // README moves aside before anything is written
        let readme_backed_up = stage(
            progress,
            Stage::Probe,
            report::backup_readme(&options.target_dir, config.readme_backup_name()).await,
        )?;

        progress.start(Stage::Manifest);
        let manifest = stage(
            progress,
            Stage::Manifest,
            manifest::transform_manifest(config, &options.manifest_path(), options.variant).await,
        )?;
        progress.finish(Stage::Manifest, "Updated package.json");

        progress.start(Stage::Template);
        let template_dir = options.template_dir(config);
        let materialized = stage(
            progress,
            Stage::Template,
            templates::materialize(config, &template_dir, &options.target_dir).await,
        )?;
        progress.finish(
            Stage::Template,
            &format!("Copied {} template files", materialized.files.len()),
        );

        progress.start(Stage::Install);
        let install = stage(
            progress,
            Stage::Install,
            runtime::run_install(&manager, &options.target_dir, options.verbose).await,
        )?;
        if !install.success() {
            let err = anyhow::Error::from(ScaffoldError::InstallFailed {
                command: install.command.clone(),
                args: install.args.clone(),
                code: install.exit_code,
            });
            progress.fail(Stage::Install, &err);
            return Err(err);
        }
        progress.finish(Stage::Install, "Installed dependencies");

        progress.start(Stage::Generate);
        let strategy = config.generator_strategy(options.generator, options);
        let generators = stage(progress, Stage::Generate, strategy.run(options).await)?;
        progress.finish(
            Stage::Generate,
            &if generators.is_empty() {
                "No generators configured".to_string()
            } else {
                format!("Ran {}", generators.join(", "))
            },
        );

        // Only generator output needs reconciling
        let reconciled = if generators.is_empty() {
            None
        } else {
            progress.start(Stage::Reconcile);
            let reconciled = stage(
                progress,
                Stage::Reconcile,
                reconcile::reconcile(config, options).await,
            )?;
            progress.finish(
                Stage::Reconcile,
                &format!("Replaced {} generated files", reconciled.removed.len()),
            );
            Some(reconciled)
        };

        progress.start(Stage::Report);
        let message = report::render_success(config, options, &manager, readme_backed_up);
        progress.finish(Stage::Report, "Done");

        Ok(Outcome {
            manager,
            readme_backed_up,
            manifest,
            materialized,
            install,
            generators,
            reconciled,
            message,
        })
    }
}

/// Report a stage failure before handing the error back
fn stage<T>(progress: &dyn Progress, stage: Stage, result: Result<T>) -> Result<T> {
    result.map_err(|err| {
        progress.fail(stage, &err);
        err
    })
}
