//! Project generator strategies
//!
//! Two invocation shapes are supported:
//! - **Subprocess**: each generator is an external CLI spawned in the project
//!   directory, one after another
//! - **In-process**: a baseline initializer is called directly, then a
//!   platform sub-generator is registered in a [`GeneratorHost`] under a
//!   namespace and run until it signals completion
//!
//! In both shapes the platform generator runs strictly after the baseline.

pub mod host;
pub mod local_cli;
pub mod subprocess;

use crate::config::ScaffoldOptions;
use crate::error::ScaffoldError;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub use host::{Completion, GeneratorHost, Invocation, RunOptions, SubGenerator};
pub use local_cli::{CommandSubGenerator, LocalCliInit};
pub use subprocess::SubprocessGenerator;

/// Baseline generator called directly with the project directory and name
pub trait ProjectInitializer: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Runs on the blocking thread pool and may block freely
    fn init(&self, target_dir: &Path, project_name: &str) -> Result<()>;
}

/// Sub-generator registered under a namespace in the generator host
#[derive(Clone)]
pub struct PlatformGenerator {
    pub namespace: String,
    pub generator: Arc<dyn SubGenerator>,
}

impl PlatformGenerator {
    pub fn new(namespace: impl Into<String>, generator: Arc<dyn SubGenerator>) -> Self {
        Self {
            namespace: namespace.into(),
            generator,
        }
    }
}

/// The generators a run invokes, and how
pub enum GeneratorStrategy {
    /// No generation; the reconciler has nothing to do
    None,
    /// External tools, spawned in order
    Subprocess(Vec<SubprocessGenerator>),
    InProcess {
        baseline: Arc<dyn ProjectInitializer>,
        platform: Option<PlatformGenerator>,
    },
}

impl GeneratorStrategy {
    pub fn is_none(&self) -> bool {
        matches!(self, GeneratorStrategy::None)
    }

    /// Run every generator in order; the first failure stops the stage
    ///
    /// Returns the names of the generators that ran.
    pub async fn run(&self, options: &ScaffoldOptions) -> Result<Vec<String>> {
        let mut ran = Vec::new();

        match self {
            GeneratorStrategy::None => {}
            GeneratorStrategy::Subprocess(generators) => {
                for generator in generators {
                    generator.run(&options.target_dir, options.verbose).await?;
                    ran.push(generator.name.clone());
                }
            }
            GeneratorStrategy::InProcess { baseline, platform } => {
                run_baseline(baseline.clone(), options).await?;
                ran.push(baseline.name().to_string());

                if let Some(platform) = platform {
                    run_platform(platform, options).await?;
                    ran.push(platform.namespace.clone());
                }
            }
        }

        Ok(ran)
    }
}

/// Call the baseline initializer off the async worker threads
async fn run_baseline(baseline: Arc<dyn ProjectInitializer>, options: &ScaffoldOptions) -> Result<()> {
    let name = baseline.name().to_string();
    let target_dir = options.target_dir.clone();
    let project_name = options.project_name.clone();

    tokio::task::spawn_blocking(move || baseline.init(&target_dir, &project_name))
        .await
        .map_err(|e| ScaffoldError::generator(&name, e.to_string()))?
        .map_err(|e| ScaffoldError::generator(&name, format!("{:#}", e)))?;
    Ok(())
}

/// Register the platform generator in a fresh host and await its completion
async fn run_platform(platform: &PlatformGenerator, options: &ScaffoldOptions) -> Result<()> {
    let mut host = GeneratorHost::new(&options.target_dir);
    host.register(&platform.namespace, platform.generator.clone());

    let name = options.project_name.clone();
    let args = vec![platform.namespace.clone(), name.clone(), name.clone()];
    let run_options = RunOptions {
        namespace: name,
        verbose: false,
    };

    host.run(args, run_options).await?;
    Ok(())
}
