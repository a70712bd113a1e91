//! Generator host for namespaced sub-generators
//!
//! Sub-generators report completion through a [`Completion`] handle instead of
//! returning. The host turns that handle into a future, so the caller awaits a
//! single task rather than nesting callbacks.

use crate::error::ScaffoldError;
use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Options passed alongside the positional arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub namespace: String,
    pub verbose: bool,
}

/// A single sub-generator run
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Positional arguments; the first is the namespace
    pub args: Vec<String>,
    pub options: RunOptions,
    /// Directory the generator writes into
    pub cwd: PathBuf,
}

/// Signals that a sub-generator has finished
pub struct Completion {
    tx: oneshot::Sender<Result<()>>,
}

impl Completion {
    pub fn complete(self, result: Result<()>) {
        // A dropped receiver means the host stopped waiting; nothing to report to
        let _ = self.tx.send(result);
    }
}

/// Sub-generator that completes via callback
///
/// `run` may return before the work is done; the run is over once `done` has
/// been completed. Dropping `done` without completing counts as a failure.
pub trait SubGenerator: Send + Sync {
    fn run(&self, invocation: Invocation, done: Completion);
}

/// Registry of sub-generators keyed by namespace
pub struct GeneratorHost {
    cwd: PathBuf,
    generators: HashMap<String, Arc<dyn SubGenerator>>,
}

impl GeneratorHost {
    pub fn new(cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            generators: HashMap::new(),
        }
    }

    pub fn register(&mut self, namespace: &str, generator: Arc<dyn SubGenerator>) {
        self.generators.insert(namespace.to_string(), generator);
    }

    pub fn is_registered(&self, namespace: &str) -> bool {
        self.generators.contains_key(namespace)
    }

    /// Run the generator named by `args[0]` and wait for its completion
    pub async fn run(&self, args: Vec<String>, options: RunOptions) -> Result<(), ScaffoldError> {
        let namespace = args
            .first()
            .cloned()
            .ok_or_else(|| ScaffoldError::generator("<none>", "no namespace given"))?;
        let generator = self.generators.get(&namespace).ok_or_else(|| {
            ScaffoldError::generator(&namespace, "no generator registered under this namespace")
        })?;

        let (tx, rx) = oneshot::channel();
        let invocation = Invocation {
            args,
            options,
            cwd: self.cwd.clone(),
        };
        generator.run(invocation, Completion { tx });

        match rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ScaffoldError::generator(&namespace, format!("{:#}", e))),
            Err(_) => Err(ScaffoldError::generator(
                &namespace,
                "finished without signalling completion",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Immediate(Option<&'static str>);

    impl SubGenerator for Immediate {
        fn run(&self, _invocation: Invocation, done: Completion) {
            match self.0 {
                None => done.complete(Ok(())),
                Some(msg) => done.complete(Err(anyhow::anyhow!(msg))),
            }
        }
    }

    struct Forgetful;

    impl SubGenerator for Forgetful {
        fn run(&self, _invocation: Invocation, _done: Completion) {}
    }

    fn options() -> RunOptions {
        RunOptions {
            namespace: "MyApp".to_string(),
            verbose: false,
        }
    }

    fn args(ns: &str) -> Vec<String> {
        vec![ns.to_string(), "MyApp".to_string(), "MyApp".to_string()]
    }

    #[tokio::test]
    async fn test_completion_resolves_run() {
        let mut host = GeneratorHost::new(Path::new("."));
        host.register("windows", Arc::new(Immediate(None)));
        assert!(host.is_registered("windows"));

        host.run(args("windows"), options()).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_completion_is_generator_error() {
        let mut host = GeneratorHost::new(Path::new("."));
        host.register("windows", Arc::new(Immediate(Some("template missing"))));

        let err = host.run(args("windows"), options()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "generator `windows` failed: template missing"
        );
    }

    #[tokio::test]
    async fn test_dropped_completion_is_failure() {
        let mut host = GeneratorHost::new(Path::new("."));
        host.register("windows", Arc::new(Forgetful));

        let err = host.run(args("windows"), options()).await.unwrap_err();
        assert!(err.to_string().contains("without signalling completion"));
    }

    #[tokio::test]
    async fn test_unknown_namespace() {
        let host = GeneratorHost::new(Path::new("."));
        let err = host.run(args("macos"), options()).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::GeneratorFailed { .. }));
    }
}
