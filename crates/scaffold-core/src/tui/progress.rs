//! Pipeline progress rendered with cliclack

use crate::pipeline::{Progress, Stage};
use std::cell::RefCell;

/// Spinner for quiet stages, log lines for stages whose child processes
/// write to the terminal
#[derive(Default)]
pub struct ClackProgress {
    spinner: RefCell<Option<cliclack::ProgressBar>>,
}

impl ClackProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Stages that hand the terminal to a child process
fn spawns_processes(stage: Stage) -> bool {
    matches!(stage, Stage::Install | Stage::Generate)
}

impl Progress for ClackProgress {
    fn start(&self, stage: Stage) {
        if spawns_processes(stage) {
            let _ = cliclack::log::step(stage.label());
        } else {
            let spinner = cliclack::spinner();
            spinner.start(format!("{}...", stage.label()));
            *self.spinner.borrow_mut() = Some(spinner);
        }
    }

    fn finish(&self, _stage: Stage, detail: &str) {
        match self.spinner.borrow_mut().take() {
            Some(spinner) => spinner.stop(detail),
            None => {
                let _ = cliclack::log::success(detail);
            }
        }
    }

    fn fail(&self, stage: Stage, error: &anyhow::Error) {
        let message = match stage {
            Stage::Install => "Failed to install".to_string(),
            _ => format!("{} failed", stage.label()),
        };
        match self.spinner.borrow_mut().take() {
            Some(spinner) => spinner.error(&message),
            None => {
                let _ = cliclack::log::error(&message);
            }
        }
        let _ = cliclack::log::error(format!("{:#}", error));
    }
}
