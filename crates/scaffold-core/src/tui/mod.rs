//! CLI prompts and progress using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

mod progress;
mod prompts;

pub use progress::ClackProgress;
pub use prompts::{run, InitArgs};
