//! Application-level orchestration utilities.
//!
//! This module owns sort run lifecycle control (start/pause/cancel) and post-run
//! processing such as exports. The TUI calls into this module to keep
//! responsibilities separated.

mod controller;
mod post_process;

pub(crate) use controller::{run_controller, UiCommand};
pub(crate) use post_process::process_run_completion;
