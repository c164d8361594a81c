use clap::Subcommand;
use bravethem_core::model::now_ms;

use super::{load_widget, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a focus run
    Start,
    /// Pause the running timer
    Pause,
    /// Reset to idle with a full duration
    Reset,
    /// Print current timer state as JSON
    Status,
}

pub fn run(action: TimerAction) -> CmdResult {
    let mut widget = load_widget();
    let now = now_ms();

    let event = match action {
        TimerAction::Start => widget.start_timer(now),
        TimerAction::Pause => widget.pause_timer(now),
        TimerAction::Reset => widget.reset_timer(now),
        TimerAction::Status => None,
    };

    match event {
        Some(event) => print_json(&event)?,
        None => print_json(&widget.snapshot(now))?,
    }
    Ok(())
}
