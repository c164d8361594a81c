use bravethem_core::model::now_ms;

use super::{load_widget, print_json, prompt_line, CmdResult};

/// Quick capture. Without a title, one line is read from stdin.
pub fn run(title: Option<String>) -> CmdResult {
    let title = match title {
        Some(title) => title,
        None => prompt_line("Capture: ")?.unwrap_or_default(),
    };

    let mut widget = load_widget();
    match widget.capture_task(&title, now_ms()) {
        Some(event) => print_json(&event)?,
        None => eprintln!("nothing captured"),
    }
    Ok(())
}
