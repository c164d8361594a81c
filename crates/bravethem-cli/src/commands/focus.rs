use clap::Subcommand;
use bravethem_core::{Event, FocusChange};

use super::{load_widget, print_json, prompt_line, CmdResult};

#[derive(Subcommand)]
pub enum FocusAction {
    /// Set today's focus
    Set {
        /// Focus statement
        text: String,
        /// Replace an existing focus without asking
        #[arg(long)]
        yes: bool,
    },
    /// Print the current focus
    Show,
}

pub fn run(action: FocusAction) -> CmdResult {
    let mut widget = load_widget();

    match action {
        FocusAction::Set { text, yes } => {
            let mut change = widget.set_focus(&text, yes);
            if let FocusChange::NeedsConfirmation { current } = &change {
                let answer = prompt_line(&format!("Replace \"{current}\"? [y/N] "))?;
                let confirmed = answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y"));
                if confirmed {
                    change = widget.set_focus(&text, true);
                }
            }
            match change {
                FocusChange::Set | FocusChange::Unchanged => print_json(&Event::FocusSet {
                    focus: widget.focus().unwrap_or_default().to_string(),
                })?,
                FocusChange::NeedsConfirmation { current } => {
                    eprintln!("kept current focus: {current}");
                }
                FocusChange::Rejected => eprintln!("focus is empty, nothing set"),
            }
        }
        FocusAction::Show => {
            print_json(&serde_json::json!({ "focus": widget.focus() }))?;
        }
    }
    Ok(())
}
