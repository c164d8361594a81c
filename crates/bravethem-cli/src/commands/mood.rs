use clap::Subcommand;
use bravethem_core::model::{now_ms, MOOD_MAX, MOOD_MIN};

use super::{load_widget, print_json, CmdResult};

#[derive(Subcommand)]
pub enum MoodAction {
    /// Log the mood for the completed run
    Log {
        /// Score from 1 (low) to 5 (great)
        score: String,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },
    /// Skip the mood check-in for now
    Dismiss,
}

pub(crate) fn parse_score(raw: &str) -> Result<u8, String> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|s| (MOOD_MIN..=MOOD_MAX).contains(s))
        .ok_or_else(|| format!("invalid mood score: {raw} (expected {MOOD_MIN}-{MOOD_MAX})"))
}

pub fn run(action: MoodAction) -> CmdResult {
    let mut widget = load_widget();
    let now = now_ms();

    let event = match action {
        MoodAction::Log { score, note } => {
            let score = parse_score(&score)?;
            widget.submit_mood(score, note.as_deref(), now)
        }
        MoodAction::Dismiss => widget.dismiss_mood(now),
    };
    let event = event.ok_or("no completed focus run is waiting for a mood")?;
    print_json(&event)
}
