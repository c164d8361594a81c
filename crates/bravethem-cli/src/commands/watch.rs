//! Interactive loop.
//!
//! The sampler drives the countdown and stdin lines are user events:
//!
//! | Input       | Action        |
//! |-------------|---------------|
//! | `s`         | start         |
//! | `p`         | pause         |
//! | `r`         | reset         |
//! | `k <title>` | quick capture |
//! | `d <id>`    | toggle a task |
//! | `q`         | quit          |
//!
//! When a run completes the loop asks for a 1-5 mood, then a note. An empty
//! score line dismisses the prompt. Output is one JSON object per line.

use std::time::Duration;

use bravethem_core::model::now_ms;
use bravethem_core::{Command, Config, Driver, Event, Store};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::mood::parse_score;
use super::{load_widget, CmdResult};

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Command(Command),
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    match head {
        "s" => Input::Command(Command::Start),
        "p" => Input::Command(Command::Pause),
        "r" => Input::Command(Command::Reset),
        "q" => Input::Quit,
        "k" if !rest.is_empty() => Input::Command(Command::Capture(rest.to_string())),
        "d" if !rest.is_empty() => Input::Command(Command::Toggle(rest.to_string())),
        _ => Input::Unknown,
    }
}

/// Mood check-in opened by a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoodPrompt {
    Closed,
    Score,
    Note { score: u8 },
}

impl MoodPrompt {
    /// Advance the prompt with one input line. Returns the command to
    /// dispatch once the check-in is finished or dismissed.
    fn answer(self, line: &str) -> (MoodPrompt, Option<Command>) {
        let line = line.trim();
        match self {
            MoodPrompt::Closed => (self, None),
            MoodPrompt::Score if line.is_empty() => (MoodPrompt::Closed, Some(Command::DismissMood)),
            MoodPrompt::Score => match parse_score(line) {
                Ok(score) => (MoodPrompt::Note { score }, None),
                Err(e) => {
                    eprintln!("{e}");
                    (self, None)
                }
            },
            MoodPrompt::Note { score } => (
                MoodPrompt::Closed,
                Some(Command::SubmitMood {
                    score,
                    note: (!line.is_empty()).then(|| line.to_string()),
                }),
            ),
        }
    }

    fn show(self) {
        match self {
            MoodPrompt::Closed => {}
            MoodPrompt::Score => eprintln!("How do you feel? 1-5 (Enter to skip)"),
            MoodPrompt::Note { .. } => eprintln!("Note (Enter to submit)"),
        }
    }
}

fn emit<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

pub fn run() -> CmdResult {
    let config = Config::load_or_default();
    let interval = Duration::from_millis(config.timer.sample_interval_ms.max(10));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(watch(interval));
    // A pending stdin read would otherwise hold shutdown open.
    runtime.shutdown_background();
    result
}

async fn watch(interval: Duration) -> CmdResult {
    let (mut driver, mut ticks) = Driver::new(load_widget(), interval);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let now = now_ms();
    let mut last_remaining = driver.widget().timer().remaining_secs(now);
    emit(&driver.widget().snapshot(now))?;

    let mut prompt = if driver.widget().awaiting_mood() {
        MoodPrompt::Score
    } else {
        MoodPrompt::Closed
    };
    prompt.show();

    loop {
        tokio::select! {
            Some(tick) = ticks.recv() => {
                let now = now_ms();
                let event = driver.on_tick(tick, now);
                let remaining = driver.widget().timer().remaining_secs(now);
                if remaining != last_remaining {
                    last_remaining = remaining;
                    emit(&driver.widget().snapshot(now))?;
                }
                if let Some(event) = event {
                    emit(&event)?;
                    if matches!(event, Event::MoodRequested { .. }) {
                        prompt = MoodPrompt::Score;
                        prompt.show();
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let now = now_ms();
                let command = if prompt == MoodPrompt::Closed {
                    match parse_input(&line) {
                        Input::Command(command) => Some(command),
                        Input::Quit => break,
                        Input::Unknown => {
                            eprintln!("commands: s start, p pause, r reset, k <title>, d <id>, q quit");
                            None
                        }
                    }
                } else {
                    let (next, command) = prompt.answer(&line);
                    prompt = next;
                    prompt.show();
                    command
                };
                if let Some(command) = command {
                    dispatch(&mut driver, command, now)?;
                    last_remaining = driver.widget().timer().remaining_secs(now);
                }
            }
        }
    }
    Ok(())
}

fn dispatch<S: Store>(driver: &mut Driver<S>, command: Command, now: u64) -> CmdResult {
    match driver.dispatch(command, now) {
        Some(event) => emit(&event),
        None => emit(&driver.widget().snapshot(now)),
    }
}
