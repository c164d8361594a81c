//! Subcommand handlers. Each one loads the widget, performs a single action
//! and prints the resulting event or state as JSON.

pub mod capture;
pub mod config;
pub mod focus;
pub mod mood;
pub mod peace;
pub mod task;
pub mod timer;
pub mod watch;

use std::io::{BufRead, Write};

use bravethem_core::model::now_ms;
use bravethem_core::{MemoryStore, SqliteStore, Store, Widget};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub type AppWidget = Widget<Box<dyn Store>>;

/// The on-disk store, or an in-memory one when the database can't be opened.
pub fn open_store() -> Box<dyn Store> {
    match SqliteStore::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "database unavailable, changes will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

/// Load the widget and finish any run whose deadline passed while nothing
/// was sampling, so every command sees the recorded session.
pub fn load_widget() -> AppWidget {
    let mut widget = Widget::load(open_store());
    if let Some(event) = widget.sample(now_ms()) {
        tracing::info!(?event, "caught up a run that finished unobserved");
    }
    widget
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print `label` to stderr and read one line from stdin. `None` on EOF.
pub fn prompt_line(label: &str) -> Result<Option<String>, std::io::Error> {
    eprint!("{label}");
    std::io::stderr().flush()?;
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
