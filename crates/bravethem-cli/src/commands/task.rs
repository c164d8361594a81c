//! Task management commands for CLI.

use clap::Subcommand;
use bravethem_core::model::now_ms;
use bravethem_core::{Config, Task};

use super::{load_widget, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task title
        title: String,
    },
    /// Toggle a task's done flag
    Done {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Remove {
        /// Task ID
        id: String,
    },
    /// List open tasks (oldest first)
    List {
        /// Include done tasks and ignore the display limit
        #[arg(long)]
        all: bool,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

fn not_found(id: &str) -> Box<dyn std::error::Error> {
    format!("task not found: {id}").into()
}

fn print_plain(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("no tasks");
        return;
    }
    for task in tasks {
        let mark = if task.done { "x" } else { " " };
        println!("[{mark}] {}  ({})", task.title, task.id);
    }
}

pub fn run(action: TaskAction) -> CmdResult {
    let mut widget = load_widget();
    let now = now_ms();

    match action {
        TaskAction::Add { title } => match widget.capture_task(&title, now) {
            Some(event) => print_json(&event)?,
            None => eprintln!("title is empty, nothing added"),
        },
        TaskAction::Done { id } => {
            let event = widget.toggle_task(&id, now).ok_or_else(|| not_found(&id))?;
            print_json(&event)?;
        }
        TaskAction::Remove { id } => {
            let event = widget.remove_task(&id).ok_or_else(|| not_found(&id))?;
            print_json(&event)?;
        }
        TaskAction::List { all, json } => {
            let tasks: Vec<&Task> = if all {
                widget.tasks().iter().collect()
            } else {
                widget.visible_tasks(Config::load_or_default().display.visible_tasks)
            };
            if json {
                print_json(&tasks)?;
            } else {
                print_plain(&tasks);
            }
        }
    }
    Ok(())
}
