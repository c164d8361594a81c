use bravethem_core::model::now_ms;

use super::{load_widget, print_json, CmdResult};

pub fn run(json: bool) -> CmdResult {
    let mut widget = load_widget();
    let score = widget.peace(now_ms());

    if json {
        return print_json(&score);
    }
    println!("Peace {}/100", score.total);
    println!(
        "  focus  {:>5.1} min  ({:.0}%)",
        score.focus_minutes, score.focus_pct
    );
    println!(
        "  tasks  {:>5}      ({:.0}%)",
        score.tasks_completed, score.task_pct
    );
    println!("  mood   {:>5}      ({:.0}%)", score.mood, score.mood_pct);
    Ok(())
}
