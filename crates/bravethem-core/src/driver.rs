//! Event-loop glue between user commands, sampler ticks and the widget.
//!
//! The driver is the single mutator. After every command or tick it
//! reconciles the sampler with the timer: armed exactly while the timer
//! runs, disarmed the moment it stops. Ticks from a superseded arming are
//! dropped before they can touch state.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::events::Event;
use crate::storage::Store;
use crate::timer::{SampleTick, Sampler};
use crate::widget::Widget;

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Reset,
    Capture(String),
    Toggle(String),
    Remove(String),
    SubmitMood { score: u8, note: Option<String> },
    DismissMood,
}

pub struct Driver<S: Store> {
    widget: Widget<S>,
    sampler: Sampler,
}

impl<S: Store> Driver<S> {
    /// Must be called from within a tokio runtime.
    pub fn new(widget: Widget<S>, interval: Duration) -> (Self, mpsc::UnboundedReceiver<SampleTick>) {
        let (sampler, rx) = Sampler::new(interval);
        let mut driver = Self { widget, sampler };
        driver.sync_sampler();
        (driver, rx)
    }

    pub fn widget(&self) -> &Widget<S> {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut Widget<S> {
        &mut self.widget
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    pub fn into_widget(self) -> Widget<S> {
        self.widget
    }

    pub fn dispatch(&mut self, command: Command, now: u64) -> Option<Event> {
        let event = match command {
            Command::Start => self.widget.start_timer(now),
            Command::Pause => self.widget.pause_timer(now),
            Command::Reset => self.widget.reset_timer(now),
            Command::Capture(title) => self.widget.capture_task(&title, now),
            Command::Toggle(id) => self.widget.toggle_task(&id, now),
            Command::Remove(id) => self.widget.remove_task(&id),
            Command::SubmitMood { score, note } => {
                self.widget.submit_mood(score, note.as_deref(), now)
            }
            Command::DismissMood => self.widget.dismiss_mood(now),
        };
        self.sync_sampler();
        event
    }

    /// Handle one sampler tick. Stale ticks are ignored.
    pub fn on_tick(&mut self, tick: SampleTick, now: u64) -> Option<Event> {
        if !self.sampler.is_current(&tick) {
            tracing::trace!(generation = tick.generation, "stale tick dropped");
            return None;
        }
        let event = self.widget.sample(now);
        self.sync_sampler();
        event
    }

    fn sync_sampler(&mut self) {
        match (self.widget.timer().is_running(), self.sampler.is_armed()) {
            (true, false) => self.sampler.arm(),
            (false, true) => {
                self.sampler.disarm();
            }
            _ => {}
        }
    }
}
