//! Application state: the repositories, the timer and the peace meter,
//! wired to one store.
//!
//! Every mutating operation writes through to the store before returning.
//! Invalid input and impossible timer transitions return `None` and leave
//! state untouched.

use crate::events::Event;
use crate::model::{Mood, Session, Task};
use crate::repo::{FocusChange, FocusRepo, MoodRepo, SessionRepo, TaskRepo};
use crate::scoring::{PeaceInputs, PeaceMeter, PeaceScore, ScoreTargets};
use crate::storage::{self, StorageKey, Store};
use crate::timer::{TimerEngine, TimerSnapshot, TimerState, FOCUS_DURATION_SECS};

pub struct Widget<S: Store> {
    store: S,
    focus: FocusRepo,
    tasks: TaskRepo,
    sessions: SessionRepo,
    moods: MoodRepo,
    timer: TimerEngine,
    meter: PeaceMeter,
}

impl<S: Store> Widget<S> {
    /// Rehydrate everything from `store` with the standard duration and
    /// score targets.
    pub fn load(store: S) -> Self {
        Self::load_with(store, FOCUS_DURATION_SECS, ScoreTargets::default())
    }

    pub fn load_with(store: S, duration_secs: u64, targets: ScoreTargets) -> Self {
        let snapshot = storage::load(&store, StorageKey::Timer, TimerSnapshot::default());
        let widget = Self {
            focus: FocusRepo::load(&store),
            tasks: TaskRepo::load(&store),
            sessions: SessionRepo::load(&store),
            moods: MoodRepo::load(&store),
            timer: TimerEngine::from_snapshot(snapshot, duration_secs),
            meter: PeaceMeter::new(targets),
            store,
        };
        tracing::debug!(
            tasks = widget.tasks.all().len(),
            sessions = widget.sessions.all().len(),
            moods = widget.moods.all().len(),
            timer = ?widget.timer.state(),
            "widget rehydrated"
        );
        widget
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.get()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.all()
    }

    pub fn visible_tasks(&self, limit: usize) -> Vec<&Task> {
        self.tasks.visible(limit)
    }

    pub fn sessions(&self) -> &[Session] {
        self.sessions.all()
    }

    pub fn moods(&self) -> &[Mood] {
        self.moods.all()
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    /// A completed run is waiting for its mood entry.
    pub fn awaiting_mood(&self) -> bool {
        self.timer.state() == TimerState::Completed
    }

    pub fn peace(&mut self, now: u64) -> PeaceScore {
        let inputs = PeaceInputs {
            sessions: self.sessions.all(),
            tasks: self.tasks.all(),
            moods: self.moods.all(),
        };
        let revisions = [
            self.sessions.revision(),
            self.tasks.revision(),
            self.moods.revision(),
        ];
        self.meter.score(&inputs, revisions, now)
    }

    pub fn snapshot(&self, now: u64) -> Event {
        Event::StateSnapshot {
            state: self.timer.state(),
            remaining_secs: self.timer.remaining_secs(now),
            duration_secs: self.timer.duration_secs(),
            last_start: self.timer.last_start(),
            progress_pct: self.timer.progress(now) * 100.0,
            awaiting_mood: self.awaiting_mood(),
            at: now,
        }
    }

    // ── Tasks & focus ────────────────────────────────────────────────

    pub fn capture_task(&mut self, title: &str, now: u64) -> Option<Event> {
        let task = self.tasks.add(&self.store, title, now)?.clone();
        Some(Event::TaskCaptured { task })
    }

    pub fn toggle_task(&mut self, id: &str, now: u64) -> Option<Event> {
        let task = self.tasks.toggle(&self.store, id, now)?.clone();
        Some(Event::TaskToggled { task })
    }

    pub fn remove_task(&mut self, id: &str) -> Option<Event> {
        let task = self.tasks.remove(&self.store, id)?;
        Some(Event::TaskRemoved { id: task.id })
    }

    pub fn set_focus(&mut self, text: &str, confirmed: bool) -> FocusChange {
        self.focus.set(&self.store, text, confirmed)
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn start_timer(&mut self, now: u64) -> Option<Event> {
        let event = self.timer.start(now)?;
        self.persist_timer();
        Some(event)
    }

    /// Pausing at or past the deadline completes the run, with the same
    /// outcome as [`Widget::sample`].
    pub fn pause_timer(&mut self, now: u64) -> Option<Event> {
        let event = self.timer.pause(now)?;
        self.persist_timer();
        Some(self.record_completion(event))
    }

    pub fn reset_timer(&mut self, now: u64) -> Option<Event> {
        let event = self.timer.reset(now)?;
        self.persist_timer();
        Some(event)
    }

    /// Publish a countdown sample. On completion the session is recorded
    /// and the mood step opens, signalled by `MoodRequested`.
    pub fn sample(&mut self, now: u64) -> Option<Event> {
        let before = self.timer.snapshot();
        let completed = self.timer.sample(now);
        if self.timer.snapshot() != before {
            self.persist_timer();
        }
        completed.map(|event| self.record_completion(event))
    }

    /// Turn `TimerCompleted` into a recorded session and `MoodRequested`.
    /// Other events pass through.
    fn record_completion(&mut self, event: Event) -> Event {
        match event {
            Event::TimerCompleted { start, end } => {
                let session_id = self.sessions.record(&self.store, start, end).id.clone();
                Event::MoodRequested {
                    session_id,
                    at: end,
                }
            }
            other => other,
        }
    }

    /// Record the mood for a completed run and close the cycle.
    pub fn submit_mood(&mut self, score: u8, note: Option<&str>, now: u64) -> Option<Event> {
        if !self.awaiting_mood() {
            return None;
        }
        let mood = self.moods.log(&self.store, score, note, now).clone();
        self.timer.reset(now);
        self.persist_timer();
        Some(Event::MoodLogged { mood })
    }

    /// Close the mood step without an entry. The timer stays completed.
    pub fn dismiss_mood(&mut self, now: u64) -> Option<Event> {
        self.awaiting_mood()
            .then_some(Event::MoodDismissed { at: now })
    }

    fn persist_timer(&self) {
        storage::save(&self.store, StorageKey::Timer, &self.timer.snapshot());
    }
}
