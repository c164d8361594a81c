//! # BraveThem Core Library
//!
//! Core logic for the BraveThem focus widget: one daily focus line, a short
//! task list, a wall-clock focus timer with a mood check-in on completion,
//! and a daily "peace score" derived from what was logged today.
//!
//! ## Architecture
//!
//! - **Storage**: a string key-value [`Store`] (SQLite or in-memory) holding
//!   five JSON values, plus TOML configuration
//! - **Repositories**: focus, tasks, sessions and moods, each writing through
//!   to the store on every change
//! - **Timer**: a wall-clock state machine that the caller samples; remaining
//!   time is always recomputed from the start timestamp
//! - **Driver**: the single mutator that owns the [`Widget`] and the periodic
//!   [`timer::Sampler`], dropping ticks from superseded runs
//! - **Offline shell**: network-first navigation and stale-while-revalidate
//!   asset caching
//!
//! ## Key Components
//!
//! - [`Widget`]: all application state wired to one store
//! - [`Driver`]: command and tick dispatch
//! - [`TimerEngine`]: timer state machine
//! - [`PeaceMeter`]: memoized peace score

pub mod driver;
pub mod error;
pub mod events;
pub mod model;
pub mod offline;
pub mod repo;
pub mod scoring;
pub mod storage;
pub mod timer;
pub mod widget;

pub use driver::{Command, Driver};
pub use error::{ConfigError, CoreError, ShellError, StoreError};
pub use events::Event;
pub use model::{Mood, Session, Task};
pub use offline::{OfflineShell, ShellRequest};
pub use repo::FocusChange;
pub use scoring::{PeaceMeter, PeaceScore, ScoreTargets};
pub use storage::{Config, MemoryStore, SqliteStore, StorageKey, Store};
pub use timer::{TimerEngine, TimerSnapshot, TimerState};
pub use widget::Widget;
