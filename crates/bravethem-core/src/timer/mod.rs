mod engine;
mod sampler;

pub use engine::{compute_remaining, TimerEngine, TimerSnapshot, TimerState, FOCUS_DURATION_SECS};
pub use sampler::{SampleTick, Sampler};
