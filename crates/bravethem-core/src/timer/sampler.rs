//! Cancelable countdown sampler.
//!
//! A tokio interval task that posts [`SampleTick`]s into the event loop
//! owning the widget. Each arming gets a new generation; ticks from an
//! older generation are stale and must be dropped by the receiver.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleTick {
    pub generation: u64,
}

/// Counts sampler tasks whose futures are still alive.
struct LiveGuard(Arc<AtomicUsize>);

impl LiveGuard {
    fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct Sampler {
    interval: Duration,
    tx: mpsc::UnboundedSender<SampleTick>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
    live: Arc<AtomicUsize>,
}

impl Sampler {
    /// Create a disarmed sampler and the receiving end of its ticks.
    pub fn new(interval: Duration) -> (Self, mpsc::UnboundedReceiver<SampleTick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sampler = Self {
            interval: interval.max(Duration::from_millis(1)),
            tx,
            handle: None,
            generation: 0,
            live: Arc::new(AtomicUsize::new(0)),
        };
        (sampler, rx)
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of sampler tasks not yet torn down by the runtime.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Whether `tick` came from the currently armed task.
    pub fn is_current(&self, tick: &SampleTick) -> bool {
        self.is_armed() && tick.generation == self.generation
    }

    /// Start sampling. Any outstanding task is cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self) {
        self.disarm();
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        let period = self.interval;
        let guard = LiveGuard::new(&self.live);

        self.handle = Some(tokio::spawn(async move {
            let _guard = guard;
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tx.send(SampleTick { generation }).is_err() {
                    break;
                }
            }
        }));
        tracing::trace!(generation, "sampler armed");
    }

    /// Stop sampling. Returns false if nothing was armed.
    pub fn disarm(&mut self) -> bool {
        let Some(handle) = self.handle.take() else {
            return false;
        };
        handle.abort();
        self.generation += 1;
        tracing::trace!(generation = self.generation, "sampler disarmed");
        true
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
