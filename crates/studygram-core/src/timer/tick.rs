//! Tick delivery for the timer controller.
//!
//! A [`TickSource`] hands out a [`TickSubscription`] when a sprint starts.
//! Dropping the subscription revokes it: queued ticks are discarded and
//! any background interval task is aborted.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::error::{CoreError, Result};

/// Live stream of one-second ticks.
#[derive(Debug)]
pub struct TickSubscription {
    rx: UnboundedReceiver<()>,
    task: Option<JoinHandle<()>>,
}

impl TickSubscription {
    /// `task`, if given, is aborted when the subscription is dropped.
    pub fn new(rx: UnboundedReceiver<()>, task: Option<JoinHandle<()>>) -> Self {
        Self { rx, task }
    }

    /// Take one already-delivered tick without waiting.
    pub fn try_recv(&mut self) -> bool {
        self.rx.try_recv().is_ok()
    }

    /// Wait for the next tick. Returns `false` once the source has gone away.
    pub async fn recv(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }
}

impl Drop for TickSubscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.rx.close();
    }
}

/// Anything that can deliver periodic ticks to the controller.
pub trait TickSource {
    fn subscribe(&mut self) -> TickSubscription;
}

/// Real-time ticks from a tokio interval, one task per subscription.
#[derive(Debug, Clone)]
pub struct IntervalTickSource {
    period: Duration,
    runtime: Handle,
}

impl IntervalTickSource {
    /// # Errors
    ///
    /// Returns an error when called outside a tokio runtime.
    pub fn new(period: Duration) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| CoreError::Runtime(e.to_string()))?;
        Ok(Self {
            period: period.max(Duration::from_millis(1)),
            runtime,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl TickSource for IntervalTickSource {
    fn subscribe(&mut self) -> TickSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let period = self.period;
        let task = self.runtime.spawn(async move {
            // First tick lands one full period after the sprint starts.
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        tracing::debug!(period_ms = period.as_millis() as u64, "tick subscription opened");
        TickSubscription::new(rx, Some(task))
    }
}

type SharedSender = Arc<Mutex<Option<UnboundedSender<()>>>>;

/// Synthetic ticks fired by hand through a [`ManualTicker`].
#[derive(Debug, Default)]
pub struct ManualTickSource {
    sender: SharedSender,
}

/// Handle that fires ticks into whatever subscription is currently open.
#[derive(Debug, Clone)]
pub struct ManualTicker {
    sender: SharedSender,
}

impl ManualTickSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticker(&self) -> ManualTicker {
        ManualTicker {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl TickSource for ManualTickSource {
    fn subscribe(&mut self) -> TickSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        *lock(&self.sender) = Some(tx);
        TickSubscription::new(rx, None)
    }
}

impl ManualTicker {
    /// Fire `n` ticks; returns how many reached a live subscription.
    pub fn fire(&self, n: usize) -> usize {
        let guard = lock(&self.sender);
        let Some(tx) = guard.as_ref() else {
            return 0;
        };
        (0..n).take_while(|_| tx.send(()).is_ok()).count()
    }

    pub fn is_subscribed(&self) -> bool {
        lock(&self.sender)
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }
}

fn lock(sender: &SharedSender) -> std::sync::MutexGuard<'_, Option<UnboundedSender<()>>> {
    sender.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
