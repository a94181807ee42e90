//! Debounce gate for rapidly changing inputs such as a search box.
//!
//! An actor owns the timer. Every new input restarts it, and only a value that
//! stays unchanged for the whole delay is published. Shutting the gate down (or
//! dropping its handle) discards whatever is still pending.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

use crate::config::DEFAULT_DEBOUNCE_MS;

pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(DEFAULT_DEBOUNCE_MS);

pub struct DebounceGate<T> {
    receiver: mpsc::Receiver<T>,
    output: watch::Sender<T>,
    delay: Duration,
}

impl<T: Clone + Send + Sync + 'static> DebounceGate<T> {
    /// Starts a gate whose published value begins as `initial`.
    pub fn spawn(initial: T, delay: Duration) -> Debounced<T> {
        let (sender, receiver) = mpsc::channel(32);
        let (output, debounced) = watch::channel(initial);
        let gate = Self { receiver, output, delay };
        let handle = tokio::spawn(gate.run());
        Debounced { sender, debounced, handle }
    }

    pub fn spawn_default(initial: T) -> Debounced<T> {
        Self::spawn(initial, DEFAULT_DEBOUNCE_DELAY)
    }

    #[instrument(name = "debounce_gate", skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
    async fn run(mut self) {
        let mut pending: Option<T> = None;
        loop {
            match pending.take() {
                None => match self.receiver.recv().await {
                    Some(value) => pending = Some(value),
                    None => break,
                },
                Some(value) => {
                    tokio::select! {
                        next = self.receiver.recv() => match next {
                            Some(newer) => {
                                trace!("Input changed, restarting timer");
                                pending = Some(newer);
                            }
                            None => {
                                debug!("Input closed, discarding pending value");
                                break;
                            }
                        },
                        _ = tokio::time::sleep(self.delay) => {
                            trace!("Input settled, publishing");
                            // Every subscriber may be gone; nothing to publish to then.
                            let _ = self.output.send(value);
                        }
                    }
                }
            }
        }
    }
}

/// Handle to a running [`DebounceGate`].
pub struct Debounced<T> {
    sender: mpsc::Sender<T>,
    debounced: watch::Receiver<T>,
    handle: JoinHandle<()>,
}

impl<T: Clone + Send + Sync + 'static> Debounced<T> {
    /// Feed a new raw input value.
    pub async fn set(&self, value: T) {
        let _ = self.sender.send(value).await;
    }

    /// The last published value.
    pub fn value(&self) -> T {
        self.debounced.borrow().clone()
    }

    /// A receiver that wakes whenever a settled value is published.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.debounced.clone()
    }

    /// Stops the gate. A value still waiting for its delay is never published.
    pub async fn shutdown(self) {
        let Debounced { sender, debounced, handle } = self;
        drop(sender);
        drop(debounced);
        let _ = handle.await;
    }
}
