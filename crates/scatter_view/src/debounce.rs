//! Resize debouncing
//!
//! Hosts report container sizes far more often than a full layout is
//! worth recomputing. [`ResizeDebouncer`] collects the reports and hands
//! back only the last size of each burst, once the burst has been quiet
//! for the configured period.

use std::time::Duration;

use scatter::Viewport;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Cloneable handle for reporting sizes, usable from any thread
#[derive(Debug, Clone)]
pub struct ResizeNotifier {
    sender: mpsc::UnboundedSender<Viewport>,
}

impl ResizeNotifier {
    /// Report a new size. Returns false once the debouncer is gone.
    pub fn notify(&self, viewport: Viewport) -> bool {
        self.sender.send(viewport).is_ok()
    }
}

/// Coalesces bursts of viewport changes into one
pub struct ResizeDebouncer {
    notifier: ResizeNotifier,
    settled: mpsc::UnboundedReceiver<Viewport>,
    quiet_period: Duration,
    task: JoinHandle<()>,
}

impl ResizeDebouncer {
    /// Start the background task. Must be called within a tokio runtime.
    pub fn new(quiet_period: Duration) -> Self {
        let (sender, incoming) = mpsc::unbounded_channel();
        let (settled_tx, settled) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(incoming, settled_tx, quiet_period));

        Self {
            notifier: ResizeNotifier { sender },
            settled,
            quiet_period,
            task,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Report a new size
    pub fn notify(&self, viewport: Viewport) {
        self.notifier.notify(viewport);
    }

    /// A handle for reporting sizes from other tasks or threads
    pub fn notifier(&self) -> ResizeNotifier {
        self.notifier.clone()
    }

    /// Wait for the next settled size
    pub async fn recv(&mut self) -> Option<Viewport> {
        self.settled.recv().await
    }

    /// A settled size, if one is waiting
    pub fn try_recv(&mut self) -> Option<Viewport> {
        self.settled.try_recv().ok()
    }
}

impl Drop for ResizeDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    mut incoming: mpsc::UnboundedReceiver<Viewport>,
    settled: mpsc::UnboundedSender<Viewport>,
    quiet_period: Duration,
) {
    while let Some(mut latest) = incoming.recv().await {
        let mut closed = false;

        // Every new report restarts the quiet period
        loop {
            tokio::select! {
                next = incoming.recv() => match next {
                    Some(viewport) => latest = viewport,
                    None => {
                        closed = true;
                        break;
                    }
                },
                _ = tokio::time::sleep(quiet_period) => break,
            }
        }

        tracing::trace!(width = latest.width, height = latest.height, "viewport settled");
        if settled.send(latest).is_err() || closed {
            return;
        }
    }
}
