//! Synthetic progress for in-flight service calls.
//!
//! The real completion fraction is unknown until the response arrives, so a
//! ticker emits a monotonically increasing value on a fixed cadence, capped
//! below 100. The owning gateway settles it with exactly one terminal value:
//! 100 on success, 0 on failure. Settling joins the ticker task first, so no
//! tick can ever land after the terminal value.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Highest value the ticker will synthesize on its own.
pub const PROGRESS_CEILING: u8 = 90;

/// Terminal value emitted on success.
pub const PROGRESS_DONE: u8 = 100;

/// A cancellable periodic progress emitter tied to one service call.
pub struct ProgressTicker {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
    tx: UnboundedSender<u8>,
}

impl ProgressTicker {
    /// Spawn the ticker: every `interval` it adds `step`, saturating at
    /// [`PROGRESS_CEILING`], and sends the new value.
    pub fn start(tx: UnboundedSender<u8>, step: u8, interval: Duration) -> Self {
        let token = CancellationToken::new();
        let tick_token = token.clone();
        let tick_tx = tx.clone();
        let task = tokio::spawn(async move {
            let mut value: u8 = 0;
            loop {
                tokio::select! {
                    _ = tick_token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {
                        if value < PROGRESS_CEILING {
                            value = value.saturating_add(step).min(PROGRESS_CEILING);
                            if tick_tx.send(value).is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });
        Self {
            token,
            task: Some(task),
            tx,
        }
    }

    /// Stop ticking and emit the success terminal value (100).
    pub async fn finish(mut self) {
        self.settle(PROGRESS_DONE).await;
    }

    /// Stop ticking and reset to 0.
    pub async fn fail(mut self) {
        self.settle(0).await;
    }

    async fn settle(&mut self, value: u8) {
        self.token.cancel();
        // Join before sending so the terminal value is the last one out.
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        let _ = self.tx.send(value);
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        // Teardown path for callers that never settle (e.g. an early return).
        self.token.cancel();
    }
}
