// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Auto-refresh scheduler driving the batch reconciler on a fixed cadence.
//!
//! The scheduler runs as one spawned task with a 1-second countdown tick
//! that is independent of the reconciliation network calls. A pass starts
//! when the countdown reaches zero or a manual trigger arrives; the
//! countdown resets to the full interval whenever a pass starts. Manual
//! triggers are a no-op while a pass is already running, so two passes can
//! never overlap on the same ids.
//!
//! Teardown cancels the task via a [`CancellationToken`]. A pass that is in
//! flight at that moment is dropped before its merge section, so a torn-down
//! store is never mutated.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::batch::BatchReconciler;

/// Observable scheduler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No timer armed (empty store, or after teardown).
    Idle,
    /// Timer armed, counting down to the next pass.
    Scheduled,
    /// A reconciliation pass is in flight.
    Running,
}

/// Handle to a running scheduler task.
///
/// Dropping the handle without calling [`SchedulerHandle::shutdown`] leaves
/// the task running detached; shut it down explicitly on teardown.
pub struct SchedulerHandle {
    cancel: CancellationToken,
    state_rx: watch::Receiver<SchedulerState>,
    countdown_rx: watch::Receiver<Duration>,
    trigger_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        *self.state_rx.borrow()
    }

    /// Time remaining until the next automatic pass.
    pub fn remaining(&self) -> Duration {
        *self.countdown_rx.borrow()
    }

    /// Request an immediate pass.
    ///
    /// Returns `false` (a no-op, not an error) when a pass is already
    /// running or a trigger is already queued.
    pub fn trigger_now(&self) -> bool {
        if self.state() == SchedulerState::Running {
            debug!("manual trigger ignored: pass already running");
            return false;
        }
        self.trigger_tx.try_send(()).is_ok()
    }

    /// Cancel the scheduler and wait for its task to exit.
    ///
    /// Any pass in flight is dropped before its merge; no store mutation
    /// happens after this returns.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}

/// Spawn the auto-refresh scheduler over a reconciler.
///
/// If the store is empty at spawn time the scheduler settles in `Idle`
/// without arming any timer, mirroring a component that mounts with
/// nothing to refresh.
pub fn spawn(reconciler: Arc<BatchReconciler>, interval: Duration) -> SchedulerHandle {
    let cancel = CancellationToken::new();
    let (state_tx, state_rx) = watch::channel(SchedulerState::Idle);
    let (countdown_tx, countdown_rx) = watch::channel(interval);
    let (trigger_tx, mut trigger_rx) = mpsc::channel::<()>(1);

    let task_cancel = cancel.clone();
    let task = tokio::spawn(async move {
        if reconciler.store().lock().await.is_empty() {
            info!("scheduler idle: store is empty");
            return;
        }

        let _ = state_tx.send(SchedulerState::Scheduled);
        info!(interval_secs = interval.as_secs(), "auto-refresh scheduler armed");

        let mut tick = tokio::time::interval(Duration::from_secs(1));
        // The first interval tick completes immediately; consume it so the
        // countdown starts at the full interval.
        tick.tick().await;
        let mut remaining = interval;

        loop {
            tokio::select! {
                _ = task_cancel.cancelled() => break,
                _ = tick.tick() => {
                    remaining = remaining.saturating_sub(Duration::from_secs(1));
                    let _ = countdown_tx.send(remaining);
                    if remaining.is_zero() {
                        remaining = interval;
                        let _ = countdown_tx.send(remaining);
                        if !run_guarded(&reconciler, &task_cancel, &state_tx).await {
                            break;
                        }
                    }
                }
                Some(()) = trigger_rx.recv() => {
                    remaining = interval;
                    let _ = countdown_tx.send(remaining);
                    if !run_guarded(&reconciler, &task_cancel, &state_tx).await {
                        break;
                    }
                }
            }
        }

        let _ = state_tx.send(SchedulerState::Idle);
        info!("auto-refresh scheduler stopped");
    });

    SchedulerHandle {
        cancel,
        state_rx,
        countdown_rx,
        trigger_tx,
        task,
    }
}

/// Run one pass racing against cancellation.
///
/// Returns `false` when cancellation won; the pass future is dropped before
/// its merge section, discarding any in-flight probe results.
async fn run_guarded(
    reconciler: &BatchReconciler,
    cancel: &CancellationToken,
    state_tx: &watch::Sender<SchedulerState>,
) -> bool {
    let _ = state_tx.send(SchedulerState::Running);

    tokio::select! {
        _ = cancel.cancelled() => {
            debug!("pass cancelled mid-flight, results discarded");
            false
        }
        summary = reconciler.run_pass() => {
            debug!(updated = summary.updated, "scheduled pass settled");
            let _ = state_tx.send(SchedulerState::Scheduled);
            true
        }
    }
}
