// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch reconciliation and auto-refresh scheduling for Vendsync.
//!
//! [`BatchReconciler`] runs one all-settled round of status probes over the
//! outstanding records; [`scheduler::spawn`] drives it on a fixed cadence
//! with a countdown, manual trigger, and clean teardown.

pub mod batch;
pub mod scheduler;

pub use batch::{BatchReconciler, PassSummary};
pub use scheduler::{SchedulerHandle, SchedulerState};
