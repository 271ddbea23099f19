//! Progress reporting and cooperative cancellation.
//!
//! The driver polls `canceled` once per consumed row and once per emitted
//! row, and reports a fractional completion estimate as the scan advances.
//! Cancellation aborts the run with a distinct outcome; no partial retained
//! set leaks out as if it were complete.

/// Host-injected execution monitor.
pub trait ExecutionMonitor {
    /// Fractional completion estimate in `0.0..=1.0`.
    fn progress(&mut self, _fraction: f64) {}

    /// Polled between rows; returning true aborts the run.
    fn canceled(&self) -> bool {
        false
    }
}

/// Monitor for hosts that neither report progress nor cancel.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMonitor;

impl ExecutionMonitor for NoopMonitor {}
