//! Single-pass selection driver: policy wiring, the consume loop, and the
//! final emission pass.
//!
//! Each output-order policy is a fixed (preprocessor, postprocessor) pair:
//!
//! | policy    | preprocessor   | postprocessor                      | cost    |
//! |-----------|----------------|------------------------------------|---------|
//! | sorted    | none           | sort by rank                       | low     |
//! | input     | stamp position | sort by marker, then strip marker  | highest |
//! | arbitrary | none           | none                               | lowest  |
//!
//! Restoring input order pays for an extra marker cell per row and a second
//! sort of the selected subset; it is only wired in when that policy is
//! explicitly requested.

use super::monitor::ExecutionMonitor;
use super::post::{Chain, Postprocess, SortByPosition, SortByRank, StripMarker, Untouched};
use crate::order::compare::RowOrdering;
use crate::record::row::Row;
use crate::select::plain::TopKSelector;
use crate::select::unique::UniqueTopKSelector;

/// Counting bound for the selection count.
pub const MAX_SELECT_COUNT: usize = u32::MAX as usize;

/// Plain top-k, or one group per distinct ordering value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Plain,
    UniqueValues,
}

/// Final emission order of the selected rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputOrder {
    /// Best row first, under the selection ordering.
    Sorted,
    /// Original input order, restricted to the selected rows.
    InputOrder,
    /// Whatever order the selector yields; cheapest.
    Arbitrary,
}

#[derive(Debug, Clone, Copy)]
pub struct SelectConfig {
    pub k: usize,
    pub mode: SelectionMode,
    pub order: OutputOrder,
}

impl SelectConfig {
    /// Reject invalid counts before any row is consumed.
    pub fn validate(&self) -> Result<(), SelectError> {
        if self.k == 0 || self.k > MAX_SELECT_COUNT {
            return Err(SelectError::InvalidCount {
                requested: self.k as u64,
            });
        }
        Ok(())
    }
}

/// Failures surfaced by the selection driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// Selection count outside `1..=MAX_SELECT_COUNT`.
    InvalidCount { requested: u64 },
    /// The host signaled cancellation between rows.
    Canceled,
}

impl std::fmt::Display for SelectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectError::InvalidCount { requested } => {
                write!(
                    f,
                    "selection count must be 1..={MAX_SELECT_COUNT}, got {requested}"
                )
            }
            SelectError::Canceled => write!(f, "selection canceled"),
        }
    }
}

impl std::error::Error for SelectError {}

/// Select the top rows of `rows` under `ordering`, per `config`.
///
/// Drains the input exactly once. Returns the selected rows in the order the
/// configured output policy dictates, or `Canceled` as soon as the monitor
/// signals between rows.
pub fn select_rows<I>(
    rows: I,
    config: &SelectConfig,
    ordering: &RowOrdering,
    monitor: &mut dyn ExecutionMonitor,
) -> Result<Vec<Row>, SelectError>
where
    I: ExactSizeIterator<Item = Row>,
{
    config.validate()?;

    let rank = |a: &Row, b: &Row| ordering.rank(a, b);
    let mut selected = match config.mode {
        SelectionMode::Plain => {
            let mut selector = TopKSelector::new(config.k, rank);
            scan(rows, config.order, monitor, |row| selector.consume(row))?;
            selector.into_vec()
        }
        SelectionMode::UniqueValues => {
            let mut selector = UniqueTopKSelector::new(config.k, rank);
            scan(rows, config.order, monitor, |row| selector.consume(row))?;
            selector.into_rows()
        }
    };

    postprocessor(config.order).apply(&mut selected, ordering);

    // Emission pass: one cancellation check per emitted row.
    let mut emitted = Vec::with_capacity(selected.len());
    for row in selected {
        if monitor.canceled() {
            return Err(SelectError::Canceled);
        }
        emitted.push(row);
    }
    monitor.progress(1.0);
    Ok(emitted)
}

/// Drain the stream into `consume`, stamping positions when the output
/// policy needs them, with a cancellation check per row.
fn scan<I, F>(
    rows: I,
    order: OutputOrder,
    monitor: &mut dyn ExecutionMonitor,
    mut consume: F,
) -> Result<(), SelectError>
where
    I: ExactSizeIterator<Item = Row>,
    F: FnMut(Row),
{
    let total = rows.len();
    let stamp = order == OutputOrder::InputOrder;
    for (position, mut row) in rows.enumerate() {
        if monitor.canceled() {
            return Err(SelectError::Canceled);
        }
        if stamp {
            row.stamp(position as u64);
        }
        consume(row);
        if total > 0 {
            monitor.progress((position + 1) as f64 / total as f64);
        }
    }
    Ok(())
}

fn postprocessor(order: OutputOrder) -> Box<dyn Postprocess> {
    match order {
        OutputOrder::Sorted => Box::new(SortByRank),
        OutputOrder::InputOrder => Box::new(Chain::new(vec![
            Box::new(SortByPosition),
            Box::new(StripMarker),
        ])),
        OutputOrder::Arbitrary => Box::new(Untouched),
    }
}
