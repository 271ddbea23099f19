//! Order postprocessors: single-purpose transforms applied to the retained
//! rows after selection, composable as a chain.
//!
//! Every step receives the ordering alongside the rows so steps compose
//! uniformly, whether or not they re-derive comparisons.

use crate::order::compare::RowOrdering;
use crate::record::row::Row;

pub trait Postprocess {
    fn apply(&self, rows: &mut Vec<Row>, ordering: &RowOrdering);
}

/// Emits rows exactly as the selector yielded them.
///
/// The resulting order is unspecified; it may coincide with input order on
/// some streams, but that is never guaranteed.
#[derive(Debug, Default)]
pub struct Untouched;

impl Postprocess for Untouched {
    fn apply(&self, _rows: &mut Vec<Row>, _ordering: &RowOrdering) {}
}

/// Sorts retained rows by the selection ordering, best first.
#[derive(Debug, Default)]
pub struct SortByRank;

impl Postprocess for SortByRank {
    fn apply(&self, rows: &mut Vec<Row>, ordering: &RowOrdering) {
        rows.sort_by(|a, b| ordering.rank(b, a));
    }
}

/// Sorts retained rows by their position marker, ascending.
///
/// Requires rows stamped by the order preprocessor; a row without a marker
/// is a programmer error and panics.
#[derive(Debug, Default)]
pub struct SortByPosition;

impl Postprocess for SortByPosition {
    fn apply(&self, rows: &mut Vec<Row>, _ordering: &RowOrdering) {
        rows.sort_by_key(|row| match row.marker() {
            Some(position) => position,
            None => panic!("row has no position marker; was the stream stamped?"),
        });
    }
}

/// Strips the trailing position-marker cell from every row.
#[derive(Debug, Default)]
pub struct StripMarker;

impl Postprocess for StripMarker {
    fn apply(&self, rows: &mut Vec<Row>, _ordering: &RowOrdering) {
        for row in rows {
            row.strip_marker();
        }
    }
}

/// A sequence of postprocessors, each consuming the prior's output.
pub struct Chain {
    steps: Vec<Box<dyn Postprocess>>,
}

impl Chain {
    /// Panics on fewer than two steps: a chain of one is a programmer error
    /// (use the step directly).
    pub fn new(steps: Vec<Box<dyn Postprocess>>) -> Self {
        assert!(
            steps.len() >= 2,
            "postprocessor chain needs at least two steps"
        );
        Self { steps }
    }
}

impl Postprocess for Chain {
    fn apply(&self, rows: &mut Vec<Row>, ordering: &RowOrdering) {
        for step in &self.steps {
            step.apply(rows, ordering);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::compare::{Direction, SortKey};

    fn ordering() -> RowOrdering {
        RowOrdering::new(vec![SortKey {
            column: 0,
            direction: Direction::Descending,
            missing_to_end: false,
        }])
    }

    fn rows(values: &[&[u8]]) -> Vec<Row> {
        values.iter().map(|value| Row::from(vec![*value])).collect()
    }

    #[test]
    fn untouched_leaves_rows_alone() {
        let mut selected = rows(&[b"2", b"9", b"4"]);
        let expected = selected.clone();
        Untouched.apply(&mut selected, &ordering());
        assert_eq!(selected, expected);
    }

    #[test]
    fn sort_by_rank_puts_best_first() {
        let mut selected = rows(&[b"2", b"9", b"4"]);
        SortByRank.apply(&mut selected, &ordering());
        let raw: Vec<&[u8]> = selected.iter().map(|row| row.cells()[0].raw()).collect();
        assert_eq!(raw, vec![b"9".as_slice(), b"4", b"2"]);
    }

    #[test]
    fn marker_chain_restores_input_order() {
        let mut selected = rows(&[b"b", b"c", b"a"]);
        selected[0].stamp(1);
        selected[1].stamp(2);
        selected[2].stamp(0);
        let chain = Chain::new(vec![Box::new(SortByPosition), Box::new(StripMarker)]);
        chain.apply(&mut selected, &ordering());
        let raw: Vec<&[u8]> = selected.iter().map(|row| row.cells()[0].raw()).collect();
        assert_eq!(raw, vec![b"a".as_slice(), b"b", b"c"]);
        assert!(selected.iter().all(|row| row.marker().is_none()));
    }

    #[test]
    #[should_panic(expected = "at least two steps")]
    fn chain_of_one_step_panics() {
        let _ = Chain::new(vec![Box::new(Untouched)]);
    }

    #[test]
    #[should_panic(expected = "no position marker")]
    fn sort_by_position_requires_markers() {
        let mut selected = rows(&[b"a"]);
        SortByPosition.apply(&mut selected, &ordering());
    }
}
