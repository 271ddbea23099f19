//! Row ordering: per-column sort keys and the multi-criteria rank chain.
//!
//! A rank comparison answers "which row is better?": `Greater` means the
//! first argument outranks the second and is selected ahead of it. The
//! selector keeps the k highest-ranked rows; the sorted output policy emits
//! best first.

use std::cmp::Ordering;

use crate::record::cell::{Cell, CellValue};
use crate::record::row::Row;

/// Emission/selection direction for one sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// One criterion of the ordering chain.
#[derive(Debug, Clone, Copy)]
pub struct SortKey {
    pub column: usize,
    pub direction: Direction,
    /// Rank missing cells below every present value, regardless of direction.
    pub missing_to_end: bool,
}

/// Multi-criteria row ordering: the first key decides, ties cascade.
#[derive(Debug, Clone)]
pub struct RowOrdering {
    keys: Vec<SortKey>,
}

impl RowOrdering {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Rank `a` against `b`. `Greater` means `a` is the better row.
    pub fn rank(&self, a: &Row, b: &Row) -> Ordering {
        for key in &self.keys {
            let left = a.cell(key.column);
            let right = b.cell(key.column);
            let ord = rank_cells(left, right, key);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

fn rank_cells(a: Option<&Cell>, b: Option<&Cell>, key: &SortKey) -> Ordering {
    // Out-of-width cells rank like missing cells.
    let a_missing = a.is_none_or(Cell::is_missing);
    let b_missing = b.is_none_or(Cell::is_missing);
    if key.missing_to_end && (a_missing || b_missing) {
        return match (a_missing, b_missing) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => unreachable!(),
        };
    }

    let natural = match (a, b) {
        (Some(a), Some(b)) => natural_cmp(a, b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    };
    match key.direction {
        Direction::Descending => natural,
        Direction::Ascending => natural.reverse(),
    }
}

/// Ascending comparison of two cells. Kinds rank Missing < Number < Text;
/// numbers compare by total order, text by raw bytes.
pub fn natural_cmp(a: &Cell, b: &Cell) -> Ordering {
    match (a.value(), b.value()) {
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Text, CellValue::Text) => a.raw().cmp(b.raw()),
        (CellValue::Marker(x), CellValue::Marker(y)) => x.cmp(y),
        (left, right) => kind_rank(left).cmp(&kind_rank(right)),
    }
}

fn kind_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Missing => 0,
        CellValue::Number(_) => 1,
        CellValue::Text => 2,
        CellValue::Marker(_) => 3,
    }
}

/// Boxed comparator used by the chaining utility.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;

/// Compose comparators into one: the first decides, ties cascade.
///
/// Panics unless at least two comparators are given; a chain of one is a
/// programmer error (use the comparator directly).
pub fn chain<T: 'static>(comparators: Vec<Comparator<T>>) -> Comparator<T> {
    assert!(
        comparators.len() >= 2,
        "comparator chain needs at least two comparators"
    );
    Box::new(move |a, b| {
        for comparator in &comparators {
            let ord = comparator(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&[u8]]) -> Row {
        Row::from(fields.to_vec())
    }

    fn key(column: usize, direction: Direction) -> SortKey {
        SortKey {
            column,
            direction,
            missing_to_end: false,
        }
    }

    #[test]
    fn descending_ranks_larger_number_better() {
        let ordering = RowOrdering::new(vec![key(0, Direction::Descending)]);
        let a = row(&[b"10"]);
        let b = row(&[b"2"]);
        assert_eq!(ordering.rank(&a, &b), Ordering::Greater);
    }

    #[test]
    fn ascending_ranks_smaller_number_better() {
        let ordering = RowOrdering::new(vec![key(0, Direction::Ascending)]);
        let a = row(&[b"10"]);
        let b = row(&[b"2"]);
        assert_eq!(ordering.rank(&a, &b), Ordering::Less);
    }

    #[test]
    fn ties_cascade_to_next_key() {
        let ordering = RowOrdering::new(vec![
            key(0, Direction::Descending),
            key(1, Direction::Ascending),
        ]);
        let a = row(&[b"5", b"apple"]);
        let b = row(&[b"5", b"banana"]);
        assert_eq!(ordering.rank(&a, &b), Ordering::Greater);
    }

    #[test]
    fn missing_ranks_below_numbers_by_default() {
        let ordering = RowOrdering::new(vec![key(0, Direction::Descending)]);
        let present = row(&[b"1"]);
        let missing = row(&[b"NA"]);
        assert_eq!(ordering.rank(&present, &missing), Ordering::Greater);
        // Ascending flips the natural order, so missing ranks best.
        let ordering = RowOrdering::new(vec![key(0, Direction::Ascending)]);
        assert_eq!(ordering.rank(&missing, &present), Ordering::Greater);
    }

    #[test]
    fn missing_to_end_overrides_direction() {
        let ordering = RowOrdering::new(vec![SortKey {
            column: 0,
            direction: Direction::Ascending,
            missing_to_end: true,
        }]);
        let present = row(&[b"99"]);
        let missing = row(&[b""]);
        assert_eq!(ordering.rank(&present, &missing), Ordering::Greater);
        assert_eq!(ordering.rank(&missing, &present), Ordering::Less);
    }

    #[test]
    fn text_compares_on_raw_bytes() {
        let ordering = RowOrdering::new(vec![key(0, Direction::Descending)]);
        let a = row(&[b"pear"]);
        let b = row(&[b"apple"]);
        assert_eq!(ordering.rank(&a, &b), Ordering::Greater);
    }

    #[test]
    fn numbers_rank_above_text_naturally() {
        let a = Cell::from_field(b"123");
        let b = Cell::from_field(b"abc");
        assert_eq!(natural_cmp(&a, &b), Ordering::Less);
    }

    #[test]
    fn chain_cascades_on_ties() {
        let by_len: Comparator<&str> = Box::new(|a, b| a.len().cmp(&b.len()));
        let by_bytes: Comparator<&str> = Box::new(|a, b| a.cmp(b));
        let chained = chain(vec![by_len, by_bytes]);
        assert_eq!(chained(&"aa", &"b"), Ordering::Greater);
        assert_eq!(chained(&"aa", &"ab"), Ordering::Less);
        assert_eq!(chained(&"aa", &"aa"), Ordering::Equal);
    }

    #[test]
    #[should_panic(expected = "at least two comparators")]
    fn chain_of_one_panics() {
        let only: Comparator<i64> = Box::new(|a, b| a.cmp(b));
        let _ = chain(vec![only]);
    }
}
