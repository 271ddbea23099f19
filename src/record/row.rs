//! Row type: an opaque tuple of cells.
//!
//! The selection engine never inspects cells except through the supplied
//! ordering and the position-marker pair below (stamp on the way into the
//! selector, strip on the way out).

use super::cell::Cell;

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Append a trailing position-marker cell.
    pub fn stamp(&mut self, position: u64) {
        self.cells.push(Cell::marker(position));
    }

    /// Position of this row in the original input, if stamped.
    pub fn marker(&self) -> Option<u64> {
        self.cells.last().and_then(Cell::marker_position)
    }

    /// Remove the trailing position-marker cell.
    ///
    /// Panics if the last cell is not a marker; callers must only strip rows
    /// that went through the stamp-position preprocessor.
    pub fn strip_marker(&mut self) {
        match self.cells.last().and_then(Cell::marker_position) {
            Some(_) => {
                self.cells.pop();
            }
            None => panic!("row has no position-marker cell to strip"),
        }
    }
}

impl From<Vec<&[u8]>> for Row {
    fn from(fields: Vec<&[u8]>) -> Self {
        Self::new(fields.into_iter().map(Cell::from_field).collect())
    }
}
