pub mod cell;
pub mod row;
