pub mod heap;
pub mod plain;
pub mod unique;
