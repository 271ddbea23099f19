pub mod input;
pub mod reader;
