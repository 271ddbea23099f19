pub mod compare;
pub mod keyspec;
