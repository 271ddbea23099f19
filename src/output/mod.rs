pub mod csv_out;
pub mod json_out;
