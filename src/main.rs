#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    match topr::run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("topr: {e}");
            ExitCode::from(2)
        }
    }
}
