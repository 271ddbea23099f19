#![forbid(unsafe_code)]

pub mod cli;
pub mod csv;
pub mod order;
pub mod orchestrator;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod refusal;
pub mod select;

use cli::exit::{OutputMode, OutputStream, exit_code, output_stream};

/// Run the topr pipeline. Returns exit code (0, 1, or 2).
pub fn run() -> Result<u8, Box<dyn std::error::Error>> {
    use std::io::{self, Write};

    let args = match cli::args::Args::parse() {
        Ok(args) => args,
        Err(err) => {
            // Help and version land here too; those are not failures.
            let code = if err.use_stderr() { 2 } else { 0 };
            err.print()?;
            return Ok(code);
        }
    };

    let result = orchestrator::run(&args)?;
    let mode = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match output_stream(result.outcome, mode) {
        OutputStream::Stdout => {
            let mut stdout = io::stdout();
            stdout.write_all(result.output.as_bytes())?;
            stdout.flush()?;
        }
        OutputStream::Stderr => {
            let mut stderr = io::stderr();
            stderr.write_all(result.output.as_bytes())?;
            stderr.flush()?;
        }
    }

    Ok(exit_code(result.outcome))
}
