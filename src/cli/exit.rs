//! Exit codes & stdout/stderr routing.

/// Domain outcome produced by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Selected,
    Canceled,
    Refusal,
}

/// Output mode chosen by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Target stream for output emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Exit code for a given outcome.
pub fn exit_code(outcome: Outcome) -> u8 {
    match outcome {
        Outcome::Selected => 0,
        Outcome::Canceled => 1,
        Outcome::Refusal => 2,
    }
}

/// Output stream for a given outcome and output mode.
///
/// In JSON mode everything goes to stdout. In human mode, selected rows go
/// to stdout; cancellations and refusals go to stderr.
pub fn output_stream(outcome: Outcome, mode: OutputMode) -> OutputStream {
    match (mode, outcome) {
        (OutputMode::Json, _) => OutputStream::Stdout,
        (OutputMode::Human, Outcome::Selected) => OutputStream::Stdout,
        (OutputMode::Human, _) => OutputStream::Stderr,
    }
}
