use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use super::delimiter::parse_delimiter_arg;
use crate::pipeline::run::{MAX_SELECT_COUNT, OutputOrder, SelectConfig, SelectionMode};

const DEFAULT_TOP: u64 = 10;

/// CLI argument parsing & validation.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "topr",
    about = "Select the top K rows of a CSV by one or more columns in a single streaming pass.",
    override_usage = "topr <input.csv> --by <column[:asc|:desc]>... [-k <n>] [--unique] [--order <sorted|input|arbitrary>] [--missing-to-end] [--delimiter <delim>] [--json]"
)]
pub struct Args {
    /// Input CSV path.
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,

    /// How many rows (or distinct values, with --unique) to keep.
    #[arg(
        short = 'k',
        long = "top",
        value_name = "N",
        default_value_t = DEFAULT_TOP,
        value_parser = parse_top
    )]
    pub top: u64,

    /// Sort column, optionally with a direction (default: desc).
    /// Repeat for multi-column ordering; the first column decides,
    /// ties cascade to the next.
    #[arg(long = "by", value_name = "COLUMN[:asc|:desc]", required = true)]
    pub by: Vec<String>,

    /// Keep every row tied on the k-th distinct value instead of
    /// exactly k rows.
    #[arg(long)]
    pub unique: bool,

    /// Emission order of the selected rows.
    #[arg(long, value_enum, value_name = "ORDER", default_value_t = OrderArg::Sorted)]
    pub order: OrderArg,

    /// Rank rows with missing sort cells below every present value.
    #[arg(long = "missing-to-end")]
    pub missing_to_end: bool,

    /// Force a CSV delimiter (comma/tab/semicolon/pipe/caret, 0xNN, or single ASCII byte).
    #[arg(long, value_name = "DELIM", value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Emit JSON output (single object).
    #[arg(long)]
    pub json: bool,
}

/// Output-order policy as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Best row first under the sort columns.
    Sorted,
    /// Original file order, restricted to the selected rows.
    Input,
    /// Unspecified order; cheapest.
    Arbitrary,
}

impl Args {
    pub fn parse() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Engine configuration implied by the flags.
    pub fn select_config(&self) -> SelectConfig {
        SelectConfig {
            k: self.top as usize,
            mode: if self.unique {
                SelectionMode::UniqueValues
            } else {
                SelectionMode::Plain
            },
            order: match self.order {
                OrderArg::Sorted => OutputOrder::Sorted,
                OrderArg::Input => OutputOrder::InputOrder,
                OrderArg::Arbitrary => OutputOrder::Arbitrary,
            },
        }
    }
}

fn parse_top(raw: &str) -> Result<u64, String> {
    let value = raw
        .parse::<u64>()
        .map_err(|_| "top count must be a positive integer".to_string())?;
    if value == 0 || value > MAX_SELECT_COUNT as u64 {
        return Err(format!("top count must be 1..={MAX_SELECT_COUNT}"));
    }
    Ok(value)
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    parse_delimiter_arg(raw).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_count_bounds() {
        assert_eq!(parse_top("1"), Ok(1));
        assert_eq!(parse_top("25"), Ok(25));
        assert!(parse_top("0").is_err());
        assert!(parse_top("-3").is_err());
        assert!(parse_top("4294967296").is_err());
        assert!(parse_top("ten").is_err());
    }

    #[test]
    fn flags_map_to_engine_config() {
        let args = Args::try_parse_from([
            "topr", "in.csv", "--by", "price", "--unique", "--order", "input", "-k", "3",
        ])
        .unwrap();
        let config = args.select_config();
        assert_eq!(config.k, 3);
        assert_eq!(config.mode, SelectionMode::UniqueValues);
        assert_eq!(config.order, OutputOrder::InputOrder);
    }

    #[test]
    fn by_is_required() {
        assert!(Args::try_parse_from(["topr", "in.csv"]).is_err());
    }
}
