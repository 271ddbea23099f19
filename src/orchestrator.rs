//! Pipeline orchestration: read → type → select → render.

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::cli::args::Args;
use crate::cli::exit::Outcome;
use crate::csv::input::guard_input;
use crate::csv::reader::{ReadError, Table, read_table};
use crate::order::compare::{RowOrdering, SortKey};
use crate::order::keyspec::parse_key_spec;
use crate::output::csv_out::render_csv;
use crate::output::json_out::{
    Counts, JsonOutput, Refusal as JsonRefusal, Selection, rows_to_json, text_lossy,
};
use crate::pipeline::monitor::NoopMonitor;
use crate::pipeline::run::{SelectError, select_rows};
use crate::refusal::RefusalDetail;

const DEFAULT_DELIMITER: u8 = b',';

pub struct PipelineResult {
    pub outcome: Outcome,
    pub output: String,
}

pub fn run(args: &Args) -> Result<PipelineResult, Box<dyn Error>> {
    let delimiter = args.delimiter.unwrap_or(DEFAULT_DELIMITER);

    let table = match load_table(&args.input, delimiter) {
        Ok(table) => table,
        Err(detail) => return Ok(render_refusal(args, detail)),
    };

    let ordering = match resolve_ordering(args, &table.header) {
        Ok(ordering) => ordering,
        Err(detail) => return Ok(render_refusal(args, detail)),
    };

    let config = args.select_config();
    let rows_scanned = table.rows.len() as u64;
    let selected = match select_rows(
        table.rows.into_iter(),
        &config,
        &ordering,
        &mut NoopMonitor,
    ) {
        Ok(selected) => selected,
        Err(SelectError::Canceled) => return Ok(render_canceled(args, rows_scanned)),
        Err(SelectError::InvalidCount { requested }) => {
            return Ok(render_refusal(args, RefusalDetail::Count { requested }));
        }
    };

    let counts = Counts {
        rows_scanned: Some(rows_scanned),
        rows_selected: Some(selected.len() as u64),
    };

    let output = if args.json {
        JsonOutput::selected(
            display_name(&args.input),
            Selection::new(&config, args.by.clone()),
            counts,
            table.header.iter().map(|name| text_lossy(name)).collect(),
            rows_to_json(&selected),
        )
        .to_string()?
    } else {
        render_csv(&table.header, &selected, delimiter)?
    };

    Ok(PipelineResult {
        outcome: Outcome::Selected,
        output,
    })
}

fn load_table(path: &Path, delimiter: u8) -> Result<Table, RefusalDetail> {
    let bytes = fs::read(path).map_err(|err| RefusalDetail::Io {
        error: err.to_string(),
    })?;
    let text = guard_input(&bytes).map_err(|issue| RefusalDetail::Encoding { issue })?;
    read_table(text, delimiter).map_err(|err| match err {
        ReadError::Csv { line } => RefusalDetail::CsvParse { line },
        ReadError::MissingHeader => RefusalDetail::MissingHeader,
        ReadError::ExtraFields { record } => RefusalDetail::ExtraFields { record },
    })
}

/// Turn `--by` flags into a header-resolved ordering.
fn resolve_ordering(args: &Args, header: &[Vec<u8>]) -> Result<RowOrdering, RefusalDetail> {
    let mut keys = Vec::with_capacity(args.by.len());
    for raw in &args.by {
        let spec = parse_key_spec(raw).map_err(|err| RefusalDetail::KeySpec {
            message: err.to_string(),
        })?;
        let column = header
            .iter()
            .position(|name| name.as_slice() == spec.column.as_bytes())
            .ok_or_else(|| RefusalDetail::Column {
                name: spec.column.clone(),
            })?;
        keys.push(SortKey {
            column,
            direction: spec.direction,
            missing_to_end: args.missing_to_end,
        });
    }
    Ok(RowOrdering::new(keys))
}

fn render_refusal(args: &Args, detail: RefusalDetail) -> PipelineResult {
    let code = detail.code();
    let output = if args.json {
        JsonOutput::refusal(
            display_name(&args.input),
            Selection::new(&args.select_config(), args.by.clone()),
            JsonRefusal::new(code, &detail),
        )
        .to_string()
        .unwrap_or_else(|_| "{}".to_string())
    } else {
        format!(
            "topr error ({code})\n{reason}\n{detail}\n",
            reason = code.reason(),
            detail = detail.describe(),
        )
    };
    PipelineResult {
        outcome: Outcome::Refusal,
        output,
    }
}

fn render_canceled(args: &Args, rows_scanned: u64) -> PipelineResult {
    let output = if args.json {
        JsonOutput::canceled(
            display_name(&args.input),
            Selection::new(&args.select_config(), args.by.clone()),
            Counts {
                rows_scanned: Some(rows_scanned),
                rows_selected: None,
            },
        )
        .to_string()
        .unwrap_or_else(|_| "{}".to_string())
    } else {
        "topr canceled\n".to_string()
    };
    PipelineResult {
        outcome: Outcome::Canceled,
        output,
    }
}

fn display_name(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
