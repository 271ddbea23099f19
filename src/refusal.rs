//! Refusals: stable machine codes plus structured detail for everything
//! that stops a run before selection happens.

use std::fmt;

use serde_json::{Value, json};

use crate::csv::input::EncodingIssue;

/// Canonical refusal codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefusalCode {
    Io,
    Encoding,
    CsvParse,
    Headers,
    Column,
    KeySpec,
    Count,
}

impl RefusalCode {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            RefusalCode::Io => "E_IO",
            RefusalCode::Encoding => "E_ENCODING",
            RefusalCode::CsvParse => "E_CSV_PARSE",
            RefusalCode::Headers => "E_HEADERS",
            RefusalCode::Column => "E_COLUMN",
            RefusalCode::KeySpec => "E_KEYSPEC",
            RefusalCode::Count => "E_COUNT",
        }
    }

    /// A short, stable reason label for human output.
    #[inline]
    pub const fn reason(self) -> &'static str {
        match self {
            RefusalCode::Io => "could not read the input file",
            RefusalCode::Encoding => "input is not 8-bit text",
            RefusalCode::CsvParse => "input is not well-formed CSV",
            RefusalCode::Headers => "header row is missing or rows are wider than it",
            RefusalCode::Column => "a sort column is not in the header",
            RefusalCode::KeySpec => "a --by value could not be parsed",
            RefusalCode::Count => "the top count is out of range",
        }
    }
}

impl fmt::Display for RefusalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured refusal detail, one variant per code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefusalDetail {
    Io { error: String },
    Encoding { issue: EncodingIssue },
    CsvParse { line: Option<u64> },
    MissingHeader,
    ExtraFields { record: u64 },
    Column { name: String },
    KeySpec { message: String },
    Count { requested: u64 },
}

impl RefusalDetail {
    pub const fn code(&self) -> RefusalCode {
        match self {
            RefusalDetail::Io { .. } => RefusalCode::Io,
            RefusalDetail::Encoding { .. } => RefusalCode::Encoding,
            RefusalDetail::CsvParse { .. } => RefusalCode::CsvParse,
            RefusalDetail::MissingHeader | RefusalDetail::ExtraFields { .. } => {
                RefusalCode::Headers
            }
            RefusalDetail::Column { .. } => RefusalCode::Column,
            RefusalDetail::KeySpec { .. } => RefusalCode::KeySpec,
            RefusalDetail::Count { .. } => RefusalCode::Count,
        }
    }

    /// One human line below the code/reason pair.
    pub fn describe(&self) -> String {
        match self {
            RefusalDetail::Io { error } => error.clone(),
            RefusalDetail::Encoding { issue } => format!("detected: {}", issue.as_str()),
            RefusalDetail::CsvParse { line: Some(line) } => format!("parse error at line {line}"),
            RefusalDetail::CsvParse { line: None } => "parse error".to_string(),
            RefusalDetail::MissingHeader => "no non-blank header row found".to_string(),
            RefusalDetail::ExtraFields { record } => {
                format!("record {record} has non-blank fields beyond the header")
            }
            RefusalDetail::Column { name } => format!("no column named {name:?} in the header"),
            RefusalDetail::KeySpec { message } => message.clone(),
            RefusalDetail::Count { requested } => format!("requested {requested}"),
        }
    }

    /// JSON detail object for `--json` output.
    pub fn to_json(&self) -> Value {
        match self {
            RefusalDetail::Io { error } => json!({ "error": error }),
            RefusalDetail::Encoding { issue } => json!({ "issue": issue.as_str() }),
            RefusalDetail::CsvParse { line } => json!({ "line": line }),
            RefusalDetail::MissingHeader => json!({ "issue": "missing_header" }),
            RefusalDetail::ExtraFields { record } => {
                json!({ "issue": "extra_fields", "record": record })
            }
            RefusalDetail::Column { name } => json!({ "column": name }),
            RefusalDetail::KeySpec { message } => json!({ "message": message }),
            RefusalDetail::Count { requested } => json!({ "requested": requested }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_strings() {
        assert_eq!(RefusalCode::Io.as_str(), "E_IO");
        assert_eq!(RefusalCode::Column.as_str(), "E_COLUMN");
        assert_eq!(RefusalCode::Count.to_string(), "E_COUNT");
    }

    #[test]
    fn details_map_to_their_codes() {
        assert_eq!(RefusalDetail::MissingHeader.code(), RefusalCode::Headers);
        assert_eq!(
            RefusalDetail::ExtraFields { record: 3 }.code(),
            RefusalCode::Headers
        );
        assert_eq!(
            RefusalDetail::Column {
                name: "x".to_string()
            }
            .code(),
            RefusalCode::Column
        );
    }

    #[test]
    fn json_detail_shapes() {
        let detail = RefusalDetail::CsvParse { line: Some(7) };
        assert_eq!(detail.to_json(), json!({ "line": 7 }));
        let detail = RefusalDetail::Count { requested: 0 };
        assert_eq!(detail.to_json(), json!({ "requested": 0 }));
    }
}
