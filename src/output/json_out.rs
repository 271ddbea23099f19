//! JSON output schema assembly.

use serde::Serialize;
use serde_json::Value;

use crate::pipeline::run::{OutputOrder, SelectConfig, SelectionMode};
use crate::record::row::Row;
use crate::refusal::{RefusalCode, RefusalDetail};

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Selected,
    Canceled,
    Refusal,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Plain,
    UniqueValues,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    Sorted,
    Input,
    Arbitrary,
}

#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub k: u64,
    pub mode: Mode,
    pub order: Order,
    pub by: Vec<String>,
}

impl Selection {
    pub fn new(config: &SelectConfig, by: Vec<String>) -> Self {
        Self {
            k: config.k as u64,
            mode: match config.mode {
                SelectionMode::Plain => Mode::Plain,
                SelectionMode::UniqueValues => Mode::UniqueValues,
            },
            order: match config.order {
                OutputOrder::Sorted => Order::Sorted,
                OutputOrder::InputOrder => Order::Input,
                OutputOrder::Arbitrary => Order::Arbitrary,
            },
            by,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Counts {
    pub rows_scanned: Option<u64>,
    pub rows_selected: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Refusal {
    pub code: String,
    pub message: String,
    pub detail: Value,
}

impl Refusal {
    pub fn new(code: RefusalCode, detail: &RefusalDetail) -> Self {
        Self {
            code: code.as_str().to_string(),
            message: code.reason().to_string(),
            detail: detail.to_json(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    pub version: &'static str,
    pub outcome: Outcome,
    pub input: String,
    pub selection: Selection,
    pub counts: Counts,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub refusal: Option<Refusal>,
}

impl JsonOutput {
    pub fn selected(
        input: String,
        selection: Selection,
        counts: Counts,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        Self {
            version: "topr.v0",
            outcome: Outcome::Selected,
            input,
            selection,
            counts,
            columns,
            rows,
            refusal: None,
        }
    }

    pub fn canceled(input: String, selection: Selection, counts: Counts) -> Self {
        Self {
            version: "topr.v0",
            outcome: Outcome::Canceled,
            input,
            selection,
            counts,
            columns: Vec::new(),
            rows: Vec::new(),
            refusal: None,
        }
    }

    pub fn refusal(input: String, selection: Selection, refusal: Refusal) -> Self {
        Self {
            version: "topr.v0",
            outcome: Outcome::Refusal,
            input,
            selection,
            counts: Counts::default(),
            columns: Vec::new(),
            rows: Vec::new(),
            refusal: Some(refusal),
        }
    }

    pub fn to_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Lossy byte-to-string conversion for emitted cells and header names.
pub fn text_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Rows as arrays of strings, in emission order.
pub fn rows_to_json(rows: &[Row]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.cells().iter().map(|cell| text_lossy(cell.raw())).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::run::{OutputOrder, SelectConfig, SelectionMode};

    fn selection() -> Selection {
        Selection::new(
            &SelectConfig {
                k: 2,
                mode: SelectionMode::Plain,
                order: OutputOrder::Sorted,
            },
            vec!["price:desc".to_string()],
        )
    }

    #[test]
    fn selected_shape() {
        let output = JsonOutput::selected(
            "in.csv".to_string(),
            selection(),
            Counts {
                rows_scanned: Some(4),
                rows_selected: Some(2),
            },
            vec!["name".to_string(), "price".to_string()],
            vec![vec!["foo".to_string(), "10".to_string()]],
        );
        let value: Value = serde_json::from_str(&output.to_string().unwrap()).unwrap();
        assert_eq!(value["outcome"], "selected");
        assert_eq!(value["selection"]["k"], 2);
        assert_eq!(value["selection"]["mode"], "plain");
        assert_eq!(value["counts"]["rows_scanned"], 4);
        assert_eq!(value["rows"][0][1], "10");
        assert!(value["refusal"].is_null());
    }

    #[test]
    fn refusal_shape() {
        let detail = RefusalDetail::Column {
            name: "x".to_string(),
        };
        let output = JsonOutput::refusal(
            "in.csv".to_string(),
            selection(),
            Refusal::new(detail.code(), &detail),
        );
        let value: Value = serde_json::from_str(&output.to_string().unwrap()).unwrap();
        assert_eq!(value["outcome"], "refusal");
        assert_eq!(value["refusal"]["code"], "E_COLUMN");
        assert_eq!(value["refusal"]["detail"]["column"], "x");
    }
}
