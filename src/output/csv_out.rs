//! CSV emission of the selected rows.
//!
//! Field bytes are written exactly as they were read; only quoting may
//! differ when a field requires it.

use csv::{ByteRecord, WriterBuilder};

use crate::record::row::Row;

/// Render header plus selected rows as CSV text.
pub fn render_csv(header: &[Vec<u8>], rows: &[Row], delimiter: u8) -> Result<String, csv::Error> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    let mut record = ByteRecord::new();
    for name in header {
        record.push_field(name);
    }
    writer.write_byte_record(&record)?;

    for row in rows {
        record.clear();
        for cell in row.cells() {
            record.push_field(cell.raw());
        }
        writer.write_byte_record(&record)?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&[u8]]) -> Row {
        Row::from(fields.to_vec())
    }

    #[test]
    fn renders_header_and_rows() {
        let header = vec![b"name".to_vec(), b"price".to_vec()];
        let rows = vec![row(&[b"foo", b"10"]), row(&[b"bar", b"2"])];
        let text = render_csv(&header, &rows, b',').unwrap();
        assert_eq!(text, "name,price\nfoo,10\nbar,2\n");
    }

    #[test]
    fn keeps_field_bytes_verbatim() {
        let header = vec![b"v".to_vec()];
        let rows = vec![row(&[b" $1,200 "])];
        let text = render_csv(&header, &rows, b',').unwrap();
        assert_eq!(text, "v\n\" $1,200 \"\n");
    }

    #[test]
    fn honors_delimiter() {
        let header = vec![b"a".to_vec(), b"b".to_vec()];
        let rows = vec![row(&[b"1", b"2"])];
        let text = render_csv(&header, &rows, b'|').unwrap();
        assert_eq!(text, "a|b\n1|2\n");
    }

    #[test]
    fn empty_selection_is_header_only() {
        let header = vec![b"a".to_vec()];
        let text = render_csv(&header, &[], b',').unwrap();
        assert_eq!(text, "a\n");
    }
}
