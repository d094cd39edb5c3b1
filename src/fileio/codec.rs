//! Text <-> table conversion.
//!
//! The default `Literal` mode is a plain split: no quoting, blank lines are
//! dropped, and a delimiter inside a cell is written back verbatim (and so
//! splits that cell on the next load). `Rfc4180` goes through the `csv`
//! crate instead for files that rely on quoted fields.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteMode {
    #[default]
    Literal,
    Rfc4180,
}

impl QuoteMode {
    pub fn parse(self, text: &str, delimiter: char) -> Result<Table> {
        match self {
            QuoteMode::Literal => Ok(parse(text, delimiter)),
            QuoteMode::Rfc4180 => parse_quoted(text, delimiter),
        }
    }

    pub fn serialize(self, table: &Table, delimiter: char) -> Result<String> {
        match self {
            QuoteMode::Literal => Ok(serialize(table, delimiter)),
            QuoteMode::Rfc4180 => serialize_quoted(table, delimiter),
        }
    }
}

/// Split `text` into rows on `\n` / `\r\n`, dropping empty lines, and each
/// row into cells on `delimiter`
pub fn parse(text: &str, delimiter: char) -> Table {
    let rows = text
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| line.split(delimiter).map(str::to_string).collect())
        .collect();
    Table::new(rows)
}

/// Join cells with `delimiter` and rows with `\n`. Newlines inside a cell
/// become a space; nothing else is escaped. No trailing newline.
pub fn serialize(table: &Table, delimiter: char) -> String {
    let mut delim_buf = [0u8; 4];
    let delim: &str = delimiter.encode_utf8(&mut delim_buf);

    table
        .rows_iter()
        .map(|row| {
            row.iter()
                .map(|cell| flatten_newlines(cell))
                .collect::<Vec<_>>()
                .join(delim)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn flatten_newlines(cell: &str) -> String {
    cell.replace('\n', " ")
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| TableError::Config(format!("delimiter {:?} is not ASCII", delimiter)))
}

pub fn parse_quoted(text: &str, delimiter: char) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte(delimiter)?)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| TableError::Parse {
            line: e.position().map_or(idx as u64 + 1, |p| p.line()) as usize,
            message: e.to_string(),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(Table::new(rows))
}

pub fn serialize_quoted(table: &Table, delimiter: char) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter_byte(delimiter)?)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    for row in table.rows_iter() {
        writer
            .write_record(row.iter().map(|cell| flatten_newlines(cell)))
            .map_err(|e| TableError::Encode(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TableError::Encode(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| TableError::Encode(e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(data: Vec<Vec<&str>>) -> Vec<Vec<String>> {
        data.into_iter()
            .map(|row| row.into_iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_parse_simple() {
        let table = parse("a,b\nc,d", ',');
        assert_eq!(table.clone_all_rows(), grid(vec![vec!["a", "b"], vec!["c", "d"]]));
    }

    #[test]
    fn test_serialize_simple() {
        let table = Table::new(grid(vec![vec!["a", "b"], vec!["c", "d"]]));
        assert_eq!(serialize(&table, ','), "a,b\nc,d");
    }

    #[test]
    fn test_parse_crlf_and_blank_lines() {
        let table = parse("a,b\r\n\r\nc,d\n\n", ',');
        assert_eq!(table.clone_all_rows(), grid(vec![vec!["a", "b"], vec!["c", "d"]]));
    }

    #[test]
    fn test_parse_tab() {
        let table = parse("x\ty\tz\n1\t2", '\t');
        assert_eq!(table.clone_all_rows(), grid(vec![vec!["x", "y", "z"], vec!["1", "2"]]));
    }

    #[test]
    fn test_parse_ignores_quotes() {
        let table = parse("\"a,b\",c", ',');
        assert_eq!(table.clone_all_rows(), grid(vec![vec!["\"a", "b\"", "c"]]));
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse("", ',').is_empty());
        assert!(parse("\n\r\n\n", ',').is_empty());
    }

    #[test]
    fn test_serialize_flattens_newlines() {
        let table = Table::new(grid(vec![vec!["line one\nline two", "b"]]));
        assert_eq!(serialize(&table, ','), "line one line two,b");
    }

    #[test]
    fn test_serialize_does_not_escape_delimiter() {
        let table = Table::new(grid(vec![vec!["a,b", "c"]]));
        let text = serialize(&table, ',');
        assert_eq!(text, "a,b,c");
        assert_eq!(parse(&text, ',').row_len(0), 3);
    }

    #[test]
    fn test_reparse_is_stable() {
        let first = parse("h1,h2,h3\r\n1,2\n\n3,4,5,6\n", ',');
        let second = parse(&serialize(&first, ','), ',');
        assert_eq!(first, second);
    }

    #[test]
    fn test_quoted_keeps_embedded_delimiter() {
        let table = parse_quoted("\"a,b\",c\nd,e", ',').unwrap();
        assert_eq!(table.clone_all_rows(), grid(vec![vec!["a,b", "c"], vec!["d", "e"]]));

        let text = serialize_quoted(&table, ',').unwrap();
        assert_eq!(text, "\"a,b\",c\nd,e");
    }

    #[test]
    fn test_quoted_ragged_rows() {
        let table = Table::new(grid(vec![vec!["a", "b", "c"], vec!["d"]]));
        let text = QuoteMode::Rfc4180.serialize(&table, '\t').unwrap();
        assert_eq!(text, "a\tb\tc\nd");
        assert_eq!(QuoteMode::Rfc4180.parse(&text, '\t').unwrap(), table);
    }

    #[test]
    fn test_quoted_flattens_newlines() {
        let table = Table::new(grid(vec![vec!["x\ny", "z"]]));
        assert_eq!(serialize_quoted(&table, ',').unwrap(), "x y,z");
    }

    #[test]
    fn test_non_ascii_delimiter_rejected_when_quoted() {
        let err = parse_quoted("a;b", '§').unwrap_err();
        assert!(matches!(err, TableError::Config(_)));
    }

    #[test]
    fn test_literal_mode_dispatch() {
        let table = QuoteMode::Literal.parse("a|b", '|').unwrap();
        assert_eq!(QuoteMode::Literal.serialize(&table, '|').unwrap(), "a|b");
    }
}
