//! Table load and save: delimiter validation, line parsing, and shape
//! normalization.

use std::path::Path;

use crate::error::{GridbatchError, Result};
use crate::scan::{self, QuoteScan};
use crate::table::{Cell, Row, Table};

/// Bytes that may never appear in a delimiter alphabet.
const FORBIDDEN_DELIMS: &[u8] = b"\"'\\";

/// Validate a delimiter alphabet: non-empty, ASCII, and free of quote and
/// backslash bytes. The first byte is the canonical delimiter used on
/// output; the rest are normalized to it at load time.
pub fn check_delims(delims: &str) -> Result<()> {
    let valid = !delims.is_empty()
        && delims
            .bytes()
            .all(|b| b.is_ascii() && !FORBIDDEN_DELIMS.contains(&b));
    if valid {
        Ok(())
    } else {
        Err(GridbatchError::InvalidDelimiter(delims.to_string()))
    }
}

/// Load a table from `path` using the given delimiter alphabet.
pub fn load(path: &Path, delims: &str) -> Result<Table> {
    let content = std::fs::read_to_string(path).map_err(|source| GridbatchError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_content(&content, delims))
}

/// Parse table text: one row per line (trailing `\r` stripped), cells split
/// on the primary delimiter after every separator occurrence of a secondary
/// delimiter has been normalized to it. Cell text is stored verbatim.
///
/// The delimiter alphabet must have passed [`check_delims`].
pub fn parse_content(content: &str, delims: &str) -> Table {
    let primary = delims.as_bytes()[0];
    let mut table = Table::new(primary);

    for line in content.lines() {
        let normalized = normalize_delims(line, delims);
        let cells = scan::split(&normalized, primary, false)
            .into_iter()
            .map(Cell::from_text)
            .collect();
        table.push_row(Row::from_cells(cells));
    }

    table.normalize();
    table
}

/// Replace separator occurrences of secondary delimiters with the primary
/// one. Quoted and escaped occurrences stay put.
fn normalize_delims(line: &str, delims: &str) -> String {
    let alphabet = delims.as_bytes();
    if alphabet.len() == 1 {
        return line.to_string();
    }

    let mut bytes = line.as_bytes().to_vec();
    for b in QuoteScan::new(line) {
        if alphabet[1..].contains(&b.byte) && b.separates(b.byte, false) {
            bytes[b.index] = alphabet[0];
        }
    }
    // Delimiters are ASCII, so the substitution cannot break UTF-8.
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Render the table: one line per row, cells joined by the primary
/// delimiter, `\n` line endings.
pub fn write_content(table: &Table) -> String {
    let delim = table.delim() as char;
    let mut out = String::new();
    for row in table.iter_rows() {
        let mut first = true;
        for cell in row.cells() {
            if !first {
                out.push(delim);
            }
            first = false;
            out.push_str(cell.as_str());
        }
        out.push('\n');
    }
    out
}

/// Save the table to `path`.
pub fn save(table: &Table, path: &Path) -> Result<()> {
    std::fs::write(path, write_content(table)).map_err(|source| GridbatchError::FileOpen {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_delims() {
        assert!(check_delims(",").is_ok());
        assert!(check_delims(" ;|").is_ok());
        assert!(check_delims("").is_err());
        assert!(check_delims("\"").is_err());
        assert!(check_delims("'").is_err());
        assert!(check_delims("\\").is_err());
        assert!(check_delims(",é").is_err());
    }

    #[test]
    fn test_parse_simple() {
        let table = parse_content("a,b,c\nd,e,f\n", ",");
        assert_eq!(table.rows(), 2);
        assert_eq!(table.cols(), 3);
        assert_eq!(table.cell(1, 1).unwrap().as_str(), "e");
    }

    #[test]
    fn test_parse_keeps_quoted_delimiters_in_cell() {
        let table = parse_content("\"a,b\",c\n", ",");
        assert_eq!(table.cols(), 2);
        assert_eq!(table.cell(0, 0).unwrap().as_str(), "\"a,b\"");
        assert_eq!(table.cell(0, 1).unwrap().as_str(), "c");
    }

    #[test]
    fn test_parse_keeps_escaped_delimiters_in_cell() {
        let table = parse_content("a\\,b,c\n", ",");
        assert_eq!(table.cols(), 2);
        assert_eq!(table.cell(0, 0).unwrap().as_str(), "a\\,b");
    }

    #[test]
    fn test_parse_normalizes_secondary_delimiters() {
        let table = parse_content("a|b,c\n", ",|");
        assert_eq!(table.cols(), 3);
        assert_eq!(table.cell(0, 0).unwrap().as_str(), "a");
        assert_eq!(table.cell(0, 1).unwrap().as_str(), "b");
    }

    #[test]
    fn test_parse_quoted_secondary_delimiter_stays() {
        let table = parse_content("\"a|b\",c\n", ",|");
        assert_eq!(table.cols(), 2);
        assert_eq!(table.cell(0, 0).unwrap().as_str(), "\"a|b\"");
    }

    #[test]
    fn test_parse_pads_and_trims() {
        let table = parse_content("a,b,c\nd\n", ",");
        assert_eq!(table.cols(), 3);
        assert_eq!(table.cell(1, 2).unwrap().as_str(), "");

        let trimmed = parse_content("a,,\nb,,\n", ",");
        assert_eq!(trimmed.cols(), 1);
    }

    #[test]
    fn test_parse_strips_crlf() {
        let table = parse_content("a,b\r\nc,d\r\n", ",");
        assert_eq!(table.cell(0, 1).unwrap().as_str(), "b");
        assert_eq!(table.cell(1, 1).unwrap().as_str(), "d");
    }

    #[test]
    fn test_parse_empty_input() {
        let table = parse_content("", ",");
        assert_eq!(table.rows(), 0);
        assert_eq!(table.cols(), 0);
        assert_eq!(write_content(&table), "");
    }

    #[test]
    fn test_round_trip() {
        let input = "a,b,c\nd,e,f\n";
        let table = parse_content(input, ",");
        assert_eq!(write_content(&table), input);
    }

    #[test]
    fn test_round_trip_quoted_and_escaped() {
        let input = "\"a,b\",'c,d',e\\,f\nx,y,z\n";
        let table = parse_content(input, ",");
        assert_eq!(write_content(&table), input);
    }

    #[test]
    fn test_write_uses_primary_delimiter() {
        let table = parse_content("a b;c\n", " ;");
        assert_eq!(write_content(&table), "a b c\n");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/gridbatch-input"), ",").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
