use std::collections::HashMap;
use std::io::{self, BufRead};

use observability_deps::tracing::debug;

use crate::{LookupTable, cell::parse_cell, canonical_key, key::fold_key, row::split_row};

/// Tables parsed out of one source, keyed by folded canonical key
#[derive(Debug, Default)]
pub(crate) struct ParsedTables {
    pub(crate) tables: HashMap<String, LookupTable>,
    pub(crate) dropped_cells: usize,
}

/// Parse a whole lookup export.
///
/// The first line names one category per column; every later line contributes its non-blank
/// cells to the matching column. Columns are independent, rows may be ragged.
pub(crate) fn parse_tables(mut reader: impl BufRead) -> io::Result<ParsedTables> {
    let mut line = Vec::new();
    let Some(header) = read_line(&mut reader, &mut line)? else {
        return Ok(ParsedTables::default());
    };
    let header = header.strip_prefix('\u{feff}').unwrap_or(&header);
    if header.trim().is_empty() {
        return Ok(ParsedTables::default());
    }

    let headers = split_row(header);
    let mut columns: Vec<Vec<String>> = vec![vec![]; headers.len()];
    while let Some(row) = read_line(&mut reader, &mut line)? {
        for (column, cell) in columns.iter_mut().zip(split_row(&row)) {
            if !cell.trim().is_empty() {
                column.push(cell);
            }
        }
    }

    let mut parsed = ParsedTables::default();
    for (header, cells) in headers.iter().zip(columns) {
        let name = header.trim();
        if name.is_empty() || is_unnamed(name) {
            continue;
        }

        let mut entries = Vec::with_capacity(cells.len());
        for cell in &cells {
            match parse_cell(cell) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    debug!(column = name, cell = %cell, error = %e, "dropping lookup cell");
                    parsed.dropped_cells += 1;
                }
            }
        }

        let table = LookupTable::from_entries(name, entries);
        if table.is_empty() {
            debug!(column = name, "skipping empty lookup column");
            continue;
        }
        parsed.tables.insert(fold_key(&canonical_key(name)), table);
    }

    Ok(parsed)
}

/// Spreadsheet exports name sparse columns `Unnamed: 3`
fn is_unnamed(name: &str) -> bool {
    name.get(..8)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("unnamed:"))
}

/// Read one line without its terminator, replacing invalid UTF-8. A line ends at `\n`, `\r\n`
/// or a lone `\r`.
fn read_line(reader: &mut impl BufRead, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    let mut read_any = false;
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }
        read_any = true;

        match available.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                let terminator = available[end];
                buf.extend_from_slice(&available[..end]);
                reader.consume(end + 1);
                if terminator == b'\r' && reader.fill_buf()?.first() == Some(&b'\n') {
                    reader.consume(1);
                }
                break;
            }
            None => {
                let len = available.len();
                buf.extend_from_slice(available);
                reader.consume(len);
            }
        }
    }

    if !read_any {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}
