//! Parsing of a single `id [separator] label` cell.
use weeniefab_id::{parse_hex_u32, strip_hex_prefix};

use crate::LookupEntry;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CellError {
    #[error("blank cell")]
    Blank,

    #[error("'{id}' is not a numeric id")]
    InvalidId { id: String },
}

/// Parse one lookup cell into a [`LookupEntry`].
///
/// Accepted shapes are `123 - Label`, `0x1F - Label`, `123,Label`, `123 Label` and a bare
/// `123`. The separator is the first hyphen, else the first comma, else the first space; a
/// separator in the leading position does not count, so `-5 Label` has id `-5`. A missing label
/// falls back to the decimal id.
pub fn parse_cell(cell: &str) -> Result<LookupEntry, CellError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Err(CellError::Blank);
    }

    let (id_part, label_part) = split_cell(cell);
    let id = parse_id(id_part).ok_or_else(|| CellError::InvalidId {
        id: id_part.to_string(),
    })?;

    let label = if label_part.is_empty() {
        id.to_string()
    } else {
        label_part.to_string()
    };

    Ok(LookupEntry { id, label })
}

fn split_cell(cell: &str) -> (&str, &str) {
    let separator = ['-', ',', ' ']
        .into_iter()
        .find_map(|sep| cell.find(sep).filter(|&idx| idx > 0));

    match separator {
        // all separators are single byte
        Some(idx) => (cell[..idx].trim(), cell[idx + 1..].trim()),
        None => (cell, ""),
    }
}

/// Hex ids are read as a 32-bit pattern, so `0xFFFFFFFF` is `-1`.
fn parse_id(id_part: &str) -> Option<i32> {
    match strip_hex_prefix(id_part) {
        Some(digits) => parse_hex_u32(digits).map(|bits| bits as i32),
        None => id_part.parse().ok(),
    }
}
