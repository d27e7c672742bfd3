use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use weeniefab_id::{Did, ParseDidError, parse_did};

#[derive(Debug, ValueEnum, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Format {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ArchiveIdsError {
    #[error("unable to read archive id list {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}:{line}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        source: ParseDidError,
    },
}

/// Read a newline separated list of ids, decimal or `0x` hex, standing in for the content
/// archive. Blank lines and lines starting with `#` are skipped.
pub(crate) fn load_archive_ids(path: &Path) -> Result<HashSet<Did>, ArchiveIdsError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ArchiveIdsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_archive_ids(&contents).map_err(|(line, source)| ArchiveIdsError::Parse {
        path: path.to_path_buf(),
        line,
        source,
    })
}

fn parse_archive_ids(contents: &str) -> Result<HashSet<Did>, (usize, ParseDidError)> {
    contents
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| parse_did(line).map_err(|e| (line_no, e)))
        .collect()
}
