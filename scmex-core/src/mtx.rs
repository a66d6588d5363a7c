//! MatrixMarket coordinate-format parsing.

use std::io::BufRead;
use std::path::Path;

use sprs::TriMat;

use crate::errors::{MexError, Result};
use crate::utils::get_dynamic_reader;

fn parse_error(path: &Path, line: usize, message: impl Into<String>) -> MexError {
    MexError::Parse {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

/// Read a MatrixMarket coordinate file into triplet form, preserving the
/// declared dimensions exactly.
///
/// Accepts `integer` and `real` fields with `general` symmetry; values are
/// widened to `f64` either way. Coordinates are 1-indexed in the file and
/// must lie inside the declared dimensions. The entry count must match the
/// declared one exactly.
pub fn read_mtx(path: &Path) -> Result<TriMat<f64>> {
    let reader = get_dynamic_reader(path)?;
    let mut lines = reader.lines();
    let mut lineno = 0usize;

    let banner = match lines.next() {
        Some(line) => {
            lineno += 1;
            line?
        }
        None => return Err(parse_error(path, 1, "empty file")),
    };
    match banner.split_whitespace().collect::<Vec<_>>().as_slice() {
        ["%%MatrixMarket", "matrix", "coordinate", "integer" | "real", "general"] => {}
        _ => {
            return Err(parse_error(
                path,
                1,
                format!("unsupported MatrixMarket banner: {banner:?}"),
            ));
        }
    }

    // comment lines, then the declared dimensions
    let (nrows, ncols, nnz) = loop {
        let line = match lines.next() {
            Some(line) => {
                lineno += 1;
                line?
            }
            None => return Err(parse_error(path, lineno, "missing dimension line")),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        break parse_dims(path, lineno, trimmed)?;
    };

    let mut matrix = TriMat::with_capacity((nrows, ncols), nnz);
    let mut parsed = 0usize;
    for line in lines {
        lineno += 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if parsed == nnz {
            return Err(parse_error(
                path,
                lineno,
                format!("more than the declared {nnz} entries"),
            ));
        }
        let (row, col, value) = parse_entry(path, lineno, trimmed, nrows, ncols)?;
        matrix.add_triplet(row, col, value);
        parsed += 1;
    }
    if parsed != nnz {
        return Err(parse_error(
            path,
            lineno,
            format!("expected {nnz} entries, found {parsed}"),
        ));
    }

    Ok(matrix)
}

fn parse_dims(path: &Path, lineno: usize, line: &str) -> Result<(usize, usize, usize)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(parse_error(
            path,
            lineno,
            "expected `rows cols entries` dimension line",
        ));
    }
    let parse = |field: &str| {
        field
            .parse::<usize>()
            .map_err(|_| parse_error(path, lineno, format!("invalid dimension: {field:?}")))
    };
    Ok((parse(fields[0])?, parse(fields[1])?, parse(fields[2])?))
}

fn parse_entry(
    path: &Path,
    lineno: usize,
    line: &str,
    nrows: usize,
    ncols: usize,
) -> Result<(usize, usize, f64)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(parse_error(path, lineno, "expected `row col value` entry"));
    }
    let row: usize = fields[0]
        .parse()
        .map_err(|_| parse_error(path, lineno, format!("invalid row index: {:?}", fields[0])))?;
    let col: usize = fields[1]
        .parse()
        .map_err(|_| parse_error(path, lineno, format!("invalid column index: {:?}", fields[1])))?;
    let value: f64 = fields[2]
        .parse()
        .map_err(|_| parse_error(path, lineno, format!("invalid value: {:?}", fields[2])))?;
    if row < 1 || row > nrows || col < 1 || col > ncols {
        return Err(parse_error(
            path,
            lineno,
            format!("coordinate ({row}, {col}) outside declared {nrows}x{ncols} matrix"),
        ));
    }
    Ok((row - 1, col - 1, value))
}
