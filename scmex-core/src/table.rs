//! Feature and barcode table parsing, plus identifier disambiguation.

use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::Path;

use crate::errors::{MexError, Result};
use crate::layout::MatrixLayout;
use crate::utils::get_dynamic_reader;

/// One row of the feature annotation table, in file order.
///
/// File order is the matrix row order, so the position of a record is its
/// row index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub id: String,
    pub name: String,
    /// Present only for combined-layout input; the modality filter drops it
    /// from its output records.
    pub modality: Option<String>,
}

fn parse_error(path: &Path, line: usize, message: impl Into<String>) -> MexError {
    MexError::Parse {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

/// Read the feature table: `id \t name` under the legacy layout,
/// `id \t name \t modality` under the combined one. A row missing a required
/// column is a parse error; extra trailing columns are ignored.
pub fn read_features(path: &Path, layout: MatrixLayout) -> Result<Vec<FeatureRecord>> {
    let reader = get_dynamic_reader(path)?;
    let mut features = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let mut fields = line.split('\t');
        let id = match fields.next().filter(|f| !f.is_empty()) {
            Some(id) => id,
            None => return Err(parse_error(path, idx + 1, "missing feature id column")),
        };
        let name = match fields.next() {
            Some(name) => name,
            None => return Err(parse_error(path, idx + 1, "missing feature name column")),
        };
        let modality = match layout {
            MatrixLayout::LegacyPerGenome => None,
            MatrixLayout::CombinedModality => match fields.next() {
                Some(modality) => Some(modality.to_string()),
                None => return Err(parse_error(path, idx + 1, "missing modality column")),
            },
        };
        features.push(FeatureRecord {
            id: id.to_string(),
            name: name.to_string(),
            modality,
        });
    }
    Ok(features)
}

/// Read the barcode list, one identifier per line, in file order. File order
/// is the matrix column order. An empty line is a parse error.
pub fn read_barcodes(path: &Path) -> Result<Vec<String>> {
    let reader = get_dynamic_reader(path)?;
    let mut barcodes = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            return Err(parse_error(path, idx + 1, "empty barcode line"));
        }
        barcodes.push(line);
    }
    Ok(barcodes)
}

/// Disambiguate repeated identifiers while preserving order.
///
/// The first occurrence of a value keeps its name; later occurrences get a
/// `.1`, `.2`, … counter scoped to that value. A generated name that would
/// collide with another input value is skipped by advancing the counter, so
/// the output is globally unique. Pure and deterministic: downstream
/// filtering re-derives positional alignment from it.
pub fn make_unique(names: &[String]) -> Vec<String> {
    // reserve every literal spelling up front so suffixed names never
    // shadow a later literal
    let mut reserved: HashSet<String> = names.iter().cloned().collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(names.len());
    let mut counters: HashMap<&str, usize> = HashMap::new();
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        if seen.insert(name.as_str()) {
            out.push(name.clone());
            continue;
        }
        let counter = counters.entry(name.as_str()).or_insert(0);
        let unique = loop {
            *counter += 1;
            let candidate = format!("{}.{}", name, counter);
            if !reserved.contains(&candidate) {
                break candidate;
            }
        };
        reserved.insert(unique.clone());
        out.push(unique);
    }
    out
}
