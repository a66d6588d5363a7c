//! Boundary types for handing a [`Dataset`] to a downstream modeling
//! constructor.
//!
//! The loader stays free of any modeling library's type system; whatever
//! container that library expects is built from these plain values at the
//! call site.

use std::collections::HashMap;
use std::str::FromStr;

use crate::dataset::Dataset;
use crate::errors::{MexError, Result};

/// Expression-response distribution family expected by the downstream model.
///
/// The family is always chosen explicitly by the caller; [`Default`] exists
/// for convenience, not as a hidden fallback inside the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpressionFamily {
    /// Negative binomial with per-gene size estimation, the usual choice for
    /// UMI counts.
    #[default]
    NegBinomialSize,
    NegBinomial,
    /// Censored normal, for already log-transformed expression values.
    Tobit,
    Gaussian,
}

impl FromStr for ExpressionFamily {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "negbinomial.size" | "negbinomial-size" => Ok(ExpressionFamily::NegBinomialSize),
            "negbinomial" => Ok(ExpressionFamily::NegBinomial),
            "tobit" => Ok(ExpressionFamily::Tobit),
            "gaussian" => Ok(ExpressionFamily::Gaussian),
            _ => Err(format!("unknown expression family: {s}")),
        }
    }
}

/// Per-cell annotation table keyed by barcode id.
#[derive(Debug, Clone, Default)]
pub struct CellMetadata {
    columns: Vec<String>,
    rows: HashMap<String, Vec<String>>,
}

impl CellMetadata {
    pub fn new(columns: Vec<String>, rows: HashMap<String, Vec<String>>) -> Self {
        CellMetadata { columns, rows }
    }

    /// Minimal metadata: one `barcode` column, one row per barcode.
    pub fn from_barcodes(barcodes: &[String]) -> Self {
        let rows = barcodes
            .iter()
            .map(|b| (b.clone(), vec![b.clone()]))
            .collect();
        CellMetadata {
            columns: vec!["barcode".to_string()],
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get(&self, barcode: &str) -> Option<&[String]> {
        self.rows.get(barcode).map(Vec::as_slice)
    }
}

/// Everything the downstream dataset constructor needs, in one owned value.
///
/// [`ModelInput::new`] checks that the metadata covers every cell before
/// handing ownership over.
#[derive(Debug)]
pub struct ModelInput {
    pub dataset: Dataset,
    pub cell_metadata: CellMetadata,
    pub lower_detection_limit: f64,
    pub family: ExpressionFamily,
}

impl ModelInput {
    pub fn new(
        dataset: Dataset,
        cell_metadata: CellMetadata,
        lower_detection_limit: f64,
        family: ExpressionFamily,
    ) -> Result<ModelInput> {
        for barcode in &dataset.barcodes {
            if cell_metadata.get(barcode).is_none() {
                return Err(MexError::MissingCellMetadata(barcode.clone()));
            }
        }
        Ok(ModelInput {
            dataset,
            cell_metadata,
            lower_detection_limit,
            family,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::FeatureRecord;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use sprs::TriMat;
    use std::path::Path;

    fn tiny_dataset() -> Dataset {
        let matrix = TriMat::with_capacity((1, 2), 0);
        let features = vec![FeatureRecord {
            id: "G1".to_string(),
            name: "g1".to_string(),
            modality: None,
        }];
        let barcodes = vec!["AAAC".to_string(), "GGGT".to_string()];
        Dataset::assemble(
            matrix,
            features,
            barcodes,
            Path::new("matrix.mtx"),
            Path::new("features.tsv"),
            Path::new("barcodes.tsv"),
        )
        .unwrap()
    }

    #[rstest]
    #[case("negbinomial.size", ExpressionFamily::NegBinomialSize)]
    #[case("negbinomial", ExpressionFamily::NegBinomial)]
    #[case("Tobit", ExpressionFamily::Tobit)]
    #[case("gaussian", ExpressionFamily::Gaussian)]
    fn family_parses_from_str(#[case] input: &str, #[case] expected: ExpressionFamily) {
        assert_eq!(input.parse::<ExpressionFamily>().unwrap(), expected);
    }

    #[rstest]
    fn unknown_family_is_rejected() {
        assert!("poisson".parse::<ExpressionFamily>().is_err());
    }

    #[rstest]
    fn metadata_must_cover_every_barcode() {
        let dataset = tiny_dataset();
        let metadata = CellMetadata::from_barcodes(&["AAAC".to_string()]);
        let err = ModelInput::new(dataset, metadata, 0.5, ExpressionFamily::default()).unwrap_err();
        assert!(matches!(err, MexError::MissingCellMetadata(b) if b == "GGGT"));
    }

    #[rstest]
    fn minimal_metadata_satisfies_the_check() {
        let dataset = tiny_dataset();
        let metadata = CellMetadata::from_barcodes(&dataset.barcodes);
        let input = ModelInput::new(dataset, metadata, 1.0, ExpressionFamily::Tobit).unwrap();
        assert_eq!(input.family, ExpressionFamily::Tobit);
        assert_eq!(input.cell_metadata.get("AAAC"), Some(&["AAAC".to_string()][..]));
    }
}
