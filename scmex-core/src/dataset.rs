//! Dataset assembly and the top-level load pipeline.

use std::path::Path;

use sprs::{CsMat, TriMat};

use crate::consts;
use crate::errors::{MexError, Result};
use crate::filter::keep_expression_rows;
use crate::layout::{self, MatrixLayout};
use crate::mtx::read_mtx;
use crate::table::{FeatureRecord, make_unique, read_barcodes, read_features};
use crate::utils::find_input_file;

/// Options accepted by [`load_pipeline_output`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Reference genome to select (legacy layout) or restrict to (combined
    /// layout). Required under the legacy layout only when several genomes
    /// coexist.
    pub genome: Option<String>,
    /// Load the filtered cell set rather than the raw one.
    pub use_filtered: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            genome: None,
            use_filtered: true,
        }
    }
}

/// A features-by-cells count matrix with aligned annotations.
///
/// Row `i` of `matrix` is described by `features[i]` and column `j` belongs
/// to `barcodes[j]`; alignment is positional, not keyed. Construction goes
/// through [`Dataset::assemble`], which rejects any shape disagreement, so a
/// `Dataset` in hand is always consistent.
#[derive(Debug)]
pub struct Dataset {
    pub matrix: TriMat<f64>,
    pub features: Vec<FeatureRecord>,
    pub barcodes: Vec<String>,
}

impl Dataset {
    /// Final consistency gate: the matrix dimensions must agree with both
    /// annotation tables. Failures name the matrix file and the offending
    /// table file.
    pub fn assemble(
        matrix: TriMat<f64>,
        features: Vec<FeatureRecord>,
        barcodes: Vec<String>,
        matrix_path: &Path,
        features_path: &Path,
        barcodes_path: &Path,
    ) -> Result<Dataset> {
        if matrix.rows() != features.len() {
            return Err(MexError::DimensionMismatch {
                matrix: matrix_path.to_path_buf(),
                table: features_path.to_path_buf(),
                axis: "rows",
                declared: matrix.rows(),
                found: features.len(),
            });
        }
        if matrix.cols() != barcodes.len() {
            return Err(MexError::DimensionMismatch {
                matrix: matrix_path.to_path_buf(),
                table: barcodes_path.to_path_buf(),
                axis: "columns",
                declared: matrix.cols(),
                found: barcodes.len(),
            });
        }
        Ok(Dataset {
            matrix,
            features,
            barcodes,
        })
    }

    /// Number of features (matrix rows).
    pub fn num_features(&self) -> usize {
        self.matrix.rows()
    }

    /// Number of cells (matrix columns).
    pub fn num_cells(&self) -> usize {
        self.matrix.cols()
    }

    /// Compressed row form for downstream consumers.
    pub fn to_csr(&self) -> CsMat<f64> {
        self.matrix.to_csr()
    }
}

/// Load one pipeline output directory into a [`Dataset`].
///
/// Detects the directory layout, resolves the genome when the layout is
/// genome-partitioned, parses the three export files (gzip is tolerated
/// under the combined layout), disambiguates duplicate identifiers, filters
/// non-expression modalities where applicable, and runs the final shape
/// checks.
pub fn load_pipeline_output(root: &Path, options: &LoadOptions) -> Result<Dataset> {
    let (matrix_layout, matrix_dir) = MatrixLayout::detect(root, options.use_filtered)?;

    let data_dir = match matrix_layout {
        MatrixLayout::LegacyPerGenome => {
            layout::resolve_genome(&matrix_dir, options.genome.as_deref())?
        }
        MatrixLayout::CombinedModality => matrix_dir,
    };

    let allow_gz = matrix_layout == MatrixLayout::CombinedModality;
    let features_name = match matrix_layout {
        MatrixLayout::LegacyPerGenome => consts::GENES_FILE,
        MatrixLayout::CombinedModality => consts::FEATURES_FILE,
    };
    let matrix_path = find_input_file(&data_dir, consts::MATRIX_FILE, allow_gz)?;
    let features_path = find_input_file(&data_dir, features_name, allow_gz)?;
    let barcodes_path = find_input_file(&data_dir, consts::BARCODES_FILE, allow_gz)?;

    let matrix = read_mtx(&matrix_path)?;
    let mut features = read_features(&features_path, matrix_layout)?;
    let barcodes = make_unique(&read_barcodes(&barcodes_path)?);

    // duplicate ids are disambiguated before any filtering so the suffixes
    // do not depend on which rows survive
    let ids: Vec<String> = features.iter().map(|f| f.id.clone()).collect();
    for (feature, id) in features.iter_mut().zip(make_unique(&ids)) {
        feature.id = id;
    }

    let (matrix, features) = match matrix_layout {
        MatrixLayout::CombinedModality => {
            // the keep-mask is positional, so the row count must already
            // agree with the feature table here
            if matrix.rows() != features.len() {
                return Err(MexError::DimensionMismatch {
                    matrix: matrix_path.clone(),
                    table: features_path.clone(),
                    axis: "rows",
                    declared: matrix.rows(),
                    found: features.len(),
                });
            }
            keep_expression_rows(&matrix, &features, options.genome.as_deref())
        }
        MatrixLayout::LegacyPerGenome => (matrix, features),
    };

    Dataset::assemble(
        matrix,
        features,
        barcodes,
        &matrix_path,
        &features_path,
        &barcodes_path,
    )
}
