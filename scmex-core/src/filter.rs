//! Row filtering for combined-modality exports.

use sprs::TriMat;

use crate::consts::GENE_EXPRESSION;
use crate::table::FeatureRecord;

/// Keep only gene-expression rows, optionally restricted to one genome.
///
/// The genome restriction matches `genome` as a substring of the feature id,
/// since ids are genome-prefixed in multi-genome runs. When no gene-expression
/// id contains the genome string the run is not genome-prefixed at all; the
/// restriction is then skipped with a note instead of emptying the dataset.
///
/// Kept rows are reindexed contiguously from 0, and the surviving feature
/// records drop their modality. `features` must describe the matrix rows
/// one-to-one.
pub fn keep_expression_rows(
    matrix: &TriMat<f64>,
    features: &[FeatureRecord],
    genome: Option<&str>,
) -> (TriMat<f64>, Vec<FeatureRecord>) {
    debug_assert_eq!(matrix.rows(), features.len());

    let mut keep: Vec<bool> = features
        .iter()
        .map(|f| f.modality.as_deref() == Some(GENE_EXPRESSION))
        .collect();

    if let Some(genome) = genome {
        let restricted: Vec<bool> = features
            .iter()
            .zip(&keep)
            .map(|(f, &kept)| kept && f.id.contains(genome))
            .collect();
        if restricted.iter().any(|&kept| kept) {
            keep = restricted;
        } else {
            eprintln!(
                "Note: no gene-expression feature id contains genome {genome:?}; keeping all gene-expression rows"
            );
        }
    }

    // contiguous new indices for the kept rows
    let mut remap: Vec<Option<usize>> = Vec::with_capacity(keep.len());
    let mut kept_rows = 0usize;
    for &kept in &keep {
        remap.push(match kept {
            true => {
                kept_rows += 1;
                Some(kept_rows - 1)
            }
            false => None,
        });
    }

    let mut filtered = TriMat::with_capacity((kept_rows, matrix.cols()), matrix.nnz());
    for (value, (row, col)) in matrix.triplet_iter() {
        if let Some(new_row) = remap[row] {
            filtered.add_triplet(new_row, col, *value);
        }
    }

    let kept_features = features
        .iter()
        .zip(&keep)
        .filter(|&(_, &kept)| kept)
        .map(|(f, _)| FeatureRecord {
            id: f.id.clone(),
            name: f.name.clone(),
            modality: None,
        })
        .collect();

    (filtered, kept_features)
}
