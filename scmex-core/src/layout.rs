//! Detection of the on-disk layout of a pipeline output root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::consts;
use crate::errors::{MexError, Result};

/// The two known directory conventions for the matrix export.
///
/// Newer pipeline versions write a single combined-modality directory whose
/// feature table carries a per-feature modality column; older versions write
/// one subdirectory per reference genome instead. The layout is resolved once
/// and everything downstream matches on it rather than re-probing the
/// filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixLayout {
    LegacyPerGenome,
    CombinedModality,
}

impl MatrixLayout {
    /// Determine the layout under `root` and return it together with the
    /// matrix directory. The combined layout wins when both are present.
    pub fn detect(root: &Path, use_filtered: bool) -> Result<(MatrixLayout, PathBuf)> {
        if !root.is_dir() {
            return Err(MexError::PathNotFound(root.to_path_buf()));
        }
        let outs = root.join(consts::OUTS_DIR);
        if !outs.is_dir() {
            return Err(MexError::PathNotFound(outs));
        }

        let combined = outs.join(match use_filtered {
            true => consts::FILTERED_FEATURE_DIR,
            false => consts::RAW_FEATURE_DIR,
        });
        if combined.is_dir() {
            return Ok((MatrixLayout::CombinedModality, combined));
        }

        let legacy = outs.join(match use_filtered {
            true => consts::FILTERED_GENE_DIR,
            false => consts::RAW_GENE_DIR,
        });
        if legacy.is_dir() {
            return Ok((MatrixLayout::LegacyPerGenome, legacy));
        }

        Err(MexError::PathNotFound(combined))
    }
}

/// Pick the genome subdirectory of a legacy-layout matrix directory.
///
/// Every immediate subdirectory is a candidate, listed in sorted order so
/// failures enumerate them deterministically. A requested genome must be
/// among the candidates; with no request there must be exactly one.
pub fn resolve_genome(matrix_dir: &Path, requested: Option<&str>) -> Result<PathBuf> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(matrix_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            candidates.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    candidates.sort();

    match requested {
        Some(genome) => {
            if candidates.iter().any(|c| c == genome) {
                Ok(matrix_dir.join(genome))
            } else {
                Err(MexError::UnknownGenome {
                    genome: genome.to_string(),
                    candidates,
                })
            }
        }
        None => match candidates.len() {
            1 => Ok(matrix_dir.join(&candidates[0])),
            _ => Err(MexError::AmbiguousGenome(candidates)),
        },
    }
}
