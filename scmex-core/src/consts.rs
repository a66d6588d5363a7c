//! Fixed names used by the on-disk matrix export.

/// Subdirectory of the pipeline root that holds all run outputs.
pub const OUTS_DIR: &str = "outs";

/// Combined-modality matrix directories (newer pipeline versions).
pub const FILTERED_FEATURE_DIR: &str = "filtered_feature_bc_matrix";
pub const RAW_FEATURE_DIR: &str = "raw_feature_bc_matrix";

/// Per-genome matrix directories (legacy pipeline versions).
pub const FILTERED_GENE_DIR: &str = "filtered_gene_bc_matrices";
pub const RAW_GENE_DIR: &str = "raw_gene_bc_matrices";

pub const MATRIX_FILE: &str = "matrix.mtx";
pub const BARCODES_FILE: &str = "barcodes.tsv";
pub const FEATURES_FILE: &str = "features.tsv";
pub const GENES_FILE: &str = "genes.tsv";

/// Modality tag carried by expression features in combined-layout tables.
pub const GENE_EXPRESSION: &str = "Gene Expression";
