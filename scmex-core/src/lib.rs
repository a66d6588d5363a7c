//! # Loader for sparse feature-barcode matrix exports.
//!
//! Single-cell quantification pipelines export their count matrix as three
//! files: a MatrixMarket coordinate matrix, a feature annotation table, and a
//! barcode list. This crate locates that export under a pipeline output root,
//! detects which of the two known directory layouts is present (the legacy
//! per-genome one or the newer combined-modality one), keeps only
//! gene-expression rows where modalities are mixed, and assembles everything
//! into one shape-checked [`Dataset`](dataset::Dataset).
//!
pub mod adapter;
pub mod consts;
pub mod dataset;
pub mod errors;
pub mod filter;
pub mod layout;
pub mod mtx;
pub mod table;
pub mod utils;

// re-expose core functions
pub use adapter::*;
pub use consts::*;
pub use dataset::*;
pub use errors::*;
pub use filter::*;
pub use layout::*;
pub use mtx::*;
pub use table::*;
