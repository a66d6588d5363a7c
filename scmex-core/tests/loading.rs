//! End-to-end loading over synthesized pipeline output directories.

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;

use scmex_core::{Dataset, LoadOptions, MexError, load_pipeline_output};

fn write_gz(path: &Path, content: &str) {
    let file = fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

/// Legacy tree with one genome: 5 genes, 5 barcodes (one duplicated), a
/// diagonal 5x5 matrix.
fn legacy_root() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("outs/filtered_gene_bc_matrices/mm10");
    fs::create_dir_all(&dir).unwrap();

    let genes: String = (1..=5)
        .map(|i| format!("ENSMUSG0{i}\tGene{i}\n"))
        .collect();
    fs::write(dir.join("genes.tsv"), genes).unwrap();
    fs::write(dir.join("barcodes.tsv"), "c1\nc1\nc2\nc3\nc4\n").unwrap();

    let mut mtx = String::from("%%MatrixMarket matrix coordinate integer general\n5 5 5\n");
    for i in 1..=5 {
        mtx.push_str(&format!("{i} {i} {i}\n"));
    }
    fs::write(dir.join("matrix.mtx"), mtx).unwrap();
    root
}

/// Combined tree, fully gzipped, with genome-prefixed mixed-modality
/// features: 3 gene-expression rows (two hg19, one mm10) and one antibody
/// row, over 2 cells.
fn combined_root() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("outs/filtered_feature_bc_matrix");
    fs::create_dir_all(&dir).unwrap();

    write_gz(
        &dir.join("features.tsv.gz"),
        "hg19_ENSG01\tGENE1\tGene Expression\n\
         hg19_ENSG02\tGENE2\tGene Expression\n\
         mm10_ENSMUSG01\tGene1\tGene Expression\n\
         AB01\tCD3\tAntibody Capture\n",
    );
    write_gz(&dir.join("barcodes.tsv.gz"), "AAAC-1\nGGGT-1\n");
    write_gz(
        &dir.join("matrix.mtx.gz"),
        "%%MatrixMarket matrix coordinate integer general\n\
         4 2 5\n\
         1 1 3\n\
         2 1 1\n\
         3 2 9\n\
         4 1 7\n\
         4 2 2\n",
    );
    root
}

fn entries(dataset: &Dataset) -> Vec<(usize, usize, f64)> {
    dataset
        .matrix
        .triplet_iter()
        .map(|(v, (r, c))| (r, c, *v))
        .collect()
}

#[test]
fn legacy_layout_loads_with_disambiguated_barcodes() {
    let root = legacy_root();
    let dataset = load_pipeline_output(root.path(), &LoadOptions::default()).unwrap();

    assert_eq!(dataset.num_features(), 5);
    assert_eq!(dataset.num_cells(), 5);
    assert_eq!(dataset.barcodes, vec!["c1", "c1.1", "c2", "c3", "c4"]);
    assert_eq!(dataset.features[0].id, "ENSMUSG01");
    assert!(dataset.features.iter().all(|f| f.modality.is_none()));
}

#[test]
fn legacy_layout_accepts_an_explicit_genome() {
    let root = legacy_root();
    let options = LoadOptions {
        genome: Some("mm10".to_string()),
        ..LoadOptions::default()
    };
    let dataset = load_pipeline_output(root.path(), &options).unwrap();
    assert_eq!(dataset.num_features(), 5);
}

#[test]
fn legacy_layout_rejects_an_unknown_genome() {
    let root = legacy_root();
    let options = LoadOptions {
        genome: Some("hg19".to_string()),
        ..LoadOptions::default()
    };
    let err = load_pipeline_output(root.path(), &options).unwrap_err();
    assert!(matches!(err, MexError::UnknownGenome { genome, .. } if genome == "hg19"));
}

#[test]
fn legacy_layout_with_two_genomes_requires_a_choice() {
    let root = legacy_root();
    fs::create_dir_all(root.path().join("outs/filtered_gene_bc_matrices/hg19")).unwrap();

    let err = load_pipeline_output(root.path(), &LoadOptions::default()).unwrap_err();
    match err {
        MexError::AmbiguousGenome(candidates) => {
            assert_eq!(candidates, vec!["hg19".to_string(), "mm10".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn combined_layout_keeps_only_expression_rows() {
    let root = combined_root();
    let dataset = load_pipeline_output(root.path(), &LoadOptions::default()).unwrap();

    // the antibody row is gone, shapes stay aligned
    assert_eq!(dataset.num_features(), 3);
    assert_eq!(dataset.num_cells(), 2);
    assert_eq!(dataset.features.len(), dataset.matrix.rows());
    assert_eq!(dataset.barcodes.len(), dataset.matrix.cols());
    assert_eq!(
        entries(&dataset),
        vec![(0, 0, 3.0), (1, 0, 1.0), (2, 1, 9.0)]
    );
}

#[test]
fn combined_layout_restricts_to_a_genome_prefix() {
    let root = combined_root();
    let options = LoadOptions {
        genome: Some("hg19".to_string()),
        ..LoadOptions::default()
    };
    let dataset = load_pipeline_output(root.path(), &options).unwrap();

    let ids: Vec<&str> = dataset.features.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["hg19_ENSG01", "hg19_ENSG02"]);
    assert_eq!(dataset.num_cells(), 2);
}

#[test]
fn combined_layout_genome_miss_degrades_to_expression_only() {
    let root = combined_root();
    let options = LoadOptions {
        genome: Some("GRCh38".to_string()),
        ..LoadOptions::default()
    };
    let dataset = load_pipeline_output(root.path(), &options).unwrap();

    // no id contains "GRCh38": the restriction is skipped, not fatal
    assert_eq!(dataset.num_features(), 3);
}

#[test]
fn raw_cell_set_is_selected_by_flag() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("outs/raw_feature_bc_matrix");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("features.tsv"), "ENSG01\tGENE1\tGene Expression\n").unwrap();
    fs::write(dir.join("barcodes.tsv"), "AAAC-1\n").unwrap();
    fs::write(
        dir.join("matrix.mtx"),
        "%%MatrixMarket matrix coordinate integer general\n1 1 1\n1 1 2\n",
    )
    .unwrap();

    let options = LoadOptions {
        use_filtered: false,
        ..LoadOptions::default()
    };
    let dataset = load_pipeline_output(root.path(), &options).unwrap();
    assert_eq!(dataset.num_features(), 1);

    // the filtered set was never written, so the default options fail
    let err = load_pipeline_output(root.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, MexError::PathNotFound(_)));
}

#[test]
fn missing_barcode_file_is_reported() {
    let root = legacy_root();
    fs::remove_file(
        root.path()
            .join("outs/filtered_gene_bc_matrices/mm10/barcodes.tsv"),
    )
    .unwrap();

    let err = load_pipeline_output(root.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, MexError::MissingInputFile(p) if p.ends_with("barcodes.tsv")));
}

#[test]
fn barcode_count_mismatch_names_the_barcode_file() {
    let root = legacy_root();
    let barcodes = root
        .path()
        .join("outs/filtered_gene_bc_matrices/mm10/barcodes.tsv");
    fs::write(&barcodes, "c1\nc2\nc3\nc4\nc5\nc6\n").unwrap();

    let err = load_pipeline_output(root.path(), &LoadOptions::default()).unwrap_err();
    match err {
        MexError::DimensionMismatch {
            table,
            axis,
            declared,
            found,
            ..
        } => {
            assert_eq!(table, barcodes);
            assert_eq!(axis, "columns");
            assert_eq!(declared, 5);
            assert_eq!(found, 6);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn feature_count_mismatch_names_the_feature_file() {
    let root = legacy_root();
    let genes = root
        .path()
        .join("outs/filtered_gene_bc_matrices/mm10/genes.tsv");
    fs::write(&genes, "ENSMUSG01\tGene1\n").unwrap();

    let err = load_pipeline_output(root.path(), &LoadOptions::default()).unwrap_err();
    match err {
        MexError::DimensionMismatch { table, axis, .. } => {
            assert_eq!(table, genes);
            assert_eq!(axis, "rows");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
