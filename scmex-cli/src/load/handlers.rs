use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::ArgMatches;

use scmex_core::{
    CellMetadata, ExpressionFamily, LoadOptions, ModelInput, load_pipeline_output,
};

use super::cli;

pub fn run_load(matches: &ArgMatches) -> Result<()> {
    // get arguments from CLI
    let root = matches
        .get_one::<String>("root")
        .expect("A pipeline output root is required.");

    let genome = matches.get_one::<String>("genome").cloned();
    let use_filtered = !matches.get_flag("raw");

    let family = match matches.get_one::<String>("family") {
        Some(family) => {
            let supplied_family = ExpressionFamily::from_str(family);
            match supplied_family {
                Ok(family) => family,
                Err(_err) => anyhow::bail!("Unknown expression family supplied: {}", family),
            }
        }
        None => ExpressionFamily::default(),
    };

    let detection_limit = match matches.get_one::<String>("detection-limit") {
        Some(limit) => limit
            .parse::<f64>()
            .map_err(|_| anyhow::anyhow!("Invalid detection limit: {}", limit))?,
        None => cli::DEFAULT_DETECTION_LIMIT,
    };

    // coerce arguments to types
    let root = PathBuf::from(root);
    let options = LoadOptions {
        genome,
        use_filtered,
    };

    let dataset = load_pipeline_output(&root, &options)?;

    println!(
        "Loaded {} features x {} cells ({} stored entries)",
        dataset.num_features(),
        dataset.num_cells(),
        dataset.matrix.nnz()
    );

    let metadata = CellMetadata::from_barcodes(&dataset.barcodes);
    let input = ModelInput::new(dataset, metadata, detection_limit, family)?;
    println!(
        "Model input ready: family {:?}, lower detection limit {}",
        input.family, input.lower_detection_limit
    );

    Ok(())
}
