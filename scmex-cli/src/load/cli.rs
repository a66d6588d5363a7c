use clap::{Arg, Command, arg};

pub const LOAD_CMD: &str = "load";
pub const DEFAULT_DETECTION_LIMIT: f64 = 0.5;

pub fn create_load_cli() -> Command {
    Command::new(LOAD_CMD)
        .about("Load a pipeline output directory and print a dataset summary.")
        .arg(
            Arg::new("root")
                .required(true)
                .help("Pipeline output root (the directory containing outs/)"),
        )
        .arg(arg!(--genome <genome>).help("Reference genome to select (legacy layout) or restrict to (combined layout)"))
        .arg(
            arg!(--raw)
                .help("Load the raw cell set instead of the filtered one")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(arg!(--family <family>).help("Expression family for the downstream model (default: negbinomial.size)"))
        .arg(arg!(--"detection-limit" <limit>).help("Lower detection limit for the downstream model"))
}
