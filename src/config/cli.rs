/// CLI argument definitions for Arion.
///
/// A single invocation processes one request:
/// `arion --input '<JSON request document>'`
use clap::{Arg, Command};

pub fn build_cli() -> Command {
    Command::new("arion")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Batch image-processing tool: resize, watermark, metadata, fingerprint")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("JSON")
                .help("The request document: input_url, correct_rotation, operations")
                .num_args(1)
                .required(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Sets the log level for stderr diagnostics")
                .num_args(1)
                .default_value("warn"),
        )
}
