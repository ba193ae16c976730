//! Main entry point for Arion.
//!
//! One invocation processes one request: `arion --input <JSON>`. The
//! structured result document goes to stdout; diagnostics go to stderr. The
//! exit code is 0 exactly when the top-level result is true.

use arion::config::cli;
use arion::image::pipeline_executor;
use arion::utils::logger;

fn main() {
    let matches = cli::build_cli().get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn");
    logger::init_logger(level);

    let input = matches
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or_default();

    let report = pipeline_executor::run_request(input);
    println!("{}", report.to_json());

    std::process::exit(if report.result { 0 } else { 1 });
}
