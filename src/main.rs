//! Parse a lambda expression, annotate it with layout sizes, and print the
//! result to standard output.
//!
//! Example usage:
//!
//!     cargo run -- --expression '(\x. x) (\y. y)'
//!     cargo run -- --sample Y --format json

use std::process;

use clap::Parser;
use rust_lambda_parse::end_to_end::{init_logging, run, Config};

fn main() {
    let config = Config::parse();

    if let Err(logger_error) = init_logging(config.log_level) {
        eprintln!("{}", logger_error);
        process::exit(1);
    }

    match run(&config) {
        Ok(output) => {
            println!("{}", output);
        }

        Err(run_error) => {
            eprintln!("{}", run_error);
            process::exit(1);
        }
    }
}
