//! recipec CLI entry point.

use clap::Parser;
use recipec::cli::{self, Cli, Commands, EXIT_FAILED};
use recipec::logging;

fn main() {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let exit_code = match cli.command {
        Commands::Compile(args) => match cli::run_compile(&args) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                EXIT_FAILED
            }
        },
        Commands::Verify(args) => match cli::run_verify(&args) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                EXIT_FAILED
            }
        },
    };

    std::process::exit(exit_code);
}
