use std::process::ExitCode;

use clap::Parser;
use rnaseq_pipeline::command;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    run: command::RunCMD,
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();

    if let Err(e) = cli.run.try_execute() {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
