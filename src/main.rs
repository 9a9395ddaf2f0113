use clap::Parser;
use ictjournal::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
