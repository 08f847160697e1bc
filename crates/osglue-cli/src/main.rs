//! Osglue CLI: the `osglue` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateStubs {
            output_dir,
            package_path,
            python,
            json,
        } => commands::generate_stubs::run(output_dir, package_path, python, json),

        Commands::RepairStubs { dir, json } => commands::repair_stubs::run(dir, json),

        Commands::LoaderCheck {
            stub_dir,
            package_dir,
            json,
        } => commands::loader_check::run(stub_dir, package_dir, json),
    }
}
