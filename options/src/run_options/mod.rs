pub mod check_options;
pub mod generate_options;

use clap::{Parser, Subcommand};

const DEFAULT_OPTIONS_FILE_PATH: &str = "frigate-deploy.yaml";

#[derive(Parser)]
#[clap(about = "Generates the Frigate configuration, secrets env file and container descriptor")]
pub struct RunOptions {
    #[clap(subcommand)]
    pub command: RunCommand,
}

#[derive(Subcommand, Clone, Debug)]
pub enum RunCommand {
    /// Assemble and write all three artifacts.
    Generate(generate_options::GenerateOptions),
    /// Assemble everything in memory and report, without writing any file.
    Check(check_options::CheckOptions),
}
