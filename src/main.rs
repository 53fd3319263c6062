use clap::Parser;
use config_assembler::runner::{check, generate};
use options::run_options::{self, RunOptions};

fn main() -> anyhow::Result<()> {
    let args = RunOptions::parse();

    match args.command {
        run_options::RunCommand::Generate(generate_options) => generate(&generate_options),
        run_options::RunCommand::Check(check_options) => check(&check_options),
    }
}
