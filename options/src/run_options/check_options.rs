use std::path::PathBuf;

use clap::Parser;

use super::generate_options::OutputOptions;

#[derive(Parser, Clone, Debug)]
pub struct CheckOptions {
    /// The path to the deployment options file
    /// If not provided, the default value is used, frigate-deploy.yaml
    #[clap(long, short('c'), default_value_os = super::DEFAULT_OPTIONS_FILE_PATH)]
    pub options_file: PathBuf,

    /// Output locations are only used to fill in the service descriptor; nothing is written
    #[clap(flatten)]
    pub output: OutputOptions,
}
