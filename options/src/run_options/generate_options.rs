use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

const DEFAULT_CONFIG_OUT_PATH: &str = "frigate.yml";
const DEFAULT_ENV_OUT_PATH: &str = "/run/frigate/camera.passwd";
const DEFAULT_DESCRIPTOR_OUT_PATH: &str = "frigate-service.yml";

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Args, Clone, Debug)]
pub struct OutputOptions {
    /// Where the Frigate configuration document is written.
    /// This path is bind-mounted into the container, so it is made absolute.
    #[clap(long, default_value_os = DEFAULT_CONFIG_OUT_PATH)]
    pub config_out: PathBuf,

    /// Where the env file holding the resolved secrets is written
    #[clap(long, default_value_os = DEFAULT_ENV_OUT_PATH)]
    pub env_out: PathBuf,

    /// Where the container service descriptor is written
    #[clap(long, default_value_os = DEFAULT_DESCRIPTOR_OUT_PATH)]
    pub descriptor_out: PathBuf,

    /// Serialization format of the Frigate configuration document
    #[clap(long, value_enum, default_value_t = DocumentFormat::Yaml)]
    pub format: DocumentFormat,
}

#[derive(Parser, Clone, Debug)]
pub struct GenerateOptions {
    /// The path to the deployment options file
    /// If not provided, the default value is used, frigate-deploy.yaml
    #[clap(long, short('c'), default_value_os = super::DEFAULT_OPTIONS_FILE_PATH)]
    pub options_file: PathBuf,

    #[clap(flatten)]
    pub output: OutputOptions,
}
