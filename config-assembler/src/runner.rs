use anyhow::Context;
use artifact_store::make_local_store;
use logging::init_logging;
use options::run_options::{
    check_options::CheckOptions,
    generate_options::{GenerateOptions, OutputOptions},
};

use crate::{
    artifacts::{ArtifactPaths, assemble_and_write, assemble_from_file, load_options},
    service::podman::PodmanCommand,
};

impl TryFrom<&OutputOptions> for ArtifactPaths {
    type Error = std::io::Error;

    fn try_from(output: &OutputOptions) -> Result<Self, Self::Error> {
        Ok(Self {
            config: std::path::absolute(&output.config_out)?,
            env_file: std::path::absolute(&output.env_out)?,
            descriptor: std::path::absolute(&output.descriptor_out)?,
        })
    }
}

pub fn generate(options: &GenerateOptions) -> anyhow::Result<()> {
    init_logging();

    let paths = ArtifactPaths::try_from(&options.output).context("Resolving output paths")?;
    let deployment_options = load_options(&options.options_file)?;

    let base_dir = std::env::current_dir().context("Reading current directory")?;
    let store = make_local_store(base_dir);
    let artifacts =
        assemble_and_write(store.as_ref(), &deployment_options, &paths, options.output.format)?;

    tracing::info!(
        "Generated Frigate deployment for {} camera(s)",
        artifacts.camera_names.len()
    );

    Ok(())
}

pub fn check(options: &CheckOptions) -> anyhow::Result<()> {
    init_logging();

    let paths = ArtifactPaths::try_from(&options.output).context("Resolving output paths")?;
    let artifacts = assemble_from_file(&options.options_file, &paths, options.output.format)?;

    tracing::info!("Cameras: {}", artifacts.camera_names.join(", "));
    tracing::info!(
        "Shared memory: {}, image: {}",
        artifacts.service.shm_size,
        artifacts.service.image
    );
    tracing::info!("Env file keys: {}", artifacts.env_file.keys().join(", "));
    let secret_keys = artifacts.env_file.keys();
    tracing::info!(
        "Podman command (export {} in the calling shell first; the env file is only read \
         through the service descriptor): {}",
        secret_keys.join(", "),
        PodmanCommand::from_descriptor(&artifacts.service, secret_keys)
    );
    tracing::info!("Options are valid; nothing was written");

    Ok(())
}
