use anyhow::Context;
use artifact_store::traits::{ArtifactStore, FileAccess};
use itertools::Itertools;
use options::run_options::generate_options::DocumentFormat;
use std::path::{Path, PathBuf};

use crate::{
    app_config::{build_app_config, render_document},
    config::DeploymentOptions,
    env_file::{EnvFile, build_env_file},
    error::AssemblyError,
    input::AssemblyInput,
    secrets::Secrets,
    service::{ServiceDescriptor, build_service_descriptor, render_descriptor},
};

/// Where each artifact lands on the host. The config and env file paths also end up
/// inside the service descriptor, so they should be absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub config: PathBuf,
    pub env_file: PathBuf,
    pub descriptor: PathBuf,
}

/// All three artifacts, fully rendered and not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub app_config: String,
    pub env_file: EnvFile,
    pub descriptor: String,
    pub service: ServiceDescriptor,
    pub camera_names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

pub fn load_options(options_file: &Path) -> Result<DeploymentOptions, AssemblyError> {
    tracing::info!("Reading deployment options from `{}`", options_file.display());
    Ok(DeploymentOptions::from_file(options_file)?)
}

pub fn assemble_from_file(
    options_file: &Path,
    paths: &ArtifactPaths,
    format: DocumentFormat,
) -> Result<Artifacts, AssemblyError> {
    assemble(&load_options(options_file)?, paths, format)
}

/// Validates, reads the secrets and renders everything in memory. Nothing touches the
/// destination until this has succeeded.
pub fn assemble(
    options: &DeploymentOptions,
    paths: &ArtifactPaths,
    format: DocumentFormat,
) -> Result<Artifacts, AssemblyError> {
    let input = AssemblyInput::try_from(options)?;

    let secrets = Secrets::read(&input.camera_password_file, &input.mqtt.password_file)?;

    let document = build_app_config(
        input.schema,
        &input.cameras,
        &input.retention,
        &input.detectors,
        &input.mqtt,
        input.runtime.hardware_accel_driver.as_deref(),
    );
    let app_config = render_document(&document, format)?;

    let env_file = build_env_file(&secrets.camera_password, &secrets.mqtt_password);

    let service = build_service_descriptor(
        input.schema,
        &input.runtime,
        input.cameras.len(),
        &paths.config,
        &paths.env_file,
    );
    let descriptor = render_descriptor(&service)?;

    Ok(Artifacts {
        app_config,
        env_file,
        descriptor,
        service,
        camera_names: input.cameras.into_iter().map(|c| c.name).collect(),
    })
}

fn write_if_changed<S>(
    store: &S,
    data: &[u8],
    to: &Path,
    access: FileAccess,
) -> anyhow::Result<WriteOutcome>
where
    S: ArtifactStore<Error = anyhow::Error> + ?Sized,
{
    if store.file_exists(to)? && store.get_to_memory(to)? == data {
        // Same content, but the file may have been created with looser permissions
        store
            .set_access(to, access)
            .with_context(|| format!("Setting permissions of `{}`", to.display()))?;
        return Ok(WriteOutcome::Unchanged);
    }

    store
        .put_from_memory(data, to, access)
        .with_context(|| format!("Writing artifact `{}`", to.display()))?;
    Ok(WriteOutcome::Written)
}

pub fn write_artifacts<S>(
    store: &S,
    artifacts: &Artifacts,
    paths: &ArtifactPaths,
) -> anyhow::Result<[WriteOutcome; 3]>
where
    S: ArtifactStore<Error = anyhow::Error> + ?Sized,
{
    let outputs = [
        (
            "application configuration",
            artifacts.app_config.as_bytes(),
            &paths.config,
            FileAccess::Shared,
        ),
        (
            "env file",
            artifacts.env_file.as_bytes(),
            &paths.env_file,
            FileAccess::OwnerOnly,
        ),
        (
            "service descriptor",
            artifacts.descriptor.as_bytes(),
            &paths.descriptor,
            FileAccess::Shared,
        ),
    ];

    let mut outcomes = [WriteOutcome::Unchanged; 3];
    let mut replaced: Vec<&Path> = Vec::new();
    for (outcome, (name, data, path, access)) in outcomes.iter_mut().zip(outputs) {
        *outcome = write_if_changed(store, data, path, access).with_context(|| {
            if replaced.is_empty() {
                format!("Writing {name}")
            } else {
                format!(
                    "Writing {name} failed after replacing {}; the artifacts on disk now mix \
                     old and new versions, re-run once the cause is fixed",
                    replaced
                        .iter()
                        .map(|p| format!("`{}`", p.display()))
                        .join(", ")
                )
            }
        })?;
        match outcome {
            WriteOutcome::Written => {
                replaced.push(path.as_path());
                tracing::info!("Wrote {name} to `{}` ({})", path.display(), store.description());
            }
            WriteOutcome::Unchanged => {
                tracing::info!("{name} at `{}` is unchanged", path.display());
            }
        }
    }

    Ok(outcomes)
}

/// Assembles everything first; the store is only touched once all three artifacts exist.
pub fn assemble_and_write<S>(
    store: &S,
    options: &DeploymentOptions,
    paths: &ArtifactPaths,
    format: DocumentFormat,
) -> anyhow::Result<Artifacts>
where
    S: ArtifactStore<Error = anyhow::Error> + ?Sized,
{
    let artifacts = assemble(options, paths, format)?;
    write_artifacts(store, &artifacts, paths)?;
    Ok(artifacts)
}

#[cfg(test)]
mod tests;
