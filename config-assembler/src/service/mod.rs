pub mod podman;


use serde::{Serialize, Serializer};
use std::{
    collections::BTreeMap,
    fmt::Display,
    path::{Path, PathBuf},
};

use crate::{
    error::AssemblyError,
    input::{ContainerRuntimeSpec, Port},
    schema::FrigateSchema,
};

/// Frigate decodes every camera into shared memory; this is the per-camera budget.
pub const SHM_MIB_PER_CAMERA: u64 = 512;

const CONTAINER_RTSP_PORT: u16 = 8554;
const CONTAINER_WEBRTC_PORT: u16 = 8555;
const CONTAINER_MEDIA_DIR: &str = "/media/frigate";
const CONTAINER_CONFIG_FILE: &str = "/config/config.yml";
const LOCALTIME_PATH: &str = "/etc/localtime";
const VAAPI_DRIVER_ENV_KEY: &str = "LIBVA_DRIVER_NAME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShmSize {
    mebibytes: u64,
}

impl ShmSize {
    #[must_use]
    pub const fn mebibytes(self) -> u64 {
        self.mebibytes
    }
}

#[must_use]
pub fn shm_size_for(camera_count: usize) -> ShmSize {
    let cameras = u64::try_from(camera_count).unwrap_or(u64::MAX);
    ShmSize {
        mebibytes: cameras.saturating_mul(SHM_MIB_PER_CAMERA),
    }
}

impl Display for ShmSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m", self.mebibytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    Always,
}

impl Display for RestartPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestartPolicy::Always => write!(f, "always"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMount {
    pub host: PathBuf,
    pub container: PathBuf,
    pub read_only: bool,
}

impl Display for VolumeMount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host.display(), self.container.display())?;
        if self.read_only {
            write!(f, ":ro")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    pub host: Port,
    pub container: u16,
    /// `None` leaves the runtime default, which is TCP
    pub protocol: Option<Protocol>,
}

impl Display for PortMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.container)?;
        match self.protocol {
            Some(Protocol::Tcp) => write!(f, "/tcp"),
            Some(Protocol::Udp) => write!(f, "/udp"),
            None => Ok(()),
        }
    }
}

fn serialize_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn serialize_display_seq<T: Display, S: Serializer>(
    values: &[T],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(ToString::to_string))
}

/// What the container orchestrator needs to run Frigate. Restarts are entirely the
/// orchestrator's business; this only states the policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub image: String,
    pub hostname: String,
    pub restart: RestartPolicy,
    #[serde(serialize_with = "serialize_display")]
    pub shm_size: ShmSize,
    pub devices: Vec<String>,
    #[serde(serialize_with = "serialize_display_seq")]
    pub volumes: Vec<VolumeMount>,
    #[serde(serialize_with = "serialize_display_seq")]
    pub ports: Vec<PortMapping>,
    pub env_file: Vec<PathBuf>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct ComposeDocument<'a> {
    services: BTreeMap<&'a str, &'a ServiceDescriptor>,
}

#[must_use]
pub fn build_service_descriptor(
    schema: FrigateSchema,
    runtime: &ContainerRuntimeSpec,
    camera_count: usize,
    generated_config_path: &Path,
    env_file_path: &Path,
) -> ServiceDescriptor {
    let volumes = vec![
        VolumeMount {
            host: runtime.state_directory.clone(),
            container: CONTAINER_MEDIA_DIR.into(),
            read_only: false,
        },
        VolumeMount {
            host: generated_config_path.to_path_buf(),
            container: CONTAINER_CONFIG_FILE.into(),
            read_only: true,
        },
        VolumeMount {
            host: LOCALTIME_PATH.into(),
            container: LOCALTIME_PATH.into(),
            read_only: true,
        },
    ];

    let ports = vec![
        PortMapping {
            host: runtime.ports.web,
            container: schema.internal_web_port(),
            protocol: None,
        },
        PortMapping {
            host: runtime.ports.rtsp,
            container: CONTAINER_RTSP_PORT,
            protocol: None,
        },
        PortMapping {
            host: runtime.ports.webrtc,
            container: CONTAINER_WEBRTC_PORT,
            protocol: Some(Protocol::Tcp),
        },
        PortMapping {
            host: runtime.ports.webrtc,
            container: CONTAINER_WEBRTC_PORT,
            protocol: Some(Protocol::Udp),
        },
    ];

    let environment = runtime
        .hardware_accel_driver
        .iter()
        .map(|driver| (VAAPI_DRIVER_ENV_KEY.to_string(), driver.clone()))
        .collect();

    let shm_size = shm_size_for(camera_count);
    tracing::debug!("Shared memory for {camera_count} camera(s): {shm_size}");

    ServiceDescriptor {
        image: runtime.image.clone(),
        hostname: runtime.hostname.clone(),
        restart: RestartPolicy::Always,
        shm_size,
        devices: runtime.devices.clone(),
        volumes,
        ports,
        env_file: vec![env_file_path.to_path_buf()],
        environment,
    }
}

/// Compose-style document with the descriptor as the only service, keyed by hostname
pub fn render_descriptor(descriptor: &ServiceDescriptor) -> Result<String, AssemblyError> {
    let document = ComposeDocument {
        services: BTreeMap::from([(descriptor.hostname.as_str(), descriptor)]),
    };

    serde_yml::to_string(&document).map_err(|e| AssemblyError::Render {
        artifact: "service descriptor",
        reason: e.to_string(),
    })
}
