mod camera;
mod port;
mod retention;

use std::{collections::BTreeMap, path::PathBuf};

pub use camera::{CameraSpec, validate_cameras};
pub use port::Port;
pub use retention::RetentionPolicy;

use crate::{config::DeploymentOptions, error::AssemblyError, schema::FrigateSchema};

/// Detector name to its settings, passed to Frigate untouched
pub type DetectorConfig = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MqttConfig {
    pub host: String,
    pub port: Port,
    pub user: String,
    pub password_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSet {
    pub web: Port,
    pub rtsp: Port,
    pub webrtc: Port,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRuntimeSpec {
    pub image: String,
    pub hostname: String,
    pub ports: PortSet,
    pub devices: Vec<String>,
    pub state_directory: PathBuf,
    pub hardware_accel_driver: Option<String>,
}

/// Deployment options after every range and uniqueness check has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyInput {
    pub schema: FrigateSchema,
    pub cameras: Vec<CameraSpec>,
    pub retention: RetentionPolicy,
    pub detectors: DetectorConfig,
    pub mqtt: MqttConfig,
    pub runtime: ContainerRuntimeSpec,
    pub camera_password_file: PathBuf,
}

impl TryFrom<&DeploymentOptions> for AssemblyInput {
    type Error = AssemblyError;

    fn try_from(options: &DeploymentOptions) -> Result<Self, Self::Error> {
        let cameras = validate_cameras(options.cameras())?;

        let retention = options.retention();
        let retention = RetentionPolicy::new(
            retention.default_days,
            retention.detection_days,
            retention.alert_days,
        )?;

        let mqtt = options.mqtt();
        let mqtt = MqttConfig {
            host: mqtt.host.clone(),
            port: Port::new("mqtt.port", mqtt.port())?,
            user: mqtt.user.clone(),
            password_file: mqtt.password_file.clone(),
        };

        let container = options.container();
        let ports = PortSet {
            web: Port::new("container.ports.web", container.ports.web())?,
            rtsp: Port::new("container.ports.rtsp", container.ports.rtsp())?,
            webrtc: Port::new("container.ports.webrtc", container.ports.webrtc())?,
        };
        let runtime = ContainerRuntimeSpec {
            image: container.image().to_string(),
            hostname: container.hostname().to_string(),
            ports,
            devices: container.devices.clone(),
            state_directory: container.state_directory.clone(),
            hardware_accel_driver: container
                .hardware_accel_driver
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        };

        tracing::debug!(
            "Validated options for {} camera(s) against Frigate schema {}",
            cameras.len(),
            options.schema()
        );

        Ok(Self {
            schema: options.schema(),
            cameras,
            retention,
            detectors: options.detectors().clone(),
            mqtt,
            runtime,
            camera_password_file: options.camera_password_file().to_path_buf(),
        })
    }
}
