use serde::{Deserialize, Deserializer, de::Error};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{input::DetectorConfig, schema::FrigateSchema};

const DEFAULT_MQTT_PORT: i64 = 1883;
const DEFAULT_WEB_PORT: i64 = 5000;
const DEFAULT_RTSP_PORT: i64 = 8554;
const DEFAULT_WEBRTC_PORT: i64 = 8555;
const DEFAULT_HOSTNAME: &str = "frigate";
const DEFAULT_IMAGE: &str = "ghcr.io/blakeblackshear/frigate:stable";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Options file doesn't exist in the provided (or default) path: {}", .0.display())]
    ConfigFileDoesNotExist(PathBuf),
    #[error("File exists but it could not be read to a string for parsing: {0}")]
    FileExistsButCannotBeReadToString(std::io::Error),
    #[error("Could not parse file to options; either invalid yaml or missing options: {0}")]
    FileFormatCouldNotBeParsed(serde_yml::Error),
}

/// The deployment options exactly as the operator wrote them. Numeric values are kept
/// wide and signed here; range checks happen when converting into `AssemblyInput`.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentOptions {
    #[serde(default, deserialize_with = "schema_from_scalar")]
    schema: Option<FrigateSchema>,
    camera_password_file: PathBuf,
    cameras: Vec<CameraOptions>,
    retention: RetentionOptions,
    #[serde(default, deserialize_with = "detectors_from_scalars")]
    detectors: DetectorConfig,
    mqtt: MqttOptions,
    container: ContainerOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraOptions {
    pub name: String,
    #[serde(default)]
    pub default_view: bool,
    pub high_quality_url: String,
    pub low_quality_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetentionOptions {
    pub default_days: i64,
    pub detection_days: i64,
    pub alert_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MqttOptions {
    pub host: String,
    pub port: Option<i64>,
    pub user: String,
    pub password_file: PathBuf,
}

impl MqttOptions {
    #[must_use]
    pub fn port(&self) -> i64 {
        self.port.unwrap_or(DEFAULT_MQTT_PORT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortOptions {
    pub web: Option<i64>,
    pub rtsp: Option<i64>,
    pub webrtc: Option<i64>,
}

impl PortOptions {
    #[must_use]
    pub fn web(&self) -> i64 {
        self.web.unwrap_or(DEFAULT_WEB_PORT)
    }

    #[must_use]
    pub fn rtsp(&self) -> i64 {
        self.rtsp.unwrap_or(DEFAULT_RTSP_PORT)
    }

    #[must_use]
    pub fn webrtc(&self) -> i64 {
        self.webrtc.unwrap_or(DEFAULT_WEBRTC_PORT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerOptions {
    pub image: Option<String>,
    pub hostname: Option<String>,
    #[serde(default)]
    pub ports: PortOptions,
    #[serde(default)]
    pub devices: Vec<String>,
    pub state_directory: PathBuf,
    pub hardware_accel_driver: Option<String>,
}

impl ContainerOptions {
    #[must_use]
    pub fn image(&self) -> &str {
        self.image.as_deref().unwrap_or(DEFAULT_IMAGE)
    }

    #[must_use]
    pub fn hostname(&self) -> &str {
        self.hostname.as_deref().unwrap_or(DEFAULT_HOSTNAME)
    }
}

impl DeploymentOptions {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<DeploymentOptions, ConfigError> {
        if !path.as_ref().exists() {
            return Err(ConfigError::ConfigFileDoesNotExist(
                path.as_ref().to_path_buf(),
            ));
        }

        let options_file_data = std::fs::read_to_string(path)
            .map_err(ConfigError::FileExistsButCannotBeReadToString)?;

        Self::from_yaml_str(&options_file_data)
    }

    pub fn from_yaml_str(data: &str) -> Result<DeploymentOptions, ConfigError> {
        serde_yml::from_str(data).map_err(ConfigError::FileFormatCouldNotBeParsed)
    }

    pub fn schema(&self) -> FrigateSchema {
        self.schema.unwrap_or_default()
    }

    #[must_use]
    pub fn camera_password_file(&self) -> &Path {
        &self.camera_password_file
    }

    #[must_use]
    pub fn cameras(&self) -> &[CameraOptions] {
        &self.cameras
    }

    #[must_use]
    pub fn retention(&self) -> &RetentionOptions {
        &self.retention
    }

    #[must_use]
    pub fn detectors(&self) -> &DetectorConfig {
        &self.detectors
    }

    #[must_use]
    pub fn mqtt(&self) -> &MqttOptions {
        &self.mqtt
    }

    #[must_use]
    pub fn container(&self) -> &ContainerOptions {
        &self.container
    }
}

// Unquoted `0.14` in yaml is a float, so accept any scalar and go through its text form
fn schema_from_scalar<'de, D>(deserializer: D) -> Result<Option<FrigateSchema>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yml::Value::deserialize(deserializer)?;
    let text = match value {
        serde_yml::Value::Null => return Ok(None),
        serde_yml::Value::String(s) => s,
        serde_yml::Value::Number(n) => n.to_string(),
        other => {
            return Err(D::Error::custom(format!(
                "Schema version must be a string or number, got: {other:?}"
            )));
        }
    };

    text.parse()
        .map(Some)
        .map_err(|e| D::Error::custom(format!("{e}")))
}

// Detector settings are opaque to us and passed through as text
fn detectors_from_scalars<'de, D>(deserializer: D) -> Result<DetectorConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, BTreeMap<String, serde_yml::Value>>::deserialize(deserializer)?;

    let mut result = DetectorConfig::new();
    for (detector, settings) in raw {
        let mut converted = BTreeMap::new();
        for (key, value) in settings {
            let text = match value {
                serde_yml::Value::String(s) => s,
                serde_yml::Value::Number(n) => n.to_string(),
                serde_yml::Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(D::Error::custom(format!(
                        "Setting `{key}` of detector `{detector}` must be a scalar value"
                    )));
                }
            };
            converted.insert(key, text);
        }
        result.insert(detector, converted);
    }

    Ok(result)
}
