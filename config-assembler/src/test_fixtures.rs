use std::path::{Path, PathBuf};

use crate::config::DeploymentOptions;

pub const SAMPLE_OPTIONS: &str = r"camera_password_file: /run/secrets/camera
cameras:
  - name: front-door
    default_view: true
    high_quality_url: rtsp://cam/high
    low_quality_url: rtsp://cam/low
  - name: garage
    high_quality_url: rtsp://garage/high
    low_quality_url: rtsp://garage/low
retention:
  default_days: 7
  detection_days: 14
  alert_days: 14
detectors:
  coral:
    type: edgetpu
    device: usb
mqtt:
  host: mq
  port: 1883
  user: bob
  password_file: /run/secrets/mqtt
container:
  image: ghcr.io/blakeblackshear/frigate:0.14.1
  ports:
    web: 5000
    rtsp: 8554
    webrtc: 8555
  devices:
    - /dev/dri/renderD128
  state_directory: /var/lib/frigate
  hardware_accel_driver: iHD
";

pub const CAMERA_SECRET: &str = "cam-s3cret";
pub const MQTT_SECRET: &str = "mq\"tt $ecret";

pub struct SecretFiles {
    pub camera: PathBuf,
    pub mqtt: PathBuf,
}

pub fn write_secret_files(dir: &Path) -> SecretFiles {
    let camera = dir.join("camera");
    let mqtt = dir.join("mqtt");
    std::fs::write(&camera, format!("{CAMERA_SECRET}\n")).unwrap();
    std::fs::write(&mqtt, format!("{MQTT_SECRET}\n")).unwrap();
    SecretFiles { camera, mqtt }
}

/// `SAMPLE_OPTIONS` pointing at the given secret files
pub fn sample_options_yaml(secrets: &SecretFiles) -> String {
    SAMPLE_OPTIONS
        .replace(
            "/run/secrets/camera",
            &secrets.camera.display().to_string(),
        )
        .replace("/run/secrets/mqtt", &secrets.mqtt.display().to_string())
}

pub fn sample_options_with(
    secrets: &SecretFiles,
    edit: impl Fn(String) -> String,
) -> DeploymentOptions {
    DeploymentOptions::from_yaml_str(&edit(sample_options_yaml(secrets))).unwrap()
}
