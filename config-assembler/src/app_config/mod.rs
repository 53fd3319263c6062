pub mod document;


use document::{
    AppConfigDocument, BirdseyeMode, BirdseyeSection, CameraBirdseye, CameraFfmpeg, CameraSection,
    FfmpegSection, Go2RtcSection, MqttSection,
};
use options::run_options::generate_options::DocumentFormat;
use std::collections::BTreeMap;

use crate::{
    env_file::MQTT_PASSWORD_ENV_KEY,
    error::AssemblyError,
    input::{CameraSpec, DetectorConfig, MqttConfig, RetentionPolicy},
    schema::FrigateSchema,
};

/// Frigate replaces `{FRIGATE_*}` tokens with the matching environment variable at startup
#[must_use]
pub fn mqtt_password_placeholder() -> String {
    format!("{{{MQTT_PASSWORD_ENV_KEY}}}")
}

const VAAPI_HWACCEL_PRESET: &str = "preset-vaapi";

#[must_use]
pub fn build_app_config(
    schema: FrigateSchema,
    cameras: &[CameraSpec],
    retention: &RetentionPolicy,
    detectors: &DetectorConfig,
    mqtt: &MqttConfig,
    hwaccel_driver: Option<&str>,
) -> AppConfigDocument {
    let camera_sections = cameras
        .iter()
        .map(|camera| {
            let mode = if camera.is_default_view {
                BirdseyeMode::Continuous
            } else {
                BirdseyeMode::Objects
            };
            let birdseye = schema.has_birdseye().then_some(CameraBirdseye { mode });
            let section = CameraSection {
                ffmpeg: CameraFfmpeg {
                    inputs: schema.stream_inputs(camera),
                },
                birdseye,
            };
            (camera.name.clone(), section)
        })
        .collect::<BTreeMap<_, _>>();

    let go2rtc = schema.has_stream_relay().then(|| Go2RtcSection {
        streams: cameras
            .iter()
            .map(|camera| (camera.name.clone(), vec![camera.high_quality_url.clone()]))
            .collect(),
    });

    let birdseye = schema.has_birdseye().then_some(BirdseyeSection {
        enabled: true,
        mode: BirdseyeMode::Objects,
    });

    // The driver itself goes to the container environment; ffmpeg only needs the preset
    let hwaccel_args = match hwaccel_driver {
        Some(_) => vec![VAAPI_HWACCEL_PRESET.to_string()],
        None => Vec::new(),
    };

    AppConfigDocument {
        mqtt: MqttSection {
            enabled: true,
            host: mqtt.host.clone(),
            port: mqtt.port,
            user: mqtt.user.clone(),
            password: mqtt_password_placeholder(),
        },
        detectors: detectors.clone(),
        ffmpeg: FfmpegSection { hwaccel_args },
        record: schema.record_section(retention),
        birdseye,
        go2rtc,
        cameras: camera_sections,
    }
}

pub fn render_document(
    document: &AppConfigDocument,
    format: DocumentFormat,
) -> Result<String, AssemblyError> {
    let render_error = |reason: String| AssemblyError::Render {
        artifact: "application configuration",
        reason,
    };

    match format {
        DocumentFormat::Yaml => serde_yml::to_string(document).map_err(|e| render_error(e.to_string())),
        DocumentFormat::Json => serde_json::to_string_pretty(document)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| render_error(e.to_string())),
    }
}
