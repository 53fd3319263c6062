//! Serializable shape of the Frigate configuration document. Field declaration order is
//! the emitted key order, and every map is a `BTreeMap`, so rendering is byte-stable.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::input::{DetectorConfig, Port};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfigDocument {
    pub mqtt: MqttSection,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub detectors: DetectorConfig,
    pub ffmpeg: FfmpegSection,
    pub record: RecordSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birdseye: Option<BirdseyeSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go2rtc: Option<Go2RtcSection>,
    pub cameras: BTreeMap<String, CameraSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MqttSection {
    pub enabled: bool,
    pub host: String,
    pub port: Port,
    pub user: String,
    /// Always a `{FRIGATE_...}` placeholder, never the secret
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FfmpegSection {
    pub hwaccel_args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RetainMode {
    Motion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetainBlock {
    pub days: u32,
    pub mode: RetainMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewRetention {
    pub retain: RetainBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegacyEventsRetain {
    pub default: u32,
    pub mode: RetainMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventsSection {
    pub retain: LegacyEventsRetain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordSection {
    pub enabled: bool,
    pub retain: RetainBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<EventsSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alerts: Option<ReviewRetention>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detections: Option<ReviewRetention>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BirdseyeMode {
    Continuous,
    Objects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirdseyeSection {
    pub enabled: bool,
    pub mode: BirdseyeMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Go2RtcSection {
    pub streams: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamRole {
    Record,
    Detect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamInput {
    pub path: String,
    pub roles: Vec<StreamRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraFfmpeg {
    pub inputs: Vec<StreamInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CameraBirdseye {
    pub mode: BirdseyeMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraSection {
    pub ffmpeg: CameraFfmpeg,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birdseye: Option<CameraBirdseye>,
}
