use std::{fmt::Display, str::FromStr};

use crate::{
    app_config::document::{
        EventsSection, LegacyEventsRetain, RecordSection, RetainBlock, RetainMode, ReviewRetention,
        StreamInput, StreamRole,
    },
    input::{CameraSpec, RetentionPolicy},
};

const LEGACY_WEB_PORT: u16 = 5000;
const AUTHENTICATED_WEB_PORT: u16 = 8971;

/// The version of Frigate's configuration contract the generated document targets.
/// Every field or role decision that differs between versions is made here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrigateSchema {
    /// Split streams, single events retention, no birdseye or go2rtc sections
    V0_13,
    /// Single high quality stream with both roles, birdseye, go2rtc relay, alert and
    /// detection retention
    #[default]
    V0_14,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unsupported Frigate schema version `{0}`; expected one of: 0.13, 0.14")]
pub struct UnsupportedSchemaError(String);

impl FromStr for FrigateSchema {
    type Err = UnsupportedSchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0.13" => Ok(FrigateSchema::V0_13),
            "0.14" => Ok(FrigateSchema::V0_14),
            other => Err(UnsupportedSchemaError(other.to_string())),
        }
    }
}

impl Display for FrigateSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrigateSchema::V0_13 => write!(f, "0.13"),
            FrigateSchema::V0_14 => write!(f, "0.14"),
        }
    }
}

impl FrigateSchema {
    #[must_use]
    pub fn stream_inputs(self, camera: &CameraSpec) -> Vec<StreamInput> {
        match self {
            FrigateSchema::V0_13 => vec![
                StreamInput {
                    path: camera.high_quality_url.clone(),
                    roles: vec![StreamRole::Record],
                },
                StreamInput {
                    path: camera.low_quality_url.clone(),
                    roles: vec![StreamRole::Detect],
                },
            ],
            FrigateSchema::V0_14 => vec![StreamInput {
                path: camera.high_quality_url.clone(),
                roles: vec![StreamRole::Record, StreamRole::Detect],
            }],
        }
    }

    #[must_use]
    pub const fn has_stream_relay(self) -> bool {
        matches!(self, FrigateSchema::V0_14)
    }

    #[must_use]
    pub const fn has_birdseye(self) -> bool {
        matches!(self, FrigateSchema::V0_14)
    }

    #[must_use]
    pub fn record_section(self, retention: &RetentionPolicy) -> RecordSection {
        let retain = RetainBlock {
            days: retention.default_days,
            mode: RetainMode::Motion,
        };

        match self {
            // Older releases have a single events bucket; keep whichever of the two is longer
            FrigateSchema::V0_13 => RecordSection {
                enabled: true,
                retain,
                events: Some(EventsSection {
                    retain: LegacyEventsRetain {
                        default: retention.detection_days.max(retention.alert_days),
                        mode: RetainMode::Motion,
                    },
                }),
                alerts: None,
                detections: None,
            },
            FrigateSchema::V0_14 => RecordSection {
                enabled: true,
                retain,
                events: None,
                alerts: Some(ReviewRetention {
                    retain: RetainBlock {
                        days: retention.alert_days,
                        mode: RetainMode::Motion,
                    },
                }),
                detections: Some(ReviewRetention {
                    retain: RetainBlock {
                        days: retention.detection_days,
                        mode: RetainMode::Motion,
                    },
                }),
            },
        }
    }

    /// Port the web UI listens on inside the container
    #[must_use]
    pub const fn internal_web_port(self) -> u16 {
        match self {
            FrigateSchema::V0_13 => LEGACY_WEB_PORT,
            FrigateSchema::V0_14 => AUTHENTICATED_WEB_PORT,
        }
    }
}
