use crate::error::AssemblyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub default_days: u32,
    pub detection_days: u32,
    pub alert_days: u32,
}

fn days(name: &str, value: i64) -> Result<u32, AssemblyError> {
    u32::try_from(value).map_err(|_| AssemblyError::InvalidRetentionValue {
        name: format!("retention.{name}"),
        value,
    })
}

impl RetentionPolicy {
    pub fn new(default_days: i64, detection_days: i64, alert_days: i64) -> Result<Self, AssemblyError> {
        Ok(Self {
            default_days: days("default_days", default_days)?,
            detection_days: days("detection_days", detection_days)?,
            alert_days: days("alert_days", alert_days)?,
        })
    }
}
