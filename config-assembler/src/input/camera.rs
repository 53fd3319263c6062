use itertools::Itertools;

use crate::{config::CameraOptions, error::AssemblyError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraSpec {
    pub name: String,
    pub is_default_view: bool,
    pub high_quality_url: String,
    pub low_quality_url: String,
}

impl From<&CameraOptions> for CameraSpec {
    fn from(options: &CameraOptions) -> Self {
        Self {
            name: options.name.clone(),
            is_default_view: options.default_view,
            high_quality_url: options.high_quality_url.clone(),
            low_quality_url: options.low_quality_url.clone(),
        }
    }
}

// Frigate uses camera names as map keys, topic segments and path components
fn is_valid_camera_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

pub fn validate_cameras(cameras: &[CameraOptions]) -> Result<Vec<CameraSpec>, AssemblyError> {
    if cameras.is_empty() {
        return Err(AssemblyError::NoCameras);
    }

    if let Some(bad) = cameras.iter().find(|c| !is_valid_camera_name(&c.name)) {
        return Err(AssemblyError::InvalidCameraName(bad.name.clone()));
    }

    if let Some(duplicate) = cameras.iter().map(|c| c.name.as_str()).duplicates().next() {
        return Err(AssemblyError::DuplicateCameraName(duplicate.to_string()));
    }

    Ok(cameras.iter().map(CameraSpec::from).collect())
}
