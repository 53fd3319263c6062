use std::path::PathBuf;

use crate::config::ConfigError;

/// Everything that can stop an assembly. All of these are raised before any artifact
/// is written.
#[derive(thiserror::Error, Debug)]
pub enum AssemblyError {
    #[error("Secret file `{}` is missing or unreadable: {source}", path.display())]
    MissingSecretFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Port `{name}` must be within 1-65535, got {value}")]
    InvalidPort { name: String, value: i64 },
    #[error("Retention `{name}` must be a non-negative number of days, got {value}")]
    InvalidRetentionValue { name: String, value: i64 },
    #[error("Camera name `{0}` is used by more than one camera")]
    DuplicateCameraName(String),
    #[error("Camera name `{0}` is invalid; only ASCII letters, digits, `_` and `-` are allowed")]
    InvalidCameraName(String),
    #[error("No cameras configured; at least one is required")]
    NoCameras,
    #[error("Could not read the deployment options: {0}")]
    UnreadableInput(#[from] ConfigError),
    #[error("Rendering the {artifact} failed: {reason}")]
    Render {
        artifact: &'static str,
        reason: String,
    },
}
