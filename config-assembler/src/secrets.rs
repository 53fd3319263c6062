use std::{fmt::Debug, path::Path};

use crate::error::AssemblyError;

/// Secret material read from disk. Never printed, not even through `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret(<redacted>)")
    }
}

/// Strips exactly one trailing `\n` or `\r\n`. Other trailing whitespace is part of the secret.
#[must_use]
pub fn strip_line_terminator(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}

pub fn read_secret_file(path: &Path) -> Result<Secret, AssemblyError> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| AssemblyError::MissingSecretFile {
            path: path.to_path_buf(),
            source,
        })?;

    let secret = strip_line_terminator(&contents);
    if secret.is_empty() {
        tracing::warn!("Secret file `{}` is empty", path.display());
    }

    Ok(Secret::new(secret))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secrets {
    pub camera_password: Secret,
    pub mqtt_password: Secret,
}

impl Secrets {
    pub fn read(camera_password_file: &Path, mqtt_password_file: &Path) -> Result<Self, AssemblyError> {
        let camera_password = read_secret_file(camera_password_file)?;
        let mqtt_password = read_secret_file(mqtt_password_file)?;

        tracing::debug!(
            "Read secrets from `{}` and `{}`",
            camera_password_file.display(),
            mqtt_password_file.display()
        );

        Ok(Self {
            camera_password,
            mqtt_password,
        })
    }
}
