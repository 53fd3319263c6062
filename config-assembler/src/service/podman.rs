use std::borrow::Cow;
use std::fmt::Display;

use super::ServiceDescriptor;

/// A `podman run` invocation matching a service descriptor, for operators who want to
/// start the container by hand.
///
/// The env file is left out: `podman --env-file` takes everything after `=` literally,
/// so the quoted and escaped values written for the compose descriptor would arrive
/// with their quotes. Secrets are passed as bare `-e KEY` instead, which podman fills
/// from the calling shell's environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodmanCommand {
    args: Vec<String>,
}

impl PodmanCommand {
    #[must_use]
    pub fn from_descriptor(descriptor: &ServiceDescriptor, secret_keys: &[&str]) -> Self {
        let mut args = vec![
            "run".to_string(),
            "--detach".to_string(),
            "--name".to_string(),
            descriptor.hostname.clone(),
            "--hostname".to_string(),
            descriptor.hostname.clone(),
            "--restart".to_string(),
            descriptor.restart.to_string(),
            "--shm-size".to_string(),
            descriptor.shm_size.to_string(),
        ];

        for device in &descriptor.devices {
            args.push("--device".to_string());
            args.push(device.clone());
        }
        for volume in &descriptor.volumes {
            args.push("-v".to_string());
            args.push(volume.to_string());
        }
        for port in &descriptor.ports {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        for key in secret_keys {
            args.push("-e".to_string());
            args.push((*key).to_string());
        }
        for (key, value) in &descriptor.environment {
            args.push("-e".to_string());
            args.push(format!("{key}={value}"));
        }

        args.push(descriptor.image.clone());

        Self { args }
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '=' | ',' | '@' | '%' | '+')
}

/// Single-quotes `arg` for a POSIX shell unless every character is safe as is
pub(crate) fn shell_quote(arg: &str) -> Cow<'_, str> {
    if !arg.is_empty() && arg.chars().all(is_shell_safe) {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}

impl Display for PodmanCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "podman")?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}
