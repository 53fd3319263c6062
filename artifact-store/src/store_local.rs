use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::traits::{ArtifactStore, FileAccess};

pub struct LocalStore {
    base_dir: PathBuf,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        let base_dir = base_dir.as_ref();
        tracing::debug!("Creating local artifact store in {}", base_dir.display());

        Self {
            base_dir: base_dir.to_path_buf(),
        }
    }

    fn resolve<P: AsRef<Path>>(&self, path: &P) -> PathBuf {
        self.base_dir.join(path)
    }
}

#[cfg(unix)]
fn set_file_access(file: &std::fs::File, access: FileAccess) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(access.unix_mode()))
}

#[cfg(unix)]
fn set_path_access(path: &Path, access: FileAccess) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(access.unix_mode()))
}

#[cfg(not(unix))]
fn set_file_access(_file: &std::fs::File, _access: FileAccess) -> std::io::Result<()> {
    Ok(())
}

#[cfg(not(unix))]
fn set_path_access(path: &Path, _access: FileAccess) -> std::io::Result<()> {
    std::fs::metadata(path).map(|_| ())
}

impl ArtifactStore for LocalStore {
    type Error = anyhow::Error;

    fn mkdir_p(&self, path: &Path) -> Result<(), Self::Error> {
        let full_path = self.resolve(&path);
        std::fs::create_dir_all(&full_path)
            .with_context(|| format!("Creating directory: {}", full_path.display()))
    }

    fn put_from_memory(&self, from: &[u8], to: &Path, access: FileAccess) -> Result<(), Self::Error> {
        let to_path = self.resolve(&to);
        tracing::debug!(
            "Calling 'put_from_memory' for memory data with size {} bytes to path: `{}`",
            from.len(),
            to_path.display()
        );

        let parent = match to_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => self.base_dir.clone(),
        };
        self.mkdir_p(&parent)?;

        // Written next to the target so the final rename stays on one filesystem
        let mut temp = tempfile::NamedTempFile::new_in(&parent)
            .with_context(|| format!("Creating temporary file in {}", parent.display()))?;
        set_file_access(temp.as_file(), access).context("Setting file permissions")?;
        temp.write_all(from).context("Writing temporary file")?;
        temp.as_file().sync_all().context("Syncing temporary file")?;
        temp.persist(&to_path)
            .with_context(|| format!("Moving artifact into place: {}", to_path.display()))?;

        Ok(())
    }

    fn get_to_memory(&self, from: &Path) -> Result<Vec<u8>, Self::Error> {
        let from_path = self.resolve(&from);
        tracing::debug!("Calling 'get_to_memory' on path: `{}`", from_path.display());
        std::fs::read(&from_path).with_context(|| format!("Reading {}", from_path.display()))
    }

    fn set_access(&self, path: &Path, access: FileAccess) -> Result<(), Self::Error> {
        let full_path = self.resolve(&path);
        tracing::debug!("Calling 'set_access' on path: `{}`", full_path.display());
        set_path_access(&full_path, access)
            .with_context(|| format!("Setting permissions of {}", full_path.display()))
    }

    fn file_exists(&self, path: &Path) -> Result<bool, Self::Error> {
        let full_path = self.resolve(&path);
        tracing::debug!("Calling 'file_exists' on path: `{}`", full_path.display());
        Ok(full_path.is_file())
    }

    fn description(&self) -> String {
        format!("local:{}", self.base_dir.display())
    }
}
