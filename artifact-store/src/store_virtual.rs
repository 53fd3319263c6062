use crate::traits::{ArtifactStore, FileAccess};
use anyhow::Context;
use std::io::{Read, Write};
use std::path::Path;

pub struct InMemoryStore {
    root: vfs::VfsPath,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            root: vfs::VfsPath::new(vfs::MemoryFS::default()),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` means the root itself
    fn resolve(&self, path: &Path) -> anyhow::Result<Option<vfs::VfsPath>> {
        let path = path
            .to_str()
            .with_context(|| format!("Path `{}` is not valid unicode", path.display()))?;
        // Every path is taken relative to the in-memory root
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return Ok(None);
        }
        self.root.join(path).map(Some).context("path join failed")
    }

    fn resolve_file(&self, path: &Path) -> anyhow::Result<vfs::VfsPath> {
        self.resolve(path)?
            .with_context(|| format!("`{}` does not name a file", path.display()))
    }
}

impl ArtifactStore for InMemoryStore {
    type Error = anyhow::Error;

    fn mkdir_p(&self, path: &Path) -> Result<(), Self::Error> {
        match self.resolve(path)? {
            Some(dir) => dir.create_dir_all().context("create_dir_all failed"),
            None => Ok(()),
        }
    }

    fn put_from_memory(
        &self,
        from: &[u8],
        to: &Path,
        _access: FileAccess,
    ) -> Result<(), Self::Error> {
        if let Some(parent) = to.parent() {
            self.mkdir_p(parent)?;
        }

        self.resolve_file(to)?
            .create_file()
            .context("create_file")?
            .write_all(from)
            .context("write_all")
    }

    fn get_to_memory(&self, from: &Path) -> Result<Vec<u8>, Self::Error> {
        tracing::debug!("Calling 'get_to_memory' on path: `{}`", from.display());
        let mut reader = self.resolve_file(from)?.open_file().context("Opening file")?;
        let mut result = Vec::new();
        reader
            .read_to_end(&mut result)
            .context("Read in get_to_memory")?;
        Ok(result)
    }

    fn set_access(&self, path: &Path, _access: FileAccess) -> Result<(), Self::Error> {
        // MemoryFS has no permissions; only the file has to exist
        if self.resolve_file(path)?.is_file().context("is_file")? {
            Ok(())
        } else {
            Err(anyhow::anyhow!("`{}` does not exist", path.display()))
        }
    }

    fn file_exists(&self, path: &Path) -> Result<bool, Self::Error> {
        match self.resolve(path)? {
            Some(file) => file.is_file().context("is_file"),
            None => Ok(false),
        }
    }

    fn description(&self) -> String {
        "memory".to_string()
    }
}
