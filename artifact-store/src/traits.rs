use std::path::Path;

/// Who may read a written artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAccess {
    /// 0644
    Shared,
    /// 0600, for anything holding secrets
    OwnerOnly,
}

impl FileAccess {
    #[must_use]
    pub const fn unix_mode(self) -> u32 {
        match self {
            FileAccess::Shared => 0o644,
            FileAccess::OwnerOnly => 0o600,
        }
    }
}

/// Destination for generated artifacts. Implementations must replace a file as a whole:
/// a reader sees either the previous content or the new one.
pub trait ArtifactStore {
    type Error;

    fn mkdir_p(&self, path: &Path) -> Result<(), Self::Error>;
    fn put_from_memory(&self, from: &[u8], to: &Path, access: FileAccess)
    -> Result<(), Self::Error>;
    fn get_to_memory(&self, from: &Path) -> Result<Vec<u8>, Self::Error>;
    /// Applies `access` to an existing file without touching its content
    fn set_access(&self, path: &Path, access: FileAccess) -> Result<(), Self::Error>;
    fn file_exists(&self, path: &Path) -> Result<bool, Self::Error>;
    fn description(&self) -> String;
}
