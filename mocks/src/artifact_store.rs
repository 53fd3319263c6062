use artifact_store::traits::{ArtifactStore, FileAccess};
use std::path::Path;

#[must_use]
pub fn make_store_mock() -> MockArtifactStore {
    MockArtifactStore::new()
}

mockall::mock! {
    pub ArtifactStore {}

    impl ArtifactStore for ArtifactStore {
        type Error = anyhow::Error;

        fn mkdir_p(&self, path: &Path) -> Result<(), anyhow::Error>;
        fn put_from_memory(&self, from: &[u8], to: &Path, access: FileAccess) -> Result<(), anyhow::Error>;
        fn get_to_memory(&self, from: &Path) -> Result<Vec<u8>, anyhow::Error>;
        fn set_access(&self, path: &Path, access: FileAccess) -> Result<(), anyhow::Error>;
        fn file_exists(&self, path: &Path) -> Result<bool, anyhow::Error>;
        fn description(&self) -> String;
    }
}
