use std::path::Path;

use store_local::LocalStore;
use store_virtual::InMemoryStore;
use traits::ArtifactStore;

mod store_local;
mod store_virtual;
pub mod traits;


/// A store rooted at `base_dir`; relative artifact paths are resolved against it,
/// absolute ones are used as they are.
#[must_use]
pub fn make_local_store(
    base_dir: impl AsRef<Path>,
) -> Box<dyn ArtifactStore<Error = anyhow::Error>> {
    Box::new(LocalStore::new(base_dir))
}

#[must_use]
pub fn make_inmemory_store() -> Box<dyn ArtifactStore<Error = anyhow::Error>> {
    Box::new(InMemoryStore::new())
}
