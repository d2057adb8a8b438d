use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    domain::track::TrackId,
    storage::{catalog::Catalog, error::ResolveError},
};

/// Maps an identifier from a track URL back to a file inside the tracks directory.
///
/// Only filenames the catalog enumerated are ever joined onto the root;
/// the caller's input is used as a lookup key and nothing else.
#[derive(Debug, Clone)]
pub struct TrackResolver {
    root: PathBuf,
    catalog: Arc<Catalog>,
}

impl TrackResolver {
    pub fn new<P: AsRef<Path>>(root: P, catalog: Arc<Catalog>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            catalog,
        }
    }

    pub fn resolve(&self, identifier: &str) -> Result<PathBuf, ResolveError> {
        let not_found = || ResolveError::NotFound(identifier.to_string());

        let id: TrackId = identifier.parse().map_err(|_| not_found())?;
        let filename = self.catalog.resolve(id).ok_or_else(not_found)?;

        Ok(self.root.join(filename))
    }
}
