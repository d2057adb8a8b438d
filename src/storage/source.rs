//! Where catalog entries come from

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::storage::error::CatalogError;

/// Anything that can enumerate track names in a stable-for-now order.
pub trait CatalogSource {
    fn list(&self) -> Result<Vec<String>, CatalogError>;
}

/// Lists the immediate entries of one directory on the local filesystem.
///
/// No recursion, no extension filter and no sorting: the order is whatever
/// the OS directory listing yields. Subdirectories are skipped because
/// they cannot be delivered as a track.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for DirectorySource {
    fn list(&self) -> Result<Vec<String>, CatalogError> {
        let meta = std::fs::metadata(&self.root).map_err(|source| CatalogError::Unreadable {
            path: self.root.clone(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(CatalogError::NotADirectory(self.root.clone()));
        }

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .min_depth(1)
            .max_depth(1);

        let mut names = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.path().is_dir() {
                log::debug!("skipping subdirectory {}", entry.path().display());
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) if name.contains(['\n', '\r']) => log::warn!(
                    "skipping track with a line break in its name: {name:?}"
                ),
                Some(name) => names.push(name.to_string()),
                None => log::warn!(
                    "skipping track with non UTF-8 name: {}",
                    entry.path().to_string_lossy()
                ),
            }
        }
        Ok(names)
    }
}
