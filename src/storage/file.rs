use crate::storage::traits::{PageStore, StorageError, StorageResult};
use crate::url::domain_file_name;
use std::path::{Path, PathBuf};
use url::Url;

/// Writes pages into a directory as `<domain>.html`
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`
    ///
    /// A relative root is resolved against the current working directory so
    /// that returned paths are always absolute.
    pub fn new(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref();
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()?.join(root)
        };

        Ok(Self { root })
    }

    /// Directory pages are written into
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a page fetched from `url` would be written to
    pub fn path_for(&self, url: &Url) -> StorageResult<PathBuf> {
        let file_name =
            domain_file_name(url).ok_or_else(|| StorageError::MissingDomain(url.to_string()))?;
        Ok(self.root.join(file_name))
    }
}

impl PageStore for FileStore {
    fn save(&self, url: &Url, html: &str) -> StorageResult<PathBuf> {
        let path = self.path_for(url)?;

        std::fs::write(&path, html).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Wrote {} bytes to {}", html.len(), path.display());
        Ok(path)
    }
}
