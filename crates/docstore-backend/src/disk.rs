use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{BackendError, BackendResult};
use crate::traits::StorageBackend;

/// Local-disk storage backend: one file per key under a root directory.
///
/// Keys may contain arbitrary characters (object UIDs, `user/...`
/// namespaced keys, the index key), so filenames are the hex encoding of
/// the key rather than the key itself. Writes go through a sibling temp
/// file followed by a rename, so a failed write never leaves a torn value
/// under the key.
pub struct DiskBackend {
    root: PathBuf,
}

impl DiskBackend {
    /// Open a backend rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> BackendResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The root directory holding the stored files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(hex::encode(key.as_bytes()))
    }
}

impl StorageBackend for DiskBackend {
    fn put(&self, key: &str, value: &[u8]) -> BackendResult<()> {
        if key.is_empty() {
            return Err(BackendError::EmptyKey);
        }
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        tracing::trace!(key, bytes = value.len(), "wrote value");
        Ok(())
    }

    fn get(&self, key: &str) -> BackendResult<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, key: &str) -> BackendResult<bool> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for DiskBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskBackend").field("root", &self.root).finish()
    }
}
