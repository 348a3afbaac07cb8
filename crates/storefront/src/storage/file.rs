//! File-backed storage: one JSON document per key.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a uniquely named temporary file in the same directory which
/// is then renamed over the target, so readers see either the old or the new
/// document, never a partial one. A failed write removes its temporary file.
/// The directory is created on first write.
///
/// Each write replaces the whole document. Two processes holding their own
/// copy of a document will overwrite each other's changes; only one writer
/// should own a data directory at a time.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. Nothing is touched until the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the documents.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for keys that are empty, start with
    /// a dot, or contain anything besides ASCII letters, digits, `-`, `_`, `.`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let io_err = |source: std::io::Error| StorageError::Io {
            key: key.to_owned(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Dropped (and deleted) on every early return below
        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{key}."))
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(io_err)?;
        tmp.write_all(value.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;

        persist(tmp, &path).map_err(io_err)?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote storage document");
        Ok(())
    }
}

fn persist(tmp: NamedTempFile, path: &Path) -> std::io::Result<()> {
    tmp.persist(path).map(drop).map_err(|e| e.error)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("luxelane-products").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        store.set("luxelane-products", "[]").unwrap();
        store.set("luxelane-products", "[1]").unwrap();

        assert_eq!(
            store.get("luxelane-products").unwrap().as_deref(),
            Some("[1]")
        );
        assert!(dir.path().join("nested/luxelane-products.json").exists());
        assert_eq!(entries(&dir.path().join("nested")), ["luxelane-products.json"]);
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way makes the final rename fail.
        std::fs::create_dir_all(dir.path().join("catalog.json")).unwrap();
        let mut store = FileStore::new(dir.path());

        assert!(matches!(
            store.set("catalog", "[]"),
            Err(StorageError::Io { .. })
        ));
        assert_eq!(entries(dir.path()), ["catalog.json"]);
    }

    #[test]
    fn test_stores_sharing_a_directory_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();

        let writers: Vec<_> = ["first", "second"]
            .into_iter()
            .map(|label| {
                let mut store = FileStore::new(dir.path());
                std::thread::spawn(move || {
                    for i in 0..20 {
                        store.set("catalog", &format!("[\"{label}-{i}\"]")).unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let last = FileStore::new(dir.path()).get("catalog").unwrap().unwrap();
        assert!(last == r#"["first-19"]"# || last == r#"["second-19"]"#);
        assert_eq!(entries(dir.path()), ["catalog.json"]);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let store = FileStore::new("/tmp/unused");
        for key in ["", "../etc/passwd", ".hidden", "a/b", "a b"] {
            assert!(
                matches!(store.path_for(key), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the document should be cannot be read as a string.
        std::fs::create_dir_all(dir.path().join("catalog.json")).unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.get("catalog"),
            Err(StorageError::Io { .. })
        ));
    }
}
