use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::fs::{self, EntryLayout};
use crate::error::{CacheError, CacheResult};

/// JSON record storage rooted at a cache directory.
///
/// Writes report failure through `CacheResult`; reads collapse every miss
/// (missing, corrupt, unreadable) into `None` so callers fall back to a
/// fetch.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    root: PathBuf,
}

impl ObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn save<T: Serialize + ?Sized>(
        &self,
        relative: impl AsRef<Path>,
        record: &T,
    ) -> CacheResult<()> {
        let path = self.resolve(relative);
        let contents = serde_json::to_string_pretty(record).map_err(CacheError::Encode)?;
        fs::write_atomic(&path, contents.as_bytes())
    }

    /// Load a record, distinguishing why it could not be produced.
    pub fn try_load<T: DeserializeOwned>(&self, relative: impl AsRef<Path>) -> CacheResult<T> {
        read_record(&self.resolve(relative))
    }

    pub fn load<T: DeserializeOwned>(&self, relative: impl AsRef<Path>) -> Option<T> {
        match self.try_load(relative) {
            Ok(record) => Some(record),
            Err(CacheError::NotFound(path)) => {
                debug!(path = %path.display(), "Cache miss");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to load cached record");
                None
            }
        }
    }

    pub fn delete(&self, relative: impl AsRef<Path>) -> CacheResult<()> {
        fs::remove_file(&self.resolve(relative))
    }

    pub fn delete_directory(&self, relative: impl AsRef<Path>) -> CacheResult<()> {
        fs::remove_dir(&self.resolve(relative))
    }

    /// Lazily parse the records under `root`, skipping the first `offset`
    /// entries. Entries that fail to parse are skipped.
    pub fn enumerate<T: DeserializeOwned>(
        &self,
        root: impl AsRef<Path>,
        layout: EntryLayout,
        offset: usize,
    ) -> Records<T> {
        let entries = fs::list_entries(&self.resolve(root), layout);
        let mut entries = entries.into_iter();
        if offset > 0 {
            entries.nth(offset - 1);
        }
        Records {
            entries,
            _marker: PhantomData,
        }
    }

    pub fn count_entries(&self, root: impl AsRef<Path>, layout: EntryLayout) -> usize {
        fs::list_entries(&self.resolve(root), layout).len()
    }
}

fn read_record<T: DeserializeOwned>(path: &Path) -> CacheResult<T> {
    let contents = fs::read_bytes(path)?;
    serde_json::from_slice(&contents).map_err(|source| CacheError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Single-pass sequence of records produced by [`ObjectStore::enumerate`].
pub struct Records<T> {
    entries: std::vec::IntoIter<PathBuf>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Iterator for Records<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        for path in self.entries.by_ref() {
            match read_record(&path) {
                Ok(record) => return Some(record),
                Err(e) => debug!(error = %e, "Skipping cache entry"),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.entries.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: i64,
        name: String,
    }

    fn record(id: i64) -> Record {
        Record {
            id,
            name: format!("record {}", id),
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        store.save("a/b/1.data", &record(1)).unwrap();
        assert_eq!(store.load::<Record>("a/b/1.data"), Some(record(1)));
    }

    #[test]
    fn test_saved_file_is_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        store.save("1.data", &record(1)).unwrap();
        let text = std::fs::read_to_string(dir.path().join("1.data")).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"name\": \"record 1\""));
    }

    #[test]
    fn test_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        assert_eq!(store.load::<Record>("nope.data"), None);
        assert!(matches!(
            store.try_load::<Record>("nope.data"),
            Err(CacheError::NotFound(_))
        ));
    }

    #[test]
    fn test_corrupt_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        std::fs::write(dir.path().join("bad.data"), "{\"id\": 1, \"na").unwrap();
        assert_eq!(store.load::<Record>("bad.data"), None);
        assert!(matches!(
            store.try_load::<Record>("bad.data"),
            Err(CacheError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        store.save("1.data", &record(1)).unwrap();
        store.delete("1.data").unwrap();
        store.delete("1.data").unwrap();
        assert_eq!(store.load::<Record>("1.data"), None);
    }

    #[test]
    fn test_enumerate_with_offset() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        for id in 1..=5 {
            store.save(format!("root/{}/r.data", id), &record(id)).unwrap();
        }
        let layout = EntryLayout::Directory("r.data");
        let all: Vec<Record> = store.enumerate("root", layout, 0).collect();
        assert_eq!(all.len(), 5);
        let rest: Vec<Record> = store.enumerate("root", layout, 2).collect();
        assert_eq!(rest.len(), 3);
        assert_eq!(store.enumerate::<Record>("root", layout, 9).count(), 0);
        assert_eq!(store.count_entries("root", layout), 5);
    }

    #[test]
    fn test_enumerate_skips_corrupt_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        for id in 1..=3 {
            store.save(format!("root/{}.data", id), &record(id)).unwrap();
        }
        std::fs::write(dir.path().join("root").join("4.data"), "garbage").unwrap();
        let records: Vec<Record> = store.enumerate("root", EntryLayout::File, 0).collect();
        assert_eq!(records, vec![record(1), record(2), record(3)]);
    }

    #[test]
    fn test_enumerate_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        assert_eq!(store.enumerate::<Record>("missing", EntryLayout::File, 0).count(), 0);
    }
}
