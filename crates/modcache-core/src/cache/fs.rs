//! Filesystem primitives shared by the object and asset stores.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{CacheError, CacheResult};

pub(crate) fn read_bytes(path: &Path) -> CacheResult<Vec<u8>> {
    fs::read(path).map_err(|source| CacheError::io(path, source))
}

/// Write `contents` to `path` via a uniquely named sibling temp file and a
/// rename, creating parent directories first. Readers see either the old
/// file or the new one.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> CacheResult<()> {
    let Some(parent) = path.parent() else {
        return Err(CacheError::write(
            path,
            io::Error::other("path has no parent"),
        ));
    };
    let Some(file_name) = path.file_name() else {
        return Err(CacheError::write(
            path,
            io::Error::other("path has no file name"),
        ));
    };

    fs::create_dir_all(parent).map_err(|source| CacheError::write(parent, source))?;

    let tmp_path = parent.join(format!(
        ".{}.tmp.{:016x}",
        file_name.to_string_lossy(),
        rand::random::<u64>()
    ));

    if let Err(source) = fs::write(&tmp_path, contents) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CacheError::write(&tmp_path, source));
    }

    rename_overwrite(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        CacheError::write(path, source)
    })
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

/// Remove a file; a missing file counts as removed.
pub(crate) fn remove_file(path: &Path) -> CacheResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(CacheError::write(path, source)),
    }
}

/// Remove a directory tree; a missing directory counts as removed.
pub(crate) fn remove_dir(path: &Path) -> CacheResult<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(CacheError::write(path, source)),
    }
}

/// How records are laid out beneath an enumeration root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryLayout {
    /// One subdirectory per record, holding the record in the named file.
    Directory(&'static str),
    /// One file per record directly under the root.
    File,
}

/// List the record paths under `root`, sorted by entry name. With
/// [`EntryLayout::Directory`], subdirectories that don't hold the record file
/// are left out. A missing root is empty; a root that cannot be listed is
/// empty and logged.
pub(crate) fn list_entries(root: &Path, layout: EntryLayout) -> Vec<PathBuf> {
    let read_dir = match fs::read_dir(root) {
        Ok(read_dir) => read_dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            warn!(path = %root.display(), error = %err, "Failed to read cache directory");
            return Vec::new();
        }
    };

    let mut entries: Vec<(String, PathBuf)> = read_dir
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                return None;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            match layout {
                EntryLayout::Directory(file) if is_dir => {
                    let record = entry.path().join(file);
                    record.is_file().then_some((name, record))
                }
                EntryLayout::File if !is_dir => Some((name, entry.path())),
                _ => None,
            }
        })
        .collect();

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries.into_iter().map(|(_, path)| path).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_parents_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("c.data");
        write_atomic(&path, b"hello").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"hello");

        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_write_atomic_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.data");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        assert!(remove_file(&dir.path().join("nope")).is_ok());
        assert!(remove_dir(&dir.path().join("nope")).is_ok());
    }

    #[test]
    fn test_list_entries_respects_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("2")).unwrap();
        fs::create_dir_all(dir.path().join("1")).unwrap();
        fs::write(dir.path().join("2").join("profile.data"), b"{}").unwrap();
        fs::write(dir.path().join("1").join("profile.data"), b"{}").unwrap();
        fs::create_dir_all(dir.path().join("3")).unwrap();
        fs::create_dir_all(dir.path().join("1_avatar")).unwrap();
        fs::write(dir.path().join("1_avatar").join("original.png"), b"png").unwrap();
        fs::write(dir.path().join("loose.data"), b"{}").unwrap();
        fs::write(dir.path().join(".hidden.tmp.1"), b"{}").unwrap();

        let dirs = list_entries(dir.path(), EntryLayout::Directory("profile.data"));
        assert_eq!(
            dirs,
            vec![
                dir.path().join("1").join("profile.data"),
                dir.path().join("2").join("profile.data"),
            ]
        );

        let files = list_entries(dir.path(), EntryLayout::File);
        assert_eq!(files, vec![dir.path().join("loose.data")]);
    }

    #[test]
    fn test_list_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_entries(&dir.path().join("missing"), EntryLayout::File).is_empty());
    }
}
