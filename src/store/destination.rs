use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::INDEX_FILE_NAME;
use crate::error::{PostshiftError, Result};

pub fn item_dir(destination_root: &Path, slug: &str) -> PathBuf {
    destination_root.join(slug)
}

/// Create `destination_root/slug`. Never reuses a directory that is already there.
pub fn create_item_dir(destination_root: &Path, slug: &str) -> Result<PathBuf> {
    let dir = item_dir(destination_root, slug);
    match fs::create_dir(&dir) {
        Ok(()) => Ok(dir),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            Err(PostshiftError::DestinationConflict(dir))
        }
        Err(err) => Err(PostshiftError::destination_unwritable(dir, err)),
    }
}

/// Write `content` to `dir/index.md` through a staging file and a rename, so
/// `index.md` is either absent or complete.
pub fn write_index(dir: &Path, content: &[u8]) -> Result<PathBuf> {
    let index_path = dir.join(INDEX_FILE_NAME);
    let staging_path = dir.join(format!(".{INDEX_FILE_NAME}.{}.staging", Uuid::new_v4()));

    if let Err(err) = fs::write(&staging_path, content) {
        let _ = fs::remove_file(&staging_path);
        return Err(PostshiftError::destination_unwritable(staging_path, err));
    }

    if let Err(err) = fs::rename(&staging_path, &index_path) {
        let _ = fs::remove_file(&staging_path);
        return Err(PostshiftError::destination_unwritable(index_path, err));
    }

    Ok(index_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn create_item_dir_conflicts_on_existing_directory() {
        let dir = tempdir().unwrap();
        let created = create_item_dir(dir.path(), "hello-world").unwrap();
        assert!(created.is_dir());

        let err = create_item_dir(dir.path(), "hello-world").unwrap_err();
        let PostshiftError::DestinationConflict(path) = err else {
            panic!("expected destination conflict");
        };
        assert_eq!(path, dir.path().join("hello-world"));
    }

    #[test]
    fn create_item_dir_conflicts_on_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("taken"), "x").unwrap();
        let err = create_item_dir(dir.path(), "taken").unwrap_err();
        assert_eq!(err.code(), "destination_conflict");
    }

    #[test]
    fn create_item_dir_under_missing_root_is_unwritable() {
        let dir = tempdir().unwrap();
        let err = create_item_dir(&dir.path().join("missing"), "post").unwrap_err();
        assert_eq!(err.code(), "destination_unwritable");
    }

    #[test]
    fn write_index_leaves_only_index_md() {
        let dir = tempdir().unwrap();
        let path = write_index(dir.path(), b"---\nbody\n").unwrap();

        assert_eq!(path, dir.path().join("index.md"));
        assert_eq!(fs::read(&path).unwrap(), b"---\nbody\n");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
