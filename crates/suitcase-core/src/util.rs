//! Small filesystem and URL helpers.

use std::path::{Path, PathBuf};

use tracing::debug;
use url::form_urlencoded;

use crate::error::Result;

/// Build a URL query string, e.g. `?q=rust+lang&page=2`.
///
/// Keys and values are form-urlencoded. An empty slice yields `"?"`.
#[must_use]
pub fn query_string<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::for_suffix(String::from("?"), 1);
    for (key, value) in params {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    serializer.finish()
}

/// Delete everything inside `folder`, and `folder` itself if `delete_folder`.
///
/// Symbolic links inside `folder` are removed, never followed. A missing
/// folder is not an error.
///
/// # Errors
///
/// Returns the first I/O error encountered while deleting.
pub fn delete_folder_contents(folder: &Path, delete_folder: bool) -> Result<()> {
    if !folder.exists() {
        return Ok(());
    }
    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            delete_folder_contents(&path, true)?;
        } else if file_type.is_symlink() {
            // Directory links on Windows need remove_dir.
            std::fs::remove_file(&path).or_else(|_| std::fs::remove_dir(&path))?;
        } else {
            std::fs::remove_file(&path)?;
        }
    }
    if delete_folder {
        std::fs::remove_dir(folder)?;
    }
    debug!(folder = %folder.display(), delete_folder, "cleared folder");
    Ok(())
}

/// Delete `folder` and everything in it.
///
/// # Errors
///
/// Returns the first I/O error encountered while deleting.
pub fn delete_folder(folder: &Path) -> Result<()> {
    delete_folder_contents(folder, true)
}

/// Return `base/name`, creating it if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_folder(base: &Path, name: &str) -> Result<PathBuf> {
    let folder = base.join(name);
    if !folder.is_dir() {
        std::fs::create_dir_all(&folder)?;
    }
    Ok(folder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_query_string_encodes_pairs() {
        let query = query_string(&[("q", "rust lang"), ("tag", "a&b"), ("page", "2")]);
        assert_eq!(query, "?q=rust+lang&tag=a%26b&page=2");
    }

    #[test]
    fn test_query_string_empty() {
        let params: [(&str, &str); 0] = [];
        assert_eq!(query_string(&params), "?");
    }

    #[test]
    fn test_query_string_owned_values() {
        let params = vec![("name".to_string(), "Zoë".to_string())];
        assert_eq!(query_string(&params), "?name=Zo%C3%AB");
    }

    #[test]
    fn test_delete_folder_contents_keeps_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("cache");
        std::fs::create_dir_all(root.join("nested/deeper")).unwrap();
        std::fs::write(root.join("a.txt"), "a").unwrap();
        std::fs::write(root.join("nested/deeper/b.txt"), "b").unwrap();

        delete_folder_contents(&root, false).unwrap();

        assert!(root.is_dir());
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn test_delete_folder_removes_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("tmp");
        std::fs::create_dir_all(root.join("x")).unwrap();

        delete_folder(&root).unwrap();
        assert!(!root.exists());

        delete_folder(&root).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_folder_contents_does_not_follow_links() {
        let dir = TempDir::new().unwrap();
        let precious = dir.path().join("precious");
        let cache = dir.path().join("cache");
        std::fs::create_dir_all(&precious).unwrap();
        std::fs::create_dir_all(&cache).unwrap();
        std::fs::write(precious.join("keep.txt"), "keep").unwrap();
        std::fs::write(cache.join("stale.txt"), "stale").unwrap();
        std::os::unix::fs::symlink(&precious, cache.join("link")).unwrap();
        std::os::unix::fs::symlink(precious.join("keep.txt"), cache.join("file_link")).unwrap();

        delete_folder_contents(&cache, false).unwrap();

        assert_eq!(std::fs::read_dir(&cache).unwrap().count(), 0);
        assert!(precious.join("keep.txt").is_file());
    }

    #[test]
    fn test_ensure_folder_creates_once() {
        let dir = TempDir::new().unwrap();
        let first = ensure_folder(dir.path(), "downloads").unwrap();
        let second = ensure_folder(dir.path(), "downloads").unwrap();

        assert!(first.is_dir());
        assert_eq!(first, second);
    }
}
