//! Builds a tree object graph from a working directory by recursive walk
//! Stateless: every snapshot walks the whole tree, there is no
//! incremental staging.

use crate::error::Result;
use crate::fs as gfs;
use crate::store::ObjectStore;
use crate::tree::{Mode, Tree, TreeEntry};
use std::path::Path;

#[cfg(unix)]
fn mode_of(path: &Path) -> Result<Mode> {
    use crate::error::IoResultExt;
    use std::os::unix::fs::PermissionsExt;
    let meta = std::fs::symlink_metadata(path).with_path(path)?;
    let executable = meta.permissions().mode() & 0o111 != 0;
    Ok(if executable {
        Mode::Executable
    } else {
        Mode::Regular
    })
}

#[cfg(not(unix))]
fn mode_of(_path: &Path) -> Result<Mode> {
    Ok(Mode::Regular)
}

/// Walks `dir`, writing a blob per file and a tree per directory (depth-first,
/// children before parents), and returns the root tree's hash.
pub fn build(store: &ObjectStore, dir: &Path) -> Result<[u8; 20]> {
    let mut entries = Vec::new();

    let mut children: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| crate::error::Error::Io {
            path: dir.to_path_buf(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .collect();
    children.sort_by_key(|e| e.file_name());

    for child in children {
        let path = child.path();
        let name = child.file_name().into_string().unwrap_or_else(|raw| {
            raw.to_string_lossy().into_owned()
        });
        if name == gfs::REPO_DIR_NAME {
            continue;
        }

        if path.is_dir() {
            let sub_hash = build(store, &path)?;
            entries.push(TreeEntry {
                mode: Mode::Subtree,
                name,
                hash: sub_hash,
            });
        } else if path.is_file() {
            let content = gfs::read_file(&path)?;
            let hash = crate::blob::put(store, &content)?;
            entries.push(TreeEntry {
                mode: mode_of(&path)?,
                name,
                hash,
            });
        }
        // Other file types (sockets, devices) are silently skipped; nothing
        // in this model knows how to represent them.
    }

    let mut tree = Tree::new();
    for entry in entries {
        tree.insert(entry)?;
    }
    tree.write(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::Repo;
    use crate::store::Kind;

    #[test]
    fn builds_nested_tree() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let store = ObjectStore::new(&repo, true);

        std::fs::write(dir.path().join("a.txt"), "hello").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/b.txt"), "world").unwrap();

        let root_hash = build(&store, dir.path()).unwrap();
        let root = Tree::read(&store, &root_hash).unwrap();
        assert_eq!(root.entries().len(), 2);

        let sub_entry = root.find("sub").unwrap();
        assert_eq!(sub_entry.mode, Mode::Subtree);
        let sub_tree = Tree::read(&store, &sub_entry.hash).unwrap();
        let b_entry = sub_tree.find("b.txt").unwrap();
        let (kind, payload) = store.get(&b_entry.hash).unwrap();
        assert_eq!(kind, Kind::Blob);
        assert_eq!(payload, b"world");
    }

    #[test]
    fn skips_repo_metadata_dir() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let store = ObjectStore::new(&repo, true);

        std::fs::write(dir.path().join("a.txt"), "x").unwrap();
        let root_hash = build(&store, dir.path()).unwrap();
        let root = Tree::read(&store, &root_hash).unwrap();
        assert!(root.find(".gitnano").is_none());
        assert_eq!(root.entries().len(), 1);
    }

    #[test]
    fn empty_directory_builds_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let store = ObjectStore::new(&repo, true);

        let root_hash = build(&store, dir.path()).unwrap();
        let root = Tree::read(&store, &root_hash).unwrap();
        assert!(root.entries().is_empty());
    }
}
