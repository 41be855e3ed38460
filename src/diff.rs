//! Tree-to-tree and tree-to-working-directory diffs, at file
//! granularity: no line-level comparison.

use crate::error::Result;
use crate::fs as gfs;
use crate::store::{Kind, ObjectStore};
use crate::tree::{EntryKind, Tree};
use std::collections::BTreeMap;
use std::path::Path;

/// What happened to a path between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Added,
    Modified,
    Deleted,
}

/// One changed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: String,
    pub change: ChangeType,
}

/// Recursively flattens a tree into `relative/path -> blob hash`, skipping
/// subtree entries themselves (only their leaves are recorded).
fn flatten(store: &ObjectStore, tree_hash: &[u8; 20], prefix: &str, out: &mut BTreeMap<String, [u8; 20]>) -> Result<()> {
    let tree = Tree::read(store, tree_hash)?;
    for entry in tree.entries() {
        let path = if prefix.is_empty() {
            entry.name.clone()
        } else {
            format!("{prefix}/{}", entry.name)
        };
        match entry.kind() {
            EntryKind::Blob => {
                out.insert(path, entry.hash);
            }
            EntryKind::Tree => {
                flatten(store, &entry.hash, &path, out)?;
            }
        }
    }
    Ok(())
}

/// Flattens a tree root (or an empty map, for the no-commits-yet state) into
/// `relative/path -> blob hash`. Shared with the restore engine.
pub fn tree_snapshot(store: &ObjectStore, tree_hash: Option<[u8; 20]>) -> Result<BTreeMap<String, [u8; 20]>> {
    let mut out = BTreeMap::new();
    if let Some(hash) = tree_hash {
        flatten(store, &hash, "", &mut out)?;
    }
    Ok(out)
}

fn diff_maps(old: &BTreeMap<String, [u8; 20]>, new: &BTreeMap<String, [u8; 20]>) -> Vec<Change> {
    let mut changes = Vec::new();
    for (path, new_hash) in new {
        match old.get(path) {
            None => changes.push(Change {
                path: path.clone(),
                change: ChangeType::Added,
            }),
            Some(old_hash) if old_hash != new_hash => changes.push(Change {
                path: path.clone(),
                change: ChangeType::Modified,
            }),
            Some(_) => {}
        }
    }
    for path in old.keys() {
        if !new.contains_key(path) {
            changes.push(Change {
                path: path.clone(),
                change: ChangeType::Deleted,
            });
        }
    }
    changes.sort_by(|a, b| a.path.cmp(&b.path));
    changes
}

/// Compares two (optional, to allow the "no commits yet" state) tree roots.
pub fn diff_trees(
    store: &ObjectStore,
    old_tree: Option<[u8; 20]>,
    new_tree: Option<[u8; 20]>,
) -> Result<Vec<Change>> {
    let old = tree_snapshot(store, old_tree)?;
    let new = tree_snapshot(store, new_tree)?;
    Ok(diff_maps(&old, &new))
}

/// Compares a tree root against the live contents of `working_dir`.
pub fn diff_working_dir(
    store: &ObjectStore,
    tree: Option<[u8; 20]>,
    working_dir: &Path,
) -> Result<Vec<Change>> {
    let committed = tree_snapshot(store, tree)?;

    let mut current = BTreeMap::new();
    for path in gfs::list_files(working_dir)? {
        let relative = path
            .strip_prefix(working_dir)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace(std::path::MAIN_SEPARATOR, "/");
        let content = gfs::read_file(&path)?;
        let hash = ObjectStore::hash_of(Kind::Blob, &content);
        current.insert(relative, hash);
    }

    Ok(diff_maps(&committed, &current))
}
