//! The tree object codec: the binary directory-entry format, ordered
//! insertion, serialization/parsing and path lookup.

use crate::error::{Error, Result};
use crate::hash;
use crate::store::{Kind, ObjectStore};

/// What a tree entry's mode says about the kind of object it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Blob,
    Tree,
}

/// One of the three modes a tree entry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Regular,
    Executable,
    Subtree,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Regular => "100644",
            Mode::Executable => "100755",
            Mode::Subtree => "040000",
        }
    }

    pub fn from_str(s: &str) -> Result<Mode> {
        match s {
            "100644" => Ok(Mode::Regular),
            "100755" => Ok(Mode::Executable),
            "040000" => Ok(Mode::Subtree),
            other => Err(Error::CorruptObject(format!("invalid tree mode {other:?}"))),
        }
    }

    pub fn kind(self) -> EntryKind {
        match self {
            Mode::Subtree => EntryKind::Tree,
            Mode::Regular | Mode::Executable => EntryKind::Blob,
        }
    }
}

/// A single `{ mode, name, hash, kind }` entry of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: Mode,
    pub name: String,
    pub hash: [u8; 20],
}

impl TreeEntry {
    pub fn kind(&self) -> EntryKind {
        self.mode.kind()
    }
}

/// An ordered, deduplicated sequence of tree entries.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Inserts `entry` keeping the list sorted by name. Rejects a
    /// duplicate name with `InvalidTree`.
    pub fn insert(&mut self, entry: TreeEntry) -> Result<()> {
        match self.entries.binary_search_by(|e| e.name.as_str().cmp(entry.name.as_str())) {
            Ok(_) => Err(Error::InvalidTree(format!(
                "duplicate entry name {:?}",
                entry.name
            ))),
            Err(pos) => {
                self.entries.insert(pos, entry);
                Ok(())
            }
        }
    }

    pub fn find(&self, name: &str) -> Option<&TreeEntry> {
        self.entries
            .binary_search_by(|e| e.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Concatenates `<mode> SP <name> NUL <hash-20-binary>` for every entry,
    /// in stored (sorted) order, so the resulting bytes are hash-stable.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for e in &self.entries {
            out.extend_from_slice(e.mode.as_str().as_bytes());
            out.push(b' ');
            out.extend_from_slice(e.name.as_bytes());
            out.push(0);
            out.extend_from_slice(&e.hash);
        }
        out
    }

    /// Parses a tree payload back into an ordered entry list.
    pub fn parse(payload: &[u8]) -> Result<Tree> {
        let mut tree = Tree::new();
        let mut pos = 0;

        while pos < payload.len() {
            let sp = payload[pos..]
                .iter()
                .position(|&b| b == b' ')
                .ok_or_else(|| Error::CorruptObject("truncated tree entry (mode)".into()))?;
            let mode_str = std::str::from_utf8(&payload[pos..pos + sp])
                .map_err(|_| Error::CorruptObject("non-utf8 tree mode".into()))?;
            let mode = Mode::from_str(mode_str)?;
            pos += sp + 1;

            let nul = payload[pos..]
                .iter()
                .position(|&b| b == 0)
                .ok_or_else(|| Error::CorruptObject("truncated tree entry (name)".into()))?;
            let name = std::str::from_utf8(&payload[pos..pos + nul])
                .map_err(|_| Error::CorruptObject("non-utf8 tree entry name".into()))?
                .to_string();
            pos += nul + 1;

            if pos + 20 > payload.len() {
                return Err(Error::CorruptObject("truncated tree entry (hash)".into()));
            }
            let mut raw = [0u8; 20];
            raw.copy_from_slice(&payload[pos..pos + 20]);
            pos += 20;

            // Entries are written in sorted order by the builder; insert()
            // re-validates that invariant on the way back in.
            tree.insert(TreeEntry {
                mode,
                name,
                hash: raw,
            })?;
        }

        Ok(tree)
    }

    /// Writes this tree as an object, returning its hash.
    pub fn write(&self, store: &ObjectStore) -> Result<[u8; 20]> {
        store.put(Kind::Tree, &self.serialize())
    }

    /// Reads and parses the tree named by `hash`.
    pub fn read(store: &ObjectStore, hash: &[u8; 20]) -> Result<Tree> {
        let (kind, payload) = store.get(hash)?;
        if kind != Kind::Tree {
            return Err(Error::TypeMismatch {
                expected: "tree",
                found: kind.tag(),
                hash: hash::to_string(hash),
            });
        }
        Tree::parse(&payload)
    }
}

/// Walks `path` (`/`-separated) from `root_hash`, looking up one component at
/// a time. Fails `NotFound` if a non-terminal component isn't a subtree.
pub fn find_path(store: &ObjectStore, root_hash: &[u8; 20], path: &str) -> Result<TreeEntry> {
    let mut current = Tree::read(store, root_hash)?;
    let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
    if components.is_empty() {
        return Err(Error::InvalidArgument("empty path".into()));
    }

    for (i, comp) in components.iter().enumerate() {
        let entry = current
            .find(comp)
            .ok_or_else(|| Error::NotFound(format!("{path} (at {comp})")))?
            .clone();

        let is_last = i == components.len() - 1;
        if is_last {
            return Ok(entry);
        }
        if entry.kind() != EntryKind::Tree {
            return Err(Error::NotFound(format!(
                "{path}: {comp} is not a directory"
            )));
        }
        current = Tree::read(store, &entry.hash)?;
    }

    unreachable!("components is non-empty, loop always returns")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::Repo;

    fn entry(name: &str, mode: Mode) -> TreeEntry {
        TreeEntry {
            mode,
            name: name.to_string(),
            hash: hash::get_sha1_bytes(name.as_bytes()),
        }
    }

    #[test]
    fn insert_rejects_duplicate_names() {
        let mut t = Tree::new();
        t.insert(entry("a.txt", Mode::Regular)).unwrap();
        assert!(matches!(
            t.insert(entry("a.txt", Mode::Regular)),
            Err(Error::InvalidTree(_))
        ));
    }

    #[test]
    fn roundtrip_preserves_entries() {
        let mut t = Tree::new();
        t.insert(entry("b.txt", Mode::Regular)).unwrap();
        t.insert(entry("a.txt", Mode::Executable)).unwrap();
        t.insert(entry("src", Mode::Subtree)).unwrap();

        let bytes = t.serialize();
        let parsed = Tree::parse(&bytes).unwrap();
        assert_eq!(parsed.entries(), t.entries());
    }

    #[test]
    fn serialization_is_order_independent() {
        let mut t1 = Tree::new();
        t1.insert(entry("z", Mode::Regular)).unwrap();
        t1.insert(entry("a", Mode::Regular)).unwrap();

        let mut t2 = Tree::new();
        t2.insert(entry("a", Mode::Regular)).unwrap();
        t2.insert(entry("z", Mode::Regular)).unwrap();

        assert_eq!(t1.serialize(), t2.serialize());
    }

    #[test]
    fn parse_truncated_is_corrupt() {
        assert!(Tree::parse(b"100644 a.txt\0short").is_err());
    }

    #[test]
    fn find_path_walks_subtrees() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let store = ObjectStore::new(&repo, true);

        let blob_hash = store.put(Kind::Blob, b"hi").unwrap();
        let mut inner = Tree::new();
        inner
            .insert(TreeEntry {
                mode: Mode::Regular,
                name: "file.txt".into(),
                hash: blob_hash,
            })
            .unwrap();
        let inner_hash = inner.write(&store).unwrap();

        let mut outer = Tree::new();
        outer
            .insert(TreeEntry {
                mode: Mode::Subtree,
                name: "src".into(),
                hash: inner_hash,
            })
            .unwrap();
        let outer_hash = outer.write(&store).unwrap();

        let found = find_path(&store, &outer_hash, "src/file.txt").unwrap();
        assert_eq!(found.hash, blob_hash);

        assert!(find_path(&store, &outer_hash, "src/missing.txt").is_err());
        assert!(find_path(&store, &outer_hash, "nope").is_err());
    }
}
