//! The commit object codec: `tree`, optional `parent`, `author` and
//! `committer` lines, a blank line, then the free-form message.

use crate::error::{Error, Result};
use crate::hash;
use crate::store::{Kind, ObjectStore};

/// A parsed commit object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub tree: [u8; 20],
    pub parent: Option<[u8; 20]>,
    pub author: String,
    pub committer: String,
    pub message: String,
}

impl Commit {
    /// Serializes to the on-disk text form.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = String::new();
        out.push_str(&format!("tree {}\n", hash::to_string(&self.tree)));
        if let Some(parent) = self.parent {
            out.push_str(&format!("parent {}\n", hash::to_string(&parent)));
        }
        out.push_str(&format!("author {}\n", self.author));
        out.push_str(&format!("committer {}\n", self.committer));
        out.push('\n');
        out.push_str(&self.message);
        out.into_bytes()
    }

    /// Parses the on-disk text form back into a `Commit`.
    pub fn parse(payload: &[u8]) -> Result<Commit> {
        let text = std::str::from_utf8(payload)
            .map_err(|_| Error::CorruptObject("non-utf8 commit".into()))?;
        let (header, message) = text
            .split_once("\n\n")
            .ok_or_else(|| Error::CorruptObject("commit missing header/message separator".into()))?;

        let mut tree = None;
        let mut parent = None;
        let mut author = None;
        let mut committer = None;

        for line in header.lines() {
            if let Some(rest) = line.strip_prefix("tree ") {
                tree = Some(hash::from_string(rest)?);
            } else if let Some(rest) = line.strip_prefix("parent ") {
                parent = Some(hash::from_string(rest)?);
            } else if let Some(rest) = line.strip_prefix("author ") {
                author = Some(rest.to_string());
            } else if let Some(rest) = line.strip_prefix("committer ") {
                committer = Some(rest.to_string());
            } else {
                return Err(Error::CorruptObject(format!("unrecognized commit header line {line:?}")));
            }
        }

        Ok(Commit {
            tree: tree.ok_or_else(|| Error::CorruptObject("commit missing tree line".into()))?,
            parent,
            author: author.ok_or_else(|| Error::CorruptObject("commit missing author line".into()))?,
            committer: committer
                .ok_or_else(|| Error::CorruptObject("commit missing committer line".into()))?,
            message: message.to_string(),
        })
    }

    /// Writes this commit as an object, returning its hash.
    pub fn write(&self, store: &ObjectStore) -> Result<[u8; 20]> {
        store.put(Kind::Commit, &self.serialize())
    }

    /// Reads and parses the commit named by `hash`.
    pub fn read(store: &ObjectStore, hash: &[u8; 20]) -> Result<Commit> {
        let (kind, payload) = store.get(hash)?;
        if kind != Kind::Commit {
            return Err(Error::TypeMismatch {
                expected: "commit",
                found: kind.tag(),
                hash: hash::to_string(hash),
            });
        }
        Commit::parse(&payload)
    }
}

/// The tree hash named by the commit `hash`, without materializing a `Commit`.
pub fn tree_of(store: &ObjectStore, hash: &[u8; 20]) -> Result<[u8; 20]> {
    Ok(Commit::read(store, hash)?.tree)
}

/// The parent hash of commit `hash`, or `NoParent` if it is a root commit.
pub fn parent_of(store: &ObjectStore, hash: &[u8; 20]) -> Result<[u8; 20]> {
    Commit::read(store, hash)?
        .parent
        .ok_or_else(|| Error::NoParent(hash::to_string(hash)))
}

/// Whether `hash` names an existing commit object (as opposed to merely an
/// existing object of some other kind).
pub fn exists(store: &ObjectStore, hash: &[u8; 20]) -> bool {
    matches!(store.kind_of(hash), Ok(Kind::Commit))
}
