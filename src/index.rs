//! The index: an informational, append-only log of paths the `add`
//! operation has observed. Never consulted when building a tree, purely a
//! human-facing record, truncated after each successful snapshot.

use crate::error::{Error, Result};
use crate::fs as gfs;
use crate::hash;
use crate::repo::Repo;

/// One recorded line: a blob hash paired with the path it was observed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub hash: [u8; 20],
    pub path: String,
}

/// Appends one `<40-hex> SP <path>\n` line per entry.
pub fn record(repo: &Repo, entries: &[IndexEntry]) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let mut buf = String::new();
    for entry in entries {
        buf.push_str(&format!("{} {}\n", hash::to_string(&entry.hash), entry.path));
    }

    let path = repo.index_path();
    let mut existing = gfs::read_file(&path).unwrap_or_default();
    existing.extend_from_slice(buf.as_bytes());
    gfs::write_file(&path, &existing)
}

/// Reads every entry recorded so far, oldest first.
pub fn read(repo: &Repo) -> Result<Vec<IndexEntry>> {
    let content = gfs::read_file(&repo.index_path())?;
    let text = std::str::from_utf8(&content)
        .map_err(|_| Error::CorruptObject("non-utf8 index".into()))?;

    let mut out = Vec::new();
    for line in text.lines() {
        let (hex, path) = line
            .split_once(' ')
            .ok_or_else(|| Error::CorruptObject(format!("malformed index line {line:?}")))?;
        out.push(IndexEntry {
            hash: hash::from_string(hex)?,
            path: path.to_string(),
        });
    }
    Ok(out)
}

/// Empties the index after a successful snapshot.
pub fn truncate(repo: &Repo) -> Result<()> {
    gfs::write_file(&repo.index_path(), b"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();

        let entries = vec![
            IndexEntry { hash: hash::get_sha1_bytes(b"a"), path: "a.txt".into() },
            IndexEntry { hash: hash::get_sha1_bytes(b"b"), path: "b.txt".into() },
        ];
        record(&repo, &entries).unwrap();

        let read_back = read(&repo).unwrap();
        assert_eq!(read_back, entries);
    }

    #[test]
    fn truncate_empties_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        record(&repo, &[IndexEntry { hash: hash::get_sha1_bytes(b"a"), path: "a.txt".into() }]).unwrap();
        truncate(&repo).unwrap();
        assert!(read(&repo).unwrap().is_empty());
    }

    #[test]
    fn recording_no_entries_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        record(&repo, &[]).unwrap();
        assert!(read(&repo).unwrap().is_empty());
    }
}
