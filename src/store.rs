//! The content-addressed object store: put/get/exists over the fan-out
//! directory layout under `<repo>/objects/`.

use crate::codec;
use crate::error::{Error, IoResultExt, Result};
use crate::hash;
use crate::repo::Repo;
use std::fs;
use std::path::PathBuf;

/// The sum type stored in the object database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
}

impl Kind {
    pub fn tag(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Kind> {
        match tag {
            "blob" => Ok(Kind::Blob),
            "tree" => Ok(Kind::Tree),
            "commit" => Ok(Kind::Commit),
            other => Err(Error::CorruptObject(format!("unknown object kind {other}"))),
        }
    }
}

/// The object store for one repository.
pub struct ObjectStore<'a> {
    repo: &'a Repo,
    /// Whether to re-read and verify every freshly written object.
    pub verify_on_write: bool,
}

impl<'a> ObjectStore<'a> {
    pub fn new(repo: &'a Repo, verify_on_write: bool) -> Self {
        Self {
            repo,
            verify_on_write,
        }
    }

    fn object_path(&self, hash: &[u8; 20]) -> PathBuf {
        let hex = hash::to_string(hash);
        self.repo.objects_path().join(&hex[..2]).join(&hex[2..])
    }

    /// Builds the canonical pre-hash form: `<kind> SP <size> NUL <payload>`.
    fn canonical_form(kind: Kind, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(payload.len() + 16);
        out.extend_from_slice(kind.tag().as_bytes());
        out.push(b' ');
        out.extend_from_slice(payload.len().to_string().as_bytes());
        out.push(0);
        out.extend_from_slice(payload);
        out
    }

    /// The hash `payload` would get under `kind`, without writing anything.
    pub fn hash_of(kind: Kind, payload: &[u8]) -> [u8; 20] {
        hash::get_sha1_bytes(&Self::canonical_form(kind, payload))
    }

    /// Writes `payload` under `kind`, returning its content hash. A no-op
    /// if an object with this hash is already on disk.
    pub fn put(&self, kind: Kind, payload: &[u8]) -> Result<[u8; 20]> {
        let canon = Self::canonical_form(kind, payload);
        let hash = hash::get_sha1_bytes(&canon);
        let path = self.object_path(&hash);

        if path.exists() {
            tracing::debug!(hash = %hash::to_string(&hash), "object dedup hit");
            return Ok(hash);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_path(parent)?;
        }
        let compressed = codec::compress(&canon)?;
        fs::write(&path, &compressed).with_path(&path)?;

        if self.verify_on_write {
            if let Err(e) = self.verify(&hash, kind, payload) {
                let _ = fs::remove_file(&path);
                return Err(e);
            }
        }

        tracing::debug!(hash = %hash::to_string(&hash), kind = kind.tag(), "object written");
        Ok(hash)
    }

    fn verify(&self, hash: &[u8; 20], kind: Kind, payload: &[u8]) -> Result<()> {
        let (read_kind, read_payload) = self.get(hash)?;
        if read_kind != kind || read_payload != payload {
            return Err(Error::IntegrityError(hash::to_string(hash)));
        }
        Ok(())
    }

    /// Reads and inflates the object named by `hash`, parsing its header.
    pub fn get(&self, hash: &[u8; 20]) -> Result<(Kind, Vec<u8>)> {
        let path = self.object_path(hash);
        if !path.exists() {
            return Err(Error::NotFound(hash::to_string(hash)));
        }
        let compressed = fs::read(&path).with_path(&path)?;
        let canon = codec::decompress(&compressed)?;

        let nul_pos = canon
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| Error::CorruptObject(format!("missing header in {}", path.display())))?;
        let header = std::str::from_utf8(&canon[..nul_pos])
            .map_err(|_| Error::CorruptObject("non-utf8 object header".into()))?;
        let (tag, size_str) = header
            .split_once(' ')
            .ok_or_else(|| Error::CorruptObject(format!("malformed header {header:?}")))?;
        let size: usize = size_str
            .parse()
            .map_err(|_| Error::CorruptObject(format!("malformed size {size_str:?}")))?;
        let kind = Kind::from_tag(tag)?;
        let payload = canon[nul_pos + 1..].to_vec();
        if payload.len() != size {
            return Err(Error::CorruptObject(format!(
                "declared size {size} does not match payload length {}",
                payload.len()
            )));
        }

        Ok((kind, payload))
    }

    /// Presence check only; does not verify integrity.
    pub fn exists(&self, hash: &[u8; 20]) -> bool {
        self.object_path(hash).exists()
    }

    /// `kind` of `hash`, without returning the payload.
    pub fn kind_of(&self, hash: &[u8; 20]) -> Result<Kind> {
        Ok(self.get(hash)?.0)
    }

    /// All candidate hashes on disk whose hex form starts with `prefix`
    /// (4-8 chars). Used by the reference resolver.
    pub fn candidates_with_prefix(&self, prefix: &str) -> Result<Vec<[u8; 20]>> {
        let objects_path = self.repo.objects_path();
        let mut out = Vec::new();

        let fanouts: Vec<String> = if prefix.len() >= 2 {
            vec![prefix[..2].to_string()]
        } else {
            // Prefix shorter than the fan-out width; scan every directory.
            match fs::read_dir(&objects_path) {
                Ok(entries) => entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().is_dir())
                    .filter_map(|e| e.file_name().into_string().ok())
                    .collect(),
                Err(_) => return Ok(out),
            }
        };

        for fanout in fanouts {
            let dir = objects_path.join(&fanout);
            let entries = match fs::read_dir(&dir) {
                Ok(e) => e,
                Err(_) => continue,
            };
            for entry in entries.filter_map(|e| e.ok()) {
                let rest = match entry.file_name().into_string() {
                    Ok(s) => s,
                    Err(_) => continue,
                };
                let full_hex = format!("{fanout}{rest}");
                if full_hex.starts_with(prefix) {
                    if let Ok(h) = hash::from_string(&full_hex) {
                        out.push(h);
                    }
                }
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(repo: &Repo) -> ObjectStore<'_> {
        ObjectStore::new(repo, true)
    }

    #[test]
    fn put_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let store = store(&repo);

        let hash = store.put(Kind::Blob, b"hello\n").unwrap();
        let (kind, payload) = store.get(&hash).unwrap();
        assert_eq!(kind, Kind::Blob);
        assert_eq!(payload, b"hello\n");
    }

    #[test]
    fn put_is_idempotent_and_deduplicates() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let store = store(&repo);

        let h1 = store.put(Kind::Blob, b"same content").unwrap();
        let h2 = store.put(Kind::Blob, b"same content").unwrap();
        assert_eq!(h1, h2);

        let count = crate::fs::traverse_path(&repo.objects_path())
            .unwrap()
            .into_iter()
            .filter(|p| p.is_file())
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn exists_does_not_require_get() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let store = store(&repo);

        let hash = store.put(Kind::Tree, b"tree-bytes").unwrap();
        assert!(store.exists(&hash));
        assert!(!store.exists(&hash::get_sha1_bytes(b"never written")));
    }

    #[test]
    fn get_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let store = store(&repo);
        let missing = hash::get_sha1_bytes(b"nope");
        assert!(matches!(store.get(&missing), Err(Error::NotFound(_))));
    }

    #[test]
    fn prefix_candidates_are_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let store = store(&repo);

        let hash = store.put(Kind::Commit, b"commit body").unwrap();
        let hex = hash::to_string(&hash);
        let candidates = store.candidates_with_prefix(&hex[..6]).unwrap();
        assert!(candidates.contains(&hash));
    }
}
