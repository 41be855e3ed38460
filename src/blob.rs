//! Thin typed facade over the object store, constrained to `Kind::Blob`.

use crate::error::{Error, Result};
use crate::store::{Kind, ObjectStore};

/// Writes raw file contents as a blob object, returning its hash.
pub fn put(store: &ObjectStore, content: &[u8]) -> Result<[u8; 20]> {
    store.put(Kind::Blob, content)
}

/// Reads the content of the blob named by `hash`. Fails `TypeMismatch` if
/// `hash` names an object of a different kind.
pub fn get(store: &ObjectStore, hash: &[u8; 20]) -> Result<Vec<u8>> {
    let (kind, payload) = store.get(hash)?;
    if kind != Kind::Blob {
        return Err(Error::TypeMismatch {
            expected: "blob",
            found: kind.tag(),
            hash: crate::hash::to_string(hash),
        });
    }
    Ok(payload)
}
