//! Thin wrapper around sha1: the content address of every object in the store.

use crate::error::{Error, IoResultExt, Result};
use sha1::{Digest, Sha1};
use std::{fs, io::Read};

/// Streaming chunk size used when digesting a file.
const CHUNK_SIZE: usize = 8 * 1024;

/// Digests the contents of a file into a SHA1 array, streaming it in
/// `CHUNK_SIZE` pieces so the whole file never needs to live in memory.
pub fn digest_file(file: &mut fs::File) -> Result<[u8; 20]> {
    let mut hasher = Sha1::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).with_path("<file>")?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().into())
}

/// Generates the SHA1 in string form from the given content.
pub fn get_sha1_string(contents: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(contents);
    hex::encode(hasher.finalize())
}

/// Generates the SHA1 in bytes form from the given content.
pub fn get_sha1_bytes(contents: &[u8]) -> [u8; 20] {
    let mut hasher = Sha1::new();
    hasher.update(contents);
    hasher.finalize().into()
}

#[inline]
/// Just a nicer name to `hex::encode(hash)`.
pub fn to_string(hash: &[u8; 20]) -> String {
    hex::encode(hash)
}

/// Converts a SHA1 hex string into a SHA1 byte array.
pub fn from_string(s: &str) -> Result<[u8; 20]> {
    let bytes = hex::decode(s).map_err(|e| Error::InvalidArgument(format!("bad hash {s}: {e}")))?;
    if bytes.len() != 20 {
        return Err(Error::InvalidArgument(format!(
            "hash {s} decodes to {} bytes, expected 20",
            bytes.len()
        )));
    }
    let mut out = [0u8; 20];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Whether `s` looks like a full 40-character lowercase hex hash.
pub fn is_full_hex(s: &str) -> bool {
    s.len() == 40 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Whether `s` looks like a short hex prefix in the 4-8 character range.
pub fn is_hex_prefix(s: &str) -> bool {
    (4..=8).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn sha1_string_is_deterministic() {
        let a1 = get_sha1_string(b"hello\n");
        let a2 = get_sha1_string(b"hello\n");
        assert_eq!(a1, a2);
        assert_ne!(a1, get_sha1_string(b"world\n"));
    }

    #[test]
    fn hex_roundtrip() {
        let h = get_sha1_bytes(b"hello\n");
        let s = to_string(&h);
        assert_eq!(s.len(), 40);
        assert_eq!(from_string(&s).unwrap(), h);
    }

    #[test]
    fn digest_file_matches_in_memory_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        let content = b"some file content that spans more than one chunk\n".repeat(400);
        fs::write(&path, &content).unwrap();

        let mut f = fs::File::open(&path).unwrap();
        let from_file = digest_file(&mut f).unwrap();
        let from_mem = get_sha1_bytes(&content);
        assert_eq!(from_file, from_mem);
    }

    #[test]
    fn digest_file_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::File::create(&path).unwrap().flush().unwrap();
        let mut f = fs::File::open(&path).unwrap();
        assert_eq!(digest_file(&mut f).unwrap(), get_sha1_bytes(b""));
    }

    #[test]
    fn prefix_classification() {
        assert!(is_hex_prefix("abcd"));
        assert!(is_hex_prefix("abcdefg1"));
        assert!(!is_hex_prefix("abc"));
        assert!(!is_hex_prefix("123456789"));
        assert!(!is_full_hex("abcd"));
    }

    #[test]
    fn from_string_rejects_wrong_length() {
        assert!(from_string("abcd").is_err());
    }
}
