//! Deflate compression for object payloads.

use crate::error::{Error, Result};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Hard cap on a single decompressed object, guarding against corrupt or
/// hostile input forcing unbounded memory growth.
const MAX_DECOMPRESSED_SIZE: usize = 100 * 1024 * 1024;

/// Deflates `input` at maximum compression level.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(input)
        .map_err(|e| Error::CorruptObject(format!("compress failed: {e}")))?;
    encoder
        .finish()
        .map_err(|e| Error::CorruptObject(format!("compress failed: {e}")))
}

/// Inflates `input`, growing the output buffer by doubling until the
/// decompressor is satisfied or the hard cap is exceeded.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(input);
    let mut out = Vec::with_capacity(input.len() * 2);
    let mut chunk = vec![0u8; 8 * 1024];

    loop {
        let n = match decoder.read(&mut chunk) {
            Ok(n) => n,
            Err(e) => return Err(Error::CorruptObject(format!("inflate failed: {e}"))),
        };
        if n == 0 {
            break;
        }
        out.extend_from_slice(&chunk[..n]);
        if out.len() > MAX_DECOMPRESSED_SIZE {
            return Err(Error::CorruptObject(
                "decompressed object exceeds 100 MiB cap".into(),
            ));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_small() {
        let data = b"hello, world!".to_vec();
        let compressed = compress(&data).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn roundtrip_large() {
        let data: Vec<u8> = (0..500_000u32).map(|i| (i % 251) as u8).collect();
        let compressed = compress(&data).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn roundtrip_empty() {
        let compressed = compress(&[]).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decompress_garbage_fails() {
        assert!(decompress(b"not actually deflate data").is_err());
    }
}
