/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Compressed blob framing for embedded pattern rasters
//!
//! A raster travels inside the tree as a four byte big endian
//! uncompressed-length prefix followed by a zlib stream. The prefix is
//! validated on the way out, so a blob that inflates to a different
//! size than it announces is rejected.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use ochre_core::bytestream::OcByteIoError;

use crate::errors::AslDecodeErrors;

/// Compress `data` into a length-prefixed zlib blob
pub fn compress(data: &[u8]) -> Result<Vec<u8>, AslDecodeErrors> {
    let length = u32::try_from(data.len())
        .map_err(|_| AslDecodeErrors::Generic("blob larger than the length prefix can carry"))?;

    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2 + 8), Compression::default());
    encoder.write_all(data).map_err(OcByteIoError::from)?;
    let compressed = encoder.finish().map_err(OcByteIoError::from)?;

    let mut out = Vec::with_capacity(compressed.len() + 4);
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(&compressed);
    Ok(out)
}

/// Inflate a length-prefixed zlib blob produced by [`compress`]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, AslDecodeErrors> {
    if data.len() < 4 {
        return Err(AslDecodeErrors::Generic("compressed blob shorter than its length prefix"));
    }
    let expected = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;

    let mut out = Vec::new();
    let mut decoder = ZlibDecoder::new(&data[4..]);
    decoder.read_to_end(&mut out).map_err(OcByteIoError::from)?;

    if out.len() != expected {
        return Err(AslDecodeErrors::DecompressionMismatch(expected, out.len()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{compress, decompress};
    use crate::errors::AslDecodeErrors;

    #[test]
    fn test_round_trip() {
        let buffers: &[&[u8]] = &[&[], &[0; 1024], b"pattern raster bytes", &[0xDE, 0xAD]];

        for buffer in buffers {
            let blob = compress(buffer).unwrap();
            assert_eq!(&decompress(&blob).unwrap(), buffer);
        }
    }

    #[test]
    fn test_length_prefix_is_validated() {
        let mut blob = compress(b"abc").unwrap();
        // claim five bytes instead of three
        blob[..4].copy_from_slice(&5_u32.to_be_bytes());

        let result = decompress(&blob);
        assert!(matches!(result, Err(AslDecodeErrors::DecompressionMismatch(5, 3))));
    }

    #[test]
    fn test_short_blob() {
        assert!(decompress(&[0, 0]).is_err());
    }
}
