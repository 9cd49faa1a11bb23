/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Serialization of decoded pattern rasters
//!
//! A decoded pattern leaves the tree as a GIMP `.pat` image: six big
//! endian u32 header fields (header size, version, width, height,
//! bytes per pixel, the magic `GPAT`), the NUL-terminated pattern
//! name, then the pixels in RGBA byte order.

use ochre_core::bytestream::{OcByteWriterTrait, OcWriter};

use crate::errors::AslDecodeErrors;

/// Fixed part of the header, six big endian u32 fields
const PAT_HEADER_BASE: usize = 24;
const PAT_VERSION: u32 = 1;
const PAT_BYTES_PER_PIXEL: u32 = 4;
const PAT_MAGIC: &[u8; 4] = b"GPAT";

/// A pattern raster serializer
///
/// Expects tightly packed 8-bit BGRA pixels, the layout the decoder
/// reconstructs planes into, and writes them out as RGBA.
///
/// # Example
/// - Serialize a single blue pixel
/// ```
/// use ochre_asl::pat::PatEncoder;
///
/// let pixel = [255, 0, 0, 255];
/// let mut sink = vec![];
/// PatEncoder::new(&pixel, 1, 1, "blue").encode(&mut sink).unwrap();
/// ```
pub struct PatEncoder<'a> {
    data:   &'a [u8],
    width:  usize,
    height: usize,
    name:   &'a str
}

impl<'a> PatEncoder<'a> {
    /// Create a new serializer for a `width` by `height` BGRA raster
    pub fn new(data: &'a [u8], width: usize, height: usize, name: &'a str) -> PatEncoder<'a> {
        PatEncoder {
            data,
            width,
            height,
            name
        }
    }

    /// Serialize the raster into `sink`, returning the number of bytes
    /// written
    pub fn encode<T: OcByteWriterTrait>(&self, sink: T) -> Result<usize, AslDecodeErrors> {
        if self.width == 0 || self.height == 0 {
            return Err(AslDecodeErrors::ZeroDimensions);
        }
        if (self.width as u64) > u64::from(u32::MAX) {
            return Err(AslDecodeErrors::LargeDimensions(u32::MAX as usize, self.width));
        }
        if (self.height as u64) > u64::from(u32::MAX) {
            return Err(AslDecodeErrors::LargeDimensions(u32::MAX as usize, self.height));
        }

        let expected = self
            .width
            .checked_mul(self.height)
            .and_then(|p| p.checked_mul(PAT_BYTES_PER_PIXEL as usize))
            .ok_or(AslDecodeErrors::Generic("raster size overflows"))?;

        if expected != self.data.len() {
            return Err(AslDecodeErrors::Generic(
                "raster length does not match the pattern geometry"
            ));
        }

        // an embedded NUL would end the name early on the way back in
        let name_bytes: Vec<u8> = self.name.bytes().filter(|b| *b != 0).collect();
        let header_size = PAT_HEADER_BASE + name_bytes.len() + 1;

        let mut stream = OcWriter::new(sink);
        stream.reserve(header_size + expected)?;

        stream.write_u32_be_err(header_size as u32)?;
        stream.write_u32_be_err(PAT_VERSION)?;
        stream.write_u32_be_err(self.width as u32)?;
        stream.write_u32_be_err(self.height as u32)?;
        stream.write_u32_be_err(PAT_BYTES_PER_PIXEL)?;
        stream.write_all(PAT_MAGIC)?;
        stream.write_all(&name_bytes)?;
        stream.write_u8_err(0)?;

        for pixel in self.data.chunks_exact(4) {
            stream.write_all(&[pixel[2], pixel[1], pixel[0], pixel[3]])?;
        }

        Ok(stream.bytes_written())
    }
}

#[cfg(test)]
mod tests {
    use super::PatEncoder;
    use crate::errors::AslDecodeErrors;

    #[test]
    fn test_layout() {
        // two pixels: opaque blue, translucent red, in BGRA
        let data = [0xFF, 0x00, 0x00, 0xFF, 0x00, 0x00, 0xFF, 0x80];
        let mut sink = vec![];

        let written = PatEncoder::new(&data, 2, 1, "px").encode(&mut sink).unwrap();
        assert_eq!(written, sink.len());

        // header size covers the six u32 fields plus "px\0"
        assert_eq!(&sink[0..4], &27_u32.to_be_bytes());
        assert_eq!(&sink[4..8], &1_u32.to_be_bytes());
        assert_eq!(&sink[8..12], &2_u32.to_be_bytes());
        assert_eq!(&sink[12..16], &1_u32.to_be_bytes());
        assert_eq!(&sink[16..20], &4_u32.to_be_bytes());
        assert_eq!(&sink[20..24], b"GPAT");
        assert_eq!(&sink[24..27], b"px\0");
        // pixels converted to RGBA
        assert_eq!(&sink[27..], &[0x00, 0x00, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x80]);
    }

    #[test]
    fn test_geometry_must_match() {
        let data = [0_u8; 8];

        assert!(matches!(
            PatEncoder::new(&data, 3, 1, "p").encode(&mut vec![]),
            Err(AslDecodeErrors::Generic(_))
        ));
        assert!(matches!(
            PatEncoder::new(&data, 0, 2, "p").encode(&mut vec![]),
            Err(AslDecodeErrors::ZeroDimensions)
        ));
    }
}
