/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Embedded pattern records
//!
//! The patterns section holds length-declared records, each carrying a
//! version, an image mode, a name, a UUID and a "virtual array list"
//! with one raster plane per channel. Planes are stored whole or as
//! PackBits rows and are reconstructed here into an interleaved BGRA
//! raster with the alpha forced opaque.
//!
//! A decoded pattern joins the tree as a descriptor holding the name,
//! the UUID and the serialized raster as a compressed base64 blob.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use ochre_core::bytestream::{OcByteReaderTrait, OcReader};
use ochre_core::log::trace;
use ochre_core::options::DecoderOptions;

use crate::compression;
use crate::constants::{
    CompressionMethod, ImageModes, PATTERN_ALIGNMENT, PATTERN_VERSION, VIRTUAL_ARRAY_CHANNELS,
    VIRTUAL_ARRAY_SLACK, VIRTUAL_ARRAY_VERSION
};
use crate::errors::AslDecodeErrors;
use crate::node::{AslNode, AslValue};
use crate::pat::PatEncoder;
use crate::reader::AslPrimitiveReads;
use crate::rle::decompress_packbits;
use crate::section::read_section;

/// Class id of a decoded pattern descriptor
pub const PATTERN_CLASS_ID: &str = "OchrePattern";

/// A virtual array rectangle, fields in the order the stream stores
/// them
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct ArrayRect {
    top:    u32,
    left:   u32,
    bottom: u32,
    right:  u32
}

impl ArrayRect {
    /// The validated raster geometry as `(width, height)`
    fn geometry(&self, options: &DecoderOptions) -> Result<(usize, usize), AslDecodeErrors> {
        if self.right <= self.left || self.bottom <= self.top {
            return Err(AslDecodeErrors::ZeroDimensions);
        }
        let width = (self.right - self.left) as usize;
        let height = (self.bottom - self.top) as usize;

        if width > options.max_width() {
            return Err(AslDecodeErrors::LargeDimensions(options.max_width(), width));
        }
        if height > options.max_height() {
            return Err(AslDecodeErrors::LargeDimensions(options.max_height(), height));
        }
        Ok((width, height))
    }
}

fn read_rect<T: OcByteReaderTrait>(stream: &mut OcReader<T>) -> Result<ArrayRect, AslDecodeErrors> {
    let top = stream.get_u32_be_err()?;
    let left = stream.get_u32_be_err()?;
    let bottom = stream.get_u32_be_err()?;
    let right = stream.get_u32_be_err()?;

    Ok(ArrayRect {
        top,
        left,
        bottom,
        right
    })
}

fn align_offset_ceil(offset: u32, alignment: u32) -> u64 {
    let alignment = u64::from(alignment);

    u64::from(offset).div_ceil(alignment) * alignment
}

/// Read one channel plane covering `array_rect`
fn read_plane<T: OcByteReaderTrait>(
    stream: &mut OcReader<T>, array_rect: &ArrayRect, width: usize, height: usize
) -> Result<Vec<u8>, AslDecodeErrors> {
    let depth = stream.get_u32_be_err()?;
    let plane_rect = read_rect(stream)?;

    if plane_rect != *array_rect {
        return Err(AslDecodeErrors::Generic("planes do not cover a uniform rectangle"));
    }

    let second_depth = stream.get_u16_be_err()?;

    if u32::from(second_depth) != depth {
        return Err(AslDecodeErrors::Generic("the two pixel depth fields of a plane disagree"));
    }
    if depth != 8 {
        return Err(AslDecodeErrors::UnsupportedBitDepth(depth));
    }

    let compression = stream.read_u8_err()?;
    let plane_len = width
        .checked_mul(height)
        .ok_or(AslDecodeErrors::Generic("raster size overflows"))?;

    match CompressionMethod::from_int(compression) {
        Some(CompressionMethod::NoCompression) => {
            let mut data = vec![0_u8; plane_len];

            stream.read_exact_bytes(&mut data)?;
            Ok(data)
        }
        Some(CompressionMethod::RLE) => {
            // every row size comes first, then the row payloads
            let mut row_sizes = Vec::with_capacity(height);

            for _ in 0..height {
                row_sizes.push(stream.get_u16_be_err()?);
            }

            let mut data = Vec::with_capacity(plane_len);

            for row_size in row_sizes {
                let mut compressed = vec![0_u8; usize::from(row_size)];
                stream.read_exact_bytes(&mut compressed)?;

                let row = decompress_packbits(&compressed, width)?;
                data.extend_from_slice(&row);
            }
            Ok(data)
        }
        None => Err(AslDecodeErrors::UnsupportedCompression(compression))
    }
}

/// Interleave channel planes into a BGRA raster with opaque alpha
///
/// A single plane replicates into all three color channels.
fn interleave_bgra(planes: &[Vec<u8>], pixel_count: usize) -> Vec<u8> {
    let last = planes.len() - 1;
    let mut bgra = Vec::with_capacity(pixel_count * 4);

    for i in 0..pixel_count {
        bgra.push(planes[2.min(last)][i]);
        bgra.push(planes[1.min(last)][i]);
        bgra.push(planes[0][i]);
        bgra.push(0xFF);
    }
    bgra
}

/// Read the virtual array list holding `num_planes` channel planes
///
/// Returns the raster geometry and the reconstructed BGRA pixels.
fn read_virtual_array_list<T: OcByteReaderTrait>(
    stream: &mut OcReader<T>, num_planes: usize, options: &DecoderOptions
) -> Result<(usize, usize, Vec<u8>), AslDecodeErrors> {
    let array_version = stream.get_u32_be_err()?;

    if array_version != VIRTUAL_ARRAY_VERSION {
        return Err(AslDecodeErrors::SignatureMismatch(
            "virtual array version",
            VIRTUAL_ARRAY_VERSION,
            array_version
        ));
    }

    let array_length = stream.get_u32_be_err()?;

    read_section(
        stream,
        u64::from(array_length),
        VIRTUAL_ARRAY_SLACK,
        "virtual array list",
        |stream| {
            let array_rect = read_rect(stream)?;
            let (width, height) = array_rect.geometry(options)?;

            let channels = stream.get_u32_be_err()?;

            if channels != VIRTUAL_ARRAY_CHANNELS {
                return Err(AslDecodeErrors::SignatureMismatch(
                    "channel count",
                    VIRTUAL_ARRAY_CHANNELS,
                    channels
                ));
            }

            let mut planes: Vec<Vec<u8>> = Vec::with_capacity(num_planes);

            for _ in 0..num_planes {
                let written = stream.get_u32_be_err()?;

                if written == 0 {
                    return Err(AslDecodeErrors::Generic("plane has its not-written flag set"));
                }

                let plane_length = stream.get_u32_be_err()?;

                if plane_length == 0 {
                    return Err(AslDecodeErrors::Generic("plane length is zero"));
                }

                let plane =
                    read_section(stream, u64::from(plane_length), 0, "channel plane", |stream| {
                        read_plane(stream, &array_rect, width, height)
                    })?;

                planes.push(plane);
            }

            let pixel_count = width * height;

            Ok((width, height, interleave_bgra(&planes, pixel_count)))
        }
    )
}

/// Read one pattern record from the patterns section
///
/// Returns the number of bytes the record occupies in the section,
/// the length field plus the 4-byte-aligned payload, together with the
/// decoded pattern node. The node is a descriptor of class
/// [`PATTERN_CLASS_ID`] holding the name under `Nm  `, the UUID under
/// `Idnt` and the serialized raster under `Data` as a compressed
/// base64 blob.
pub fn read_pattern<T: OcByteReaderTrait>(
    stream: &mut OcReader<T>, options: &DecoderOptions
) -> Result<(u64, AslNode), AslDecodeErrors> {
    let record_size = stream.get_u32_be_err()?;
    let aligned_size = align_offset_ceil(record_size, PATTERN_ALIGNMENT);

    let node = read_section(stream, aligned_size, 0, "pattern record", |stream| {
        let version = stream.get_u32_be_err()?;

        if version != PATTERN_VERSION {
            return Err(AslDecodeErrors::SignatureMismatch(
                "pattern version",
                PATTERN_VERSION,
                version
            ));
        }

        let image_mode = stream.get_u32_be_err()?;
        let num_planes = ImageModes::from_int(image_mode)
            .and_then(ImageModes::plane_count)
            .ok_or(AslDecodeErrors::UnsupportedImageMode(image_mode))?;

        // the record's own geometry words are informational, the
        // virtual array rectangle governs the raster size
        let _height = stream.get_u16_be_err()?;
        let _width = stream.get_u16_be_err()?;

        let name = stream.read_unicode_string()?;
        let uuid = stream.read_pascal_string()?;

        let (width, height, bgra) = read_virtual_array_list(stream, num_planes, options)?;

        trace!("Pattern '{}' ({}), {}x{} raster", name, uuid, width, height);

        let mut pat_bytes = vec![];
        PatEncoder::new(&bgra, width, height, &name).encode(&mut pat_bytes)?;

        let blob = BASE64_STANDARD.encode(compression::compress(&pat_bytes)?);

        let children = vec![
            AslNode::new("Nm  ", AslValue::Text(name)),
            AslNode::new("Idnt", AslValue::Text(uuid)),
            AslNode::new("Data", AslValue::PatternBlob(blob)),
        ];

        Ok(AslNode::new(
            "",
            AslValue::Descriptor {
                name: String::new(),
                class_id: PATTERN_CLASS_ID.to_string(),
                children
            }
        ))
    })?;

    Ok((4 + aligned_size, node))
}

#[cfg(test)]
mod tests {
    use super::{align_offset_ceil, interleave_bgra};

    #[test]
    fn test_align_offset_ceil() {
        assert_eq!(align_offset_ceil(0, 4), 0);
        assert_eq!(align_offset_ceil(1, 4), 4);
        assert_eq!(align_offset_ceil(4, 4), 4);
        assert_eq!(align_offset_ceil(5, 4), 8);
        assert_eq!(align_offset_ceil(u32::MAX, 4), 0x1_0000_0000);
    }

    #[test]
    fn test_single_plane_replicates() {
        let planes = vec![vec![7_u8, 9]];
        let bgra = interleave_bgra(&planes, 2);

        assert_eq!(bgra, [7, 7, 7, 0xFF, 9, 9, 9, 0xFF]);
    }

    #[test]
    fn test_three_planes_interleave_reversed() {
        // planes on the wire are stored red, green, blue
        let planes = vec![vec![1_u8], vec![2], vec![3]];
        let bgra = interleave_bgra(&planes, 1);

        assert_eq!(bgra, [3, 2, 1, 0xFF]);
    }
}
