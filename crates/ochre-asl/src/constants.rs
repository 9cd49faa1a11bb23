/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Wire constants of the ASL container

/// `8BSL`, the container magic following the version word
pub const ASL_IDENTIFIER_BE: u32 = 0x3842534C;

/// Version word the file starts with
pub const ASL_FILE_VERSION: u16 = 2;

/// Version of the embedded patterns section
pub const ASL_PATTERNS_VERSION: u16 = 3;

/// Format version preceding each of the two style descriptors
pub const ASL_STYLES_FORMAT_VERSION: u32 = 16;

/// Version of a single pattern record
pub const PATTERN_VERSION: u32 = 1;

/// Version of the virtual array list holding pattern planes
pub const VIRTUAL_ARRAY_VERSION: u32 = 3;

/// The only channel count flag the virtual array list is known to use.
/// The field is not documented, 24 is what every writer emits.
pub const VIRTUAL_ARRAY_CHANNELS: u32 = 24;

/// Slack allowed between the declared and consumed size of a virtual
/// array list, its writers are known to account loosely
pub const VIRTUAL_ARRAY_SLACK: u64 = 100;

/// Pattern records are padded to this alignment
pub const PATTERN_ALIGNMENT: u32 = 4;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ImageModes {
    Bitmap = 0,
    Grayscale = 1,
    IndexedColor = 2,
    RGB = 3,
    CYMK = 4,
    MultiChannel = 7,
    DuoTone = 8,
    LabColor = 9
}

impl ImageModes {
    pub fn from_int(int: u32) -> Option<ImageModes> {
        use crate::constants::ImageModes::{
            Bitmap, DuoTone, Grayscale, IndexedColor, LabColor, MultiChannel, CYMK, RGB
        };

        match int {
            0 => Some(Bitmap),
            1 => Some(Grayscale),
            2 => Some(IndexedColor),
            3 => Some(RGB),
            4 => Some(CYMK),
            7 => Some(MultiChannel),
            8 => Some(DuoTone),
            9 => Some(LabColor),
            _ => None
        }
    }

    /// Number of raster planes a pattern in this mode carries, or
    /// `None` when the mode cannot be decoded
    pub fn plane_count(self) -> Option<usize> {
        match self {
            ImageModes::Grayscale | ImageModes::MultiChannel => Some(1),
            ImageModes::RGB => Some(3),
            _ => None
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
pub enum CompressionMethod {
    NoCompression = 0,
    RLE = 1
}

impl CompressionMethod {
    pub fn from_int(int: u8) -> Option<CompressionMethod> {
        match int {
            0 => Some(Self::NoCompression),
            1 => Some(Self::RLE),
            _ => None
        }
    }
}
