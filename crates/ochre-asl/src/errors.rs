/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Formatter};

use ochre_core::bytestream::OcByteIoError;

use crate::constants::ASL_IDENTIFIER_BE;

/// Errors that can occur during ASL decoding
pub enum AslDecodeErrors {
    WrongMagicBytes(u32),
    /// A version or flag field did not carry the value the format
    /// requires, (field, expected, found)
    SignatureMismatch(&'static str, u32, u32),
    /// A descriptor child carries a type tag the decoder does not
    /// represent
    UnsupportedType(String),
    UnsupportedImageMode(u32),
    UnsupportedCompression(u8),
    UnsupportedBitDepth(u32),
    /// RLE output did not reconstruct the declared length, (expected, found)
    DecompressionMismatch(usize, usize),
    /// A length-declared section consumed bytes past its own end,
    /// (section, declared, consumed)
    RecordSizeMismatch(&'static str, u64, u64),
    /// Descriptors nested beyond the configured depth limit
    NestingTooDeep(usize),
    LargeDimensions(usize, usize),
    ZeroDimensions,
    BadRLE,
    Generic(&'static str),
    GenericString(String),
    IoErrors(OcByteIoError)
}

impl Debug for AslDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            AslDecodeErrors::Generic(reason) => {
                writeln!(f, "{reason}")
            }
            AslDecodeErrors::GenericString(reason) => {
                writeln!(f, "{reason}")
            }
            AslDecodeErrors::WrongMagicBytes(bytes) => {
                writeln!(
                    f,
                    "Expected {:?} but found {:?}, not an ASL stream",
                    ASL_IDENTIFIER_BE.to_be_bytes(),
                    bytes.to_be_bytes()
                )
            }
            AslDecodeErrors::SignatureMismatch(field, expected, found) => {
                writeln!(
                    f,
                    "Bad '{field}' signature, expected {expected} but found {found}",
                )
            }
            AslDecodeErrors::UnsupportedType(os_type) => {
                writeln!(f, "Descriptor type {os_type:?} is not supported")
            }
            AslDecodeErrors::UnsupportedImageMode(mode) => {
                writeln!(
                    f,
                    "Unsupported image mode {mode}, supported modes are grayscale, multichannel and RGB",
                )
            }
            AslDecodeErrors::UnsupportedCompression(method) => {
                writeln!(f, "Unknown plane compression {method}")
            }
            AslDecodeErrors::UnsupportedBitDepth(depth) => {
                writeln!(f, "Unsupported plane depth {depth}, only depth 8 is supported")
            }
            AslDecodeErrors::DecompressionMismatch(expected, found) => {
                writeln!(
                    f,
                    "Decompressed length mismatch, expected {expected} but produced {found}",
                )
            }
            AslDecodeErrors::RecordSizeMismatch(section, declared, consumed) => {
                writeln!(
                    f,
                    "{section} declared {declared} bytes but parsing consumed {consumed}",
                )
            }
            AslDecodeErrors::NestingTooDeep(limit) => {
                writeln!(f, "Descriptors nested deeper than the limit of {limit}")
            }
            AslDecodeErrors::LargeDimensions(supported, found) => {
                writeln!(
                    f,
                    "Too large dimensions, supported {supported} but found {found}",
                )
            }
            AslDecodeErrors::ZeroDimensions => {
                writeln!(f, "Zero found where not expected")
            }
            AslDecodeErrors::BadRLE => {
                writeln!(f, "Bad RLE")
            }
            AslDecodeErrors::IoErrors(e) => {
                writeln!(f, "I/O error :{:?}", e)
            }
        }
    }
}

impl From<&'static str> for AslDecodeErrors {
    fn from(r: &'static str) -> Self {
        Self::Generic(r)
    }
}

impl From<String> for AslDecodeErrors {
    fn from(r: String) -> Self {
        Self::GenericString(r)
    }
}

impl From<OcByteIoError> for AslDecodeErrors {
    fn from(r: OcByteIoError) -> Self {
        Self::IoErrors(r)
    }
}

impl AslDecodeErrors {
    /// Return true if the error reports the input ending before the
    /// structures it declared
    pub fn is_truncation(&self) -> bool {
        matches!(self, AslDecodeErrors::IoErrors(e) if e.is_truncation())
    }
}
