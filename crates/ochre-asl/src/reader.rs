/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Primitive fetchers for the forms the stream stores values in
//!
//! ASL has four kinds of strings:
//!
//! - fixed length, 4 bytes, used for type and unit tags
//! - variable length, u32 length + bytes, with the quirk that a
//!   declared length of zero means four bytes
//! - pascal, u8 length + bytes
//! - unicode, u32 code-unit count + UTF-16 BE code units, customarily
//!   NUL terminated
//!
//! Numbers are fetched straight into their canonical text form since
//! the tree stores leaves as text.

use ochre_core::bytestream::{OcByteIoError, OcByteReaderTrait, OcReader};

use crate::errors::AslDecodeErrors;

/// Upper bound on a single buffered read, lengths are
/// attacker-controlled so allocation grows with bytes actually present
const READ_CHUNK: usize = 4096;

fn read_length_bytes<T>(stream: &mut OcReader<T>, length: usize) -> Result<Vec<u8>, OcByteIoError>
where
    T: OcByteReaderTrait
{
    let mut data = Vec::with_capacity(length.min(READ_CHUNK));
    let mut chunk = [0_u8; READ_CHUNK];
    let mut remaining = length;

    while remaining > 0 {
        let take = remaining.min(READ_CHUNK);
        stream.read_exact_bytes(&mut chunk[..take])?;
        data.extend_from_slice(&chunk[..take]);
        remaining -= take;
    }
    Ok(data)
}

// Tags and class ids are byte-per-character text.
fn latin1_string(data: &[u8]) -> String {
    data.iter().map(|b| char::from(*b)).collect()
}

/// Fetchers for the string and numeric forms of the descriptor format,
/// implemented over any [`OcReader`]
pub(crate) trait AslPrimitiveReads {
    /// Read exactly 4 bytes as text, trailing spaces preserved
    fn read_fixed_string(&mut self) -> Result<String, AslDecodeErrors>;

    /// Read a u32 length then that many text bytes
    ///
    /// A declared length of zero means four bytes.
    fn read_var_string(&mut self) -> Result<String, AslDecodeErrors>;

    /// Read a u8 length then that many text bytes
    fn read_pascal_string(&mut self) -> Result<String, AslDecodeErrors>;

    /// Read a u32 code-unit count then that many UTF-16 BE code units
    ///
    /// One trailing NUL code unit, when present, is dropped. Unpaired
    /// surrogates become replacement characters.
    fn read_unicode_string(&mut self) -> Result<String, AslDecodeErrors>;

    /// Read a big endian f64 as its shortest round-trip decimal text
    fn read_double_text(&mut self) -> Result<String, AslDecodeErrors>;

    /// Read a big endian u32 as decimal text
    fn read_int_text(&mut self) -> Result<String, AslDecodeErrors>;

    /// Read a u8 as `"0"` or `"1"`, any nonzero byte normalizes to `"1"`
    fn read_bool_text(&mut self) -> Result<String, AslDecodeErrors>;
}

impl<T: OcByteReaderTrait> AslPrimitiveReads for OcReader<T> {
    fn read_fixed_string(&mut self) -> Result<String, AslDecodeErrors> {
        let bytes = self.read_fixed_bytes_or_error::<4>()?;
        Ok(latin1_string(&bytes))
    }

    fn read_var_string(&mut self) -> Result<String, AslDecodeErrors> {
        let mut length = self.get_u32_be_err()?;

        if length == 0 {
            length = 4;
        }
        let data = read_length_bytes(self, length as usize)?;

        Ok(latin1_string(&data))
    }

    fn read_pascal_string(&mut self) -> Result<String, AslDecodeErrors> {
        let length = usize::from(self.read_u8_err()?);
        let data = read_length_bytes(self, length)?;

        Ok(latin1_string(&data))
    }

    fn read_unicode_string(&mut self) -> Result<String, AslDecodeErrors> {
        let count = self.get_u32_be_err()?;
        let byte_length =
            usize::try_from(u64::from(count) * 2).map_err(OcByteIoError::from)?;

        let raw = read_length_bytes(self, byte_length)?;
        let mut units: Vec<u16> = raw
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();

        if units.last() == Some(&0) {
            units.pop();
        }
        Ok(String::from_utf16_lossy(&units))
    }

    fn read_double_text(&mut self) -> Result<String, AslDecodeErrors> {
        let value = self.get_f64_be_err()?;
        Ok(value.to_string())
    }

    fn read_int_text(&mut self) -> Result<String, AslDecodeErrors> {
        let value = self.get_u32_be_err()?;
        Ok(value.to_string())
    }

    fn read_bool_text(&mut self) -> Result<String, AslDecodeErrors> {
        let value = self.read_u8_err()?;
        Ok(if value == 0 { "0" } else { "1" }.to_string())
    }
}
