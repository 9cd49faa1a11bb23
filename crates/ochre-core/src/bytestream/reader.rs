/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::Formatter;

pub(crate) mod std_readers;

use crate::bytestream::OcByteReaderTrait;

/// Enumeration of possible methods to seek within an I/O object.
///
/// It is analogous to the [SeekFrom](std::io::SeekFrom) in the std library but
/// it's here to allow this to work in no-std crates
#[derive(Copy, PartialEq, Eq, Clone, Debug)]
pub enum OcSeekFrom {
    /// Sets the offset to the provided number of bytes.
    Start(u64),

    /// Sets the offset to the size of this object plus the specified number of
    /// bytes.
    ///
    /// It is possible to seek beyond the end of an object, but it's an error to
    /// seek before byte 0.
    End(i64),

    /// Sets the offset to the current position plus the specified number of
    /// bytes.
    ///
    /// It is possible to seek beyond the end of an object, but it's an error to
    /// seek before byte 0.
    Current(i64)
}

impl OcSeekFrom {
    /// Convert to [SeekFrom](std::io::SeekFrom) from the `std::io` library
    ///
    /// This is only present when std feature is present
    #[cfg(feature = "std")]
    pub(crate) fn to_std_seek(self) -> std::io::SeekFrom {
        match self {
            OcSeekFrom::Start(pos) => std::io::SeekFrom::Start(pos),
            OcSeekFrom::End(pos) => std::io::SeekFrom::End(pos),
            OcSeekFrom::Current(pos) => std::io::SeekFrom::Current(pos)
        }
    }
}

pub enum OcByteIoError {
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    TryFromIntError(core::num::TryFromIntError),
    // requested, read
    NotEnoughBytes(usize, usize),
    Generic(&'static str),
    SeekError(&'static str)
}

impl core::fmt::Debug for OcByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            OcByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            OcByteIoError::TryFromIntError(err) => {
                writeln!(f, "Cannot convert to int {}", err)
            }
            OcByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            OcByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
            OcByteIoError::SeekError(err) => {
                writeln!(f, "Seek error: {err}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for OcByteIoError {
    fn from(value: std::io::Error) -> Self {
        OcByteIoError::StdIoError(value)
    }
}

impl From<core::num::TryFromIntError> for OcByteIoError {
    fn from(value: core::num::TryFromIntError) -> Self {
        OcByteIoError::TryFromIntError(value)
    }
}

impl From<&'static str> for OcByteIoError {
    fn from(value: &'static str) -> Self {
        OcByteIoError::Generic(value)
    }
}

impl OcByteIoError {
    /// Return true if the error indicates the source ran out of bytes
    /// rather than the stream machinery itself failing.
    pub fn is_truncation(&self) -> bool {
        match self {
            OcByteIoError::NotEnoughBytes(_, _) => true,
            #[cfg(feature = "std")]
            OcByteIoError::StdIoError(e) => e.kind() == std::io::ErrorKind::UnexpectedEof,
            _ => false
        }
    }
}

/// A reader adding big endian primitive reads on top of an
/// [`OcByteReaderTrait`] source.
pub struct OcReader<T: OcByteReaderTrait> {
    inner: T
}

impl<T: OcByteReaderTrait> OcReader<T> {
    pub fn new(source: T) -> OcReader<T> {
        OcReader { inner: source }
    }

    /// Destroy this reader returning
    /// the underlying source of the bytes
    /// from which we were decoding
    #[inline(always)]
    pub fn consume(self) -> T {
        self.inner
    }

    #[inline(always)]
    pub fn skip(&mut self, num: usize) -> Result<u64, OcByteIoError> {
        self.inner.oc_seek(OcSeekFrom::Current(num as i64))
    }

    #[inline(always)]
    pub fn seek(&mut self, from: OcSeekFrom) -> Result<u64, OcByteIoError> {
        self.inner.oc_seek(from)
    }

    #[inline(always)]
    pub fn read_u8_err(&mut self) -> Result<u8, OcByteIoError> {
        let mut buf = [0];
        self.inner.read_exact_bytes(&mut buf)?;
        Ok(buf[0])
    }

    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], OcByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        match self.inner.read_const_bytes(&mut byte_store) {
            Ok(_) => Ok(byte_store),
            Err(e) => Err(e)
        }
    }

    /// Move the cursor to an absolute offset from the stream start
    #[inline]
    pub fn set_position(&mut self, position: u64) -> Result<(), OcByteIoError> {
        self.seek(OcSeekFrom::Start(position))?;

        Ok(())
    }

    #[inline(always)]
    pub fn eof(&mut self) -> Result<bool, OcByteIoError> {
        self.inner.is_eof()
    }

    #[inline(always)]
    pub fn position(&mut self) -> Result<u64, OcByteIoError> {
        self.inner.oc_position()
    }

    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), OcByteIoError> {
        self.inner.read_exact_bytes(buf)
    }

    /// Read a big endian f64 from the stream
    ///
    /// Returning an error if the underlying buffer cannot support an f64 read.
    #[inline]
    pub fn get_f64_be_err(&mut self) -> Result<f64, OcByteIoError> {
        Ok(f64::from_bits(self.get_u64_be_err()?))
    }
}

macro_rules! get_single_type {
    ($name:tt,$int_type:tt) => {
        impl<T: OcByteReaderTrait> OcReader<T> {
            #[doc = concat!("Read ", stringify!($int_type), " as a big endian integer")]
            #[doc = concat!(
                "Returning an error if the underlying buffer cannot support a ",
                stringify!($int_type),
                " read."
            )]
            #[inline]
            pub fn $name(&mut self) -> Result<$int_type, OcByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.inner.read_const_bytes(&mut space) {
                    Ok(_) => Ok($int_type::from_be_bytes(space)),
                    Err(e) => Err(e)
                }
            }
        }
    };
}

get_single_type!(get_u16_be_err, u16);
get_single_type!(get_u32_be_err, u32);
get_single_type!(get_u64_be_err, u64);
