/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

pub(crate) mod no_std_writer;
pub(crate) mod std_writer;

use crate::bytestream::reader::OcByteIoError;
use crate::bytestream::OcByteWriterTrait;

/// A writer adding big endian primitive writes on top of an
/// [`OcByteWriterTrait`] sink.
///
/// Encoders in the ochre family write through this, and so do the
/// stream synthesizers in the test suites.
pub struct OcWriter<T: OcByteWriterTrait> {
    inner:         T,
    bytes_written: usize
}

impl<T: OcByteWriterTrait> OcWriter<T> {
    pub fn new(sink: T) -> OcWriter<T> {
        OcWriter {
            inner:         sink,
            bytes_written: 0
        }
    }

    /// Destroy this writer returning the underlying sink
    #[inline(always)]
    pub fn consume(self) -> T {
        self.inner
    }

    /// Number of bytes written so far through this writer
    #[inline(always)]
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Hint the sink about the expected output size
    #[inline]
    pub fn reserve(&mut self, size: usize) -> Result<(), OcByteIoError> {
        self.inner.reserve_capacity(size)
    }

    /// Write all of `buf` into the sink or error out
    #[inline]
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), OcByteIoError> {
        self.inner.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    /// Write a single byte into the sink or error out
    #[inline]
    pub fn write_u8_err(&mut self, byte: u8) -> Result<(), OcByteIoError> {
        self.inner.write_const_bytes(&[byte])?;
        self.bytes_written += 1;
        Ok(())
    }

    /// Flush the sink
    #[inline]
    pub fn flush(&mut self) -> Result<(), OcByteIoError> {
        self.inner.flush_bytes()
    }
}

macro_rules! write_single_type {
    ($name:tt,$int_type:tt) => {
        impl<T: OcByteWriterTrait> OcWriter<T> {
            #[doc = concat!("Write ", stringify!($int_type), " as a big endian integer")]
            #[doc = concat!(
                "Returning an error if the underlying sink cannot support a ",
                stringify!($int_type),
                " write."
            )]
            #[inline]
            pub fn $name(&mut self, byte: $int_type) -> Result<(), OcByteIoError> {
                const SIZE: usize = core::mem::size_of::<$int_type>();

                self.inner.write_const_bytes(&byte.to_be_bytes())?;
                self.bytes_written += SIZE;
                Ok(())
            }
        }
    };
}

write_single_type!(write_u16_be_err, u16);
write_single_type!(write_u32_be_err, u32);
write_single_type!(write_u64_be_err, u64);
