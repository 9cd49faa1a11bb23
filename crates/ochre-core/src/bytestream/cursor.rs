/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bytestream::{OcByteIoError, OcByteReaderTrait, OcSeekFrom};

/// An in-memory cursor over anything that derefs to a byte slice.
///
/// This is the preferred source for the ochre decoders when the whole
/// stream is already in memory, it works without `std` and its seeks
/// are simple integer arithmetic.
///
/// Seeking beyond the end of the buffer is allowed, reads from there
/// simply fail with [`OcByteIoError::NotEnoughBytes`].
pub struct OcCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> OcCursor<T> {
    pub fn new(buffer: T) -> OcCursor<T> {
        OcCursor {
            stream:   buffer,
            position: 0
        }
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.stream.as_ref().len()
    }
}

impl<T: AsRef<[u8]>> OcByteReaderTrait for OcCursor<T> {
    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), OcByteIoError> {
        let available = self.len().saturating_sub(self.position);

        if buf.len() > available {
            // not all bytes can be read, position stays put
            return Err(OcByteIoError::NotEnoughBytes(buf.len(), available));
        }
        let start = self.position;
        buf.copy_from_slice(&self.stream.as_ref()[start..start + buf.len()]);
        self.position += buf.len();

        Ok(())
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), OcByteIoError> {
        self.read_exact_bytes(buf)
    }

    #[inline(always)]
    fn oc_seek(&mut self, from: OcSeekFrom) -> Result<u64, OcByteIoError> {
        match from {
            OcSeekFrom::Start(position) => {
                self.position = usize::try_from(position).map_err(OcByteIoError::from)?;
            }
            OcSeekFrom::End(position) => {
                let end = self.len() as i64;
                let new_position = end + position;
                self.position = usize::try_from(new_position)
                    .map_err(|_| OcByteIoError::SeekError("seek before byte 0"))?;
            }
            OcSeekFrom::Current(position) => {
                let current_position = i64::try_from(self.position).map_err(OcByteIoError::from)?;
                let new_position = current_position + position;
                self.position = usize::try_from(new_position)
                    .map_err(|_| OcByteIoError::SeekError("seek before byte 0"))?;
            }
        }
        Ok(self.position as u64)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, OcByteIoError> {
        Ok(self.position >= self.len())
    }

    #[inline(always)]
    fn oc_position(&mut self) -> Result<u64, OcByteIoError> {
        Ok(self.position as u64)
    }
}
