#![cfg(feature = "std")]

use std::io;
use std::io::{BufRead, BufReader, Read, Seek};

use crate::bytestream::reader::{OcByteIoError, OcSeekFrom};
use crate::bytestream::OcByteReaderTrait;

impl<T> OcByteReaderTrait for io::Cursor<T>
where
    T: AsRef<[u8]>
{
    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), OcByteIoError> {
        self.read_exact(buf).map_err(OcByteIoError::from)
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), OcByteIoError> {
        self.read_exact(buf).map_err(OcByteIoError::from)
    }

    #[inline(always)]
    fn oc_seek(&mut self, from: OcSeekFrom) -> Result<u64, OcByteIoError> {
        self.seek(from.to_std_seek()).map_err(OcByteIoError::from)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, OcByteIoError> {
        Ok(self.position() as usize >= self.get_ref().as_ref().len())
    }

    #[inline(always)]
    fn oc_position(&mut self) -> Result<u64, OcByteIoError> {
        Ok(self.position())
    }
}

impl<T: io::Read + io::Seek> OcByteReaderTrait for BufReader<T> {
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), OcByteIoError> {
        self.read_exact(buf).map_err(OcByteIoError::from)
    }

    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), OcByteIoError> {
        self.read_exact(buf).map_err(OcByteIoError::from)
    }

    fn oc_seek(&mut self, from: OcSeekFrom) -> Result<u64, OcByteIoError> {
        self.seek(from.to_std_seek()).map_err(OcByteIoError::from)
    }

    fn is_eof(&mut self) -> Result<bool, OcByteIoError> {
        self.fill_buf()
            .map(|b| b.is_empty())
            .map_err(OcByteIoError::from)
    }

    fn oc_position(&mut self) -> Result<u64, OcByteIoError> {
        self.stream_position().map_err(OcByteIoError::from)
    }
}
