#![cfg(feature = "std")]
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::bytestream::OcByteIoError;

impl crate::bytestream::OcByteWriterTrait for &mut BufWriter<File> {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), OcByteIoError> {
        self.write_all(buf).map_err(OcByteIoError::StdIoError)
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), OcByteIoError> {
        self.write_all_bytes(buf)
    }

    fn flush_bytes(&mut self) -> Result<(), OcByteIoError> {
        self.flush().map_err(OcByteIoError::StdIoError)
    }

    fn reserve_capacity(&mut self, _: usize) -> Result<(), OcByteIoError> {
        Ok(())
    }
}
