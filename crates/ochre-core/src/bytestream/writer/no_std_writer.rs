use alloc::vec::Vec;

use crate::bytestream::{OcByteIoError, OcByteWriterTrait};

impl OcByteWriterTrait for &mut Vec<u8> {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), OcByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), OcByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), OcByteIoError> {
        Ok(())
    }

    fn reserve_capacity(&mut self, size: usize) -> Result<(), OcByteIoError> {
        self.reserve(size);
        Ok(())
    }
}
