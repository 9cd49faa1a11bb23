/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Big endian byte streams
//!
//! This module provides the readers and writers the ochre decoders are
//! built on.
//!
//! Reading goes through [`OcReader`], a thin wrapper over anything
//! implementing [`OcByteReaderTrait`] that adds endian aware primitive
//! reads and absolute repositioning. The crate ships the trait
//! implemented for its own in-memory [`OcCursor`] plus, with the `std`
//! feature, `std::io::Cursor` and `std::io::BufReader`.
//!
//! Writing mirrors that with [`OcWriter`] over [`OcByteWriterTrait`],
//! used by the encoders and by tests that synthesize streams.
//!
//! If you have an in memory buffer, prefer [`OcCursor`] over
//! [`Cursor`](std::io::Cursor), it works without `std` and skips the
//! `std::io` error plumbing.

mod cursor;
mod reader;
mod traits;
mod writer;

pub use cursor::OcCursor;
pub use reader::{OcByteIoError, OcReader, OcSeekFrom};
pub use traits::{OcByteReaderTrait, OcByteWriterTrait};
pub use writer::OcWriter;
