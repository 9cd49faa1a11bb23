/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An Adobe layer style (ASL) decoder
//!
//! This crate reads the binary `.asl` container Photoshop uses to ship
//! layer styles around and turns it into a typed tree: the embedded
//! pattern collection first, then the two top-level style descriptors.
//!
//! The format is resilient by construction, every variable-sized record
//! declares its own length, so a damaged pattern only costs you that
//! pattern: the decoder logs it, jumps to the record boundary and keeps
//! going. A damaged style section stops the decode, but everything
//! parsed up to that point is still returned together with the
//! diagnostic.
//!
//! Embedded pattern rasters are decompressed (raw or PackBits rows),
//! reassembled into interleaved BGRA and re-serialized as compressed
//! base64 blobs inside the tree, ready for a resource store to pick up.
//!
//! # Example
//! - Decoding a layer style file already loaded into memory
//! ```no_run
//! use ochre_core::bytestream::OcCursor;
//! use ochre_asl::AslDecoder;
//!
//! let data: Vec<u8> = std::fs::read("style.asl").unwrap();
//! let mut decoder = AslDecoder::new(OcCursor::new(&data));
//! let tree = decoder.decode();
//!
//! if let Some(err) = &tree.error {
//!     eprintln!("stream damaged, partial result only: {:?}", err);
//! }
//! println!("{}", ochre_asl::xml::to_xml(&tree.root));
//! ```
pub extern crate ochre_core;

pub use decoder::{AslDecoder, AslTree};
pub use node::{AslNode, AslValue};

mod constants;
pub mod compression;
pub mod decoder;
pub mod descriptor;
pub mod errors;
pub mod node;
pub mod pat;
pub mod pattern;
pub mod rle;
pub mod xml;

mod reader;
mod section;
