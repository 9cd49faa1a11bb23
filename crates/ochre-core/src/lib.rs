/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the ochre crates
//!
//! This crate provides the plumbing shared by the decoders and
//! encoders under the `ochre` umbrella
//!
//! It currently contains
//!
//! - A bytestream reader and writer with big endian aware reads and writes
//! - Decoder options
//! - A logging shim that becomes the `log` crate when the `log` feature is on
//!
//! This library is `#[no_std]` with `alloc` feature needed for defining `Vec`
//! which we need for storing decoded bytes.
//!
//!
//! # Features
//!  - `std`: Enables `std::io` sources and sinks for the byte streams.
//!
//!  - `log`: Forwards the crate's log statements to the `log` facade
//!    instead of compiling them out.
//!
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod log;
pub mod options;
