/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

fn decoder_lenient_mode() -> DecoderFlags {
    DecoderFlags {
        asl_error_on_pattern_failure: false,
        asl_decode_patterns:          true
    }
}

/// Strict options
///
/// Promotes recoverable per-record failures into decode errors.
fn strict_options() -> DecoderFlags {
    DecoderFlags {
        asl_error_on_pattern_failure: true,
        asl_decode_patterns:          true
    }
}

/// Decoder options that are flags
///
/// NOTE: When you extend this, add true or false to
/// all options above that return a `DecoderFlag`
#[derive(Copy, Debug, Clone, Default)]
pub struct DecoderFlags {
    /// Whether a failure inside an embedded pattern record should be
    /// reported as the decode diagnostic instead of a warning
    asl_error_on_pattern_failure: bool,
    /// Whether the pattern section should be decoded at all
    asl_decode_patterns:          bool
}

/// Decoder options
///
/// Not all options are respected by every routine
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode rasters larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    max_width:  usize,
    /// Maximum height for which decoders will not
    /// try to decode rasters larger than the
    /// specified height
    ///
    /// - Default value: 16384
    max_height: usize,
    /// Maximum recursion depth for nested containers.
    ///
    /// Streams that nest beyond this limit are rejected instead of
    /// overflowing the stack.
    ///
    /// - Default value: 256
    max_depth:  usize,
    /// Boolean flags that influence decoding
    flags:      DecoderFlags
}

/// Initializers
impl DecoderOptions {
    /// Create the decoder options with the lenient defaults.
    ///
    /// This is the same as `default`: damaged embedded records are
    /// skipped with a warning and decoding continues where the stream
    /// permits it.
    pub fn new_cmd() -> DecoderOptions {
        DecoderOptions::default()
    }

    /// Create decoder options which reject streams with damaged
    /// records instead of skipping over them.
    pub fn new_strict() -> DecoderOptions {
        let flag = strict_options();
        DecoderOptions::default().set_decoder_flags(flag)
    }
}

/// Global options respected by all decoders
impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode rasters greater than this width
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode rasters greater than this height
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Get the maximum nesting depth after which recursive container
    /// parsing gives up
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Return true whether the decoder should be in strict mode
    /// and reject most errors
    pub const fn strict_mode(&self) -> bool {
        self.flags.asl_error_on_pattern_failure
    }

    /// Return true if the decoder should decode embedded pattern
    /// sections
    pub const fn decode_patterns(&self) -> bool {
        self.flags.asl_decode_patterns
    }

    /// Set maximum width for which the decoder should not try
    /// decoding rasters greater than that width
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    ///
    /// returns: DecoderOptions
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding rasters greater than that height
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    ///
    /// returns: DecoderOptions
    ///
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set the maximum nesting depth after which recursive container
    /// parsing gives up
    ///
    /// # Arguments
    ///
    /// * `depth`: The deepest level of nesting the decoder will enter
    ///
    /// returns: DecoderOptions
    pub fn set_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    fn set_decoder_flags(mut self, flags: DecoderFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set whether the decoder should be in strict mode
    ///
    /// This reduces the error tolerance level for the decoders and
    /// damaged embedded records will be rejected instead of skipped
    ///
    /// # Arguments
    ///
    /// * `yes`:
    ///
    /// returns: DecoderOptions
    ///
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.flags.asl_error_on_pattern_failure = yes;
        self
    }

    /// Set whether embedded pattern sections should be decoded or
    /// skipped wholesale
    pub fn set_decode_patterns(mut self, yes: bool) -> Self {
        self.flags.asl_decode_patterns = yes;
        self
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:  1 << 14,
            max_height: 1 << 14,
            max_depth:  256,
            flags:      decoder_lenient_mode()
        }
    }
}
