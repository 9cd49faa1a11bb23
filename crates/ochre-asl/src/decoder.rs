/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The ASL stream decoder
//!
//! Wire layout, in order: a u16 file version, the `8BSL` magic, a u16
//! patterns version, a u32 patterns section size with that many bytes
//! of pattern records, then the styles part, a u32 style count, a u32
//! byte size, and two style descriptors each preceded by a u32 format
//! version.
//!
//! Decoding is resilient. Damaged pattern records are skipped with a
//! warning and stop only the pattern loop; any other failure aborts
//! the decode but the tree built up to that point is still returned
//! together with the diagnostic.

use ochre_core::bytestream::{OcByteReaderTrait, OcReader};
use ochre_core::log::{trace, warn};
use ochre_core::options::DecoderOptions;

use crate::constants::{
    ASL_FILE_VERSION, ASL_IDENTIFIER_BE, ASL_PATTERNS_VERSION, ASL_STYLES_FORMAT_VERSION
};
use crate::descriptor::read_descriptor;
use crate::errors::AslDecodeErrors;
use crate::node::{AslNode, AslValue};
use crate::pattern::read_pattern;
use crate::xml;

/// Class id of the root node a decode produces
pub const ROOT_CLASS_ID: &str = "asl";

/// Key the pattern collection is stored under in the root node
pub const PATTERNS_KEY: &str = "Patterns";

/// The result of decoding one stream
///
/// `root` always holds everything that decoded before the first fatal
/// failure, `error` carries that failure when there was one. A partial
/// tree with a truncation diagnostic is the normal outcome for a
/// cut-off download.
pub struct AslTree {
    pub root:  AslNode,
    pub error: Option<AslDecodeErrors>
}

impl AslTree {
    /// Render the tree as its XML catalog
    pub fn to_xml(&self) -> String {
        xml::to_xml(&self.root)
    }
}

/// An ASL ("layer style") stream decoder
pub struct AslDecoder<T: OcByteReaderTrait> {
    stream:  OcReader<T>,
    options: DecoderOptions
}

impl<T: OcByteReaderTrait> AslDecoder<T> {
    /// Create a new decoder reading from `source` with the default
    /// options
    pub fn new(source: T) -> AslDecoder<T> {
        AslDecoder::new_with_options(source, DecoderOptions::default())
    }

    /// Create a new decoder with the specified custom options
    pub fn new_with_options(source: T, options: DecoderOptions) -> AslDecoder<T> {
        AslDecoder {
            stream: OcReader::new(source),
            options
        }
    }

    /// Return the options the decoder was created with
    pub const fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decode the stream into a tree
    ///
    /// Never panics and never discards partial progress, see
    /// [`AslTree`]. Decoding starts at the current stream position and
    /// consumes the stream, so this is a single-shot call.
    pub fn decode(&mut self) -> AslTree {
        let mut children = vec![];
        let error = self.decode_impl(&mut children).err();

        if let Some(e) = &error {
            warn!("ASL decode failed: {:?}", e);
        }

        AslTree {
            root: AslNode::new(
                "",
                AslValue::Descriptor {
                    name:     String::new(),
                    class_id: ROOT_CLASS_ID.to_string(),
                    children
                }
            ),
            error
        }
    }

    fn decode_impl(&mut self, children: &mut Vec<AslNode>) -> Result<(), AslDecodeErrors> {
        let version = self.stream.get_u16_be_err()?;

        if version != ASL_FILE_VERSION {
            return Err(AslDecodeErrors::SignatureMismatch(
                "file version",
                u32::from(ASL_FILE_VERSION),
                u32::from(version)
            ));
        }

        let magic = self.stream.get_u32_be_err()?;

        if magic != ASL_IDENTIFIER_BE {
            return Err(AslDecodeErrors::WrongMagicBytes(magic));
        }

        let patterns_version = self.stream.get_u16_be_err()?;

        if patterns_version != ASL_PATTERNS_VERSION {
            return Err(AslDecodeErrors::SignatureMismatch(
                "patterns version",
                u32::from(ASL_PATTERNS_VERSION),
                u32::from(patterns_version)
            ));
        }

        let patterns_size = self.stream.get_u32_be_err()?;

        if patterns_size > 0 {
            if self.options.decode_patterns() {
                self.decode_patterns_section(patterns_size, children)?;
            } else {
                trace!("skipping {} bytes of embedded patterns", patterns_size);
                self.stream.skip(patterns_size as usize)?;
            }
        }

        let num_styles = self.stream.get_u32_be_err()?;

        if num_styles != 2 {
            // the field is informational, every known writer stores two
            warn!("stream declares {} styles, two are stored", num_styles);
        }
        let _styles_size = self.stream.get_u32_be_err()?;

        for _ in 0..2 {
            let format_version = self.stream.get_u32_be_err()?;

            if format_version != ASL_STYLES_FORMAT_VERSION {
                return Err(AslDecodeErrors::SignatureMismatch(
                    "styles format version",
                    ASL_STYLES_FORMAT_VERSION,
                    format_version
                ));
            }
            children.push(read_descriptor(&mut self.stream, "", 0, &self.options)?);
        }

        if let Ok(false) = self.stream.eof() {
            trace!("trailing bytes after the second style descriptor");
        }
        Ok(())
    }

    /// Decode the patterns section, `section_size` bytes of
    /// length-declared records
    ///
    /// Patterns are best effort. A damaged record stops the loop, the
    /// records decoded before it join the tree anyway and the stream is
    /// repositioned onto the styles part, even when the damaged
    /// record's declared size overhangs the section itself. In strict
    /// mode the failure becomes the decode diagnostic, the partial
    /// pattern list is still kept.
    fn decode_patterns_section(
        &mut self, section_size: u32, children: &mut Vec<AslNode>
    ) -> Result<(), AslDecodeErrors> {
        let options = self.options;
        let section_size = u64::from(section_size);

        let start = self.stream.position()?;
        let end = start
            .checked_add(section_size)
            .ok_or(AslDecodeErrors::Generic("section end overflows the stream offset"))?;

        let mut patterns = vec![];
        let mut bytes_read = 0_u64;
        let mut failure = None;

        while bytes_read < section_size {
            match read_pattern(&mut self.stream, &options) {
                Ok((record_bytes, node)) => {
                    bytes_read += record_bytes;
                    patterns.push(node);
                }
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        // a record whose declared size runs past the section end is
        // damage of the same kind, the reseek below still protects the
        // styles part
        if failure.is_none() && bytes_read > section_size {
            failure = Some(AslDecodeErrors::RecordSizeMismatch(
                "patterns section",
                section_size,
                bytes_read
            ));
        }

        trace!("decoded {} embedded patterns", patterns.len());
        children.push(AslNode::new(PATTERNS_KEY, AslValue::List(patterns)));

        self.stream.set_position(end)?;

        if let Some(e) = failure {
            if self.options.strict_mode() {
                return Err(e);
            }
            warn!("embedded pattern: {:?}", e);
        }
        Ok(())
    }
}
