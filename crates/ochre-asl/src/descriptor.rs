/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Recursive descent over the descriptor wire format
//!
//! A descriptor is a unicode display name, a variable-length class id
//! and a count of keyed children. Each child is a key, a 4-byte type
//! tag and a tag-dependent payload; `Objc`/`GlbO` children recurse
//! into a full descriptor and `VlLs` children hold a count of un-keyed
//! children.
//!
//! Recursion depth is bounded by
//! [`max_depth`](ochre_core::options::DecoderOptions::max_depth), a
//! stream nesting containers past the limit is rejected instead of
//! overflowing the stack.

use ochre_core::bytestream::{OcByteReaderTrait, OcReader};
use ochre_core::log::trace;
use ochre_core::options::DecoderOptions;

use crate::errors::AslDecodeErrors;
use crate::node::{AslNode, AslValue};
use crate::reader::AslPrimitiveReads;

// Child counts are attacker controlled, preallocation is capped so
// memory grows with bytes actually parsed.
const PREALLOC_CAP: usize = 256;

/// Read one descriptor from the current stream position
///
/// `key` is the name the parent stored the descriptor under, empty at
/// the top level. `depth` is the current container nesting level,
/// callers start it at zero.
pub fn read_descriptor<T: OcByteReaderTrait>(
    stream: &mut OcReader<T>, key: &str, depth: usize, options: &DecoderOptions
) -> Result<AslNode, AslDecodeErrors> {
    let name = stream.read_unicode_string()?;
    let class_id = stream.read_var_string()?;
    let num_children = stream.get_u32_be_err()?;

    trace!("Descriptor '{}', {} children", class_id, num_children);

    let mut children = Vec::with_capacity((num_children as usize).min(PREALLOC_CAP));

    for _ in 0..num_children {
        children.push(read_child(stream, true, depth + 1, options)?);
    }

    Ok(AslNode::new(
        key,
        AslValue::Descriptor {
            name,
            class_id,
            children
        }
    ))
}

/// Read one child value, `keyed` children carry a var-string key in
/// front of the type tag, list elements do not
fn read_child<T: OcByteReaderTrait>(
    stream: &mut OcReader<T>, keyed: bool, depth: usize, options: &DecoderOptions
) -> Result<AslNode, AslDecodeErrors> {
    if depth > options.max_depth() {
        return Err(AslDecodeErrors::NestingTooDeep(options.max_depth()));
    }

    let key = if keyed {
        stream.read_var_string()?
    } else {
        String::new()
    };
    let os_type = stream.read_fixed_string()?;

    match os_type.as_str() {
        "Objc" | "GlbO" => read_descriptor(stream, &key, depth, options),

        "VlLs" => {
            let num_items = stream.get_u32_be_err()?;
            let mut items = Vec::with_capacity((num_items as usize).min(PREALLOC_CAP));

            for _ in 0..num_items {
                items.push(read_child(stream, false, depth + 1, options)?);
            }
            Ok(AslNode::new(key, AslValue::List(items)))
        }

        "doub" => {
            let value = stream.read_double_text()?;
            Ok(AslNode::new(key, AslValue::Double(value)))
        }

        "UntF" => {
            let unit = stream.read_fixed_string()?;
            let value = stream.read_double_text()?;

            Ok(AslNode::new(key, AslValue::UnitFloat { unit, value }))
        }

        "TEXT" => {
            let value = stream.read_unicode_string()?;
            Ok(AslNode::new(key, AslValue::Text(value)))
        }

        "enum" => {
            let type_id = stream.read_var_string()?;
            let value = stream.read_var_string()?;

            Ok(AslNode::new(key, AslValue::Enum { type_id, value }))
        }

        "long" => {
            let value = stream.read_int_text()?;
            Ok(AslNode::new(key, AslValue::Integer(value)))
        }

        "bool" => {
            let value = stream.read_bool_text()?;
            Ok(AslNode::new(key, AslValue::Boolean(value)))
        }

        // `obj `, `type`, `GlbC`, `alis` and `tdta` carry payloads
        // this decoder does not represent, and an unrecognized tag
        // means the stream position is no longer trustworthy
        _ => Err(AslDecodeErrors::UnsupportedType(os_type))
    }
}

#[cfg(test)]
mod tests {
    use ochre_core::bytestream::{OcCursor, OcReader, OcWriter};
    use ochre_core::options::DecoderOptions;

    use super::read_descriptor;
    use crate::errors::AslDecodeErrors;
    use crate::node::AslValue;

    fn unicode_string(sink: &mut OcWriter<&mut Vec<u8>>, text: &str) {
        let units: Vec<u16> = text.encode_utf16().chain([0]).collect();

        sink.write_u32_be_err(units.len() as u32).unwrap();
        for unit in units {
            sink.write_u16_be_err(unit).unwrap();
        }
    }

    fn var_string(sink: &mut OcWriter<&mut Vec<u8>>, text: &str) {
        sink.write_u32_be_err(text.len() as u32).unwrap();
        sink.write_all(text.as_bytes()).unwrap();
    }

    #[test]
    fn test_leaf_kinds() {
        let mut data = vec![];
        let mut sink = OcWriter::new(&mut data);

        unicode_string(&mut sink, "");
        var_string(&mut sink, "null");
        sink.write_u32_be_err(3).unwrap();

        var_string(&mut sink, "Sz  ");
        sink.write_all(b"long").unwrap();
        sink.write_u32_be_err(77).unwrap();

        var_string(&mut sink, "Opct");
        sink.write_all(b"UntF").unwrap();
        sink.write_all(b"#Prc").unwrap();
        sink.write_u64_be_err(50.5_f64.to_bits()).unwrap();

        var_string(&mut sink, "enab");
        sink.write_all(b"bool").unwrap();
        sink.write_u8_err(1).unwrap();

        let mut stream = OcReader::new(OcCursor::new(&data));
        let node =
            read_descriptor(&mut stream, "", 0, &DecoderOptions::default()).unwrap();

        assert_eq!(node.children().len(), 3);
        assert_eq!(
            node.find("Sz  ").unwrap().value,
            AslValue::Integer("77".to_string())
        );
        assert_eq!(
            node.find("Opct").unwrap().value,
            AslValue::UnitFloat {
                unit:  "#Prc".to_string(),
                value: "50.5".to_string()
            }
        );
        assert_eq!(
            node.find("enab").unwrap().value,
            AslValue::Boolean("1".to_string())
        );
    }

    #[test]
    fn test_depth_bomb_is_rejected() {
        let depth = 40;

        let mut data = vec![];
        let mut sink = OcWriter::new(&mut data);

        // a chain of descriptors each holding one `Objc` child
        for _ in 0..depth {
            unicode_string(&mut sink, "");
            var_string(&mut sink, "null");
            sink.write_u32_be_err(1).unwrap();
            var_string(&mut sink, "Lyr ");
            sink.write_all(b"Objc").unwrap();
        }
        unicode_string(&mut sink, "");
        var_string(&mut sink, "null");
        sink.write_u32_be_err(0).unwrap();

        let options = DecoderOptions::default().set_max_depth(16);
        let mut stream = OcReader::new(OcCursor::new(&data));

        let result = read_descriptor(&mut stream, "", 0, &options);
        assert!(matches!(result, Err(AslDecodeErrors::NestingTooDeep(16))));
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let mut data = vec![];
        let mut sink = OcWriter::new(&mut data);

        unicode_string(&mut sink, "");
        var_string(&mut sink, "null");
        sink.write_u32_be_err(1).unwrap();
        var_string(&mut sink, "Payl");
        sink.write_all(b"tdta").unwrap();

        let mut stream = OcReader::new(OcCursor::new(&data));
        let result = read_descriptor(&mut stream, "", 0, &DecoderOptions::default());

        assert!(
            matches!(result, Err(AslDecodeErrors::UnsupportedType(tag)) if tag == "tdta")
        );
    }
}
