/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! End-to-end decodes of synthesized ASL streams

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use ochre_asl::ochre_core::bytestream::{OcCursor, OcReader, OcWriter};
use ochre_asl::ochre_core::options::DecoderOptions;
use ochre_asl::pattern::read_pattern;
use ochre_asl::rle::compress_packbits;
use ochre_asl::{compression, AslDecoder, AslNode, AslValue};

type VecWriter<'a> = OcWriter<&'a mut Vec<u8>>;

fn unicode_string(w: &mut VecWriter, text: &str) {
    let units: Vec<u16> = text.encode_utf16().chain([0]).collect();

    w.write_u32_be_err(units.len() as u32).unwrap();
    for unit in units {
        w.write_u16_be_err(unit).unwrap();
    }
}

fn var_string(w: &mut VecWriter, text: &str) {
    w.write_u32_be_err(text.len() as u32).unwrap();
    w.write_all(text.as_bytes()).unwrap();
}

fn pascal_string(w: &mut VecWriter, text: &str) {
    w.write_u8_err(text.len() as u8).unwrap();
    w.write_all(text.as_bytes()).unwrap();
}

/// Write a descriptor header, the caller appends `num_children`
/// children behind it
fn descriptor_open(w: &mut VecWriter, class_id: &str, num_children: u32) {
    unicode_string(w, "");
    var_string(w, class_id);
    w.write_u32_be_err(num_children).unwrap();
}

fn child_long(w: &mut VecWriter, key: &str, value: u32) {
    var_string(w, key);
    w.write_all(b"long").unwrap();
    w.write_u32_be_err(value).unwrap();
}

fn child_untf(w: &mut VecWriter, key: &str, unit: &str, value: f64) {
    var_string(w, key);
    w.write_all(b"UntF").unwrap();
    w.write_all(unit.as_bytes()).unwrap();
    w.write_u64_be_err(value.to_bits()).unwrap();
}

fn child_text(w: &mut VecWriter, key: &str, text: &str) {
    var_string(w, key);
    w.write_all(b"TEXT").unwrap();
    unicode_string(w, text);
}

fn child_bool(w: &mut VecWriter, key: &str, value: u8) {
    var_string(w, key);
    w.write_all(b"bool").unwrap();
    w.write_u8_err(value).unwrap();
}

fn child_enum(w: &mut VecWriter, key: &str, type_id: &str, value: &str) {
    var_string(w, key);
    w.write_all(b"enum").unwrap();
    var_string(w, type_id);
    var_string(w, value);
}

/// An empty descriptor of the given class as standalone bytes
fn null_descriptor(class_id: &str) -> Vec<u8> {
    let mut data = vec![];
    let mut w = OcWriter::new(&mut data);

    descriptor_open(&mut w, class_id, 0);
    data
}

/// The stream head: file version, magic, patterns version and the
/// patterns section size
fn asl_header(w: &mut VecWriter, patterns_size: u32) {
    w.write_u16_be_err(2).unwrap();
    w.write_all(b"8BSL").unwrap();
    w.write_u16_be_err(3).unwrap();
    w.write_u32_be_err(patterns_size).unwrap();
}

/// The styles part: style count, byte size and the two descriptors
/// each preceded by the format version
fn styles_part(w: &mut VecWriter, first: &[u8], second: &[u8]) {
    w.write_u32_be_err(2).unwrap();
    w.write_u32_be_err((first.len() + second.len() + 8) as u32).unwrap();
    w.write_u32_be_err(16).unwrap();
    w.write_all(first).unwrap();
    w.write_u32_be_err(16).unwrap();
    w.write_all(second).unwrap();
}

/// One complete pattern record, including the leading size word and
/// the trailing alignment padding
fn pattern_record(
    image_mode: u32, width: u32, height: u32, name: &str, uuid: &str, planes: &[&[u8]], rle: bool
) -> Vec<u8> {
    // virtual array payload
    let mut va = vec![];
    {
        let mut w = OcWriter::new(&mut va);

        w.write_u32_be_err(0).unwrap(); // top
        w.write_u32_be_err(0).unwrap(); // left
        w.write_u32_be_err(height).unwrap(); // bottom
        w.write_u32_be_err(width).unwrap(); // right
        w.write_u32_be_err(24).unwrap(); // channel count

        for plane in planes {
            let mut body = vec![];
            {
                let mut pw = OcWriter::new(&mut body);

                pw.write_u32_be_err(8).unwrap(); // depth
                pw.write_u32_be_err(0).unwrap(); // plane rect
                pw.write_u32_be_err(0).unwrap();
                pw.write_u32_be_err(height).unwrap();
                pw.write_u32_be_err(width).unwrap();
                pw.write_u16_be_err(8).unwrap(); // depth again

                if rle {
                    pw.write_u8_err(1).unwrap();
                    let rows: Vec<Vec<u8>> = plane
                        .chunks(width as usize)
                        .map(compress_packbits)
                        .collect();

                    for row in &rows {
                        pw.write_u16_be_err(row.len() as u16).unwrap();
                    }
                    for row in &rows {
                        pw.write_all(row).unwrap();
                    }
                } else {
                    pw.write_u8_err(0).unwrap();
                    pw.write_all(plane).unwrap();
                }
            }
            w.write_u32_be_err(1).unwrap(); // written flag
            w.write_u32_be_err(body.len() as u32).unwrap();
            w.write_all(&body).unwrap();
        }
    }

    // record payload
    let mut payload = vec![];
    {
        let mut w = OcWriter::new(&mut payload);

        w.write_u32_be_err(1).unwrap(); // pattern version
        w.write_u32_be_err(image_mode).unwrap();
        w.write_u16_be_err(height as u16).unwrap();
        w.write_u16_be_err(width as u16).unwrap();
        unicode_string(&mut w, name);
        pascal_string(&mut w, uuid);
        w.write_u32_be_err(3).unwrap(); // virtual array version
        w.write_u32_be_err(va.len() as u32).unwrap();
        w.write_all(&va).unwrap();
    }

    let mut record = vec![];
    {
        let mut w = OcWriter::new(&mut record);

        w.write_u32_be_err(payload.len() as u32).unwrap();
        w.write_all(&payload).unwrap();
        // records are padded to 4 bytes
        while (w.bytes_written() - 4) % 4 != 0 {
            w.write_u8_err(0).unwrap();
        }
    }
    record
}

/// A full stream: header, the given pattern records, two style
/// descriptors
fn full_stream(records: &[Vec<u8>], first: &[u8], second: &[u8]) -> Vec<u8> {
    let patterns_size: usize = records.iter().map(Vec::len).sum();

    let mut data = vec![];
    let mut w = OcWriter::new(&mut data);

    asl_header(&mut w, patterns_size as u32);
    for record in records {
        w.write_all(record).unwrap();
    }
    styles_part(&mut w, first, second);
    data
}

fn decode(data: &[u8]) -> ochre_asl::AslTree {
    AslDecoder::new(OcCursor::new(data)).decode()
}

fn pattern_blob(pattern: &AslNode) -> &str {
    match &pattern.find("Data").expect("pattern has no Data child").value {
        AslValue::PatternBlob(blob) => blob,
        other => panic!("Data child is {:?}", other)
    }
}

/// Inflate a pattern's blob and pull the RGBA pixels out of the
/// serialized raster
fn blob_pixels(blob: &str) -> Vec<u8> {
    let compressed = BASE64_STANDARD.decode(blob).unwrap();
    let pat = compression::decompress(&compressed).unwrap();

    let header_size = u32::from_be_bytes(pat[0..4].try_into().unwrap()) as usize;
    assert_eq!(&pat[20..24], b"GPAT");

    pat[header_size..].to_vec()
}

#[test]
fn test_minimal_stream() {
    let style = null_descriptor("null");

    let mut data = vec![];
    let mut w = OcWriter::new(&mut data);
    asl_header(&mut w, 0);
    // an unusual style count is informational only
    w.write_u32_be_err(1).unwrap();
    w.write_u32_be_err(999).unwrap();
    w.write_u32_be_err(16).unwrap();
    w.write_all(&style).unwrap();
    w.write_u32_be_err(16).unwrap();
    w.write_all(&style).unwrap();

    let tree = decode(&data);

    assert!(tree.error.is_none(), "{:?}", tree.error);
    assert_eq!(tree.root.children().len(), 2);

    for child in tree.root.children() {
        assert_eq!(child.key, "");
        match &child.value {
            AslValue::Descriptor {
                class_id, children, ..
            } => {
                assert_eq!(class_id, "null");
                assert!(children.is_empty());
            }
            other => panic!("expected a descriptor, got {:?}", other)
        }
    }
}

#[test]
fn test_rich_descriptors_render_the_expected_catalog() {
    let mut first = vec![];
    {
        let mut w = OcWriter::new(&mut first);

        descriptor_open(&mut w, "null", 7);
        child_long(&mut w, "Sz  ", 4);
        child_untf(&mut w, "Opct", "#Prc", 50.5);
        child_text(&mut w, "blnd", "Normal");
        child_bool(&mut w, "enab", 1);
        child_enum(&mut w, "Md  ", "BlnM", "Nrml");

        // a nested descriptor
        var_string(&mut w, "Grad");
        w.write_all(b"Objc").unwrap();
        descriptor_open(&mut w, "Grdn", 1);
        child_text(&mut w, "Nm  ", "g");

        // a list of two un-keyed doubles
        var_string(&mut w, "Trns");
        w.write_all(b"VlLs").unwrap();
        w.write_u32_be_err(2).unwrap();
        w.write_all(b"doub").unwrap();
        w.write_u64_be_err(0.5_f64.to_bits()).unwrap();
        w.write_all(b"doub").unwrap();
        w.write_u64_be_err(1.0_f64.to_bits()).unwrap();
    }
    let second = null_descriptor("null");

    let tree = decode(&full_stream(&[], &first, &second));
    assert!(tree.error.is_none(), "{:?}", tree.error);

    let expected = "<asl>\n \
         <node type=\"Descriptor\" classId=\"null\" name=\"\">\n  \
         <node key=\"Sz  \" type=\"Integer\" value=\"4\"/>\n  \
         <node key=\"Opct\" type=\"UnitFloat\" value=\"50.5\" unit=\"#Prc\"/>\n  \
         <node key=\"blnd\" type=\"Text\" value=\"Normal\"/>\n  \
         <node key=\"enab\" type=\"Boolean\" value=\"1\"/>\n  \
         <node key=\"Md  \" type=\"Enum\" value=\"Nrml\" typeId=\"BlnM\"/>\n  \
         <node key=\"Grad\" type=\"Descriptor\" classId=\"Grdn\" name=\"\">\n   \
         <node key=\"Nm  \" type=\"Text\" value=\"g\"/>\n  \
         </node>\n  \
         <node key=\"Trns\" type=\"List\">\n   \
         <node type=\"Double\" value=\"0.5\"/>\n   \
         <node type=\"Double\" value=\"1\"/>\n  \
         </node>\n \
         </node>\n \
         <node type=\"Descriptor\" classId=\"null\" name=\"\"/>\n\
         </asl>\n";

    assert_eq!(tree.to_xml(), expected);
}

#[test]
fn test_grayscale_pattern_replicates_into_color_channels() {
    let plane = [9_u8, 10, 11, 12];
    let record = pattern_record(1, 2, 2, "dots", "uuid-1", &[&plane], false);
    let style = null_descriptor("null");

    let tree = decode(&full_stream(&[record], &style, &style));
    assert!(tree.error.is_none(), "{:?}", tree.error);
    assert_eq!(tree.root.children().len(), 3);

    let patterns = &tree.root.children()[0];
    assert_eq!(patterns.key, "Patterns");
    assert_eq!(patterns.children().len(), 1);

    let pattern = &patterns.children()[0];
    match &pattern.find("Nm  ").unwrap().value {
        AslValue::Text(name) => assert_eq!(name, "dots"),
        other => panic!("unexpected name node {:?}", other)
    }
    match &pattern.find("Idnt").unwrap().value {
        AslValue::Text(uuid) => assert_eq!(uuid, "uuid-1"),
        other => panic!("unexpected uuid node {:?}", other)
    }

    let pixels = blob_pixels(pattern_blob(pattern));
    let expected: Vec<u8> = plane
        .iter()
        .flat_map(|v| [*v, *v, *v, 0xFF])
        .collect();

    assert_eq!(pixels, expected);
}

#[test]
fn test_rgb_pattern_plane_order() {
    // wire order is red, green, blue
    let planes: [&[u8]; 3] = [&[1], &[2], &[3]];
    let record = pattern_record(3, 1, 1, "rgb", "uuid-2", &planes, false);
    let style = null_descriptor("null");

    let tree = decode(&full_stream(&[record], &style, &style));
    assert!(tree.error.is_none(), "{:?}", tree.error);

    let pattern = &tree.root.children()[0].children()[0];
    // the serialized raster is RGBA again
    assert_eq!(blob_pixels(pattern_blob(pattern)), [1, 2, 3, 0xFF]);
}

#[test]
fn test_rle_and_raw_planes_decode_identically() {
    let plane: Vec<u8> = (0..64)
        .map(|i| if i % 16 < 8 { 0xFF } else { i as u8 })
        .collect();

    let raw = pattern_record(1, 8, 8, "p", "u", &[&plane], false);
    let rle = pattern_record(1, 8, 8, "p", "u", &[&plane], true);
    let style = null_descriptor("null");

    let raw_tree = decode(&full_stream(&[raw], &style, &style));
    let rle_tree = decode(&full_stream(&[rle], &style, &style));

    assert!(raw_tree.error.is_none(), "{:?}", raw_tree.error);
    assert!(rle_tree.error.is_none(), "{:?}", rle_tree.error);

    let raw_pattern = &raw_tree.root.children()[0].children()[0];
    let rle_pattern = &rle_tree.root.children()[0].children()[0];

    assert_eq!(
        blob_pixels(pattern_blob(raw_pattern)),
        blob_pixels(pattern_blob(rle_pattern))
    );
}

#[test]
fn test_corrupt_pattern_resyncs_on_the_declared_size() {
    let good = pattern_record(1, 2, 1, "second", "u2", &[&[5, 6]], false);
    let mut bad = pattern_record(1, 2, 1, "first", "u1", &[&[1, 2]], false);
    // break the compression selector, third byte from the end of a
    // raw 2x1 record, the declared size stays correct
    let damage = bad.len() - 3;
    bad[damage] = 9;

    // record level: the first read fails but leaves the cursor on the
    // record boundary, the second then parses cleanly
    let mut section = vec![];
    section.extend_from_slice(&bad);
    section.extend_from_slice(&good);

    let options = DecoderOptions::default();
    let mut stream = OcReader::new(OcCursor::new(&section));

    assert!(read_pattern(&mut stream, &options).is_err());
    assert_eq!(stream.position().unwrap(), bad.len() as u64);

    let (consumed, node) = read_pattern(&mut stream, &options).unwrap();
    assert_eq!(consumed, good.len() as u64);
    match &node.find("Nm  ").unwrap().value {
        AslValue::Text(name) => assert_eq!(name, "second"),
        other => panic!("unexpected name node {:?}", other)
    }

    // stream level: the loop stops at the damaged record but the
    // style descriptors still load
    let style = null_descriptor("null");
    let tree = decode(&full_stream(&[bad, good], &style, &style));

    assert!(tree.error.is_none(), "{:?}", tree.error);
    assert_eq!(tree.root.children().len(), 3);
    assert_eq!(tree.root.children()[0].children().len(), 0);
    assert!(matches!(tree.root.children()[1].value, AslValue::Descriptor { .. }));
    assert!(matches!(tree.root.children()[2].value, AslValue::Descriptor { .. }));
}

#[test]
fn test_overhanging_pattern_record_keeps_the_styles() {
    let style = null_descriptor("null");

    // an 8 byte patterns section holding one record that claims 64
    // bytes, its bound lands far beyond the section end
    let mut data = vec![];
    let mut w = OcWriter::new(&mut data);
    asl_header(&mut w, 8);
    w.write_u32_be_err(64).unwrap();
    w.write_u32_be_err(0).unwrap();
    styles_part(&mut w, &style, &style);

    let tree = decode(&data);

    assert!(tree.error.is_none(), "{:?}", tree.error);
    assert_eq!(tree.root.children().len(), 3);

    let patterns = &tree.root.children()[0];
    assert_eq!(patterns.key, "Patterns");
    assert!(patterns.children().is_empty());
    assert!(matches!(tree.root.children()[1].value, AslValue::Descriptor { .. }));
    assert!(matches!(tree.root.children()[2].value, AslValue::Descriptor { .. }));
}

#[test]
fn test_strict_mode_rejects_damaged_patterns() {
    let mut bad = pattern_record(1, 2, 1, "first", "u1", &[&[1, 2]], false);
    let damage = bad.len() - 3;
    bad[damage] = 9;

    let style = null_descriptor("null");
    let data = full_stream(&[bad], &style, &style);

    let strict = AslDecoder::new_with_options(
        OcCursor::new(&data),
        DecoderOptions::new_strict()
    )
    .decode();
    assert!(strict.error.is_some());

    let lenient = decode(&data);
    assert!(lenient.error.is_none(), "{:?}", lenient.error);
}

#[test]
fn test_strict_mode_keeps_patterns_decoded_before_the_failure() {
    let good = pattern_record(1, 2, 1, "kept", "u1", &[&[1, 2]], false);
    let mut bad = pattern_record(1, 2, 1, "broken", "u2", &[&[3, 4]], false);
    // the compression selector is the third-to-last payload byte; index
    // it through the declared payload size so the alignment padding
    // behind the payload does not shift the target
    let payload_len = u32::from_be_bytes(bad[..4].try_into().unwrap()) as usize;
    let damage = 4 + payload_len - 3;
    bad[damage] = 9;

    let style = null_descriptor("null");
    let data = full_stream(&[good, bad], &style, &style);

    let tree = AslDecoder::new_with_options(
        OcCursor::new(&data),
        DecoderOptions::new_strict()
    )
    .decode();

    // the failure is reported, the records decoded before it survive
    assert!(tree.error.is_some());

    let patterns = tree.root.find("Patterns").unwrap();
    assert_eq!(patterns.children().len(), 1);
    match &patterns.children()[0].find("Nm  ").unwrap().value {
        AslValue::Text(name) => assert_eq!(name, "kept"),
        other => panic!("unexpected name node {:?}", other)
    }
}

#[test]
fn test_patterns_can_be_skipped_wholesale() {
    let record = pattern_record(1, 2, 1, "p", "u", &[&[1, 2]], false);
    let style = null_descriptor("null");
    let data = full_stream(&[record], &style, &style);

    let options = DecoderOptions::default().set_decode_patterns(false);
    let tree = AslDecoder::new_with_options(OcCursor::new(&data), options).decode();

    assert!(tree.error.is_none(), "{:?}", tree.error);
    // no patterns child at all, just the two styles
    assert_eq!(tree.root.children().len(), 2);
}

#[test]
fn test_truncation_at_every_prefix() {
    let record = pattern_record(3, 2, 2, "pat", "uuid", &[&[1; 4], &[2; 4], &[3; 4]], false);

    let mut first = vec![];
    {
        let mut w = OcWriter::new(&mut first);
        descriptor_open(&mut w, "null", 2);
        child_long(&mut w, "Sz  ", 4);
        child_text(&mut w, "Nm  ", "style");
    }
    let second = null_descriptor("null");
    let data = full_stream(&[record], &first, &second);

    let full = decode(&data);
    assert!(full.error.is_none(), "{:?}", full.error);

    for length in 0..data.len() {
        let tree = decode(&data[..length]);

        assert!(
            tree.error.is_some(),
            "prefix of {length} bytes decoded without a diagnostic"
        );
        // the partial tree stays usable
        assert!(tree.root.children().len() <= 3);
    }
}

#[test]
fn test_depth_bomb_through_the_decoder() {
    let mut first = vec![];
    {
        let mut w = OcWriter::new(&mut first);

        for _ in 0..64 {
            descriptor_open(&mut w, "null", 1);
            var_string(&mut w, "Lyr ");
            w.write_all(b"Objc").unwrap();
        }
        descriptor_open(&mut w, "null", 0);
    }
    let second = null_descriptor("null");
    let data = full_stream(&[], &first, &second);

    let options = DecoderOptions::default().set_max_depth(8);
    let tree = AslDecoder::new_with_options(OcCursor::new(&data), options).decode();

    assert!(matches!(
        tree.error,
        Some(ochre_asl::errors::AslDecodeErrors::NestingTooDeep(8))
    ));
}

#[test]
fn test_wrong_magic_is_rejected() {
    let mut data = vec![];
    let mut w = OcWriter::new(&mut data);

    w.write_u16_be_err(2).unwrap();
    w.write_all(b"8BIM").unwrap();
    w.write_u16_be_err(3).unwrap();
    w.write_u32_be_err(0).unwrap();

    let tree = decode(&data);

    assert!(matches!(
        tree.error,
        Some(ochre_asl::errors::AslDecodeErrors::WrongMagicBytes(_))
    ));
    assert!(tree.root.children().is_empty());
}

#[test]
fn test_decode_through_std_cursor() {
    let style = null_descriptor("null");
    let data = full_stream(&[], &style, &style);

    let mut decoder = AslDecoder::new(std::io::Cursor::new(data));
    let tree = decoder.decode();

    assert!(tree.error.is_none(), "{:?}", tree.error);
    assert_eq!(tree.root.children().len(), 2);
}
