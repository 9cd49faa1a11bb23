#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use ochre_core::bytestream::OcCursor;

    let data = OcCursor::new(data);
    let mut decoder = ochre_asl::AslDecoder::new(data);
    let tree = decoder.decode();
    let _ = tree.to_xml();
});
