/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! PackBits run-length coding
//!
//! Pattern planes compress each raster row independently with the
//! PackBits scheme: a control byte `n` followed by either `n + 1`
//! literal bytes (`n < 128`), nothing (`n == 128`), or one byte to be
//! repeated `257 - n` times (`n > 128`).

use core::cmp::Ordering;

use crate::errors::AslDecodeErrors;

/// Decode one PackBits-compressed buffer
///
/// `expected_len` is the length the caller knows the output must have,
/// one raster row decodes to exactly the row width. Output of any
/// other length fails with
/// [`DecompressionMismatch`](AslDecodeErrors::DecompressionMismatch);
/// runs or literals extending past the end of `src` fail with
/// [`BadRLE`](AslDecodeErrors::BadRLE).
pub fn decompress_packbits(src: &[u8], expected_len: usize) -> Result<Vec<u8>, AslDecodeErrors> {
    let mut out = Vec::with_capacity(expected_len);
    let mut pos = 0;

    while pos < src.len() {
        let control = src[pos];
        pos += 1;

        match control.cmp(&128) {
            Ordering::Less => {
                let count = usize::from(control) + 1;
                let literal = src.get(pos..pos + count).ok_or(AslDecodeErrors::BadRLE)?;

                out.extend_from_slice(literal);
                pos += count;
            }
            Ordering::Equal => {
                // no-op control byte
            }
            Ordering::Greater => {
                let count = 257 - usize::from(control);
                let value = *src.get(pos).ok_or(AslDecodeErrors::BadRLE)?;

                out.resize(out.len() + count, value);
                pos += 1;
            }
        }
    }

    if out.len() != expected_len {
        return Err(AslDecodeErrors::DecompressionMismatch(expected_len, out.len()));
    }
    Ok(out)
}

fn starts_run(src: &[u8], pos: usize) -> bool {
    src.len() - pos >= 3 && src[pos] == src[pos + 1] && src[pos] == src[pos + 2]
}

/// Encode a buffer with PackBits
///
/// Runs of three or more identical bytes become replicate packets,
/// everything else is grouped into literal packets of at most 128
/// bytes. The counterpart of [`decompress_packbits`].
pub fn compress_packbits(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() + (src.len() / 128) + 1);
    let mut pos = 0;

    while pos < src.len() {
        if starts_run(src, pos) {
            let value = src[pos];
            let mut run = 3;

            while run < 128 && pos + run < src.len() && src[pos + run] == value {
                run += 1;
            }
            out.push((257 - run) as u8);
            out.push(value);
            pos += run;
        } else {
            let start = pos;
            pos += 1;

            while pos < src.len() && pos - start < 128 && !starts_run(src, pos) {
                pos += 1;
            }
            let literal = &src[start..pos];

            out.push((literal.len() - 1) as u8);
            out.extend_from_slice(literal);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{compress_packbits, decompress_packbits};
    use crate::errors::AslDecodeErrors;

    #[test]
    fn test_known_vector() {
        // the classic PackBits reference buffer
        let src = [
            0xFE, 0xAA, 0x02, 0x80, 0x00, 0x2A, 0xFD, 0xAA, 0x03, 0x80, 0x00, 0x2A, 0x22, 0xF7,
            0xAA
        ];
        let expected = [
            0xAA, 0xAA, 0xAA, 0x80, 0x00, 0x2A, 0xAA, 0xAA, 0xAA, 0xAA, 0x80, 0x00, 0x2A, 0x22,
            0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA
        ];

        let got = decompress_packbits(&src, expected.len()).unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_noop_control_byte_is_skipped() {
        let src = [0x80, 0x00, 0x41];
        let got = decompress_packbits(&src, 1).unwrap();
        assert_eq!(got, [0x41]);
    }

    #[test]
    fn test_wrong_expected_length() {
        let src = [0xFE, 0xAA];
        let result = decompress_packbits(&src, 4);

        assert!(matches!(result, Err(AslDecodeErrors::DecompressionMismatch(4, 3))));
    }

    #[test]
    fn test_truncated_packets() {
        // literal packet announcing 3 bytes with only 1 present
        assert!(matches!(
            decompress_packbits(&[0x02, 0x10], 3),
            Err(AslDecodeErrors::BadRLE)
        ));
        // replicate packet with no byte to replicate
        assert!(matches!(decompress_packbits(&[0xFE], 3), Err(AslDecodeErrors::BadRLE)));
    }

    #[test]
    fn test_round_trips() {
        let buffers: &[&[u8]] = &[
            &[],
            &[1],
            &[1, 2, 3, 4, 5],
            &[7; 300],
            &[0, 0, 0, 1, 2, 2, 2, 2, 3, 4, 5, 5],
            b"abba abba abba",
        ];

        for buffer in buffers {
            let compressed = compress_packbits(buffer);
            let got = decompress_packbits(&compressed, buffer.len()).unwrap();

            assert_eq!(&got, buffer);
        }

        // literal chunks longer than one packet
        let long: Vec<u8> = (0..=255_u8).chain(0..=255_u8).collect();
        let compressed = compress_packbits(&long);
        assert_eq!(decompress_packbits(&compressed, long.len()).unwrap(), long);
    }
}
