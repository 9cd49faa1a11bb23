/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Length-declared section discipline
//!
//! Most ASL records announce their own byte length up front. Parsing
//! one must therefore leave the cursor at `start + declared` no matter
//! how the parse went, so a damaged record cannot shift every record
//! after it.

use ochre_core::bytestream::{OcByteReaderTrait, OcReader};
use ochre_core::log::{trace, warn};

use crate::errors::AslDecodeErrors;

/// Run `parse` over the next `declared` bytes of the stream and then
/// reposition the cursor to the end of the section.
///
/// The reposition happens on every exit, success or failure, so the
/// caller can continue with the next sibling record. Byte accounting
/// is checked against `slack`:
///
/// - falling short of the declared length is tolerated, trailing
///   padding is common and the forced seek skips it
/// - overshooting by at most `slack` bytes is logged
/// - overshooting by more than `slack` bytes fails the section with
///   [`RecordSizeMismatch`](AslDecodeErrors::RecordSizeMismatch), the
///   record consumed bytes belonging to its siblings so its content is
///   suspect
///
/// A parse error is preserved across the reposition. If the reposition
/// seek itself fails the stream is unusable and that error wins.
pub(crate) fn read_section<T, F, R>(
    stream: &mut OcReader<T>, declared: u64, slack: u64, section: &'static str, parse: F
) -> Result<R, AslDecodeErrors>
where
    T: OcByteReaderTrait,
    F: FnOnce(&mut OcReader<T>) -> Result<R, AslDecodeErrors>
{
    let start = stream.position()?;
    let end = start
        .checked_add(declared)
        .ok_or(AslDecodeErrors::Generic("section end overflows the stream offset"))?;

    let result = parse(stream);

    let consumed_to = stream.position()?;
    stream.set_position(end)?;

    let value = result?;

    if consumed_to > end {
        let overshoot = consumed_to - end;

        if overshoot > slack {
            return Err(AslDecodeErrors::RecordSizeMismatch(
                section,
                declared,
                consumed_to - start
            ));
        }
        warn!(
            "{} overshot its declared {} bytes by {}",
            section, declared, overshoot
        );
    } else if consumed_to < end {
        trace!(
            "{} declared {} bytes, parsing consumed {}",
            section,
            declared,
            consumed_to - start
        );
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use ochre_core::bytestream::{OcCursor, OcReader};

    use super::read_section;
    use crate::errors::AslDecodeErrors;

    #[test]
    fn test_under_run_repositions_to_declared_end() {
        let data = [1_u8, 2, 3, 4, 5, 6, 7, 8];
        let mut stream = OcReader::new(OcCursor::new(&data));

        let got = read_section(&mut stream, 4, 0, "test section", |s| s.read_u8_err().map_err(Into::into)).unwrap();

        assert_eq!(got, 1);
        assert_eq!(stream.position().unwrap(), 4);
    }

    #[test]
    fn test_over_run_beyond_slack_fails() {
        let data = [1_u8, 2, 3, 4, 5, 6, 7, 8];
        let mut stream = OcReader::new(OcCursor::new(&data));

        let result = read_section(&mut stream, 2, 0, "test section", |s| {
            s.get_u32_be_err().map_err(Into::into)
        });

        assert!(matches!(result, Err(AslDecodeErrors::RecordSizeMismatch(_, 2, 4))));
        // the cursor still lands on the declared end
        assert_eq!(stream.position().unwrap(), 2);
    }

    #[test]
    fn test_over_run_within_slack_is_tolerated() {
        let data = [1_u8, 2, 3, 4, 5, 6, 7, 8];
        let mut stream = OcReader::new(OcCursor::new(&data));

        let got = read_section(&mut stream, 2, 4, "test section", |s| {
            s.get_u32_be_err().map_err(Into::into)
        })
        .unwrap();

        assert_eq!(got, 0x0102_0304);
        assert_eq!(stream.position().unwrap(), 2);
    }

    #[test]
    fn test_parse_error_survives_the_reposition() {
        let data = [1_u8, 2, 3, 4, 5, 6, 7, 8];
        let mut stream = OcReader::new(OcCursor::new(&data));

        let result: Result<(), _> = read_section(&mut stream, 4, 0, "test section", |_| {
            Err(AslDecodeErrors::Generic("damaged record"))
        });

        assert!(matches!(result, Err(AslDecodeErrors::Generic(_))));
        assert_eq!(stream.position().unwrap(), 4);
    }
}
