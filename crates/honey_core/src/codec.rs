use std::io;

use crate::layout::FieldLayout;

/// Decode the unsigned big-endian field described by `layout` from `bytes`.
pub fn decode(bytes: &[u8], layout: FieldLayout) -> io::Result<u32> {
    layout.check_fits(bytes.len())?;

    let mut value = 0u32;
    for &byte in &bytes[layout.offset..layout.end()] {
        value = (value << 8) | u32::from(byte);
    }
    Ok(value)
}

/// Encode `value` as exactly `layout.width` big-endian bytes. A value that
/// does not fit the width is rejected, never truncated.
pub fn encode(value: u32, layout: FieldLayout) -> io::Result<Vec<u8>> {
    layout.validate()?;
    if value > layout.max_value() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "value {value} does not fit in {} unsigned bytes (max {})",
                layout.width,
                layout.max_value()
            ),
        ));
    }

    let mut out = vec![0u8; layout.width];
    let mut rest = value;
    for slot in out.iter_mut().rev() {
        *slot = (rest & 0xFF) as u8;
        rest >>= 8;
    }
    Ok(out)
}

/// Overwrite the field bytes in place, leaving every other byte untouched.
pub fn patch(bytes: &mut [u8], layout: FieldLayout, value: u32) -> io::Result<()> {
    layout.check_fits(bytes.len())?;
    let encoded = encode(value, layout)?;
    bytes[layout.offset..layout.end()].copy_from_slice(&encoded);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: FieldLayout = FieldLayout { offset: 2, width: 4 };

    #[test]
    fn decode_reads_big_endian() {
        let bytes = [0xAA, 0xBB, 0x00, 0x00, 0x27, 0x10, 0xCC];
        assert_eq!(decode(&bytes, FIELD).expect("decode failed"), 10_000);
    }

    #[test]
    fn decode_rejects_out_of_bounds_field() {
        let bytes = [0u8; 5];
        let err = decode(&bytes, FIELD).expect_err("expected range failure");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn encode_emits_exactly_width_bytes() {
        let encoded = encode(50_000, FIELD).expect("encode failed");
        assert_eq!(encoded, vec![0x00, 0x00, 0xC3, 0x50]);
    }

    #[test]
    fn encode_rejects_value_wider_than_field() {
        let narrow = FieldLayout { offset: 0, width: 2 };
        let err = encode(0x1_0000, narrow).expect_err("expected range failure");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn round_trip_extremes() {
        for value in [0, 1, 10_000, 9_999_999, u32::MAX] {
            let mut bytes = vec![0u8; FIELD.end()];
            patch(&mut bytes, FIELD, value).expect("patch failed");
            assert_eq!(decode(&bytes, FIELD).expect("decode failed"), value);
        }
    }

    #[test]
    fn patch_touches_only_the_field_bytes() {
        let mut bytes: Vec<u8> = (0..16).map(|i| i as u8).collect();
        let original = bytes.clone();
        patch(&mut bytes, FIELD, u32::MAX).expect("patch failed");

        assert_eq!(bytes.len(), original.len());
        assert_eq!(&bytes[..FIELD.offset], &original[..FIELD.offset]);
        assert_eq!(&bytes[FIELD.end()..], &original[FIELD.end()..]);
        assert_eq!(&bytes[FIELD.offset..FIELD.end()], &[0xFF; 4]);
    }
}
