//! Big-endian primitives shared by the layer encoders.
//!
//! Callers size their buffers from `layout`, so these helpers index directly:
//! an offset past the end of the buffer is a caller bug and panics.

use super::cid::Cid;
use super::layout::CID_LEN;

pub fn write_u16_be(value: u16, buffer: &mut [u8], offset: usize) {
    buffer[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
}

pub fn read_u16_be(buffer: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([buffer[offset], buffer[offset + 1]])
}

pub fn write_u32_be(value: u32, buffer: &mut [u8], offset: usize) {
    buffer[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}

pub fn read_u32_be(buffer: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        buffer[offset],
        buffer[offset + 1],
        buffer[offset + 2],
        buffer[offset + 3],
    ])
}

/// Writes `value` as UTF-8 into a `length`-byte field.
///
/// Longer values are cut at exactly `length` bytes with no terminator, which
/// may split a multi-byte character. Shorter values are zero padded.
pub fn write_fixed_string(value: &str, buffer: &mut [u8], offset: usize, length: usize) {
    let field = &mut buffer[offset..offset + length];
    let bytes = value.as_bytes();
    let copied = bytes.len().min(length);
    field[..copied].copy_from_slice(&bytes[..copied]);
    field[copied..].fill(0);
}

/// Reads a `length`-byte field as UTF-8, trailing zero bytes included.
///
/// Invalid sequences (e.g. a character split by truncation) are replaced
/// rather than rejected.
pub fn read_fixed_string(buffer: &[u8], offset: usize, length: usize) -> String {
    String::from_utf8_lossy(&buffer[offset..offset + length]).into_owned()
}

pub fn write_cid(cid: &Cid, buffer: &mut [u8], offset: usize) {
    buffer[offset..offset + CID_LEN].copy_from_slice(cid.as_bytes());
}

pub fn read_cid(buffer: &[u8], offset: usize) -> Cid {
    let mut bytes = [0u8; CID_LEN];
    bytes.copy_from_slice(&buffer[offset..offset + CID_LEN]);
    Cid::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u16_is_big_endian() {
        let mut buf = [0u8; 4];
        write_u16_be(0x1234, &mut buf, 1);
        assert_eq!(buf, [0x00, 0x12, 0x34, 0x00]);
        assert_eq!(read_u16_be(&buf, 1), 0x1234);
    }

    #[test]
    fn u32_is_big_endian() {
        let mut buf = [0u8; 6];
        write_u32_be(0x0000_0004, &mut buf, 2);
        assert_eq!(buf, [0, 0, 0, 0, 0, 4]);
        assert_eq!(read_u32_be(&buf, 2), 4);
    }

    #[test]
    fn fixed_string_is_zero_padded() {
        let mut buf = [0xFFu8; 8];
        write_fixed_string("abc", &mut buf, 0, 6);
        assert_eq!(&buf, b"abc\0\0\0\xFF\xFF");
        assert_eq!(read_fixed_string(&buf, 0, 6), "abc\0\0\0");
    }

    #[test]
    fn fixed_string_truncates_without_terminator() {
        let mut buf = [0u8; 4];
        write_fixed_string("abcdef", &mut buf, 0, 4);
        assert_eq!(&buf, b"abcd");
    }

    #[test]
    fn fixed_string_exact_fit_has_no_terminator() {
        let mut buf = [0u8; 4];
        write_fixed_string("abcd", &mut buf, 0, 4);
        assert_eq!(read_fixed_string(&buf, 0, 4), "abcd");
    }

    #[test]
    fn cid_is_copied_verbatim() {
        let raw: [u8; 16] = core::array::from_fn(|idx| idx as u8);
        let mut buf = [0u8; 20];
        write_cid(&Cid::from_bytes(raw), &mut buf, 2);
        assert_eq!(&buf[2..18], &raw);
        assert_eq!(read_cid(&buf, 2).as_bytes(), &raw);
    }

    #[test]
    #[should_panic]
    fn read_past_end_panics() {
        let buf = [0u8; 3];
        read_u32_be(&buf, 0);
    }
}
