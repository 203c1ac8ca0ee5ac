//! JSON-style string escaping for text records
//!
//! Only control bytes (0x00..=0x1F), `"` and `\` are escaped. Every other
//! byte, including each byte of a multi-byte UTF-8 sequence, is copied
//! verbatim in coalesced runs. No UTF-8 validation is performed.

use core::fmt;

/// Lowercase hex digits for `\u00XX` escapes
const HEX: &[u8; 16] = b"0123456789abcdef";

/// Escape classification indexed by byte value
pub static ESCAPE_TABLE: [bool; 256] = build_escape_table();

const fn build_escape_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < 0x20 {
        table[i] = true;
        i += 1;
    }
    table[b'"' as usize] = true;
    table[b'\\' as usize] = true;
    table
}

/// Check whether a byte must be escaped inside a quoted string
#[inline]
pub fn needs_escape(byte: u8) -> bool {
    ESCAPE_TABLE[byte as usize]
}

/// Append `src` to `buf` with escaping applied, without surrounding quotes
pub fn append_escaped(buf: &mut Vec<u8>, src: &[u8]) {
    let mut start = 0;

    for (i, &byte) in src.iter().enumerate() {
        if !needs_escape(byte) {
            continue;
        }

        if start < i {
            buf.extend_from_slice(&src[start..i]);
        }

        match byte {
            b'"' => buf.extend_from_slice(b"\\\""),
            b'\\' => buf.extend_from_slice(b"\\\\"),
            b'\n' => buf.extend_from_slice(b"\\n"),
            b'\r' => buf.extend_from_slice(b"\\r"),
            b'\t' => buf.extend_from_slice(b"\\t"),
            0x08 => buf.extend_from_slice(b"\\b"),
            0x0C => buf.extend_from_slice(b"\\f"),
            _ => buf.extend_from_slice(&[
                b'\\',
                b'u',
                b'0',
                b'0',
                HEX[(byte >> 4) as usize],
                HEX[(byte & 0x0F) as usize],
            ]),
        }

        start = i + 1;
    }

    if start < src.len() {
        buf.extend_from_slice(&src[start..]);
    }
}

/// Append `s` to `buf` as a quoted, escaped string
#[inline]
pub fn append_quoted(buf: &mut Vec<u8>, s: &str) {
    buf.push(b'"');
    append_escaped(buf, s.as_bytes());
    buf.push(b'"');
}

/// `fmt::Write` adapter that escapes everything written through it
///
/// Lets `Display` values be written straight into a record buffer.
pub struct EscapeWriter<'a> {
    buf: &'a mut Vec<u8>,
}

impl<'a> EscapeWriter<'a> {
    /// Wrap a record buffer
    #[inline]
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        Self { buf }
    }
}

impl fmt::Write for EscapeWriter<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        append_escaped(self.buf, s.as_bytes());
        Ok(())
    }
}
