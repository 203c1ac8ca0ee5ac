//! Decimal number formatting for text records
//!
//! Integers are emitted as minimal decimal using digit arithmetic on a
//! stack scratch array. Floats use the shortest representation that
//! round-trips at the value's own width, always in fixed-point notation.

use core::fmt::{self, Write};

/// Maximum decimal digits of a u64
const MAX_U64_DIGITS: usize = 20;

/// Complex number as a (real, imaginary) pair
///
/// `Complex32` has `f32` components and travels under
/// [`Tag::Complex64`](crate::Tag::Complex64); `Complex64` has `f64`
/// components and travels under [`Tag::Complex128`](crate::Tag::Complex128).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex<F> {
    /// Real part
    pub re: F,
    /// Imaginary part
    pub im: F,
}

impl<F> Complex<F> {
    /// Create a complex value from its parts
    #[inline]
    pub const fn new(re: F, im: F) -> Self {
        Self { re, im }
    }
}

/// Complex number with `f32` components
pub type Complex32 = Complex<f32>;

/// Complex number with `f64` components
pub type Complex64 = Complex<f64>;

/// Append an unsigned integer as minimal decimal
#[inline]
pub fn append_u64(buf: &mut Vec<u8>, mut value: u64) {
    let mut scratch = [0u8; MAX_U64_DIGITS];
    let mut pos = scratch.len();

    loop {
        pos -= 1;
        scratch[pos] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }

    buf.extend_from_slice(&scratch[pos..]);
}

/// Append a signed integer as minimal decimal
#[inline]
pub fn append_i64(buf: &mut Vec<u8>, value: i64) {
    if value < 0 {
        buf.push(b'-');
    }
    append_u64(buf, value.unsigned_abs());
}

/// Append an `f32` using its shortest round-trip fixed-point form
#[inline]
pub fn append_f32(buf: &mut Vec<u8>, value: f32) {
    if !value.is_finite() {
        append_non_finite(buf, value.is_nan(), value.is_sign_negative());
        return;
    }
    // Writing into a Vec cannot fail.
    let _ = write!(ByteWriter(buf), "{}", value);
}

/// Append an `f64` using its shortest round-trip fixed-point form
#[inline]
pub fn append_f64(buf: &mut Vec<u8>, value: f64) {
    if !value.is_finite() {
        append_non_finite(buf, value.is_nan(), value.is_sign_negative());
        return;
    }
    let _ = write!(ByteWriter(buf), "{}", value);
}

/// Append `"(re+imi)"` for a complex value with `f32` parts
pub fn append_complex32(buf: &mut Vec<u8>, value: Complex32) {
    buf.extend_from_slice(b"\"(");
    append_f32(buf, value.re);
    buf.push(b'+');
    append_f32(buf, value.im);
    buf.extend_from_slice(b"i)\"");
}

/// Append `"(re+imi)"` for a complex value with `f64` parts
pub fn append_complex64(buf: &mut Vec<u8>, value: Complex64) {
    buf.extend_from_slice(b"\"(");
    append_f64(buf, value.re);
    buf.push(b'+');
    append_f64(buf, value.im);
    buf.extend_from_slice(b"i)\"");
}

fn append_non_finite(buf: &mut Vec<u8>, nan: bool, negative: bool) {
    let text: &[u8] = match (nan, negative) {
        (true, _) => b"NaN",
        (false, false) => b"+Inf",
        (false, true) => b"-Inf",
    };
    buf.extend_from_slice(text);
}

/// Minimal `fmt::Write` over a byte vector
pub(crate) struct ByteWriter<'a>(pub(crate) &'a mut Vec<u8>);

impl Write for ByteWriter<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_integers() {
        assert_eq!(render(|b| append_u64(b, 0)), "0");
        assert_eq!(render(|b| append_u64(b, 128)), "128");
        assert_eq!(render(|b| append_u64(b, u64::MAX)), "18446744073709551615");
        assert_eq!(render(|b| append_i64(b, -1)), "-1");
        assert_eq!(render(|b| append_i64(b, i64::MIN)), "-9223372036854775808");
        assert_eq!(render(|b| append_i64(b, i64::MAX)), "9223372036854775807");
    }

    #[test]
    fn test_floats_shortest_fixed() {
        assert_eq!(render(|b| append_f32(b, 1.23)), "1.23");
        assert_eq!(render(|b| append_f64(b, 4.56)), "4.56");
        assert_eq!(render(|b| append_f64(b, 1.0)), "1");
        assert_eq!(render(|b| append_f64(b, -0.5)), "-0.5");
        assert_eq!(render(|b| append_f64(b, 1e21)), "1000000000000000000000");
        assert_eq!(render(|b| append_f64(b, 1e-7)), "0.0000001");
        assert_eq!(render(|b| append_f32(b, 0.1)), "0.1");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(render(|b| append_f64(b, f64::NAN)), "NaN");
        assert_eq!(render(|b| append_f64(b, f64::INFINITY)), "+Inf");
        assert_eq!(render(|b| append_f32(b, f32::NEG_INFINITY)), "-Inf");
    }

    #[test]
    fn test_complex() {
        assert_eq!(
            render(|b| append_complex32(b, Complex::new(1.0, 2.0))),
            "\"(1+2i)\""
        );
        assert_eq!(
            render(|b| append_complex64(b, Complex::new(3.5, -4.0))),
            "\"(3.5+-4i)\""
        );
    }

    #[test]
    fn test_float_text_round_trips() {
        for v in [0.1f64, 1.0 / 3.0, 123456.789, 5e-324, f64::MAX] {
            let text = render(|b| append_f64(b, v));
            assert_eq!(text.parse::<f64>().unwrap().to_bits(), v.to_bits());
        }
    }
}
