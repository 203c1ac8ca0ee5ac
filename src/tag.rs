//! Binary record type codes and field value tags

/// One-byte code identifying a field's value kind in a binary record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    /// UTF-8 string, `u16` length prefix
    String = 1,
    /// Machine-width signed integer, always 8 bytes
    Int = 2,
    /// `i8`
    Int8 = 3,
    /// `i16`
    Int16 = 4,
    /// `i32`
    Int32 = 5,
    /// `i64`
    Int64 = 6,
    /// Machine-width unsigned integer, always 8 bytes
    Uint = 7,
    /// `u8`
    Uint8 = 8,
    /// `u16`
    Uint16 = 9,
    /// `u32`
    Uint32 = 10,
    /// `u64`
    Uint64 = 11,
    /// IEEE-754 single precision
    Float32 = 12,
    /// IEEE-754 double precision
    Float64 = 13,
    /// Single byte, 1 or 0
    Bool = 14,
    /// Error message, `u16` length prefix
    Err = 15,
    /// Two `f32` components, real then imaginary
    Complex64 = 16,
    /// Two `f64` components, real then imaginary
    Complex128 = 17,
    /// Pointer-sized unsigned integer, always 8 bytes
    Uintptr = 18,
    /// Opaque bytes, `u16` length prefix
    Bytes = 19,
}

impl Tag {
    /// Every tag in wire-code order
    pub const ALL: [Tag; 19] = [
        Tag::String,
        Tag::Int,
        Tag::Int8,
        Tag::Int16,
        Tag::Int32,
        Tag::Int64,
        Tag::Uint,
        Tag::Uint8,
        Tag::Uint16,
        Tag::Uint32,
        Tag::Uint64,
        Tag::Float32,
        Tag::Float64,
        Tag::Bool,
        Tag::Err,
        Tag::Complex64,
        Tag::Complex128,
        Tag::Uintptr,
        Tag::Bytes,
    ];

    /// Wire code of this tag
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a tag by wire code
    #[inline]
    pub const fn from_u8(code: u8) -> Option<Tag> {
        if code == 0 || code as usize > Self::ALL.len() {
            return None;
        }
        Some(Self::ALL[code as usize - 1])
    }

    /// Width in bytes of a fixed-width value, or `None` for length-prefixed kinds
    #[inline]
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Tag::String | Tag::Err | Tag::Bytes => None,
            Tag::Int8 | Tag::Uint8 | Tag::Bool => Some(1),
            Tag::Int16 | Tag::Uint16 => Some(2),
            Tag::Int32 | Tag::Uint32 | Tag::Float32 => Some(4),
            Tag::Int | Tag::Int64 | Tag::Uint | Tag::Uint64 | Tag::Uintptr => Some(8),
            Tag::Float64 | Tag::Complex64 => Some(8),
            Tag::Complex128 => Some(16),
        }
    }
}

/// Record type code stored in the first two bytes of a binary record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum RecordType {
    /// Informational record, the only severity emitted
    Info = 1,
}

impl RecordType {
    /// Wire code of this record type
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }
}
