//! The type-width table.

/// A type code of the format language.
///
/// | Code | Width | Value                          |
/// |------|-------|--------------------------------|
/// | `x`  | 1     | padding, no value              |
/// | `s`  | 1     | one string of `count` bytes    |
/// | `c`  | 1     | [`Value::Char`]                |
/// | `b`  | 1     | [`Value::Int`] from `i8`       |
/// | `B`  | 1     | [`Value::UInt`] from `u8`      |
/// | `h`  | 2     | [`Value::Int`] from `i16`      |
/// | `H`  | 2     | [`Value::UInt`] from `u16`     |
/// | `i`  | 4     | [`Value::Int`] from `i32`      |
/// | `I`  | 4     | [`Value::UInt`] from `u32`     |
/// | `l`  | 4     | [`Value::Int`] from `i32`      |
/// | `L`  | 4     | [`Value::UInt`] from `u32`     |
/// | `q`  | 8     | [`Value::Int`] from `i64`      |
/// | `Q`  | 8     | [`Value::UInt`] from `u64`     |
/// | `f`  | 4     | [`Value::Float`] from `f32`    |
/// | `d`  | 8     | [`Value::Float`] from `f64`    |
///
/// [`Value::Char`]: super::Value::Char
/// [`Value::Int`]: super::Value::Int
/// [`Value::UInt`]: super::Value::UInt
/// [`Value::Float`]: super::Value::Float
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    /// `x`, a padding byte.
    Pad,
    /// `s`, a byte of a string.
    Str,
    /// `c`, a single byte character.
    Char,
    /// `b`, a signed byte.
    I8,
    /// `B`, an unsigned byte.
    U8,
    /// `h`, a signed 16-bit short.
    I16,
    /// `H`, an unsigned 16-bit short.
    U16,
    /// `i`, a signed 32-bit int.
    I32,
    /// `I`, an unsigned 32-bit int.
    U32,
    /// `l`, a signed 32-bit long.
    Long,
    /// `L`, an unsigned 32-bit long.
    ULong,
    /// `q`, a signed 64-bit long long.
    I64,
    /// `Q`, an unsigned 64-bit long long.
    U64,
    /// `f`, a 32-bit float.
    F32,
    /// `d`, a 64-bit double.
    F64,
}

impl Code {
    /// Look up a type code, returning `None` if it is not in the table.
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'x' => Self::Pad,
            's' => Self::Str,
            'c' => Self::Char,
            'b' => Self::I8,
            'B' => Self::U8,
            'h' => Self::I16,
            'H' => Self::U16,
            'i' => Self::I32,
            'I' => Self::U32,
            'l' => Self::Long,
            'L' => Self::ULong,
            'q' => Self::I64,
            'Q' => Self::U64,
            'f' => Self::F32,
            'd' => Self::F64,
            _ => return None,
        })
    }

    /// The character this code is written as.
    pub fn as_char(self) -> char {
        match self {
            Self::Pad => 'x',
            Self::Str => 's',
            Self::Char => 'c',
            Self::I8 => 'b',
            Self::U8 => 'B',
            Self::I16 => 'h',
            Self::U16 => 'H',
            Self::I32 => 'i',
            Self::U32 => 'I',
            Self::Long => 'l',
            Self::ULong => 'L',
            Self::I64 => 'q',
            Self::U64 => 'Q',
            Self::F32 => 'f',
            Self::F64 => 'd',
        }
    }

    /// Bytes consumed by a single repetition of this code.
    pub fn width(self) -> usize {
        match self {
            Self::Pad | Self::Str | Self::Char | Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::Long | Self::ULong | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    /// What kind of value this code decodes to.
    pub fn class(self) -> Class {
        match self {
            Self::Pad => Class::Pad,
            Self::Str => Class::Str,
            Self::Char => Class::Char,
            Self::I8 | Self::I16 | Self::I32 | Self::Long | Self::I64 => Class::Signed,
            Self::U8 | Self::U16 | Self::U32 | Self::ULong | Self::U64 => Class::Unsigned,
            Self::F32 | Self::F64 => Class::Float,
        }
    }
}

/// Value kind of a type code. Lowercase integer codes are signed, uppercase
/// are unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// No value.
    Pad,
    /// One [`Value::Str`](super::Value::Str) per token.
    Str,
    /// One [`Value::Char`](super::Value::Char) per byte.
    Char,
    /// One [`Value::Int`](super::Value::Int) per repetition.
    Signed,
    /// One [`Value::UInt`](super::Value::UInt) per repetition.
    Unsigned,
    /// One [`Value::Float`](super::Value::Float) per repetition.
    Float,
}

/// Byte width of a type code, or `None` if the code is not in the table.
pub fn width_of(c: char) -> Option<usize> {
    Code::from_char(c).map(Code::width)
}
