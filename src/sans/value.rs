//! Decoded values.

use alloc::string::String;
use core::fmt;

/// A single value decoded from a format string.
///
/// The kind of each value is determined by the type code of the token it came
/// from, so callers can match values against the format string they supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// From `b`, `h`, `i`, `l`, `q`.
    Int(i64),
    /// From `B`, `H`, `I`, `L`, `Q`.
    UInt(u64),
    /// From `f`, `d`.
    Float(f64),
    /// From `s`, decoded as UTF-8 with invalid sequences replaced.
    Str(String),
    /// From `c`, one byte taken as a code point.
    Char(char),
}

impl Value {
    /// A signed integer, or `None` for any other kind of value.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(x) => Some(x),
            _ => None,
        }
    }

    /// An unsigned integer, or `None` for any other kind of value.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::UInt(x) => Some(x),
            _ => None,
        }
    }

    /// A float, or `None` for any other kind of value.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Float(x) => Some(x),
            _ => None,
        }
    }

    /// A string, or `None` for any other kind of value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// A character, or `None` for any other kind of value.
    pub fn as_char(&self) -> Option<char> {
        match *self {
            Self::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => write!(f, "{x}"),
            Self::UInt(x) => write!(f, "{x}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(x: $t) -> Self {
                    Self::$variant(x.into())
                }
            }
        )*
    };
}

value_from!(
    i8 => Int, i16 => Int, i32 => Int, i64 => Int,
    u8 => UInt, u16 => UInt, u32 => UInt, u64 => UInt,
    f32 => Float, f64 => Float,
    String => Str, char => Char,
);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.into())
    }
}
