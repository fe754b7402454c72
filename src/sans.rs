//! The format language, without I/O.
//!
//! A format string is scanned into [`Token`]s by [`Tokens`], collected into a
//! [`Format`], and then either sized with [`Format::size`] or interpreted
//! against a byte slice with [`Format::unpack`]. The free functions [`calc`]
//! and [`unpack`] do all of this in one call.
//!
//! # Grammar
//!
//! ```text
//! format   := [endian] token*
//! endian   := '<' | '>'          ; only valid as the first character
//! token    := count? typecode
//! count    := digit+             ; 1 if absent, 0 is rejected
//! typecode := 'x' 's' 'c' 'b' 'B' 'h' 'H' 'i' 'I' 'l' 'L' 'q' 'Q' 'f' 'd'
//! ```
//!
//! ASCII whitespace between tokens is ignored.
//!
//! # Values
//!
//! Every token yields `count` values in order, except `s` (one string of
//! `count` bytes) and `x` (nothing). See [`Code`] for the width and value kind
//! of each type code.

use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use thiserror::Error;

use crate::message::Localize;

pub mod code;
pub mod scalar;
pub mod token;
pub mod unpack;
pub mod value;

pub use code::{Class, Code, width_of};
pub use token::{Endian, Format, Token, Tokens};
pub use unpack::{calc, unpack};
pub use value::Value;

/// Errors in a format string, or while interpreting one against a slice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A type code is not in the type-width table.
    #[error("Unknown format character `{0}`.")]
    UnknownFormatCharacter(char),
    /// A token has an explicit repeat count of zero.
    #[error("Repeat count of zero for format character `{0}`.")]
    ZeroRepeatCount(char),
    /// An endianness marker appears after the first character.
    #[error("Endianness marker at offset {offset} (only allowed first).")]
    MisplacedEndianMarker { offset: usize },
    /// A character that is neither a digit, a letter, nor whitespace.
    #[error("Unexpected character `{character}` at offset {offset}.")]
    UnexpectedCharacter { character: char, offset: usize },
    /// The format string ends with a repeat count and no type code.
    #[error("Repeat count without a format character.")]
    DanglingRepeatCount,
    /// A repeat count, or the total size, does not fit in `usize`.
    #[error("Repeat count too large.")]
    RepeatCountOverflow,
    /// Unexpectedly reached the end of the slice.
    #[error("Unexpectedly reached the end of the slice ({needed} bytes needed at offset {offset}, {available} available).")]
    EndOfSlice {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

impl Localize for Error {
    fn key(&self) -> &'static str {
        match self {
            Self::UnknownFormatCharacter(_) => "invalidFormatChar",
            Self::ZeroRepeatCount(_) => "zeroRepeatCount",
            Self::MisplacedEndianMarker { .. } => "misplacedEndian",
            Self::UnexpectedCharacter { .. } => "unexpectedChar",
            Self::DanglingRepeatCount => "danglingRepeatCount",
            Self::RepeatCountOverflow => "repeatCountOverflow",
            Self::EndOfSlice { .. } => "endOfSlice",
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        match *self {
            Self::UnknownFormatCharacter(c) | Self::ZeroRepeatCount(c) => vec![("v", c.to_string())],
            Self::MisplacedEndianMarker { offset } => vec![("offset", offset.to_string())],
            Self::UnexpectedCharacter { character, offset } => vec![
                ("v", character.to_string()),
                ("offset", offset.to_string()),
            ],
            Self::DanglingRepeatCount | Self::RepeatCountOverflow => vec![],
            Self::EndOfSlice {
                offset,
                needed,
                available,
            } => vec![
                ("offset", offset.to_string()),
                ("needed", needed.to_string()),
                ("available", available.to_string()),
            ],
        }
    }
}
