//! Scanning format strings into tokens.

use alloc::vec::Vec;
use core::{
    iter::Peekable,
    str::{CharIndices, FromStr},
};

use either::Either::{self, Left, Right};

use super::{Error, code::Code};

/// Byte order of multi-byte fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Selected by a leading `<`, or by the absence of a marker.
    #[default]
    Little,
    /// Selected by a leading `>`.
    Big,
}

/// A repeat count and type code, such as `4H`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub code: Code,
    /// Never zero.
    pub count: usize,
}

impl Token {
    /// Bytes consumed by this token.
    pub fn size(&self) -> Result<usize, Error> {
        self.code
            .width()
            .checked_mul(self.count)
            .ok_or(Error::RepeatCountOverflow)
    }
}

/// Scanner over the items of a format string.
///
/// Yields the endianness marker (only ever as the first item) on the left and
/// tokens on the right. Scanning stops after the first error.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    chars: Peekable<CharIndices<'a>>,
    failed: bool,
}

impl<'a> Tokens<'a> {
    pub fn new(format: &'a str) -> Self {
        Self {
            chars: format.char_indices().peekable(),
            failed: false,
        }
    }

    fn scan(&mut self) -> Option<Result<Either<Endian, Token>, Error>> {
        while self.chars.next_if(|(_, c)| c.is_ascii_whitespace()).is_some() {}

        let (offset, c) = self.chars.next()?;

        let count = match c {
            '<' | '>' if offset == 0 => {
                return Some(Ok(Left(if c == '>' {
                    Endian::Big
                } else {
                    Endian::Little
                })));
            }
            '0'..='9' => {
                let mut count = c as usize - '0' as usize;

                while let Some((_, d)) = self.chars.next_if(|(_, d)| d.is_ascii_digit()) {
                    count = match count
                        .checked_mul(10)
                        .and_then(|n| n.checked_add(d as usize - '0' as usize))
                    {
                        Some(count) => count,
                        None => return Some(Err(Error::RepeatCountOverflow)),
                    };
                }

                count
            }
            c if c.is_ascii_alphabetic() => {
                return Some(code(c).map(|code| Right(Token { code, count: 1 })));
            }
            c => return Some(Err(unexpected(c, offset))),
        };

        let Some((offset, c)) = self.chars.next() else {
            return Some(Err(Error::DanglingRepeatCount));
        };

        if !c.is_ascii_alphabetic() {
            return Some(Err(unexpected(c, offset)));
        }

        Some(code(c).and_then(|code| match count {
            0 => Err(Error::ZeroRepeatCount(c)),
            count => Ok(Right(Token { code, count })),
        }))
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<Either<Endian, Token>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let item = self.scan()?;
        self.failed = item.is_err();

        Some(item)
    }
}

fn code(c: char) -> Result<Code, Error> {
    Code::from_char(c).ok_or(Error::UnknownFormatCharacter(c))
}

fn unexpected(character: char, offset: usize) -> Error {
    match character {
        '<' | '>' => Error::MisplacedEndianMarker { offset },
        _ => Error::UnexpectedCharacter { character, offset },
    }
}

/// A parsed format string.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Format {
    endian: Endian,
    tokens: Vec<Token>,
}

impl Format {
    /// Parse a format string, rejecting anything outside the grammar.
    pub fn parse(format: &str) -> Result<Self, Error> {
        let mut parsed = Self::default();

        for item in Tokens::new(format) {
            match item? {
                Left(endian) => parsed.endian = endian,
                Right(token) => parsed.tokens.push(token),
            }
        }

        Ok(parsed)
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
