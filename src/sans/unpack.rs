//! Sizing and decoding of parsed formats.

use alloc::{string::String, vec::Vec};

use super::{Class, Error, Format, Value, scalar};

impl Format {
    /// Total bytes consumed by this format.
    pub fn size(&self) -> Result<usize, Error> {
        self.tokens().iter().try_fold(0usize, |acc, token| {
            acc.checked_add(token.size()?)
                .ok_or(Error::RepeatCountOverflow)
        })
    }

    /// Decode values from a slice, beginning at `start`.
    ///
    /// Returns the values in token order, and the number of bytes consumed.
    /// The byte count always equals [`Format::size`].
    pub fn unpack(&self, r: &[u8], start: usize) -> Result<(Vec<Value>, usize), Error> {
        let mut values = Vec::new();
        let mut i = start; // Offset of the next field.

        for token in self.tokens() {
            let size = token.size()?;
            let field = take(r, i, size)?;

            match token.code.class() {
                Class::Pad => {}
                Class::Str => values.push(Value::Str(
                    String::from_utf8_lossy(field).into_owned(),
                )),
                Class::Char => values.extend(field.iter().map(|&b| Value::Char(b.into()))),
                class => {
                    let width = token.code.width();
                    let decode = scalar::decoder(width, class)
                        .ok_or(Error::UnknownFormatCharacter(token.code.as_char()))?;

                    // Chunks are exactly one field wide, so decoding cannot fail.
                    for chunk in field.chunks_exact(width) {
                        values.extend(decode(chunk, self.endian()));
                    }
                }
            }

            i += size;
        }

        Ok((values, i - start))
    }
}

/// Total bytes consumed by a format string, without reading any data.
pub fn calc(format: &str) -> Result<usize, Error> {
    Format::parse(format)?.size()
}

/// Decode values described by a format string from a slice, beginning at
/// `start`.
///
/// Returns the values in token order, and the number of bytes consumed.
pub fn unpack(format: &str, r: &[u8], start: usize) -> Result<(Vec<Value>, usize), Error> {
    Format::parse(format)?.unpack(r, start)
}

/// Take a number of bytes from an offset in a slice.
fn take(r: &[u8], i: usize, n: usize) -> Result<&[u8], Error> {
    i.checked_add(n)
        .and_then(|end| r.get(i..end))
        .ok_or(Error::EndOfSlice {
            offset: i,
            needed: n,
            available: r.len().saturating_sub(i),
        })
}
