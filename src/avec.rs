//! A cursor sequencing decodes over an in-memory buffer or a file.
//!
//! Both kinds of source behave identically from the caller's perspective.
//! Buffers are sliced in place, and files are read on demand with blocking
//! reads at the cursor's position. Cursors are not synchronized; every
//! decode, slice, and search moves the position.
//!
//! ```
//! use unpacker::{Cursor, Value};
//!
//! let data = [5, 0, 0, 0, b'h', b'e', b'l', b'l', b'o', 0xFF];
//! let mut cursor = Cursor::new(&data[..]);
//!
//! assert_eq!(cursor.decode_string()?, "hello");
//! assert_eq!(cursor.decode("b")?, [Value::Int(-1)]);
//! assert!(cursor.is_end());
//! # Ok::<(), unpacker::avec::Error>(())
//! ```

use alloc::{
    borrow::Cow,
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};

use log::trace;
use thiserror::Error;

use crate::{
    message::Localize,
    sans::{self, Class, Format, Token, Value},
};

#[cfg(feature = "std")]
mod reader;
mod slice;

#[cfg(feature = "std")]
use std::{fs::File, path::Path};

#[cfg(feature = "std")]
use log::debug;

#[cfg(feature = "std")]
use reader::{FileSource, Handle};

/// Default number of bytes [`Cursor::find`] scans per read.
pub const FIND_WINDOW: usize = 1024 * 1024;

#[cfg(feature = "std")]
type IoError = std::io::Error;
#[cfg(not(feature = "std"))]
type IoError = core::convert::Infallible;

/// Errors occurring while using a cursor.
#[derive(Debug, Error)]
pub enum Error {
    /// An error in the format string.
    #[error(transparent)]
    Format(#[from] sans::Error),
    /// A position, offset, or size is out of range for the operation.
    #[error("Invalid argument ({0}).")]
    InvalidArgument(String),
    /// The source is not a byte block, a file, or a path to a file.
    #[error("Invalid source ({0}), expected a byte block, a file, or a path to a file.")]
    InvalidConstructorArgument(String),
    /// Unexpectedly reached the end of the source.
    #[error("Unexpectedly reached the end of the source ({needed} bytes needed at offset {offset}, {available} available).")]
    EndOfSource {
        offset: u64,
        needed: usize,
        available: u64,
    },
    /// An error opening or reading a file.
    #[error(transparent)]
    Io(#[from] IoError),
}

impl Localize for Error {
    fn key(&self) -> &'static str {
        match self {
            Self::Format(err) => err.key(),
            Self::InvalidArgument(_) => "invalidParam",
            Self::InvalidConstructorArgument(_) => "invalidSource",
            Self::EndOfSource { .. } => "endOfSource",
            Self::Io(_) => "io",
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Format(err) => err.params(),
            Self::InvalidArgument(v) | Self::InvalidConstructorArgument(v) => {
                vec![("v", v.clone())]
            }
            Self::EndOfSource {
                offset,
                needed,
                available,
            } => vec![
                ("offset", offset.to_string()),
                ("needed", needed.to_string()),
                ("available", available.to_string()),
            ],
            Self::Io(err) => vec![("v", err.to_string())],
        }
    }
}

/// Where a cursor's bytes come from.
#[derive(Debug)]
enum Target<'a> {
    Slice(Cow<'a, [u8]>),
    #[cfg(feature = "std")]
    Reader(FileSource<'a>),
}

impl<'a> Target<'a> {
    /// Read up to `n` bytes at an offset. The only way bytes leave a target.
    fn read_at(&self, offset: u64, n: usize) -> Result<Cow<'a, [u8]>, Error> {
        Ok(match self {
            Self::Slice(r) => slice::read_at(r, offset, n),
            #[cfg(feature = "std")]
            Self::Reader(r) => Cow::Owned(reader::read_at(r.handle.file(), offset, n)?),
        })
    }
}

/// A read position over a fixed byte source.
///
/// The length of the source is fixed at construction. The position is never
/// clamped to it; reads beyond the end fail without moving the position.
#[derive(Debug)]
pub struct Cursor<'a> {
    target: Target<'a>,
    position: u64,
    length: u64,
    window: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor over a buffer.
    ///
    /// Slices taken from a borrowed buffer alias it.
    pub fn new(bytes: impl Into<Cow<'a, [u8]>>) -> Self {
        let bytes = bytes.into();
        let length = bytes.len() as u64;

        Self {
            target: Target::Slice(bytes),
            position: 0,
            length,
            window: FIND_WINDOW,
        }
    }

    /// Create a cursor over an already open file.
    ///
    /// The file is not closed when the cursor is dropped. Reads leave the
    /// file's own offset where it was.
    ///
    /// _Requires Cargo feature `std`._
    #[cfg(feature = "std")]
    pub fn from_file(file: &'a File) -> Result<Self, Error> {
        let length = file.metadata()?.len();
        debug!("Reading {length} bytes from an open file");

        Ok(Self::from_source(
            FileSource {
                handle: Handle::Borrowed(file),
                path: None,
            },
            length,
        ))
    }

    /// Open a file and create a cursor over it.
    ///
    /// The file is closed when the cursor is dropped.
    ///
    /// _Requires Cargo feature `std`._
    #[cfg(feature = "std")]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            Err(Error::InvalidConstructorArgument("empty path".into()))?;
        }

        let file = File::open(path)?;
        let metadata = file.metadata()?;

        if !metadata.is_file() {
            Err(Error::InvalidConstructorArgument(format!(
                "{} is not a file",
                path.display()
            )))?;
        }

        debug!("Opened {} ({} bytes)", path.display(), metadata.len());

        Ok(Self::from_source(
            FileSource {
                handle: Handle::Owned(file),
                path: Some(path.to_path_buf()),
            },
            metadata.len(),
        ))
    }

    #[cfg(feature = "std")]
    fn from_source(source: FileSource<'a>, length: u64) -> Self {
        Self {
            target: Target::Reader(source),
            position: 0,
            length,
            window: FIND_WINDOW,
        }
    }

    /// Set the number of bytes [`Cursor::find`] scans per read.
    pub fn with_find_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    /// Length of the source in bytes.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Path of the file, if this cursor opened one.
    ///
    /// _Requires Cargo feature `std`._
    #[cfg(feature = "std")]
    pub fn path(&self) -> Option<&Path> {
        match &self.target {
            Target::Reader(r) => r.path.as_deref(),
            Target::Slice(_) => None,
        }
    }

    /// The buffer, if this cursor reads from memory.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.target {
            Target::Slice(r) => Some(&**r),
            #[cfg(feature = "std")]
            Target::Reader(_) => None,
        }
    }

    /// The file, if this cursor reads from one.
    ///
    /// _Requires Cargo feature `std`._
    #[cfg(feature = "std")]
    pub fn file(&self) -> Option<&File> {
        match &self.target {
            Target::Reader(r) => Some(r.handle.file()),
            Target::Slice(_) => None,
        }
    }

    /// Whether bytes are read on demand from a file.
    pub fn is_file_backed(&self) -> bool {
        match self.target {
            Target::Slice(_) => false,
            #[cfg(feature = "std")]
            Target::Reader(_) => true,
        }
    }

    /// The current position.
    pub fn tell(&self) -> u64 {
        self.position
    }

    /// Set the position, returning it.
    pub fn seek(&mut self, position: u64) -> u64 {
        self.position = position;
        self.position
    }

    /// Move the position by an offset, which may be negative, returning the
    /// new position.
    pub fn skip(&mut self, offset: i64) -> Result<u64, Error> {
        self.position = self.position.checked_add_signed(offset).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "offset {offset} from position {}",
                self.position
            ))
        })?;

        Ok(self.position)
    }

    /// Whether the position is at or beyond the end of the source.
    pub fn is_end(&self) -> bool {
        self.position >= self.length
    }

    /// Decode values described by a format string, advancing past them.
    pub fn decode(&mut self, format: &str) -> Result<Vec<Value>, Error> {
        self.decode_format(&Format::parse(format)?)
    }

    /// Decode values described by a parsed format, advancing past them.
    pub fn decode_format(&mut self, format: &Format) -> Result<Vec<Value>, Error> {
        let size = format.size()?;
        let bytes = self.read_exact_at(self.position, size)?;

        let (values, consumed) = format.unpack(&bytes, 0)?;
        debug_assert_eq!(consumed, size);

        trace!("Decoded {} values at {}", values.len(), self.position);
        self.position += consumed as u64;

        Ok(values)
    }

    /// Take raw bytes from the position, advancing past them.
    ///
    /// Bytes of a borrowed buffer are not copied.
    pub fn slice(&mut self, size: usize) -> Result<Cow<'a, [u8]>, Error> {
        let end = self.position.checked_add(size as u64).ok_or_else(|| {
            Error::InvalidArgument(format!("size {size} from position {}", self.position))
        })?;

        let bytes = self.read_exact_at(self.position, size)?;

        trace!("Sliced {size} bytes at {}", self.position);
        self.position = end;

        Ok(bytes)
    }

    /// Take raw bytes from the position as a new, independent cursor,
    /// advancing past them.
    pub fn sub(&mut self, size: usize) -> Result<Cursor<'a>, Error> {
        Ok(Cursor::new(self.slice(size)?).with_find_window(self.window))
    }

    /// Find the first occurrence of a pattern at or after the position.
    ///
    /// On success, moves to and returns the offset of the match. Otherwise
    /// returns `None` and leaves the position unchanged.
    pub fn find(&mut self, pattern: &[u8]) -> Result<Option<u64>, Error> {
        if pattern.is_empty() {
            return Ok((self.position <= self.length).then_some(self.position));
        }

        // Consecutive windows overlap so matches across a boundary are found.
        let overlap = pattern.len() - 1;
        let mut i = self.position;

        while i < self.length {
            let left = usize::try_from(self.length - i).unwrap_or(usize::MAX);
            let n = self.window.saturating_add(overlap).min(left);

            let window = self.target.read_at(i, n)?;
            trace!("Searching {} bytes at {i}", window.len());

            if let Some(j) = window.windows(pattern.len()).position(|w| w == pattern) {
                self.position = i + j as u64;
                return Ok(Some(self.position));
            }

            i = i.saturating_add(self.window as u64);
        }

        Ok(None)
    }

    /// Find the first occurrence of a pattern from the start of the source.
    ///
    /// The position is left at the start if the pattern is not found.
    pub fn find_from_start(&mut self, pattern: &[u8]) -> Result<Option<u64>, Error> {
        self.seek(0);
        self.find(pattern)
    }

    /// Decode a string preceded by its length as a `u32` (format `L`).
    pub fn decode_string(&mut self) -> Result<String, Error> {
        self.decode_length_prefixed_string("L")
    }

    /// Decode a string preceded by its length, advancing past both.
    ///
    /// The length format must be a single unsigned integer field. Invalid
    /// UTF-8 is replaced. On error the position is left unchanged.
    pub fn decode_length_prefixed_string(&mut self, length_format: &str) -> Result<String, Error> {
        let format = Format::parse(length_format)?;

        let [Token { code, count: 1 }] = format.tokens() else {
            Err(Error::InvalidArgument(format!("length format `{length_format}`")))?
        };

        if code.class() != Class::Unsigned {
            Err(Error::InvalidArgument(format!("length format `{length_format}`")))?;
        }

        let start = self.position;

        let string = self.decode_format(&format).and_then(|values| {
            let length = values.first().and_then(Value::as_u64).unwrap_or_default();
            let length = usize::try_from(length)
                .map_err(|_| Error::InvalidArgument(format!("string length {length}")))?;

            self.slice(length)
        });

        match string {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(err) => {
                self.position = start;
                Err(err)
            }
        }
    }

    /// Read exactly `n` bytes at an offset, without moving the position.
    fn read_exact_at(&self, offset: u64, n: usize) -> Result<Cow<'a, [u8]>, Error> {
        let available = self.length.saturating_sub(offset);

        if (n as u64) > available {
            Err(Error::EndOfSource {
                offset,
                needed: n,
                available,
            })?;
        }

        let bytes = self.target.read_at(offset, n)?;

        // A file may shrink after its length was taken.
        if bytes.len() < n {
            Err(Error::EndOfSource {
                offset,
                needed: n,
                available: bytes.len() as u64,
            })?;
        }

        Ok(bytes)
    }
}

impl<'a> From<&'a [u8]> for Cursor<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<Vec<u8>> for Cursor<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}
