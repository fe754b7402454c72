#![no_std]

//! Decode fixed-layout binary records using struct-style format strings.
//!
//! A format string is an optional endianness marker (`<` little, `>` big)
//! followed by tokens of an optional repeat count and a type code, such as
//! `"<2HIq5s"`. The [`sans`] module interprets format strings against byte
//! slices without performing any I/O. The [`avec`] module provides a
//! [`Cursor`](avec::Cursor) that sequences decodes over an in-memory buffer or
//! a file.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable file-backed cursors (default).

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod avec;
pub mod message;
pub mod sans;

pub use avec::Cursor;
pub use sans::{Endian, Format, Value, calc, unpack};
