//! Rendering error messages through a caller-supplied catalog.
//!
//! Every error in this crate has a catalog key and named parameters. Its
//! [`Display`] output is the English fallback. To localize, implement
//! [`Translate`] (or pass a closure) and call [`Localize::localize`].
//!
//! ```
//! use unpacker::message::Localize;
//!
//! let zh = |key: &str, params: &[(&str, String)]| match key {
//!     "invalidFormatChar" => Some(format!("无效的格式字符 {}", params[0].1)),
//!     _ => None,
//! };
//!
//! let err = unpacker::calc("1z").unwrap_err();
//! assert_eq!(err.localize(&zh), "无效的格式字符 z");
//! ```

use alloc::{string::String, vec::Vec};
use core::fmt::Display;

/// A message catalog.
pub trait Translate {
    /// Look up the message for `key`, filling in `params`.
    ///
    /// Returns `None` if the catalog has no entry for `key`.
    fn translate(&self, key: &str, params: &[(&str, String)]) -> Option<String>;
}

impl<F> Translate for F
where
    F: Fn(&str, &[(&str, String)]) -> Option<String>,
{
    fn translate(&self, key: &str, params: &[(&str, String)]) -> Option<String> {
        self(key, params)
    }
}

/// The empty catalog, falling back to English for every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn translate(&self, _: &str, _: &[(&str, String)]) -> Option<String> {
        None
    }
}

/// An error that can be rendered through a [`Translate`] catalog.
pub trait Localize: Display {
    /// Catalog key identifying the kind of message.
    fn key(&self) -> &'static str;

    /// Named parameters of the message.
    fn params(&self) -> Vec<(&'static str, String)>;

    /// Render through a catalog, falling back to [`Display`].
    fn localize<T: Translate + ?Sized>(&self, catalog: &T) -> String {
        catalog
            .translate(self.key(), &self.params())
            .unwrap_or_else(|| alloc::format!("{self}"))
    }
}
