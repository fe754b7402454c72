//! Slice-based byte source.

use alloc::borrow::Cow;

/// Read up to `n` bytes from an offset in a buffer.
///
/// Borrowed buffers are sliced without copying. Returns fewer than `n` bytes
/// near the end of the buffer, and none past it.
pub(super) fn read_at<'a>(r: &Cow<'a, [u8]>, offset: u64, n: usize) -> Cow<'a, [u8]> {
    let s = usize::try_from(offset).map_or(r.len(), |s| s.min(r.len()));
    let e = s.saturating_add(n).min(r.len());

    match *r {
        Cow::Borrowed(r) => Cow::Borrowed(&r[s..e]),
        Cow::Owned(ref r) => Cow::Owned(r[s..e].to_vec()),
    }
}
