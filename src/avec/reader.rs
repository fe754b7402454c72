//! File-based byte source.
//!
//! _Requires Cargo feature `std`._

use std::{
    fs::File,
    io::{self, ErrorKind},
    path::PathBuf,
    vec,
    vec::Vec,
};

/// An open file, owned if the cursor opened it.
#[derive(Debug)]
pub(super) enum Handle<'a> {
    Owned(File),
    Borrowed(&'a File),
}

impl Handle<'_> {
    pub(super) fn file(&self) -> &File {
        match self {
            Self::Owned(file) => file,
            Self::Borrowed(file) => *file,
        }
    }
}

/// A file and, if the cursor opened it, its path.
#[derive(Debug)]
pub(super) struct FileSource<'a> {
    pub(super) handle: Handle<'a>,
    pub(super) path: Option<PathBuf>,
}

/// Read up to `n` bytes from an offset in a file into a fresh buffer.
///
/// Returns fewer than `n` bytes near the end of the file, and none past it.
/// The file's own offset is left where it was. Callers bound `n` by the
/// length of the file.
pub(super) fn read_at(file: &File, offset: u64, n: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0; n];
    let mut filled = 0;

    while filled < n {
        match read_some_at(file, &mut buf[filled..], offset.saturating_add(filled as u64)) {
            Ok(0) => break,
            Ok(k) => filled += k,
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }

    buf.truncate(filled);
    Ok(buf)
}

#[cfg(unix)]
fn read_some_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::unix::fs::FileExt::read_at(file, buf, offset)
}

// Without positional reads, seek and put the offset back afterwards.
#[cfg(not(unix))]
fn read_some_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::io::{Read, Seek, SeekFrom};

    let mut file = file;
    let saved = file.stream_position()?;

    file.seek(SeekFrom::Start(offset))?;
    let read = file.read(buf);
    file.seek(SeekFrom::Start(saved))?;

    read
}
