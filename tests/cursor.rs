#![cfg(feature = "std")]

use std::{
    borrow::Cow,
    fs::File,
    io::{Read, Seek, SeekFrom},
    path::PathBuf,
};

use unpacker::{Cursor, Value, avec::Error};

const PATH: &str = "fixtures/sample.bin";

/// Walk the sample document, recording every value and position.
fn walk(cursor: &mut Cursor) -> Vec<String> {
    let mut seen = vec![];
    let mut note = |values: Vec<Value>, at: u64| {
        seen.extend(values.iter().map(Value::to_string));
        seen.push(at.to_string());
    };

    note(cursor.decode("4s").unwrap(), cursor.tell());
    let s = cursor.decode_string().unwrap();
    note(vec![Value::Str(s)], cursor.tell());
    note(cursor.decode("Q").unwrap(), cursor.tell());
    note(cursor.decode(">h").unwrap(), cursor.tell());
    note(cursor.decode("f3x").unwrap(), cursor.tell());
    note(cursor.decode("4c").unwrap(), cursor.tell());
    note(cursor.decode("b").unwrap(), cursor.tell());

    seen
}

#[test]
fn walk_slice() {
    let data = std::fs::read(PATH).unwrap();
    let mut cursor = Cursor::new(&data[..]);

    assert_eq!(
        walk(&mut cursor),
        [
            "UNPK",
            "4",
            "hello",
            "13",
            "72623859790382856",
            "21",
            "-2",
            "23",
            "1.5",
            "30",
            "M",
            "A",
            "R",
            "K",
            "34",
            "-1",
            "35"
        ]
    );
    assert!(cursor.is_end());
}

#[test]
fn walk_reader_matches_slice() {
    let data = std::fs::read(PATH).unwrap();
    let mut slice = Cursor::new(data);
    let mut reader = Cursor::open(PATH).unwrap();

    assert_eq!(reader.length(), slice.length());
    assert_eq!(walk(&mut reader), walk(&mut slice));
    assert!(reader.is_end());
}

#[test]
fn backend_accessors() {
    let cursor = Cursor::open(PATH).unwrap();
    assert!(cursor.is_file_backed());
    assert_eq!(cursor.path(), Some(PathBuf::from(PATH).as_path()));
    assert_eq!(cursor.length(), 35);

    let file = File::open(PATH).unwrap();
    let cursor = Cursor::from_file(&file).unwrap();
    assert!(cursor.is_file_backed());
    assert_eq!(cursor.path(), None);
    drop(cursor);

    // A borrowed file stays open.
    assert_eq!(file.metadata().unwrap().len(), 35);

    let cursor = Cursor::new(&b"abc"[..]);
    assert!(!cursor.is_file_backed());
    assert_eq!(cursor.path(), None);
    assert_eq!(cursor.length(), 3);
}

#[test]
fn invalid_sources() {
    assert!(matches!(
        Cursor::open(""),
        Err(Error::InvalidConstructorArgument(_))
    ));
    assert!(matches!(
        Cursor::open("fixtures"),
        Err(Error::InvalidConstructorArgument(_))
    ));
    assert!(matches!(
        Cursor::open("fixtures/missing.bin"),
        Err(Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound
    ));
}

#[test]
fn seek_and_skip() {
    let data = [0u8; 4];
    let mut cursor = Cursor::new(&data[..]);

    for p in [0, 3, 4, 100, u64::MAX] {
        assert_eq!(cursor.seek(p), p);
        assert_eq!(cursor.tell(), p);
    }

    cursor.seek(2);
    assert_eq!(cursor.skip(5).unwrap(), 7);
    assert_eq!(cursor.skip(-6).unwrap(), 1);
    assert_eq!(cursor.tell(), 1);

    assert!(matches!(cursor.skip(-2), Err(Error::InvalidArgument(_))));
    assert_eq!(cursor.tell(), 1);

    cursor.seek(u64::MAX);
    assert!(matches!(cursor.skip(1), Err(Error::InvalidArgument(_))));
}

#[test]
fn is_end() {
    let data = [1u8, 2, 3];
    let mut cursor = Cursor::new(&data[..]);

    assert!(!cursor.is_end());
    cursor.skip(2).unwrap();
    assert!(!cursor.is_end());
    cursor.skip(1).unwrap();
    assert!(cursor.is_end());
    cursor.skip(10).unwrap();
    assert!(cursor.is_end());
    assert_eq!(cursor.tell(), 13);

    assert!(Cursor::new(Vec::new()).is_end());
}

#[test]
fn decode_past_end() {
    let data = [1u8, 2, 3];
    let mut cursor = Cursor::new(&data[..]);
    cursor.seek(1);

    assert!(matches!(
        cursor.decode("I"),
        Err(Error::EndOfSource {
            offset: 1,
            needed: 4,
            available: 2
        })
    ));
    assert_eq!(cursor.tell(), 1);

    assert!(matches!(
        cursor.decode("1z"),
        Err(Error::Format(unpacker::sans::Error::UnknownFormatCharacter('z')))
    ));
    assert_eq!(cursor.tell(), 1);

    let mut cursor = Cursor::open(PATH).unwrap();
    cursor.seek(33);
    assert!(matches!(cursor.decode("H2x"), Err(Error::EndOfSource { .. })));
    assert_eq!(cursor.tell(), 33);
}

#[test]
fn slice_borrows() {
    let data = b"abcdef";
    let mut cursor = Cursor::new(&data[..]);

    let bytes = cursor.slice(3).unwrap();
    assert!(matches!(bytes, Cow::Borrowed(b"abc")));
    assert_eq!(cursor.tell(), 3);

    assert!(matches!(cursor.slice(4), Err(Error::EndOfSource { .. })));
    assert_eq!(cursor.tell(), 3);

    let mut cursor = Cursor::open(PATH).unwrap();
    cursor.seek(30);
    assert_eq!(&*cursor.slice(4).unwrap(), b"MARK");
    assert_eq!(cursor.tell(), 34);
}

#[test]
fn sub_cursor() {
    let mut cursor = Cursor::open(PATH).unwrap();
    cursor.seek(4);

    let mut sub = cursor.sub(9).unwrap();
    assert_eq!(cursor.tell(), 13);

    assert!(!sub.is_file_backed());
    assert_eq!(sub.tell(), 0);
    assert_eq!(sub.length(), 9);
    assert_eq!(sub.decode_string().unwrap(), "hello");
    assert!(sub.is_end());

    // The parent is unaffected.
    assert_eq!(cursor.decode("Q").unwrap(), [Value::UInt(0x0102030405060708)]);
}

#[test]
fn find_in_slice() {
    let mut cursor = Cursor::new(&b"xxFOOxx"[..]);

    assert_eq!(cursor.find(b"FOO").unwrap(), Some(2));
    assert_eq!(cursor.tell(), 2);

    cursor.skip(1).unwrap();
    assert_eq!(cursor.find(b"FOO").unwrap(), None);
    assert_eq!(cursor.tell(), 3);

    assert_eq!(cursor.find_from_start(b"FOO").unwrap(), Some(2));
    assert_eq!(cursor.find(b"FOO").unwrap(), Some(2));
    assert_eq!(cursor.find(b"").unwrap(), Some(2));
}

#[test]
fn find_in_reader() {
    let mut cursor = Cursor::open(PATH).unwrap();

    assert_eq!(cursor.find(b"MARK").unwrap(), Some(30));
    assert_eq!(cursor.decode("4s").unwrap(), [Value::Str("MARK".into())]);

    assert_eq!(cursor.find(b"hello").unwrap(), None);
    assert_eq!(cursor.tell(), 34);

    assert_eq!(cursor.find_from_start(b"hello").unwrap(), Some(8));
    assert_eq!(cursor.tell(), 8);

    cursor.seek(1);
    assert_eq!(cursor.find_from_start(b"nowhere").unwrap(), None);
    assert_eq!(cursor.tell(), 0);
}

#[test]
fn find_across_windows() {
    let data = std::fs::read(PATH).unwrap();

    // Every window boundary falls somewhere inside `MARK` for some size.
    for window in 1..8 {
        let mut slice = Cursor::new(&data[..]).with_find_window(window);
        assert_eq!(slice.find(b"MARK").unwrap(), Some(30), "window {window}");

        let mut reader = Cursor::open(PATH).unwrap().with_find_window(window);
        assert_eq!(reader.find(b"MARK").unwrap(), Some(30), "window {window}");
        assert_eq!(reader.find(b"KRAM").unwrap(), None, "window {window}");
        assert_eq!(reader.tell(), 30);
    }
}

#[test]
fn find_across_default_window() {
    let path = temp_path("window");
    let mut data = vec![0u8; unpacker::avec::FIND_WINDOW + 16];
    let at = unpacker::avec::FIND_WINDOW - 2;
    data[at..at + 6].copy_from_slice(b"NEEDLE");
    std::fs::write(&path, &data).unwrap();

    let mut cursor = Cursor::open(&path).unwrap();
    let found = cursor.find(b"NEEDLE").unwrap();

    cursor.seek(at as u64 + 1);
    let missing = cursor.find(b"NEEDLE").unwrap();

    std::fs::remove_file(&path).unwrap();

    assert_eq!(found, Some(at as u64));
    assert_eq!(missing, None);
}

#[test]
fn find_with_huge_window() {
    for window in [usize::MAX / 2, usize::MAX] {
        let mut cursor = Cursor::open(PATH).unwrap().with_find_window(window);
        assert_eq!(cursor.find(b"MARK").unwrap(), Some(30));
        assert_eq!(cursor.find_from_start(b"KRAM").unwrap(), None);

        let data = std::fs::read(PATH).unwrap();
        let mut cursor = Cursor::new(data).with_find_window(window);
        assert_eq!(cursor.find(b"MARK").unwrap(), Some(30));
    }
}

#[test]
fn borrowed_file_offset() {
    let mut file = File::open(PATH).unwrap();
    file.seek(SeekFrom::Start(4)).unwrap();

    let mut cursor = Cursor::from_file(&file).unwrap();
    cursor.seek(30);
    assert_eq!(cursor.decode("4s").unwrap(), [Value::Str("MARK".into())]);
    assert_eq!(cursor.find_from_start(b"hello").unwrap(), Some(8));
    assert_eq!(&*cursor.slice(5).unwrap(), b"hello");
    drop(cursor);

    // The caller's handle still reads from where it was left.
    assert_eq!(file.stream_position().unwrap(), 4);
    let mut length = [0u8; 4];
    file.read_exact(&mut length).unwrap();
    assert_eq!(length, 5u32.to_le_bytes());
}

#[test]
fn target_accessors() {
    let data = b"abc";
    let cursor = Cursor::new(&data[..]);
    assert_eq!(cursor.bytes(), Some(&b"abc"[..]));
    assert!(cursor.file().is_none());

    let file = File::open(PATH).unwrap();
    let cursor = Cursor::from_file(&file).unwrap();
    assert!(cursor.bytes().is_none());
    assert!(std::ptr::eq(cursor.file().unwrap(), &file));

    let cursor = Cursor::open(PATH).unwrap();
    assert!(cursor.bytes().is_none());
    assert_eq!(cursor.file().unwrap().metadata().unwrap().len(), 35);
}

#[test]
fn length_prefixed_string() {
    let mut data = 5u32.to_le_bytes().to_vec();
    data.extend_from_slice(b"abcde");
    let mut cursor = Cursor::new(&data[..]);

    assert_eq!(cursor.decode_length_prefixed_string("L").unwrap(), "abcde");
    assert_eq!(cursor.tell(), 9);

    let data = [0u8, 3, b'x', b'y', b'z'];
    let mut cursor = Cursor::new(&data[..]);
    assert_eq!(cursor.decode_length_prefixed_string(">H").unwrap(), "xyz");
    assert!(cursor.is_end());
}

#[test]
fn length_prefixed_string_errors() {
    let data = [9u8, 0, 0, 0, b'a'];
    let mut cursor = Cursor::new(&data[..]);

    for format in ["h", "2L", "Lx", "f", "4s", ""] {
        assert!(
            matches!(
                cursor.decode_length_prefixed_string(format),
                Err(Error::InvalidArgument(_))
            ),
            "format {format:?}"
        );
    }

    assert!(matches!(
        cursor.decode_string(),
        Err(Error::EndOfSource { .. })
    ));
    assert_eq!(cursor.tell(), 0);
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("unpacker-{}-{name}.bin", std::process::id()))
}
