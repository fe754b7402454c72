//! Decode functions for numeric fields.
//!
//! Each function reads exactly one field of its width and returns `None` if
//! given a slice of any other length. Use [`decoder`] to select one by width
//! and value kind.

use zerocopy::byteorder::{BigEndian, F32, F64, I16, I32, I64, LittleEndian, U16, U32, U64};

use super::{Endian, Value, code::Class};

/// Decode one numeric field in the given byte order.
pub type Decode = fn(&[u8], Endian) -> Option<Value>;

/// Select the decode function for a field of `width` bytes and kind `class`.
///
/// Returns `None` for combinations that do not name a numeric field.
pub fn decoder(width: usize, class: Class) -> Option<Decode> {
    Some(match (width, class) {
        (1, Class::Signed) => decode_i8,
        (1, Class::Unsigned) => decode_u8,
        (2, Class::Signed) => decode_i16,
        (2, Class::Unsigned) => decode_u16,
        (4, Class::Signed) => decode_i32,
        (4, Class::Unsigned) => decode_u32,
        (8, Class::Signed) => decode_i64,
        (8, Class::Unsigned) => decode_u64,
        (4, Class::Float) => decode_f32,
        (8, Class::Float) => decode_f64,
        _ => return None,
    })
}

// Single bytes have no byte order.

fn decode_i8(r: &[u8], _: Endian) -> Option<Value> {
    let r: [u8; 1] = r.try_into().ok()?;
    Some(Value::Int(i8::from_ne_bytes(r).into()))
}

fn decode_u8(r: &[u8], _: Endian) -> Option<Value> {
    let r: [u8; 1] = r.try_into().ok()?;
    Some(Value::UInt(r[0].into()))
}

macro_rules! decode {
    ($name:ident, $t:ident, $n:literal, $variant:ident) => {
        fn $name(r: &[u8], endian: Endian) -> Option<Value> {
            let r: [u8; $n] = r.try_into().ok()?;

            let x = match endian {
                Endian::Little => $t::<LittleEndian>::from_bytes(r).get(),
                Endian::Big => $t::<BigEndian>::from_bytes(r).get(),
            };

            Some(Value::$variant(x.into()))
        }
    };
}

decode!(decode_i16, I16, 2, Int);
decode!(decode_u16, U16, 2, UInt);
decode!(decode_i32, I32, 4, Int);
decode!(decode_u32, U32, 4, UInt);
decode!(decode_i64, I64, 8, Int);
decode!(decode_u64, U64, 8, UInt);
decode!(decode_f32, F32, 4, Float);
decode!(decode_f64, F64, 8, Float);
