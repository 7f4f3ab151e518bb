//! Binary encoding of values and tuples, shared by paged stores and snapshots.
//!
//! A value is a domain tag byte followed by its payload: big-endian fixed-width numbers,
//! a `u32` code point for characters and a `u32` length-prefixed UTF-8 string for text.
//! A tuple is a record:
//! ```text
//! +-----------+---------+------------------+
//! | Len (u32) | N (u16) | N encoded values |
//! +-----------+---------+------------------+
//! ```
//! where `Len` counts the bytes following it.

use crate::{Domain, Error, Tuple, Value};
use bytes::{Buf, BufMut, BytesMut};

fn ensure(remaining: usize, needed: usize, what: &str) -> Result<(), Error> {
    if remaining < needed {
        return Err(Error::Corrupt(format!(
            "not enough bytes for {}: {} < {}",
            what, remaining, needed
        )));
    }
    Ok(())
}

/// Converts the length `len` of `what` into a length prefix, failing if it does not fit.
pub(crate) fn prefix<T: TryFrom<usize>>(len: usize, what: &'static str) -> Result<T, Error> {
    T::try_from(len).map_err(|_| Error::TooLarge { what, len })
}

pub(crate) fn put_str(buf: &mut impl BufMut, s: &str) -> Result<(), Error> {
    buf.put_u32(prefix(s.len(), "string")?);
    buf.put_slice(s.as_bytes());
    Ok(())
}

pub(crate) fn get_string(buf: &mut impl Buf) -> Result<String, Error> {
    ensure(buf.remaining(), 4, "string length")?;
    let len = buf.get_u32() as usize;
    ensure(buf.remaining(), len, "string")?;
    let bytes = buf.copy_to_bytes(len);
    String::from_utf8(bytes.to_vec()).map_err(|e| Error::Corrupt(e.to_string()))
}

pub(crate) fn put_domain(buf: &mut impl BufMut, domain: Domain) {
    buf.put_u8(domain.tag());
}

pub(crate) fn get_domain(buf: &mut impl Buf) -> Result<Domain, Error> {
    ensure(buf.remaining(), 1, "domain tag")?;
    let tag = buf.get_u8();
    Domain::from_tag(tag).ok_or_else(|| Error::Corrupt(format!("unknown domain tag {}", tag)))
}

pub(crate) fn put_value(buf: &mut impl BufMut, value: &Value) -> Result<(), Error> {
    put_domain(buf, value.domain());
    match value {
        Value::Long(v) => buf.put_i64(*v),
        Value::Integer(v) => buf.put_i32(*v),
        Value::Short(v) => buf.put_i16(*v),
        Value::Byte(v) => buf.put_i8(*v),
        Value::Double(v) => buf.put_f64(*v),
        Value::Float(v) => buf.put_f32(*v),
        Value::Character(v) => buf.put_u32(*v as u32),
        Value::String(v) => put_str(buf, v)?,
    }
    Ok(())
}

pub(crate) fn get_value(buf: &mut impl Buf) -> Result<Value, Error> {
    let value = match get_domain(buf)? {
        Domain::Long => {
            ensure(buf.remaining(), 8, "long")?;
            Value::Long(buf.get_i64())
        }
        Domain::Integer => {
            ensure(buf.remaining(), 4, "integer")?;
            Value::Integer(buf.get_i32())
        }
        Domain::Short => {
            ensure(buf.remaining(), 2, "short")?;
            Value::Short(buf.get_i16())
        }
        Domain::Byte => {
            ensure(buf.remaining(), 1, "byte")?;
            Value::Byte(buf.get_i8())
        }
        Domain::Double => {
            ensure(buf.remaining(), 8, "double")?;
            Value::Double(buf.get_f64())
        }
        Domain::Float => {
            ensure(buf.remaining(), 4, "float")?;
            Value::Float(buf.get_f32())
        }
        Domain::Character => {
            ensure(buf.remaining(), 4, "character")?;
            let code = buf.get_u32();
            Value::Character(
                char::from_u32(code)
                    .ok_or_else(|| Error::Corrupt(format!("invalid character {:#x}", code)))?,
            )
        }
        Domain::String => Value::String(get_string(buf)?),
    };
    Ok(value)
}

pub(crate) fn put_tuple(buf: &mut impl BufMut, tuple: &[Value]) -> Result<(), Error> {
    let mut record = BytesMut::new();
    record.put_u16(prefix(tuple.len(), "tuple")?);
    for value in tuple {
        put_value(&mut record, value)?;
    }
    buf.put_u32(prefix(record.len(), "tuple record")?);
    buf.put_slice(&record);
    Ok(())
}

pub(crate) fn get_tuple(buf: &mut impl Buf) -> Result<Tuple, Error> {
    ensure(buf.remaining(), 4, "record length")?;
    let len = buf.get_u32() as usize;
    ensure(buf.remaining(), len, "record")?;
    let mut record = buf.copy_to_bytes(len);

    ensure(record.remaining(), 2, "value count")?;
    let count = record.get_u16() as usize;
    let mut tuple = Vec::with_capacity(count);
    for _ in 0..count {
        tuple.push(get_value(&mut record)?);
    }
    if record.has_remaining() {
        return Err(Error::Corrupt(format!(
            "{} trailing bytes in record",
            record.remaining()
        )));
    }
    Ok(tuple)
}

/// Reads a `u32` element count.
pub(crate) fn get_count(buf: &mut impl Buf) -> Result<usize, Error> {
    ensure(buf.remaining(), 4, "count")?;
    Ok(buf.get_u32() as usize)
}

/// Reads a `u32` count followed by that many tuple records.
pub(crate) fn get_tuples(buf: &mut impl Buf) -> Result<Vec<Tuple>, Error> {
    let count = get_count(buf)?;
    let mut tuples = Vec::with_capacity(count.min(buf.remaining()));
    for _ in 0..count {
        tuples.push(get_tuple(buf)?);
    }
    Ok(tuples)
}
