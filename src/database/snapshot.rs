//! Encodes whole tables into snapshots and decodes them back.
//!
//! A snapshot is laid out as:
//! ```text
//! +-------------+----------------+------+------------------+----------------+
//! | Magic "RTBL"| Version (u16)  | Name | N (u32) + names  | N domain tags  |
//! +-------------+----------------+------+------------------+----------------+
//! | K (u32) + key names | T (u32) + T tuple records                          |
//! +---------------------+----------------------------------------------------+
//! ```
//! Names are `u32` length-prefixed UTF-8 strings and tuple records are encoded by the
//! `codec` module.

use crate::{codec, Error, Schema, Table, Tuple};
use bytes::{Buf, BufMut, BytesMut};

const MAGIC: &[u8; 4] = b"RTBL";
const VERSION: u16 = 1;

pub(crate) fn encode(table: &Table) -> Result<BytesMut, Error> {
    let schema = table.schema();
    let mut buf = BytesMut::new();
    buf.put_slice(MAGIC);
    buf.put_u16(VERSION);
    codec::put_str(&mut buf, schema.name())?;

    buf.put_u32(codec::prefix(schema.arity(), "attribute list")?);
    for attribute in schema.attributes() {
        codec::put_str(&mut buf, attribute)?;
    }
    for domain in schema.domains() {
        codec::put_domain(&mut buf, *domain);
    }

    buf.put_u32(codec::prefix(schema.key().len(), "key")?);
    for attribute in schema.key() {
        codec::put_str(&mut buf, attribute)?;
    }

    buf.put_u32(codec::prefix(table.len(), "table")?);
    for tuple in table.tuples() {
        codec::put_tuple(&mut buf, &tuple?)?;
    }
    Ok(buf)
}

pub(crate) fn decode(buf: &mut impl Buf) -> Result<(Schema, Vec<Tuple>), Error> {
    if buf.remaining() < MAGIC.len() + 2 {
        return Err(Error::Corrupt("snapshot header is truncated".to_string()));
    }
    let mut magic = [0u8; 4];
    buf.copy_to_slice(&mut magic);
    if &magic != MAGIC {
        return Err(Error::Corrupt("not a table snapshot".to_string()));
    }
    let version = buf.get_u16();
    if version != VERSION {
        return Err(Error::Corrupt(format!(
            "unsupported snapshot version {}",
            version
        )));
    }

    let name = codec::get_string(buf)?;
    let arity = codec::get_count(buf)?;
    let attributes = (0..arity)
        .map(|_| codec::get_string(buf))
        .collect::<Result<Vec<_>, _>>()?;
    let domains = (0..arity)
        .map(|_| codec::get_domain(buf))
        .collect::<Result<Vec<_>, _>>()?;

    let key_len = codec::get_count(buf)?;
    let key = (0..key_len)
        .map(|_| codec::get_string(buf))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(missing) = key.iter().find(|k| !attributes.contains(*k)) {
        return Err(Error::Corrupt(format!(
            "key attribute '{}' is not an attribute of '{}'",
            missing, name
        )));
    }

    let tuples = codec::get_tuples(buf)?;
    if buf.has_remaining() {
        return Err(Error::Corrupt(format!(
            "{} trailing bytes in snapshot",
            buf.remaining()
        )));
    }
    Ok((Schema::from_parts(name, attributes, domains, key), tuples))
}
