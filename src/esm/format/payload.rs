//! Fixed-size subrecord payloads.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

/// A payload whose encoded length is a schema constant.
///
/// The reader checks the declared subrecord length against [`SIZE`](Self::SIZE)
/// before calling [`decode`](Self::decode), so implementations may assume
/// exactly `SIZE` bytes are available.
pub trait FixedPayload: Sized {
    const SIZE: usize;

    fn decode(reader: &mut impl Read) -> io::Result<Self>;

    fn encode(&self, writer: &mut impl Write) -> io::Result<()>;
}

impl FixedPayload for u8 {
    const SIZE: usize = 1;

    fn decode(reader: &mut impl Read) -> io::Result<Self> {
        reader.read_u8()
    }

    fn encode(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_u8(*self)
    }
}

impl FixedPayload for i32 {
    const SIZE: usize = 4;

    fn decode(reader: &mut impl Read) -> io::Result<Self> {
        reader.read_i32::<LittleEndian>()
    }

    fn encode(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_i32::<LittleEndian>(*self)
    }
}

impl FixedPayload for f32 {
    const SIZE: usize = 4;

    fn decode(reader: &mut impl Read) -> io::Result<Self> {
        reader.read_f32::<LittleEndian>()
    }

    fn encode(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_f32::<LittleEndian>(*self)
    }
}
