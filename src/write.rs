use std::io::Write;

use zerocopy::IntoBytes;

use crate::{ByteOrder, Compound, Error, List, NbtWriter, Result, Tag, TagID, cold_path};

/// Writes `root` as a named Compound document.
///
/// # Example
///
/// ```
/// use nbt_tree::{write_root, BigEndian, Compound};
///
/// let mut root = Compound::new();
/// root.add(("b", 5i8)).unwrap();
///
/// let mut out = Vec::new();
/// write_root::<BigEndian, _>(&mut out, "r", &root).unwrap();
/// assert_eq!(out, [0x0A, 0x00, 0x01, b'r', 0x01, 0x00, 0x01, b'b', 0x05, 0x00]);
/// ```
pub fn write_root<O: ByteOrder, W: Write>(writer: W, name: &str, root: &Compound) -> Result<()> {
    let mut encoder = Encoder::<W, O> {
        writer: NbtWriter::new(writer),
    };
    encoder.writer.write_tag_id(TagID::Compound)?;
    encoder.writer.write_string(name)?;
    encoder.write_compound(root)?;
    encoder.writer.flush()
}

struct Encoder<W, O: ByteOrder> {
    writer: NbtWriter<W, O>,
}

impl<W: Write, O: ByteOrder> Encoder<W, O> {
    fn write_named(&mut self, name: &str, tag: &Tag) -> Result<()> {
        self.writer.write_tag_id(tag.tag_id())?;
        self.writer.write_string(name)?;
        self.write_payload(tag)
    }

    fn write_payload(&mut self, tag: &Tag) -> Result<()> {
        match tag {
            Tag::Byte(value) => self.writer.write_i8(*value),
            Tag::Short(value) => self.writer.write_i16(*value),
            Tag::Int(value) => self.writer.write_i32(*value),
            Tag::Long(value) => self.writer.write_i64(*value),
            Tag::Float(value) => self.writer.write_f32(*value),
            Tag::Double(value) => self.writer.write_f64(*value),
            Tag::ByteArray(values) => {
                self.writer.write_length("byte array", values.len())?;
                self.writer.write_raw(values.as_bytes())
            }
            Tag::String(value) => self.writer.write_string(value),
            Tag::List(list) => self.write_list(list),
            Tag::Compound(compound) => self.write_compound(compound),
            Tag::IntArray(values) => {
                self.writer.write_length("int array", values.len())?;
                values
                    .iter()
                    .try_for_each(|value| self.writer.write_i32(*value))
            }
        }
    }

    fn write_compound(&mut self, compound: &Compound) -> Result<()> {
        for (name, tag) in compound.iter() {
            self.write_named(name, tag)?;
        }
        self.writer.write_tag_id(TagID::End)
    }

    fn write_list(&mut self, list: &List) -> Result<()> {
        let element_type = match list.element_type() {
            Some(element_type) => element_type,
            None if list.is_empty() => TagID::End,
            None => {
                cold_path();
                return Err(Error::UnknownListType { len: list.len() });
            }
        };
        self.writer.write_tag_id(element_type)?;
        self.writer.write_length("list", list.len())?;
        for item in list {
            if item.tag_id() != element_type {
                cold_path();
                return Err(Error::TagMismatch {
                    expected: element_type,
                    actual: item.tag_id(),
                });
            }
            self.write_payload(item)?;
        }
        Ok(())
    }
}
