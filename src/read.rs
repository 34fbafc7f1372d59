use std::io::Read;

use tracing::trace;

use crate::{ByteOrder, Compound, Error, List, NbtReader, Result, Tag, TagID, cold_path};

/// Upper bound on capacity reserved up front from an untrusted length prefix.
const PREALLOC_LIMIT: usize = 4096;

/// Reads a complete document: a named Compound root tag.
///
/// Fails with [`Error::RootNotCompound`] if the first byte is not the
/// Compound type byte, and with [`Error::DepthLimitExceeded`] if Lists and
/// Compounds nest deeper than `max_depth`.
///
/// # Example
///
/// ```
/// use nbt_tree::{read_root, BigEndian, Tag};
///
/// let data = [0x0A, 0x00, 0x01, b'r', 0x01, 0x00, 0x01, b'b', 0x05, 0x00];
/// let (name, root) = read_root::<BigEndian, _>(&data[..], 512).unwrap();
/// assert_eq!(name, "r");
/// assert_eq!(root["b"], Tag::Byte(5));
/// ```
pub fn read_root<O: ByteOrder, R: Read>(reader: R, max_depth: usize) -> Result<(String, Compound)> {
    Decoder::<R, O>::new(reader, max_depth).read_root()
}

/// Reads only the type byte and name of the root tag.
pub fn read_root_name<O: ByteOrder, R: Read>(reader: R) -> Result<String> {
    let mut reader = NbtReader::<R, O>::new(reader);
    expect_compound_root(&mut reader)?;
    reader.read_string()
}

fn expect_compound_root<R: Read, O: ByteOrder>(reader: &mut NbtReader<R, O>) -> Result<()> {
    let first = reader.read_u8()?;
    if first != TagID::Compound as u8 {
        cold_path();
        return Err(Error::RootNotCompound(first));
    }
    Ok(())
}

struct Decoder<R, O: ByteOrder> {
    reader: NbtReader<R, O>,
    depth: usize,
    max_depth: usize,
}

impl<R: Read, O: ByteOrder> Decoder<R, O> {
    fn new(reader: R, max_depth: usize) -> Self {
        Self {
            reader: NbtReader::new(reader),
            depth: 0,
            max_depth,
        }
    }

    fn read_root(&mut self) -> Result<(String, Compound)> {
        expect_compound_root(&mut self.reader)?;
        let name = self.reader.read_string()?;
        let root = self.read_compound()?;
        Ok((name, root))
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            cold_path();
            return Err(Error::DepthLimitExceeded(self.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    /// Reads a type byte, then the name and payload unless the type is End.
    ///
    /// `None` is the End terminator.
    fn read_named(&mut self) -> Result<Option<(String, Tag)>> {
        let id = self.reader.read_tag_id()?;
        if id == TagID::End {
            return Ok(None);
        }
        let name = self.reader.read_string()?;
        let tag = self.read_payload(id)?;
        Ok(Some((name, tag)))
    }

    fn read_payload(&mut self, id: TagID) -> Result<Tag> {
        Ok(match id {
            TagID::End => {
                cold_path();
                return Err(Error::InvalidTagType(TagID::End as u8));
            }
            TagID::Byte => Tag::Byte(self.reader.read_i8()?),
            TagID::Short => Tag::Short(self.reader.read_i16()?),
            TagID::Int => Tag::Int(self.reader.read_i32()?),
            TagID::Long => Tag::Long(self.reader.read_i64()?),
            TagID::Float => Tag::Float(self.reader.read_f32()?),
            TagID::Double => Tag::Double(self.reader.read_f64()?),
            TagID::ByteArray => {
                let len = self.reader.read_length("byte array")?;
                let bytes = self.reader.read_bytes(len)?;
                Tag::ByteArray(bytes.into_iter().map(|byte| byte as i8).collect())
            }
            TagID::String => Tag::String(self.reader.read_string()?),
            TagID::List => Tag::List(self.read_list()?),
            TagID::Compound => Tag::Compound(self.read_compound()?),
            TagID::IntArray => {
                let len = self.reader.read_length("int array")?;
                let mut values = Vec::with_capacity(len.min(PREALLOC_LIMIT));
                for _ in 0..len {
                    values.push(self.reader.read_i32()?);
                }
                Tag::IntArray(values)
            }
        })
    }

    fn read_compound(&mut self) -> Result<Compound> {
        self.enter()?;
        let mut compound = Compound::new();
        while let Some((name, tag)) = self.read_named()? {
            compound.add((name, tag)).map_err(|err| match err {
                Error::DuplicateName(name) => Error::DuplicateNameInStream(name),
                other => other,
            })?;
        }
        self.depth -= 1;
        trace!(len = compound.len(), depth = self.depth, "decoded compound");
        Ok(compound)
    }

    fn read_list(&mut self) -> Result<List> {
        self.enter()?;
        let element_type = TagID::try_from(self.reader.read_u8()?)?;
        let len = self.reader.read_length("list")?;
        let list = if element_type == TagID::End {
            if len > 0 {
                cold_path();
                return Err(Error::UnknownListType { len });
            }
            List::new()
        } else {
            let mut items = Vec::with_capacity(len.min(PREALLOC_LIMIT));
            for _ in 0..len {
                items.push(self.read_payload(element_type)?);
            }
            List {
                element_type: Some(element_type),
                items,
            }
        };
        self.depth -= 1;
        trace!(len, ?element_type, "decoded list");
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use zerocopy::BigEndian;

    use super::*;

    fn read(data: &[u8]) -> Result<(String, Compound)> {
        read_root::<BigEndian, _>(data, 512)
    }

    #[test]
    fn test_empty_root() {
        let (name, root) = read(&[0x0A, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(name, "");
        assert!(root.is_empty());
    }

    #[test]
    fn test_root_must_be_compound() {
        assert!(matches!(
            read(&[0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]),
            Err(Error::RootNotCompound(0x03))
        ));
    }

    #[test]
    fn test_missing_terminator() {
        assert!(matches!(
            read(&[0x0A, 0x00, 0x00, 0x01, 0x00, 0x01, b'a', 0x05]),
            Err(Error::EndOfFile)
        ));
    }

    #[test]
    fn test_duplicate_name_in_stream() {
        let data = [
            0x0A, 0x00, 0x00, //
            0x01, 0x00, 0x01, b'a', 0x01, //
            0x01, 0x00, 0x01, b'a', 0x02, //
            0x00,
        ];
        match read(&data) {
            Err(Error::DuplicateNameInStream(name)) => assert_eq!(name, "a"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_list_keeps_element_type() {
        let data = [
            0x0A, 0x00, 0x00, //
            0x09, 0x00, 0x01, b'l', 0x03, 0x00, 0x00, 0x00, 0x00, //
            0x09, 0x00, 0x01, b'u', 0x00, 0x00, 0x00, 0x00, 0x00, //
            0x00,
        ];
        let (_, root) = read(&data).unwrap();
        assert_eq!(
            root.get_as::<&List>("l").unwrap().unwrap().element_type(),
            Some(TagID::Int)
        );
        assert_eq!(
            root.get_as::<&List>("u").unwrap().unwrap().element_type(),
            None
        );
    }

    #[test]
    fn test_nonempty_list_of_end() {
        let data = [
            0x0A, 0x00, 0x00, //
            0x09, 0x00, 0x01, b'l', 0x00, 0x00, 0x00, 0x00, 0x02, //
            0x00,
        ];
        assert!(matches!(read(&data), Err(Error::UnknownListType { len: 2 })));
    }

    #[test]
    fn test_negative_list_count() {
        let data = [
            0x0A, 0x00, 0x00, //
            0x09, 0x00, 0x01, b'l', 0x01, 0xFF, 0xFF, 0xFF, 0xFF, //
            0x00,
        ];
        assert!(matches!(
            read(&data),
            Err(Error::NegativeLength { what: "list", len: -1 })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let mut data = vec![0x0A, 0x00, 0x00];
        for _ in 0..8 {
            data.extend_from_slice(&[0x0A, 0x00, 0x00]);
        }
        data.extend(std::iter::repeat_n(0x00, 9));
        assert!(read_root::<BigEndian, _>(&data[..], 9).is_ok());
        assert!(matches!(
            read_root::<BigEndian, _>(&data[..], 8),
            Err(Error::DepthLimitExceeded(8))
        ));
    }

    #[test]
    fn test_root_name_only() {
        let data = [0x0A, 0x00, 0x04, b'r', b'o', b'o', b't', 0xFF];
        assert_eq!(read_root_name::<BigEndian, _>(&data[..]).unwrap(), "root");
    }
}
