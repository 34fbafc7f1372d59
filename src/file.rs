use std::{
    fs::File,
    io::{Cursor, Read, Seek, Write},
    path::Path,
};

use tracing::debug;
use zerocopy::BigEndian;

use crate::{
    Compound, Compression, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_DEPTH, Error, NamedTag, Result, Tag,
    cold_path, compression, read_root, read_root_name, write_root,
};

/// Settings for loading a document.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ReadOptions {
    pub compression: Compression,
    pub max_depth: usize,
    pub buffer_size: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            compression: Compression::AutoDetect,
            max_depth: DEFAULT_MAX_DEPTH,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ReadOptions {
    pub fn new(compression: Compression) -> Self {
        Self {
            compression,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}

/// Settings for saving a document.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WriteOptions {
    pub compression: Compression,
    /// Deflate level from 0 (store) to 9 (best), used by GZip and ZLib.
    pub level: u32,
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compression: Compression::GZip,
            level: 6,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl WriteOptions {
    pub fn new(compression: Compression) -> Self {
        Self {
            compression,
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.min(9);
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}

/// An NBT document: an optional named Compound root.
///
/// The root is validated when it is assigned, so a document that exists is
/// always writable. A document without a root writes zero bytes.
///
/// # Example
///
/// ```
/// use nbt_tree::{Compound, Compression, NbtFile};
///
/// let mut root = Compound::new();
/// root.add(("value", 42)).unwrap();
/// let file = NbtFile::new(("root", root)).unwrap();
///
/// let bytes = file.to_bytes(Compression::GZip).unwrap();
/// let loaded = NbtFile::from_bytes(&bytes, Compression::AutoDetect).unwrap();
/// assert_eq!(loaded, file);
/// assert_eq!(loaded.file_compression(), Some(Compression::GZip));
/// ```
#[derive(Clone, Debug, Default)]
pub struct NbtFile {
    root: Option<(String, Compound)>,
    file_compression: Option<Compression>,
}

impl NbtFile {
    /// Creates a document from a named Compound tag.
    pub fn new(root: impl Into<NamedTag>) -> Result<Self> {
        let mut file = Self::default();
        file.set_root(root)?;
        Ok(file)
    }

    pub fn from_compound(name: impl Into<String>, root: Compound) -> Self {
        Self {
            root: Some((name.into(), root)),
            file_compression: None,
        }
    }

    /// Replaces the root.
    ///
    /// Fails with [`Error::UnnamedTag`] or [`Error::RootMustBeCompound`]
    /// without touching the current root.
    pub fn set_root(&mut self, root: impl Into<NamedTag>) -> Result<()> {
        let NamedTag { name, tag } = root.into();
        let Some(name) = name else {
            cold_path();
            return Err(Error::UnnamedTag);
        };
        match tag {
            Tag::Compound(compound) => {
                self.root = Some((name, compound));
                Ok(())
            }
            other => {
                cold_path();
                Err(Error::RootMustBeCompound(other.tag_id()))
            }
        }
    }

    pub fn root(&self) -> Option<&Compound> {
        self.root.as_ref().map(|(_, root)| root)
    }

    pub fn root_mut(&mut self) -> Option<&mut Compound> {
        self.root.as_mut().map(|(_, root)| root)
    }

    pub fn root_name(&self) -> Option<&str> {
        self.root.as_ref().map(|(name, _)| name.as_str())
    }

    /// Removes and returns the root, leaving the document empty.
    pub fn take_root(&mut self) -> Option<(String, Compound)> {
        self.root.take()
    }

    /// Container format found by the load that produced this document.
    pub fn file_compression(&self) -> Option<Compression> {
        self.file_compression
    }

    /// Loads a document from a seekable stream.
    pub fn read_from<R: Read + Seek>(reader: R, compression: Compression) -> Result<Self> {
        Self::read_from_with(reader, &ReadOptions::new(compression))
    }

    pub fn read_from_with<R: Read + Seek>(mut reader: R, options: &ReadOptions) -> Result<Self> {
        let compression = match options.compression {
            Compression::AutoDetect => Compression::detect(&mut reader)?,
            other => other,
        };
        Self::read_resolved(reader, compression, options)
    }

    /// Loads a document from a stream that cannot seek.
    ///
    /// `AutoDetect` fails with [`Error::NotSeekable`].
    pub fn read_from_stream<R: Read>(reader: R, compression: Compression) -> Result<Self> {
        Self::read_from_stream_with(reader, &ReadOptions::new(compression))
    }

    pub fn read_from_stream_with<R: Read>(reader: R, options: &ReadOptions) -> Result<Self> {
        if options.compression == Compression::AutoDetect {
            cold_path();
            return Err(Error::NotSeekable);
        }
        Self::read_resolved(reader, options.compression, options)
    }

    pub fn from_bytes(data: &[u8], compression: Compression) -> Result<Self> {
        Self::read_from(Cursor::new(data), compression)
    }

    pub fn load(path: impl AsRef<Path>, compression: Compression) -> Result<Self> {
        Self::read_from(File::open(path)?, compression)
    }

    fn read_resolved<R: Read>(
        reader: R,
        compression: Compression,
        options: &ReadOptions,
    ) -> Result<Self> {
        let max_depth = options.max_depth;
        let (name, root) = compression::decode(reader, compression, options.buffer_size, |r| {
            read_root::<BigEndian, _>(r, max_depth)
        })?;
        debug!(?compression, root = %name, entries = root.len(), "loaded NBT document");
        Ok(Self {
            root: Some((name, root)),
            file_compression: Some(compression),
        })
    }

    /// Reads only the root tag's name from a seekable stream.
    pub fn read_root_name<R: Read + Seek>(mut reader: R, compression: Compression) -> Result<String> {
        let compression = match compression {
            Compression::AutoDetect => Compression::detect(&mut reader)?,
            other => other,
        };
        compression::decode(reader, compression, DEFAULT_BUFFER_SIZE, |r| {
            read_root_name::<BigEndian, _>(r)
        })
    }

    /// Writes the document. `AutoDetect` is rejected.
    pub fn write_to<W: Write>(&self, writer: W, compression: Compression) -> Result<()> {
        self.write_to_with(writer, &WriteOptions::new(compression))
    }

    pub fn write_to_with<W: Write>(&self, writer: W, options: &WriteOptions) -> Result<()> {
        if options.compression == Compression::AutoDetect {
            cold_path();
            return Err(Error::InvalidCompression(options.compression));
        }
        let Some((name, root)) = &self.root else {
            debug!("document has no root, nothing written");
            return Ok(());
        };
        compression::encode(
            writer,
            options.compression,
            options.level,
            options.buffer_size,
            |w| write_root::<BigEndian, _>(w, name, root),
        )?;
        debug!(compression = ?options.compression, root = %name, "saved NBT document");
        Ok(())
    }

    pub fn to_bytes(&self, compression: Compression) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out, compression)?;
        Ok(out)
    }

    pub fn save(&self, path: impl AsRef<Path>, compression: Compression) -> Result<()> {
        if compression == Compression::AutoDetect {
            cold_path();
            return Err(Error::InvalidCompression(compression));
        }
        self.write_to(File::create(path)?, compression)
    }
}

impl PartialEq for NbtFile {
    /// Documents are equal when their roots are; how they were loaded does
    /// not matter.
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}
