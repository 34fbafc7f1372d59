//! Owned tag trees for the NBT (Named Binary Tag) format, with a recursive
//! big-endian reader and writer and optional gzip/zlib containers.
//!
//! # Example
//!
//! ```
//! use nbt_tree::{Compound, Compression, List, NbtFile, Tag};
//!
//! let mut root = Compound::new();
//! root.add(("value", 42)).unwrap();
//! root.add(("scores", List::from_tags([1i64, 2, 3]).unwrap())).unwrap();
//!
//! let file = NbtFile::new(("root", root)).unwrap();
//! let bytes = file.to_bytes(Compression::None).unwrap();
//! assert_eq!(&bytes[..3], &[0x0A, 0x00, 0x04]);
//!
//! let loaded = NbtFile::from_bytes(&bytes, Compression::AutoDetect).unwrap();
//! assert_eq!(loaded.root().unwrap()["value"], Tag::Int(42));
//! ```

pub use zerocopy::BigEndian;
pub use zerocopy::LittleEndian;

mod compound;
mod compression;
mod display;
mod error;
mod file;
mod list;
mod read;
mod reader;
#[cfg(feature = "serde")]
mod ser;
mod tag;
mod util;
mod value;
mod write;
mod writer;

pub use compound::*;
pub use compression::Compression;
pub use error::*;
pub use file::*;
pub use list::*;
pub use read::*;
pub use reader::*;
pub use tag::*;
pub use util::*;
pub use value::*;
pub use write::*;
pub use writer::*;
