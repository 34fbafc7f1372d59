//! `serde::Serialize` for the tag tree.
//!
//! Scalars map to the matching serde primitives, arrays and Lists to
//! sequences, and Compounds to maps in insertion order. An [`NbtFile`] is a
//! map with a single entry (root name to root Compound), or an empty map
//! when it has no root.

use serde::{Serialize, Serializer};

use crate::{Compound, List, NbtFile, Tag};

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tag::Byte(value) => serializer.serialize_i8(*value),
            Tag::Short(value) => serializer.serialize_i16(*value),
            Tag::Int(value) => serializer.serialize_i32(*value),
            Tag::Long(value) => serializer.serialize_i64(*value),
            Tag::Float(value) => serializer.serialize_f32(*value),
            Tag::Double(value) => serializer.serialize_f64(*value),
            Tag::ByteArray(values) => serializer.collect_seq(values),
            Tag::String(value) => serializer.serialize_str(value),
            Tag::List(list) => list.serialize(serializer),
            Tag::Compound(compound) => compound.serialize(serializer),
            Tag::IntArray(values) => serializer.collect_seq(values),
        }
    }
}

impl Serialize for List {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

impl Serialize for Compound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl Serialize for NbtFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.root_name().zip(self.root()))
    }
}
