use std::fmt::{self, Display, Formatter, Write};

use crate::{Compound, List, NamedTag, NbtFile, Tag};

const INDENT: &str = "  ";

fn plural(len: usize, one: &'static str, many: &'static str) -> &'static str {
    if len == 1 { one } else { many }
}

/// Writes `tag` as one line (scalars) or a braced block (List/Compound),
/// e.g. `TAG_Int("value"): 42`.
fn write_tag(f: &mut Formatter<'_>, name: Option<&str>, tag: &Tag, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    f.write_str(tag.tag_id().name())?;
    if let Some(name) = name {
        write!(f, "({name:?})")?;
    }
    f.write_str(": ")?;
    match tag {
        Tag::Byte(value) => write!(f, "{value}"),
        Tag::Short(value) => write!(f, "{value}"),
        Tag::Int(value) => write!(f, "{value}"),
        Tag::Long(value) => write!(f, "{value}"),
        Tag::Float(value) => write!(f, "{value}"),
        Tag::Double(value) => write!(f, "{value}"),
        Tag::ByteArray(values) => {
            write!(f, "[{} {}]", values.len(), plural(values.len(), "byte", "bytes"))
        }
        Tag::String(value) => write!(f, "{value:?}"),
        Tag::IntArray(values) => {
            write!(f, "[{} {}]", values.len(), plural(values.len(), "int", "ints"))
        }
        Tag::List(list) => write_list(f, list, depth),
        Tag::Compound(compound) => write_compound(f, compound, depth),
    }
}

fn write_block_end(f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    f.write_char('}')
}

fn write_list(f: &mut Formatter<'_>, list: &List, depth: usize) -> fmt::Result {
    let len = list.len();
    write!(f, "{len} {}", plural(len, "entry", "entries"))?;
    if let Some(element_type) = list.element_type() {
        write!(f, " of {}", element_type.name())?;
    }
    f.write_str(" {\n")?;
    for item in list {
        write_tag(f, None, item, depth + 1)?;
        f.write_char('\n')?;
    }
    write_block_end(f, depth)
}

fn write_compound(f: &mut Formatter<'_>, compound: &Compound, depth: usize) -> fmt::Result {
    let len = compound.len();
    writeln!(f, "{len} {} {{", plural(len, "entry", "entries"))?;
    for (name, tag) in compound.iter() {
        write_tag(f, Some(name), tag, depth + 1)?;
        f.write_char('\n')?;
    }
    write_block_end(f, depth)
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tag(f, None, self, 0)
    }
}

impl Display for NamedTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tag(f, self.name(), &self.tag, 0)
    }
}

impl Display for Compound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("TAG_Compound: ")?;
        write_compound(f, self, 0)
    }
}

impl Display for List {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("TAG_List: ")?;
        write_list(f, self, 0)
    }
}

impl Display for NbtFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.root_name(), self.root()) {
            (Some(name), Some(root)) => {
                write!(f, "TAG_Compound({name:?}): ")?;
                write_compound(f, root, 0)
            }
            _ => f.write_str("<empty>"),
        }
    }
}
