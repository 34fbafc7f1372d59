use crate::{Compound, Error, List, Result, TagID, cold_path};

/// One node of an NBT tree.
///
/// `Tag` is the payload only. Names belong to the container: a [`Compound`]
/// keys its children by name, list elements are unnamed, and the document
/// root name lives in [`NbtFile`](crate::NbtFile). The `End` marker is a wire
/// artifact and has no variant here.
///
/// Equality compares `Float` and `Double` by bit pattern, so a NaN equals
/// itself and `0.0 != -0.0`.
#[derive(Clone, Debug)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Tag::Byte(a), Tag::Byte(b)) => a == b,
            (Tag::Short(a), Tag::Short(b)) => a == b,
            (Tag::Int(a), Tag::Int(b)) => a == b,
            (Tag::Long(a), Tag::Long(b)) => a == b,
            (Tag::Float(a), Tag::Float(b)) => a.to_bits() == b.to_bits(),
            (Tag::Double(a), Tag::Double(b)) => a.to_bits() == b.to_bits(),
            (Tag::ByteArray(a), Tag::ByteArray(b)) => a == b,
            (Tag::String(a), Tag::String(b)) => a == b,
            (Tag::List(a), Tag::List(b)) => a == b,
            (Tag::Compound(a), Tag::Compound(b)) => a == b,
            (Tag::IntArray(a), Tag::IntArray(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! scalar_accessors {
    ($($fn_name:ident => $variant:ident: $ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $fn_name(&self) -> Option<$ty> {
                match self {
                    Tag::$variant(value) => Some(*value),
                    _ => None,
                }
            }
        )*
    };
}

impl Tag {
    /// The wire type of this tag.
    pub const fn tag_id(&self) -> TagID {
        match self {
            Tag::Byte(_) => TagID::Byte,
            Tag::Short(_) => TagID::Short,
            Tag::Int(_) => TagID::Int,
            Tag::Long(_) => TagID::Long,
            Tag::Float(_) => TagID::Float,
            Tag::Double(_) => TagID::Double,
            Tag::ByteArray(_) => TagID::ByteArray,
            Tag::String(_) => TagID::String,
            Tag::List(_) => TagID::List,
            Tag::Compound(_) => TagID::Compound,
            Tag::IntArray(_) => TagID::IntArray,
        }
    }

    scalar_accessors!(
        as_byte => Byte: i8,
        as_short => Short: i16,
        as_int => Int: i32,
        as_long => Long: i64,
        as_float => Float: f32,
        as_double => Double: f64,
    );

    #[inline]
    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            Tag::ByteArray(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Tag::List(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Tag::List(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Tag::Compound(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Tag::Compound(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Tag::IntArray(value) => Some(value),
            _ => None,
        }
    }

    /// Borrows the payload as `T`, failing with [`Error::Cast`] when the
    /// variant is not `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use nbt_tree::{Tag, TagID, Error};
    ///
    /// let tag = Tag::Int(42);
    /// assert_eq!(tag.cast::<i32>().unwrap(), 42);
    /// assert!(matches!(
    ///     tag.cast::<&str>(),
    ///     Err(Error::Cast { expected: TagID::String, actual: TagID::Int })
    /// ));
    /// ```
    pub fn cast<'a, T: FromTag<'a>>(&'a self) -> Result<T> {
        T::from_tag(self).ok_or_else(|| {
            cold_path();
            Error::Cast {
                expected: T::TAG_ID,
                actual: self.tag_id(),
            }
        })
    }
}

/// Rust types a tag payload can be borrowed or copied as.
///
/// Implemented for the scalar types, `&str`, `&[i8]`, `&[i32]`, `&List` and
/// `&Compound`.
pub trait FromTag<'a>: Sized {
    const TAG_ID: TagID;

    fn from_tag(tag: &'a Tag) -> Option<Self>;
}

macro_rules! impl_from_tag_copy {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> FromTag<'a> for $ty {
                const TAG_ID: TagID = TagID::$variant;

                #[inline]
                fn from_tag(tag: &'a Tag) -> Option<Self> {
                    match tag {
                        Tag::$variant(value) => Some(*value),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Tag {
                #[inline]
                fn from(value: $ty) -> Self {
                    Tag::$variant(value)
                }
            }
        )*
    };
}

impl_from_tag_copy!(
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
);

macro_rules! impl_from_tag_ref {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> FromTag<'a> for &'a $ty {
                const TAG_ID: TagID = TagID::$variant;

                #[inline]
                fn from_tag(tag: &'a Tag) -> Option<Self> {
                    match tag {
                        Tag::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_tag_ref!(
    str => String,
    [i8] => ByteArray,
    [i32] => IntArray,
    List => List,
    Compound => Compound,
);

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::String(value.to_owned())
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Tag::String(value)
    }
}

impl From<Vec<i8>> for Tag {
    fn from(value: Vec<i8>) -> Self {
        Tag::ByteArray(value)
    }
}

impl From<Vec<i32>> for Tag {
    fn from(value: Vec<i32>) -> Self {
        Tag::IntArray(value)
    }
}

impl From<List> for Tag {
    fn from(value: List) -> Self {
        Tag::List(value)
    }
}

impl From<Compound> for Tag {
    fn from(value: Compound) -> Self {
        Tag::Compound(value)
    }
}

/// A tag together with its optional name.
///
/// This is the unit accepted by [`Compound::add`] and [`NbtFile::new`](crate::NbtFile::new),
/// both of which require the name to be present.
///
/// ```
/// use nbt_tree::{NamedTag, Tag};
///
/// let named: NamedTag = ("value", 42).into();
/// assert_eq!(named.name(), Some("value"));
/// assert_eq!(named.tag, Tag::Int(42));
///
/// let unnamed: NamedTag = Tag::Int(42).into();
/// assert_eq!(unnamed.name(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTag {
    pub name: Option<String>,
    pub tag: Tag,
}

impl NamedTag {
    pub fn new(name: impl Into<String>, tag: impl Into<Tag>) -> Self {
        Self {
            name: Some(name.into()),
            tag: tag.into(),
        }
    }

    pub fn unnamed(tag: impl Into<Tag>) -> Self {
        Self {
            name: None,
            tag: tag.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn tag_id(&self) -> TagID {
        self.tag.tag_id()
    }
}

impl<S: Into<String>, T: Into<Tag>> From<(S, T)> for NamedTag {
    fn from((name, tag): (S, T)) -> Self {
        NamedTag::new(name, tag)
    }
}

impl From<Tag> for NamedTag {
    fn from(tag: Tag) -> Self {
        NamedTag::unnamed(tag)
    }
}
