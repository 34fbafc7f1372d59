use std::ops::{Index, IndexMut};

use crate::{Error, FromTag, Result, Tag, TagID, cold_path};

/// An ordered sequence of unnamed tags sharing one element type.
///
/// A new list has an unknown element type (`element_type() == None`). The
/// type is fixed by the first element added, or explicitly with
/// [`with_type`](Self::with_type) / [`set_element_type`](Self::set_element_type).
/// An empty list may stay untyped; a non-empty one never is.
///
/// # Example
///
/// ```
/// use nbt_tree::{List, Tag, TagID};
///
/// let mut list = List::new();
/// assert_eq!(list.element_type(), None);
///
/// list.add(1.5f32).unwrap();
/// list.add(2.5f32).unwrap();
/// assert_eq!(list.element_type(), Some(TagID::Float));
///
/// assert!(list.add("three").is_err());
/// assert_eq!(list.to_array::<f32>().unwrap(), vec![1.5, 2.5]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct List {
    pub(crate) element_type: Option<TagID>,
    pub(crate) items: Vec<Tag>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list whose elements must be of type `element_type`.
    pub fn with_type(element_type: TagID) -> Result<Self> {
        let mut list = Self::new();
        list.set_element_type(element_type)?;
        Ok(list)
    }

    /// Builds a list from `tags`, failing as a whole if their types differ.
    pub fn from_tags<T: Into<Tag>>(tags: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut list = Self::new();
        list.add_range(tags)?;
        Ok(list)
    }

    /// The declared element type, or `None` while unknown.
    #[inline]
    pub fn element_type(&self) -> Option<TagID> {
        self.element_type
    }

    /// Declares the element type.
    ///
    /// `End` is never a valid element type. A non-empty list only accepts
    /// the type its elements already have.
    pub fn set_element_type(&mut self, element_type: TagID) -> Result<()> {
        if element_type == TagID::End {
            cold_path();
            return Err(Error::InvalidListType(element_type));
        }
        if let Some(first) = self.items.first() {
            if first.tag_id() != element_type {
                cold_path();
                return Err(Error::TagMismatch {
                    expected: first.tag_id(),
                    actual: element_type,
                });
            }
        }
        self.element_type = Some(element_type);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    /// Mutable access to an element.
    ///
    /// Replacing the element with a tag of another type through this
    /// reference is not checked here; writing such a list fails with
    /// [`Error::TagMismatch`]. Prefer [`set`](Self::set) for replacement.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tag> {
        self.items.get_mut(index)
    }

    /// Like [`get`](Self::get) but reports a missing index as
    /// [`Error::IndexOutOfRange`].
    pub fn try_get(&self, index: usize) -> Result<&Tag> {
        self.items.get(index).ok_or_else(|| {
            cold_path();
            Error::IndexOutOfRange {
                index,
                len: self.items.len(),
            }
        })
    }

    /// Borrows the element at `index` as `T`.
    pub fn get_as<'a, T: FromTag<'a>>(&'a self, index: usize) -> Result<T> {
        self.try_get(index)?.cast::<T>()
    }

    fn check_type(&self, tag: &Tag) -> Result<()> {
        match self.element_type {
            Some(expected) if expected != tag.tag_id() => {
                cold_path();
                Err(Error::TagMismatch {
                    expected,
                    actual: tag.tag_id(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Appends `tag`, fixing the element type if it was unknown.
    pub fn add(&mut self, tag: impl Into<Tag>) -> Result<()> {
        let tag = tag.into();
        self.check_type(&tag)?;
        self.element_type = Some(tag.tag_id());
        self.items.push(tag);
        Ok(())
    }

    /// Appends every tag in order, stopping at the first mismatch.
    ///
    /// Tags appended before the mismatch stay in the list.
    pub fn add_range<T: Into<Tag>>(&mut self, tags: impl IntoIterator<Item = T>) -> Result<()> {
        for tag in tags {
            self.add(tag)?;
        }
        Ok(())
    }

    /// Inserts `tag` at `index`, shifting later elements.
    pub fn insert(&mut self, index: usize, tag: impl Into<Tag>) -> Result<()> {
        if index > self.items.len() {
            cold_path();
            return Err(Error::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let tag = tag.into();
        self.check_type(&tag)?;
        self.element_type = Some(tag.tag_id());
        self.items.insert(index, tag);
        Ok(())
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, tag: impl Into<Tag>) -> Result<Tag> {
        let len = self.items.len();
        let tag = tag.into();
        self.check_type(&tag)?;
        match self.items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, tag)),
            None => {
                cold_path();
                Err(Error::IndexOutOfRange { index, len })
            }
        }
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Tag> {
        if index >= self.items.len() {
            cold_path();
            return Err(Error::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Position of the first element equal to `tag`.
    pub fn index_of(&self, tag: &Tag) -> Option<usize> {
        self.items.iter().position(|item| item == tag)
    }

    /// Returns `true` if `tag` is one of this list's elements, by identity.
    pub fn contains_tag(&self, tag: &Tag) -> bool {
        self.items.iter().any(|item| std::ptr::eq(item, tag))
    }

    /// Removes every element. The element type is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Tag> {
        self.items.iter_mut()
    }

    /// Collects every element as `T`, failing with [`Error::Cast`] on the
    /// first element of another type.
    pub fn to_array<'a, T: FromTag<'a>>(&'a self) -> Result<Vec<T>> {
        self.items.iter().map(|tag| tag.cast::<T>()).collect()
    }
}

impl Index<usize> for List {
    type Output = Tag;

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    fn index(&self, index: usize) -> &Tag {
        &self.items[index]
    }
}

impl IndexMut<usize> for List {
    fn index_mut(&mut self, index: usize) -> &mut Tag {
        &mut self.items[index]
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for List {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
