use std::ops::{Index, IndexMut};

use indexmap::IndexMap;

use crate::{Error, FromTag, NamedTag, Result, Tag, cold_path};

/// An ordered, uniquely keyed collection of named tags.
///
/// Insertion order is preserved and is the order children are written in.
/// Every child is named by its key, so the "unnamed child" state cannot be
/// represented.
///
/// # Example
///
/// ```
/// use nbt_tree::{Compound, Tag};
///
/// let mut compound = Compound::new();
/// compound.add(("health", 20i16)).unwrap();
/// compound.add(("name", "Steve")).unwrap();
///
/// assert!(compound.add(("health", 10i16)).is_err());
/// assert_eq!(compound.get_as::<i16>("health").unwrap(), Some(20));
/// assert_eq!(compound["name"], Tag::String("Steve".into()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Compound {
    pub(crate) entries: IndexMap<String, Tag>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Builds a compound from `tags`, failing as a whole if any tag is
    /// unnamed or repeats an earlier name.
    pub fn from_tags<T: Into<NamedTag>>(tags: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut compound = Self::new();
        compound.add_range(tags)?;
        Ok(compound)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.entries.get(name)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Tag> {
        self.entries.get_mut(name)
    }

    /// Looks up `name` and borrows it as `T`.
    ///
    /// Returns `Ok(None)` when no child has that name and [`Error::Cast`]
    /// when the child exists with another type.
    pub fn get_as<'a, T: FromTag<'a>>(&'a self, name: &str) -> Result<Option<T>> {
        match self.entries.get(name) {
            Some(tag) => tag.cast::<T>().map(Some),
            None => Ok(None),
        }
    }

    /// Adds a named tag.
    ///
    /// Fails with [`Error::UnnamedTag`] if the tag has no name and with
    /// [`Error::DuplicateName`] if a child with the same name exists. The
    /// compound is unchanged on failure.
    pub fn add(&mut self, tag: impl Into<NamedTag>) -> Result<()> {
        let NamedTag { name, tag } = tag.into();
        let Some(name) = name else {
            cold_path();
            return Err(Error::UnnamedTag);
        };
        if self.entries.contains_key(&name) {
            cold_path();
            return Err(Error::DuplicateName(name));
        }
        self.entries.insert(name, tag);
        Ok(())
    }

    /// Adds every tag in order, stopping at the first one [`add`](Self::add)
    /// rejects.
    ///
    /// Tags added before the failing one stay in the compound.
    pub fn add_range<T: Into<NamedTag>>(&mut self, tags: impl IntoIterator<Item = T>) -> Result<()> {
        for tag in tags {
            self.add(tag)?;
        }
        Ok(())
    }

    /// Sets `name` to `tag`, replacing an existing child in place.
    ///
    /// Returns the replaced tag, if any.
    pub fn insert(&mut self, name: impl Into<String>, tag: impl Into<Tag>) -> Option<Tag> {
        self.entries.insert(name.into(), tag.into())
    }

    /// Removes the child named `name`, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        self.entries.shift_remove(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns `true` if `tag` is one of this compound's direct children.
    ///
    /// This compares identity, not value: an equal tag stored elsewhere is
    /// not contained.
    pub fn contains_tag(&self, tag: &Tag) -> bool {
        self.entries.values().any(|child| std::ptr::eq(child, tag))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(name, tag)| (name.as_str(), tag))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Tag)> {
        self.entries
            .iter_mut()
            .map(|(name, tag)| (name.as_str(), tag))
    }
}

impl PartialEq for Compound {
    /// Order-sensitive, since order is part of the serialized form.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl TryFrom<Vec<NamedTag>> for Compound {
    type Error = Error;

    fn try_from(tags: Vec<NamedTag>) -> Result<Self> {
        Compound::from_tags(tags)
    }
}

impl Index<&str> for Compound {
    type Output = Tag;

    /// # Panics
    ///
    /// Panics if no child is named `name`.
    fn index(&self, name: &str) -> &Tag {
        match self.entries.get(name) {
            Some(tag) => tag,
            None => panic!("no tag named {name:?} in compound"),
        }
    }
}

impl IndexMut<&str> for Compound {
    fn index_mut(&mut self, name: &str) -> &mut Tag {
        match self.entries.get_mut(name) {
            Some(tag) => tag,
            None => panic!("no tag named {name:?} in compound"),
        }
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Tag);
    type IntoIter = indexmap::map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = indexmap::map::IntoIter<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
