use core::borrow::Borrow;
use std::{
    collections::{btree_set, hash_set as std_hash_set, BTreeSet},
    fmt,
    hash::{BuildHasher, Hash},
    iter::FusedIterator,
};

use hashbrown::{hash_map::DefaultHashBuilder, hash_set, HashSet};

/// A finite set that can be read but not modified.
///
/// This is what the set-algebra methods of [`ReadonlySet`] accept as their operand, so a view can
/// be combined with another view, a `hashbrown` set, or one of the standard library's sets.
pub trait SetLike<T> {
    /// The iterator returned by [`elements`](SetLike::elements)
    type Elements<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Returns the number of elements in the set
    fn size(&self) -> usize;

    /// Returns `true` if the set contains the given element
    fn has(&self, value: &T) -> bool;

    /// Returns an iterator over the elements of the set
    fn elements(&self) -> Self::Elements<'_>;
}

impl<T, S> SetLike<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    type Elements<'a> = hash_set::Iter<'a, T> where Self: 'a, T: 'a;

    fn size(&self) -> usize {
        self.len()
    }

    fn has(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn elements(&self) -> Self::Elements<'_> {
        self.iter()
    }
}

impl<T, S> SetLike<T> for std::collections::HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    type Elements<'a> = std_hash_set::Iter<'a, T> where Self: 'a, T: 'a;

    fn size(&self) -> usize {
        self.len()
    }

    fn has(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn elements(&self) -> Self::Elements<'_> {
        self.iter()
    }
}

impl<T: Ord> SetLike<T> for BTreeSet<T> {
    type Elements<'a> = btree_set::Iter<'a, T> where Self: 'a, T: 'a;

    fn size(&self) -> usize {
        self.len()
    }

    fn has(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn elements(&self) -> Self::Elements<'_> {
        self.iter()
    }
}

/// A read-only view of a set.
///
/// A `ReadonlySet` wraps a shared reference to a backing [`HashSet`] without copying it. It exposes
/// lookups, iteration, and set algebra, but nothing that can add or remove elements. This is how a
/// [`SymmetricMultiMap`] hands out the associates of an element without letting callers break its
/// symmetry.
///
/// Since the view borrows its backing set, the set can not be changed for as long as the view is
/// alive. Use [`to_set`] to keep a copy of the elements around past that point.
///
/// # Examples
/// Elements can't be added through a view:
/// ```compile_fail
/// use symmetric_multimap::SymmetricMultiMap;
///
/// let mut map: SymmetricMultiMap<u64> = SymmetricMultiMap::new();
/// map.set(1, 2);
/// map.get(&1).unwrap().insert(3);
/// ```
///
/// Nor can the backing set be borrowed mutably through one:
/// ```compile_fail
/// use hashbrown::HashSet;
/// use symmetric_multimap::SymmetricMultiMap;
///
/// let mut map: SymmetricMultiMap<u64> = SymmetricMultiMap::new();
/// map.set(1, 2);
/// let view = map.get(&1).unwrap();
/// let backing: &mut HashSet<u64> = &mut *view;
/// backing.clear();
/// ```
///
/// And the map can't change while a view is held:
/// ```compile_fail
/// use symmetric_multimap::SymmetricMultiMap;
///
/// let mut map: SymmetricMultiMap<u64> = SymmetricMultiMap::new();
/// map.set(1, 2);
/// let view = map.get(&1).unwrap();
/// map.set(1, 3);
/// assert_eq!(view.len(), 1);
/// ```
///
/// [`SymmetricMultiMap`]: crate::SymmetricMultiMap
/// [`to_set`]: ReadonlySet::to_set
pub struct ReadonlySet<'a, T, S = DefaultHashBuilder> {
    set: Option<&'a HashSet<T, S>>,
}

impl<'a, T, S> ReadonlySet<'a, T, S> {
    /// Creates a view over the given set
    ///
    /// # Examples
    /// ```rust
    /// use hashbrown::HashSet;
    /// use symmetric_multimap::ReadonlySet;
    ///
    /// let set: HashSet<u64> = (0..5).collect();
    /// let view = ReadonlySet::new(&set);
    /// assert_eq!(view.len(), 5);
    /// assert!(view.contains(&3));
    /// ```
    #[inline]
    pub const fn new(set: &'a HashSet<T, S>) -> Self {
        Self { set: Some(set) }
    }

    /// Creates a view that contains nothing
    #[inline]
    pub const fn empty() -> Self {
        Self { set: None }
    }

    /// Returns the number of elements in the set
    pub fn len(&self) -> usize {
        self.set.map_or(0, |set| set.len())
    }

    /// Returns `true` if the set has no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the elements of the set in the backing set's order
    pub fn iter(&self) -> SetIter<'a, T> {
        SetIter {
            inner: self.set.map(|set| set.iter()),
        }
    }

    /// Same as [`iter`](ReadonlySet::iter). Sets use their elements as keys.
    pub fn keys(&self) -> SetIter<'a, T> {
        self.iter()
    }

    /// Same as [`iter`](ReadonlySet::iter). Sets use their elements as values.
    pub fn values(&self) -> SetIter<'a, T> {
        self.iter()
    }

    /// Returns an iterator that yields every element paired with itself
    pub fn entries(&self) -> Entries<'a, T> {
        Entries { iter: self.iter() }
    }

    /// Calls the given closure on every element of the set
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&'a T),
    {
        self.iter().for_each(f)
    }
}

impl<'a, T, S> ReadonlySet<'a, T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Returns `true` if the set contains the given element
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.set.map_or(false, |set| set.contains(value))
    }

    /// Returns `true` if every element of this set is in `other`
    pub fn is_subset_of<O>(&self, other: &O) -> bool
    where
        O: SetLike<T> + ?Sized,
    {
        self.len() <= other.size() && self.iter().all(|value| other.has(value))
    }

    /// Returns `true` if every element of `other` is in this set
    pub fn is_superset_of<O>(&self, other: &O) -> bool
    where
        O: SetLike<T> + ?Sized,
    {
        other.size() <= self.len() && other.elements().all(|value| self.contains(value))
    }

    /// Returns `true` if this set and `other` have no elements in common
    pub fn is_disjoint_from<O>(&self, other: &O) -> bool
    where
        O: SetLike<T> + ?Sized,
    {
        if self.len() <= other.size() {
            self.iter().all(|value| !other.has(value))
        } else {
            other.elements().all(|value| !self.contains(value))
        }
    }
}

impl<'a, T, S> ReadonlySet<'a, T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    /// Copies the elements of the view into a new, independent set
    ///
    /// # Examples
    /// ```rust
    /// use symmetric_multimap::SymmetricMultiMap;
    ///
    /// let mut map = SymmetricMultiMap::new();
    /// map.set("a", "b");
    /// let snapshot = map.get("a").unwrap().to_set();
    /// map.set("a", "c");
    /// assert_eq!(snapshot.len(), 1);
    /// assert_eq!(map.get("a").unwrap().len(), 2);
    /// ```
    pub fn to_set(&self) -> HashSet<T, S> {
        let mut digest = self.new_set(self.len());
        digest.extend(self.iter().cloned());
        digest
    }

    /// Returns a new set with the elements that are in this set, `other`, or both
    pub fn union<O>(&self, other: &O) -> HashSet<T, S>
    where
        O: SetLike<T> + ?Sized,
    {
        let mut digest = self.to_set();
        digest.extend(other.elements().cloned());
        digest
    }

    /// Returns a new set with the elements that are in both this set and `other`
    pub fn intersection<O>(&self, other: &O) -> HashSet<T, S>
    where
        O: SetLike<T> + ?Sized,
    {
        let mut digest = self.new_set(0);
        if self.len() <= other.size() {
            digest.extend(self.iter().filter(|value| other.has(value)).cloned());
        } else {
            digest.extend(other.elements().filter(|value| self.contains(*value)).cloned());
        }
        digest
    }

    /// Returns a new set with the elements of this set that are not in `other`
    pub fn difference<O>(&self, other: &O) -> HashSet<T, S>
    where
        O: SetLike<T> + ?Sized,
    {
        let mut digest = self.new_set(0);
        digest.extend(self.iter().filter(|value| !other.has(value)).cloned());
        digest
    }

    /// Returns a new set with the elements that are in exactly one of this set and `other`
    pub fn symmetric_difference<O>(&self, other: &O) -> HashSet<T, S>
    where
        O: SetLike<T> + ?Sized,
    {
        let mut digest = self.difference(other);
        digest.extend(other.elements().filter(|value| !self.contains(*value)).cloned());
        digest
    }

    fn new_set(&self, capacity: usize) -> HashSet<T, S> {
        // Results share the hasher of the backing set when there is one
        let hash_builder = match self.set {
            Some(set) => set.hasher().clone(),
            None => S::default(),
        };
        HashSet::with_capacity_and_hasher(capacity, hash_builder)
    }
}

impl<'s, T, S> SetLike<T> for ReadonlySet<'s, T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    type Elements<'a> = SetIter<'a, T> where Self: 'a, T: 'a;

    fn size(&self) -> usize {
        self.len()
    }

    fn has(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn elements(&self) -> Self::Elements<'_> {
        self.iter()
    }
}

impl<'a, T, S> From<&'a HashSet<T, S>> for ReadonlySet<'a, T, S> {
    fn from(set: &'a HashSet<T, S>) -> Self {
        Self::new(set)
    }
}

impl<T, S> Default for ReadonlySet<'_, T, S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, S> Clone for ReadonlySet<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S> Copy for ReadonlySet<'_, T, S> {}

impl<T, S> fmt::Debug for ReadonlySet<'_, T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ReadonlySet({}) ", self.len())?;
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'b, T, S> PartialEq<ReadonlySet<'b, T, S>> for ReadonlySet<'_, T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &ReadonlySet<'b, T, S>) -> bool {
        self.len() == other.len() && self.iter().all(|value| other.contains(value))
    }
}

impl<T, S> PartialEq<HashSet<T, S>> for ReadonlySet<'_, T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &HashSet<T, S>) -> bool {
        self.len() == other.len() && self.iter().all(|value| other.contains(value))
    }
}

impl<T, S> Eq for ReadonlySet<'_, T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

impl<'a, T, S> IntoIterator for ReadonlySet<'a, T, S> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, S> IntoIterator for &ReadonlySet<'a, T, S> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the elements of a `ReadonlySet`.
pub struct SetIter<'a, T> {
    inner: Option<hash_set::Iter<'a, T>>,
}

impl<T> Clone for SetIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for SetIter<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for SetIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(iter) => iter.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl<T> ExactSizeIterator for SetIter<'_, T> {
    fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |iter| iter.len())
    }
}

impl<T> FusedIterator for SetIter<'_, T> {}

/// An iterator over the elements of a `ReadonlySet`, each paired with itself.
pub struct Entries<'a, T> {
    iter: SetIter<'a, T>,
}

impl<T> Clone for Entries<'_, T> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<T> fmt::Debug for Entries<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (&'a T, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|value| (value, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> ExactSizeIterator for Entries<'_, T> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T> FusedIterator for Entries<'_, T> {}
