use core::borrow::Borrow;
use std::{
    fmt,
    hash::{BuildHasher, Hash},
    iter::FusedIterator,
};

use hashbrown::{
    hash_map::{self, DefaultHashBuilder},
    hash_set, HashMap, HashSet,
};
use log::warn;

use crate::readonly_set::ReadonlySet;

/// A hash map where every association can be looked up from either side.
///
/// Inserting the pair `(a, b)` records `b` as an associate of `a` and `a` as an associate of `b`.
/// Looking up either element returns a [`ReadonlySet`] of everything it is associated with. Keys
/// and values share a single namespace, so an element can be the key of one call and the value of
/// another. If two different kinds of things need to be associated, use an enum as the element type.
///
/// Internally, the map is a single [`HashMap`] from each element to the set of its associates. The
/// map upholds a few invariants:
///  - if `b` is an associate of `a`, then `a` is an associate of `b`
///  - no element is stored with an empty set of associates; removing the last association of an
///  element removes the element
///  - [`len`] is the number of elements with at least one associate, not the number of pairs
///
/// As with other hashed collections, it is a logic error for an element to be modified in such a
/// way that its hash or its equality changes while it is in the map.
///
/// [`len`]: SymmetricMultiMap::len
pub struct SymmetricMultiMap<T, St = DefaultHashBuilder> {
    map: HashMap<T, HashSet<T, St>, St>,
}

impl<T> SymmetricMultiMap<T, DefaultHashBuilder> {
    /// Creates an empty SymmetricMultiMap
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty SymmetricMultiMap with room for at least `capacity` elements
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<T, S> SymmetricMultiMap<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    /// Associates two elements with each other and returns the map so calls can be chained.
    ///
    /// Setting a pair that is already associated changes nothing.
    ///
    /// # Examples
    /// ```rust
    /// use symmetric_multimap::SymmetricMultiMap;
    ///
    /// let mut map = SymmetricMultiMap::new();
    /// map.set("tea", "cup").set("coffee", "cup");
    /// assert_eq!(map.len(), 3);
    /// assert!(map.get("cup").unwrap().contains("tea"));
    /// assert!(map.get("cup").unwrap().contains("coffee"));
    /// ```
    pub fn set(&mut self, key: T, value: T) -> &mut Self {
        self.insert(key, value);
        self
    }

    /// Associates two elements with each other.
    ///
    /// Returns `true` if the pair was not already associated. An element may be associated with
    /// itself, in which case it is its own (single) associate.
    pub fn insert(&mut self, key: T, value: T) -> bool {
        if key == value {
            return self.link(key, value);
        }
        let forward = self.link(key.clone(), value.clone());
        let backward = self.link(value, key);
        if forward != backward {
            warn!("Association was only recorded in one direction before insertion");
            debug_assert!(false, "SymmetricMultiMap lost its symmetry");
        }
        forward || backward
    }

    fn link(&mut self, from: T, to: T) -> bool {
        if let Some(associates) = self.map.get_mut(&from) {
            return associates.insert(to);
        }
        let mut associates = HashSet::with_capacity_and_hasher(1, self.map.hasher().clone());
        associates.insert(to);
        self.map.insert(from, associates);
        true
    }
}

impl<T, S> SymmetricMultiMap<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Returns a read-only view of the associates of the given element, or `None` if the element
    /// has no associates.
    ///
    /// The view borrows the map, so the map can't be changed while the view is held. Use
    /// [`ReadonlySet::to_set`] to keep a copy.
    pub fn get<Q>(&self, key: &Q) -> Option<ReadonlySet<'_, T, S>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).map(ReadonlySet::new)
    }

    /// Determines if the element has at least one associate
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Determines if two elements are associated with one another
    pub fn are_associated<Q>(&self, key: &Q, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map
            .get(key)
            .map_or(false, |associates| associates.contains(value))
    }

    /// Removes either a single association or an element and all of its associations.
    ///
    /// With a `value`, this is [`remove_pair`]. Without one, this is [`remove`].
    ///
    /// [`remove_pair`]: SymmetricMultiMap::remove_pair
    /// [`remove`]: SymmetricMultiMap::remove
    pub fn delete<Q>(&mut self, key: &Q, value: Option<&Q>) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match value {
            Some(value) => self.remove_pair(key, value),
            None => self.remove(key),
        }
    }

    /// Removes the association between two elements.
    ///
    /// Either element is removed from the map if this was its last association. Returns `true`
    /// only if the association was found in both directions.
    ///
    /// # Examples
    /// ```rust
    /// use symmetric_multimap::SymmetricMultiMap;
    ///
    /// let mut map = SymmetricMultiMap::new();
    /// map.set('a', 'b').set('a', 'c');
    /// assert!(map.remove_pair(&'a', &'b'));
    /// assert!(map.contains_key(&'a'));
    /// assert!(!map.contains_key(&'b'));
    /// assert!(!map.remove_pair(&'a', &'b'));
    /// ```
    pub fn remove_pair<Q>(&mut self, key: &Q, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let forward = self.unlink(key, value);
        if key == value {
            return forward;
        }
        let backward = self.unlink(value, key);
        if forward != backward {
            warn!("Association was only recorded in one direction before removal");
            debug_assert!(false, "SymmetricMultiMap lost its symmetry");
        }
        forward && backward
    }

    /// Removes an element and every association it is part of.
    ///
    /// Associates that are left without any associations are removed too. Returns `true` if the
    /// element was in the map.
    ///
    /// # Examples
    /// ```rust
    /// use symmetric_multimap::SymmetricMultiMap;
    ///
    /// let mut map = SymmetricMultiMap::new();
    /// map.set(1, 2).set(1, 3).set(3, 4);
    /// assert!(map.remove(&1));
    /// assert!(!map.contains_key(&2));
    /// assert!(map.are_associated(&3, &4));
    /// assert_eq!(map.len(), 2);
    /// assert!(!map.remove(&1));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Removes an element and every association it is part of, returning the element's former
    /// associates.
    pub fn take<Q>(&mut self, key: &Q) -> Option<HashSet<T, S>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let associates = self.map.remove(key)?;
        for associate in associates.iter() {
            // Self associations went with the entry itself
            if <T as Borrow<Q>>::borrow(associate) == key {
                continue;
            }
            let found = match self.map.get_mut::<T>(associate) {
                Some(reverse) => {
                    let found = reverse.remove(key);
                    if reverse.is_empty() {
                        self.map.remove::<T>(associate);
                    }
                    found
                }
                None => false,
            };
            if !found {
                warn!("Associate was missing its reverse association during removal");
                debug_assert!(false, "SymmetricMultiMap lost its symmetry");
            }
        }
        Some(associates)
    }

    // Removes one direction of an association, dropping `from` if nothing is left
    fn unlink<Q>(&mut self, from: &Q, to: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let associates = match self.map.get_mut(from) {
            Some(associates) => associates,
            None => return false,
        };
        let found = associates.remove(to);
        if associates.is_empty() {
            self.map.remove(from);
        }
        found
    }

    /// Returns an iterator over each association exactly once.
    ///
    /// The map stores every pair in both directions; this yields `(a, b)` or `(b, a)` but not
    /// both. Self associations are yielded once as `(a, a)`.
    pub fn pairs(&self) -> Pairs<'_, T, S> {
        Pairs {
            entries: self.map.iter(),
            current: None,
            visited: HashSet::with_capacity(self.map.len()),
        }
    }
}

impl<T, S> SymmetricMultiMap<T, S> {
    /// Creates an empty SymmetricMultiMap that uses the given hasher
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            map: HashMap::with_hasher(hash_builder),
        }
    }

    /// Creates an empty SymmetricMultiMap that uses the given hasher and has room for at least
    /// `capacity` elements
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Returns a reference to the [`BuildHasher`] used by the map
    pub fn hasher(&self) -> &S {
        self.map.hasher()
    }

    /// Returns the number of elements the map can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Returns the number of elements that have at least one associate
    ///
    /// # Examples
    /// ```rust
    /// use symmetric_multimap::SymmetricMultiMap;
    ///
    /// let mut map = SymmetricMultiMap::new();
    /// map.set(1, 10);
    /// assert_eq!(map.len(), 2);
    /// map.set(1, 20);
    /// assert_eq!(map.len(), 3);
    /// ```
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no elements are in the map and false otherwise
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes all elements from the map while keeping the backing memory allocated for reuse
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns an iterator over every element and a view of its associates
    pub fn iter(&self) -> Iter<'_, T, S> {
        Iter {
            iter: self.map.iter(),
        }
    }

    /// Returns an iterator over every element in the map
    pub fn keys(&self) -> Keys<'_, T, S> {
        Keys {
            iter: self.map.keys(),
        }
    }

    /// Returns an iterator over views of the associates of every element, in the same order as
    /// [`iter`](SymmetricMultiMap::iter)
    pub fn values(&self) -> Values<'_, T, S> {
        Values {
            iter: self.map.values(),
        }
    }

    /// Calls the given closure with the associates of every element, the element, and the map
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(ReadonlySet<'_, T, S>, &T, &Self),
    {
        for (key, associates) in self.iter() {
            f(associates, key, self);
        }
    }
}

impl<T, S> Clone for SymmetricMultiMap<T, S>
where
    T: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<T, S> Default for SymmetricMultiMap<T, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<T, S> fmt::Debug for SymmetricMultiMap<T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_map().entries(self.iter()).finish()
    }
}

impl<T, S> PartialEq<SymmetricMultiMap<T, S>> for SymmetricMultiMap<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T, S> Eq for SymmetricMultiMap<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

impl<T, S> Extend<(T, T)> for SymmetricMultiMap<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    #[inline]
    fn extend<I: IntoIterator<Item = (T, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T> FromIterator<(T, T)> for SymmetricMultiMap<T>
where
    T: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        let mut digest = SymmetricMultiMap::default();
        digest.extend(iter);
        digest
    }
}

impl<'a, T, S> IntoIterator for &'a SymmetricMultiMap<T, S> {
    type Item = (&'a T, ReadonlySet<'a, T, S>);
    type IntoIter = Iter<'a, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the elements of a `SymmetricMultiMap` and their associates.
pub struct Iter<'a, T, S> {
    iter: hash_map::Iter<'a, T, HashSet<T, S>>,
}

impl<T, S> Clone for Iter<'_, T, S> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<T, S> fmt::Debug for Iter<'_, T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T, S> Iterator for Iter<'a, T, S> {
    type Item = (&'a T, ReadonlySet<'a, T, S>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (key, associates) = self.iter.next()?;
        Some((key, ReadonlySet::new(associates)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T, S> ExactSizeIterator for Iter<'_, T, S> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T, S> FusedIterator for Iter<'_, T, S> {}

/// An iterator over the elements of a `SymmetricMultiMap`.
pub struct Keys<'a, T, S> {
    iter: hash_map::Keys<'a, T, HashSet<T, S>>,
}

impl<T, S> Clone for Keys<'_, T, S> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<T, S> fmt::Debug for Keys<'_, T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T, S> Iterator for Keys<'a, T, S> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T, S> ExactSizeIterator for Keys<'_, T, S> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T, S> FusedIterator for Keys<'_, T, S> {}

/// An iterator over the associates of every element of a `SymmetricMultiMap`.
pub struct Values<'a, T, S> {
    iter: hash_map::Values<'a, T, HashSet<T, S>>,
}

impl<T, S> Clone for Values<'_, T, S> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<T, S> fmt::Debug for Values<'_, T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T, S> Iterator for Values<'a, T, S> {
    type Item = ReadonlySet<'a, T, S>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(ReadonlySet::new)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T, S> ExactSizeIterator for Values<'_, T, S> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T, S> FusedIterator for Values<'_, T, S> {}

/// An iterator over the associations of a `SymmetricMultiMap`, yielding each pair once.
pub struct Pairs<'a, T, S> {
    entries: hash_map::Iter<'a, T, HashSet<T, S>>,
    current: Option<(&'a T, hash_set::Iter<'a, T>)>,
    // Elements whose associations have all been yielded
    visited: HashSet<&'a T>,
}

impl<T, S> Clone for Pairs<'_, T, S>
where
    T: Eq + Hash,
{
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            current: self.current.clone(),
            visited: self.visited.clone(),
        }
    }
}

impl<T, S> fmt::Debug for Pairs<'_, T, S>
where
    T: Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T, S> Iterator for Pairs<'a, T, S>
where
    T: Eq + Hash,
{
    type Item = (&'a T, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, associates)) = self.current.as_mut() {
                let key: &'a T = *key;
                let visited = &self.visited;
                if let Some(other) = associates.find(|other| !visited.contains(other)) {
                    return Some((key, other));
                }
                self.visited.insert(key);
                self.current = None;
            }
            let (key, associates) = self.entries.next()?;
            self.current = Some((key, associates.iter()));
        }
    }
}

impl<T, S> FusedIterator for Pairs<'_, T, S> where T: Eq + Hash {}
