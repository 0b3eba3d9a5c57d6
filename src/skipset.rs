//! An ordered set backed by a skip list.

use std::{cmp, cmp::Ordering, fmt, hash, hash::Hash, iter};

use crate::level_generator::LevelGenerator;
use crate::level_generator::geometric::{Geometric, GeometricError};
use crate::skipnode::{IntoIter, Iter, SkipNode, levels_required};

// ////////////////////////////////////////////////////////////////////////////
// SkipSet
// ////////////////////////////////////////////////////////////////////////////

/// An ordered set of unique elements, stored as a skip list.
///
/// The set provides average `O(log(n))` insertion, removal and membership
/// queries, and iterates its elements in ascending order. Duplicate
/// insertions and removals of absent elements are ordinary `false` outcomes,
/// not errors.
///
/// Elements are ordered by their [`Ord`] implementation, which **must** be a
/// strict total order. A misbehaving `Ord` will not cause memory unsafety,
/// but the contents of the set become unspecified.
pub struct SkipSet<T> {
    // The sentinel head; it holds no value and has a forward slot for every
    // possible level.
    head: Box<SkipNode<T>>,
    len: usize,
    // Number of levels currently populated by at least one node, 0 when the
    // set is empty.
    height: usize,
    level_generator: Geometric,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> SkipSet<T> {
    /// Create a new skip set with the default of 16 levels and a promotion
    /// probability of 0.5.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<i64> = SkipSet::new();
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        let lg = Geometric::new(16, 1.0 / 2.0)
            .expect("the default level generator parameters are valid");
        Self::with_generator(lg)
    }

    /// Constructs a new, empty skip set with the optimal number of levels for
    /// the intended capacity, ensuring that only *a few* nodes occupy the
    /// highest level.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::with_capacity(100);
    /// set.extend(0..100);
    /// ```
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let lg = Geometric::new(levels_required(capacity), 1.0 / 2.0)
            .expect("levels_required is always at least 1");
        Self::with_generator(lg)
    }

    /// Create a new skip set with `levels` levels and promotion probability
    /// `p`.
    ///
    /// # Errors
    ///
    /// Fails if `levels` is zero or `p` does not lie strictly between 0
    /// and 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::with_levels(8, 0.25)?;
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// # Ok::<(), skipset::GeometricError>(())
    /// ```
    #[inline]
    pub fn with_levels(levels: usize, p: f64) -> Result<Self, GeometricError> {
        let lg = Geometric::new(levels, p)?;
        Ok(Self::with_generator(lg))
    }

    fn with_generator(lg: Geometric) -> Self {
        SkipSet {
            head: Box::new(SkipNode::head(lg.total())),
            len: 0,
            height: 0,
            level_generator: lg,
        }
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// set.extend(0..10);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
        self.height = 0;
        // Dropping the old head frees the whole level-0 chain.
        *self.head = SkipNode::head(self.level_generator.total());
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// set.extend(0..10);
    /// assert_eq!(set.len(), 10);
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// assert!(set.is_empty());
    ///
    /// set.insert(1);
    /// assert!(!set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Provides a reference to the smallest element, or `None` if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// assert!(set.front().is_none());
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.front(), Some(&1));
    /// ```
    #[inline]
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.head.next_ref().and_then(|node| node.value.as_ref())
    }

    /// Creates an iterator over the elements of the set, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// set.extend(0..10);
    /// for value in set.iter() {
    ///     println!("Value: {value}");
    /// }
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            node: self.head.next_ref(),
            size: self.len,
        }
    }
}

impl<T> SkipSet<T>
where
    T: Ord,
{
    /// Insert the value into the set.
    ///
    /// Returns `true` if the value was newly added, and `false` if an equal
    /// value was already present; the set never stores duplicates and the
    /// rejected value is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    ///
    /// assert!(set.insert(5));
    /// assert!(!set.insert(5));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        unsafe {
            let head: *mut SkipNode<T> = self.head.as_mut();
            // The rightmost node at each level whose forward link will need
            // to be inspected or rewritten. Levels above the current height
            // fall back to the head.
            let mut update_path: Vec<*mut SkipNode<T>> =
                vec![head; self.level_generator.total()];
            let mut node = head;
            for level in (0..self.height).rev() {
                loop {
                    let next = (&(*node).links)[level];
                    match next.as_ref() {
                        Some(next_node)
                            if next_node.value.as_ref().is_some_and(|v| v < &value) =>
                        {
                            node = next;
                        }
                        _ => break,
                    }
                }
                update_path[level] = node;
            }

            // The candidate match is the level-0 successor of the final
            // position.
            if let Some(candidate) = (&(*node).links)[0].as_ref() {
                if candidate.value.as_ref().is_some_and(|v| v == &value) {
                    return false;
                }
            }

            let level = self.level_generator.level();
            if level >= self.height {
                self.height = level + 1;
            }

            let new_node = Box::into_raw(Box::new(SkipNode::new(value, level)));
            for (i, &path_node) in update_path.iter().enumerate().take(level + 1) {
                (&mut (*new_node).links)[i] = (&(*path_node).links)[i];
                (&mut (*path_node).links)[i] = new_node;
            }
        }
        self.len += 1;
        true
    }

    /// Returns `true` if the value is contained in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// set.extend(0..10);
    /// assert!(set.contains(&4));
    /// assert!(!set.contains(&15));
    /// ```
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Returns a reference to the element equal to the given value, or `None`
    /// if there is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// set.extend(0..10);
    /// assert_eq!(set.get(&4), Some(&4));
    /// assert!(set.get(&15).is_none());
    /// ```
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        let mut node: &SkipNode<T> = self.head.as_ref();
        for level in (0..self.height).rev() {
            while let Some(next) = node.next_at(level) {
                match next.value.as_ref() {
                    Some(v) if v < value => node = next,
                    _ => break,
                }
            }
        }
        node.next_ref()
            .and_then(|next| next.value.as_ref())
            .filter(|found| *found == value)
    }

    /// Removes the element equal to the given value, if any.
    ///
    /// Returns `true` if an element was removed, and `false` if no equal
    /// element was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// set.extend(0..10);
    /// assert!(set.remove(&4));
    /// assert!(!set.remove(&4));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the element equal to the given value, or `None` if
    /// there is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// set.extend(0..10);
    /// assert_eq!(set.take(&4), Some(4));
    /// assert!(set.take(&4).is_none());
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        unsafe {
            let head: *mut SkipNode<T> = self.head.as_mut();
            let mut update_path: Vec<*mut SkipNode<T>> = vec![head; self.height];
            let mut node = head;
            for level in (0..self.height).rev() {
                loop {
                    let next = (&(*node).links)[level];
                    match next.as_ref() {
                        Some(next_node)
                            if next_node.value.as_ref().is_some_and(|v| v < value) =>
                        {
                            node = next;
                        }
                        _ => break,
                    }
                }
                update_path[level] = node;
            }

            let target = (&(*node).links)[0];
            match target.as_ref() {
                Some(found) if found.value.as_ref().is_some_and(|v| v == value) => {}
                _ => return None,
            }

            // A node present at some level is present at every lower level,
            // so unlinking across exactly the node's own height suffices.
            for level in 1..=(*target).level {
                (&mut (*update_path[level]).links)[level] = (&(*target).links)[level];
            }
            // Level 0 transfers ownership of the removed node out of the
            // chain.
            let mut removed = (*update_path[0]).take_tail()?;
            if let Some(new_tail) = removed.take_tail() {
                (*update_path[0]).replace_tail(new_tail);
            }

            self.len -= 1;
            while self.height > 0 && self.head.links[self.height - 1].is_null() {
                self.height -= 1;
            }
            removed.into_inner()
        }
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<T> SkipSet<T>
where
    T: Ord,
{
    /// Checks the integrity of the set.
    #[allow(dead_code)]
    fn check(&self) {
        assert_eq!(self.head.links.len(), self.level_generator.total());
        assert!(self.head.is_head());

        // The level-0 chain holds every element, strictly ascending.
        let mut len = 0;
        let mut max_height = 0;
        let mut prev: Option<&T> = None;
        let mut node = self.head.next_ref();
        while let Some(n) = node {
            assert!(!n.is_head(), "only the head may hold no value");
            let value = n.value.as_ref();
            if let (Some(p), Some(v)) = (prev, value) {
                assert!(p < v, "the level-0 chain must be strictly ascending");
            }
            prev = value;
            assert!(n.level < self.level_generator.total());
            max_height = cmp::max(max_height, n.level + 1);
            len += 1;
            node = n.next_ref();
        }
        assert_eq!(len, self.len);
        assert_eq!(max_height, self.height);

        // Every higher level is a sorted chain of nodes tall enough to
        // appear there, and no populated level lies above the height.
        for level in 0..self.level_generator.total() {
            if level >= self.height {
                assert!(self.head.links[level].is_null());
                continue;
            }
            let mut prev: Option<&T> = None;
            let mut node = self.head.next_at(level);
            while let Some(n) = node {
                assert!(n.level >= level);
                let value = n.value.as_ref();
                if let (Some(p), Some(v)) = (prev, value) {
                    assert!(p < v);
                }
                prev = value;
                node = n.next_at(level);
            }
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

// SAFETY: the set owns its nodes exclusively; the raw links never alias
// across set instances, so the usual container rules apply.
unsafe impl<T: Send> Send for SkipSet<T> {}
unsafe impl<T: Sync> Sync for SkipSet<T> {}

impl<T> Default for SkipSet<T> {
    fn default() -> SkipSet<T> {
        SkipSet::new()
    }
}

/// This implementation of `PartialEq` only checks that the *elements* are
/// equal; it does not compare the node levels, which are randomized.
impl<A, B> PartialEq<SkipSet<B>> for SkipSet<A>
where
    A: PartialEq<B>,
{
    #[inline]
    fn eq(&self, other: &SkipSet<B>) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T> Eq for SkipSet<T> where T: Eq {}

impl<A, B> PartialOrd<SkipSet<B>> for SkipSet<A>
where
    A: PartialOrd<B>,
{
    #[inline]
    fn partial_cmp(&self, other: &SkipSet<B>) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T> Ord for SkipSet<T>
where
    T: Ord,
{
    #[inline]
    fn cmp(&self, other: &SkipSet<T>) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Ord> Extend<T> for SkipSet<T> {
    #[inline]
    fn extend<I: iter::IntoIterator<Item = T>>(&mut self, iterable: I) {
        for element in iterable {
            self.insert(element);
        }
    }
}

impl<T> fmt::Debug for SkipSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, entry) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{entry:?}")?;
        }
        write!(f, "]")
    }
}

impl<T> fmt::Display for SkipSet<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, entry) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{entry}")?;
        }
        write!(f, "]")
    }
}

impl<T> iter::IntoIterator for SkipSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let size = self.len;
        // SAFETY: the set is consumed; the detached chain is owned by the
        // iterator, and the emptied head is dropped normally.
        let first = unsafe { self.head.take_tail() };
        IntoIter { first, size }
    }
}

impl<'a, T> iter::IntoIterator for &'a SkipSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> iter::FromIterator<T> for SkipSet<T>
where
    T: Ord,
{
    #[inline]
    fn from_iter<I>(iter: I) -> SkipSet<T>
    where
        I: iter::IntoIterator<Item = T>,
    {
        let mut set = SkipSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Hash> Hash for SkipSet<T> {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for elt in self {
            elt.hash(state);
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
