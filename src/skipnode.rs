//! The nodes that make up the skip list, and the iterators that walk its
//! lowest level.

use std::marker::PhantomData;
use std::{iter, ptr};

/// Minimum levels required for a list of size n.
pub fn levels_required(n: usize) -> usize {
    if n == 0 {
        1
    } else {
        usize::BITS as usize - n.leading_zeros() as usize
    }
}

// ////////////////////////////////////////////////////////////////////////////
// SkipNode
// ////////////////////////////////////////////////////////////////////////////

/// `SkipNode`s make up the `SkipSet`. The set owns the head node (which has no
/// value) and each node has ownership of the next node through `links[0]`.
///
/// The node has a `level` which corresponds to how 'high' the node reaches.
///
/// A node of `level` n has (n + 1) links to later nodes, stored in a vector
/// sized exactly to the node's height; links at levels above 0 alias nodes
/// owned further down the level-0 chain.
#[derive(Debug)]
pub struct SkipNode<T> {
    // value is never None, with the sole exception being the head node.
    pub value: Option<T>,
    // How high the node reaches; links.len() is always level + 1.
    pub level: usize,
    // Links to the next node at the respective level. links[0] stores a
    // pointer to the next node, which will have to be dropped.
    pub links: Vec<*mut SkipNode<T>>,
    // Owns self.links[0]
    _phantom_link: PhantomData<SkipNode<T>>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> SkipNode<T> {
    /// Create a new head node with `total_levels` forward slots.
    pub fn head(total_levels: usize) -> Self {
        SkipNode {
            value: None,
            level: total_levels - 1,
            links: iter::repeat(ptr::null_mut()).take(total_levels).collect(),
            _phantom_link: PhantomData,
        }
    }

    /// Create a new `SkipNode` with the given value.
    /// All links default to null.
    pub fn new(value: T, level: usize) -> Self {
        SkipNode {
            value: Some(value),
            level,
            links: iter::repeat(ptr::null_mut()).take(level + 1).collect(),
            _phantom_link: PhantomData,
        }
    }

    /// Consumes the node returning the value it contains.
    pub fn into_inner(mut self) -> Option<T> {
        self.value.take()
    }

    /// Returns `true` if the node is a head node.
    pub fn is_head(&self) -> bool {
        self.value.is_none()
    }

    /// The next node on the lowest level.
    pub fn next_ref(&self) -> Option<&Self> {
        // SAFETY: all links either point to a live node or are null.
        unsafe { self.links[0].as_ref() }
    }

    /// The next node at the given level.
    pub fn next_at(&self, level: usize) -> Option<&Self> {
        // SAFETY: all links either point to a live node or are null.
        unsafe { self.links[level].as_ref() }
    }

    /// Takes ownership of the next node on the lowest level, detaching it
    /// from this one.
    ///
    /// # Safety
    ///
    /// The caller must make sure no link at level 1 or greater is left
    /// dangling.
    pub unsafe fn take_tail(&mut self) -> Option<Box<Self>> {
        let next = self.links[0];
        if next.is_null() {
            None
        } else {
            self.links[0] = ptr::null_mut();
            // SAFETY: a non-null level-0 link is always a pointer produced by
            // `Box::into_raw` and owned by this node.
            Some(unsafe { Box::from_raw(next) })
        }
    }

    /// Replace the next node on the lowest level, returning the old one.
    ///
    /// # Safety
    ///
    /// The caller must make sure all links at level 1 or greater are fixed.
    pub unsafe fn replace_tail(&mut self, new_next: Box<Self>) -> Option<Box<Self>> {
        // SAFETY: upheld by the caller.
        let old_next = unsafe { self.take_tail() };
        self.links[0] = Box::into_raw(new_next);
        old_next
    }
}

impl<T> Drop for SkipNode<T> {
    fn drop(&mut self) {
        // Walk the owned level-0 chain iteratively so that dropping a long
        // list does not overflow the stack. Links above level 0 may dangle
        // during the walk; they are never followed.
        unsafe {
            let mut node = self.take_tail();
            while let Some(mut node_inner) = node {
                node = node_inner.take_tail();
            }
        }
    }
}

// /////////////////////////////////
// Iterators
// /////////////////////////////////
// Iteration only ever follows the level-0 chain; the higher levels are a
// search accelerator, not an iteration structure.

/// Iterator by reference over a skip list, in ascending order.
pub struct Iter<'a, T> {
    pub(crate) node: Option<&'a SkipNode<T>>,
    pub(crate) size: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current_node = self.node?;
        self.node = current_node.next_ref();
        self.size -= 1;
        current_node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

/// Consuming iterator over a skip list, in ascending order.
pub struct IntoIter<T> {
    pub(crate) first: Option<Box<SkipNode<T>>>,
    pub(crate) size: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let mut popped_node = self.first.take()?;
        self.size -= 1;
        // SAFETY: the chain is detached from any set; links above level 0 are
        // never followed here, and the remaining tail is owned by the
        // iterator from now on.
        self.first = unsafe { popped_node.take_tail() };
        popped_node.into_inner()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::{IntoIter, SkipNode, levels_required};

    #[test]
    fn test_levels_required() {
        assert_eq!(levels_required(0), 1);
        assert_eq!(levels_required(1), 1);
        assert_eq!(levels_required(2), 2);
        assert_eq!(levels_required(3), 2);
        assert_eq!(levels_required(1023), 10);
        assert_eq!(levels_required(1024), 11);
    }

    #[test]
    fn head_shape() {
        let head = SkipNode::<i32>::head(16);
        assert!(head.is_head());
        assert_eq!(head.level, 15);
        assert_eq!(head.links.len(), 16);
        assert!(head.links.iter().all(|link| link.is_null()));
    }

    #[test]
    fn node_shape() {
        let node = SkipNode::new(7, 3);
        assert!(!node.is_head());
        assert_eq!(node.level, 3);
        assert_eq!(node.links.len(), 4);
        assert_eq!(node.into_inner(), Some(7));
    }

    /// Build a level-0 chain off a head node.
    fn chain(values: &[i32]) -> SkipNode<i32> {
        let mut head = SkipNode::head(1);
        let mut tail: *mut SkipNode<i32> = &mut head;
        for &value in values {
            let node = Box::into_raw(Box::new(SkipNode::new(value, 0)));
            unsafe {
                (&mut (*tail).links)[0] = node;
            }
            tail = node;
        }
        head
    }

    #[test]
    fn take_and_replace_tail() {
        let mut head = chain(&[1, 2, 3]);

        let mut first = unsafe { head.take_tail() }.unwrap();
        assert_eq!(first.value, Some(1));
        assert!(head.links[0].is_null());

        // Reattach the rest of the chain, then put a different node in front.
        let rest = unsafe { first.take_tail() }.unwrap();
        assert!(unsafe { head.replace_tail(rest) }.is_none());
        let old = unsafe { head.replace_tail(Box::new(SkipNode::new(0, 0))) }.unwrap();
        assert_eq!(old.value, Some(2));

        assert_eq!(
            head.next_ref().and_then(|node| node.value.as_ref()),
            Some(&0)
        );
    }

    /// Increments a shared counter when dropped.
    struct DropTally(Rc<Cell<usize>>);

    impl Drop for DropTally {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn drop_frees_whole_chain() {
        let drops = Rc::new(Cell::new(0));
        {
            let mut head = SkipNode::head(1);
            let mut tail: *mut SkipNode<DropTally> = &mut head;
            for _ in 0..100 {
                let node =
                    Box::into_raw(Box::new(SkipNode::new(DropTally(Rc::clone(&drops)), 0)));
                unsafe {
                    (&mut (*tail).links)[0] = node;
                }
                tail = node;
            }
        }
        assert_eq!(drops.get(), 100);
    }

    #[test]
    fn into_iter_drains_and_drops() {
        let mut head = chain(&[1, 2, 3, 4]);
        let first = unsafe { head.take_tail() };
        let mut iter = IntoIter { first, size: 4 };

        assert_eq!(iter.size_hint(), (4, Some(4)));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), Some(2));
        // Dropping the iterator frees the unvisited tail.
        drop(iter);
    }
}
