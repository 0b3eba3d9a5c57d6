//! A skip list is a way of storing an ordered set of elements such that they
//! can be efficiently searched, inserted and removed, all in `O(log(n))` on
//! average, without the rebalancing machinery of a balanced tree.
//!
//! Conceptually, a skip list resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each node `[x]` holds links to nodes further along the list, allowing
//! a search to skip ahead. The lowest level contains every element in
//! ascending order; each higher level contains a random subset of the level
//! below it, as drawn by a [`LevelGenerator`].
//!
//! The set is keyed by [`Ord`], which **must** be a strict total order:
//! well-defined, anti-symmetric and transitive. A misbehaving `Ord`
//! implementation will not cause memory unsafety, but the contents of the set
//! become unspecified.
//!
//! [`SkipSet`] is single-threaded: it performs no internal locking and is not
//! safe for concurrent mutation without external synchronisation.

pub mod level_generator;
mod skipnode;
mod skipset;

pub use crate::level_generator::LevelGenerator;
pub use crate::level_generator::geometric::{Geometric, GeometricError};
pub use crate::skipnode::{IntoIter, Iter};
pub use crate::skipset::SkipSet;
