use std::hash::BuildHasherDefault;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;


/// Use indexmap for fast lookups and rustc_hash for fast hashing
/// Iteration follows insertion order, so run output is reproducible
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Set flavor of the above - used for the expanded node set
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;
