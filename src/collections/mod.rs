mod indexed_heap;

use std::hash::BuildHasherDefault;
use indexmap::IndexMap;
use rustc_hash::FxHasher;

pub use indexed_heap::IndexedMinHeap;
pub use rustc_hash::FxHashMap;


/// Use indexmap for fast lookups and rustc_hash for fast hashing
/// Insertion order is kept, which keeps neighbor iteration deterministic
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;
