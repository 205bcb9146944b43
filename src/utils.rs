use fnv::FnvHasher;
use std::{
    collections::HashSet,
    hash::{BuildHasherDefault, Hash},
};

pub type FnvHashSet<T> = HashSet<T, BuildHasherDefault<FnvHasher>>;

/// Construct a hash set with the specified capacity. The hashing algorithm is
/// much faster than the default on short keys such as grid coordinates, at the
/// cost of being less robust against crafted key collisions.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashSet::<T, _>::with_capacity_and_hasher(capacity, fnv)
}
