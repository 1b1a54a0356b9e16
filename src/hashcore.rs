//! The dual-region open-addressing hash table shared by every map/set façade.
//!
//! Every live entry sits in one of two dense regions of a single set of
//! parallel arrays: the **lo-region** `[0, lo_size)`, whose entries carry an
//! explicit `links[]` successor, and the **hi-region** `[N - hi_size, N)`,
//! whose entries are always chain terminators. A bucket cell holds the
//! 1-based index of its chain head; walking `links[]` from that head visits
//! every entry in the bucket and always finishes in the hi-region.
//!
//! Both regions being dense means there is never an "is this slot live?"
//! test during iteration or resize: the occupied index set is exactly
//! `[0, lo_size) ∪ [N - hi_size, N)`.

use crate::capability::{KeyOps, RelocationSink};
use crate::error::{Error, ErrorKind, Result};
use crate::token::{self, INVALID, NULL_INDEX};

const INITIAL_CAPACITY: usize = 7;
const REHASH_CHAIN_THRESHOLD: usize = 100;
const SEED_INCREMENT: u64 = 0x9E37_79B9_7F4A_7C15;

#[inline]
fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3usize;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

fn next_prime(mut n: usize) -> usize {
    if n <= 2 {
        return 2;
    }
    if n % 2 == 0 {
        n += 1;
    }
    while !is_prime(n) {
        n += 2;
    }
    n
}

/// The dual-region hash table. `K`/`V` are the key/value column types;
/// `O` supplies hashing and equality for `K`; `S` is notified whenever a
/// live entry's physical index changes, so that a façade-owned external
/// value store (a `NullList`/`BitsList`) stays aligned with the table.
#[derive(Clone)]
pub struct HashCore<K, V, O, S = ()>
where
    O: KeyOps<K>,
    S: RelocationSink,
{
    ops: O,
    sink: S,
    cache_hash: bool,
    seed: u64,

    capacity: usize,
    buckets: Vec<u32>,
    keys: Vec<Option<K>>,
    values: Vec<Option<V>>,
    hash: Vec<i32>,
    links: Vec<i64>,
    lo_size: usize,
    hi_size: usize,
    version: u32,

    has_null_key: bool,
    null_value: Option<V>,
}

impl<K, V, O: KeyOps<K>> HashCore<K, V, O, ()> {
    /// Creates an empty table with no external relocation sink.
    pub fn new(ops: O, cache_hash: bool) -> Self {
        Self::with_sink(ops, (), cache_hash)
    }
}

impl<K, V, O, S> HashCore<K, V, O, S>
where
    O: KeyOps<K>,
    S: RelocationSink,
{
    /// Creates an empty table, notifying `sink` of every physical relocation.
    pub fn with_sink(ops: O, sink: S, cache_hash: bool) -> Self {
        Self {
            ops,
            sink,
            cache_hash,
            seed: 0,
            capacity: 0,
            buckets: Vec::new(),
            keys: Vec::new(),
            values: Vec::new(),
            hash: Vec::new(),
            links: Vec::new(),
            lo_size: 0,
            hi_size: 0,
            version: 0,
            has_null_key: false,
            null_value: None,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.lo_size + self.hi_size + usize::from(self.has_null_key)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Borrows the relocation sink, for façades that keep side data in it.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrows the relocation sink, for façades that keep side data
    /// in it (writes here are the façade's own concern; the core never
    /// mutates the sink except via `on_move`/`on_clear`/the resize hooks).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[inline]
    fn hash_of(&self, key: &K) -> i32 {
        self.ops.hash_key_seeded(key, self.seed)
    }

    #[inline]
    fn bucket_index(&self, h: i32) -> usize {
        ((h as i64 as u64 & 0x7FFF_FFFF) as usize) % self.buckets.len()
    }

    fn key_matches(&self, index: usize, key: &K, h: i32) -> bool {
        if self.cache_hash && self.hash[index] != h {
            return false;
        }
        match &self.keys[index] {
            Some(existing) => self.ops.keys_equal(existing, key),
            None => false,
        }
    }

    // ---- null key -----------------------------------------------------

    pub fn has_null_key(&self) -> bool {
        self.has_null_key
    }

    pub fn null_value(&self) -> Option<&V> {
        if self.has_null_key {
            self.null_value.as_ref()
        } else {
            None
        }
    }

    /// Inserts or overwrites the null-key entry. Returns whether it was new.
    pub fn put_null(&mut self, value: V) -> bool {
        let was_new = !self.has_null_key;
        self.has_null_key = true;
        self.null_value = Some(value);
        self.version = self.version.wrapping_add(1);
        was_new
    }

    /// Removes the null-key entry. Returns whether it was present.
    pub fn remove_null(&mut self) -> bool {
        let was_present = self.has_null_key;
        self.has_null_key = false;
        self.null_value = None;
        if was_present {
            self.version = self.version.wrapping_add(1);
        }
        was_present
    }

    // ---- initialization / growth ---------------------------------------

    fn ensure_initialized(&mut self) -> Result<()> {
        if self.capacity == 0 {
            self.resize(INITIAL_CAPACITY)?;
        }
        Ok(())
    }

    fn ensure_links_len(&mut self, needed: usize) {
        if self.links.len() < needed {
            let grown = (self.links.len() * 2).max(needed).max(4).min(self.capacity);
            self.links.resize(grown, -1);
        }
    }

    // ---- lookup ----------------------------------------------------------

    /// Returns the token for `key`, or [`token::INVALID`] if absent.
    pub fn token_of(&self, key: &K) -> Result<i64> {
        if self.capacity == 0 {
            return Ok(INVALID);
        }
        let h = self.hash_of(key);
        let b = self.bucket_index(h);
        let head_cell = self.buckets[b];
        if head_cell == 0 {
            return Ok(INVALID);
        }
        let mut current = (head_cell - 1) as usize;
        let mut steps = 0usize;
        loop {
            if self.key_matches(current, key, h) {
                return Ok(token::make_token(self.version, current as u32));
            }
            if current >= self.lo_size {
                return Ok(INVALID);
            }
            steps += 1;
            if steps > self.lo_size + 1 {
                return Err((
                    ErrorKind::ConcurrentModification,
                    "chain walk exceeded bound during lookup",
                )
                    .into());
            }
            current = self.links[current] as usize;
        }
    }

    pub fn contains(&self, key: &K) -> Result<bool> {
        Ok(self.token_of(key)? != INVALID)
    }

    pub fn get(&self, key: &K) -> Result<Option<&V>> {
        let t = self.token_of(key)?;
        if t == INVALID {
            return Ok(None);
        }
        let idx = token::token_index(t) as usize;
        Ok(self.values[idx].as_ref())
    }

    // ---- insertion ---------------------------------------------------

    /// Inserts or overwrites `key`/`value`. Returns whether `key` was new.
    pub fn put(&mut self, key: K, value: V) -> Result<bool> {
        self.ensure_initialized()?;
        if self.lo_size + self.hi_size == self.capacity {
            let new_cap = next_prime(self.capacity * 2);
            self.resize(new_cap)?;
        }

        let h = self.hash_of(&key);
        let b = self.bucket_index(h);
        let head_cell = self.buckets[b];

        if head_cell == 0 {
            let dst = self.capacity - 1 - self.hi_size;
            self.hi_size += 1;
            self.write_new_entry(dst, b, h, key, value);
            self.version = self.version.wrapping_add(1);
            return Ok(true);
        }

        let head = (head_cell - 1) as usize;
        let mut current = head;
        let mut steps = 0usize;
        loop {
            if self.key_matches(current, &key, h) {
                self.values[current] = Some(value);
                self.version = self.version.wrapping_add(1);
                return Ok(false);
            }
            if current >= self.lo_size {
                break;
            }
            steps += 1;
            if steps > self.lo_size + 1 {
                return Err((
                    ErrorKind::ConcurrentModification,
                    "chain walk exceeded bound during insert",
                )
                    .into());
            }
            current = self.links[current] as usize;
        }

        let dst = self.lo_size;
        self.lo_size += 1;
        self.ensure_links_len(self.lo_size);
        self.links[dst] = head as i64;
        self.write_new_entry(dst, b, h, key, value);
        self.version = self.version.wrapping_add(1);

        if steps > REHASH_CHAIN_THRESHOLD && self.ops.supports_rehash() {
            self.rehash_in_place()?;
        }
        Ok(true)
    }

    /// Inserts `key`/`value` only if `key` is absent. Returns whether it was inserted.
    pub fn try_put(&mut self, key: K, value: V) -> Result<bool> {
        if self.contains(&key)? {
            return Ok(false);
        }
        self.put(key, value)?;
        Ok(true)
    }

    fn write_new_entry(&mut self, dst: usize, bucket: usize, h: i32, key: K, value: V) {
        self.keys[dst] = Some(key);
        self.values[dst] = Some(value);
        if self.cache_hash {
            self.hash[dst] = h;
        }
        self.buckets[bucket] = (dst + 1) as u32;
    }

    /// Retriggers resolution of every entry's bucket using a freshly
    /// perturbed seed. Used when a chain grows past the pathological
    /// collision threshold for a key type that opted in.
    fn rehash_in_place(&mut self) -> Result<()> {
        self.seed = self.seed.wrapping_add(SEED_INCREMENT);
        self.resize(self.capacity)
    }

    // ---- removal / compaction -----------------------------------------

    /// Removes `key`. Returns whether it was present.
    pub fn remove(&mut self, key: &K) -> Result<bool> {
        if self.capacity == 0 {
            return Ok(false);
        }
        let h = self.hash_of(key);
        let b = self.bucket_index(h);
        let head_cell = self.buckets[b];
        if head_cell == 0 {
            return Ok(false);
        }
        let head = (head_cell - 1) as usize;

        if head >= self.lo_size {
            if !self.key_matches(head, key, h) {
                return Ok(false);
            }
            self.buckets[b] = 0;
            self.compact_hi(head)?;
            self.version = self.version.wrapping_add(1);
            return Ok(true);
        }

        let mut current = head;
        let mut pred: Option<usize> = None;
        let mut steps = 0usize;
        let victim = loop {
            if self.key_matches(current, key, h) {
                break Some(current);
            }
            if current >= self.lo_size {
                break None;
            }
            steps += 1;
            if steps > self.lo_size + 1 {
                return Err((
                    ErrorKind::ConcurrentModification,
                    "chain walk exceeded bound during remove",
                )
                    .into());
            }
            pred = Some(current);
            current = self.links[current] as usize;
        };

        let victim = match victim {
            Some(v) => v,
            None => return Ok(false),
        };

        let freed = if victim < self.lo_size {
            match pred {
                None => {
                    self.buckets[b] = (self.links[victim] + 1) as u32;
                }
                Some(p) => {
                    self.links[p] = self.links[victim];
                }
            }
            victim
        } else {
            let p = pred.expect("hi-region victim reached with no predecessor");
            self.move_entry(p, victim)?;
            p
        };

        self.compact_lo(freed)?;
        self.version = self.version.wrapping_add(1);
        Ok(true)
    }

    fn compact_lo(&mut self, freed: usize) -> Result<()> {
        let last = self.lo_size - 1;
        if freed != last {
            self.move_entry(last, freed)?;
        } else {
            self.clear_slot(freed);
        }
        self.lo_size -= 1;
        Ok(())
    }

    fn compact_hi(&mut self, freed: usize) -> Result<()> {
        let last = self.capacity - self.hi_size;
        if freed != last {
            self.move_entry(last, freed)?;
        } else {
            self.clear_slot(freed);
        }
        self.hi_size -= 1;
        Ok(())
    }

    fn clear_slot(&mut self, index: usize) {
        self.keys[index] = None;
        self.values[index] = None;
    }

    /// Relocates the live entry at `src` to `dst`, repairing whatever bucket
    /// cell or `links[]` slot referenced `src`, and notifying the sink.
    fn move_entry(&mut self, src: usize, dst: usize) -> Result<()> {
        if src == dst {
            return Ok(());
        }
        let h = {
            let key = self.keys[src]
                .as_ref()
                .ok_or_else(|| Error::from((ErrorKind::CorruptState, "move_entry: empty src slot")))?;
            self.hash_of(key)
        };
        let b = self.bucket_index(h);
        self.redirect_pointer(b, src, dst)?;

        if src < self.lo_size {
            self.links[dst] = self.links[src];
        }
        self.keys[dst] = self.keys[src].take();
        self.values[dst] = self.values[src].take();
        if self.cache_hash {
            self.hash[dst] = self.hash[src];
        }
        self.sink.on_move(src, dst);
        Ok(())
    }

    /// Finds whichever bucket cell or `links[]` slot references `old_idx`
    /// within bucket `b`'s chain, and redirects it to `new_idx`.
    fn redirect_pointer(&mut self, b: usize, old_idx: usize, new_idx: usize) -> Result<()> {
        let head_cell = self.buckets[b];
        if head_cell != 0 && (head_cell - 1) as usize == old_idx {
            self.buckets[b] = (new_idx + 1) as u32;
            return Ok(());
        }
        let mut current = (head_cell - 1) as usize;
        let mut steps = 0usize;
        loop {
            if current >= self.lo_size {
                return Err((ErrorKind::CorruptState, "move: referrer not found").into());
            }
            steps += 1;
            if steps > self.lo_size + 1 {
                return Err((ErrorKind::CorruptState, "move: referrer search exceeded bound").into());
            }
            if self.links[current] as usize == old_idx {
                self.links[current] = new_idx as i64;
                return Ok(());
            }
            current = self.links[current] as usize;
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.buckets {
            *cell = 0;
        }
        for slot in &mut self.keys {
            *slot = None;
        }
        for slot in &mut self.values {
            *slot = None;
        }
        self.lo_size = 0;
        self.hi_size = 0;
        self.has_null_key = false;
        self.null_value = None;
        self.version = self.version.wrapping_add(1);
        self.sink.on_clear();
    }

    // ---- resize / trim --------------------------------------------------

    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        let new_capacity = next_prime(new_capacity.max(INITIAL_CAPACITY));
        let mut new_buckets = vec![0u32; new_capacity];
        let mut new_keys: Vec<Option<K>> = Vec::with_capacity(new_capacity);
        let mut new_values: Vec<Option<V>> = Vec::with_capacity(new_capacity);
        new_keys.resize_with(new_capacity, || None);
        new_values.resize_with(new_capacity, || None);
        let mut new_hash = if self.cache_hash {
            vec![0i32; new_capacity]
        } else {
            Vec::new()
        };
        let mut new_links: Vec<i64> = Vec::new();
        let mut new_lo = 0usize;
        let mut new_hi = 0usize;

        let old_indices: Vec<usize> = (0..self.lo_size)
            .chain((self.capacity - self.hi_size)..self.capacity)
            .collect();

        self.sink.on_resize_begin(new_capacity);

        for src in old_indices {
            let key = self.keys[src].take().expect("resize: empty live slot");
            let value = self.values[src].take();
            let h = self.hash_of(&key);
            let b = ((h as i64 as u64 & 0x7FFF_FFFF) as usize) % new_buckets.len();
            let head_cell = new_buckets[b];

            let dst = if head_cell == 0 {
                let d = new_capacity - 1 - new_hi;
                new_hi += 1;
                d
            } else {
                let d = new_lo;
                new_lo += 1;
                if new_links.len() < new_lo {
                    let grown = (new_links.len() * 2).max(new_lo).max(4);
                    new_links.resize(grown, -1);
                }
                new_links[d] = (head_cell - 1) as i64;
                d
            };

            new_keys[dst] = Some(key);
            new_values[dst] = value;
            if self.cache_hash {
                new_hash[dst] = h;
            }
            new_buckets[b] = (dst + 1) as u32;
            self.sink.on_resize_move(src, dst);
        }

        self.sink.on_resize_end();

        self.capacity = new_capacity;
        self.buckets = new_buckets;
        self.keys = new_keys;
        self.values = new_values;
        self.hash = new_hash;
        self.links = new_links;
        self.lo_size = new_lo;
        self.hi_size = new_hi;
        Ok(())
    }

    pub fn ensure_capacity(&mut self, n: usize) -> Result<()> {
        if n > self.capacity {
            self.resize(next_prime(n))?;
            self.version = self.version.wrapping_add(1);
        }
        Ok(())
    }

    pub fn trim(&mut self, n: usize) -> Result<()> {
        if n < self.size() {
            return Err((ErrorKind::InvalidArgument, "trim(n) below current size").into());
        }
        let target = next_prime(n.max(self.size()));
        if target < self.capacity {
            self.resize(target)?;
            self.version = self.version.wrapping_add(1);
        }
        Ok(())
    }

    // ---- token-based access -----------------------------------------

    /// First token in iteration order, or [`token::INVALID`] if empty.
    pub fn token(&self) -> i64 {
        if self.lo_size > 0 {
            return token::make_token(self.version, 0);
        }
        if self.hi_size > 0 {
            return token::make_token(self.version, (self.capacity - self.hi_size) as u32);
        }
        if self.has_null_key {
            return token::make_token(self.version, NULL_INDEX);
        }
        INVALID
    }

    /// Next token in iteration order after `prev`.
    pub fn next_token(&self, prev: i64) -> Result<i64> {
        if prev == INVALID {
            return Err((ErrorKind::InvalidArgument, "next_token called with INVALID").into());
        }
        if token::token_version(prev) != self.version {
            return Err(ErrorKind::ConcurrentModification.into());
        }
        let idx = token::token_index(prev);
        if idx == NULL_INDEX {
            return Ok(INVALID);
        }

        let next = self.unsafe_next_index(idx as i64);
        if next >= 0 {
            return Ok(token::make_token(self.version, next as u32));
        }
        if self.has_null_key {
            return Ok(token::make_token(self.version, NULL_INDEX));
        }
        Ok(INVALID)
    }

    /// Returns the key a (trusted, current) token refers to.
    pub fn key_of(&self, t: i64) -> Option<&K> {
        let idx = token::token_index(t);
        if idx == NULL_INDEX {
            None
        } else {
            self.keys[idx as usize].as_ref()
        }
    }

    /// Returns the value a (trusted, current) token refers to.
    pub fn value_of(&self, t: i64) -> Option<&V> {
        let idx = token::token_index(t);
        if idx == NULL_INDEX {
            self.null_value.as_ref()
        } else {
            self.values[idx as usize].as_ref()
        }
    }

    pub fn is_key_null(&self, t: i64) -> bool {
        token::token_index(t) == NULL_INDEX
    }

    /// Advances a raw physical index with no version check. `idx == -1`
    /// starts the scan. Visits the null key never; callers wanting it use
    /// the safe token path.
    pub fn unsafe_next_index(&self, idx: i64) -> i64 {
        let next = idx + 1;
        if next >= 0 && (next as usize) < self.lo_size {
            return next;
        }
        let hi_start = (self.capacity - self.hi_size) as i64;
        let candidate = if next > hi_start { next } else { hi_start };
        if self.hi_size > 0 && candidate < self.capacity as i64 {
            return candidate;
        }
        -1
    }
}

impl<K, V, O, S> PartialEq for HashCore<K, V, O, S>
where
    O: KeyOps<K>,
    S: RelocationSink,
    V: PartialEq,
{
    /// Content equality: same keys mapped to equal values and the same
    /// null-key state, independent of physical layout.
    fn eq(&self, other: &Self) -> bool {
        if self.size() != other.size() || self.has_null_key != other.has_null_key {
            return false;
        }
        if self.has_null_key && self.null_value != other.null_value {
            return false;
        }
        let mut t = self.token();
        while t != INVALID {
            if !self.is_key_null(t) {
                let key = self.key_of(t).expect("a non-null token has a key");
                match other.get(key) {
                    Ok(v) if v == self.value_of(t) => {}
                    _ => return false,
                }
            }
            t = match self.next_token(t) {
                Ok(nt) => nt,
                Err(_) => return false,
            };
        }
        true
    }
}

impl<K, V, O, S> std::hash::Hash for HashCore<K, V, O, S>
where
    O: KeyOps<K>,
    S: RelocationSink,
    K: std::hash::Hash,
    V: std::hash::Hash,
{
    /// Order-independent: sums each entry's own hash, so two tables holding
    /// the same entries hash equally regardless of physical layout.
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        use std::hash::{Hash as _, Hasher as _};
        let mut acc: u64 = 0;
        let mut t = self.token();
        while t != INVALID {
            let mut entry_hasher = std::collections::hash_map::DefaultHasher::new();
            if self.is_key_null(t) {
                true.hash(&mut entry_hasher);
            } else {
                false.hash(&mut entry_hasher);
                self.key_of(t).hash(&mut entry_hasher);
            }
            self.value_of(t).hash(&mut entry_hasher);
            acc = acc.wrapping_add(entry_hasher.finish());
            t = self.next_token(t).unwrap_or(INVALID);
        }
        acc.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::IntHashK;

    fn core() -> HashCore<i64, i64, IntHashK> {
        HashCore::new(IntHashK, false)
    }

    #[test]
    fn put_get_remove_roundtrip() {
        let mut t = core();
        assert!(t.put(1, 100).unwrap());
        assert!(t.put(2, 200).unwrap());
        assert_eq!(*t.get(&1).unwrap().unwrap(), 100);
        assert_eq!(*t.get(&2).unwrap().unwrap(), 200);
        assert!(t.remove(&1).unwrap());
        assert!(t.get(&1).unwrap().is_none());
        assert_eq!(t.size(), 1);
    }

    #[test]
    fn put_overwrite_does_not_grow_size() {
        let mut t = core();
        assert!(t.put(5, 1).unwrap());
        assert!(!t.put(5, 2).unwrap());
        assert_eq!(t.size(), 1);
        assert_eq!(*t.get(&5).unwrap().unwrap(), 2);
    }

    #[test]
    fn lazy_initializes_with_capacity_seven() {
        let mut t = core();
        assert_eq!(t.capacity(), 0);
        t.put(1, 1).unwrap();
        assert_eq!(t.capacity(), 7);
    }

    #[test]
    fn grows_when_full() {
        let mut t = core();
        for i in 0..7 {
            t.put(i, i).unwrap();
        }
        assert_eq!(t.capacity(), 7);
        t.put(7, 7).unwrap();
        assert!(t.capacity() > 7);
        for i in 0..8 {
            assert_eq!(*t.get(&i).unwrap().unwrap(), i);
        }
        assert_eq!(t.size(), 8);
    }

    #[test]
    fn stress_insert_remove_matches_hashmap_reference() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};
        use std::collections::HashMap;

        let mut rng = StdRng::seed_from_u64(42);
        let mut reference: HashMap<i64, i64> = HashMap::new();
        let mut t = core();

        for _ in 0..5000 {
            let key = rng.gen_range(0..200);
            let value = rng.gen_range(0..1_000_000);
            if rng.gen_bool(0.5) {
                let expected_new = !reference.contains_key(&key);
                reference.insert(key, value);
                assert_eq!(t.put(key, value).unwrap(), expected_new);
            } else {
                let expected = reference.remove(&key).is_some();
                assert_eq!(t.remove(&key).unwrap(), expected);
            }
        }

        assert_eq!(t.size(), reference.len());
        for (k, v) in &reference {
            assert_eq!(t.get(k).unwrap().unwrap(), v);
        }
    }

    #[test]
    fn stale_token_raises_concurrent_modification() {
        let mut t = core();
        t.put(1, 1).unwrap();
        let stale = t.token_of(&1).unwrap();
        for i in 2..20 {
            t.put(i, i).unwrap();
        }
        let err = t.next_token(stale).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConcurrentModification);
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut t = core();
        for i in 0..10 {
            t.put(i, i).unwrap();
        }
        t.clear();
        assert_eq!(t.size(), 0);
        assert_eq!(t.get(&3).unwrap(), None);
    }

    #[test]
    fn null_key_is_independent_of_regular_entries() {
        let mut t = core();
        t.put(1, 1).unwrap();
        assert!(t.put_null(999));
        assert_eq!(t.size(), 2);
        assert_eq!(*t.null_value().unwrap(), 999);
        assert!(t.remove_null());
        assert_eq!(t.size(), 1);
        assert_eq!(*t.get(&1).unwrap().unwrap(), 1);
    }

    #[test]
    fn trim_rejects_size_below_current() {
        let mut t = core();
        for i in 0..5 {
            t.put(i, i).unwrap();
        }
        let err = t.trim(2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
