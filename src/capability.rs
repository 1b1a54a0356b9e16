//! Capability traits that parameterize [`crate::hashcore::HashCore`] over key
//! types, plus the relocation-notification hook used by value stores that
//! live outside the core's own arrays.
//!
//! `KeyOps<K>` is implemented per key type and monomorphized at each call
//! site rather than dispatched through a `dyn` object: hashing and equality
//! are the hottest operations the core performs, so they are not worth
//! paying a vtable indirection for.

/// Hashing and equality for a key type `K`, plus the optional rehash hook
/// used to recover from pathological collision chains on adversarial keys.
pub trait KeyOps<K> {
    /// Computes the hash used to place `key` into a bucket.
    fn hash_key(&self, key: &K) -> i32;

    /// Computes a hash using an alternate `seed`, used only when a key type
    /// opts into rekeying (see [`KeyOps::supports_rehash`]). The default
    /// ignores `seed` and defers to [`KeyOps::hash_key`], which is correct
    /// for any key type that never triggers a rekey.
    fn hash_key_seeded(&self, key: &K, seed: u64) -> i32 {
        let _ = seed;
        self.hash_key(key)
    }

    /// Whether this key type opts into the pathological-collision rehash
    /// described for object keys. Primitive keys should leave this `false`.
    fn supports_rehash(&self) -> bool {
        false
    }

    fn keys_equal(&self, a: &K, b: &K) -> bool;
}

/// Notified by [`crate::hashcore::HashCore`] whenever it relocates a live
/// entry's physical index, so that an external value store kept in lockstep
/// with the table's index space (a façade's `NullList`/`BitsList`) can move
/// its own data the same way.
///
/// Single-entry compaction (triggered by `remove`) uses [`RelocationSink::on_move`]
/// directly: exactly one relocation happens per call, so reading `src` and
/// writing `dst` in place is safe. A full-table resize instead relocates
/// every live entry in one pass, and source and destination ranges can
/// overlap in ways that would corrupt an in-place move — so that path reads
/// from the old positions into a fresh staging area via `on_resize_move`
/// and only replaces the sink's storage at `on_resize_end`, mirroring how
/// the core itself builds new parallel arrays rather than mutating in place.
pub trait RelocationSink {
    /// A live entry moved from `src` to `dst` outside of a resize.
    fn on_move(&mut self, src: usize, dst: usize);

    /// The table was cleared; all previously tracked positions are gone.
    fn on_clear(&mut self);

    /// A resize is about to relocate every live entry into a table of
    /// `new_capacity`. Implementations that track per-index side data
    /// should allocate a fresh staging area of that capacity here.
    fn on_resize_begin(&mut self, new_capacity: usize) {
        let _ = new_capacity;
    }

    /// Part of a resize: the entry formerly at `src` now lives at `dst`.
    /// Must read from the pre-resize storage and write into the staging
    /// area established by `on_resize_begin`.
    fn on_resize_move(&mut self, src: usize, dst: usize) {
        let _ = (src, dst);
    }

    /// The resize's relocation pass is complete; commit the staging area.
    fn on_resize_end(&mut self) {}
}

/// The default sink for façades with no side data to track (direct
/// primitive or owned-object values living in the core's own columns).
impl RelocationSink for () {
    fn on_move(&mut self, _src: usize, _dst: usize) {}
    fn on_clear(&mut self) {}
}

/// `KeyOps` for any primitive integer key: identity-ish hash via a simple
/// multiplicative mix, no rehash support (primitive keys cannot be
/// adversarially chosen to collide the way attacker-supplied strings can
/// without also being infeasible to search for).
#[derive(Debug, Default, Clone, Copy)]
pub struct IntHashK;

impl KeyOps<i64> for IntHashK {
    fn hash_key(&self, key: &i64) -> i32 {
        // A 64-bit avalanche mix (splitmix64's finalizer), truncated to 32 bits.
        let mut h = *key as u64;
        h ^= h >> 33;
        h = h.wrapping_mul(0xff51afd7ed558ccd);
        h ^= h >> 33;
        h = h.wrapping_mul(0xc4ceb9fe1a85ec53);
        h ^= h >> 33;
        h as i32
    }

    fn keys_equal(&self, a: &i64, b: &i64) -> bool {
        a == b
    }
}

/// `KeyOps` for `String` keys, opting into the pathological-collision
/// rehash: `hash_key_seeded` folds the seed into an FNV-1a pass so a new
/// seed yields a materially different hash distribution.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringHashK;

impl StringHashK {
    fn fnv1a(bytes: &[u8], seed: u64) -> u64 {
        let mut hash = 0xcbf29ce484222325u64 ^ seed;
        for &b in bytes {
            hash ^= b as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
        hash
    }
}

impl KeyOps<String> for StringHashK {
    fn hash_key(&self, key: &String) -> i32 {
        Self::fnv1a(key.as_bytes(), 0) as i32
    }

    fn hash_key_seeded(&self, key: &String, seed: u64) -> i32 {
        Self::fnv1a(key.as_bytes(), seed) as i32
    }

    fn supports_rehash(&self) -> bool {
        true
    }

    fn keys_equal(&self, a: &String, b: &String) -> bool {
        a == b
    }
}
