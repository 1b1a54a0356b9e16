//! A map from `i64` to a nullable-primitive `V`, backed by [`NullList`].
//!
//! The core's own value column is unused (`HashCore<i64, (), ..>`); the
//! actual payload lives in a [`NullList<V>`] addressed by the table's
//! physical index, kept aligned across relocations by [`NullListRelocator`].

use crate::capability::{IntHashK, RelocationSink};
use crate::error::Result;
use crate::hashcore::HashCore;
use crate::json::JsonSink;
use crate::nulllist::NullList;
use crate::token::INVALID;

#[derive(Clone)]
struct NullListRelocator<V: Copy + Default> {
    store: NullList<V>,
    staging: Option<NullList<V>>,
}

impl<V: Copy + Default> NullListRelocator<V> {
    fn new(flat_threshold: usize) -> Self {
        Self {
            store: NullList::new(flat_threshold),
            staging: None,
        }
    }
}

impl<V: Copy + Default> RelocationSink for NullListRelocator<V> {
    fn on_move(&mut self, src: usize, dst: usize) {
        let present = self.store.has(src);
        let value = if present { self.store.get(src) } else { V::default() };
        self.store.set(dst, present, value);
        self.store.set(src, false, V::default());
    }

    fn on_clear(&mut self) {
        self.store.clear();
    }

    fn on_resize_begin(&mut self, _new_capacity: usize) {
        self.staging = Some(NullList::new(self.store.flat_threshold()));
    }

    fn on_resize_move(&mut self, src: usize, dst: usize) {
        let present = self.store.has(src);
        let value = if present { self.store.get(src) } else { V::default() };
        self.staging.as_mut().unwrap().set(dst, present, value);
    }

    fn on_resize_end(&mut self) {
        self.store = self.staging.take().expect("on_resize_begin was not called");
    }
}

#[derive(Clone)]
pub struct IntNullableMap<V: Copy + Default> {
    core: HashCore<i64, (), IntHashK, NullListRelocator<V>>,
    /// The null key's own entry: `None` if the null key is absent, `Some(None)`
    /// if present with a null value, `Some(Some(v))` if present with `v`.
    /// Kept outside `core`/the sink since the null key has no physical index.
    null_entry: Option<Option<V>>,
}

impl<V: Copy + Default> IntNullableMap<V> {
    pub fn new(flat_threshold: usize) -> Self {
        Self {
            core: HashCore::with_sink(IntHashK, NullListRelocator::new(flat_threshold), false),
            null_entry: None,
        }
    }

    pub fn size(&self) -> usize {
        self.core.size() + usize::from(self.null_entry.is_some())
    }

    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    pub fn contains_key(&self, key: i64) -> Result<bool> {
        self.core.contains(&key)
    }

    pub fn token_of(&self, key: i64) -> Result<i64> {
        self.core.token_of(&key)
    }

    pub fn contains_value(&self, value: V) -> Result<bool>
    where
        V: PartialEq,
    {
        if self.null_entry == Some(Some(value)) {
            return Ok(true);
        }
        let mut t = self.core.token();
        while t != INVALID {
            if !self.core.is_key_null(t) {
                let idx = crate::token::token_index(t) as usize;
                if self.core.sink().store.get_opt(idx) == Some(value) {
                    return Ok(true);
                }
            }
            t = self.core.next_token(t)?;
        }
        Ok(false)
    }

    pub fn has_null_key(&self) -> bool {
        self.null_entry.is_some()
    }

    pub fn null_key_value(&self) -> Option<V> {
        self.null_entry.flatten()
    }

    pub fn get_or_default(&self, key: i64, default: V) -> Result<V> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Whether `key` is present *and* holds a non-null value.
    pub fn value_present(&self, key: i64) -> Result<bool> {
        let t = self.core.token_of(&key)?;
        if t == INVALID {
            return Ok(false);
        }
        let idx = crate::token::token_index(t) as usize;
        Ok(self.core.sink().store.has(idx))
    }

    pub fn get(&self, key: i64) -> Result<Option<V>> {
        let t = self.core.token_of(&key)?;
        if t == INVALID {
            return Ok(None);
        }
        let idx = crate::token::token_index(t) as usize;
        Ok(self.core.sink().store.get_opt(idx))
    }

    /// Inserts `key` with a present value `v`.
    pub fn put(&mut self, key: i64, v: V) -> Result<bool> {
        let was_new = self.core.put(key, ())?;
        let t = self.core.token_of(&key)?;
        let idx = crate::token::token_index(t) as usize;
        self.core.sink_mut().store.set(idx, true, v);
        Ok(was_new)
    }

    /// Inserts `key` with an absent (null) value.
    pub fn put_null_value(&mut self, key: i64) -> Result<bool> {
        let was_new = self.core.put(key, ())?;
        let t = self.core.token_of(&key)?;
        let idx = crate::token::token_index(t) as usize;
        self.core.sink_mut().store.set(idx, false, V::default());
        Ok(was_new)
    }

    /// Inserts `key` with `v` only if `key` is absent.
    pub fn try_put(&mut self, key: i64, v: V) -> Result<bool> {
        if self.contains_key(key)? {
            return Ok(false);
        }
        self.put(key, v)?;
        Ok(true)
    }

    /// Inserts or overwrites the null key with a present value `v`.
    pub fn put_null_key(&mut self, v: V) -> bool {
        let was_new = self.null_entry.is_none();
        self.null_entry = Some(Some(v));
        was_new
    }

    /// Inserts or overwrites the null key with an absent (null) value.
    pub fn put_null_key_absent(&mut self) -> bool {
        let was_new = self.null_entry.is_none();
        self.null_entry = Some(None);
        was_new
    }

    pub fn remove_null_key(&mut self) -> bool {
        let was_present = self.null_entry.is_some();
        self.null_entry = None;
        was_present
    }

    pub fn remove(&mut self, key: i64) -> Result<bool> {
        self.core.remove(&key)
    }

    pub fn clear(&mut self) {
        self.core.clear();
        self.null_entry = None;
    }

    pub fn trim(&mut self, n: usize) -> Result<()> {
        self.core.trim(n)
    }

    pub fn flat_strategy_threshold(&self) -> usize {
        self.core.sink().store.flat_threshold()
    }

    pub fn set_flat_strategy_threshold(&mut self, n: usize) {
        self.core.sink_mut().store.set_flat_threshold(n);
    }

    pub fn token(&self) -> i64 {
        self.core.token()
    }

    pub fn next_token(&self, prev: i64) -> Result<i64> {
        self.core.next_token(prev)
    }

    pub fn key_of(&self, token: i64) -> Option<i64> {
        self.core.key_of(token).copied()
    }

    pub fn is_key_null(&self, token: i64) -> bool {
        self.core.is_key_null(token)
    }

    pub fn unsafe_next_index(&self, idx: i64) -> i64 {
        self.core.unsafe_next_index(idx)
    }

    pub fn value_of(&self, token: i64) -> Option<V> {
        let idx = crate::token::token_index(token);
        if idx == crate::token::NULL_INDEX {
            return self.null_key_value();
        }
        self.core.sink().store.get_opt(idx as usize)
    }

    /// Emits `{Key, Value}` pairs as a JSON array, the null key first if
    /// present; either field may be `null`.
    pub fn to_json(&self, sink: &mut impl JsonSink) -> Result<()>
    where
        V: Into<i64>,
    {
        sink.enter_array();
        if let Some(entry) = self.null_entry {
            sink.enter_object();
            sink.name("Key");
            sink.value_null();
            sink.name("Value");
            match entry {
                Some(v) => sink.value_i64(v.into()),
                None => sink.value_null(),
            }
            sink.exit_object();
        }
        let mut t = self.core.token();
        while t != INVALID {
            if !self.core.is_key_null(t) {
                sink.enter_object();
                sink.name("Key");
                sink.value_i64(self.core.key_of(t).copied().unwrap());
                sink.name("Value");
                match self.value_of(t) {
                    Some(v) => sink.value_i64(v.into()),
                    None => sink.value_null(),
                }
                sink.exit_object();
            }
            t = self.core.next_token(t)?;
        }
        sink.exit_array();
        Ok(())
    }
}

impl<V: Copy + Default + PartialEq> PartialEq for IntNullableMap<V> {
    fn eq(&self, other: &Self) -> bool {
        if self.size() != other.size() || self.null_entry != other.null_entry {
            return false;
        }
        let mut t = self.token();
        while t != INVALID {
            if !self.is_key_null(t) {
                let k = self.key_of(t).unwrap();
                if !other.contains_key(k).unwrap_or(false) || other.get(k).unwrap_or(None) != self.value_of(t) {
                    return false;
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

impl<V: Copy + Default + std::hash::Hash> std::hash::Hash for IntNullableMap<V> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        use std::hash::{Hash as _, Hasher as _};
        let mut acc: u64 = 0;
        if let Some(entry) = self.null_entry {
            let mut h = std::collections::hash_map::DefaultHasher::new();
            entry.hash(&mut h);
            acc = acc.wrapping_add(h.finish());
        }
        let mut t = self.token();
        while t != INVALID {
            if !self.is_key_null(t) {
                let mut h = std::collections::hash_map::DefaultHasher::new();
                self.key_of(t).hash(&mut h);
                self.value_of(t).hash(&mut h);
                acc = acc.wrapping_add(h.finish());
            }
            t = self.next_token(t).unwrap_or(INVALID);
        }
        acc.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_with_and_without_value() {
        let mut m: IntNullableMap<i32> = IntNullableMap::new(4);
        m.put(1, 100).unwrap();
        m.put_null_value(2).unwrap();
        assert!(m.value_present(1).unwrap());
        assert!(!m.value_present(2).unwrap());
        assert_eq!(m.get(1).unwrap(), Some(100));
        assert_eq!(m.get(2).unwrap(), None);
    }

    #[test]
    fn null_key_has_its_own_value_slot() {
        let mut m: IntNullableMap<i32> = IntNullableMap::new(4);
        m.put(1, 1).unwrap();
        assert!(m.put_null_key(42));
        assert!(m.has_null_key());
        assert_eq!(m.null_key_value(), Some(42));
        assert_eq!(m.size(), 2);
        assert!(m.remove_null_key());
        assert!(!m.has_null_key());
        assert_eq!(m.size(), 1);
    }

    #[test]
    fn try_put_and_get_or_default() {
        let mut m: IntNullableMap<i32> = IntNullableMap::new(4);
        assert!(m.try_put(1, 10).unwrap());
        assert!(!m.try_put(1, 20).unwrap());
        assert_eq!(m.get(1).unwrap(), Some(10));
        assert_eq!(m.get_or_default(9, -1).unwrap(), -1);
    }

    #[test]
    fn json_emits_key_and_value_nulls() {
        let mut m: IntNullableMap<i32> = IntNullableMap::new(4);
        m.put(1, 7).unwrap();
        m.put_null_value(2).unwrap();
        let mut sink = crate::json::StringSink::new();
        m.to_json(&mut sink).unwrap();
        let text = sink.into_string();
        assert!(text.contains(r#"{"Key":1,"Value":7}"#));
        assert!(text.contains(r#"{"Key":2,"Value":null}"#));
    }

    #[test]
    fn values_survive_resize_relocation() {
        let mut m: IntNullableMap<i32> = IntNullableMap::new(1000);
        for i in 0..50 {
            if i % 3 == 0 {
                m.put_null_value(i).unwrap();
            } else {
                m.put(i, i as i32 * 2).unwrap();
            }
        }
        for i in 0..50 {
            if i % 3 == 0 {
                assert_eq!(m.get(i).unwrap(), None, "key {i}");
            } else {
                assert_eq!(m.get(i).unwrap(), Some(i as i32 * 2), "key {i}");
            }
        }
    }

    #[test]
    fn values_survive_removal_compaction() {
        let mut m: IntNullableMap<i32> = IntNullableMap::new(4);
        for i in 0..10 {
            m.put(i, i as i32).unwrap();
        }
        m.remove(3).unwrap();
        m.remove(7).unwrap();
        for i in 0..10 {
            if i == 3 || i == 7 {
                assert!(!m.contains_key(i).unwrap());
            } else {
                assert_eq!(m.get(i).unwrap(), Some(i as i32));
            }
        }
    }
}
