//! A map from `i64` to a `W`-bit (`1 <= W <= 7`) value, backed by
//! [`BitsList`].

use crate::bitslist::BitsList;
use crate::capability::{IntHashK, RelocationSink};
use crate::error::Result;
use crate::hashcore::HashCore;
use crate::json::JsonSink;
use crate::token::{self, INVALID};

#[derive(Clone)]
struct BitsListRelocator {
    store: BitsList,
    staging: Option<BitsList>,
}

impl BitsListRelocator {
    fn new(bits_per_item: u8, default_fill: u8) -> Self {
        Self {
            store: BitsList::new(bits_per_item, default_fill),
            staging: None,
        }
    }
}

impl RelocationSink for BitsListRelocator {
    fn on_move(&mut self, src: usize, dst: usize) {
        let v = if src < self.store.size() {
            self.store.get(src)
        } else {
            self.store.default_fill()
        };
        self.store.set1(dst, v);
    }

    fn on_clear(&mut self) {
        self.store.clear();
    }

    fn on_resize_begin(&mut self, _new_capacity: usize) {
        self.staging = Some(BitsList::new(self.store.bits_per_item(), self.store.default_fill()));
    }

    fn on_resize_move(&mut self, src: usize, dst: usize) {
        let v = if src < self.store.size() {
            self.store.get(src)
        } else {
            self.store.default_fill()
        };
        self.staging.as_mut().unwrap().set1(dst, v);
    }

    fn on_resize_end(&mut self) {
        self.store = self.staging.take().expect("on_resize_begin was not called");
    }
}

#[derive(Clone)]
pub struct IntBitsMap {
    core: HashCore<i64, (), IntHashK, BitsListRelocator>,
    /// The null key's value, kept outside the sink since the null key has
    /// no physical index to back it.
    null_value: Option<u8>,
}

impl IntBitsMap {
    /// Creates a map whose values are `bits_per_item`-wide (`1..=7`),
    /// filled with `default_fill` wherever a physical slot is grown past
    /// its logical end before being written.
    pub fn new(bits_per_item: u8, default_fill: u8) -> Self {
        Self {
            core: HashCore::with_sink(
                IntHashK,
                BitsListRelocator::new(bits_per_item, default_fill),
                false,
            ),
            null_value: None,
        }
    }

    pub fn bits_per_value(&self) -> u8 {
        self.core.sink().store.bits_per_item()
    }

    pub fn size(&self) -> usize {
        self.core.size() + usize::from(self.null_value.is_some())
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

    pub fn contains_value(&self, value: u8) -> Result<bool> {
        if self.null_value == Some(value) {
            return Ok(true);
        }
        let mut t = self.core.token();
        while t != INVALID {
            if !self.core.is_key_null(t) {
                let idx = token::token_index(t) as usize;
                if self.core.sink().store.get(idx) == value {
                    return Ok(true);
                }
            }
            t = self.core.next_token(t)?;
        }
        Ok(false)
    }

    pub fn has_null_key(&self) -> bool {
        self.null_value.is_some()
    }

    pub fn null_key_value(&self) -> Option<u8> {
        self.null_value
    }

    pub fn put_null_key(&mut self, value: u8) -> bool {
        let was_new = self.null_value.is_none();
        self.null_value = Some(value);
        was_new
    }

    pub fn remove_null_key(&mut self) -> bool {
        let was_present = self.null_value.is_some();
        self.null_value = None;
        was_present
    }

    pub fn get(&self, key: i64) -> Result<Option<u8>> {
        let t = self.core.token_of(&key)?;
        if t == INVALID {
            return Ok(None);
        }
        let idx = token::token_index(t) as usize;
        Ok(Some(self.core.sink().store.get(idx)))
    }

    pub fn get_or_default(&self, key: i64, default: u8) -> Result<u8> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    pub fn put(&mut self, key: i64, value: u8) -> Result<bool> {
        let was_new = self.core.put(key, ())?;
        let t = self.core.token_of(&key)?;
        let idx = token::token_index(t) as usize;
        self.core.sink_mut().store.set1(idx, value);
        Ok(was_new)
    }

    pub fn try_put(&mut self, key: i64, value: u8) -> Result<bool> {
        if self.contains_key(key)? {
            return Ok(false);
        }
        self.put(key, value)?;
        Ok(true)
    }

    pub fn remove(&mut self, key: i64) -> Result<bool> {
        self.core.remove(&key)
    }

    pub fn clear(&mut self) {
        self.core.clear();
        self.null_value = None;
    }

    pub fn trim(&mut self, n: usize) -> Result<()> {
        self.core.trim(n)
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

    pub fn value_of(&self, t: i64) -> Option<u8> {
        let idx = token::token_index(t);
        if idx == token::NULL_INDEX {
            return self.null_value;
        }
        Some(self.core.sink().store.get(idx as usize))
    }

    /// Emits `{Key, Value}` pairs as a JSON array, the null key first if
    /// present.
    pub fn to_json(&self, sink: &mut impl JsonSink) -> Result<()> {
        sink.enter_array();
        if let Some(v) = self.null_value {
            sink.enter_object();
            sink.name("Key");
            sink.value_null();
            sink.name("Value");
            sink.value_i64(v as i64);
            sink.exit_object();
        }
        let mut t = self.core.token();
        while t != INVALID {
            if !self.core.is_key_null(t) {
                sink.enter_object();
                sink.name("Key");
                sink.value_i64(self.core.key_of(t).copied().unwrap());
                sink.name("Value");
                sink.value_i64(self.value_of(t).unwrap() as i64);
                sink.exit_object();
            }
            t = self.core.next_token(t)?;
        }
        sink.exit_array();
        Ok(())
    }
}

impl PartialEq for IntBitsMap {
    fn eq(&self, other: &Self) -> bool {
        if self.size() != other.size() || self.null_value != other.null_value {
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

impl std::hash::Hash for IntBitsMap {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        use std::hash::{Hash as _, Hasher as _};
        let mut acc: u64 = 0;
        if let Some(v) = self.null_value {
            let mut h = std::collections::hash_map::DefaultHasher::new();
            v.hash(&mut h);
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
    fn put_get_roundtrip() {
        let mut m = IntBitsMap::new(5, 0);
        m.put(1, 17).unwrap();
        m.put(2, 31).unwrap();
        assert_eq!(m.get(1).unwrap(), Some(17));
        assert_eq!(m.get(2).unwrap(), Some(31));
        assert_eq!(m.bits_per_value(), 5);
    }

    #[test]
    fn null_key_try_put_and_json() {
        let mut m = IntBitsMap::new(5, 0);
        m.put(1, 3).unwrap();
        assert!(!m.try_put(1, 9).unwrap());
        assert_eq!(m.get(1).unwrap(), Some(3), "try_put must not overwrite");
        assert!(m.put_null_key(7));
        assert!(m.has_null_key());
        assert_eq!(m.null_key_value(), Some(7));
        assert_eq!(m.get_or_default(99, 0).unwrap(), 0);

        let mut sink = crate::json::StringSink::new();
        m.to_json(&mut sink).unwrap();
        let text = sink.into_string();
        assert!(text.contains(r#"{"Key":null,"Value":7}"#));
        assert!(text.contains(r#"{"Key":1,"Value":3}"#));

        assert!(m.remove_null_key());
        assert!(!m.has_null_key());
    }

    #[test]
    fn values_survive_resize() {
        let mut m = IntBitsMap::new(7, 0);
        for i in 0..40 {
            m.put(i, (i * 3 % 127) as u8).unwrap();
        }
        for i in 0..40 {
            assert_eq!(m.get(i).unwrap(), Some((i * 3 % 127) as u8), "key {i}");
        }
    }

    #[test]
    fn values_survive_removal_compaction() {
        let mut m = IntBitsMap::new(4, 0);
        for i in 0..10 {
            m.put(i, i as u8).unwrap();
        }
        m.remove(2).unwrap();
        m.remove(5).unwrap();
        for i in 0..10 {
            if i == 2 || i == 5 {
                assert!(!m.contains_key(i).unwrap());
            } else {
                assert_eq!(m.get(i).unwrap(), Some(i as u8));
            }
        }
    }
}
