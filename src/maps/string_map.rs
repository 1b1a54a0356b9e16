//! A map from `String` to a generic value type `V`, the object-keyed façade.
//!
//! `String` is the key type the pathological-collision rehash mechanism
//! (§4.D.4 in the component design) is known to apply to: [`StringHashK`]
//! opts in via `supports_rehash`, so a chain that grows past the safety
//! threshold triggers an in-place rehash with a perturbed seed rather than
//! degrading to linear-scan lookups under an adversarial key set.

use crate::capability::StringHashK;
use crate::error::Result;
use crate::hashcore::HashCore;
use crate::json::JsonSink;
use crate::token::INVALID;

#[derive(Clone, PartialEq, Hash)]
pub struct StringMap<V> {
    core: HashCore<String, V, StringHashK>,
}

impl<V> Default for StringMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> StringMap<V> {
    pub fn new() -> Self {
        Self {
            core: HashCore::new(StringHashK, true),
        }
    }

    pub fn size(&self) -> usize {
        self.core.size()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    pub fn contains_key(&self, key: &str) -> Result<bool> {
        self.core.contains(&key.to_string())
    }

    pub fn token_of(&self, key: &str) -> Result<i64> {
        self.core.token_of(&key.to_string())
    }

    pub fn contains_value(&self, value: &V) -> Result<bool>
    where
        V: PartialEq,
    {
        let mut t = self.core.token();
        while t != INVALID {
            if !self.core.is_key_null(t) && self.core.value_of(t) == Some(value) {
                return Ok(true);
            }
            t = self.core.next_token(t)?;
        }
        Ok(false)
    }

    pub fn has_null_key(&self) -> bool {
        self.core.has_null_key()
    }

    pub fn null_key_value(&self) -> Option<&V> {
        self.core.null_value()
    }

    pub fn get(&self, key: &str) -> Result<Option<&V>> {
        self.core.get(&key.to_string())
    }

    pub fn get_or_default<'a>(&'a self, key: &str, default: &'a V) -> Result<&'a V> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    pub fn put(&mut self, key: impl Into<String>, value: V) -> Result<bool> {
        self.core.put(key.into(), value)
    }

    pub fn try_put(&mut self, key: impl Into<String>, value: V) -> Result<bool> {
        self.core.try_put(key.into(), value)
    }

    pub fn put_null_key(&mut self, value: V) -> bool {
        self.core.put_null(value)
    }

    pub fn remove(&mut self, key: &str) -> Result<bool> {
        self.core.remove(&key.to_string())
    }

    pub fn remove_null_key(&mut self) -> bool {
        self.core.remove_null()
    }

    pub fn clear(&mut self) {
        self.core.clear()
    }

    pub fn ensure_capacity(&mut self, n: usize) -> Result<()> {
        self.core.ensure_capacity(n)
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

    pub fn key_of(&self, token: i64) -> Option<&String> {
        self.core.key_of(token)
    }

    pub fn value_of(&self, token: i64) -> Option<&V> {
        self.core.value_of(token)
    }

    pub fn is_key_null(&self, token: i64) -> bool {
        self.core.is_key_null(token)
    }

    pub fn unsafe_next_index(&self, idx: i64) -> i64 {
        self.core.unsafe_next_index(idx)
    }

    /// Emits as a JSON object of `key: value` members (string keys are
    /// valid JSON object member names, unlike the other façades' integer
    /// keys), with the null key's value under `null` first if present.
    pub fn to_json(&self, sink: &mut impl JsonSink) -> Result<()>
    where
        V: ToJsonValue,
    {
        sink.enter_object();
        if self.core.has_null_key() {
            sink.name("null");
            self.core.null_value().unwrap().write_json(sink);
        }
        let mut t = self.core.token();
        while t != INVALID {
            if !self.core.is_key_null(t) {
                sink.name(self.core.key_of(t).unwrap());
                self.core.value_of(t).unwrap().write_json(sink);
            }
            t = self.core.next_token(t)?;
        }
        sink.exit_object();
        Ok(())
    }
}

/// Lets [`StringMap::to_json`] emit any value type without this crate
/// depending on a concrete scalar set; implement it for whichever `V` a
/// caller instantiates `StringMap<V>` with.
pub trait ToJsonValue {
    fn write_json(&self, sink: &mut impl JsonSink);
}

impl ToJsonValue for i64 {
    fn write_json(&self, sink: &mut impl JsonSink) {
        sink.value_i64(*self);
    }
}

impl ToJsonValue for String {
    fn write_json(&self, sink: &mut impl JsonSink) {
        sink.value_str(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_remove_roundtrip() {
        let mut m: StringMap<i32> = StringMap::new();
        assert!(m.put("alpha", 1).unwrap());
        assert!(m.put("beta", 2).unwrap());
        assert_eq!(*m.get("alpha").unwrap().unwrap(), 1);
        assert!(m.remove("alpha").unwrap());
        assert!(m.get("alpha").unwrap().is_none());
    }

    #[test]
    fn overwrite_keeps_single_entry() {
        let mut m: StringMap<i32> = StringMap::new();
        assert!(m.put("key", 1).unwrap());
        assert!(!m.put("key", 2).unwrap());
        assert_eq!(m.size(), 1);
        assert_eq!(*m.get("key").unwrap().unwrap(), 2);
    }

    #[test]
    fn try_put_and_get_or_default() {
        let mut m: StringMap<i64> = StringMap::new();
        assert!(m.try_put("a", 1).unwrap());
        assert!(!m.try_put("a", 2).unwrap());
        assert_eq!(*m.get("a").unwrap().unwrap(), 1);
        let fallback = -1i64;
        assert_eq!(*m.get_or_default("missing", &fallback).unwrap(), -1);
    }

    #[test]
    fn null_key_and_contains_value() {
        let mut m: StringMap<i64> = StringMap::new();
        m.put("a", 1).unwrap();
        assert!(m.put_null_key(999));
        assert!(m.has_null_key());
        assert_eq!(*m.null_key_value().unwrap(), 999);
        assert!(m.contains_value(&999).unwrap());
        assert!(m.remove_null_key());
        assert!(!m.has_null_key());
    }

    #[test]
    fn json_emits_object_with_null_key() {
        let mut m: StringMap<i64> = StringMap::new();
        m.put("alpha", 1).unwrap();
        m.put_null_key(9);
        let mut sink = crate::json::StringSink::new();
        m.to_json(&mut sink).unwrap();
        assert_eq!(sink.as_str(), r#"{"null":9,"alpha":1}"#);
    }

    #[test]
    fn two_maps_with_same_entries_are_equal() {
        let mut a: StringMap<i64> = StringMap::new();
        let mut b: StringMap<i64> = StringMap::new();
        a.put("x", 1).unwrap();
        a.put("y", 2).unwrap();
        b.put("y", 2).unwrap();
        b.put("x", 1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn large_key_set_remains_consistent() {
        let mut m: StringMap<usize> = StringMap::new();
        for i in 0..500 {
            m.put(format!("key-{i}"), i).unwrap();
        }
        for i in 0..500 {
            assert_eq!(*m.get(&format!("key-{i}")).unwrap().unwrap(), i);
        }
        let mut t = m.token();
        let mut seen = 0usize;
        while t != INVALID {
            seen += 1;
            t = m.next_token(t).unwrap();
        }
        assert_eq!(seen, 500);
    }
}
