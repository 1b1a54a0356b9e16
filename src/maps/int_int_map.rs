//! A map from `i64` to `i64`, the direct-primitive-value façade.

use crate::capability::IntHashK;
use crate::error::Result;
use crate::hashcore::HashCore;
use crate::json::JsonSink;
use crate::token::INVALID;

/// A hash map with `i64` keys and `i64` values, backed directly by
/// [`HashCore`]'s own value column (no external value store).
#[derive(Clone, PartialEq, Hash)]
pub struct IntIntMap {
    core: HashCore<i64, i64, IntHashK>,
}

impl Default for IntIntMap {
    fn default() -> Self {
        Self::new()
    }
}

impl IntIntMap {
    pub fn new() -> Self {
        Self {
            core: HashCore::new(IntHashK, false),
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

    pub fn contains_key(&self, key: i64) -> Result<bool> {
        self.core.contains(&key)
    }

    pub fn token_of(&self, key: i64) -> Result<i64> {
        self.core.token_of(&key)
    }

    pub fn contains_value(&self, value: i64) -> Result<bool> {
        let mut t = self.core.token();
        while t != INVALID {
            if !self.core.is_key_null(t) && *self.core.value_of(t).unwrap() == value {
                return Ok(true);
            }
            t = self.core.next_token(t)?;
        }
        Ok(false)
    }

    pub fn has_null_key(&self) -> bool {
        self.core.has_null_key()
    }

    pub fn null_key_value(&self) -> Option<i64> {
        self.core.null_value().copied()
    }

    pub fn get(&self, key: i64) -> Result<Option<i64>> {
        Ok(self.core.get(&key)?.copied())
    }

    pub fn get_or_default(&self, key: i64, default: i64) -> Result<i64> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    pub fn put(&mut self, key: i64, value: i64) -> Result<bool> {
        self.core.put(key, value)
    }

    pub fn try_put(&mut self, key: i64, value: i64) -> Result<bool> {
        self.core.try_put(key, value)
    }

    pub fn put_null_key(&mut self, value: i64) -> bool {
        self.core.put_null(value)
    }

    pub fn remove(&mut self, key: i64) -> Result<bool> {
        self.core.remove(&key)
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

    pub fn key_of(&self, token: i64) -> Option<i64> {
        self.core.key_of(token).copied()
    }

    pub fn value_of(&self, token: i64) -> Option<i64> {
        self.core.value_of(token).copied()
    }

    pub fn is_key_null(&self, token: i64) -> bool {
        self.core.is_key_null(token)
    }

    /// Advances a raw physical index with no version check; see
    /// [`HashCore::unsafe_next_index`].
    pub fn unsafe_next_index(&self, idx: i64) -> i64 {
        self.core.unsafe_next_index(idx)
    }

    /// Emits `{Key, Value}` pairs as a JSON array (integer keys cannot be
    /// JSON object member names), with the null key first if present.
    pub fn to_json(&self, sink: &mut impl JsonSink) -> Result<()> {
        sink.enter_array();
        if self.core.has_null_key() {
            sink.enter_object();
            sink.name("Key");
            sink.value_null();
            sink.name("Value");
            sink.value_i64(*self.core.null_value().unwrap());
            sink.exit_object();
        }
        let mut t = self.core.token();
        while t != INVALID {
            if !self.core.is_key_null(t) {
                sink.enter_object();
                sink.name("Key");
                sink.value_i64(*self.core.key_of(t).unwrap());
                sink.name("Value");
                sink.value_i64(*self.core.value_of(t).unwrap());
                sink.exit_object();
            }
            t = self.core.next_token(t)?;
        }
        sink.exit_array();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::StringSink;

    #[test]
    fn basic_put_get_remove() {
        let mut m = IntIntMap::new();
        assert!(m.put(1, 10).unwrap());
        assert!(m.put(2, 20).unwrap());
        assert_eq!(m.get(1).unwrap(), Some(10));
        assert!(m.contains_value(20).unwrap());
        assert!(m.remove(1).unwrap());
        assert_eq!(m.get(1).unwrap(), None);
        assert_eq!(m.size(), 1);
    }

    #[test]
    fn get_or_default_falls_back() {
        let m = IntIntMap::new();
        assert_eq!(m.get_or_default(42, -1).unwrap(), -1);
    }

    #[test]
    fn json_emits_array_with_null_key_first() {
        let mut m = IntIntMap::new();
        m.put(1, 100).unwrap();
        m.put_null_key(999);
        let mut sink = StringSink::new();
        m.to_json(&mut sink).unwrap();
        assert_eq!(sink.as_str(), r#"[{"Key":null,"Value":999},{"Key":1,"Value":100}]"#);
    }

    #[test]
    fn json_array_contains_every_entry_exactly_once() {
        let mut m = IntIntMap::new();
        for i in 0..5 {
            m.put(i, i * 10).unwrap();
        }
        let mut sink = StringSink::new();
        m.to_json(&mut sink).unwrap();
        let text = sink.into_string();
        for i in 0..5 {
            assert!(text.contains(&format!(r#""Key":{i},"Value":{}"#, i * 10)));
        }
    }
}
