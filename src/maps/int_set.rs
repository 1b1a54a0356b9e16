//! A set of `i64`, the key-only façade (value slot is always `()`).

use crate::capability::IntHashK;
use crate::error::Result;
use crate::hashcore::HashCore;
use crate::json::JsonSink;
use crate::token::INVALID;

#[derive(Clone, PartialEq, Hash)]
pub struct IntSet {
    core: HashCore<i64, (), IntHashK>,
}

impl Default for IntSet {
    fn default() -> Self {
        Self::new()
    }
}

impl IntSet {
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

    pub fn contains(&self, key: i64) -> Result<bool> {
        self.core.contains(&key)
    }

    pub fn token_of(&self, key: i64) -> Result<i64> {
        self.core.token_of(&key)
    }

    pub fn has_null_key(&self) -> bool {
        self.core.has_null_key()
    }

    /// Adds the null-key member. Returns whether it was newly inserted.
    pub fn add_null_key(&mut self) -> bool {
        self.core.put_null(())
    }

    pub fn remove_null_key(&mut self) -> bool {
        self.core.remove_null()
    }

    /// Adds `key`. Returns whether it was newly inserted.
    pub fn add(&mut self, key: i64) -> Result<bool> {
        self.core.put(key, ())
    }

    /// Adds `key` only if absent. Returns whether it was newly inserted.
    /// Equivalent to [`IntSet::add`] since a set has no value to overwrite.
    pub fn try_add(&mut self, key: i64) -> Result<bool> {
        self.core.try_put(key, ())
    }

    pub fn remove(&mut self, key: i64) -> Result<bool> {
        self.core.remove(&key)
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

    pub fn is_key_null(&self, token: i64) -> bool {
        self.core.is_key_null(token)
    }

    pub fn unsafe_next_index(&self, idx: i64) -> i64 {
        self.core.unsafe_next_index(idx)
    }

    pub fn to_vec(&self) -> Result<Vec<i64>> {
        let mut out = Vec::with_capacity(self.size());
        let mut t = self.core.token();
        while t != INVALID {
            if !self.core.is_key_null(t) {
                out.push(*self.core.key_of(t).unwrap());
            }
            t = self.core.next_token(t)?;
        }
        Ok(out)
    }

    /// Emits as a JSON array of members, the null key (if present) as a
    /// literal JSON `null` entry first.
    pub fn to_json(&self, sink: &mut impl JsonSink) -> Result<()> {
        sink.enter_array();
        if self.core.has_null_key() {
            sink.value_null();
        }
        let mut t = self.core.token();
        while t != INVALID {
            if !self.core.is_key_null(t) {
                sink.value_i64(*self.core.key_of(t).unwrap());
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

    #[test]
    fn add_contains_remove() {
        let mut s = IntSet::new();
        assert!(s.add(1).unwrap());
        assert!(!s.add(1).unwrap());
        assert!(s.contains(1).unwrap());
        assert!(s.remove(1).unwrap());
        assert!(!s.contains(1).unwrap());
    }

    #[test]
    fn null_key_member_is_independent() {
        let mut s = IntSet::new();
        s.add(1).unwrap();
        assert!(s.add_null_key());
        assert!(s.has_null_key());
        assert_eq!(s.size(), 2);
        assert!(s.remove_null_key());
        assert_eq!(s.size(), 1);
    }

    #[test]
    fn json_emits_array_with_null_first() {
        let mut s = IntSet::new();
        s.add(1).unwrap();
        s.add_null_key();
        let mut sink = crate::json::StringSink::new();
        s.to_json(&mut sink).unwrap();
        assert_eq!(sink.as_str(), "[null,1]");
    }

    #[test]
    fn two_sets_with_same_members_are_equal() {
        let mut a = IntSet::new();
        let mut b = IntSet::new();
        for i in 0..10 {
            a.add(i).unwrap();
        }
        for i in (0..10).rev() {
            b.add(i).unwrap();
        }
        assert_eq!(a, b);
    }

    #[test]
    fn to_vec_enumerates_every_member() {
        let mut s = IntSet::new();
        for i in 0..20 {
            s.add(i).unwrap();
        }
        let mut members = s.to_vec().unwrap();
        members.sort_unstable();
        assert_eq!(members, (0..20).collect::<Vec<_>>());
    }
}
