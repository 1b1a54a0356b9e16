//! A nullable-primitive sequence with two interchangeable physical layouts.
//!
//! Conceptually, `NullList<T>` is a `Vec<Option<T>>` — but instead of paying
//! an `Option` discriminant per slot it tracks presence in a separate
//! [`BitList`] and keeps the live values in one of two layouts:
//!
//! - **Compressed**: values are packed into a contiguous prefix, addressed by
//!   `rank1(i) - 1`. Cheap when few positions are present.
//! - **Flat**: values sit at their logical index directly. Cheap to mutate
//!   when most positions are present, at the cost of `size()` memory.
//!
//! The list adaptively switches between the two as `cardinality` crosses
//! `flat_threshold`, without changing the logical sequence it represents.

use crate::bitlist::BitList;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Mode {
    Compressed,
    Flat,
}

/// A sequence of logical length `size()` where each position is either
/// absent or holds a `T`.
#[derive(Debug, Clone)]
pub struct NullList<T> {
    presence: BitList,
    values: Vec<T>,
    cardinality: usize,
    mode: Mode,
    flat_threshold: usize,
    size: usize,
}

impl<T: Copy + Default> Default for NullList<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T: Copy + Default> NullList<T> {
    /// Creates an empty `NullList` with the given flat-switch threshold.
    pub fn new(flat_threshold: usize) -> Self {
        Self {
            presence: BitList::new(),
            values: Vec::new(),
            cardinality: 0,
            mode: Mode::Compressed,
            flat_threshold,
            size: 0,
        }
    }

    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub const fn cardinality(&self) -> usize {
        self.cardinality
    }

    #[inline]
    pub const fn flat_threshold(&self) -> usize {
        self.flat_threshold
    }

    #[inline]
    pub const fn is_flat(&self) -> bool {
        matches!(self.mode, Mode::Flat)
    }

    /// Returns whether logical position `i` holds a value.
    ///
    /// # Panics
    /// Panics if `i >= size()`.
    pub fn has(&self, i: usize) -> bool {
        assert!(i < self.size, "NullList::has index out of range");
        self.presence.get(i)
    }

    /// Returns the value at logical position `i`.
    ///
    /// # Panics
    /// Panics if `i >= size()` or `!has(i)`.
    pub fn get(&self, i: usize) -> T {
        assert!(self.has(i), "NullList::get called on an absent position");
        match self.mode {
            Mode::Compressed => self.values[self.presence.rank1(i + 1) - 1],
            Mode::Flat => self.values[i],
        }
    }

    /// Returns the value at `i` if present, `None` otherwise.
    pub fn get_opt(&self, i: usize) -> Option<T> {
        if i < self.size && self.has(i) {
            Some(self.get(i))
        } else {
            None
        }
    }

    pub fn next_present(&self, i: isize) -> isize {
        self.presence.next1(i)
    }
    pub fn next_absent(&self, i: isize) -> isize {
        self.presence.next0(i)
    }
    pub fn prev_present(&self, i: isize) -> isize {
        self.presence.prev1(i)
    }
    pub fn prev_absent(&self, i: isize) -> isize {
        self.presence.prev0(i)
    }

    /// Sets logical position `i`'s presence/value pair, extending `size()`
    /// to `i + 1` if `i` was past the previous end.
    ///
    /// - `present == false`, currently absent: no-op other than a possible
    ///   size extension.
    /// - `present == false`, currently present: clears the position.
    /// - `present == true`, currently present: overwrites the value in place.
    /// - `present == true`, currently absent: inserts the value.
    pub fn set(&mut self, i: usize, present: bool, value: T) {
        if i >= self.size {
            self.grow_size_to(i + 1);
        }

        let was_present = self.presence.get(i);
        match (was_present, present) {
            (false, false) => {}
            (true, false) => self.clear_position(i),
            (true, true) => self.overwrite_position(i, value),
            (false, true) => self.insert_position(i, value),
        }
    }

    fn clear_position(&mut self, i: usize) {
        match self.mode {
            Mode::Compressed => {
                let pos = self.presence.rank1(i + 1) - 1;
                self.values.remove(pos);
            }
            Mode::Flat => {
                self.values[i] = T::default();
            }
        }
        self.presence.set(i, false);
        self.cardinality -= 1;
    }

    fn overwrite_position(&mut self, i: usize, value: T) {
        match self.mode {
            Mode::Compressed => {
                let pos = self.presence.rank1(i + 1) - 1;
                self.values[pos] = value;
            }
            Mode::Flat => {
                self.values[i] = value;
            }
        }
    }

    fn insert_position(&mut self, i: usize, value: T) {
        self.presence.set(i, true);
        self.cardinality += 1;
        match self.mode {
            Mode::Compressed => {
                let pos = self.presence.rank1(i + 1) - 1;
                self.values.insert(pos, value);
                if self.should_be_flat() {
                    self.switch_to_flat();
                }
            }
            Mode::Flat => {
                if i >= self.values.len() {
                    self.values.resize(i + 1, T::default());
                }
                self.values[i] = value;
            }
        }
    }

    fn should_be_flat(&self) -> bool {
        self.flat_threshold > 0 && self.cardinality >= self.flat_threshold
    }

    fn should_be_compressed(&self) -> bool {
        self.cardinality <= self.flat_threshold
    }

    /// Inserts a new logical slot at `i`, shifting `[i..size)` up by one.
    pub fn insert(&mut self, i: usize, present: bool, value: T) {
        assert!(i <= self.size, "NullList::insert index out of range");
        self.presence.insert(i, false);
        self.size += 1;

        match self.mode {
            Mode::Flat => {
                if i < self.values.len() {
                    self.values.insert(i, T::default());
                } else {
                    self.values.resize(i + 1, T::default());
                }
            }
            Mode::Compressed => {
                // Nothing to shift yet; positions after `i` keep their rank
                // automatically since the new slot starts absent.
            }
        }

        if present {
            self.set(i, true, value);
        }
    }

    /// Removes the logical slot at `i`, shifting `(i..size)` down by one.
    ///
    /// # Panics
    /// Panics if `i >= size()`.
    pub fn remove(&mut self, i: usize) {
        assert!(i < self.size, "NullList::remove index out of range");
        if self.presence.get(i) {
            self.clear_position(i);
        }
        self.presence.remove(i);
        self.size -= 1;

        if let Mode::Flat = self.mode {
            if i < self.values.len() {
                self.values.remove(i);
            }
        }
    }

    pub fn clear(&mut self) {
        self.presence.clear();
        self.values.clear();
        self.cardinality = 0;
        self.size = 0;
        self.mode = Mode::Compressed;
    }

    /// Sets the physical/logical extent to `cap`, truncating or growing as
    /// needed. May trigger a mode re-decision.
    pub fn length(&mut self, cap: usize) {
        if cap < self.size {
            for i in (cap..self.size).rev() {
                self.remove(i);
            }
        } else {
            self.grow_size_to(cap);
        }
        self.redecide_mode();
    }

    /// Shrinks the logical size to `last_present + 1`.
    pub fn trim(&mut self) {
        let last = self.presence.last1();
        let new_size = if last < 0 { 0 } else { last as usize + 1 };
        self.length(new_size);
    }

    fn grow_size_to(&mut self, new_size: usize) {
        if new_size <= self.size {
            return;
        }
        self.presence.resize(new_size);
        if let Mode::Flat = self.mode {
            self.values.resize(new_size, T::default());
        }
        self.size = new_size;
    }

    /// Changes the flat-switch threshold, possibly triggering an immediate
    /// mode switch if the new threshold invalidates the current mode.
    pub fn set_flat_threshold(&mut self, flat_threshold: usize) {
        self.flat_threshold = flat_threshold;
        self.redecide_mode();
    }

    fn redecide_mode(&mut self) {
        match self.mode {
            Mode::Compressed if self.should_be_flat() => self.switch_to_flat(),
            Mode::Flat if self.should_be_compressed() => self.switch_to_compressed(),
            _ => {}
        }
    }

    fn switch_to_flat(&mut self) {
        if let Mode::Flat = self.mode {
            return;
        }
        let mut flat = vec![T::default(); self.size];
        let mut i = self.presence.next1(-1);
        let mut rank = 0usize;
        while i >= 0 {
            let idx = i as usize;
            flat[idx] = self.values[rank];
            rank += 1;
            i = self.presence.next1(i);
        }
        self.values = flat;
        self.mode = Mode::Flat;
    }

    fn switch_to_compressed(&mut self) {
        if let Mode::Compressed = self.mode {
            return;
        }
        let mut packed = Vec::with_capacity(self.cardinality);
        let mut i = self.presence.next1(-1);
        while i >= 0 {
            packed.push(self.values[i as usize]);
            i = self.presence.next1(i);
        }
        self.values = packed;
        self.mode = Mode::Compressed;
    }

    /// Returns the index of the first present position holding `value`, or
    /// `None`. Only present positions are scanned.
    pub fn index_of(&self, value: T) -> Option<usize>
    where
        T: PartialEq,
    {
        let mut i = self.presence.next1(-1);
        while i >= 0 {
            let idx = i as usize;
            if self.get(idx) == value {
                return Some(idx);
            }
            i = self.presence.next1(i);
        }
        None
    }

    /// Returns the index of the last present position holding `value`, or
    /// `None`. Only present positions are scanned.
    pub fn last_index_of(&self, value: T) -> Option<usize>
    where
        T: PartialEq,
    {
        let mut i = self.presence.prev1(self.size as isize);
        while i >= 0 {
            let idx = i as usize;
            if self.get(idx) == value {
                return Some(idx);
            }
            i = self.presence.prev1(i);
        }
        None
    }

    /// Copies `n` logical positions starting at `start` into `dst`,
    /// substituting `null_subst` for absent positions.
    ///
    /// # Panics
    /// Panics if `start + n > size()` or `dst.len() < n`.
    pub fn to_array(&self, start: usize, n: usize, dst: &mut [T], null_subst: T) {
        assert!(start + n <= self.size, "to_array range out of bounds");
        assert!(dst.len() >= n, "to_array destination too small");
        for offset in 0..n {
            let idx = start + offset;
            dst[offset] = self.get_opt(idx).unwrap_or(null_subst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_switch_preserves_sequence() {
        let mut nl: NullList<i32> = NullList::new(4);
        let sequence: [Option<i32>; 8] = [
            Some(1),
            None,
            Some(2),
            None,
            Some(3),
            None,
            Some(4),
            None,
        ];
        for (i, slot) in sequence.iter().enumerate() {
            match slot {
                Some(v) => nl.set(i, true, *v),
                None => nl.set(i, false, 0),
            }
        }
        assert!(nl.is_flat(), "cardinality 4 should have triggered flat mode");
        for (i, slot) in sequence.iter().enumerate() {
            assert_eq!(nl.get_opt(i), *slot, "mismatch at {i}");
        }
    }

    #[test]
    fn trim_switches_back_to_compressed() {
        let mut nl: NullList<i32> = NullList::new(4);
        for i in 0..8 {
            nl.set(i, i % 2 == 0, i as i32);
        }
        assert!(nl.is_flat());
        nl.remove(6); // removes a present value (4), cardinality now 3
        nl.remove(4); // removes another present value... indices shift
        nl.trim();
        assert!(!nl.is_flat());
    }

    #[test]
    fn insert_remove_identity() {
        let mut nl: NullList<i32> = NullList::new(2);
        for i in 0..5 {
            nl.set(i, true, i as i32 * 10);
        }
        let before: Vec<Option<i32>> = (0..nl.size()).map(|i| nl.get_opt(i)).collect();

        nl.insert(2, true, 999);
        nl.remove(2);

        let after: Vec<Option<i32>> = (0..nl.size()).map(|i| nl.get_opt(i)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn set_rules_cover_all_four_cases() {
        let mut nl: NullList<i32> = NullList::new(100); // stays compressed
        nl.set(0, false, 0); // absent -> absent: no-op
        assert!(!nl.has(0));
        nl.set(0, true, 5); // absent -> present
        assert_eq!(nl.get(0), 5);
        nl.set(0, true, 6); // present -> present overwrite
        assert_eq!(nl.get(0), 6);
        nl.set(0, false, 0); // present -> absent
        assert!(!nl.has(0));
        assert_eq!(nl.cardinality(), 0);
    }

    #[test]
    fn index_of_scans_only_present() {
        let mut nl: NullList<i32> = NullList::new(100);
        nl.set(0, true, 7);
        nl.set(1, false, 7); // absent position that would match if scanned
        nl.set(2, true, 7);
        assert_eq!(nl.index_of(7), Some(0));
        assert_eq!(nl.last_index_of(7), Some(2));
    }

    #[test]
    fn to_array_substitutes_nulls() {
        let mut nl: NullList<i32> = NullList::new(100);
        nl.set(0, true, 1);
        nl.set(1, false, 0);
        nl.set(2, true, 3);
        let mut dst = [0i32; 3];
        nl.to_array(0, 3, &mut dst, -1);
        assert_eq!(dst, [1, -1, 3]);
    }
}
