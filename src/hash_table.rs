//! An open-addressing hash table with linear probing and tombstones.
//!
//! [`HashTable`] stores values of type `T` together with their `u64` hash.
//! Like the raw tables of other hash map crates, it never hashes anything
//! itself: every operation takes the hash of the value it is looking for and
//! an equality predicate. [`ByteMap`](crate::ByteMap) builds the keyed map
//! interface on top of it.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;

use crate::config::TableConfig;
use crate::error::TableError;

#[derive(Clone)]
enum Slot<T> {
    /// Never used since the last rehash.
    Empty,
    Occupied { hash: u64, value: T },
    /// Previously occupied. Lookups probe past it, insertions may reuse it.
    Tombstone,
}

/// Result of walking a probe sequence for an insertion.
enum Probe {
    Found(usize),
    Vacant(usize),
    /// The key is absent and no slot within the probe bound can take it.
    Exhausted,
}

/// Debug statistics for hash table analysis.
///
/// Available in tests and with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries currently in the table
    pub len: usize,
    /// Number of occupied or tombstoned slots
    pub used: usize,
    /// Number of tombstoned slots
    pub tombstones: usize,
    /// Total number of slots allocated
    pub capacity: usize,
    /// Load factor (used / capacity)
    pub load_factor: f64,
    /// Largest distance of any entry from its home slot
    pub max_displacement: usize,
    /// Mean distance of the entries from their home slots
    pub mean_displacement: f64,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {} live, {} tombstones, {}/{} slots used ({:.2}% load factor)",
            self.len,
            self.tombstones,
            self.used,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Displacement: max {}, mean {:.02}",
            self.max_displacement, self.mean_displacement
        );
    }
}

/// A hash table using open addressing with linear probing.
///
/// Slots are either empty, occupied, or tombstones left behind by removals.
/// Insertions only place entries within [`TableConfig::max_probe_length`]
/// slots of their home slot; when that is impossible, or when the share of
/// occupied and tombstoned slots would exceed the load threshold, the table
/// doubles its slot array and re-inserts every entry, dropping all tombstones.
///
/// Growth allocates fallibly, so insertion returns a [`TableError`] rather
/// than aborting when memory runs out.
///
/// ## Example
///
/// ```rust
/// use probe_map::hash_table::Entry;
/// use probe_map::HashTable;
///
/// let mut table: HashTable<(u32, &str)> = HashTable::new();
///
/// match table.try_entry(7, |&(k, _)| k == 7).unwrap() {
///     Entry::Vacant(entry) => {
///         entry.insert((7, "seven"));
///     }
///     Entry::Occupied(_) => unreachable!(),
/// }
///
/// assert_eq!(table.find(7, |&(k, _)| k == 7), Some(&(7, "seven")));
/// assert_eq!(table.find(8, |&(k, _)| k == 8), None);
/// ```
#[derive(Clone)]
pub struct HashTable<T> {
    slots: Box<[Slot<T>]>,
    /// Occupied slots
    len: usize,
    /// Occupied and tombstoned slots
    used: usize,
    config: TableConfig,
}

impl<T> Debug for HashTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let layout: alloc::string::String = self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Empty => '.',
                Slot::Occupied { .. } => '#',
                Slot::Tombstone => 'x',
            })
            .collect();

        f.debug_struct("HashTable")
            .field("len", &self.len)
            .field("used", &self.used)
            .field("capacity", &self.slots.len())
            .field("slots", &layout)
            .finish()
    }
}

impl<T> Default for HashTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HashTable<T> {
    /// Creates an empty table with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TableConfig::new())
    }

    /// Creates an empty table with at least `capacity` slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::HashTable;
    /// #
    /// let table: HashTable<u64> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 128);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(TableConfig::new().with_initial_capacity(capacity))
    }

    /// Creates an empty table from `config`.
    ///
    /// Allocation failure here is not reported: it aborts like any other
    /// infallible allocation.
    pub fn with_config(config: TableConfig) -> Self {
        Self {
            slots: empty_slots(config.slot_count()),
            len: 0,
            used: 0,
            config,
        }
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied or tombstoned slots.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Returns the number of tombstoned slots.
    pub fn tombstones(&self) -> usize {
        self.used - self.len
    }

    /// Returns the configuration the table was created with.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[inline(always)]
    fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline(always)]
    fn home(&self, hash: u64) -> usize {
        hash as usize & self.mask()
    }

    /// Index of the slot holding the matching entry.
    ///
    /// Tombstones never end the search; an empty slot does. At most
    /// `capacity` slots are examined.
    fn find_index(&self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<usize> {
        if self.len == 0 {
            return None;
        }

        let mask = self.mask();
        let mut index = self.home(hash);
        for _ in 0..self.slots.len() {
            match &self.slots[index] {
                Slot::Occupied { hash: h, value } if *h == hash && eq(value) => {
                    return Some(index);
                }
                Slot::Empty => return None,
                _ => {}
            }
            index = (index + 1) & mask;
        }

        None
    }

    /// Walks the probe sequence of `hash` looking for a matching entry, while
    /// remembering the first empty or tombstoned slot within the probe bound.
    fn probe(&self, hash: u64, eq: &impl Fn(&T) -> bool) -> Probe {
        let mask = self.mask();
        let bound = self.config.max_probe_length();
        let mut index = self.home(hash);
        let mut insert_slot = None;

        for distance in 0..self.slots.len() {
            match &self.slots[index] {
                Slot::Occupied { hash: h, value } => {
                    if *h == hash && eq(value) {
                        return Probe::Found(index);
                    }
                }
                Slot::Tombstone => {
                    if insert_slot.is_none() && distance < bound {
                        insert_slot = Some(index);
                    }
                }
                Slot::Empty => {
                    if insert_slot.is_none() && distance < bound {
                        insert_slot = Some(index);
                    }
                    break;
                }
            }
            index = (index + 1) & mask;
        }

        match insert_slot {
            Some(index) => Probe::Vacant(index),
            None => Probe::Exhausted,
        }
    }

    /// Returns a reference to the matching entry, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.try_entry(3, |&n: &u32| n == 3).unwrap().or_insert(3);
    ///
    /// assert_eq!(table.find(3, |&n| n == 3), Some(&3));
    /// assert_eq!(table.find(4, |&n| n == 4), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&T> {
        let index = self.find_index(hash, eq)?;
        match &self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the matching entry, if any.
    ///
    /// The part of the entry that `hash` and `eq` look at must not be changed.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&mut T> {
        let index = self.find_index(hash, eq)?;
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Removes the matching entry and returns it.
    ///
    /// The slot becomes a tombstone, so [`Self::used()`] does not change.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.try_entry(42, |&n: &u64| n == 42).unwrap().or_insert(42);
    ///
    /// assert_eq!(table.remove(42, |&n| n == 42), Some(42));
    /// assert!(table.is_empty());
    /// assert_eq!(table.tombstones(), 1);
    ///
    /// assert_eq!(table.remove(99, |&n| n == 99), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<T> {
        let index = self.find_index(hash, eq)?;
        self.take_slot(index)
    }

    fn take_slot(&mut self, index: usize) -> Option<T> {
        match core::mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.len -= 1;
                Some(value)
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Gets the entry for `hash` and `eq`, growing the table first if a new
    /// entry could not be placed otherwise.
    ///
    /// A vacant entry is returned when no matching entry exists and a slot
    /// within the probe bound is free. If no such slot exists, or filling an
    /// empty slot would exceed the load threshold, the table doubles once and
    /// probes again.
    ///
    /// # Errors
    ///
    /// - [`TableError::OutOfMemory`] if the larger slot array cannot be
    ///   allocated. The table is left untouched.
    /// - [`TableError::Full`] if the probe bound is still exceeded after
    ///   growing. The grown table remains valid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::HashTable;
    /// # use probe_map::hash_table::Entry;
    /// #
    /// let mut table: HashTable<(u64, u32)> = HashTable::new();
    ///
    /// for word in [1, 2, 1, 1] {
    ///     match table.try_entry(word, |&(k, _)| k == word).unwrap() {
    ///         Entry::Vacant(entry) => {
    ///             entry.insert((word, 1));
    ///         }
    ///         Entry::Occupied(mut entry) => entry.get_mut().1 += 1,
    ///     }
    /// }
    ///
    /// assert_eq!(table.find(1, |&(k, _)| k == 1), Some(&(1, 3)));
    /// ```
    pub fn try_entry(
        &mut self,
        hash: u64,
        eq: impl Fn(&T) -> bool,
    ) -> Result<Entry<'_, T>, TableError> {
        let index = match self.probe(hash, &eq) {
            Probe::Found(index) => {
                return Ok(Entry::Occupied(OccupiedEntry { table: self, index }));
            }
            Probe::Vacant(index)
                if matches!(self.slots[index], Slot::Tombstone)
                    || !self.config.exceeds_load(self.used + 1, self.slots.len()) =>
            {
                index
            }
            Probe::Vacant(_) | Probe::Exhausted => {
                let slots = self
                    .slots
                    .len()
                    .checked_mul(2)
                    .ok_or(TableError::OutOfMemory)
                    .inspect_err(|_| {
                        tracing::warn!(capacity = self.slots.len(), "table capacity overflow")
                    })?;
                self.rehash(slots)?;

                match self.probe(hash, &eq) {
                    Probe::Found(index) => {
                        return Ok(Entry::Occupied(OccupiedEntry { table: self, index }));
                    }
                    Probe::Vacant(index) => index,
                    Probe::Exhausted => {
                        tracing::warn!(
                            capacity = self.slots.len(),
                            len = self.len,
                            max_probe_length = self.config.max_probe_length(),
                            "no free slot within the probe bound after growing"
                        );
                        return Err(TableError::Full);
                    }
                }
            }
        };

        Ok(Entry::Vacant(VacantEntry {
            table: self,
            hash,
            index,
        }))
    }

    /// Makes room for `additional` more entries without exceeding the load
    /// threshold.
    ///
    /// Grows to the smallest sufficient power of two, or rehashes in place
    /// when only tombstones are in the way. Insertions can still trigger a
    /// growth step if their probe sequences are crowded.
    ///
    /// # Errors
    ///
    /// [`TableError::OutOfMemory`] if the required size overflows or cannot be
    /// allocated. The table is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::HashTable;
    /// #
    /// let mut table: HashTable<u32> = HashTable::new();
    /// table.reserve(1000).unwrap();
    /// assert!(table.capacity() >= 1024);
    /// ```
    pub fn reserve(&mut self, additional: usize) -> Result<(), TableError> {
        let required = self
            .used
            .checked_add(additional)
            .ok_or(TableError::OutOfMemory)?;
        if !self.config.exceeds_load(required, self.slots.len()) {
            return Ok(());
        }

        let live = self
            .len
            .checked_add(additional)
            .ok_or(TableError::OutOfMemory)?;
        let slots = self
            .config
            .slots_for(live)
            .ok_or(TableError::OutOfMemory)?
            .max(self.slots.len());
        self.rehash(slots)
    }

    /// Moves every entry into a fresh array of `slots` slots.
    ///
    /// The new array is allocated before the old one is touched.
    #[cold]
    fn rehash(&mut self, slots: usize) -> Result<(), TableError> {
        debug_assert!(slots.is_power_of_two());
        debug_assert!(slots >= self.len);

        tracing::debug!(
            from = self.slots.len(),
            to = slots,
            len = self.len,
            tombstones = self.tombstones(),
            "resizing table"
        );

        let mut new_slots = Vec::new();
        new_slots.try_reserve_exact(slots).map_err(|err| {
            tracing::warn!(slots, error = %err, "failed to allocate slot array");
            TableError::OutOfMemory
        })?;
        new_slots.resize_with(slots, || Slot::Empty);

        let old_slots = core::mem::replace(&mut self.slots, new_slots.into_boxed_slice());
        let mask = self.mask();
        for slot in old_slots.into_vec() {
            let Slot::Occupied { hash, value } = slot else {
                continue;
            };

            let mut index = hash as usize & mask;
            while !matches!(self.slots[index], Slot::Empty) {
                index = (index + 1) & mask;
            }
            self.slots[index] = Slot::Occupied { hash, value };
        }

        self.used = self.len;
        Ok(())
    }

    /// Removes all entries, keeping the capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.try_entry(1, |&n: &u64| n == 1).unwrap().or_insert(1);
    /// table.try_entry(2, |&n: &u64| n == 2).unwrap().or_insert(2);
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.used(), 0);
    /// ```
    pub fn clear(&mut self) {
        if self.used == 0 {
            return;
        }
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.len = 0;
        self.used = 0;
    }

    /// Returns an iterator over all entries in slot order.
    ///
    /// Slot order is unrelated to insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            iter: self.slots.iter(),
            len: self.len,
        }
    }

    /// Returns an iterator over mutable references to all entries.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            iter: self.slots.iter_mut(),
            len: self.len,
        }
    }

    /// Returns an iterator that removes and yields all entries, keeping the
    /// capacity.
    ///
    /// Note: Forgetting the returned `Drain` (e.g. via
    /// [`core::mem::forget()`]) and using the table afterwards leaves entries
    /// in slots that the table no longer counts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.try_entry(1, |&n: &u64| n == 1).unwrap().or_insert(1);
    /// table.try_entry(2, |&n: &u64| n == 2).unwrap().or_insert(2);
    ///
    /// let mut values: Vec<u64> = table.drain().collect();
    /// values.sort();
    /// assert_eq!(values, [1, 2]);
    /// assert!(table.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        let len = self.len;
        self.len = 0;
        self.used = 0;
        Drain {
            iter: self.slots.iter_mut(),
            len,
        }
    }

    /// Computes a histogram of the distances between entries and their home
    /// slots.
    ///
    /// Index `d` counts the entries stored `d` slots past their home slot. The
    /// last bin, at index [`TableConfig::max_probe_length`], collects every
    /// entry at or beyond that distance, which only a rehash can produce.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> Vec<usize> {
        let bound = self.config.max_probe_length();
        let mut hist = alloc::vec![0usize; bound + 1];

        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied { hash, .. } = slot {
                let displacement = index.wrapping_sub(self.home(*hash)) & self.mask();
                hist[displacement.min(bound)] += 1;
            }
        }

        hist
    }

    /// Returns occupancy and displacement statistics.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let mut max_displacement = 0;
        let mut total_displacement = 0;

        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied { hash, .. } = slot {
                let displacement = index.wrapping_sub(self.home(*hash)) & self.mask();
                max_displacement = max_displacement.max(displacement);
                total_displacement += displacement;
            }
        }

        DebugStats {
            len: self.len,
            used: self.used,
            tombstones: self.tombstones(),
            capacity: self.slots.len(),
            load_factor: self.used as f64 / self.slots.len() as f64,
            max_displacement,
            mean_displacement: if self.len == 0 {
                0.0
            } else {
                total_displacement as f64 / self.len as f64
            },
        }
    }
}

fn empty_slots<T>(slots: usize) -> Box<[Slot<T>]> {
    let mut data = Vec::with_capacity(slots);
    data.resize_with(slots, || Slot::Empty);
    data.into_boxed_slice()
}

/// A view into a single entry in the table, which may be vacant or occupied.
///
/// This enum is constructed from the [`try_entry`] method on [`HashTable`].
///
/// [`try_entry`]: HashTable::try_entry
pub enum Entry<'a, T> {
    /// No matching entry exists; a slot has been set aside for one
    Vacant(VacantEntry<'a, T>),
    /// A matching entry exists
    Occupied(OccupiedEntry<'a, T>),
}

impl<'a, T> Entry<'a, T> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the entry.
    pub fn or_insert(self, default: T) -> &'a mut T {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the entry.
    pub fn or_insert_with(self, default: impl FnOnce() -> T) -> &'a mut T {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }
}

/// A free slot, reserved by [`HashTable::try_entry`], for an entry that is
/// not in the table.
pub struct VacantEntry<'a, T> {
    table: &'a mut HashTable<T>,
    hash: u64,
    index: usize,
}

impl<'a, T> VacantEntry<'a, T> {
    /// Inserts `value` into the reserved slot.
    ///
    /// `value` must hash to the hash passed to [`HashTable::try_entry`].
    pub fn insert(self, value: T) -> &'a mut T {
        let VacantEntry { table, hash, index } = self;

        if matches!(table.slots[index], Slot::Empty) {
            table.used += 1;
        } else {
            tracing::trace!(index, "reusing tombstone");
        }
        table.len += 1;

        let slot = &mut table.slots[index];
        *slot = Slot::Occupied { hash, value };
        match slot {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!(),
        }
    }
}

/// An entry that is present in the table.
pub struct OccupiedEntry<'a, T> {
    table: &'a mut HashTable<T>,
    index: usize,
}

impl<'a, T> OccupiedEntry<'a, T> {
    /// Gets a reference to the entry.
    pub fn get(&self) -> &T {
        match &self.table.slots[self.index] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!(),
        }
    }

    /// Gets a mutable reference to the entry.
    pub fn get_mut(&mut self) -> &mut T {
        match &mut self.table.slots[self.index] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!(),
        }
    }

    /// Converts into a mutable reference bound to the table's lifetime.
    pub fn into_mut(self) -> &'a mut T {
        match &mut self.table.slots[self.index] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!(),
        }
    }

    /// Removes the entry, leaving a tombstone.
    pub fn remove(self) -> T {
        match self.table.take_slot(self.index) {
            Some(value) => value,
            None => unreachable!(),
        }
    }
}

/// An iterator over the entries of a [`HashTable`] in slot order.
///
/// This `struct` is created by [`HashTable::iter()`].
pub struct Iter<'a, T> {
    iter: core::slice::Iter<'a, Slot<T>>,
    len: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        for slot in self.iter.by_ref() {
            if let Slot::Occupied { value, .. } = slot {
                self.len -= 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// A mutable iterator over the entries of a [`HashTable`] in slot order.
///
/// This `struct` is created by [`HashTable::iter_mut()`].
pub struct IterMut<'a, T> {
    iter: core::slice::IterMut<'a, Slot<T>>,
    len: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        for slot in self.iter.by_ref() {
            if let Slot::Occupied { value, .. } = slot {
                self.len -= 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// A draining iterator over the entries of a [`HashTable`].
///
/// This `struct` is created by [`HashTable::drain()`]. Every slot, including
/// tombstones, is reset to empty by the time the iterator is dropped.
pub struct Drain<'a, T> {
    iter: core::slice::IterMut<'a, Slot<T>>,
    len: usize,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        for slot in self.iter.by_ref() {
            if let Slot::Occupied { value, .. } = core::mem::replace(slot, Slot::Empty) {
                self.len -= 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> FusedIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        for slot in self.iter.by_ref() {
            *slot = Slot::Empty;
        }
    }
}
