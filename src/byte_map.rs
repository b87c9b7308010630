//! A hash map keyed by byte strings.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::iter::FusedIterator;

use crate::config::TableConfig;
use crate::error::PutError;
use crate::error::TableError;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used by [`ByteMap`] unless another is supplied.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used by [`ByteMap`] unless another is supplied.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// The hasher builder used by [`ByteMap`] unless another is supplied.
        pub type DefaultHashBuilder = FnvBuildHasher;

        /// Fowler–Noll–Vo (FNV-1a) hasher.
        ///
        /// Unkeyed, so it offers no protection against chosen collisions.
        #[derive(Debug, Clone, Copy)]
        pub struct FnvHasher {
            hash: u64,
        }

        impl FnvHasher {
            const FNV_PRIME: u64 = 0x100000001B3;
            const FNV_OFFSET_BASIS: u64 = 0xCBF29CE484222325;
        }

        impl Default for FnvHasher {
            fn default() -> Self {
                Self {
                    hash: Self::FNV_OFFSET_BASIS,
                }
            }
        }

        impl core::hash::Hasher for FnvHasher {
            fn finish(&self) -> u64 {
                self.hash
            }

            fn write(&mut self, bytes: &[u8]) {
                for &byte in bytes {
                    self.hash ^= u64::from(byte);
                    self.hash = self.hash.wrapping_mul(Self::FNV_PRIME);
                }
            }
        }

        /// Builder for [`FnvHasher`].
        #[derive(Debug, Clone, Copy, Default)]
        pub struct FnvBuildHasher;

        impl BuildHasher for FnvBuildHasher {
            type Hasher = FnvHasher;

            fn build_hasher(&self) -> FnvHasher {
                FnvHasher::default()
            }
        }
    }
}

/// A hash map from byte strings to values of type `V`.
///
/// Keys are arbitrary byte sequences, including the empty sequence and
/// sequences containing zero bytes; two keys are equal exactly when their
/// bytes are. The map stores its own copy of every key. Values are owned by
/// the map and handed back on overwrite, removal, and draining.
///
/// Insertion is fallible: [`put`](Self::put) reports
/// [`TableError::Full`] when a key's probe sequence is still crowded after
/// growing, and [`TableError::OutOfMemory`] when growing fails.
///
/// # Examples
///
/// ```rust
/// use probe_map::ByteMap;
///
/// let mut counts: ByteMap<u32> = ByteMap::new();
///
/// for word in "the quick the fox the".split_whitespace() {
///     match counts.get_mut(word) {
///         Some(count) => *count += 1,
///         None => {
///             counts.put(word, 1).unwrap();
///         }
///     }
/// }
///
/// assert_eq!(counts.get("the"), Some(&3));
/// assert_eq!(counts.get("quick"), Some(&1));
/// assert_eq!(counts.get("dog"), None);
/// assert_eq!(counts.len(), 3);
/// ```
#[derive(Clone)]
pub struct ByteMap<V, S = DefaultHashBuilder> {
    table: HashTable<(Box<[u8]>, V)>,
    hash_builder: S,
}

impl<V, S> Debug for ByteMap<V, S>
where
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            let key: Cow<'_, str> = alloc::string::String::from_utf8_lossy(k);
            map.entry(&key, v);
        }
        map.finish()
    }
}

impl<V> ByteMap<V, DefaultHashBuilder> {
    /// Creates an empty map with the default configuration and hasher.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty map with room for at least `capacity` slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::ByteMap;
    /// #
    /// let map: ByteMap<u32> = ByteMap::with_capacity(100);
    /// assert_eq!(map.capacity(), 128);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(TableConfig::new().with_initial_capacity(capacity))
    }

    /// Creates an empty map from `config`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::{ByteMap, TableConfig};
    /// #
    /// let config = TableConfig::new().with_max_probe_length(8);
    /// let map: ByteMap<u32> = ByteMap::with_config(config);
    /// assert_eq!(map.config().max_probe_length(), 8);
    /// ```
    pub fn with_config(config: TableConfig) -> Self {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<V, S> ByteMap<V, S>
where
    S: BuildHasher,
{
    /// Creates an empty map with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use probe_map::ByteMap;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let map: ByteMap<String, _> = ByteMap::with_hasher(SimpleHasher);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_config_and_hasher(TableConfig::new(), hash_builder)
    }

    /// Creates an empty map from `config` with the given hasher builder.
    pub fn with_config_and_hasher(config: TableConfig, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_config(config),
            hash_builder,
        }
    }

    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        self.hash_builder.hash_one(key)
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the number of slots holding tombstones of removed entries.
    pub fn tombstones(&self) -> usize {
        self.table.tombstones()
    }

    /// Returns the configuration the map was created with.
    pub fn config(&self) -> &TableConfig {
        self.table.config()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all entries, keeping the capacity.
    pub fn clear(&mut self) {
        self.table.clear()
    }

    /// Grows the map so that `additional` more entries fit without crossing
    /// the load threshold.
    ///
    /// # Errors
    ///
    /// [`TableError::OutOfMemory`] if the required size overflows or cannot be
    /// allocated. The map is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::{ByteMap, TableError};
    /// #
    /// let mut map: ByteMap<u32> = ByteMap::new();
    /// map.reserve(100).unwrap();
    /// assert!(map.capacity() >= 143);
    ///
    /// assert_eq!(map.reserve(usize::MAX), Err(TableError::OutOfMemory));
    /// ```
    pub fn reserve(&mut self, additional: usize) -> Result<(), TableError> {
        self.table.reserve(additional)
    }

    /// Associates `value` with `key`.
    ///
    /// If the key was present, its value is replaced and the old value is
    /// returned; the stored key is kept. Otherwise the map copies the key and
    /// returns `Ok(None)`. The table may grow once in the process.
    ///
    /// # Errors
    ///
    /// On failure the rejected value comes back inside the [`PutError`], and
    /// the map holds the same entries as before the call.
    ///
    /// - [`TableError::Full`]: no slot within the probe bound, even after
    ///   doubling the table.
    /// - [`TableError::OutOfMemory`]: the larger table could not be allocated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::ByteMap;
    /// #
    /// let mut map = ByteMap::new();
    /// assert_eq!(map.put(b"key", "first").unwrap(), None);
    /// assert_eq!(map.put(b"key", "second").unwrap(), Some("first"));
    /// assert_eq!(map.get(b"key"), Some(&"second"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&mut self, key: impl AsRef<[u8]>, value: V) -> Result<Option<V>, PutError<V>> {
        let key = key.as_ref();
        let hash = self.hash(key);

        match self.table.try_entry(hash, |(k, _)| **k == *key) {
            Ok(TableEntry::Occupied(mut entry)) => {
                Ok(Some(core::mem::replace(&mut entry.get_mut().1, value)))
            }
            Ok(TableEntry::Vacant(entry)) => {
                entry.insert((Box::from(key), value));
                Ok(None)
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    key_len = key.len(),
                    len = self.table.len(),
                    capacity = self.table.capacity(),
                    "put rejected"
                );
                Err(PutError { error, value })
            }
        }
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::ByteMap;
    /// #
    /// let mut map = ByteMap::new();
    /// map.put("a", 1).unwrap();
    ///
    /// assert_eq!(map.get("a"), Some(&1));
    /// assert_eq!(map.get("b"), None);
    /// ```
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        let key = key.as_ref();
        self.table
            .find(self.hash(key), |(k, _)| **k == *key)
            .map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut V> {
        let key = key.as_ref();
        let hash = self.hash(key);
        self.table
            .find_mut(hash, |(k, _)| **k == *key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the map holds a value for `key`.
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key` from the map, returning its value.
    ///
    /// The freed slot becomes a tombstone until the next resize or clear.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::ByteMap;
    /// #
    /// let mut map = ByteMap::new();
    /// map.put("a", 1).unwrap();
    ///
    /// assert_eq!(map.remove("a"), Some(1));
    /// assert_eq!(map.remove("a"), None);
    /// assert_eq!(map.tombstones(), 1);
    /// ```
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key` from the map, returning the stored key and its value.
    pub fn remove_entry(&mut self, key: impl AsRef<[u8]>) -> Option<(Box<[u8]>, V)> {
        let key = key.as_ref();
        let hash = self.hash(key);
        self.table.remove(hash, |(k, _)| **k == *key)
    }

    /// Returns an iterator over the entries, in no particular order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::ByteMap;
    /// #
    /// let mut map = ByteMap::new();
    /// map.put("a", 1).unwrap();
    /// map.put("b", 2).unwrap();
    ///
    /// let mut pairs: Vec<_> = map.iter().collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [(&b"a"[..], &1), (&b"b"[..], &2)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the entries with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }

    /// Removes every entry, yielding the keys and values. The capacity is
    /// kept.
    ///
    /// Entries the iterator has not yet yielded are dropped along with it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_map::ByteMap;
    /// #
    /// let mut map = ByteMap::new();
    /// map.put("a", 1).unwrap();
    /// map.put("b", 2).unwrap();
    ///
    /// let total: u32 = map.drain().map(|(_, v)| v).sum();
    /// assert_eq!(total, 3);
    /// assert!(map.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Computes a histogram of entry displacements from their home slots.
    ///
    /// See [`HashTable::probe_histogram`].
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> alloc::vec::Vec<usize> {
        self.table.probe_histogram()
    }

    /// Returns occupancy and displacement statistics.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::hash_table::DebugStats {
        self.table.debug_stats()
    }
}

impl<V, S> Default for ByteMap<V, S>
where
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<'a, V, S> IntoIterator for &'a ByteMap<V, S>
where
    S: BuildHasher,
{
    type IntoIter = Iter<'a, V>;
    type Item = (&'a [u8], &'a V);

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<'a, V, S> IntoIterator for &'a mut ByteMap<V, S>
where
    S: BuildHasher,
{
    type IntoIter = IterMut<'a, V>;
    type Item = (&'a [u8], &'a mut V);

    fn into_iter(self) -> IterMut<'a, V> {
        self.iter_mut()
    }
}

/// An iterator over the entries of a [`ByteMap`].
pub struct Iter<'a, V> {
    inner: crate::hash_table::Iter<'a, (Box<[u8]>, V)>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&**k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// An iterator over the entries of a [`ByteMap`] with mutable values.
pub struct IterMut<'a, V> {
    inner: crate::hash_table::IterMut<'a, (Box<[u8]>, V)>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a [u8], &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&**k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

impl<V> FusedIterator for IterMut<'_, V> {}

/// An iterator over the keys of a [`ByteMap`].
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

/// An iterator over the values of a [`ByteMap`].
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

/// A draining iterator over the entries of a [`ByteMap`].
pub struct Drain<'a, V> {
    inner: crate::hash_table::Drain<'a, (Box<[u8]>, V)>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = (Box<[u8]>, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}

impl<V> FusedIterator for Drain<'_, V> {}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;
    use core::hash::Hasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k1: rng.try_next_u64().unwrap_or(0),
                k2: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    /// Sends every key to slot zero.
    #[derive(Clone, Default)]
    struct ZeroHashBuilder;

    struct ZeroHasher;

    impl Hasher for ZeroHasher {
        fn finish(&self) -> u64 {
            0
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    impl BuildHasher for ZeroHashBuilder {
        type Hasher = ZeroHasher;

        fn build_hasher(&self) -> ZeroHasher {
            ZeroHasher
        }
    }

    fn count_words<S: BuildHasher>(map: &mut ByteMap<u32, S>, words: &[&str]) {
        for word in words {
            match map.get_mut(word) {
                Some(count) => *count += 1,
                None => {
                    map.put(word, 1).unwrap();
                }
            }
        }
    }

    #[test]
    fn test_new_and_with_hasher() {
        let map: ByteMap<String> = ByteMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), 16);

        let map2 = ByteMap::<String, _>::with_hasher(SipHashBuilder::default());
        assert!(map2.is_empty());
        assert_eq!(map2.tombstones(), 0);
    }

    #[test]
    fn test_with_capacity_and_config() {
        let map: ByteMap<String> = ByteMap::with_capacity(100);
        assert_eq!(map.capacity(), 128);

        let config = TableConfig::new()
            .with_initial_capacity(5)
            .with_max_load_percent(50);
        let map2 = ByteMap::<String, _>::with_config_and_hasher(config, SipHashBuilder::default());
        assert_eq!(map2.capacity(), 16);
        assert_eq!(map2.config().max_load_percent(), 50);
    }

    #[test]
    fn test_put_and_get() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());

        assert_eq!(map.put("one", "hello".to_string()).unwrap(), None);
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());

        assert_eq!(map.get("one"), Some(&"hello".to_string()));
        assert_eq!(map.get(b"one"), Some(&"hello".to_string()));
        assert_eq!(map.get("two"), None);

        assert_eq!(
            map.put("one", "world".to_string()).unwrap(),
            Some("hello".to_string())
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("one"), Some(&"world".to_string()));
    }

    #[test]
    fn test_word_counts() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        count_words(&mut map, &["the", "quick", "the", "fox", "the"]);

        assert_eq!(map.get("the"), Some(&3));
        assert_eq!(map.get("quick"), Some(&1));
        assert_eq!(map.get("fox"), Some(&1));
        assert_eq!(map.len(), 3);

        let mut pairs: Vec<(Vec<u8>, u32)> = map.iter().map(|(k, v)| (k.to_vec(), *v)).collect();
        pairs.sort();
        assert_eq!(
            pairs,
            [
                (b"fox".to_vec(), 1),
                (b"quick".to_vec(), 1),
                (b"the".to_vec(), 3)
            ]
        );
    }

    #[test]
    fn test_key_bytes_are_exact() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        map.put(b"", 0).unwrap();
        map.put(b"a\0b", 1).unwrap();
        map.put(b"a\0c", 2).unwrap();
        map.put(b"ab", 3).unwrap();
        map.put(b"abc", 4).unwrap();
        map.put("Ab", 5).unwrap();

        assert_eq!(map.len(), 6);
        assert_eq!(map.get(b""), Some(&0));
        assert_eq!(map.get(b"a\0b"), Some(&1));
        assert_eq!(map.get(b"a\0c"), Some(&2));
        assert_eq!(map.get(b"ab"), Some(&3));
        assert_eq!(map.get(b"abc"), Some(&4));
        assert_eq!(map.get(b"Ab"), Some(&5));
        assert_eq!(map.get(b"a"), None);
        assert_eq!(map.get(b"a\0"), None);
    }

    #[test]
    fn test_key_is_copied() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        let mut buf = b"word".to_vec();
        map.put(&buf, 1).unwrap();

        buf[0] = b'c';
        assert_eq!(map.get(b"word"), Some(&1));
        assert_eq!(map.get(&buf), None);
    }

    #[test]
    fn test_get_mut() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        map.put("k", "hello".to_string()).unwrap();

        if let Some(value) = map.get_mut("k") {
            value.push_str(" world");
        }

        assert_eq!(map.get("k"), Some(&"hello world".to_string()));
        assert_eq!(map.get_mut("z"), None);
    }

    #[test]
    fn test_contains_key() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        assert!(!map.contains_key("k"));

        map.put("k", ()).unwrap();
        assert!(map.contains_key("k"));
        assert!(!map.contains_key("z"));
    }

    #[test]
    fn test_remove() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        map.put("a", "hello".to_string()).unwrap();
        map.put("b", "world".to_string()).unwrap();

        assert_eq!(map.remove("a"), Some("hello".to_string()));
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key("a"));
        assert!(map.contains_key("b"));
        assert_eq!(map.remove("a"), None);
        assert_eq!(map.remove("c"), None);

        assert_eq!(map.put("a", "again".to_string()).unwrap(), None);
        assert_eq!(map.get("a"), Some(&"again".to_string()));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_remove_entry() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        map.put("key", 42).unwrap();

        let (key, value) = map.remove_entry(b"key").unwrap();
        assert_eq!(&*key, b"key");
        assert_eq!(value, 42);
        assert!(map.remove_entry("key").is_none());
    }

    #[test]
    fn test_removal_keeps_colliding_keys_reachable() {
        let mut map = ByteMap::with_hasher(ZeroHashBuilder);
        map.put("a", 1).unwrap();
        map.put("b", 2).unwrap();
        map.put("c", 3).unwrap();

        assert_eq!(map.remove("a"), Some(1));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.tombstones(), 1);

        // The tombstone is the first free slot in the shared probe sequence.
        assert_eq!(map.put("d", 4).unwrap(), None);
        assert_eq!(map.tombstones(), 0);
        assert_eq!(map.len(), 3);

        // Overwriting a key that sits behind a tombstone must not duplicate it.
        map.remove("d");
        assert_eq!(map.put("c", 30).unwrap(), Some(3));
        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().count(), 2);
    }

    #[test]
    fn test_full_after_growth() {
        let mut map = ByteMap::with_hasher(ZeroHashBuilder);
        for i in 0..16u32 {
            map.put(i.to_le_bytes(), i).unwrap();
        }
        assert_eq!(map.len(), 16);

        let err = map.put(16u32.to_le_bytes(), 16).unwrap_err();
        assert_eq!(err.kind(), TableError::Full);
        assert_eq!(err.into_value(), 16);
        assert_eq!(map.capacity(), 64);
        assert_eq!(map.len(), 16);
        for i in 0..16u32 {
            assert_eq!(map.get(i.to_le_bytes()), Some(&i));
        }

        // Existing keys can still be overwritten.
        assert_eq!(map.put(3u32.to_le_bytes(), 300).unwrap(), Some(3));
    }

    #[test]
    fn test_growth_preserves_entries() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        for i in 0..1000u32 {
            map.put(i.to_string(), i).unwrap();
        }

        assert_eq!(map.len(), 1000);
        assert!(map.capacity().is_power_of_two());
        assert!(map.capacity() * 7 >= 1000 * 10);
        for i in 0..1000u32 {
            assert_eq!(map.get(i.to_string()), Some(&i));
        }
        assert_eq!(map.probe_histogram().iter().sum::<usize>(), 1000);
    }

    #[test]
    fn test_clear() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        map.put("a", 1).unwrap();
        map.put("b", 2).unwrap();
        map.remove("a");
        let capacity = map.capacity();

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.tombstones(), 0);
        assert_eq!(map.capacity(), capacity);
        assert!(!map.contains_key("b"));
    }

    #[test]
    fn test_reserve() {
        let mut map: ByteMap<u32, _> = ByteMap::with_hasher(SipHashBuilder::default());
        map.reserve(100).unwrap();
        let capacity = map.capacity();
        assert_eq!(capacity, 256);

        for i in 0..100u32 {
            map.put(i.to_le_bytes(), i).unwrap();
        }
        assert_eq!(map.capacity(), capacity);

        assert_eq!(map.reserve(usize::MAX), Err(TableError::OutOfMemory));
        assert_eq!(map.len(), 100);
    }

    #[test]
    fn test_iterators() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        map.put("a", 1).unwrap();
        map.put("b", 2).unwrap();
        map.put("c", 3).unwrap();

        assert_eq!(map.iter().len(), 3);

        let mut keys: Vec<&[u8]> = map.keys().collect();
        keys.sort();
        assert_eq!(keys, [&b"a"[..], &b"b"[..], &b"c"[..]]);

        let mut values: Vec<i32> = map.values().copied().collect();
        values.sort();
        assert_eq!(values, [1, 2, 3]);

        for (_, v) in map.iter_mut() {
            *v *= 10;
        }
        for (_, v) in &mut map {
            *v += 1;
        }
        let mut values: Vec<i32> = (&map).into_iter().map(|(_, v)| *v).collect();
        values.sort();
        assert_eq!(values, [11, 21, 31]);
    }

    #[test]
    fn test_drain() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        map.put("a", 1).unwrap();
        map.put("b", 2).unwrap();
        let capacity = map.capacity();

        let mut drained: Vec<(Box<[u8]>, i32)> = map.drain().collect();
        drained.sort();
        assert_eq!(drained.len(), 2);
        assert_eq!(&*drained[0].0, b"a");
        assert_eq!(drained[1].1, 2);

        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
        assert_eq!(map.put("a", 5).unwrap(), None);
    }

    #[test]
    fn test_debug_lossy_keys() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        map.put("k", 1).unwrap();
        assert_eq!(format!("{map:?}"), "{\"k\": 1}");

        map.clear();
        map.put(b"\xff", 2).unwrap();
        assert!(format!("{map:?}").ends_with(": 2}"));
        assert_eq!(map.get(b"\xff"), Some(&2));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        map.put("a", 1).unwrap();

        let mut cloned = map.clone();
        cloned.put("a", 2).unwrap();
        cloned.put("b", 3).unwrap();

        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.len(), 1);
        assert_eq!(cloned.get("a"), Some(&2));
        assert_eq!(cloned.len(), 2);
    }

    #[test]
    fn test_default_trait() {
        let map: ByteMap<i32, SipHashBuilder> = Default::default();
        assert!(map.is_empty());
    }

    #[test]
    fn test_complex_values() {
        let mut map = ByteMap::with_hasher(SipHashBuilder::default());
        map.put("list", vec![1, 2, 3]).unwrap();

        map.get_mut("list").unwrap().push(4);
        assert_eq!(map.get("list"), Some(&vec![1, 2, 3, 4]));
        assert_eq!(map.remove("list"), Some(vec![1, 2, 3, 4]));
    }
}
