//! Tunable parameters of a [`HashTable`](crate::HashTable).

/// Smallest number of slots a table ever allocates.
pub const MIN_CAPACITY: usize = 16;

/// Default bound on the distance between a key's home slot and the slot it is
/// inserted into.
pub const DEFAULT_MAX_PROBE_LENGTH: usize = 16;

/// Default bound on the share of slots, in percent, that may be occupied or
/// tombstoned before the table grows.
pub const DEFAULT_MAX_LOAD_PERCENT: u8 = 70;

/// Sizing and growth policy for a [`HashTable`](crate::HashTable).
///
/// The defaults (16 initial slots, a probe bound of 16, growth at 70 % load)
/// suit general workloads; none of them are part of the table's contract.
///
/// # Examples
///
/// ```rust
/// use probe_map::TableConfig;
///
/// let config = TableConfig::new()
///     .with_initial_capacity(100)
///     .with_max_probe_length(8)
///     .with_max_load_percent(50);
///
/// assert_eq!(config.slot_count(), 128);
/// assert_eq!(config.max_probe_length(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableConfig {
    initial_capacity: usize,
    max_probe_length: usize,
    max_load_percent: u8,
}

impl TableConfig {
    /// Creates the default configuration.
    pub const fn new() -> Self {
        Self {
            initial_capacity: MIN_CAPACITY,
            max_probe_length: DEFAULT_MAX_PROBE_LENGTH,
            max_load_percent: DEFAULT_MAX_LOAD_PERCENT,
        }
    }

    /// Sets the number of slots requested at construction.
    ///
    /// The value is rounded up to a power of two and never drops below
    /// [`MIN_CAPACITY`].
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets how far from its home slot an entry may be inserted.
    ///
    /// # Panics
    ///
    /// Panics if `length` is zero.
    #[track_caller]
    pub const fn with_max_probe_length(mut self, length: usize) -> Self {
        assert!(length > 0, "the probe length bound must be positive");
        self.max_probe_length = length;
        self
    }

    /// Sets the load, in percent of all slots, above which the table grows.
    ///
    /// # Panics
    ///
    /// Panics if `percent` is not within `1..=100`.
    #[track_caller]
    pub const fn with_max_load_percent(mut self, percent: u8) -> Self {
        assert!(
            percent > 0 && percent <= 100,
            "the load threshold must be within 1..=100 percent"
        );
        self.max_load_percent = percent;
        self
    }

    /// The number of slots requested at construction, before rounding.
    pub const fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// The probe length bound for insertions.
    pub const fn max_probe_length(&self) -> usize {
        self.max_probe_length
    }

    /// The load threshold in percent.
    pub const fn max_load_percent(&self) -> u8 {
        self.max_load_percent
    }

    /// The number of slots a table built from this configuration starts with.
    ///
    /// # Panics
    ///
    /// Panics if the rounded capacity does not fit in a `usize`.
    #[track_caller]
    pub fn slot_count(&self) -> usize {
        let requested = self.initial_capacity.max(MIN_CAPACITY);
        match requested.checked_next_power_of_two() {
            Some(slots) => slots,
            None => panic!("requested capacity {requested} is too large"),
        }
    }

    /// Returns `true` if holding `used` occupied or tombstoned slots out of
    /// `slots` exceeds the load threshold.
    #[inline]
    pub(crate) fn exceeds_load(&self, used: usize, slots: usize) -> bool {
        used as u128 * 100 > slots as u128 * self.max_load_percent as u128
    }

    /// Smallest power-of-two slot count that keeps `entries` within the load
    /// threshold, or `None` if no such `usize` exists.
    pub(crate) fn slots_for(&self, entries: usize) -> Option<usize> {
        let needed = (entries as u128 * 100).div_ceil(self.max_load_percent as u128);
        usize::try_from(needed)
            .ok()?
            .max(MIN_CAPACITY)
            .checked_next_power_of_two()
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}
