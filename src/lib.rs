#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// A byte-keyed hash map built on the linear-probing [`HashTable`].
///
/// This module provides [`ByteMap`], which hashes byte-string keys with a
/// configurable hasher and stores owned copies of them next to their values.
pub mod byte_map;

pub mod config;

pub mod error;

pub mod hash_table;

pub use byte_map::ByteMap;
pub use byte_map::DefaultHashBuilder;
pub use config::TableConfig;
pub use error::PutError;
pub use error::TableError;
#[cfg(feature = "stats")]
pub use hash_table::DebugStats;
pub use hash_table::HashTable;
