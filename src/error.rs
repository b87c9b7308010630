//! Failure conditions reported by the table.
//!
//! A missing key is not an error: lookups and removals return `Option`.

use core::fmt;

/// An operational failure while inserting into or growing a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// No free slot was found within the probe bound, even after growing the
    /// table once.
    #[error("no free slot within the probe bound after growing the table")]
    Full,
    /// Allocating a larger slot array failed, or its size overflowed.
    #[error("allocation failed while growing the table")]
    OutOfMemory,
}

/// The error returned by [`ByteMap::put`](crate::ByteMap::put).
///
/// Carries the rejected value back to the caller. The map is left as it was
/// before the call, apart from a growth step that completed.
pub struct PutError<V> {
    /// Why the value could not be stored.
    pub error: TableError,
    /// The value that was not inserted.
    pub value: V,
}

impl<V> PutError<V> {
    /// Returns the failure condition.
    pub fn kind(&self) -> TableError {
        self.error
    }

    /// Takes back the value that was not inserted.
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V> fmt::Debug for PutError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PutError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<V> fmt::Display for PutError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to insert value: {}", self.error)
    }
}

impl<V> core::error::Error for PutError<V> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            TableError::Full.to_string(),
            "no free slot within the probe bound after growing the table"
        );
        let err = PutError {
            error: TableError::OutOfMemory,
            value: 7,
        };
        assert_eq!(
            err.to_string(),
            "failed to insert value: allocation failed while growing the table"
        );
        assert_eq!(err.kind(), TableError::OutOfMemory);
        assert_eq!(err.into_value(), 7);
    }

    #[test]
    fn source_is_table_error() {
        let err = PutError {
            error: TableError::Full,
            value: (),
        };
        let source = core::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some(TableError::Full.to_string().as_str()));
    }
}
