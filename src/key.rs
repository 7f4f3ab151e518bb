use crate::{Error, Value};
use std::{cmp::Ordering, fmt};

/// Is the key of a tuple in an [`Index`]: the values of the key attributes of the tuple,
/// in the order the schema lists its key attributes.
///
/// Keys are ordered lexicographically, so the first key attribute takes precedence. The
/// order is total: values of different domains, which a well-formed key never mixes with
/// another key of the same table, are ranked by domain.
///
/// [`Index`]: crate::Index
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeKey(Vec<Value>);

impl CompositeKey {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Returns the values of the key.
    #[inline(always)]
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compares the receiver with `other` position by position, failing on the first pair
    /// of values that belong to different domains.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, Error> {
        for (left, right) in self.0.iter().zip(other.0.iter()) {
            match left.try_cmp(right)? {
                Ordering::Equal => continue,
                ordering => return Ok(ordering),
            }
        }
        Ok(self.0.len().cmp(&other.0.len()))
    }
}

impl Ord for CompositeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (left, right) in self.0.iter().zip(other.0.iter()) {
            match left.total_cmp(right) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

impl PartialOrd for CompositeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Vec<Value>> for CompositeKey {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "}}")
    }
}
