use super::Table;
use crate::{tools::contains_helper, Error};
use tracing::debug;

impl Table {
    /// Returns the set union of the receiver and `other`: every distinct tuple of either
    /// table exactly once, tuples of the receiver first, each in the order it first
    /// appears. The result has the schema of the receiver.
    ///
    /// Fails with [`Error::IncompatibleTables`] unless the tables have the same arity and
    /// the same domain at every position.
    ///
    /// Each candidate is looked up in the tuples of the result accumulated so far.
    pub fn union(&self, other: &Table) -> Result<Table, Error> {
        debug!("RA> {}.union ({})", self.name(), other.name());
        self.compatible(other)?;

        let mut result = self.derive(self.schema.renamed(self.derived_name()))?;
        for tuple in self.tuples().chain(other.tuples()) {
            let tuple = tuple?;
            if !contains_helper(result.tuples(), &tuple)? {
                result.push(tuple)?;
            }
        }
        Ok(result)
    }
}
