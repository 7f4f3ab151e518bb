use super::Table;
use crate::{tools::contains_helper, Error};
use tracing::debug;

impl Table {
    /// Returns the tuples of the receiver that do not appear in `other`, in the order of
    /// the receiver. Duplicates in the receiver are kept unless they appear in `other`.
    ///
    /// Fails with [`Error::IncompatibleTables`] unless the tables have the same arity and
    /// the same domain at every position.
    ///
    /// **Example**:
    /// ```rust
    /// use reltab::{tuple, Database};
    ///
    /// let db = Database::new();
    /// let mut a = db.create_table("a", "title year", "String Integer", "title").unwrap();
    /// let mut b = db.create_table("b", "title year", "String Integer", "title").unwrap();
    /// a.insert(tuple!["Rocky", 1985]).unwrap();
    /// b.insert(tuple!["Rocky", 1985]).unwrap();
    /// b.insert(tuple!["Rambo", 1978]).unwrap();
    ///
    /// assert!(a.minus(&b).unwrap().is_empty());
    /// assert_eq!(vec![tuple!["Rambo", 1978]], b.minus(&a).unwrap().to_vec().unwrap());
    /// ```
    pub fn minus(&self, other: &Table) -> Result<Table, Error> {
        debug!("RA> {}.minus ({})", self.name(), other.name());
        self.compatible(other)?;

        let mut result = self.derive(self.schema.renamed(self.derived_name()))?;
        for tuple in self.tuples() {
            let tuple = tuple?;
            if !contains_helper(other.tuples(), &tuple)? {
                result.push(tuple)?;
            }
        }
        Ok(result)
    }
}
