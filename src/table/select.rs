use super::{Row, Table};
use crate::{CompositeKey, Error, Tuple};
use tracing::debug;

impl Table {
    /// Returns a table with the schema of the receiver and the tuples for which
    /// `predicate` returns true, in their original order.
    ///
    /// **Example**:
    /// ```rust
    /// use reltab::{tuple, Database, Value};
    ///
    /// let db = Database::new();
    /// let mut movie = db
    ///     .create_table("movie", "title year", "String Integer", "title year")
    ///     .unwrap();
    /// movie.insert(tuple!["Star_Wars", 1977]).unwrap();
    /// movie.insert(tuple!["Rocky", 1985]).unwrap();
    ///
    /// let year = movie.col("year").unwrap();
    /// let recent = movie.select(|t| t[year] > Value::from(1980)).unwrap();
    /// assert_eq!(vec![tuple!["Rocky", 1985]], recent.to_vec().unwrap());
    /// ```
    pub fn select<P>(&self, mut predicate: P) -> Result<Table, Error>
    where
        P: FnMut(&Tuple) -> bool,
    {
        self.try_select(|tuple| Ok(predicate(tuple)))
    }

    /// Like [`Table::select`] for a fallible `predicate`. The first error of the predicate
    /// is returned in place of the result.
    ///
    /// **Example**:
    /// ```rust
    /// use reltab::{tuple, Database, Error, Value};
    /// use std::cmp::Ordering;
    ///
    /// let db = Database::new();
    /// let mut movie = db
    ///     .create_table("movie", "title year", "String Integer", "title year")
    ///     .unwrap();
    /// movie.insert(tuple!["Star_Wars", 1977]).unwrap();
    ///
    /// let year = movie.col("year").unwrap();
    /// let result = movie.try_select(|t| {
    ///     Ok(t[year].try_cmp(&Value::from(3000i64))? == Ordering::Greater)
    /// });
    /// assert!(matches!(result, Err(Error::DomainMismatch { .. })));
    /// ```
    pub fn try_select<P>(&self, mut predicate: P) -> Result<Table, Error>
    where
        P: FnMut(&Tuple) -> Result<bool, Error>,
    {
        debug!("RA> {}.select (<predicate>)", self.name());
        let mut result = self.derive(self.schema.renamed(self.derived_name()))?;
        for tuple in self.tuples() {
            let tuple = tuple?;
            if predicate(&tuple)? {
                result.push(tuple)?;
            }
        }
        Ok(result)
    }

    /// Returns a table with the schema of the receiver holding the tuple indexed under
    /// `key`, or no tuple if the key is not in the index.
    pub fn select_key(&self, key: &CompositeKey) -> Result<Table, Error> {
        debug!("RA> {}.select ({})", self.name(), Row(key.values()));
        let mut result = self.derive(self.schema.renamed(self.derived_name()))?;
        if let Some(tuple) = self.get(key)? {
            result.push(tuple)?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::movie;
    use crate::{key, tuple, Database, Domain, Error, Value};
    use std::cmp::Ordering;

    #[test]
    fn test_select() {
        let db = Database::new();
        let movie = movie(&db);
        {
            let studio = movie.col("studioName").unwrap();
            let result = movie
                .select(|t| t[studio] == Value::from("Universal"))
                .unwrap();
            assert_eq!(movie.schema().attributes(), result.schema().attributes());
            assert_eq!(movie.schema().key(), result.schema().key());
            assert_eq!(
                vec![
                    tuple!["Rocky", 1985, 200, "action", "Universal", 12125],
                    tuple!["Rambo", 1978, 100, "action", "Universal", 32355],
                ],
                result.to_vec().unwrap()
            );
            assert!(result.index().is_empty());
        }
        {
            let result = movie.select(|_| false).unwrap();
            assert!(result.is_empty());
        }
        {
            let result = movie.select(|_| true).unwrap();
            assert_eq!(movie.to_vec().unwrap(), result.to_vec().unwrap());
        }
    }

    #[test]
    fn test_select_with_stateful_predicate() {
        let db = Database::new();
        let movie = movie(&db);
        let mut seen = 0;
        let result = movie
            .select(|_| {
                seen += 1;
                seen % 2 == 0
            })
            .unwrap();
        assert_eq!(4, seen);
        assert_eq!(2, result.len());
    }

    #[test]
    fn test_select_key() {
        let db = Database::new();
        let movie = movie(&db);
        {
            let result = movie.select_key(&key!["Star_Wars", 1977]).unwrap();
            assert_eq!(
                vec![tuple!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345]],
                result.to_vec().unwrap()
            );
        }
        {
            let result = movie.select_key(&key!["Star_Wars", 1978]).unwrap();
            assert!(result.is_empty());
            assert_eq!(movie.schema().attributes(), result.schema().attributes());
        }
    }

    #[test]
    fn test_select_across_domains() {
        let db = Database::new();
        let movie = movie(&db);
        let year = movie.col("year").unwrap();
        {
            let far = Value::from(3000i64);
            assert!(movie.select(|t| t[year] > far).unwrap().is_empty());
            assert!(movie.select(|t| t[year] < far).unwrap().is_empty());
            assert!(movie.select(|t| t[year] == Value::from(1977i64)).unwrap().is_empty());
        }
        {
            let result = movie.try_select(|t| {
                Ok(t[year].try_cmp(&Value::from(3000i64))? == Ordering::Greater)
            });
            assert!(matches!(
                result,
                Err(Error::DomainMismatch {
                    left: Domain::Integer,
                    right: Domain::Long,
                })
            ));
        }
        {
            let result = movie
                .try_select(|t| Ok(t[year].try_cmp(&Value::from(1980))? == Ordering::Less))
                .unwrap();
            assert_eq!(2, result.len());
        }
    }

    #[test]
    fn test_select_key_checks_key() {
        let db = Database::new();
        let movie = movie(&db);
        assert!(matches!(
            movie.select_key(&key!["Star_Wars", 1977i64]),
            Err(Error::DomainMismatch {
                left: Domain::Long,
                right: Domain::Integer,
            })
        ));
        assert!(matches!(
            movie.select_key(&key!["Star_Wars"]),
            Err(Error::SchemaViolation { .. })
        ));
    }
}
