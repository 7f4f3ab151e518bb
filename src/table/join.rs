use super::Table;
use crate::{
    tools::{first_occurrences, match_helper, product_helper, project_helper, split_attributes},
    Error, Schema, Tuple,
};
use tracing::{debug, warn};

/// Checks that every pair of joined columns holds values of the same domain.
fn check_domains(
    left: &Schema,
    left_columns: &[usize],
    right: &Schema,
    right_columns: &[usize],
) -> Result<(), Error> {
    for (&i, &j) in left_columns.iter().zip(right_columns.iter()) {
        let (l, r) = (left.domains()[i], right.domains()[j]);
        if l != r {
            warn!(
                "join: {}.{} is a {} but {}.{} is a {}",
                left.name(),
                left.attributes()[i],
                l,
                right.name(),
                right.attributes()[j],
                r
            );
            return Err(Error::DomainMismatch { left: l, right: r });
        }
    }
    Ok(())
}

impl Table {
    /// Joins the receiver and `other` on the equality of the attributes in `attributes1`,
    /// resolved against the receiver, with the attributes in `attributes2`, resolved
    /// against `other`, pairwise.
    ///
    /// Every matching pair of tuples yields their concatenation. The result has the
    /// attributes of the receiver followed by the attributes of `other`, without renaming
    /// duplicate names, and the key of the receiver. Fails with [`Error::DomainMismatch`]
    /// if a pair of joined attributes differ in domain.
    ///
    /// **Example**:
    /// ```rust
    /// use reltab::{tuple, Database};
    ///
    /// let db = Database::new();
    /// let mut movie = db
    ///     .create_table("movie", "title studioName", "String String", "title")
    ///     .unwrap();
    /// let mut studio = db
    ///     .create_table("studio", "name presNo", "String Integer", "name")
    ///     .unwrap();
    /// movie.insert(tuple!["Star_Wars", "Fox"]).unwrap();
    /// studio.insert(tuple!["Fox", 7777]).unwrap();
    /// studio.insert(tuple!["Universal", 8888]).unwrap();
    ///
    /// let result = movie.join("studioName", "name", &studio).unwrap();
    /// assert_eq!(
    ///     vec![tuple!["Star_Wars", "Fox", "Fox", 7777]],
    ///     result.to_vec().unwrap()
    /// );
    /// ```
    pub fn join(
        &self,
        attributes1: &str,
        attributes2: &str,
        other: &Table,
    ) -> Result<Table, Error> {
        debug!(
            "RA> {}.join ({}, {}, {})",
            self.name(),
            attributes1,
            attributes2,
            other.name()
        );
        let names1 = split_attributes(attributes1);
        let names2 = split_attributes(attributes2);
        if names1.len() != names2.len() {
            return Err(Error::JoinArity {
                left: names1.len(),
                right: names2.len(),
            });
        }
        let columns1 = self.schema.resolve(&names1)?;
        let columns2 = other.schema.resolve(&names2)?;
        check_domains(&self.schema, &columns1, &other.schema, &columns2)?;

        let schema = Schema::from_parts(
            self.derived_name(),
            self.schema
                .attributes()
                .iter()
                .chain(other.schema.attributes())
                .cloned()
                .collect(),
            self.schema
                .domains()
                .iter()
                .chain(other.schema.domains())
                .copied()
                .collect(),
            self.schema.key().to_vec(),
        );

        let mut result = self.derive(schema)?;
        product_helper(self.tuples(), || other.tuples(), |t1, t2| {
            if match_helper(t1, &columns1, t2, &columns2) {
                result.push(t1.iter().chain(t2).cloned().collect())?;
            }
            Ok(())
        })?;
        Ok(result)
    }

    /// Joins the receiver and `other` on the first key attribute of `other`, which the
    /// receiver must have an attribute of the same name for.
    ///
    /// The result has the attributes of the receiver followed by those attributes of
    /// `other` whose names the receiver does not have, and the key of the receiver. Every
    /// matching pair of tuples yields one tuple holding the values of those attributes.
    /// Fails with [`Error::DomainMismatch`] if the shared attribute differs in domain.
    pub fn natural_join(&self, other: &Table) -> Result<Table, Error> {
        debug!("RA> {}.join ({})", self.name(), other.name());
        let shared = other
            .schema
            .key()
            .first()
            .ok_or_else(|| Error::InvalidSchema {
                table: other.name().to_string(),
                reason: "empty key".to_string(),
            })?;
        let foreign = self.schema.resolve(&[shared.as_str()])?[0];
        let primary = other.schema.resolve(&[shared.as_str()])?[0];
        check_domains(&self.schema, &[foreign], &other.schema, &[primary])?;

        let attributes = self
            .schema
            .attributes()
            .iter()
            .chain(other.schema.attributes())
            .cloned()
            .collect::<Vec<_>>();
        let domains = self
            .schema
            .domains()
            .iter()
            .chain(other.schema.domains())
            .copied()
            .collect::<Vec<_>>();
        let keep = first_occurrences(&attributes);

        let schema = Schema::from_parts(
            self.derived_name(),
            keep.iter().map(|&i| attributes[i].clone()).collect(),
            keep.iter().map(|&i| domains[i]).collect(),
            self.schema.key().to_vec(),
        );

        let mut result = self.derive(schema)?;
        product_helper(self.tuples(), || other.tuples(), |t1, t2| {
            if t1[foreign] == t2[primary] {
                let joined: Tuple = t1.iter().chain(t2).cloned().collect();
                result.push(project_helper(&joined, &keep))?;
            }
            Ok(())
        })?;
        Ok(result)
    }
}
