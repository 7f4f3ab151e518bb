use super::Table;
use crate::{
    tools::{project_helper, split_attributes},
    Error, Schema,
};
use tracing::debug;

impl Table {
    /// Projects the table onto the attributes in the whitespace separated list
    /// `attributes`, in the order they are listed.
    ///
    /// The result keeps one tuple per tuple of the receiver, so duplicates that appear
    /// once the other attributes are dropped are kept. Its key is the key of the receiver
    /// if every key attribute is projected, otherwise all the projected attributes.
    ///
    /// **Example**:
    /// ```rust
    /// use reltab::{tuple, Database};
    ///
    /// let db = Database::new();
    /// let mut studio = db
    ///     .create_table("studio", "name address presNo", "String String Integer", "name")
    ///     .unwrap();
    /// studio.insert(tuple!["Fox", "Los_Angeles", 7777]).unwrap();
    /// studio.insert(tuple!["Universal", "Universal_City", 8888]).unwrap();
    ///
    /// let addresses = studio.project("address").unwrap();
    /// assert_eq!(&["address"], addresses.schema().key());
    /// assert_eq!(
    ///     vec![tuple!["Los_Angeles"], tuple!["Universal_City"]],
    ///     addresses.to_vec().unwrap()
    /// );
    /// ```
    pub fn project(&self, attributes: &str) -> Result<Table, Error> {
        debug!("RA> {}.project ({})", self.name(), attributes);
        let names = split_attributes(attributes);
        let positions = self.schema.resolve(&names)?;

        let key = if self
            .schema
            .key()
            .iter()
            .all(|k| names.contains(&k.as_str()))
        {
            self.schema.key().to_vec()
        } else {
            names.iter().map(|n| n.to_string()).collect()
        };
        let schema = Schema::from_parts(
            self.derived_name(),
            names.iter().map(|n| n.to_string()).collect(),
            positions.iter().map(|&i| self.schema.domains()[i]).collect(),
            key,
        );

        let mut result = self.derive(schema)?;
        for tuple in self.tuples() {
            result.push(project_helper(&tuple?, &positions))?;
        }
        Ok(result)
    }
}
