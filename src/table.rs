//! Implements [`Table`], a schema-bound collection of tuples with a primary-key index,
//! and the relational algebra operators over it.
mod display;
mod join;
mod minus;
mod project;
mod select;
mod union;

pub use display::IndexDisplay;

use crate::{
    database::Context,
    store::{Store, TupleStore},
    CompositeKey, Error, Index, Schema, Tuple, Value,
};
use std::rc::Rc;
use tracing::{debug, warn};

/// Is a relational table: a [`Schema`], the tuples of the table in insertion order and an
/// [`Index`] from the key of every inserted tuple to its position.
///
/// Only [`Table::insert`] mutates a table. Every operator returns a new table, named after
/// the receiver with a numeric suffix, that owns its own tuples. Tables derived by an
/// operator start with an empty index.
#[derive(Debug)]
pub struct Table {
    schema: Schema,
    tuples: Store,
    index: Index,
    context: Rc<Context>,
}

impl Table {
    /// Creates an empty table for `schema` with a tuple store chosen by the configuration
    /// of `context`.
    pub(crate) fn new(schema: Schema, context: Rc<Context>) -> Result<Self, Error> {
        let tuples = context.new_store(schema.name())?;
        Ok(Self {
            schema,
            tuples,
            index: Index::new(),
            context,
        })
    }

    /// Creates an empty table for a schema derived from the receiver's by an operator.
    pub(crate) fn derive(&self, schema: Schema) -> Result<Self, Error> {
        Self::new(schema, self.context.clone())
    }

    /// Returns a fresh name for a table derived from the receiver.
    pub(crate) fn derived_name(&self) -> String {
        self.context.next_name(self.name())
    }

    /// Appends `tuple` without type checking or indexing it. Operators use this to fill
    /// the tables they derive.
    pub(crate) fn push(&mut self, tuple: Tuple) -> Result<(), Error> {
        TupleStore::append(&mut self.tuples, tuple)
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    #[inline(always)]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the primary-key index of the table.
    #[inline(always)]
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Returns the number of tuples in the table, duplicates included.
    pub fn len(&self) -> usize {
        TupleStore::len(&self.tuples)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the position of the attribute named `attribute`.
    pub fn col(&self, attribute: &str) -> Option<usize> {
        self.schema.col(attribute)
    }

    /// Inserts `tuple` into the table if it fits the schema and indexes it under its key.
    /// A tuple with the key of an earlier tuple replaces it in the index, but both stay in
    /// the table.
    ///
    /// **Example**:
    /// ```rust
    /// use reltab::{tuple, key, Database, Error};
    ///
    /// let db = Database::new();
    /// let mut studio = db
    ///     .create_table("studio", "name address presNo", "String String Integer", "name")
    ///     .unwrap();
    ///
    /// studio.insert(tuple!["Fox", "Los_Angeles", 7777]).unwrap();
    /// assert_eq!(
    ///     Some(tuple!["Fox", "Los_Angeles", 7777]),
    ///     studio.get(&key!["Fox"]).unwrap()
    /// );
    ///
    /// let result = studio.insert(tuple!["Fox", 7777]);
    /// assert!(matches!(result, Err(Error::SchemaViolation { .. })));
    /// assert_eq!(1, studio.len());
    /// ```
    pub fn insert(&mut self, tuple: Tuple) -> Result<(), Error> {
        debug!("DML> insert into {} values ( {} )", self.name(), Row(&tuple));
        if let Err(e) = self.schema.check(&tuple) {
            warn!("{}", e);
            return Err(e);
        }

        let key = self.schema.key_of(&tuple);
        let position = self.len();
        self.push(tuple)?;
        self.index.insert(key, position);
        Ok(())
    }

    /// Returns the tuple indexed under `key`, if any. The key must have a value of the
    /// right domain for every key attribute.
    pub fn get(&self, key: &CompositeKey) -> Result<Option<Tuple>, Error> {
        if let Err(e) = self.schema.check_key(key) {
            warn!("{}", e);
            return Err(e);
        }
        match self.index.get(key) {
            Some(position) => TupleStore::get(&self.tuples, position),
            None => Ok(None),
        }
    }

    /// Returns an iterator over the tuples of the table, in insertion order.
    pub fn tuples(&self) -> impl Iterator<Item = Result<Tuple, Error>> + '_ {
        TupleStore::iter(&self.tuples)
    }

    /// Collects the tuples of the table, in insertion order.
    pub fn to_vec(&self) -> Result<Vec<Tuple>, Error> {
        self.tuples().collect()
    }

    /// Returns the key of `tuple` under the schema of the table. The tuple must fit the
    /// schema.
    pub fn key_of(&self, tuple: &[Value]) -> Result<CompositeKey, Error> {
        self.schema.check(tuple)?;
        Ok(self.schema.key_of(tuple))
    }

    /// Returns the values of `tuple` for the attributes in the whitespace separated list
    /// `attributes`, in the order they are listed.
    pub fn extract(&self, tuple: &[Value], attributes: &str) -> Result<Tuple, Error> {
        self.schema.check(tuple)?;
        let positions = self
            .schema
            .resolve(&crate::tools::split_attributes(attributes))?;
        Ok(crate::tools::project_helper(tuple, &positions))
    }

    /// Checks that `other` is union compatible with the receiver: same arity and the same
    /// domain at every position.
    pub fn compatible(&self, other: &Table) -> Result<(), Error> {
        self.schema.compatible(&other.schema).map_err(|mismatch| {
            warn!("compatible ERROR: {}", mismatch);
            Error::IncompatibleTables {
                left: self.name().to_string(),
                right: other.name().to_string(),
                mismatch,
            }
        })
    }
}

/// Formats a tuple as a comma separated list of values.
pub(crate) struct Row<'a>(pub &'a [Value]);

impl std::fmt::Display for Row<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
