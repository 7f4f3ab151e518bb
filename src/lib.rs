/*! Implements a minimal relational table engine.

A [`Table`] is a schema-bound collection of typed tuples with an ordered primary-key
[`Index`]. Tables support `insert` and the classical relational algebra operators
(project, select, union, minus, equi-join and natural join), each of which returns a new
table and leaves its operands untouched.

**Example**:
```rust
use reltab::{tuple, key, Database};

let db = Database::new();
let mut movie = db
    .create_table(
        "movie",
        "title year length genre studioName producerNo",
        "String Integer Integer String String Integer",
        "title year",
    )
    .unwrap();

movie.insert(tuple!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345]).unwrap();
movie.insert(tuple!["Rocky", 1985, 200, "action", "Universal", 12125]).unwrap();

let titles = movie.project("title year").unwrap();
assert_eq!(
    vec![tuple!["Star_Wars", 1977], tuple!["Rocky", 1985]],
    titles.to_vec().unwrap()
);

let star_wars = movie.select_key(&key!["Star_Wars", 1977]).unwrap();
assert_eq!(1, star_wars.len());
```
*/
mod codec;
pub mod config;
mod database;
mod index;
mod key;
mod macros;
mod schema;
pub mod store;
mod table;
mod tools;
mod value;

pub use config::{Config, StoreKind};
pub use database::Database;
pub use index::Index;
pub use key::CompositeKey;
pub use schema::{Mismatch, Schema};
pub use table::{IndexDisplay, Table};
pub use value::{Domain, Value};

/// Is a row of a table: one [`Value`] per attribute, positionally aligned with the
/// attributes of the table's [`Schema`].
pub type Tuple = Vec<Value>;

/// Is the error type of every fallible operation in this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Is returned when a schema is built from inconsistent parts.
    #[error("invalid schema for table '{table}': {reason}")]
    InvalidSchema { table: String, reason: String },

    /// Is returned when a domain name is not one of the supported value kinds.
    #[error("unknown domain '{name}'")]
    UnknownDomain { name: String },

    /// Is returned when a tuple does not fit the schema of the table it is inserted into.
    #[error("tuple rejected by table '{table}': {reason}")]
    SchemaViolation { table: String, reason: String },

    /// Is returned by set operators applied to tables of different arity or domains.
    #[error("tables '{left}' and '{right}' are incompatible: {mismatch}")]
    IncompatibleTables {
        left: String,
        right: String,
        mismatch: Mismatch,
    },

    /// Is returned when an attribute name cannot be found in a table.
    #[error("attribute '{attribute}' not found in table '{table}'")]
    UnresolvedAttribute { table: String, attribute: String },

    /// Is returned when the two attribute lists of an equi-join differ in length.
    #[error("join attribute lists differ in length: {left} vs {right}")]
    JoinArity { left: usize, right: usize },

    /// Is returned when values of different domains are compared.
    #[error("cannot compare a value of domain {left} with a value of domain {right}")]
    DomainMismatch { left: Domain, right: Domain },

    /// Is returned when reading or writing a snapshot or a paged store fails.
    #[error("persistence failure: {0}")]
    Persistence(#[from] std::io::Error),

    /// Is returned when persisted bytes cannot be decoded.
    #[error("corrupt data: {0}")]
    Corrupt(String),

    /// Is returned when a string, tuple or table is too large for its length prefix.
    #[error("{what} of length {len} is too large to encode")]
    TooLarge { what: &'static str, len: usize },
}
