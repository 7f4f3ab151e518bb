//! Implements [`Database`], the entry point for creating, saving and loading tables.
mod snapshot;

use crate::{
    config::Config,
    store::{open_store, Store},
    Error, Schema, Table,
};
use std::{cell::Cell, fs, io::Write, rc::Rc};
use tracing::{debug, info};

/// Is the state shared by a [`Database`] and every table created through it.
#[derive(Debug)]
pub(crate) struct Context {
    config: Config,

    /// Is the number of tables derived so far, used to name derived tables.
    counter: Cell<u64>,
}

impl Context {
    pub(crate) fn new(config: Config) -> Self {
        Self {
            config,
            counter: Cell::new(0),
        }
    }

    #[inline(always)]
    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a fresh name for a table derived from the table named `base`.
    pub(crate) fn next_name(&self, base: &str) -> String {
        let count = self.counter.get() + 1;
        self.counter.set(count);
        format!("{}{}", base, count)
    }

    /// Creates an empty tuple store for the table named `name`.
    pub(crate) fn new_store(&self, name: &str) -> Result<Store, Error> {
        open_store(&self.config, name)
    }
}

/// Creates tables and keeps them in snapshots.
///
/// Tables created by a database, and every table derived from them by an operator, share
/// its configuration and the counter that names derived tables.
///
/// **Example**:
/// ```rust
/// use reltab::{tuple, Config, Database};
///
/// let dir = tempfile::tempdir().unwrap();
/// let db = Database::with_config(Config::new().with_snapshot_dir(dir.path()));
///
/// let mut studio = db
///     .create_table("studio", "name address presNo", "String String Integer", "name")
///     .unwrap();
/// studio.insert(tuple!["Fox", "Los_Angeles", 7777]).unwrap();
/// db.save(&studio).unwrap();
///
/// let loaded = db.load("studio").unwrap();
/// assert_eq!(studio.to_vec().unwrap(), loaded.to_vec().unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct Database {
    context: Rc<Context>,
}

impl Default for Database {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl Database {
    /// Creates a database with the default configuration: tables keep their tuples in
    /// memory and snapshots go to the `store` directory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            context: Rc::new(Context::new(config)),
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &Config {
        self.context.config()
    }

    /// Creates an empty table from whitespace separated lists of attribute names, domain
    /// names and key attribute names.
    pub fn create_table(
        &self,
        name: &str,
        attributes: &str,
        domains: &str,
        key: &str,
    ) -> Result<Table, Error> {
        info!("DDL> create table {} ({})", name, attributes);
        self.table(Schema::parse(name, attributes, domains, key)?)
    }

    /// Creates an empty table for `schema`.
    pub fn table(&self, schema: Schema) -> Result<Table, Error> {
        Table::new(schema, self.context.clone())
    }

    /// Writes a snapshot of `table` to the snapshot directory, replacing any earlier
    /// snapshot of a table of the same name.
    pub fn save(&self, table: &Table) -> Result<(), Error> {
        let bytes = snapshot::encode(table)?;
        let config = self.config();
        fs::create_dir_all(&config.snapshot_dir)?;

        let path = config.snapshot_path(table.name());
        let tmp = path.with_extension(format!("{}.tmp", config.snapshot_extension));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;

        info!(
            path = %path.display(),
            tuples = table.len(),
            "saved table {}",
            table.name()
        );
        Ok(())
    }

    /// Reads the snapshot of the table named `name` into a new table. The tuples keep
    /// their order and the index is rebuilt from them.
    pub fn load(&self, name: &str) -> Result<Table, Error> {
        let path = self.config().snapshot_path(name);
        let bytes = fs::read(&path)?;
        let (schema, tuples) = snapshot::decode(&mut &bytes[..])?;
        if schema.name() != name {
            return Err(Error::Corrupt(format!(
                "snapshot {} holds table '{}'",
                path.display(),
                schema.name()
            )));
        }

        let mut table = self.table(schema)?;
        for tuple in tuples {
            table.insert(tuple).map_err(|e| match e {
                Error::SchemaViolation { reason, .. } => Error::Corrupt(reason),
                e => e,
            })?;
        }
        debug!(index = table.index().len(), "rebuilt index of {}", name);

        info!(
            path = %path.display(),
            tuples = table.len(),
            "loaded table {}",
            name
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{key, tuple, Domain, StoreKind};

    fn test_config(dir: &std::path::Path) -> Config {
        Config::new()
            .with_store_dir(dir.join("pages"))
            .with_snapshot_dir(dir.join("snapshots"))
    }

    #[test]
    fn test_create_table() {
        let db = Database::new();
        {
            let table = db
                .create_table("studio", "name address presNo", "String String Integer", "name")
                .unwrap();
            assert_eq!("studio", table.name());
            assert_eq!(Domain::Integer, table.schema().domains()[2]);
            assert!(table.is_empty());
        }
        {
            let result = db.create_table("studio", "name address", "String", "name");
            assert!(matches!(result, Err(Error::InvalidSchema { .. })));
        }
        {
            let result = db.create_table("studio", "name", "Text", "name");
            assert!(matches!(result, Err(Error::UnknownDomain { .. })));
        }
    }

    #[test]
    fn test_derived_names() {
        let db = Database::new();
        let mut studio = db
            .create_table("studio", "name presNo", "String Integer", "name")
            .unwrap();
        studio.insert(tuple!["Fox", 7777]).unwrap();

        let first = studio.project("name").unwrap();
        let second = studio.select(|_| true).unwrap();
        let third = first.project("name").unwrap();
        assert_eq!("studio1", first.name());
        assert_eq!("studio2", second.name());
        assert_eq!("studio13", third.name());

        // databases do not share their counters
        let other = Database::new();
        let table = other
            .create_table("studio", "name presNo", "String Integer", "name")
            .unwrap();
        assert_eq!("studio1", table.project("name").unwrap().name());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::with_config(test_config(dir.path()));
        let mut studio = db
            .create_table("studio", "name address presNo", "String String Integer", "name")
            .unwrap();
        studio.insert(tuple!["Fox", "Los_Angeles", 7777]).unwrap();
        studio
            .insert(tuple!["Universal", "Universal_City", 8888])
            .unwrap();
        studio.insert(tuple!["Fox", "Century_City", 1234]).unwrap();

        db.save(&studio).unwrap();
        assert!(dir.path().join("snapshots/studio.dbf").exists());
        assert!(!dir.path().join("snapshots/studio.dbf.tmp").exists());

        let loaded = db.load("studio").unwrap();
        assert_eq!(studio.schema(), loaded.schema());
        assert_eq!(studio.to_vec().unwrap(), loaded.to_vec().unwrap());
        assert_eq!(2, loaded.index().len());
        assert_eq!(
            Some(tuple!["Fox", "Century_City", 1234]),
            loaded.get(&key!["Fox"]).unwrap()
        );
    }

    #[test]
    fn test_save_replaces_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::with_config(test_config(dir.path()));
        let mut studio = db
            .create_table("studio", "name presNo", "String Integer", "name")
            .unwrap();
        studio.insert(tuple!["Fox", 7777]).unwrap();
        db.save(&studio).unwrap();
        studio.insert(tuple!["Universal", 8888]).unwrap();
        db.save(&studio).unwrap();

        assert_eq!(2, db.load("studio").unwrap().len());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::with_config(test_config(dir.path()));
        assert!(matches!(db.load("missing"), Err(Error::Persistence(_))));

        fs::create_dir_all(dir.path().join("snapshots")).unwrap();
        fs::write(dir.path().join("snapshots/garbage.dbf"), b"not a snapshot").unwrap();
        assert!(matches!(db.load("garbage"), Err(Error::Corrupt(_))));

        let studio = db
            .create_table("studio", "name presNo", "String Integer", "name")
            .unwrap();
        db.save(&studio).unwrap();
        fs::rename(
            dir.path().join("snapshots/studio.dbf"),
            dir.path().join("snapshots/other.dbf"),
        )
        .unwrap();
        assert!(matches!(db.load("other"), Err(Error::Corrupt(_))));
    }

    #[test]
    fn test_paged_tables() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::with_config(test_config(dir.path()).with_paged_store(2));
        assert_eq!(StoreKind::Paged { page_size: 2 }, db.config().store);

        let mut studio = db
            .create_table("studio", "name presNo", "String Integer", "name")
            .unwrap();
        for (i, name) in ["Fox", "Universal", "DreamWorks", "Paramount", "Disney"]
            .iter()
            .enumerate()
        {
            studio.insert(tuple![*name, i as i32]).unwrap();
        }
        assert_eq!(5, studio.len());
        assert_eq!(Some(tuple!["Paramount", 3]), studio.get(&key!["Paramount"]).unwrap());

        let names = studio.project("name").unwrap();
        assert_eq!(5, names.len());

        db.save(&studio).unwrap();
        let loaded = db.load("studio").unwrap();
        assert_eq!(studio.to_vec().unwrap(), loaded.to_vec().unwrap());
    }
}
