//! Configuration of a [`Database`](crate::Database).

use std::path::{Path, PathBuf};

/// Number of tuples per page of a paged store, unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Default directory for paged stores and snapshots.
pub const DEFAULT_DIR: &str = "store";

/// Default file extension of snapshots.
pub const DEFAULT_SNAPSHOT_EXTENSION: &str = "dbf";

/// Selects where tables keep their tuples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// Tuples live in memory.
    Memory,

    /// Tuples are written to a file in pages of `page_size` tuples; only the page being
    /// filled and the page last read are kept in memory.
    Paged { page_size: usize },
}

/// Is the configuration of a [`Database`](crate::Database) and of every table it creates.
#[derive(Clone, Debug)]
pub struct Config {
    /// Kind of tuple store for new tables (default: in memory).
    pub store: StoreKind,

    /// Directory of the files backing paged stores.
    pub store_dir: PathBuf,

    /// Directory of saved snapshots.
    pub snapshot_dir: PathBuf,

    /// File extension of saved snapshots.
    pub snapshot_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreKind::Memory,
            store_dir: PathBuf::from(DEFAULT_DIR),
            snapshot_dir: PathBuf::from(DEFAULT_DIR),
            snapshot_extension: DEFAULT_SNAPSHOT_EXTENSION.to_string(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps tuples of new tables in memory.
    pub fn with_memory_store(mut self) -> Self {
        self.store = StoreKind::Memory;
        self
    }

    /// Pages tuples of new tables to files under `store_dir`. A page size of zero is
    /// raised to one.
    pub fn with_paged_store(mut self, page_size: usize) -> Self {
        self.store = StoreKind::Paged {
            page_size: page_size.max(1),
        };
        self
    }

    /// Sets the directory of the files backing paged stores.
    pub fn with_store_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.store_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the directory of saved snapshots.
    pub fn with_snapshot_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.snapshot_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the file extension of saved snapshots.
    pub fn with_snapshot_extension(mut self, extension: impl Into<String>) -> Self {
        self.snapshot_extension = extension.into();
        self
    }

    /// Returns the path of the snapshot of the table named `name`.
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.snapshot_dir
            .join(format!("{}.{}", name, self.snapshot_extension))
    }
}
