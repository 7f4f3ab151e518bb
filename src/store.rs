//! Implements the sequences of tuples that back tables.
//!
//! A table only appends to, reads from, counts and iterates over its store, so whether
//! the tuples stay in memory ([`MemoryStore`]) or are paged to a file ([`PagedStore`]) is
//! decided by the [`Config`] of the database that creates the table.
mod memory;
mod paged;

pub use memory::MemoryStore;
pub use paged::PagedStore;

use crate::{
    config::{Config, StoreKind},
    Error, Tuple,
};
use either::Either;

/// Is the store of every table: in memory on the left, paged on the right.
pub type Store = Either<MemoryStore, PagedStore>;

/// Is an append-only sequence of tuples.
pub trait TupleStore {
    /// Appends `tuple` at the end of the store.
    fn append(&mut self, tuple: Tuple) -> Result<(), Error>;

    /// Returns the tuple at `position` or `None` if `position` is out of bounds.
    fn get(&self, position: usize) -> Result<Option<Tuple>, Error>;

    /// Returns the number of tuples in the store.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the tuples of the store, in insertion order.
    fn iter(&self) -> Iter<'_, Self> {
        Iter {
            store: self,
            position: 0,
            end: self.len(),
        }
    }
}

impl<L, R> TupleStore for Either<L, R>
where
    L: TupleStore,
    R: TupleStore,
{
    fn append(&mut self, tuple: Tuple) -> Result<(), Error> {
        either::for_both!(self, store => store.append(tuple))
    }

    fn get(&self, position: usize) -> Result<Option<Tuple>, Error> {
        either::for_both!(self, store => store.get(position))
    }

    fn len(&self) -> usize {
        either::for_both!(self, store => store.len())
    }
}

/// Iterates over the tuples a store holds when the iterator is created.
pub struct Iter<'s, S: TupleStore + ?Sized> {
    store: &'s S,
    position: usize,
    end: usize,
}

impl<'s, S: TupleStore + ?Sized> Iterator for Iter<'s, S> {
    type Item = Result<Tuple, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.end {
            return None;
        }
        match self.store.get(self.position) {
            Ok(Some(tuple)) => {
                self.position += 1;
                Some(Ok(tuple))
            }
            Ok(None) => {
                self.position = self.end;
                None
            }
            Err(e) => {
                self.position = self.end;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.end - self.position))
    }
}

/// Creates an empty store for the table named `name`, of the kind `config` selects.
pub(crate) fn open_store(config: &Config, name: &str) -> Result<Store, Error> {
    match config.store {
        StoreKind::Memory => Ok(Either::Left(MemoryStore::new())),
        StoreKind::Paged { page_size } => Ok(Either::Right(PagedStore::create(
            &config.store_dir,
            name,
            page_size,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple;

    #[test]
    fn test_open_memory_store() {
        let store = open_store(&Config::new(), "movie").unwrap();
        assert!(store.is_left());
        assert!(TupleStore::is_empty(&store));
    }

    #[test]
    fn test_open_paged_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new().with_paged_store(2).with_store_dir(dir.path());
        let mut store = open_store(&config, "movie").unwrap();
        assert!(store.is_right());

        for year in 1977..1982 {
            TupleStore::append(&mut store, tuple!["Star_Wars", year]).unwrap();
        }
        assert_eq!(5, TupleStore::len(&store));
        assert_eq!(
            Some(tuple!["Star_Wars", 1980]),
            TupleStore::get(&store, 3).unwrap()
        );
    }

    #[test]
    fn test_iter_over_either() {
        let mut store: Store = Either::Left(MemoryStore::new());
        TupleStore::append(&mut store, tuple![1]).unwrap();
        TupleStore::append(&mut store, tuple![2]).unwrap();
        let tuples = TupleStore::iter(&store)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(vec![tuple![1], tuple![2]], tuples);
    }
}
