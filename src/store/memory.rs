use super::TupleStore;
use crate::{Error, Tuple};

/// Keeps the tuples of a table in a vector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    tuples: Vec<Tuple>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tuples of the store as a slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[Tuple] {
        &self.tuples
    }
}

impl From<Vec<Tuple>> for MemoryStore {
    fn from(tuples: Vec<Tuple>) -> Self {
        Self { tuples }
    }
}

impl TupleStore for MemoryStore {
    fn append(&mut self, tuple: Tuple) -> Result<(), Error> {
        self.tuples.push(tuple);
        Ok(())
    }

    fn get(&self, position: usize) -> Result<Option<Tuple>, Error> {
        Ok(self.tuples.get(position).cloned())
    }

    fn len(&self) -> usize {
        self.tuples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple;

    #[test]
    fn test_memory_store() {
        {
            let store = MemoryStore::new();
            assert!(store.is_empty());
            assert_eq!(None, store.get(0).unwrap());
            assert_eq!(0, store.iter().count());
        }
        {
            let mut store = MemoryStore::new();
            store.append(tuple!["Fox", "Los_Angeles", 7777]).unwrap();
            store.append(tuple!["Fox", "Los_Angeles", 7777]).unwrap();
            store.append(tuple!["Universal", "Universal_City", 8888]).unwrap();
            assert_eq!(3, store.len());
            assert_eq!(
                Some(tuple!["Universal", "Universal_City", 8888]),
                store.get(2).unwrap()
            );
            assert_eq!(None, store.get(3).unwrap());
            assert_eq!(store.get(0).unwrap(), store.get(1).unwrap());
        }
    }

    #[test]
    fn test_memory_store_iter() {
        let store = MemoryStore::from(vec![tuple![3], tuple![1], tuple![2]]);
        assert_eq!(
            vec![tuple![3], tuple![1], tuple![2]],
            store.iter().collect::<Result<Vec<_>, _>>().unwrap()
        );
        assert_eq!(&[tuple![3], tuple![1], tuple![2]], store.as_slice());
    }
}
