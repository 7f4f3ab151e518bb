//! A tuple store that pages its tuples to a file.
//!
//! Tuples are appended to an in-memory tail page. When the tail holds `page_size` tuples
//! it is written at the end of the backing file, so every page on disk is full:
//! ```text
//! +-----------+--------------------------------------+
//! | N (u32)   | N length-prefixed tuple records      |
//! +-----------+--------------------------------------+
//! ```
//! Reads of a flushed page go through a single-page cache.

use super::TupleStore;
use crate::{codec, Error, Tuple};
use bytes::{BufMut, BytesMut};
use std::{
    cell::RefCell,
    fs::{self, File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, trace};

/// File extension of the files backing paged stores.
const PAGE_FILE_EXTENSION: &str = "pages";

/// Location of a flushed page in the backing file.
#[derive(Clone, Copy, Debug)]
struct Page {
    offset: u64,
    len: usize,
}

/// Keeps the tuples of a table in a file, one page at a time. The file is removed when
/// the store is dropped.
#[derive(Debug)]
pub struct PagedStore {
    path: PathBuf,
    page_size: usize,
    file: RefCell<File>,

    /// Is the list of pages flushed to the file, in order.
    pages: Vec<Page>,

    /// Is the page being filled.
    tail: Vec<Tuple>,

    /// Is the page last read from the file.
    cache: RefCell<Option<(usize, Vec<Tuple>)>>,

    len: usize,
    file_len: u64,
}

impl PagedStore {
    /// Creates an empty store backed by a new file in `dir`, named after `name`. If a
    /// file of that name exists, a numeric suffix is added rather than reusing it.
    pub fn create(dir: impl AsRef<Path>, name: &str, page_size: usize) -> Result<Self, Error> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut suffix = 0;
        let (path, file) = loop {
            let file_name = if suffix == 0 {
                format!("{}.{}", name, PAGE_FILE_EXTENSION)
            } else {
                format!("{}.{}.{}", name, suffix, PAGE_FILE_EXTENSION)
            };
            let path = dir.join(file_name);
            match OpenOptions::new()
                .read(true)
                .write(true)
                .create_new(true)
                .open(&path)
            {
                Ok(file) => break (path, file),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => suffix += 1,
                Err(e) => return Err(e.into()),
            }
        };
        debug!(path = %path.display(), page_size, "created paged store");

        Ok(Self {
            path,
            page_size: page_size.max(1),
            file: RefCell::new(file),
            pages: Vec::new(),
            tail: Vec::new(),
            cache: RefCell::new(None),
            len: 0,
            file_len: 0,
        })
    }

    /// Returns the path of the backing file.
    #[inline(always)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline(always)]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of pages written to the backing file.
    #[inline(always)]
    pub fn flushed_pages(&self) -> usize {
        self.pages.len()
    }

    /// Writes the tail page at the end of the backing file. The tail is left untouched if
    /// writing fails.
    fn flush(&mut self) -> Result<(), Error> {
        let mut buf = BytesMut::new();
        buf.put_u32(codec::prefix(self.tail.len(), "page")?);
        for tuple in &self.tail {
            codec::put_tuple(&mut buf, tuple)?;
        }

        let file = self.file.get_mut();
        file.seek(SeekFrom::Start(self.file_len))?;
        file.write_all(&buf)?;

        trace!(page = self.pages.len(), bytes = buf.len(), "flushed page");
        self.pages.push(Page {
            offset: self.file_len,
            len: buf.len(),
        });
        self.file_len += buf.len() as u64;
        self.tail.clear();
        Ok(())
    }

    fn read_page(&self, page: usize) -> Result<Vec<Tuple>, Error> {
        let Page { offset, len } = self.pages[page];
        let mut bytes = vec![0u8; len];
        {
            let mut file = self.file.borrow_mut();
            file.seek(SeekFrom::Start(offset))?;
            file.read_exact(&mut bytes)?;
        }

        let mut buf = &bytes[..];
        let tuples = codec::get_tuples(&mut buf)?;
        if tuples.len() != self.page_size {
            return Err(Error::Corrupt(format!(
                "page {} of {} holds {} tuples instead of {}",
                page,
                self.path.display(),
                tuples.len(),
                self.page_size
            )));
        }
        Ok(tuples)
    }
}

impl TupleStore for PagedStore {
    fn append(&mut self, tuple: Tuple) -> Result<(), Error> {
        if self.tail.len() == self.page_size {
            self.flush()?;
        }
        self.tail.push(tuple);
        self.len += 1;
        Ok(())
    }

    fn get(&self, position: usize) -> Result<Option<Tuple>, Error> {
        if position >= self.len {
            return Ok(None);
        }

        let page = position / self.page_size;
        let slot = position % self.page_size;
        if page == self.pages.len() {
            return Ok(self.tail.get(slot).cloned());
        }

        if let Some((cached, tuples)) = &*self.cache.borrow() {
            if *cached == page {
                return Ok(tuples.get(slot).cloned());
            }
        }

        let tuples = self.read_page(page)?;
        let tuple = tuples.get(slot).cloned();
        *self.cache.borrow_mut() = Some((page, tuples));
        Ok(tuple)
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl Drop for PagedStore {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            debug!(path = %self.path.display(), error = %e, "failed to remove paged store");
        }
    }
}
