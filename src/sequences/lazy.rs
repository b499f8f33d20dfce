//! A single-entry cache for loading sequences off disk on demand.
//!
//! [`LazyLoader`] keeps the most recently loaded key's data in memory and only
//! goes back to the reader when the key changes. Indexed FASTA sources key it
//! by region, so repeating a request does not touch the disk.
//!
use std::cell::{Ref, RefCell};
use std::fmt::Debug;

use crate::error::GenoseqError;

/// A loader function that takes a reader of type `R` and a key `K` and
/// loads data of type `T`.
type LoaderFunc<R, T, K> = Box<dyn Fn(&mut R, &K) -> Result<T, GenoseqError>>;

/// Lazy loader, storing an open reader and one key's worth of data in
/// [`RefCell`]s, so loading only needs `&self`.
///
/// # Generics
///  * `R`: the reader type (e.g. an indexed FASTA reader).
///  * `T`: the data type.
///  * `K`: the key type.
pub struct LazyLoader<R, T, K> {
    cached: RefCell<Option<(K, T)>>,
    reader: RefCell<R>,
    loader: LoaderFunc<R, T, K>,
}

impl<R, T, K: Debug> Debug for LazyLoader<R, T, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = self.cached.borrow().as_ref().map(|(key, _)| format!("{:?}", key));
        f.debug_struct("LazyLoader")
            .field("key", &key)
            .finish_non_exhaustive()
    }
}

impl<R, T, K> LazyLoader<R, T, K>
where
    K: Clone + PartialEq + Debug,
{
    pub fn new<F>(reader: R, loader: F) -> Self
    where
        F: Fn(&mut R, &K) -> Result<T, GenoseqError> + 'static,
    {
        LazyLoader {
            cached: RefCell::new(None),
            reader: RefCell::new(reader),
            loader: Box::new(loader),
        }
    }

    /// Return a `bool` indicating whether the specified `key` is cached.
    pub fn is_loaded(&self, key: &K) -> bool {
        self.cached
            .borrow()
            .as_ref()
            .map_or(false, |(loaded, _)| loaded == key)
    }

    /// Clear out the cache.
    pub fn clear(&self) {
        *self.cached.borrow_mut() = None;
    }

    /// Get the data for `key`, loading it with the loader function if it is
    /// not the currently cached key.
    ///
    /// # Returns
    /// Returns a [`Ref`] into the cache. It must be dropped before a different
    /// key is requested.
    pub fn get_data(&self, key: &K) -> Result<Ref<'_, T>, GenoseqError> {
        if !self.is_loaded(key) {
            log::debug!("lazy loading {:?}", key);
            let data = {
                let mut reader = self.reader.borrow_mut();
                (self.loader)(&mut reader, key)?
            };
            *self.cached.borrow_mut() = Some((key.clone(), data));
        }

        Ok(Ref::map(self.cached.borrow(), |cached| match cached {
            Some((_, data)) => data,
            None => unreachable!("{}", crate::INTERNAL_ERROR_MESSAGE),
        }))
    }
}
