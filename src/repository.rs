use std::fmt;
use std::marker::PhantomData;

use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::ResourceKind;
use crate::origin::Document;
use crate::signal::{ChangeAction, ChangeEvent};
use crate::store::StoreError;

/// A record kept in a keyed collection.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: ResourceKind;
    /// Prefix used by `new_id` when an editor creates a record.
    const ID_PREFIX: &'static str;
    /// Write the bundled defaults back when the key is missing or unreadable.
    const PERSIST_DEFAULTS: bool = false;

    fn id(&self) -> &str;

    /// Bundled dataset returned when nothing usable is stored.
    fn defaults() -> Vec<Self>;
}

/// A single-record resource (site config, footer, hero settings, ...).
pub trait Singleton: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static {
    const KIND: ResourceKind;
}

#[derive(Debug)]
pub enum RepositoryError {
    Store(StoreError),
    Serialize(String),
    DuplicateId(String),
    NotFound(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::Store(e) => write!(f, "{}", e),
            RepositoryError::Serialize(e) => write!(f, "serialization failed: {}", e),
            RepositoryError::DuplicateId(id) => write!(f, "a record with id '{}' already exists", id),
            RepositoryError::NotFound(id) => write!(f, "no record with id '{}'", id),
        }
    }
}

impl std::error::Error for RepositoryError {}

impl From<StoreError> for RepositoryError {
    fn from(e: StoreError) -> Self {
        RepositoryError::Store(e)
    }
}

/// Read a key and decode it. `None` covers missing, unreadable, and
/// unparseable values; the latter two are logged.
fn load<V: DeserializeOwned>(doc: &Document, kind: ResourceKind) -> Option<V> {
    let raw = match doc.store().get(kind.key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("reading '{}' failed, using defaults: {}", kind.key(), e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            error!("stored '{}' is not valid, using defaults: {}", kind.key(), e);
            None
        }
    }
}

fn store_value<V: Serialize + ?Sized>(
    doc: &Document,
    kind: ResourceKind,
    value: &V,
) -> Result<(), RepositoryError> {
    let json = serde_json::to_string(value).map_err(|e| RepositoryError::Serialize(e.to_string()))?;
    doc.store().set(kind.key(), &json)?;
    Ok(())
}

/// Read/write access to one keyed collection, bound to a document so writes
/// reach that document's listeners.
pub struct CollectionRepository<T: Resource> {
    doc: Document,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> Clone for CollectionRepository<T> {
    fn clone(&self) -> Self {
        CollectionRepository {
            doc: self.doc.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Resource> CollectionRepository<T> {
    pub fn new(doc: &Document) -> Self {
        CollectionRepository {
            doc: doc.clone(),
            _marker: PhantomData,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Stored collection, or the bundled defaults. Never fails.
    pub fn read_all(&self) -> Vec<T> {
        if let Some(items) = load::<Vec<T>>(&self.doc, T::KIND) {
            return items;
        }
        let defaults = T::defaults();
        if T::PERSIST_DEFAULTS {
            match store_value(&self.doc, T::KIND, &defaults) {
                Ok(()) => debug!("seeded '{}' with bundled defaults", T::KIND.key()),
                Err(e) => warn!("could not seed '{}': {}", T::KIND.key(), e),
            }
        }
        defaults
    }

    /// Replace the whole collection and announce it. Last writer wins.
    pub fn write_all(&self, items: &[T]) -> Result<(), RepositoryError> {
        store_value(&self.doc, T::KIND, items)?;
        self.doc.notify_collection(T::KIND);
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<T> {
        self.read_all().into_iter().find(|item| item.id() == id)
    }

    pub fn insert(&self, item: T) -> Result<T, RepositoryError> {
        let mut items = self.read_all();
        if items.iter().any(|existing| existing.id() == item.id()) {
            return Err(RepositoryError::DuplicateId(item.id().to_string()));
        }
        items.push(item.clone());
        self.commit(&items, ChangeAction::Created, item.id())?;
        Ok(item)
    }

    pub fn update(&self, item: T) -> Result<T, RepositoryError> {
        let mut items = self.read_all();
        let slot = items
            .iter_mut()
            .find(|existing| existing.id() == item.id())
            .ok_or_else(|| RepositoryError::NotFound(item.id().to_string()))?;
        *slot = item.clone();
        self.commit(&items, ChangeAction::Updated, item.id())?;
        Ok(item)
    }

    /// Filter the record out and write the rest back. No tombstones.
    pub fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let items = self.read_all();
        let before = items.len();
        let remaining: Vec<T> = items.into_iter().filter(|item| item.id() != id).collect();
        if remaining.len() == before {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        self.commit(&remaining, ChangeAction::Deleted, id)
    }

    /// Swap with the previous record. Returns false (and writes nothing) at
    /// the front of the collection.
    pub fn move_up(&self, id: &str) -> Result<bool, RepositoryError> {
        self.shift(id, -1)
    }

    /// Swap with the next record. Returns false at the end of the collection.
    pub fn move_down(&self, id: &str) -> Result<bool, RepositoryError> {
        self.shift(id, 1)
    }

    fn shift(&self, id: &str, delta: isize) -> Result<bool, RepositoryError> {
        let mut items = self.read_all();
        let index = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        let target = index as isize + delta;
        if target < 0 || target >= items.len() as isize {
            return Ok(false);
        }
        items.swap(index, target as usize);
        self.commit(&items, ChangeAction::Reordered, id)?;
        Ok(true)
    }

    fn commit(&self, items: &[T], action: ChangeAction, id: &str) -> Result<(), RepositoryError> {
        self.write_all(items)?;
        self.doc.notify_record(ChangeEvent::Record {
            kind: T::KIND,
            action,
            id: id.to_string(),
        });
        Ok(())
    }
}

/// Read/write access to a single-record resource.
pub struct SingletonRepository<T: Singleton> {
    doc: Document,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Singleton> Clone for SingletonRepository<T> {
    fn clone(&self) -> Self {
        SingletonRepository {
            doc: self.doc.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Singleton> SingletonRepository<T> {
    pub fn new(doc: &Document) -> Self {
        SingletonRepository {
            doc: doc.clone(),
            _marker: PhantomData,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn read(&self) -> T {
        load(&self.doc, T::KIND).unwrap_or_default()
    }

    pub fn write(&self, value: &T) -> Result<(), RepositoryError> {
        store_value(&self.doc, T::KIND, value)?;
        self.doc.notify_collection(T::KIND);
        Ok(())
    }
}
