//! Keyed record store backing the calendar widgets.
//!
//! Records are JSON objects grouped in named collections and addressed by id,
//! the same shape the browser keeps in local storage. Every write is persisted
//! straight away when the store is file-backed; last write wins.

use crate::logic::AvailabilityDefinition;
use lendly_common::{Booking, BookingStatus, BookingStore, BoxFuture};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, info};

pub const BOOKINGS: &str = "bookings";
pub const ITEMS: &str = "items";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("No record '{id}' in '{collection}'")]
    NotFound { collection: String, id: String },
    #[error("Record '{id}' already exists in '{collection}'")]
    Duplicate { collection: String, id: String },
    #[error("Record '{id}' in '{collection}' is malformed: {reason}")]
    InvalidRecord {
        collection: String,
        id: String,
        reason: String,
    },
    #[error("Store lock poisoned")]
    Poisoned,
}

type Collections = BTreeMap<String, BTreeMap<String, Value>>;

#[derive(Debug, Default)]
pub struct LocalRecordStore {
    path: Option<PathBuf>,
    collections: RwLock<Collections>,
}

impl LocalRecordStore {
    /// A store that forgets everything when dropped.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens a file-backed store. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let collections = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                Collections::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            Collections::new()
        };
        debug!(
            "Opened record store {} with {} collections",
            path.display(),
            collections.len()
        );
        Ok(Self {
            path: Some(path),
            collections: RwLock::new(collections),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.collections.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.collections.write().map_err(|_| StoreError::Poisoned)
    }

    fn persist(&self, collections: &Collections) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(collections)?)?;
        Ok(())
    }

    /// Writes the whole store to its file. No-op for in-memory stores.
    pub fn flush(&self) -> Result<(), StoreError> {
        let collections = self.read()?;
        self.persist(&collections)
    }

    pub fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .read()?
            .get(collection)
            .and_then(|records| records.get(id))
            .cloned())
    }

    pub fn get_record<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        self.get(collection, id)?
            .map(|value| decode(collection, id, value))
            .transpose()
    }

    /// Applies `change` and writes the result to disk. The in-memory state is
    /// only replaced once the write succeeded.
    fn commit<R>(&self, change: impl FnOnce(&mut Collections) -> R) -> Result<R, StoreError> {
        let mut collections = self.write()?;
        if self.path.is_none() {
            return Ok(change(&mut collections));
        }
        let mut next = collections.clone();
        let result = change(&mut next);
        self.persist(&next)?;
        *collections = next;
        Ok(result)
    }

    pub fn set(&self, collection: &str, id: &str, value: Value) -> Result<(), StoreError> {
        self.commit(|collections| {
            collections
                .entry(collection.to_string())
                .or_default()
                .insert(id.to_string(), value);
        })
    }

    pub fn set_record<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        record: &T,
    ) -> Result<(), StoreError> {
        self.set(collection, id, serde_json::to_value(record)?)
    }

    /// Returns whether a record was removed.
    pub fn remove(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        if self.get(collection, id)?.is_none() {
            return Ok(false);
        }
        self.commit(|collections| {
            collections
                .get_mut(collection)
                .and_then(|records| records.remove(id))
                .is_some()
        })
    }

    /// Records of `collection` whose top-level `field` equals `value`, as `(id, record)`.
    pub fn query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, Value)>, StoreError> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|(_, record)| record.get(field) == Some(value))
                    .map(|(id, record)| (id.clone(), record.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Deletes every record of a collection and returns how many there were.
    pub fn clear_collection(&self, collection: &str) -> Result<usize, StoreError> {
        let removed = self.commit(|collections| {
            collections
                .remove(collection)
                .map(|records| records.len())
                .unwrap_or(0)
        })?;
        info!("Cleared {} records from '{}'", removed, collection);
        Ok(removed)
    }

    /// Reads the `availability` field of an item record.
    ///
    /// `Ok(None)` means the item exists but never had a definition.
    pub fn load_availability(
        &self,
        item_id: &str,
    ) -> Result<Option<AvailabilityDefinition>, StoreError> {
        let item = self.get(ITEMS, item_id)?.ok_or_else(|| StoreError::NotFound {
            collection: ITEMS.to_string(),
            id: item_id.to_string(),
        })?;
        match item.get("availability") {
            None | Some(Value::Null) => Ok(None),
            Some(raw) => decode(ITEMS, item_id, raw.clone()).map(Some),
        }
    }

    fn bookings_for(&self, item_id: &str) -> Result<Vec<Booking>, StoreError> {
        self.query(BOOKINGS, "itemId", &Value::String(item_id.to_string()))?
            .into_iter()
            .map(|(id, value)| decode(BOOKINGS, &id, value))
            .collect()
    }
}

fn decode<T: DeserializeOwned>(collection: &str, id: &str, value: Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|err| StoreError::InvalidRecord {
        collection: collection.to_string(),
        id: id.to_string(),
        reason: err.to_string(),
    })
}

impl BookingStore for LocalRecordStore {
    type Error = StoreError;

    fn get_bookings(&self, item_id: &str) -> BoxFuture<'_, Vec<Booking>, Self::Error> {
        let item_id = item_id.to_string();
        Box::pin(async move { self.bookings_for(&item_id) })
    }

    fn get_booking(&self, booking_id: &str) -> BoxFuture<'_, Option<Booking>, Self::Error> {
        let booking_id = booking_id.to_string();
        Box::pin(async move { self.get_record(BOOKINGS, &booking_id) })
    }

    fn create_booking(&self, booking: Booking) -> BoxFuture<'_, Booking, Self::Error> {
        Box::pin(async move {
            if self.get(BOOKINGS, &booking.id)?.is_some() {
                return Err(StoreError::Duplicate {
                    collection: BOOKINGS.to_string(),
                    id: booking.id,
                });
            }
            self.set_record(BOOKINGS, &booking.id, &booking)?;
            Ok(booking)
        })
    }

    fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> BoxFuture<'_, Booking, Self::Error> {
        let booking_id = booking_id.to_string();
        Box::pin(async move {
            let mut booking: Booking =
                self.get_record(BOOKINGS, &booking_id)?
                    .ok_or_else(|| StoreError::NotFound {
                        collection: BOOKINGS.to_string(),
                        id: booking_id.clone(),
                    })?;
            booking.status = status;
            self.set_record(BOOKINGS, &booking_id, &booking)?;
            Ok(booking)
        })
    }
}
