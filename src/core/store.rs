//! Record store - the append-only, index-deletable saved document collections.
//!
//! Each record kind is one entry of the storage table holding a JSON array. Every mutation
//! reads the whole array, changes it, and writes it back inside a single database
//! transaction. Elements are kept as opaque JSON values; only [`RecordStore::list`] and
//! [`RecordStore::get`] decode them into typed records.

use crate::{
    entities::{StorageEntry, storage_entry},
    errors::{Error, Result},
    models::StoredRecord,
};
use chrono::Utc;
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde_json::Value;
use std::marker::PhantomData;
use tracing::{debug, info, instrument, warn};

/// Typed access to the collection holding records of kind `T`.
pub struct RecordStore<'a, T> {
    db: &'a DatabaseConnection,
    record: PhantomData<T>,
}

impl<'a, T: StoredRecord> RecordStore<'a, T> {
    /// Creates a store view over `db` for the collection of `T`.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            record: PhantomData,
        }
    }

    /// Returns all saved records in insertion order.
    ///
    /// An absent or unreadable collection is empty.
    ///
    /// # Errors
    /// Returns [`Error::MalformedRecord`] if an element does not decode as `T`.
    pub async fn list(&self) -> Result<Vec<T>> {
        let (_, values) = read_collection(self.db, T::COLLECTION).await?;
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| decode(index, value))
            .collect()
    }

    /// Number of saved records.
    pub async fn len(&self) -> Result<usize> {
        let (_, values) = read_collection(self.db, T::COLLECTION).await?;
        Ok(values.len())
    }

    /// Whether the collection has no records.
    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Returns the record at `index`.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] when no record exists at `index`.
    pub async fn get(&self, index: usize) -> Result<T> {
        let (_, mut values) = read_collection(self.db, T::COLLECTION).await?;
        let len = values.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        decode(index, values.swap_remove(index))
    }

    /// Appends `record` as the last element and returns its index.
    #[instrument(skip_all, fields(collection = T::COLLECTION))]
    pub async fn append(&self, record: &T) -> Result<usize> {
        let value = serde_json::to_value(record)?;

        let txn = self.db.begin().await?;
        let (entry, mut values) = read_collection(&txn, T::COLLECTION).await?;
        values.push(value);
        write_collection(&txn, T::COLLECTION, entry, &values).await?;
        txn.commit().await?;

        let index = values.len() - 1;
        info!("Saved {} #{index}", T::LABEL);
        Ok(index)
    }

    /// Removes the record at `index`, shifting later records down by one.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] when no record exists at `index`; the collection
    /// is left untouched.
    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    pub async fn delete_at(&self, index: usize) -> Result<()> {
        let txn = self.db.begin().await?;
        let (entry, mut values) = read_collection(&txn, T::COLLECTION).await?;
        let len = values.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        values.remove(index);
        write_collection(&txn, T::COLLECTION, entry, &values).await?;
        txn.commit().await?;

        info!("Deleted {} #{index}", T::LABEL);
        Ok(())
    }
}

fn decode<T: StoredRecord>(index: usize, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::MalformedRecord {
        index,
        message: e.to_string(),
    })
}

async fn read_collection<C>(
    conn: &C,
    key: &str,
) -> Result<(Option<storage_entry::Model>, Vec<Value>)>
where
    C: ConnectionTrait,
{
    let entry = StorageEntry::find()
        .filter(storage_entry::Column::Key.eq(key))
        .one(conn)
        .await?;

    let values = match &entry {
        Some(entry) => serde_json::from_str::<Vec<Value>>(&entry.value).unwrap_or_else(|e| {
            warn!("Stored '{key}' is not a JSON array ({e}); treating it as empty");
            Vec::new()
        }),
        None => Vec::new(),
    };
    debug!("Read {} element(s) from '{key}'", values.len());

    Ok((entry, values))
}

async fn write_collection<C>(
    conn: &C,
    key: &str,
    existing: Option<storage_entry::Model>,
    values: &[Value],
) -> Result<()>
where
    C: ConnectionTrait,
{
    let serialized = serde_json::to_string(values)?;
    let now = Utc::now().naive_utc();

    if let Some(entry) = existing {
        let mut active_model: storage_entry::ActiveModel = entry.into();
        active_model.value = Set(serialized);
        active_model.updated_at = Set(now);
        active_model.update(conn).await?;
    } else {
        let new_entry = storage_entry::ActiveModel {
            key: Set(key.to_string()),
            value: Set(serialized),
            updated_at: Set(now),
            ..Default::default()
        };
        new_entry.insert(conn).await?;
    }

    Ok(())
}
