//! Entity module - SeaORM entity definitions for the database.
//! The document store needs a single key/value table standing in for the
//! storage namespace the saved collections live in.

pub mod storage_entry;

pub use storage_entry::{
    Column as StorageEntryColumn, Entity as StorageEntry, Model as StorageEntryModel,
};
