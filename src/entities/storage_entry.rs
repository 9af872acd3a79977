//! Storage entry entity - one key/value slot of the document storage namespace.
//!
//! Each record collection (`invoices`, `serviceReports`) is a single entry whose value is
//! the serialized JSON array of saved records.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storage")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Collection key (e.g. `"invoices"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Serialized collection
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When the collection was last written
    pub updated_at: DateTime,
}

/// `StorageEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
