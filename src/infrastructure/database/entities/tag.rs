//! Tag entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Tag model - one memory tag and its last written value
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    /// Full path including the provider, e.g. `[default]ChargePilot/Status/LastError`
    #[sea_orm(primary_key, auto_increment = false)]
    pub path: String,

    /// Parent folder path including the provider
    pub parent: String,

    pub name: String,

    /// Declared data type (`Boolean`, `Int8`, `Float8`, `String`, `DateTime`)
    pub data_type: String,

    /// Last written value as tagged JSON; NULL until the first write
    pub value: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
