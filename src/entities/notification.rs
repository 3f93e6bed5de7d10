//! Notification entity - In-app alert entries for providers.
//!
//! Rows are created only by the weight-alert path and mutated only to flip the
//! read flag, a one-way unread→read transition.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    /// Unique identifier for the notification
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the provider this notification is addressed to
    pub provider_id: i64,
    /// Human-readable alert message
    pub message: String,
    /// When the notification was raised
    pub created_at: DateTimeUtc,
    /// Whether the provider has read this notification
    pub is_read: bool,
}

/// Defines relationships between Notification and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each notification belongs to one provider
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ProviderId",
        to = "super::user::Column::Id"
    )]
    Provider,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Provider.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
