//! Deactivated user entity - Archival snapshot of a deleted account.
//!
//! Write-once and append-only: rows are created when an account is
//! deactivated, keyed by the original user id, and never modified.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Deactivated user database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deactivated_users")]
pub struct Model {
    /// Unique identifier for the snapshot
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The deleted account's user id
    #[sea_orm(unique)]
    pub original_id: i64,
    /// Given name at deletion time
    pub first_name: String,
    /// Family name at deletion time
    pub last_name: String,
    /// Email address at deletion time
    pub email: String,
    /// Phone number at deletion time, if any
    pub phone: Option<String>,
    /// When the account was deactivated
    pub deactivated_at: DateTimeUtc,
}

/// `DeactivatedUser` has no relationships with live entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
