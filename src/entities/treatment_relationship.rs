//! Treatment relationship entity - Links one patient to one provider.
//!
//! At most one row may exist per (patient, provider) pair; a unique index over
//! the two columns is created alongside the tables. Both foreign keys point at
//! the shared `users` table, so no `Related` impl is defined here — lookups go
//! through the explicit column filters in `core::relationships`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Treatment relationship database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "treatment_relationships")]
pub struct Model {
    /// Unique identifier for the relationship
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the patient side of the link
    pub patient_id: i64,
    /// ID of the provider side of the link
    pub provider_id: i64,
}

/// Both sides of the link live in the `users` table
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The patient this relationship belongs to
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::PatientId",
        to = "super::user::Column::Id"
    )]
    Patient,
    /// The provider this relationship belongs to
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ProviderId",
        to = "super::user::Column::Id"
    )]
    Provider,
}

impl ActiveModelBehavior for ActiveModel {}
