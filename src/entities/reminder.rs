//! Reminder entity - A patient's scheduled weigh-in reminder.
//!
//! The time-of-day carries no offset; it is interpreted in the fixed reference
//! timezone when the poller matches reminders against the wall clock. `days`
//! is stored as a comma-joined list of canonical English weekday names but is
//! semantically a set: duplicates and order carry no meaning.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reminder database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reminders")]
pub struct Model {
    /// Unique identifier for the reminder
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the patient who owns this reminder
    pub patient_id: i64,
    /// Time of day the reminder fires, minute granularity
    pub time: Time,
    /// Comma-joined weekday names, e.g. `"Monday, Thursday"`
    pub days: String,
    /// When the reminder was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Reminder and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each reminder belongs to one patient
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::PatientId",
        to = "super::user::Column::Id"
    )]
    Patient,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Patient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
