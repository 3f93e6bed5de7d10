//! Patient note entity - Free-text notes a provider keeps on a patient.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Note type for general observations
pub const NOTE_TYPE_GENERIC: &str = "generic";
/// Note type for medication-related entries
pub const NOTE_TYPE_MEDICATION: &str = "medication";

/// Patient note database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "patient_notes")]
pub struct Model {
    /// Unique identifier for the note
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the patient this note is about
    pub patient_id: i64,
    /// Free-text body
    pub note: String,
    /// Optional type: [`NOTE_TYPE_GENERIC`] or [`NOTE_TYPE_MEDICATION`]
    pub note_type: Option<String>,
    /// When the note was written
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between PatientNote and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each note belongs to one patient
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
