//! Patient info entity - Provider-maintained clinical details for a patient.
//!
//! One row per patient, upserted by the linked provider. `alarm_threshold`
//! overrides the configured default when the alert evaluator compares
//! consecutive weight records.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Patient info database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "patient_infos")]
pub struct Model {
    /// Unique identifier for the info row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the patient these details describe
    #[sea_orm(unique)]
    pub patient_id: i64,
    /// Height in the unit the deployment records weights in
    pub height: Option<f64>,
    /// Date of birth
    pub date_of_birth: Option<Date>,
    /// Sex: `"M"`, `"F"` or `"O"`
    pub sex: Option<String>,
    /// Current medications, free text
    pub medications: Option<String>,
    /// Anything else the provider wants on file
    pub other_info: Option<String>,
    /// Per-patient weight-change alert threshold; None uses the default
    pub alarm_threshold: Option<f64>,
    /// When the row was last modified
    pub last_updated: DateTimeUtc,
}

/// Defines relationships between PatientInfo and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each info row belongs to one patient
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
