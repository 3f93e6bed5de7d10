//! Weight record entity - One dry-weight measurement for a patient.
//!
//! Records are immutable once created. The only access pattern is ordering by
//! timestamp: ascending for history views, descending for "most recent".

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Weight record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weight_records")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the patient this record belongs to
    pub patient_id: i64,
    /// Measured weight, strictly positive, rounded to two decimal places
    pub weight: f64,
    /// When the measurement was recorded
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between WeightRecord and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each record belongs to one patient
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
