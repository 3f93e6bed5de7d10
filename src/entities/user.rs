//! User entity - One table for both account roles.
//!
//! Patients and providers share identity fields; the `role` column decides
//! which side of a treatment relationship a row can sit on. Providers carry a
//! unique shareable code patients use to link up; patients carry the
//! email-reminder preference flag.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role value for patient accounts
pub const ROLE_PATIENT: &str = "patient";
/// Role value for provider accounts
pub const ROLE_PROVIDER: &str = "provider";

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the account
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Login and notification address, unique across both roles
    #[sea_orm(unique)]
    pub email: String,
    /// Optional phone number for SMS alerts (providers) or contact info
    pub phone: Option<String>,
    /// Account role: [`ROLE_PATIENT`] or [`ROLE_PROVIDER`]
    pub role: String,
    /// Provider invite code in `XXXX-XXXX` form; None for patients.
    /// Assigned once at provider creation and never changed afterwards.
    #[sea_orm(unique)]
    pub shareable_code: Option<String>,
    /// Whether reminder emails are sent to this account (patients only)
    pub email_reminders: bool,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and the per-patient / per-provider tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One patient has many weight records
    #[sea_orm(has_many = "super::weight_record::Entity")]
    WeightRecords,
    /// One patient has many reminders
    #[sea_orm(has_many = "super::reminder::Entity")]
    Reminders,
    /// One patient has many notes
    #[sea_orm(has_many = "super::patient_note::Entity")]
    PatientNotes,
    /// One provider has many notifications
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
    /// One patient has at most one provider-maintained info row
    #[sea_orm(has_one = "super::patient_info::Entity")]
    PatientInfo,
}

impl Related<super::weight_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeightRecords.def()
    }
}

impl Related<super::reminder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reminders.def()
    }
}

impl Related<super::patient_note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PatientNotes.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl Related<super::patient_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PatientInfo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `"First Last"` as shown in notification messages.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether this account has the patient role.
    #[must_use]
    pub fn is_patient(&self) -> bool {
        self.role == ROLE_PATIENT
    }

    /// Whether this account has the provider role.
    #[must_use]
    pub fn is_provider(&self) -> bool {
        self.role == ROLE_PROVIDER
    }
}
