//! Patient info business logic - the provider-maintained details row.
//!
//! One row per patient, created on first write and overwritten on later ones.
//! `alarm_threshold` is read by the alert evaluator as a per-patient override
//! of the configured default.

use crate::{
    entities::{PatientInfo, patient_info, user},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{Set, prelude::*};

const SEXES: [&str; 3] = ["M", "F", "O"];

/// Field values for a patient-info upsert. `None` clears the field.
#[derive(Debug, Clone, Default)]
pub struct PatientInfoUpdate {
    /// Height in the deployment's measurement unit
    pub height: Option<f64>,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// `"M"`, `"F"` or `"O"`
    pub sex: Option<String>,
    /// Current medications
    pub medications: Option<String>,
    /// Anything else worth keeping on file
    pub other_info: Option<String>,
    /// Per-patient weight-change alert threshold
    pub alarm_threshold: Option<f64>,
}

fn validate_update(update: &PatientInfoUpdate) -> Result<()> {
    if let Some(sex) = &update.sex {
        if !SEXES.contains(&sex.as_str()) {
            return Err(Error::Config {
                message: format!("Invalid sex value: {sex}"),
            });
        }
    }
    if let Some(height) = update.height {
        if !height.is_finite() || height <= 0.0 {
            return Err(Error::Config {
                message: format!("Invalid height: {height}"),
            });
        }
    }
    if let Some(threshold) = update.alarm_threshold {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(Error::Config {
                message: format!("Invalid alarm threshold: {threshold}"),
            });
        }
    }
    Ok(())
}

/// Creates or overwrites the info row for a patient.
pub async fn upsert_patient_info(
    db: &DatabaseConnection,
    patient_id: i64,
    update: PatientInfoUpdate,
) -> Result<patient_info::Model> {
    validate_update(&update)?;
    crate::core::users::require_role(db, patient_id, user::ROLE_PATIENT).await?;

    let now = chrono::Utc::now();
    let existing = PatientInfo::find()
        .filter(patient_info::Column::PatientId.eq(patient_id))
        .one(db)
        .await?;

    let result = if let Some(row) = existing {
        let mut active: patient_info::ActiveModel = row.into();
        active.height = Set(update.height);
        active.date_of_birth = Set(update.date_of_birth);
        active.sex = Set(update.sex);
        active.medications = Set(update.medications);
        active.other_info = Set(update.other_info);
        active.alarm_threshold = Set(update.alarm_threshold);
        active.last_updated = Set(now);
        active.update(db).await?
    } else {
        let row = patient_info::ActiveModel {
            patient_id: Set(patient_id),
            height: Set(update.height),
            date_of_birth: Set(update.date_of_birth),
            sex: Set(update.sex),
            medications: Set(update.medications),
            other_info: Set(update.other_info),
            alarm_threshold: Set(update.alarm_threshold),
            last_updated: Set(now),
            ..Default::default()
        };
        row.insert(db).await?
    };

    Ok(result)
}

/// The info row for a patient, if one has been written.
pub async fn get_patient_info(
    db: &DatabaseConnection,
    patient_id: i64,
) -> Result<Option<patient_info::Model>> {
    PatientInfo::find()
        .filter(patient_info::Column::PatientId.eq(patient_id))
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_upsert_creates_then_overwrites() -> Result<()> {
        let db = setup_test_db().await?;
        let patient = create_test_patient(&db, "pat@example.com").await?;

        let created = upsert_patient_info(
            &db,
            patient.id,
            PatientInfoUpdate {
                height: Some(170.0),
                sex: Some("F".to_string()),
                alarm_threshold: Some(3.0),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(created.alarm_threshold, Some(3.0));

        let overwritten = upsert_patient_info(
            &db,
            patient.id,
            PatientInfoUpdate {
                height: Some(170.0),
                medications: Some("furosemide".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(overwritten.id, created.id);
        assert!(overwritten.alarm_threshold.is_none());
        assert_eq!(overwritten.medications.as_deref(), Some("furosemide"));

        let fetched = get_patient_info(&db, patient.id).await?.unwrap();
        assert_eq!(fetched.id, created.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_validates_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let patient = create_test_patient(&db, "pat@example.com").await?;

        let bad_sex = upsert_patient_info(
            &db,
            patient.id,
            PatientInfoUpdate {
                sex: Some("X".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(bad_sex.is_err());

        let bad_threshold = upsert_patient_info(
            &db,
            patient.id,
            PatientInfoUpdate {
                alarm_threshold: Some(-2.0),
                ..Default::default()
            },
        )
        .await;
        assert!(bad_threshold.is_err());
        assert!(get_patient_info(&db, patient.id).await?.is_none());

        Ok(())
    }
}
