//! Weight record business logic.
//!
//! Records are append-only: validated at the write boundary, never updated or
//! edited afterwards. History is served ascending by timestamp; the alert
//! evaluator reads the most recent record strictly before a given instant.

use crate::{
    entities::{WeightRecord, user, weight_record},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Largest storable weight: five significant digits, two decimal places.
pub const MAX_WEIGHT: f64 = 999.99;

/// Validates a weight value and normalizes it to two decimal places.
fn validate_weight(weight: f64) -> Result<f64> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(Error::InvalidWeight { weight });
    }
    let rounded = (weight * 100.0).round() / 100.0;
    if rounded <= 0.0 || rounded > MAX_WEIGHT {
        return Err(Error::InvalidWeight { weight });
    }
    Ok(rounded)
}

/// Records a new weight measurement for a patient.
pub async fn record_weight(
    db: &DatabaseConnection,
    patient_id: i64,
    weight: f64,
) -> Result<weight_record::Model> {
    let weight = validate_weight(weight)?;
    crate::core::users::require_role(db, patient_id, user::ROLE_PATIENT).await?;

    let record = weight_record::ActiveModel {
        patient_id: Set(patient_id),
        weight: Set(weight),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = record.insert(db).await?;
    Ok(result)
}

/// Full weight history for a patient, oldest first.
pub async fn weight_history(
    db: &DatabaseConnection,
    patient_id: i64,
) -> Result<Vec<weight_record::Model>> {
    WeightRecord::find()
        .filter(weight_record::Column::PatientId.eq(patient_id))
        .order_by_asc(weight_record::Column::Timestamp)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The patient's most recent record, if any.
pub async fn latest_record(
    db: &DatabaseConnection,
    patient_id: i64,
) -> Result<Option<weight_record::Model>> {
    WeightRecord::find()
        .filter(weight_record::Column::PatientId.eq(patient_id))
        .order_by_desc(weight_record::Column::Timestamp)
        .one(db)
        .await
        .map_err(Into::into)
}

/// The most recent record with a timestamp strictly before `before`.
pub async fn previous_record(
    db: &DatabaseConnection,
    patient_id: i64,
    before: chrono::DateTime<chrono::Utc>,
) -> Result<Option<weight_record::Model>> {
    WeightRecord::find()
        .filter(weight_record::Column::PatientId.eq(patient_id))
        .filter(weight_record::Column::Timestamp.lt(before))
        .order_by_desc(weight_record::Column::Timestamp)
        .one(db)
        .await
        .map_err(Into::into)
}
