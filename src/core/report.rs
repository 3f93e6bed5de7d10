//! Provider dashboard summaries.
//!
//! For each patient linked to a provider: the latest weight with its
//! timestamp, the most recent weight from an earlier calendar day (so two
//! same-day measurements don't masquerade as a trend), and the alarm
//! threshold on file.

use crate::{
    entities::{WeightRecord, user, weight_record},
    errors::Result,
};
use chrono::{NaiveTime, TimeZone, Utc};
use sea_orm::{QueryOrder, prelude::*};

/// One dashboard row: a linked patient and their most recent readings.
#[derive(Debug, Clone)]
pub struct PatientSummary {
    /// The patient account
    pub patient: user::Model,
    /// Most recent recorded weight, if any
    pub latest_weight: Option<f64>,
    /// When the latest weight was recorded
    pub latest_weight_at: Option<chrono::DateTime<Utc>>,
    /// Most recent weight from a calendar day before the latest one
    pub previous_weight: Option<f64>,
    /// When that previous weight was recorded
    pub previous_weight_at: Option<chrono::DateTime<Utc>>,
    /// Per-patient alert threshold override, if on file
    pub alarm_threshold: Option<f64>,
}

/// Builds the dashboard rows for every patient linked to a provider.
pub async fn provider_dashboard(
    db: &DatabaseConnection,
    provider_id: i64,
) -> Result<Vec<PatientSummary>> {
    let patients = crate::core::relationships::patients_for_provider(db, provider_id).await?;

    let mut summaries = Vec::with_capacity(patients.len());
    for patient in patients {
        let latest = crate::core::weights::latest_record(db, patient.id).await?;
        let previous = match &latest {
            Some(record) => previous_day_record(db, patient.id, record).await?,
            None => None,
        };
        let info = crate::core::patient_info::get_patient_info(db, patient.id).await?;

        summaries.push(PatientSummary {
            patient,
            latest_weight: latest.as_ref().map(|r| r.weight),
            latest_weight_at: latest.as_ref().map(|r| r.timestamp),
            previous_weight: previous.as_ref().map(|r| r.weight),
            previous_weight_at: previous.as_ref().map(|r| r.timestamp),
            alarm_threshold: info.and_then(|row| row.alarm_threshold),
        });
    }

    Ok(summaries)
}

/// The most recent record from a calendar day strictly before the latest
/// record's day.
async fn previous_day_record(
    db: &DatabaseConnection,
    patient_id: i64,
    latest: &weight_record::Model,
) -> Result<Option<weight_record::Model>> {
    let midnight = latest.timestamp.date_naive().and_time(NaiveTime::MIN);
    let day_start = Utc.from_utc_datetime(&midnight);

    WeightRecord::find()
        .filter(weight_record::Column::PatientId.eq(patient_id))
        .filter(weight_record::Column::Timestamp.lt(day_start))
        .order_by_desc(weight_record::Column::Timestamp)
        .one(db)
        .await
        .map_err(Into::into)
}
