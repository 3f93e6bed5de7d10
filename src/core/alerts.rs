//! Weight alert evaluation - decides whether a newly recorded weight differs
//! drastically from the one before it, and pushes the alert to the patient's
//! providers when it does.
//!
//! "Previous weight" means the most recent record with a timestamp strictly
//! before the new record's. The comparison is strict: a change of exactly the
//! threshold does not alert. The threshold is the patient's `alarm_threshold`
//! override when one is on file, otherwise the configured default.

use crate::{
    entities::weight_record,
    errors::Result,
    notify::{AlertDispatchSummary, NotificationDispatcher},
};
use sea_orm::DatabaseConnection;
use tracing::info;

/// Default alerting threshold, in the unit weights are recorded in.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 5.0;

/// The delta between a new weight record and the one before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightChange {
    /// Weight of the immediately preceding record
    pub previous_weight: f64,
    /// Weight of the new record
    pub new_weight: f64,
    /// Signed delta, `new_weight - previous_weight`
    pub change: f64,
}

/// Outcome of evaluating one new weight record.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertOutcome {
    /// First record for this patient; nothing to compare against
    NoPriorRecord,
    /// Patient row vanished between recording and evaluation; nothing done
    PatientMissing,
    /// Change did not exceed the threshold
    WithinThreshold(WeightChange),
    /// Change exceeded the threshold and was dispatched to linked providers
    Alerted {
        /// The computed delta
        change: WeightChange,
        /// What the dispatcher did (zero rows when no providers are linked)
        summary: AlertDispatchSummary,
    },
}

/// The alert threshold in effect for a patient.
pub async fn alert_threshold_for(
    db: &DatabaseConnection,
    patient_id: i64,
    default_threshold: f64,
) -> Result<f64> {
    let info = crate::core::patient_info::get_patient_info(db, patient_id).await?;
    Ok(info
        .and_then(|row| row.alarm_threshold)
        .unwrap_or(default_threshold))
}

/// Evaluates a newly persisted weight record and, when the change is
/// drastic, dispatches the alert to every provider currently linked to the
/// patient. With no linked providers the alert is silently dropped.
pub async fn evaluate_and_notify(
    db: &DatabaseConnection,
    dispatcher: &NotificationDispatcher,
    patient_id: i64,
    new_record: &weight_record::Model,
    default_threshold: f64,
) -> Result<AlertOutcome> {
    let Some(patient) = crate::core::users::get_user_by_id(db, patient_id).await? else {
        return Ok(AlertOutcome::PatientMissing);
    };
    if !patient.is_patient() {
        return Ok(AlertOutcome::PatientMissing);
    }

    let Some(previous) =
        crate::core::weights::previous_record(db, patient_id, new_record.timestamp).await?
    else {
        return Ok(AlertOutcome::NoPriorRecord);
    };

    let change = WeightChange {
        previous_weight: previous.weight,
        new_weight: new_record.weight,
        change: new_record.weight - previous.weight,
    };

    let threshold = alert_threshold_for(db, patient_id, default_threshold).await?;
    if change.change.abs() <= threshold {
        return Ok(AlertOutcome::WithinThreshold(change));
    }

    let providers = crate::core::relationships::providers_for_patient(db, patient_id).await?;
    let summary = dispatcher
        .send_weight_alert(db, &patient, &change, &providers)
        .await?;
    info!(
        "weight alert for patient {}: change {:.2} (threshold {:.2}), {} provider(s) notified",
        patient_id,
        change.change,
        threshold,
        summary.notifications_created,
    );

    Ok(AlertOutcome::Alerted { change, summary })
}

/// Records a weight measurement and immediately evaluates it for alerting:
/// the patient-facing recording operation.
pub async fn record_weight_and_notify(
    db: &DatabaseConnection,
    dispatcher: &NotificationDispatcher,
    patient_id: i64,
    weight: f64,
    default_threshold: f64,
) -> Result<(weight_record::Model, AlertOutcome)> {
    let record = crate::core::weights::record_weight(db, patient_id, weight).await?;
    let outcome =
        evaluate_and_notify(db, dispatcher, patient_id, &record, default_threshold).await?;
    Ok((record, outcome))
}
