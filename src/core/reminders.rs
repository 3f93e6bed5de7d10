//! Reminder business logic - CRUD plus the due-reminder matcher the poller
//! runs every minute.
//!
//! Weekday names are validated against the seven canonical English names
//! before anything is persisted; one bad name rejects the whole write. The
//! matcher compares stored hour/minute against the current wall-clock minute
//! in the reference timezone and additionally requires the current weekday to
//! be in the reminder's day set, so a Monday-only reminder stays quiet the
//! rest of the week.

use crate::{
    entities::{Reminder, User, reminder, user},
    errors::{Error, Result},
    notify::NotificationDispatcher,
};
use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// The seven canonical weekday names, Monday first.
pub const CANONICAL_WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Canonical name for a chrono weekday.
#[must_use]
pub fn weekday_name(day: Weekday) -> &'static str {
    CANONICAL_WEEKDAYS[day.num_days_from_monday() as usize]
}

/// Validates a weekday list and joins it into the stored form.
fn normalize_days(days: &[String]) -> Result<String> {
    let mut cleaned = Vec::with_capacity(days.len());
    for day in days {
        let trimmed = day.trim();
        if !CANONICAL_WEEKDAYS.contains(&trimmed) {
            return Err(Error::InvalidWeekday {
                day: day.clone(),
            });
        }
        cleaned.push(trimmed);
    }
    Ok(cleaned.join(", "))
}

/// Whether a stored day list contains the given canonical weekday name.
fn days_contain(stored: &str, weekday: &str) -> bool {
    stored.split(',').any(|day| day.trim() == weekday)
}

/// Creates a reminder for a patient.
pub async fn add_reminder(
    db: &DatabaseConnection,
    patient_id: i64,
    time: NaiveTime,
    days: &[String],
) -> Result<reminder::Model> {
    let days = normalize_days(days)?;
    crate::core::users::require_role(db, patient_id, user::ROLE_PATIENT).await?;

    let entry = reminder::ActiveModel {
        patient_id: Set(patient_id),
        time: Set(time),
        days: Set(days),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = entry.insert(db).await?;
    Ok(result)
}

/// Rewrites an existing reminder's time and days. Only the owning patient's
/// reminders are reachable.
pub async fn update_reminder(
    db: &DatabaseConnection,
    patient_id: i64,
    reminder_id: i64,
    time: NaiveTime,
    days: &[String],
) -> Result<reminder::Model> {
    let days = normalize_days(days)?;

    let found = Reminder::find_by_id(reminder_id)
        .filter(reminder::Column::PatientId.eq(patient_id))
        .one(db)
        .await?
        .ok_or(Error::ReminderNotFound { id: reminder_id })?;

    let mut active: reminder::ActiveModel = found.into();
    active.time = Set(time);
    active.days = Set(days);
    let updated = active.update(db).await?;
    Ok(updated)
}

/// Deletes a reminder owned by the patient.
pub async fn delete_reminder(
    db: &DatabaseConnection,
    patient_id: i64,
    reminder_id: i64,
) -> Result<()> {
    let deleted = Reminder::delete_many()
        .filter(reminder::Column::Id.eq(reminder_id))
        .filter(reminder::Column::PatientId.eq(patient_id))
        .exec(db)
        .await?;

    if deleted.rows_affected == 0 {
        return Err(Error::ReminderNotFound { id: reminder_id });
    }
    Ok(())
}

/// All reminders for a patient, earliest time of day first.
pub async fn reminders_for_patient(
    db: &DatabaseConnection,
    patient_id: i64,
) -> Result<Vec<reminder::Model>> {
    Reminder::find()
        .filter(reminder::Column::PatientId.eq(patient_id))
        .order_by_asc(reminder::Column::Time)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds every (patient, reminder) pair due at `now`: patients with reminder
/// emails enabled whose reminder matches the current hour, minute and weekday.
/// Two reminders coinciding on the same minute both fire.
pub async fn due_reminders(
    db: &DatabaseConnection,
    now: NaiveDateTime,
) -> Result<Vec<(user::Model, reminder::Model)>> {
    let weekday = weekday_name(now.weekday());
    let hour = now.hour();
    let minute = now.minute();

    let patients = User::find()
        .filter(user::Column::Role.eq(user::ROLE_PATIENT))
        .filter(user::Column::EmailReminders.eq(true))
        .all(db)
        .await?;

    let mut due = Vec::new();
    for patient in patients {
        let reminders = Reminder::find()
            .filter(reminder::Column::PatientId.eq(patient.id))
            .all(db)
            .await?;

        for entry in reminders {
            if entry.time.hour() == hour
                && entry.time.minute() == minute
                && days_contain(&entry.days, weekday)
            {
                due.push((patient.clone(), entry));
            }
        }
    }

    Ok(due)
}

/// One poller tick: match reminders against `now` and hand each pair to the
/// dispatcher's reminder path. Returns how many reminders fired. Delivery
/// failures are handled inside the dispatcher and never bubble up here.
pub async fn check_and_fire_due_reminders(
    db: &DatabaseConnection,
    dispatcher: &NotificationDispatcher,
    now: NaiveDateTime,
) -> Result<usize> {
    let due = due_reminders(db, now).await?;
    for (patient, entry) in &due {
        dispatcher.send_reminder(patient, entry);
    }
    if !due.is_empty() {
        info!("fired {} reminder(s) at {}", due.len(), now);
    }
    Ok(due.len())
}
