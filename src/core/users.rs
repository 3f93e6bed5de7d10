//! Account business logic - registration, lookup, profile updates and
//! deactivation for both roles.
//!
//! Providers get a shareable code at creation time: eight uppercase
//! alphanumerics split into two groups of four joined by a hyphen. Once
//! assigned the code never changes; [`ensure_shareable_code`] only fills a
//! missing one in.

use crate::{
    entities::{
        Notification, PatientInfo, PatientNote, Reminder, TreatmentRelationship, User,
        WeightRecord, deactivated_user, notification, patient_info, patient_note, reminder,
        treatment_relationship, user, weight_record,
    },
    errors::{Error, Result},
};
use rand::Rng;
use sea_orm::{Condition, Set, TransactionTrait, prelude::*};

const SHAREABLE_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SHAREABLE_CODE_ATTEMPTS: usize = 5;

/// Generates a fresh shareable code in `XXXX-XXXX` form.
fn generate_shareable_code() -> String {
    let mut rng = rand::thread_rng();
    let raw: String = (0..8)
        .map(|_| {
            let idx = rng.gen_range(0..SHAREABLE_CODE_CHARSET.len());
            SHAREABLE_CODE_CHARSET[idx] as char
        })
        .collect();
    format!("{}-{}", &raw[..4], &raw[4..])
}

fn validate_email(email: &str) -> Result<&str> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::InvalidEmail {
            email: email.to_string(),
        });
    }
    Ok(email)
}

async fn check_email_free(db: &DatabaseConnection, email: &str) -> Result<()> {
    let existing = User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::EmailTaken {
            email: email.to_string(),
        });
    }
    Ok(())
}

/// Registers a patient account. Reminder emails default to enabled; patients
/// opt out through [`set_email_reminders`].
pub async fn register_patient(
    db: &DatabaseConnection,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
) -> Result<user::Model> {
    let email = validate_email(&email)?.to_string();
    check_email_free(db, &email).await?;

    let patient = user::ActiveModel {
        first_name: Set(first_name),
        last_name: Set(last_name),
        email: Set(email),
        phone: Set(phone),
        role: Set(user::ROLE_PATIENT.to_string()),
        shareable_code: Set(None),
        email_reminders: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = patient.insert(db).await?;
    Ok(result)
}

/// Registers a provider account and assigns its shareable code.
pub async fn register_provider(
    db: &DatabaseConnection,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
) -> Result<user::Model> {
    let email = validate_email(&email)?.to_string();
    check_email_free(db, &email).await?;

    let code = unused_shareable_code(db).await?;
    let provider = user::ActiveModel {
        first_name: Set(first_name),
        last_name: Set(last_name),
        email: Set(email),
        phone: Set(phone),
        role: Set(user::ROLE_PROVIDER.to_string()),
        shareable_code: Set(Some(code)),
        email_reminders: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = provider.insert(db).await?;
    Ok(result)
}

/// Picks a shareable code not already taken by another provider.
async fn unused_shareable_code(db: &DatabaseConnection) -> Result<String> {
    for _ in 0..SHAREABLE_CODE_ATTEMPTS {
        let code = generate_shareable_code();
        let taken = User::find()
            .filter(user::Column::ShareableCode.eq(code.clone()))
            .one(db)
            .await?
            .is_some();
        if !taken {
            return Ok(code);
        }
    }
    Err(Error::Config {
        message: "Could not find an unused shareable code".to_string(),
    })
}

/// Assigns a shareable code to a provider that has none. A provider that
/// already carries a code is returned unchanged.
pub async fn ensure_shareable_code(
    db: &DatabaseConnection,
    provider_id: i64,
) -> Result<user::Model> {
    let provider = require_role(db, provider_id, user::ROLE_PROVIDER).await?;
    if provider.shareable_code.is_some() {
        return Ok(provider);
    }

    let code = unused_shareable_code(db).await?;
    let mut active: user::ActiveModel = provider.into();
    active.shareable_code = Set(Some(code));
    let updated = active.update(db).await?;
    Ok(updated)
}

/// Finds a user by id.
pub async fn get_user_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Finds a user by email address.
pub async fn get_user_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the provider owning a shareable code.
pub async fn get_provider_by_code(
    db: &DatabaseConnection,
    code: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::ShareableCode.eq(code))
        .filter(user::Column::Role.eq(user::ROLE_PROVIDER))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fetches a user and checks it carries the expected role.
pub async fn require_role(
    db: &DatabaseConnection,
    id: i64,
    expected: &str,
) -> Result<user::Model> {
    let found = User::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id })?;
    if found.role != expected {
        return Err(Error::RoleMismatch {
            id,
            expected: expected.to_string(),
        });
    }
    Ok(found)
}

/// Updates an account's email address.
pub async fn update_email(db: &DatabaseConnection, id: i64, email: String) -> Result<user::Model> {
    let email = validate_email(&email)?.to_string();
    let found = User::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id })?;
    if found.email != email {
        check_email_free(db, &email).await?;
    }

    let mut active: user::ActiveModel = found.into();
    active.email = Set(email);
    let updated = active.update(db).await?;
    Ok(updated)
}

/// Updates an account's phone number; `None` clears it.
pub async fn update_phone(
    db: &DatabaseConnection,
    id: i64,
    phone: Option<String>,
) -> Result<user::Model> {
    let found = User::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id })?;

    let mut active: user::ActiveModel = found.into();
    active.phone = Set(phone);
    let updated = active.update(db).await?;
    Ok(updated)
}

/// Turns reminder emails on or off for a patient.
pub async fn set_email_reminders(
    db: &DatabaseConnection,
    patient_id: i64,
    enabled: bool,
) -> Result<user::Model> {
    let patient = require_role(db, patient_id, user::ROLE_PATIENT).await?;

    let mut active: user::ActiveModel = patient.into();
    active.email_reminders = Set(enabled);
    let updated = active.update(db).await?;
    Ok(updated)
}

/// Deactivates an account: snapshots its identity fields into the archival
/// table, removes every dependent row, then deletes the account row itself.
/// All inside one transaction so a failure leaves nothing half-deleted.
pub async fn deactivate_account(
    db: &DatabaseConnection,
    id: i64,
) -> Result<deactivated_user::Model> {
    let txn = db.begin().await?;

    let account = User::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(Error::UserNotFound { id })?;

    let snapshot = deactivated_user::ActiveModel {
        original_id: Set(account.id),
        first_name: Set(account.first_name.clone()),
        last_name: Set(account.last_name.clone()),
        email: Set(account.email.clone()),
        phone: Set(account.phone.clone()),
        deactivated_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let snapshot = snapshot.insert(&txn).await?;

    Reminder::delete_many()
        .filter(reminder::Column::PatientId.eq(id))
        .exec(&txn)
        .await?;
    WeightRecord::delete_many()
        .filter(weight_record::Column::PatientId.eq(id))
        .exec(&txn)
        .await?;
    PatientNote::delete_many()
        .filter(patient_note::Column::PatientId.eq(id))
        .exec(&txn)
        .await?;
    PatientInfo::delete_many()
        .filter(patient_info::Column::PatientId.eq(id))
        .exec(&txn)
        .await?;
    Notification::delete_many()
        .filter(notification::Column::ProviderId.eq(id))
        .exec(&txn)
        .await?;
    TreatmentRelationship::delete_many()
        .filter(
            Condition::any()
                .add(treatment_relationship::Column::PatientId.eq(id))
                .add(treatment_relationship::Column::ProviderId.eq(id)),
        )
        .exec(&txn)
        .await?;
    User::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(snapshot)
}
