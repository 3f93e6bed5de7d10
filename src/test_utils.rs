//! Shared test utilities for the Dry Weight Watchers core.
//!
//! Provides the standard in-memory database setup, entity factory helpers
//! with sensible defaults, and recording/failing transport doubles for
//! dispatcher tests.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{relationships, users},
    entities::{treatment_relationship, user},
    errors::{Error, Result},
    notify::{
        EmailTransport, NotificationDispatcher, OutboundEmail, OutboundSms, SmsTransport,
    },
};
use sea_orm::DatabaseConnection;
use std::sync::{Arc, Mutex};

/// Creates an in-memory SQLite database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test patient with sensible defaults.
///
/// # Defaults
/// * `first_name`: "Pat", `last_name`: "Doe"
/// * `phone`: None
/// * reminder emails enabled (registration default)
pub async fn create_test_patient(db: &DatabaseConnection, email: &str) -> Result<user::Model> {
    users::register_patient(
        db,
        "Pat".to_string(),
        "Doe".to_string(),
        email.to_string(),
        None,
    )
    .await
}

/// Creates a test provider with sensible defaults.
///
/// # Defaults
/// * `first_name`: "Dana", `last_name`: "Reyes"
/// * `phone`: Some("+15550199") so SMS paths are exercised
pub async fn create_test_provider(db: &DatabaseConnection, email: &str) -> Result<user::Model> {
    users::register_provider(
        db,
        "Dana".to_string(),
        "Reyes".to_string(),
        email.to_string(),
        Some("+15550199".to_string()),
    )
    .await
}

/// Links a patient to a provider directly by id.
pub async fn link_patient_to_provider(
    db: &DatabaseConnection,
    patient: &user::Model,
    provider: &user::Model,
) -> Result<treatment_relationship::Model> {
    relationships::create_relationship(db, patient.id, provider.id).await
}

/// Email transport double that records every send.
#[derive(Default)]
pub struct RecordingEmailTransport {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingEmailTransport {
    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl EmailTransport for RecordingEmailTransport {
    fn send(&self, email: &OutboundEmail) -> Result<()> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// SMS transport double that records every send.
#[derive(Default)]
pub struct RecordingSmsTransport {
    sent: Mutex<Vec<OutboundSms>>,
}

impl RecordingSmsTransport {
    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<OutboundSms> {
        self.sent.lock().unwrap().clone()
    }
}

impl SmsTransport for RecordingSmsTransport {
    fn send(&self, sms: &OutboundSms) -> Result<()> {
        self.sent.lock().unwrap().push(sms.clone());
        Ok(())
    }
}

/// Email transport double that fails every send.
pub struct FailingEmailTransport;

impl EmailTransport for FailingEmailTransport {
    fn send(&self, _email: &OutboundEmail) -> Result<()> {
        Err(Error::Delivery {
            message: "email transport down".to_string(),
        })
    }
}

/// SMS transport double that fails every send.
pub struct FailingSmsTransport;

impl SmsTransport for FailingSmsTransport {
    fn send(&self, _sms: &OutboundSms) -> Result<()> {
        Err(Error::Delivery {
            message: "sms transport down".to_string(),
        })
    }
}

/// A dispatcher over recording transports, returned alongside the transports
/// so tests can inspect what was sent.
pub fn recording_dispatcher() -> (
    NotificationDispatcher,
    Arc<RecordingEmailTransport>,
    Arc<RecordingSmsTransport>,
) {
    let email = Arc::new(RecordingEmailTransport::default());
    let sms = Arc::new(RecordingSmsTransport::default());
    let dispatcher = NotificationDispatcher::new(
        Arc::clone(&email) as Arc<dyn EmailTransport>,
        Arc::clone(&sms) as Arc<dyn SmsTransport>,
        "noreply@dryweightwatchers.com".to_string(),
        Some("+15550100".to_string()),
    );
    (dispatcher, email, sms)
}

/// Like [`recording_dispatcher`] but with no SMS from-number configured.
pub fn recording_dispatcher_without_sms_from() -> (
    NotificationDispatcher,
    Arc<RecordingEmailTransport>,
    Arc<RecordingSmsTransport>,
) {
    let email = Arc::new(RecordingEmailTransport::default());
    let sms = Arc::new(RecordingSmsTransport::default());
    let dispatcher = NotificationDispatcher::new(
        Arc::clone(&email) as Arc<dyn EmailTransport>,
        Arc::clone(&sms) as Arc<dyn SmsTransport>,
        "noreply@dryweightwatchers.com".to_string(),
        None,
    );
    (dispatcher, email, sms)
}

/// A dispatcher whose transports all fail, for failure-policy tests.
pub fn failing_dispatcher() -> NotificationDispatcher {
    NotificationDispatcher::new(
        Arc::new(FailingEmailTransport),
        Arc::new(FailingSmsTransport),
        "noreply@dryweightwatchers.com".to_string(),
        Some("+15550100".to_string()),
    )
}
