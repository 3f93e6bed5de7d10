//! Notification dispatcher - the only component touching outbound channels.
//!
//! Both paths are best-effort with one uniform failure policy: every delivery
//! failure is logged and counted per recipient, never raised and never
//! retried. In-app notification rows are written before any send is
//! attempted, so a dead transport cannot lose an alert.

use crate::{
    core::alerts::WeightChange,
    entities::{reminder, user},
    errors::Result,
    notify::{EmailTransport, OutboundEmail, OutboundSms, SmsTransport, templates},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, warn};

/// What one weight-alert dispatch did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertDispatchSummary {
    /// In-app notification rows written
    pub notifications_created: usize,
    /// Email/SMS sends that failed (each logged at the point of failure)
    pub delivery_failures: usize,
}

/// Renders and sends reminder and alert messages over the configured
/// transports.
#[derive(Clone)]
pub struct NotificationDispatcher {
    email: Arc<dyn EmailTransport>,
    sms: Arc<dyn SmsTransport>,
    email_from: String,
    sms_from: Option<String>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher over the given transports. SMS delivery is
    /// skipped entirely when `sms_from` is `None`.
    #[must_use]
    pub fn new(
        email: Arc<dyn EmailTransport>,
        sms: Arc<dyn SmsTransport>,
        email_from: String,
        sms_from: Option<String>,
    ) -> Self {
        Self {
            email,
            sms,
            email_from,
            sms_from,
        }
    }

    /// Emails a patient one of their scheduled reminders. A failed send is
    /// logged and swallowed so one bad mailbox cannot stall the polling loop.
    pub fn send_reminder(&self, patient: &user::Model, entry: &reminder::Model) {
        let email = OutboundEmail {
            subject: templates::REMINDER_SUBJECT.to_string(),
            html_body: templates::reminder_email_html(entry),
            from: self.email_from.clone(),
            to: vec![patient.email.clone()],
        };

        match self.email.send(&email) {
            Ok(()) => info!("reminder email sent to {}", patient.email),
            Err(err) => warn!("failed to send reminder email to {}: {err}", patient.email),
        }
    }

    /// Fans a weight-change alert out to a patient's providers: one persisted
    /// notification row per provider, then one batched email to all provider
    /// addresses and one SMS per provider with a phone on file. With no
    /// providers the alert is dropped without a trace.
    pub async fn send_weight_alert(
        &self,
        db: &DatabaseConnection,
        patient: &user::Model,
        change: &WeightChange,
        providers: &[user::Model],
    ) -> Result<AlertDispatchSummary> {
        let mut summary = AlertDispatchSummary::default();
        if providers.is_empty() {
            return Ok(summary);
        }

        let message = templates::weight_alert_message(patient, change);
        for provider in providers {
            crate::core::notifications::create_notification(db, provider.id, message.clone())
                .await?;
            summary.notifications_created += 1;
        }

        let email = OutboundEmail {
            subject: templates::ALERT_SUBJECT.to_string(),
            html_body: templates::weight_alert_email_html(change),
            from: self.email_from.clone(),
            to: providers.iter().map(|p| p.email.clone()).collect(),
        };
        if let Err(err) = self.email.send(&email) {
            warn!("failed to send weight alert email: {err}");
            summary.delivery_failures += 1;
        }

        if let Some(sms_from) = &self.sms_from {
            for provider in providers {
                let Some(phone) = &provider.phone else {
                    continue;
                };
                let sms = OutboundSms {
                    body: message.clone(),
                    from: sms_from.clone(),
                    to: phone.clone(),
                };
                if let Err(err) = self.sms.send(&sms) {
                    warn!("failed to send weight alert SMS to {phone}: {err}");
                    summary.delivery_failures += 1;
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn sample_change() -> WeightChange {
        WeightChange {
            previous_weight: 150.0,
            new_weight: 160.0,
            change: 10.0,
        }
    }

    #[tokio::test]
    async fn test_alert_creates_rows_and_batches_email() -> Result<()> {
        let db = setup_test_db().await?;
        let patient = create_test_patient(&db, "pat@example.com").await?;
        let doc_a = create_test_provider(&db, "a@example.com").await?;
        let doc_b = create_test_provider(&db, "b@example.com").await?;

        let (dispatcher, email, sms) = recording_dispatcher();
        let providers = vec![doc_a.clone(), doc_b.clone()];
        let summary = dispatcher
            .send_weight_alert(&db, &patient, &sample_change(), &providers)
            .await?;

        assert_eq!(summary.notifications_created, 2);
        assert_eq!(summary.delivery_failures, 0);

        // One batched email to both providers
        let sent = email.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].to,
            vec!["a@example.com".to_string(), "b@example.com".to_string()]
        );

        // SMS only to providers with a phone on file (both test providers have one)
        assert_eq!(sms.sent().len(), 2);

        for provider in [&doc_a, &doc_b] {
            let rows =
                crate::core::notifications::notifications_for_provider(&db, provider.id).await?;
            assert_eq!(rows.len(), 1);
            assert!(rows[0].message.contains("Pat Doe"));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_alert_failure_is_counted_not_raised() -> Result<()> {
        let db = setup_test_db().await?;
        let patient = create_test_patient(&db, "pat@example.com").await?;
        let provider = create_test_provider(&db, "doc@example.com").await?;

        let dispatcher = failing_dispatcher();
        let summary = dispatcher
            .send_weight_alert(&db, &patient, &sample_change(), &[provider.clone()])
            .await?;

        // Row persisted despite both transports failing
        assert_eq!(summary.notifications_created, 1);
        assert_eq!(summary.delivery_failures, 2);
        let rows = crate::core::notifications::notifications_for_provider(&db, provider.id).await?;
        assert_eq!(rows.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_alert_with_no_providers_is_dropped() -> Result<()> {
        let db = setup_test_db().await?;
        let patient = create_test_patient(&db, "pat@example.com").await?;

        let (dispatcher, email, sms) = recording_dispatcher();
        let summary = dispatcher
            .send_weight_alert(&db, &patient, &sample_change(), &[])
            .await?;

        assert_eq!(summary, AlertDispatchSummary::default());
        assert!(email.sent().is_empty());
        assert!(sms.sent().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_sms_skipped_without_from_number() -> Result<()> {
        let db = setup_test_db().await?;
        let patient = create_test_patient(&db, "pat@example.com").await?;
        let provider = create_test_provider(&db, "doc@example.com").await?;

        let (dispatcher, _email, sms) = recording_dispatcher_without_sms_from();
        dispatcher
            .send_weight_alert(&db, &patient, &sample_change(), &[provider])
            .await?;
        assert!(sms.sent().is_empty());

        Ok(())
    }
}
