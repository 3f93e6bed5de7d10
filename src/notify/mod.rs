//! Outbound notification layer - transport contracts, rendered message types,
//! templates and the dispatcher.
//!
//! Email and SMS delivery are external collaborators; this crate only defines
//! their contracts as object-safe traits and ships log-only implementations
//! for deployments without delivery credentials. Real SMTP/gateway backends
//! plug in behind the same traits.

/// The dispatcher - the single component touching outbound channels
pub mod dispatcher;
/// Fixed HTML templates for reminder and alert emails
pub mod templates;

pub use dispatcher::{AlertDispatchSummary, NotificationDispatcher};

use crate::errors::Result;
use tracing::info;

/// A rendered email, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html_body: String,
    /// From-address
    pub from: String,
    /// Recipient addresses; one send may carry several
    pub to: Vec<String>,
}

/// A rendered SMS, ready for the transport. One value per recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundSms {
    /// Message body
    pub body: String,
    /// From-number
    pub from: String,
    /// Recipient number
    pub to: String,
}

/// Contract for the email collaborator. Implementations should bound their
/// own send timeout so a stuck delivery cannot stall the dispatcher.
pub trait EmailTransport: Send + Sync {
    /// Delivers one email to all its recipients, or returns a delivery error.
    fn send(&self, email: &OutboundEmail) -> Result<()>;
}

/// Contract for the SMS collaborator.
pub trait SmsTransport: Send + Sync {
    /// Delivers one SMS, or returns a delivery error.
    fn send(&self, sms: &OutboundSms) -> Result<()>;
}

/// Email transport that logs instead of delivering. Used when no SMTP
/// backend is configured.
pub struct LoggingEmailTransport;

impl EmailTransport for LoggingEmailTransport {
    fn send(&self, email: &OutboundEmail) -> Result<()> {
        info!(
            "email (not delivered): to={:?} subject={:?}",
            email.to, email.subject
        );
        Ok(())
    }
}

/// SMS transport that logs instead of delivering.
pub struct LoggingSmsTransport;

impl SmsTransport for LoggingSmsTransport {
    fn send(&self, sms: &OutboundSms) -> Result<()> {
        info!("sms (not delivered): to={:?}", sms.to);
        Ok(())
    }
}
