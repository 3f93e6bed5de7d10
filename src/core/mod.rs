//! Core business logic - framework-agnostic operations over the data model.
//!
//! Every function here is async, takes a `&DatabaseConnection` and returns the
//! crate [`Result`](crate::errors::Result) type. The excluded HTTP layer is
//! expected to call straight into these modules.

/// Weight-change alert evaluation and dispatch
pub mod alerts;
/// Patient note CRUD
pub mod notes;
/// Provider in-app notification storage and read-state
pub mod notifications;
/// Provider-maintained patient details (incl. alarm threshold override)
pub mod patient_info;
/// Reminder CRUD and due-reminder matching
pub mod reminders;
/// Treatment relationships between patients and providers
pub mod relationships;
/// Provider dashboard summaries
pub mod report;
/// Account registration, lookup, profile updates, deactivation
pub mod users;
/// Weight record storage and history
pub mod weights;
