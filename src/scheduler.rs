//! Reminder scheduler - the clock poller and its single-instance lock.
//!
//! One scheduler per host: an advisory flock over a designated file decides
//! which process runs the loop. A process that fails to take the lock exits
//! the start path silently and leaves the running instance alone. The OS
//! drops the lock when the holder exits, cleanly or not, so a restarted
//! process can always reacquire it.
//!
//! The loop itself ticks once per interval, reads the wall clock in the
//! reference timezone and fires due reminders. Tick failures are logged and
//! absorbed; the next tick proceeds regardless.

use crate::{core::reminders, errors::Result, notify::NotificationDispatcher};
use chrono::NaiveDateTime;
use fs2::FileExt;
use sea_orm::DatabaseConnection;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// Timezone reminder times are interpreted in.
pub const REFERENCE_TIMEZONE: chrono_tz::Tz = chrono_tz::America::New_York;

/// Seconds between reminder-matcher ticks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Current wall-clock time in the reference timezone, as a naive local
/// datetime ready for hour/minute/weekday matching.
#[must_use]
pub fn now_in_reference_timezone() -> NaiveDateTime {
    chrono::Utc::now()
        .with_timezone(&REFERENCE_TIMEZONE)
        .naive_local()
}

/// Exclusive advisory lock over the scheduler lock file.
///
/// Held for the lifetime of the value; dropped (and therefore released) when
/// the scheduler is torn down, or by the OS when the process dies.
pub struct SchedulerLock {
    file: File,
}

impl SchedulerLock {
    /// Tries to take the lock. `Ok(None)` means another process holds it.
    pub fn try_acquire(path: &Path) -> Result<Option<Self>> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { file })),
            Err(err)
                if err.raw_os_error() == fs2::lock_contended_error().raw_os_error() =>
            {
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl Drop for SchedulerLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// The clock poller. Owns its lock handle and running flag; constructed once
/// at process start and handed to whatever spawns the loop.
pub struct ReminderScheduler {
    _lock: SchedulerLock,
    running: bool,
    interval: Duration,
}

impl ReminderScheduler {
    /// Builds a scheduler if this process wins the advisory lock. `Ok(None)`
    /// is the silent no-op path: another instance is already polling.
    pub fn try_start(lock_path: &Path) -> Result<Option<Self>> {
        Ok(SchedulerLock::try_acquire(lock_path)?.map(|lock| Self {
            _lock: lock,
            running: false,
            interval: DEFAULT_POLL_INTERVAL,
        }))
    }

    /// Overrides the tick interval (configured via `poll_interval_secs`).
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Whether the polling loop has started.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Runs the polling loop until process termination. Never returns.
    pub async fn run(mut self, db: DatabaseConnection, dispatcher: NotificationDispatcher) {
        self.running = true;
        info!(
            "reminder scheduler started, ticking every {:?}",
            self.interval
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let now = now_in_reference_timezone();
            if let Err(err) = reminders::check_and_fire_due_reminders(&db, &dispatcher, now).await {
                error!("reminder tick at {now} failed: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_second_acquire_fails_while_first_is_held() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("scheduler.lock");

        let first = SchedulerLock::try_acquire(&path)?;
        assert!(first.is_some());

        // flock is per open file description, so a second open in the same
        // process contends just like a second process would
        let second = SchedulerLock::try_acquire(&path)?;
        assert!(second.is_none());

        Ok(())
    }

    #[test]
    fn test_lock_reacquirable_after_drop() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("scheduler.lock");

        let first = SchedulerLock::try_acquire(&path)?;
        drop(first);

        let second = SchedulerLock::try_acquire(&path)?;
        assert!(second.is_some());

        Ok(())
    }

    #[test]
    fn test_only_one_scheduler_starts() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("scheduler.lock");

        let winner = ReminderScheduler::try_start(&path)?;
        let winner = winner.unwrap();
        assert!(!winner.is_running());

        let loser = ReminderScheduler::try_start(&path)?;
        assert!(loser.is_none());

        Ok(())
    }
}
