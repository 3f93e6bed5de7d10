//! Scheduler binary: runs the reminder polling loop for a deployment.
//!
//! The HTTP layer runs elsewhere; this process only needs the database, the
//! dispatcher and the advisory lock. Starting a second copy on the same host
//! is harmless: it sees the held lock and exits cleanly.

use dry_weight_watchers::{
    config,
    errors::Result,
    notify::{LoggingEmailTransport, LoggingSmsTransport, NotificationDispatcher},
    scheduler::ReminderScheduler,
};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenv().ok();

    let settings = config::settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load application settings: {e}"))?;
    info!("Settings loaded.");

    let db = config::database::create_connection(&settings.database_url)
        .await
        .inspect(|_| info!("Database connected."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to initialize schema: {e}"))?;

    let dispatcher = NotificationDispatcher::new(
        Arc::new(LoggingEmailTransport),
        Arc::new(LoggingSmsTransport),
        settings.email_from.clone(),
        settings.sms_from.clone(),
    );

    match ReminderScheduler::try_start(&settings.lock_file)? {
        Some(scheduler) => {
            scheduler
                .with_interval(settings.poll_interval())
                .run(db, dispatcher)
                .await;
        }
        None => {
            info!("Another scheduler instance holds the lock; exiting.");
        }
    }

    Ok(())
}
