/// Database connection and schema bootstrap
pub mod database;

/// Runtime settings from config.toml and the environment
pub mod settings;
