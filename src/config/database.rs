//! Database configuration module for Dry Weight Watchers.
//!
//! Handles the SQLite connection and table creation using SeaORM. Tables are
//! generated from the entity definitions via `Schema::create_table_from_entity`
//! so the database schema always matches the Rust struct definitions without
//! manual SQL. The one piece the entities cannot express on their own — the
//! composite uniqueness of a (patient, provider) treatment-relationship pair —
//! is created here as a unique index.

use crate::entities::{
    DeactivatedUser, Notification, PatientInfo, PatientNote, Reminder, TreatmentRelationship,
    TreatmentRelationshipColumn, User, WeightRecord,
};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

/// Default SQLite location when `DATABASE_URL` is not set.
/// `mode=rwc` lets SQLite create the file on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/dry_weight_watchers.sqlite?mode=rwc";

/// Establishes a connection to the database at the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables (idempotently) from the entity definitions, plus the
/// unique index enforcing at most one treatment relationship per
/// (patient, provider) pair.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table(db, &schema, User).await?;
    create_table(db, &schema, TreatmentRelationship).await?;
    create_table(db, &schema, WeightRecord).await?;
    create_table(db, &schema, Reminder).await?;
    create_table(db, &schema, PatientNote).await?;
    create_table(db, &schema, Notification).await?;
    create_table(db, &schema, PatientInfo).await?;
    create_table(db, &schema, DeactivatedUser).await?;

    let pair_index = Index::create()
        .name("uq_treatment_relationships_pair")
        .table(TreatmentRelationship)
        .col(TreatmentRelationshipColumn::PatientId)
        .col(TreatmentRelationshipColumn::ProviderId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&pair_index)).await?;

    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(db.get_database_backend().build(&statement))
        .await?;
    Ok(())
}
