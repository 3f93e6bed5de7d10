//! Patient note business logic - notes a provider keeps on a patient's chart.

use crate::{
    entities::{PatientNote, patient_note, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

fn validate_note_type(note_type: Option<String>) -> Result<Option<String>> {
    match note_type {
        None => Ok(None),
        Some(kind) => {
            let trimmed = kind.trim();
            if trimmed == patient_note::NOTE_TYPE_GENERIC
                || trimmed == patient_note::NOTE_TYPE_MEDICATION
            {
                Ok(Some(trimmed.to_string()))
            } else {
                Err(Error::InvalidNoteType { note_type: kind })
            }
        }
    }
}

/// Creates a note on a patient's chart.
pub async fn add_note(
    db: &DatabaseConnection,
    patient_id: i64,
    note: String,
    note_type: Option<String>,
) -> Result<patient_note::Model> {
    let note_type = validate_note_type(note_type)?;
    crate::core::users::require_role(db, patient_id, user::ROLE_PATIENT).await?;

    let entry = patient_note::ActiveModel {
        patient_id: Set(patient_id),
        note: Set(note),
        note_type: Set(note_type),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = entry.insert(db).await?;
    Ok(result)
}

/// Rewrites an existing note's body and type.
pub async fn update_note(
    db: &DatabaseConnection,
    note_id: i64,
    note: String,
    note_type: Option<String>,
) -> Result<patient_note::Model> {
    let note_type = validate_note_type(note_type)?;

    let found = PatientNote::find_by_id(note_id)
        .one(db)
        .await?
        .ok_or(Error::NoteNotFound { id: note_id })?;

    let mut active: patient_note::ActiveModel = found.into();
    active.note = Set(note);
    active.note_type = Set(note_type);
    let updated = active.update(db).await?;
    Ok(updated)
}

/// Deletes a note.
pub async fn delete_note(db: &DatabaseConnection, note_id: i64) -> Result<()> {
    let deleted = PatientNote::delete_many()
        .filter(patient_note::Column::Id.eq(note_id))
        .exec(db)
        .await?;

    if deleted.rows_affected == 0 {
        return Err(Error::NoteNotFound { id: note_id });
    }
    Ok(())
}

/// All notes on a patient's chart, oldest first.
pub async fn notes_for_patient(
    db: &DatabaseConnection,
    patient_id: i64,
) -> Result<Vec<patient_note::Model>> {
    PatientNote::find()
        .filter(patient_note::Column::PatientId.eq(patient_id))
        .order_by_asc(patient_note::Column::Timestamp)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_note_with_valid_types() -> Result<()> {
        let db = setup_test_db().await?;
        let patient = create_test_patient(&db, "pat@example.com").await?;

        let plain = add_note(&db, patient.id, "Checked in".to_string(), None).await?;
        assert!(plain.note_type.is_none());

        let typed = add_note(
            &db,
            patient.id,
            "Started diuretic".to_string(),
            Some("medication".to_string()),
        )
        .await?;
        assert_eq!(typed.note_type.as_deref(), Some("medication"));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_note_rejects_unknown_type() -> Result<()> {
        let db = setup_test_db().await?;
        let patient = create_test_patient(&db, "pat@example.com").await?;

        let result = add_note(
            &db,
            patient.id,
            "text".to_string(),
            Some("diary".to_string()),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidNoteType { .. }));
        assert!(notes_for_patient(&db, patient.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_note() -> Result<()> {
        let db = setup_test_db().await?;
        let patient = create_test_patient(&db, "pat@example.com").await?;

        let entry = add_note(&db, patient.id, "draft".to_string(), None).await?;
        let updated = update_note(
            &db,
            entry.id,
            "final".to_string(),
            Some("generic".to_string()),
        )
        .await?;
        assert_eq!(updated.note, "final");
        assert_eq!(updated.note_type.as_deref(), Some("generic"));

        delete_note(&db, entry.id).await?;
        let gone = delete_note(&db, entry.id).await;
        assert!(matches!(gone.unwrap_err(), Error::NoteNotFound { .. }));

        Ok(())
    }
}
