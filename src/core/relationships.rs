//! Treatment relationship business logic.
//!
//! A relationship links exactly one patient to one provider, at most once per
//! pair. Patients create links by submitting a provider's shareable code;
//! providers can create them directly by id. Either party may delete a link.

use crate::{
    entities::{TreatmentRelationship, User, treatment_relationship, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Creates a relationship between a patient and a provider, rejecting
/// duplicates and wrong-role ids. The unique pair index backstops this check
/// under concurrent creation.
pub async fn create_relationship(
    db: &DatabaseConnection,
    patient_id: i64,
    provider_id: i64,
) -> Result<treatment_relationship::Model> {
    crate::core::users::require_role(db, patient_id, user::ROLE_PATIENT).await?;
    crate::core::users::require_role(db, provider_id, user::ROLE_PROVIDER).await?;

    let existing = TreatmentRelationship::find()
        .filter(treatment_relationship::Column::PatientId.eq(patient_id))
        .filter(treatment_relationship::Column::ProviderId.eq(provider_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::RelationshipExists {
            patient_id,
            provider_id,
        });
    }

    let relationship = treatment_relationship::ActiveModel {
        patient_id: Set(patient_id),
        provider_id: Set(provider_id),
        ..Default::default()
    };

    let result = relationship.insert(db).await?;
    Ok(result)
}

/// Links a patient to the provider owning a shareable code.
pub async fn link_patient_by_code(
    db: &DatabaseConnection,
    patient_id: i64,
    code: &str,
) -> Result<treatment_relationship::Model> {
    let provider = crate::core::users::get_provider_by_code(db, code)
        .await?
        .ok_or_else(|| Error::ProviderNotFound {
            code: code.to_string(),
        })?;

    create_relationship(db, patient_id, provider.id).await
}

/// Removes the relationship between a patient and a provider.
pub async fn delete_relationship(
    db: &DatabaseConnection,
    patient_id: i64,
    provider_id: i64,
) -> Result<()> {
    let deleted = TreatmentRelationship::delete_many()
        .filter(treatment_relationship::Column::PatientId.eq(patient_id))
        .filter(treatment_relationship::Column::ProviderId.eq(provider_id))
        .exec(db)
        .await?;

    if deleted.rows_affected == 0 {
        return Err(Error::RelationshipNotFound {
            patient_id,
            provider_id,
        });
    }
    Ok(())
}

/// All providers currently linked to a patient.
pub async fn providers_for_patient(
    db: &DatabaseConnection,
    patient_id: i64,
) -> Result<Vec<user::Model>> {
    let provider_ids: Vec<i64> = TreatmentRelationship::find()
        .filter(treatment_relationship::Column::PatientId.eq(patient_id))
        .all(db)
        .await?
        .into_iter()
        .map(|r| r.provider_id)
        .collect();

    if provider_ids.is_empty() {
        return Ok(Vec::new());
    }

    User::find()
        .filter(user::Column::Id.is_in(provider_ids))
        .all(db)
        .await
        .map_err(Into::into)
}

/// All patients currently linked to a provider.
pub async fn patients_for_provider(
    db: &DatabaseConnection,
    provider_id: i64,
) -> Result<Vec<user::Model>> {
    let patient_ids: Vec<i64> = TreatmentRelationship::find()
        .filter(treatment_relationship::Column::ProviderId.eq(provider_id))
        .all(db)
        .await?
        .into_iter()
        .map(|r| r.patient_id)
        .collect();

    if patient_ids.is_empty() {
        return Ok(Vec::new());
    }

    User::find()
        .filter(user::Column::Id.is_in(patient_ids))
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
    async fn test_link_patient_by_code() -> Result<()> {
        let db = setup_test_db().await?;

        let patient = create_test_patient(&db, "pat@example.com").await?;
        let provider = create_test_provider(&db, "doc@example.com").await?;
        let code = provider.shareable_code.clone().unwrap();

        let relationship = link_patient_by_code(&db, patient.id, &code).await?;
        assert_eq!(relationship.patient_id, patient.id);
        assert_eq!(relationship.provider_id, provider.id);

        let linked = providers_for_patient(&db, patient.id).await?;
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].id, provider.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_link_with_unknown_code() -> Result<()> {
        let db = setup_test_db().await?;

        let patient = create_test_patient(&db, "pat@example.com").await?;
        let result = link_patient_by_code(&db, patient.id, "AAAA-0000").await;
        assert!(matches!(result.unwrap_err(), Error::ProviderNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_pair_rejected_first_intact() -> Result<()> {
        let db = setup_test_db().await?;

        let patient = create_test_patient(&db, "pat@example.com").await?;
        let provider = create_test_provider(&db, "doc@example.com").await?;

        let first = create_relationship(&db, patient.id, provider.id).await?;
        let second = create_relationship(&db, patient.id, provider.id).await;
        assert!(matches!(
            second.unwrap_err(),
            Error::RelationshipExists { .. }
        ));

        let remaining = TreatmentRelationship::find().all(&db).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, first.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_role_checks() -> Result<()> {
        let db = setup_test_db().await?;

        let patient_a = create_test_patient(&db, "a@example.com").await?;
        let patient_b = create_test_patient(&db, "b@example.com").await?;

        let result = create_relationship(&db, patient_a.id, patient_b.id).await;
        assert!(matches!(result.unwrap_err(), Error::RoleMismatch { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_relationship() -> Result<()> {
        let db = setup_test_db().await?;

        let patient = create_test_patient(&db, "pat@example.com").await?;
        let provider = create_test_provider(&db, "doc@example.com").await?;
        create_relationship(&db, patient.id, provider.id).await?;

        delete_relationship(&db, patient.id, provider.id).await?;
        assert!(providers_for_patient(&db, patient.id).await?.is_empty());

        let again = delete_relationship(&db, patient.id, provider.id).await;
        assert!(matches!(
            again.unwrap_err(),
            Error::RelationshipNotFound { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_patients_for_provider() -> Result<()> {
        let db = setup_test_db().await?;

        let provider = create_test_provider(&db, "doc@example.com").await?;
        let patient_a = create_test_patient(&db, "a@example.com").await?;
        let patient_b = create_test_patient(&db, "b@example.com").await?;
        create_relationship(&db, patient_a.id, provider.id).await?;
        create_relationship(&db, patient_b.id, provider.id).await?;

        let patients = patients_for_provider(&db, provider.id).await?;
        assert_eq!(patients.len(), 2);

        Ok(())
    }
}
