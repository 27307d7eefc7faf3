use std::sync::Arc;

use tracing::{info, instrument};

use models::offering;

use super::domain::{NewOffering, OfferingWithTags};
use super::repository::OfferingRepository;
use crate::errors::ServiceError;
use crate::users::repository::UserRepository;

/// Offering business service. Holds the user repository as well so that
/// provider existence is checked before any offering row is written.
pub struct OfferingService<R: OfferingRepository, U: UserRepository> {
    repo: Arc<R>,
    users: Arc<U>,
}

impl<R: OfferingRepository, U: UserRepository> OfferingService<R, U> {
    pub fn new(repo: Arc<R>, users: Arc<U>) -> Self {
        Self { repo, users }
    }

    async fn with_tags(&self, record: offering::Model) -> Result<OfferingWithTags, ServiceError> {
        let tags = self.repo.tags_of(record.id).await?;
        Ok(OfferingWithTags { offering: record, tags })
    }

    async fn ensure_provider(&self, provider_id: i64) -> Result<(), ServiceError> {
        if self.users.find_by_id(provider_id).await?.is_none() {
            return Err(ServiceError::not_found("provider"));
        }
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<OfferingWithTags>, ServiceError> {
        let records = self.repo.find_all().await?;
        let mut out = Vec::with_capacity(records.len());
        for record in records {
            out.push(self.with_tags(record).await?);
        }
        Ok(out)
    }

    /// NotFound when the provider itself does not exist; an existing
    /// provider with no offerings yields an empty list.
    pub async fn list_by_provider(
        &self,
        provider_id: i64,
    ) -> Result<Vec<OfferingWithTags>, ServiceError> {
        self.ensure_provider(provider_id).await?;
        let records = self.repo.find_by_provider(provider_id).await?;
        let mut out = Vec::with_capacity(records.len());
        for record in records {
            out.push(self.with_tags(record).await?);
        }
        Ok(out)
    }

    pub async fn get(&self, id: i64) -> Result<Option<OfferingWithTags>, ServiceError> {
        match self.repo.find_by_id(id).await? {
            Some(record) => Ok(Some(self.with_tags(record).await?)),
            None => Ok(None),
        }
    }

    /// Create an offering bound to an existing provider. The provider
    /// check runs first; no row is written for a missing provider.
    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        provider_id: i64,
        input: NewOffering,
    ) -> Result<OfferingWithTags, ServiceError> {
        offering::validate_name(&input.name)?;
        offering::validate_price(input.price)?;
        self.ensure_provider(provider_id).await?;
        // Tag ids are checked up front so a bad set never leaves a row behind
        self.repo.tags_exist(&input.tag_ids).await?;

        let created = self.repo.insert(provider_id, &input).await?;
        self.repo.set_tags(created.id, &input.tag_ids).await?;
        info!(offering_id = created.id, provider_id, "offering_created");
        self.with_tags(created).await
    }

    /// Wholesale replace of the mutable fields, tags included. The
    /// owning provider never changes.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i64,
        input: NewOffering,
    ) -> Result<OfferingWithTags, ServiceError> {
        offering::validate_name(&input.name)?;
        offering::validate_price(input.price)?;

        let mut current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("offering"))?;
        self.repo.tags_exist(&input.tag_ids).await?;

        current.name = input.name.clone();
        current.description = input.description.clone();
        current.price = input.price;
        let updated = self.repo.update(current).await?;
        self.repo.set_tags(id, &input.tag_ids).await?;
        self.with_tags(updated).await
    }

    /// Unlike user deletion, removing a missing offering is NotFound.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let removed = self.repo.delete_by_id(id).await?;
        if !removed {
            return Err(ServiceError::not_found("offering"));
        }
        info!(offering_id = id, "offering_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offerings::repository::mock::MockOfferingRepository;
    use crate::password::mock::PlainPasswordHasher;
    use crate::storage::mock::RecordingFileStore;
    use crate::users::domain::NewUser;
    use crate::users::repository::mock::MockUserRepository;
    use crate::users::UserService;

    async fn seeded() -> (
        OfferingService<MockOfferingRepository, MockUserRepository>,
        i64,
        Arc<MockOfferingRepository>,
    ) {
        let users = Arc::new(MockUserRepository::default());
        let user_svc = UserService::new(
            Arc::clone(&users),
            Arc::new(PlainPasswordHasher),
            Arc::new(RecordingFileStore::default()),
        );
        let provider = user_svc
            .register(NewUser {
                name: "Prestador".into(),
                email: "p@x.com".into(),
                document: "999".into(),
                password: "Secret123".into(),
                phone: "".into(),
            })
            .await
            .unwrap();

        let repo = Arc::new(MockOfferingRepository::default());
        repo.add_known_tag(1, "eletrica");
        repo.add_known_tag(2, "hidraulica");
        let svc = OfferingService::new(Arc::clone(&repo), users);
        (svc, provider.id, repo)
    }

    fn new_offering(tag_ids: Vec<i64>) -> NewOffering {
        NewOffering {
            name: "Troca de chuveiro".into(),
            description: "Instalacao e teste".into(),
            price: 80.0,
            tag_ids,
        }
    }

    #[tokio::test]
    async fn create_binds_provider_and_tags() {
        let (svc, provider_id, _) = seeded().await;
        let created = svc.create(provider_id, new_offering(vec![1, 2])).await.unwrap();

        assert_eq!(created.offering.provider_id, provider_id);
        assert_eq!(created.tags.len(), 2);

        let listed = svc.list_by_provider(provider_id).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn create_for_missing_provider_is_not_found_and_writes_nothing() {
        let (svc, _, repo) = seeded().await;
        let err = svc.create(404, new_offering(vec![])).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_bad_input() {
        let (svc, provider_id, _) = seeded().await;

        let mut blank = new_offering(vec![]);
        blank.name = " ".into();
        assert!(matches!(
            svc.create(provider_id, blank).await.unwrap_err(),
            ServiceError::Validation(_)
        ));

        let mut negative = new_offering(vec![]);
        negative.price = -5.0;
        assert!(matches!(
            svc.create(provider_id, negative).await.unwrap_err(),
            ServiceError::Validation(_)
        ));

        assert!(matches!(
            svc.create(provider_id, new_offering(vec![99])).await.unwrap_err(),
            ServiceError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn create_with_unknown_tag_writes_nothing() {
        let (svc, provider_id, repo) = seeded().await;

        let err = svc
            .create(provider_id, new_offering(vec![1, 99]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_with_unknown_tag_leaves_record_untouched() {
        let (svc, provider_id, _) = seeded().await;
        let created = svc.create(provider_id, new_offering(vec![1])).await.unwrap();

        let mut bad = new_offering(vec![99]);
        bad.name = "Pintura".into();
        let err = svc.update(created.offering.id, bad).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let unchanged = svc.get(created.offering.id).await.unwrap().unwrap();
        assert_eq!(unchanged.offering.name, "Troca de chuveiro");
        assert_eq!(unchanged.tags.len(), 1);
        assert_eq!(unchanged.tags[0].id, 1);
    }

    #[tokio::test]
    async fn list_by_missing_provider_is_not_found() {
        let (svc, _, _) = seeded().await;
        let err = svc.list_by_provider(404).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_replaces_fields_and_tags() {
        let (svc, provider_id, _) = seeded().await;
        let created = svc.create(provider_id, new_offering(vec![1])).await.unwrap();

        let updated = svc
            .update(
                created.offering.id,
                NewOffering {
                    name: "Pintura".into(),
                    description: "Parede e teto".into(),
                    price: 300.0,
                    tag_ids: vec![2],
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.offering.name, "Pintura");
        assert_eq!(updated.offering.provider_id, provider_id);
        assert_eq!(updated.tags.len(), 1);
        assert_eq!(updated.tags[0].id, 2);
    }

    #[tokio::test]
    async fn update_missing_offering_is_not_found() {
        let (svc, _, _) = seeded().await;
        let err = svc.update(77, new_offering(vec![])).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_missing_offering_is_not_found() {
        let (svc, provider_id, _) = seeded().await;
        let created = svc.create(provider_id, new_offering(vec![])).await.unwrap();

        svc.delete(created.offering.id).await.unwrap();
        let err = svc.delete(created.offering.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
