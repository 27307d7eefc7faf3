use std::sync::Arc;

use tracing::{info, instrument};

use models::tag;

use super::repository::TagRepository;
use crate::errors::ServiceError;

pub struct TagService<R: TagRepository> {
    repo: Arc<R>,
}

impl<R: TagRepository> TagService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<tag::Model>, ServiceError> {
        self.repo.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<tag::Model>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<tag::Model, ServiceError> {
        tag::validate_name(name)?;
        if self.repo.find_by_name(name).await?.is_some() {
            return Err(ServiceError::conflict("tag"));
        }
        let created = self.repo.insert(name).await?;
        info!(tag_id = created.id, name = %created.name, "tag_created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: i64, name: &str) -> Result<tag::Model, ServiceError> {
        tag::validate_name(name)?;
        let mut current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("tag"))?;

        if let Some(other) = self.repo.find_by_name(name).await? {
            if other.id != id {
                return Err(ServiceError::conflict("tag"));
            }
        }

        current.name = name.to_string();
        self.repo.update(current).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let removed = self.repo.delete_by_id(id).await?;
        if !removed {
            return Err(ServiceError::not_found("tag"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::repository::mock::MockTagRepository;

    fn service() -> TagService<MockTagRepository> {
        TagService::new(Arc::new(MockTagRepository::default()))
    }

    #[tokio::test]
    async fn create_and_list() {
        let svc = service();
        svc.create("eletrica").await.unwrap();
        svc.create("hidraulica").await.unwrap();
        let all = svc.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict() {
        let svc = service();
        svc.create("eletrica").await.unwrap();
        let err = svc.create("eletrica").await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn blank_name_is_validation_error() {
        let svc = service();
        let err = svc.create("  ").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn rename_to_own_name_is_allowed() {
        let svc = service();
        let t = svc.create("pintura").await.unwrap();
        let same = svc.update(t.id, "pintura").await.unwrap();
        assert_eq!(same.name, "pintura");
    }

    #[tokio::test]
    async fn rename_to_taken_name_is_conflict() {
        let svc = service();
        let a = svc.create("pintura").await.unwrap();
        svc.create("eletrica").await.unwrap();
        let err = svc.update(a.id, "eletrica").await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let svc = service();
        let t = svc.create("pintura").await.unwrap();
        svc.delete(t.id).await.unwrap();
        let err = svc.delete(t.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
