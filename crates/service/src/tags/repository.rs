use async_trait::async_trait;
use models::tag;

use crate::errors::ServiceError;

/// Repository abstraction for tag persistence.
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<tag::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<tag::Model>, ServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<tag::Model>, ServiceError>;
    async fn insert(&self, name: &str) -> Result<tag::Model, ServiceError>;
    async fn update(&self, record: tag::Model) -> Result<tag::Model, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MockTagRepository {
        tags: Mutex<HashMap<i64, tag::Model>>,
        next_id: AtomicI64,
    }

    #[async_trait]
    impl TagRepository for MockTagRepository {
        async fn find_all(&self) -> Result<Vec<tag::Model>, ServiceError> {
            let tags = self.tags.lock().unwrap();
            let mut all: Vec<_> = tags.values().cloned().collect();
            all.sort_by_key(|t| t.id);
            Ok(all)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<tag::Model>, ServiceError> {
            Ok(self.tags.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<tag::Model>, ServiceError> {
            let tags = self.tags.lock().unwrap();
            Ok(tags.values().find(|t| t.name == name).cloned())
        }

        async fn insert(&self, name: &str) -> Result<tag::Model, ServiceError> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let record = tag::Model { id, name: name.to_string() };
            self.tags.lock().unwrap().insert(id, record.clone());
            Ok(record)
        }

        async fn update(&self, record: tag::Model) -> Result<tag::Model, ServiceError> {
            let mut tags = self.tags.lock().unwrap();
            if !tags.contains_key(&record.id) {
                return Err(ServiceError::not_found("tag"));
            }
            tags.insert(record.id, record.clone());
            Ok(record)
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.tags.lock().unwrap().remove(&id).is_some())
        }
    }
}
