use async_trait::async_trait;
use models::{offering, tag};

use super::domain::NewOffering;
use crate::errors::ServiceError;

/// Repository abstraction for offering persistence, including the
/// offering-tag association.
#[async_trait]
pub trait OfferingRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<offering::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<offering::Model>, ServiceError>;
    async fn find_by_provider(&self, provider_id: i64) -> Result<Vec<offering::Model>, ServiceError>;
    async fn insert(
        &self,
        provider_id: i64,
        data: &NewOffering,
    ) -> Result<offering::Model, ServiceError>;
    async fn update(&self, record: offering::Model) -> Result<offering::Model, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn tags_of(&self, offering_id: i64) -> Result<Vec<tag::Model>, ServiceError>;
    /// Fail with a validation error when any id has no matching tag row.
    async fn tags_exist(&self, tag_ids: &[i64]) -> Result<(), ServiceError>;
    /// Replace the tag set. Unknown tag ids are a validation error.
    async fn set_tags(&self, offering_id: i64, tag_ids: &[i64]) -> Result<(), ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    pub struct MockOfferingRepository {
        offerings: Mutex<HashMap<i64, offering::Model>>,
        links: Mutex<HashMap<i64, Vec<i64>>>,
        pub known_tags: Mutex<HashMap<i64, tag::Model>>,
        next_id: AtomicI64,
    }

    impl MockOfferingRepository {
        /// Seed a tag the mock will accept in `set_tags`.
        pub fn add_known_tag(&self, id: i64, name: &str) {
            self.known_tags
                .lock()
                .unwrap()
                .insert(id, tag::Model { id, name: name.into() });
        }
    }

    #[async_trait]
    impl OfferingRepository for MockOfferingRepository {
        async fn find_all(&self) -> Result<Vec<offering::Model>, ServiceError> {
            let offerings = self.offerings.lock().unwrap();
            let mut all: Vec<_> = offerings.values().cloned().collect();
            all.sort_by_key(|o| o.id);
            Ok(all)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<offering::Model>, ServiceError> {
            Ok(self.offerings.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_provider(
            &self,
            provider_id: i64,
        ) -> Result<Vec<offering::Model>, ServiceError> {
            let offerings = self.offerings.lock().unwrap();
            let mut mine: Vec<_> = offerings
                .values()
                .filter(|o| o.provider_id == provider_id)
                .cloned()
                .collect();
            mine.sort_by_key(|o| o.id);
            Ok(mine)
        }

        async fn insert(
            &self,
            provider_id: i64,
            data: &NewOffering,
        ) -> Result<offering::Model, ServiceError> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let now = Utc::now().into();
            let record = offering::Model {
                id,
                provider_id,
                name: data.name.clone(),
                description: data.description.clone(),
                price: data.price,
                created_at: now,
                updated_at: now,
            };
            self.offerings.lock().unwrap().insert(id, record.clone());
            Ok(record)
        }

        async fn update(&self, record: offering::Model) -> Result<offering::Model, ServiceError> {
            let mut offerings = self.offerings.lock().unwrap();
            if !offerings.contains_key(&record.id) {
                return Err(ServiceError::not_found("offering"));
            }
            offerings.insert(record.id, record.clone());
            Ok(record)
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            self.links.lock().unwrap().remove(&id);
            Ok(self.offerings.lock().unwrap().remove(&id).is_some())
        }

        async fn tags_of(&self, offering_id: i64) -> Result<Vec<tag::Model>, ServiceError> {
            let links = self.links.lock().unwrap();
            let tags = self.known_tags.lock().unwrap();
            Ok(links
                .get(&offering_id)
                .map(|ids| ids.iter().filter_map(|id| tags.get(id).cloned()).collect())
                .unwrap_or_default())
        }

        async fn tags_exist(&self, tag_ids: &[i64]) -> Result<(), ServiceError> {
            let tags = self.known_tags.lock().unwrap();
            for id in tag_ids {
                if !tags.contains_key(id) {
                    return Err(ServiceError::Validation(format!("unknown tag id {id}")));
                }
            }
            Ok(())
        }

        async fn set_tags(&self, offering_id: i64, tag_ids: &[i64]) -> Result<(), ServiceError> {
            self.tags_exist(tag_ids).await?;
            self.links.lock().unwrap().insert(offering_id, tag_ids.to_vec());
            Ok(())
        }
    }
}
