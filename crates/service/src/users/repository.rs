use async_trait::async_trait;
use models::user;

use super::domain::NewUser;
use crate::errors::ServiceError;

/// Repository abstraction for user persistence. Exposes exactly the
/// query methods the service layer uses, nothing derived.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<user::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError>;
    async fn exists_by_document(&self, document: &str) -> Result<bool, ServiceError>;
    async fn insert(&self, data: &NewUser, password_hash: &str) -> Result<user::Model, ServiceError>;
    async fn update(&self, record: user::Model) -> Result<user::Model, ServiceError>;
    /// Returns whether a row was actually removed; removing a missing id
    /// is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<HashMap<i64, user::Model>>,
        next_id: AtomicI64,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_all(&self) -> Result<Vec<user::Model>, ServiceError> {
            let users = self.users.lock().unwrap();
            let mut all: Vec<_> = users.values().cloned().collect();
            all.sort_by_key(|u| u.id);
            Ok(all)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, ServiceError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().any(|u| u.email == email))
        }

        async fn exists_by_document(&self, document: &str) -> Result<bool, ServiceError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().any(|u| u.document == document))
        }

        async fn insert(
            &self,
            data: &NewUser,
            password_hash: &str,
        ) -> Result<user::Model, ServiceError> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let now = Utc::now().into();
            let record = user::Model {
                id,
                name: data.name.clone(),
                email: data.email.clone(),
                document: data.document.clone(),
                password_hash: password_hash.to_string(),
                phone: data.phone.clone(),
                profile_image: None,
                num_strikes: 0,
                created_at: now,
                updated_at: now,
            };
            self.users.lock().unwrap().insert(id, record.clone());
            Ok(record)
        }

        async fn update(&self, record: user::Model) -> Result<user::Model, ServiceError> {
            let mut users = self.users.lock().unwrap();
            if !users.contains_key(&record.id) {
                return Err(ServiceError::not_found("user"));
            }
            users.insert(record.id, record.clone());
            Ok(record)
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.users.lock().unwrap().remove(&id).is_some())
        }
    }
}
