use std::sync::Arc;

use tracing::{info, instrument, warn};

use models::user;

use super::domain::{NewUser, UserPatch};
use super::repository::UserRepository;
use crate::errors::ServiceError;
use crate::password::PasswordHasher;
use crate::storage::FileStore;

/// User business service independent of web framework.
///
/// Collaborators are injected once at construction; the service owns the
/// ordering guarantees between storage and persistence calls.
pub struct UserService<R: UserRepository, H: PasswordHasher, F: FileStore> {
    repo: Arc<R>,
    hasher: Arc<H>,
    files: Arc<F>,
}

impl<R: UserRepository, H: PasswordHasher, F: FileStore> UserService<R, H, F> {
    pub fn new(repo: Arc<R>, hasher: Arc<H>, files: Arc<F>) -> Self {
        Self { repo, hasher, files }
    }

    /// Register a new user with a hashed password.
    ///
    /// Fails with `Conflict` when the email or document is already taken;
    /// nothing is persisted in that case.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: NewUser) -> Result<user::Model, ServiceError> {
        user::validate_name(&input.name)?;
        user::validate_email(&input.email)?;
        user::validate_document(&input.document)?;
        if input.password.len() < 8 {
            return Err(ServiceError::Validation("password too short (>=8)".into()));
        }

        if self.repo.exists_by_email(&input.email).await? {
            return Err(ServiceError::conflict("email"));
        }
        if self.repo.exists_by_document(&input.document).await? {
            return Err(ServiceError::conflict("document"));
        }

        let hash = self.hasher.hash(&input.password)?;
        let created = self.repo.insert(&input, &hash).await?;
        info!(user_id = created.id, email = %created.email, "user_registered");
        Ok(created)
    }

    pub async fn list_all(&self) -> Result<Vec<user::Model>, ServiceError> {
        self.repo.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
        self.repo.find_by_email(email).await
    }

    /// Overwrite the mutable fields (name, email, phone, profile image).
    ///
    /// Document, credential, strike counter and id never change through
    /// this path. Changing the email to one owned by another record is a
    /// `Conflict` and leaves the record untouched.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: UserPatch) -> Result<user::Model, ServiceError> {
        let mut current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;

        user::validate_name(&patch.name)?;
        user::validate_email(&patch.email)?;

        if patch.email != current.email && self.repo.exists_by_email(&patch.email).await? {
            return Err(ServiceError::conflict("email"));
        }

        current.name = patch.name;
        current.email = patch.email;
        current.phone = patch.phone;
        current.profile_image = patch.profile_image;
        self.repo.update(current).await
    }

    /// Remove the user. Deleting a missing id is a successful no-op.
    /// Any profile image asset is released first; a storage failure there
    /// is logged but does not block the row removal.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if let Some(existing) = self.repo.find_by_id(id).await? {
            if let Some(token) = &existing.profile_image {
                if let Err(e) = self.files.delete(token).await {
                    warn!(user_id = id, error = %e, "orphaned profile image asset");
                }
            }
        }
        let removed = self.repo.delete_by_id(id).await?;
        if removed {
            info!(user_id = id, "user_deleted");
        }
        Ok(())
    }

    /// Add one strike. A missing id is a no-op; the counter only grows.
    #[instrument(skip(self))]
    pub async fn increment_strikes(&self, id: i64) -> Result<(), ServiceError> {
        if let Some(mut current) = self.repo.find_by_id(id).await? {
            current.num_strikes += 1;
            let updated = self.repo.update(current).await?;
            info!(user_id = id, strikes = updated.num_strikes, "strike_added");
        }
        Ok(())
    }

    /// Replace the profile image. The previous asset is deleted before
    /// the new one is stored; a failing delete aborts the swap.
    #[instrument(skip(self, bytes))]
    pub async fn set_profile_image(
        &self,
        id: i64,
        bytes: &[u8],
        original_name: &str,
    ) -> Result<String, ServiceError> {
        let mut current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;

        if let Some(old) = &current.profile_image {
            self.files.delete(old).await?;
        }

        let token = self.files.store(bytes, original_name).await?;
        current.profile_image = Some(token.clone());
        self.repo.update(current).await?;
        info!(user_id = id, token = %token, "profile_image_set");
        Ok(token)
    }

    /// Drop the profile image. No-op when none is set. The asset is
    /// deleted before the reference is cleared, so a storage failure
    /// leaves the reference unchanged.
    #[instrument(skip(self))]
    pub async fn clear_profile_image(&self, id: i64) -> Result<(), ServiceError> {
        let mut current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;

        let Some(token) = current.profile_image.take() else {
            return Ok(());
        };
        self.files.delete(&token).await?;
        current.profile_image = None;
        self.repo.update(current).await?;
        info!(user_id = id, "profile_image_cleared");
        Ok(())
    }
}
