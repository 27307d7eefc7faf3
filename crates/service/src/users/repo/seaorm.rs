use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, Unchanged,
};

use models::user;

use crate::errors::ServiceError;
use crate::users::domain::NewUser;
use crate::users::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> Result<Vec<user::Model>, ServiceError> {
        user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, ServiceError> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn exists_by_document(&self, document: &str) -> Result<bool, ServiceError> {
        let found = user::Entity::find()
            .filter(user::Column::Document.eq(document))
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(found.is_some())
    }

    async fn insert(&self, data: &NewUser, password_hash: &str) -> Result<user::Model, ServiceError> {
        let now = Utc::now().into();
        let am = user::ActiveModel {
            id: NotSet,
            name: Set(data.name.clone()),
            email: Set(data.email.clone()),
            document: Set(data.document.clone()),
            password_hash: Set(password_hash.to_string()),
            phone: Set(data.phone.clone()),
            profile_image: Set(None),
            num_strikes: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.insert(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, record: user::Model) -> Result<user::Model, ServiceError> {
        let am = user::ActiveModel {
            id: Unchanged(record.id),
            name: Set(record.name),
            email: Set(record.email),
            document: Set(record.document),
            password_hash: Set(record.password_hash),
            phone: Set(record.phone),
            profile_image: Set(record.profile_image),
            num_strikes: Set(record.num_strikes),
            created_at: Unchanged(record.created_at),
            updated_at: Set(Utc::now().into()),
        };
        am.update(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let res = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
