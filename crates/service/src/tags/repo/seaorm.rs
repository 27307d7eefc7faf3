use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, Unchanged,
};

use models::tag;

use crate::errors::ServiceError;
use crate::tags::repository::TagRepository;

pub struct SeaOrmTagRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl TagRepository for SeaOrmTagRepository {
    async fn find_all(&self) -> Result<Vec<tag::Model>, ServiceError> {
        tag::Entity::find()
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<tag::Model>, ServiceError> {
        tag::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<tag::Model>, ServiceError> {
        tag::Entity::find()
            .filter(tag::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, name: &str) -> Result<tag::Model, ServiceError> {
        let am = tag::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        };
        am.insert(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, record: tag::Model) -> Result<tag::Model, ServiceError> {
        let am = tag::ActiveModel {
            id: Unchanged(record.id),
            name: Set(record.name),
        };
        am.update(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let res = tag::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
