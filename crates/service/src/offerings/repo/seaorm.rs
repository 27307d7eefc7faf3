use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, Unchanged,
};

use models::{offering, offering_tag, tag};

use crate::errors::ServiceError;
use crate::offerings::domain::NewOffering;
use crate::offerings::repository::OfferingRepository;

pub struct SeaOrmOfferingRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl OfferingRepository for SeaOrmOfferingRepository {
    async fn find_all(&self) -> Result<Vec<offering::Model>, ServiceError> {
        offering::Entity::find()
            .order_by_asc(offering::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<offering::Model>, ServiceError> {
        offering::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_provider(
        &self,
        provider_id: i64,
    ) -> Result<Vec<offering::Model>, ServiceError> {
        offering::Entity::find()
            .filter(offering::Column::ProviderId.eq(provider_id))
            .order_by_asc(offering::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(
        &self,
        provider_id: i64,
        data: &NewOffering,
    ) -> Result<offering::Model, ServiceError> {
        let now = Utc::now().into();
        let am = offering::ActiveModel {
            id: NotSet,
            provider_id: Set(provider_id),
            name: Set(data.name.clone()),
            description: Set(data.description.clone()),
            price: Set(data.price),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.insert(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, record: offering::Model) -> Result<offering::Model, ServiceError> {
        let am = offering::ActiveModel {
            id: Unchanged(record.id),
            provider_id: Unchanged(record.provider_id),
            name: Set(record.name),
            description: Set(record.description),
            price: Set(record.price),
            created_at: Unchanged(record.created_at),
            updated_at: Set(Utc::now().into()),
        };
        am.update(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let res = offering::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }

    async fn tags_of(&self, offering_id: i64) -> Result<Vec<tag::Model>, ServiceError> {
        let links = offering_tag::Entity::find()
            .filter(offering_tag::Column::ServicoId.eq(offering_id))
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if links.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = links.iter().map(|l| l.tag_id).collect();
        tag::Entity::find()
            .filter(tag::Column::Id.is_in(ids))
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn tags_exist(&self, tag_ids: &[i64]) -> Result<(), ServiceError> {
        let wanted: BTreeSet<i64> = tag_ids.iter().copied().collect();
        if wanted.is_empty() {
            return Ok(());
        }

        let known = tag::Entity::find()
            .filter(tag::Column::Id.is_in(wanted.iter().copied().collect::<Vec<_>>()))
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if known.len() != wanted.len() {
            let found: BTreeSet<i64> = known.iter().map(|t| t.id).collect();
            let missing: Vec<String> = wanted
                .difference(&found)
                .map(|id| id.to_string())
                .collect();
            return Err(ServiceError::Validation(format!(
                "unknown tag id {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    async fn set_tags(&self, offering_id: i64, tag_ids: &[i64]) -> Result<(), ServiceError> {
        self.tags_exist(tag_ids).await?;
        let wanted: BTreeSet<i64> = tag_ids.iter().copied().collect();

        offering_tag::Entity::delete_many()
            .filter(offering_tag::Column::ServicoId.eq(offering_id))
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;

        if wanted.is_empty() {
            return Ok(());
        }
        let rows = wanted.into_iter().map(|tag_id| offering_tag::ActiveModel {
            servico_id: Set(offering_id),
            tag_id: Set(tag_id),
        });
        offering_tag::Entity::insert_many(rows)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }
}
