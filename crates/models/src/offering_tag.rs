use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{offering, tag};

/// Join row linking an offering to a tag.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "servico_tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub servico_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Offering,
    Tag,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Offering => Entity::belongs_to(offering::Entity)
                .from(Column::ServicoId)
                .to(offering::Column::Id)
                .into(),
            Relation::Tag => Entity::belongs_to(tag::Entity)
                .from(Column::TagId)
                .to(tag::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
