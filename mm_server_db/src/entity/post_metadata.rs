use crate::ids::{MetadataId, PostId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Enrichment attached to a post: link previews, embeds, images, emojis.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "PostMetadata")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: MetadataId,
    pub post_id: PostId,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub metadata_type: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub data: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
