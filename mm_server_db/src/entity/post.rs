//! The Post is the building block of communication: one message in a channel.

use std::ops::Deref;

use crate::ids::{ChannelId, PostId, UserId};
use crate::schema::{
    tables, Association, AssociationKind, FieldDescriptor, FieldKind, TableSchema,
};
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: PostId,
    pub channel_id: Option<ChannelId>,
    pub user_id: Option<UserId>,
    pub create_at: Option<i64>,
    pub edit_at: Option<i64>,
    /// Non-zero only once the post has been archived.
    pub delete_at: Option<i64>,
    pub is_pinned: Option<bool>,
    pub message: Option<String>,
    /// Null unless the post has been updated.
    pub original_id: Option<PostId>,
    /// Id given to the post before it is published on the server.
    pub pending_post_id: Option<String>,
    /// When absent the previous post is not stored locally and must be requested.
    pub previous_post_id: Option<PostId>,
    /// Shared by every post of a thread; empty for the root itself.
    pub root_id: Option<PostId>,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub props: Option<Props>,
}

/// Type specific auxiliary data, stored as one JSON column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Props(pub Vec<Json>);

impl Props {
    pub fn new(values: Vec<Json>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[Json] {
        &self.0
    }

    pub fn into_values(self) -> Vec<Json> {
        self.0
    }
}

impl From<Vec<Json>> for Props {
    fn from(values: Vec<Json>) -> Self {
        Self(values)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::channel::Entity",
        from = "Column::ChannelId",
        to = "super::channel::Column::Id"
    )]
    Channel,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Author,
    #[sea_orm(has_many = "super::draft::Entity")]
    Draft,
    #[sea_orm(has_many = "super::file::Entity")]
    File,
    #[sea_orm(has_many = "super::posts_in_thread::Entity")]
    PostsInThread,
    #[sea_orm(has_many = "super::post_metadata::Entity")]
    PostMetadata,
    #[sea_orm(has_many = "super::reaction::Entity")]
    Reaction,
}

impl Related<super::channel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Channel.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::draft::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Draft.def()
    }
}

impl Related<super::file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::File.def()
    }
}

impl Related<super::posts_in_thread::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostsInThread.def()
    }
}

impl Related<super::post_metadata::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostMetadata.def()
    }
}

impl Related<super::reaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const SCHEMA: TableSchema = TableSchema {
    table: tables::POST,
    fields: &[
        FieldDescriptor::required("id", "id", FieldKind::String),
        FieldDescriptor::optional("channelId", "channel_id", FieldKind::String),
        FieldDescriptor::optional("userId", "user_id", FieldKind::String),
        FieldDescriptor::optional("createAt", "create_at", FieldKind::Number),
        FieldDescriptor::optional("editAt", "edit_at", FieldKind::Number),
        FieldDescriptor::optional("deleteAt", "delete_at", FieldKind::Number),
        FieldDescriptor::optional("isPinned", "is_pinned", FieldKind::Boolean),
        FieldDescriptor::optional("message", "message", FieldKind::String),
        FieldDescriptor::optional("originalId", "original_id", FieldKind::String),
        FieldDescriptor::optional("pendingPostId", "pending_post_id", FieldKind::String),
        FieldDescriptor::optional("previousPostId", "previous_post_id", FieldKind::String),
        FieldDescriptor::optional("rootId", "root_id", FieldKind::String),
        FieldDescriptor::optional("type", "type", FieldKind::String),
        FieldDescriptor::optional("props", "props", FieldKind::Json),
    ],
    associations: &[
        Association {
            name: "channel",
            table: tables::CHANNEL,
            kind: AssociationKind::BelongsTo { key: "channel_id" },
            mutable: false,
        },
        Association {
            name: "author",
            table: tables::USER,
            kind: AssociationKind::BelongsTo { key: "user_id" },
            mutable: false,
        },
        Association {
            name: "drafts",
            table: tables::DRAFT,
            kind: AssociationKind::HasMany { foreign_key: "root_id" },
            mutable: false,
        },
        Association {
            name: "files",
            table: tables::FILE,
            kind: AssociationKind::HasMany { foreign_key: "post_id" },
            mutable: false,
        },
        Association {
            name: "posts_in_thread",
            table: tables::POSTS_IN_THREAD,
            kind: AssociationKind::HasMany { foreign_key: "post_id" },
            mutable: false,
        },
        Association {
            name: "metadata",
            table: tables::POST_METADATA,
            kind: AssociationKind::HasMany { foreign_key: "post_id" },
            mutable: false,
        },
        Association {
            name: "reactions",
            table: tables::REACTION,
            kind: AssociationKind::HasMany { foreign_key: "post_id" },
            mutable: false,
        },
    ],
};

/// Where a post sits in its thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThreadPosition<'a> {
    Root,
    Reply { root_id: &'a PostId },
}

impl Model {
    pub fn thread_position(&self) -> ThreadPosition<'_> {
        match &self.root_id {
            Some(root_id) if !root_id.is_empty() => ThreadPosition::Reply { root_id },
            _ => ThreadPosition::Root,
        }
    }

    pub fn is_thread_root(&self) -> bool {
        self.thread_position() == ThreadPosition::Root
    }

    pub fn is_system_message(&self) -> bool {
        self.post_type
            .as_deref()
            .is_some_and(|t| t.starts_with("system_"))
    }

    /// Still carrying the optimistic id assigned before server acknowledgement.
    pub fn is_pending(&self) -> bool {
        self.pending_post_id.as_deref() == Some(self.id.as_str())
    }

    pub fn is_archived(&self) -> bool {
        self.delete_at.is_some_and(|at| at != 0)
    }

    pub fn is_predecessor_missing(&self) -> bool {
        self.previous_post_id.as_ref().is_none_or(|id| id.is_empty())
    }

    /// Channel this post belongs to, `None` when it is not stored locally.
    pub async fn channel<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Option<super::channel::Model>, DbErr> {
        match &self.channel_id {
            Some(channel_id) => {
                super::channel::Entity::find_by_id(channel_id.clone())
                    .one(db)
                    .await
            }
            None => Ok(None),
        }
    }

    /// User who authored this post, `None` when it is not stored locally.
    pub async fn author<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Option<super::user::Model>, DbErr> {
        match &self.user_id {
            Some(user_id) => super::user::Entity::find_by_id(user_id.clone()).one(db).await,
            None => Ok(None),
        }
    }

    /// Root post of the thread this post replies to.
    pub async fn thread_root<C: ConnectionTrait>(&self, db: &C) -> Result<Option<Model>, DbErr> {
        match self.thread_position() {
            ThreadPosition::Reply { root_id } => Entity::find_by_id(root_id.clone()).one(db).await,
            ThreadPosition::Root => Ok(None),
        }
    }

    pub fn drafts(&self) -> Select<super::draft::Entity> {
        self.find_related(super::draft::Entity)
    }

    pub fn files(&self) -> Select<super::file::Entity> {
        self.find_related(super::file::Entity)
    }

    pub fn posts_in_thread(&self) -> Select<super::posts_in_thread::Entity> {
        self.find_related(super::posts_in_thread::Entity)
    }

    pub fn metadata(&self) -> Select<super::post_metadata::Entity> {
        self.find_related(super::post_metadata::Entity)
    }

    pub fn reactions(&self) -> Select<super::reaction::Entity> {
        self.find_related(super::reaction::Entity)
    }
}

/// A post together with its immutable back-references.
///
/// `channel` and `author` are looked up on first access and kept for the
/// lifetime of the record. Reassigning them means writing the foreign key
/// column through an [`ActiveModel`] and loading a fresh record.
#[derive(Debug)]
pub struct PostRecord {
    post: Model,
    channel: OnceCell<Option<super::channel::Model>>,
    author: OnceCell<Option<super::user::Model>>,
}

impl PostRecord {
    pub fn new(post: Model) -> Self {
        Self {
            post,
            channel: OnceCell::new(),
            author: OnceCell::new(),
        }
    }

    pub async fn channel<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Option<&super::channel::Model>, DbErr> {
        let channel = self
            .channel
            .get_or_try_init(|| self.post.channel(db))
            .await?;
        Ok(channel.as_ref())
    }

    pub async fn author<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Option<&super::user::Model>, DbErr> {
        let author = self.author.get_or_try_init(|| self.post.author(db)).await?;
        Ok(author.as_ref())
    }

    pub fn into_inner(self) -> Model {
        self.post
    }
}

impl From<Model> for PostRecord {
    fn from(post: Model) -> Self {
        Self::new(post)
    }
}

impl Deref for PostRecord {
    type Target = Model;

    fn deref(&self) -> &Model {
        &self.post
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bare_post(id: &str) -> Model {
        Model {
            id: PostId::from(id),
            channel_id: None,
            user_id: None,
            create_at: None,
            edit_at: None,
            delete_at: None,
            is_pinned: None,
            message: None,
            original_id: None,
            pending_post_id: None,
            previous_post_id: None,
            root_id: None,
            post_type: None,
            props: None,
        }
    }

    #[test]
    fn test_thread_position() {
        let mut post = bare_post("p1");
        assert_eq!(post.thread_position(), ThreadPosition::Root);

        post.root_id = Some(PostId::from(""));
        assert!(post.is_thread_root());

        post.root_id = Some(PostId::from("root"));
        assert_eq!(
            post.thread_position(),
            ThreadPosition::Reply {
                root_id: &PostId::from("root")
            }
        );
        assert!(!post.is_thread_root());
    }

    #[test]
    fn test_flags() {
        let mut post = bare_post("u1:1700000000000");
        assert!(!post.is_archived());
        assert!(!post.is_pending());
        assert!(!post.is_system_message());
        assert!(post.is_predecessor_missing());

        post.pending_post_id = Some("u1:1700000000000".to_string());
        assert!(post.is_pending());

        post.delete_at = Some(0);
        assert!(!post.is_archived());
        post.delete_at = Some(1_700_000_000_500);
        assert!(post.is_archived());

        post.post_type = Some("system_join_channel".to_string());
        assert!(post.is_system_message());

        post.previous_post_id = Some(PostId::from("p0"));
        assert!(!post.is_predecessor_missing());
    }

    #[test]
    fn test_props_serialize_as_plain_array() {
        let props = Props::new(vec![json!("a"), json!({"k": 1}), json!(null)]);
        let encoded = serde_json::to_string(&props).unwrap();
        assert_eq!(encoded, r#"["a",{"k":1},null]"#);

        let decoded: Props = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.values(), props.values());
    }

    #[test]
    fn test_model_serializes_type_field() {
        let mut post = bare_post("p1");
        post.post_type = Some("system_header_change".to_string());
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["type"], "system_header_change");
        assert!(value.get("post_type").is_none());
    }
}
