use chrono::Utc;
use sea_orm::{sea_query::Expr, Condition, DatabaseConnection};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value as Json;
use thiserror::Error;

use crate::{
    entity::prelude::*,
    ids::{self, ChannelId, PostId, UserId},
};

#[derive(Debug, Error)]
pub enum PostsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("post not found")]
    PostNotFound,

    #[error("thread root not found")]
    RootNotFound,

    #[error("replies must target a thread root")]
    NotThreadRoot,
}

/// A message composed locally, before the server has seen it.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub channel_id: ChannelId,
    pub user_id: UserId,
    pub message: String,
    pub root_id: Option<PostId>,
    pub post_type: Option<String>,
    pub props: Option<Props>,
}

/// A post as delivered by the server. Absent references arrive as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPost {
    pub id: PostId,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub edit_at: i64,
    #[serde(default)]
    pub delete_at: i64,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub original_id: String,
    #[serde(default)]
    pub pending_post_id: String,
    #[serde(default, alias = "previous_post_id")]
    pub prev_post_id: String,
    #[serde(default)]
    pub root_id: String,
    #[serde(default, rename = "type")]
    pub post_type: String,
    #[serde(default, deserialize_with = "deserialize_props")]
    pub props: Option<Props>,
}

/// The server sends `props` as an object; stored props are a list. An object
/// becomes a one-element list, an array is kept as is.
fn deserialize_props<'de, D>(deserializer: D) -> Result<Option<Props>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Json>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Json::Array(values)) => Ok(Some(Props::new(values))),
        Some(object @ Json::Object(_)) => Ok(Some(Props::new(vec![object]))),
        Some(other) => Err(de::Error::invalid_type(
            de::Unexpected::Other(&other.to_string()),
            &"an object or an array",
        )),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl From<RawPost> for PostActiveModel {
    fn from(raw: RawPost) -> Self {
        PostActiveModel {
            id: Set(raw.id),
            channel_id: Set(non_empty(raw.channel_id).map(ChannelId::from)),
            user_id: Set(non_empty(raw.user_id).map(UserId::from)),
            create_at: Set(Some(raw.create_at)),
            edit_at: Set(Some(raw.edit_at)),
            delete_at: Set(Some(raw.delete_at)),
            is_pinned: Set(Some(raw.is_pinned)),
            message: Set(Some(raw.message)),
            original_id: Set(non_empty(raw.original_id).map(PostId::from)),
            pending_post_id: Set(non_empty(raw.pending_post_id)),
            previous_post_id: Set(non_empty(raw.prev_post_id).map(PostId::from)),
            root_id: Set(non_empty(raw.root_id).map(PostId::from)),
            post_type: Set(non_empty(raw.post_type)),
            props: Set(raw.props),
        }
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Clone)]
pub struct PostsService {
    db: DatabaseConnection,
}

impl PostsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store an optimistic post. Its id is the pending id until the server confirms it.
    pub async fn create_pending_post(
        &self,
        new_post: NewPost,
    ) -> Result<PostModel, PostsServiceError> {
        let root_id = new_post.root_id.filter(|id| !id.is_empty());

        if let Some(root_id) = &root_id {
            let root = Post::find_by_id(root_id.clone())
                .one(&self.db)
                .await?
                .ok_or(PostsServiceError::RootNotFound)?;

            if !root.is_thread_root() {
                return Err(PostsServiceError::NotThreadRoot);
            }
        }

        let txn = self.db.begin().await?;

        let now = now_millis();
        let mut stamp = now;
        let mut pending_post_id = ids::pending_post_id(&new_post.user_id, stamp);
        while Post::find_by_id(PostId::from(pending_post_id.as_str()))
            .one(&txn)
            .await?
            .is_some()
        {
            stamp += 1;
            pending_post_id = ids::pending_post_id(&new_post.user_id, stamp);
        }

        let post = PostActiveModel {
            id: Set(PostId::from(pending_post_id.clone())),
            channel_id: Set(Some(new_post.channel_id)),
            user_id: Set(Some(new_post.user_id)),
            create_at: Set(Some(now)),
            edit_at: Set(Some(0)),
            delete_at: Set(Some(0)),
            is_pinned: Set(Some(false)),
            message: Set(Some(new_post.message)),
            original_id: Set(None),
            pending_post_id: Set(Some(pending_post_id)),
            previous_post_id: Set(None),
            root_id: Set(root_id),
            post_type: Set(new_post.post_type),
            props: Set(new_post.props),
        };

        let result = Post::insert(post).exec_with_returning(&txn).await?;
        txn.commit().await?;
        log::debug!("stored pending post {}", result.id);

        Ok(result)
    }

    /// Store a post received from the server, replacing the optimistic copy if one exists.
    pub async fn receive_post(&self, raw: RawPost) -> Result<PostModel, PostsServiceError> {
        let txn = self.db.begin().await?;
        let stored = Self::store_received(&txn, raw).await?;
        txn.commit().await?;

        Ok(stored)
    }

    /// Same as [`Self::receive_post`] for a batch, applied atomically.
    pub async fn receive_posts(
        &self,
        raws: Vec<RawPost>,
    ) -> Result<Vec<PostModel>, PostsServiceError> {
        let txn = self.db.begin().await?;

        let mut stored = Vec::with_capacity(raws.len());
        for raw in raws {
            stored.push(Self::store_received(&txn, raw).await?);
        }

        txn.commit().await?;
        Ok(stored)
    }

    async fn store_received(
        txn: &DatabaseTransaction,
        raw: RawPost,
    ) -> Result<PostModel, DbErr> {
        let post_id = raw.id.clone();
        let mut exists = Post::find_by_id(post_id.clone()).one(txn).await?.is_some();

        if !raw.pending_post_id.is_empty() {
            let optimistic = Condition::all()
                .add(PostColumn::PendingPostId.eq(raw.pending_post_id.as_str()))
                .add(PostColumn::Id.ne(post_id.clone()));

            // Re-keying keeps the children attached; they follow via ON UPDATE CASCADE.
            let affected = if exists {
                Post::delete_many()
                    .filter(optimistic)
                    .exec(txn)
                    .await?
                    .rows_affected
            } else {
                Post::update_many()
                    .col_expr(PostColumn::Id, Expr::value(post_id.clone()))
                    .filter(optimistic)
                    .exec(txn)
                    .await?
                    .rows_affected
            };

            if affected > 0 {
                log::debug!(
                    "pending post {} confirmed as {}",
                    raw.pending_post_id,
                    post_id
                );
                exists = true;
            }
        }

        let post: PostActiveModel = raw.into();

        if exists {
            post.update(txn).await
        } else {
            Post::insert(post).exec_with_returning(txn).await
        }
    }

    pub async fn get_post(&self, post_id: PostId) -> Result<PostModel, PostsServiceError> {
        Post::find_by_id(post_id)
            .one(&self.db)
            .await?
            .ok_or(PostsServiceError::PostNotFound)
    }

    /// Load a post whose channel and author resolve once and are then cached.
    pub async fn get_record(&self, post_id: PostId) -> Result<PostRecord, PostsServiceError> {
        self.get_post(post_id).await.map(PostRecord::new)
    }

    pub async fn find_by_pending_id(
        &self,
        pending_post_id: &str,
    ) -> Result<Option<PostModel>, PostsServiceError> {
        let post = Post::find()
            .filter(PostColumn::PendingPostId.eq(pending_post_id))
            .one(&self.db)
            .await?;

        Ok(post)
    }

    /// Replace the message (and props when given), stamping `edit_at`.
    pub async fn edit_post(
        &self,
        post_id: PostId,
        message: String,
        props: Option<Props>,
    ) -> Result<PostModel, PostsServiceError> {
        let post = self.get_post(post_id).await?;

        let mut post_active: PostActiveModel = post.into();
        post_active.message = Set(Some(message));
        post_active.edit_at = Set(Some(now_millis()));

        if let Some(props) = props {
            post_active.props = Set(Some(props));
        }

        let updated = post_active.update(&self.db).await?;
        Ok(updated)
    }

    pub async fn set_pinned(
        &self,
        post_id: PostId,
        pinned: bool,
    ) -> Result<PostModel, PostsServiceError> {
        let post = self.get_post(post_id).await?;

        let mut post_active: PostActiveModel = post.into();
        post_active.is_pinned = Set(Some(pinned));

        let updated = post_active.update(&self.db).await?;
        Ok(updated)
    }

    /// Mark the post archived. The row and its children stay in place.
    pub async fn archive_post(&self, post_id: PostId) -> Result<PostModel, PostsServiceError> {
        let post = self.get_post(post_id).await?;

        let mut post_active: PostActiveModel = post.into();
        post_active.delete_at = Set(Some(now_millis()));

        let updated = post_active.update(&self.db).await?;
        Ok(updated)
    }

    /// Remove the post. Files, reactions, metadata, thread entries and drafts go with it.
    pub async fn delete_post(&self, post_id: PostId) -> Result<(), PostsServiceError> {
        let result = Post::delete_by_id(post_id.clone()).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(PostsServiceError::PostNotFound);
        }

        log::debug!("deleted post {post_id}");
        Ok(())
    }

    /// Newest first.
    pub async fn list_channel_posts(
        &self,
        channel_id: ChannelId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<PostModel>, PostsServiceError> {
        let posts = Post::find()
            .filter(PostColumn::ChannelId.eq(channel_id))
            .order_by_desc(PostColumn::CreateAt)
            .order_by_desc(PostColumn::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        Ok(posts)
    }

    /// The root followed by its replies, oldest first.
    pub async fn list_thread(&self, root_id: PostId) -> Result<Vec<PostModel>, PostsServiceError> {
        let posts = Post::find()
            .filter(
                Condition::any()
                    .add(PostColumn::Id.eq(root_id.clone()))
                    .add(PostColumn::RootId.eq(root_id)),
            )
            .order_by_asc(PostColumn::CreateAt)
            .order_by_asc(PostColumn::Id)
            .all(&self.db)
            .await?;

        Ok(posts)
    }

    pub async fn count_replies(&self, root_id: PostId) -> Result<u64, PostsServiceError> {
        let count = Post::find()
            .filter(PostColumn::RootId.eq(root_id))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}
