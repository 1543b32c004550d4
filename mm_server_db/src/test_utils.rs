use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};

use crate::entity::{channel, post, user};
use crate::ids::{ChannelId, PostId, UserId};

/// Routes `log` output through the test harness. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create a fresh in-memory database with every migration applied.
/// Each call creates an isolated database instance.
pub async fn create_test_db() -> DatabaseConnection {
    init_test_logging();

    let db = crate::models::open_in_memory()
        .await
        .expect("Failed to create test database");

    crate::models::migrate_up(&db)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn insert_channel(db: &DatabaseConnection, id: &str) -> ChannelId {
    let channel_id = ChannelId::from(id);
    let channel = channel::ActiveModel {
        id: Set(channel_id.clone()),
        team_id: Set(Some("team".to_string())),
        name: Set(format!("{id}-name")),
        display_name: Set(format!("Channel {id}")),
        channel_type: Set("O".to_string()),
        create_at: Set(1_700_000_000_000),
        delete_at: Set(0),
    };
    channel::Entity::insert(channel).exec(db).await.unwrap();
    channel_id
}

pub async fn insert_user(db: &DatabaseConnection, id: &str) -> UserId {
    let user_id = UserId::from(id);
    let user = user::ActiveModel {
        id: Set(user_id.clone()),
        username: Set(format!("{id}-username")),
        first_name: Set(None),
        last_name: Set(None),
        nickname: Set(None),
        is_bot: Set(false),
        delete_at: Set(0),
    };
    user::Entity::insert(user).exec(db).await.unwrap();
    user_id
}

/// A post with every optional column left empty apart from its channel and author.
pub fn post_model(id: &str, channel_id: &ChannelId, user_id: &UserId) -> post::Model {
    post::Model {
        id: PostId::from(id),
        channel_id: Some(channel_id.clone()),
        user_id: Some(user_id.clone()),
        create_at: Some(1_700_000_000_000),
        edit_at: None,
        delete_at: None,
        is_pinned: None,
        message: Some(format!("message {id}")),
        original_id: None,
        pending_post_id: None,
        previous_post_id: None,
        root_id: None,
        post_type: None,
        props: None,
    }
}

pub async fn insert_post(db: &DatabaseConnection, model: post::Model) -> post::Model {
    let active: post::ActiveModel = model.into();
    post::Entity::insert(active)
        .exec_with_returning(db)
        .await
        .unwrap()
}
