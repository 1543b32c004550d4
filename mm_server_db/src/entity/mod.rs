// SeaORM entities for the server database.
// `post` is the schema the rest of the app binds against; the others are
// the tables its relationships resolve to.

pub mod channel;
pub mod draft;
pub mod file;
pub mod post;
pub mod post_metadata;
pub mod posts_in_thread;
pub mod reaction;
pub mod user;


pub mod prelude {
    pub use super::channel::{
        ActiveModel as ChannelActiveModel, Column as ChannelColumn, Entity as Channel,
        Model as ChannelModel,
    };
    pub use super::draft::{
        ActiveModel as DraftActiveModel, Column as DraftColumn, Entity as Draft,
        Model as DraftModel,
    };
    pub use super::file::{
        ActiveModel as FileActiveModel, Column as FileColumn, Entity as File, Model as FileModel,
    };
    pub use super::post::{
        ActiveModel as PostActiveModel, Column as PostColumn, Entity as Post, Model as PostModel,
        PostRecord, Props, ThreadPosition,
    };
    pub use super::post_metadata::{
        ActiveModel as PostMetadataActiveModel, Column as PostMetadataColumn,
        Entity as PostMetadata, Model as PostMetadataModel,
    };
    pub use super::posts_in_thread::{
        ActiveModel as PostsInThreadActiveModel, Column as PostsInThreadColumn,
        Entity as PostsInThread, Model as PostsInThreadModel,
    };
    pub use super::reaction::{
        ActiveModel as ReactionActiveModel, Column as ReactionColumn, Entity as Reaction,
        Model as ReactionModel,
    };
    pub use super::user::{
        ActiveModel as UserActiveModel, Column as UserColumn, Entity as User, Model as UserModel,
    };

    pub use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
        DbErr, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
        Select, Set, TransactionTrait,
    };
}
