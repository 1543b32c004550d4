use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Channel::Table)
                    .col(
                        ColumnDef::new(Channel::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string_null(Channel::TeamId))
                    .col(string(Channel::Name))
                    .col(string(Channel::DisplayName))
                    .col(string(Channel::Type))
                    .col(big_integer(Channel::CreateAt))
                    .col(big_integer(Channel::DeleteAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_channel_team_id")
                    .table(Channel::Table)
                    .col(Channel::TeamId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Channel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Channel {
    #[sea_orm(iden = "Channel")]
    Table,
    Id,
    TeamId,
    Name,
    DisplayName,
    Type,
    CreateAt,
    DeleteAt,
}
