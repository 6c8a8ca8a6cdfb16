use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_watch_list_user_movie")
                    .table(WatchList::Table)
                    .col(WatchList::UserId)
                    .col(WatchList::MovieId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_watch_list_user_order")
                    .table(WatchList::Table)
                    .col(WatchList::UserId)
                    .col(WatchList::Order)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_watched_list_user_movie")
                    .table(WatchedList::Table)
                    .col(WatchedList::UserId)
                    .col(WatchedList::MovieId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_watched_list_user_movie")
                    .table(WatchedList::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_watch_list_user_order")
                    .table(WatchList::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_watch_list_user_movie")
                    .table(WatchList::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum WatchList {
    Table,
    UserId,
    MovieId,
    Order,
}

#[derive(DeriveIden)]
enum WatchedList {
    Table,
    UserId,
    MovieId,
}
