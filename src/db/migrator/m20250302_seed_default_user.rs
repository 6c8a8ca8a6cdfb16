use crate::domain::{DEFAULT_USERNAME, UserId};
use crate::entities::prelude::*;
use crate::entities::users;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = chrono::Utc::now().to_rfc3339();

        let insert = Query::insert()
            .into_table(Users)
            .columns([
                users::Column::Id,
                users::Column::Username,
                users::Column::CreatedAt,
            ])
            .values_panic([
                UserId::DEFAULT.value().into(),
                DEFAULT_USERNAME.into(),
                now.into(),
            ])
            .on_conflict(
                OnConflict::column(users::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Users)
            .and_where(Expr::col(users::Column::Id).eq(UserId::DEFAULT.value()))
            .to_owned();

        manager.exec_stmt(delete).await?;

        Ok(())
    }
}
