use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// External identifier from the metadata provider (IMDB id, e.g. "tt0133093").
    #[sea_orm(unique)]
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub director: String,
    pub poster: String,
    #[sea_orm(column_type = "Text")]
    pub plot: String,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub actors: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::watch_list::Entity")]
    WatchList,
    #[sea_orm(has_many = "super::watched_list::Entity")]
    WatchedList,
}

impl Related<super::watch_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WatchList.def()
    }
}

impl Related<super::watched_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WatchedList.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
