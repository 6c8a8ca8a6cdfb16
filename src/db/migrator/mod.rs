use sea_orm_migration::prelude::*;

mod m20250301_initial;
mod m20250302_seed_default_user;
mod m20250310_add_list_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_initial::Migration),
            Box::new(m20250302_seed_default_user::Migration),
            Box::new(m20250310_add_list_indexes::Migration),
        ]
    }
}
