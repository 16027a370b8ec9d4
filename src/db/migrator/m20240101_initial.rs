use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Titles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Seasons and episodes carry ON DELETE CASCADE foreign keys from their relations.
        manager
            .create_table(
                schema
                    .create_table_from_entity(Seasons)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Episodes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        for mut index in schema
            .create_index_from_entity(Seasons)
            .into_iter()
            .chain(schema.create_index_from_entity(Episodes))
        {
            manager.create_index(index.if_not_exists().to_owned()).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Episodes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seasons).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Titles).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        Ok(())
    }
}
