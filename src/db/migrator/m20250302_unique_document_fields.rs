use sea_orm_migration::prelude::*;

use super::UNIQUE_INDEXES;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for index in UNIQUE_INDEXES {
            conn.execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {} ON documents(json_extract(body, '$.{}')) WHERE collection = '{}'",
                index.name, index.field, index.collection
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for index in UNIQUE_INDEXES {
            conn.execute_unprepared(&format!("DROP INDEX IF EXISTS {}", index.name))
                .await?;
        }

        Ok(())
    }
}
