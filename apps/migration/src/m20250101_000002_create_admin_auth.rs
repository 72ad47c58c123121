use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Single row (id = 1) holding the argon2 hash of the admin PIN.
        manager
            .create_table(
                Table::create()
                    .table(AdminAuth::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AdminAuth::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(AdminAuth::PinHash).string().not_null())
                    .col(
                        ColumnDef::new(AdminAuth::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminAuth::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminAuth {
    Table,
    Id,
    PinHash,
    UpdatedAt,
}
