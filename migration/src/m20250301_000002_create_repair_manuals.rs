// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RepairManuals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepairManuals::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RepairManuals::DeviceName).string().not_null())
                    .col(ColumnDef::new(RepairManuals::Issue).text().not_null())
                    .col(ColumnDef::new(RepairManuals::Title).string().not_null())
                    .col(ColumnDef::new(RepairManuals::Content).text().not_null())
                    .col(
                        ColumnDef::new(RepairManuals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_repair_manuals_device_issue")
                    .table(RepairManuals::Table)
                    .col(RepairManuals::DeviceName)
                    .col(RepairManuals::Issue)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RepairManuals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RepairManuals {
    Table,
    Id,
    DeviceName,
    Issue,
    Title,
    Content,
    CreatedAt,
}
