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
        // Create repair_tasks table
        manager
            .create_table(
                Table::create()
                    .table(RepairTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepairTasks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RepairTasks::DeviceName).string().not_null())
                    .col(ColumnDef::new(RepairTasks::Issue).text().not_null())
                    .col(
                        ColumnDef::new(RepairTasks::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(RepairTasks::Priority)
                            .string()
                            .not_null()
                            .default("low"),
                    )
                    .col(ColumnDef::new(RepairTasks::AssignedUserId).uuid())
                    .col(ColumnDef::new(RepairTasks::SpareParts).json().not_null())
                    .col(
                        ColumnDef::new(RepairTasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RepairTasks::UpdatedAt)
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
                    .name("idx_repair_tasks_assignee_status")
                    .table(RepairTasks::Table)
                    .col(RepairTasks::AssignedUserId)
                    .col(RepairTasks::Status)
                    .to_owned(),
            )
            .await?;

        // Create spare_parts table
        manager
            .create_table(
                Table::create()
                    .table(SpareParts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SpareParts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SpareParts::Name).string().not_null())
                    .col(ColumnDef::new(SpareParts::Description).text())
                    .col(ColumnDef::new(SpareParts::Nsn).string())
                    .col(ColumnDef::new(SpareParts::PartNumber).string().not_null())
                    .col(
                        ColumnDef::new(SpareParts::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SpareParts::Price)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(SpareParts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SpareParts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // (name, part_number) is the matching key for task snapshots; not unique
        manager
            .create_index(
                Index::create()
                    .name("idx_spare_parts_name_part_number")
                    .table(SpareParts::Table)
                    .col(SpareParts::Name)
                    .col(SpareParts::PartNumber)
                    .to_owned(),
            )
            .await?;

        // Create assignment_rules table
        manager
            .create_table(
                Table::create()
                    .table(AssignmentRules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentRules::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentRules::DeviceName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssignmentRules::AssignedUserId).uuid())
                    .col(
                        ColumnDef::new(AssignmentRules::CreatedAt)
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
                    .name("idx_assignment_rules_device_name")
                    .table(AssignmentRules::Table)
                    .col(AssignmentRules::DeviceName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create repair_history table
        manager
            .create_table(
                Table::create()
                    .table(RepairHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepairHistory::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RepairHistory::RepairTaskId).uuid().not_null())
                    .col(ColumnDef::new(RepairHistory::Action).string().not_null())
                    .col(ColumnDef::new(RepairHistory::UserId).uuid())
                    .col(
                        ColumnDef::new(RepairHistory::CreatedAt)
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
                    .name("idx_repair_history_task")
                    .table(RepairHistory::Table)
                    .col(RepairHistory::RepairTaskId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RepairHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssignmentRules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SpareParts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RepairTasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RepairTasks {
    Table,
    Id,
    DeviceName,
    Issue,
    Status,
    Priority,
    AssignedUserId,
    SpareParts,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SpareParts {
    Table,
    Id,
    Name,
    Description,
    Nsn,
    PartNumber,
    Quantity,
    Price,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AssignmentRules {
    Table,
    Id,
    DeviceName,
    AssignedUserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum RepairHistory {
    Table,
    Id,
    RepairTaskId,
    Action,
    UserId,
    CreatedAt,
}
