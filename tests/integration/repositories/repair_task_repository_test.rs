// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::setup_db;
use chrono::{Duration, Utc};
use repairdesk::domain::models::repair_task::{ConsumedPart, RepairTask, TaskStatus};
use repairdesk::domain::repositories::repair_task_repository::{
    RepairTaskQuery, RepairTaskRepository, RepositoryError, TaskDateField,
};
use repairdesk::infrastructure::database::entities::repair_task as task_entity;
use repairdesk::infrastructure::repositories::repair_task_repo_impl::RepairTaskRepositoryImpl;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

fn part(name: &str, part_number: &str, quantity: i32) -> ConsumedPart {
    ConsumedPart {
        name: name.to_string(),
        nsn: None,
        part_number: part_number.to_string(),
        quantity,
        price: 2.5,
        spare_part_id: None,
    }
}

#[tokio::test]
async fn test_spare_parts_survive_storage() {
    let repo = RepairTaskRepositoryImpl::new(setup_db().await);
    let mut task = RepairTask::new("Radio", "No power");
    task.spare_parts = vec![part("Fan", "F-1", 2), part("Fuse", "FU-3", 1)];
    task.spare_parts[0].spare_part_id = Some(Uuid::new_v4());

    repo.create(&task).await.unwrap();
    let stored = repo.find_by_id(task.id).await.unwrap().unwrap();

    assert_eq!(stored.spare_parts, task.spare_parts);
    assert_eq!(stored.status, TaskStatus::Pending);
}

#[tokio::test]
async fn test_update_missing_task() {
    let repo = RepairTaskRepositoryImpl::new(setup_db().await);

    let result = repo.update(&RepairTask::new("Radio", "No power")).await;

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_assign_sets_technician() {
    let repo = RepairTaskRepositoryImpl::new(setup_db().await);
    let task = RepairTask::new("Radio", "No power");
    repo.create(&task).await.unwrap();
    let technician = Uuid::new_v4();

    repo.assign(task.id, technician, Utc::now().fixed_offset())
        .await
        .unwrap();

    let stored = repo.find_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(stored.assigned_user_id, Some(technician));
    assert_eq!(repo.count_open_by_technician(technician).await.unwrap(), 1);
}

#[tokio::test]
async fn test_assign_missing_task() {
    let repo = RepairTaskRepositoryImpl::new(setup_db().await);

    let result = repo
        .assign(Uuid::new_v4(), Uuid::new_v4(), Utc::now().fixed_offset())
        .await;

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_open_count_ignores_completed_tasks() {
    let repo = RepairTaskRepositoryImpl::new(setup_db().await);
    let technician = Uuid::new_v4();
    for status in [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed] {
        let mut task = RepairTask::new("Radio", "No power");
        task.status = status;
        task.assigned_user_id = Some(technician);
        repo.create(&task).await.unwrap();
    }

    assert_eq!(repo.count_open_by_technician(technician).await.unwrap(), 2);
}

#[tokio::test]
async fn test_query_filters_search_and_dates() {
    let repo = RepairTaskRepositoryImpl::new(setup_db().await);
    let now = Utc::now().fixed_offset();

    let mut old = RepairTask::new("Radio", "Cracked antenna");
    old.created_at = now - Duration::days(30);
    old.updated_at = old.created_at;
    let recent = RepairTask::new("Laptop", "Broken ANTENNA cable");
    let mut done = RepairTask::new("Radio", "Static");
    done.status = TaskStatus::Completed;
    for task in [&old, &recent, &done] {
        repo.create(task).await.unwrap();
    }

    let searched = repo
        .query(&RepairTaskQuery {
            search: Some("antenna".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(searched.len(), 2);
    assert_eq!(searched[0].id, recent.id);

    let last_week = RepairTaskQuery {
        date_field: TaskDateField::CreatedAt,
        from: Some(now - Duration::days(7)),
        ..RepairTaskQuery::open()
    };
    let open_recent = repo.query(&last_week).await.unwrap();
    assert_eq!(open_recent.len(), 1);
    assert_eq!(open_recent[0].id, recent.id);
    assert_eq!(repo.count(&last_week).await.unwrap(), 1);

    assert_eq!(repo.count(&RepairTaskQuery::completed()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_query_pages_newest_first() {
    let repo = RepairTaskRepositoryImpl::new(setup_db().await);
    let now = Utc::now().fixed_offset();
    for days in 0..5 {
        let mut task = RepairTask::new("Radio", format!("Issue {}", days));
        task.created_at = now - Duration::days(days);
        repo.create(&task).await.unwrap();
    }

    let page = repo
        .query(&RepairTaskQuery {
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();

    let issues: Vec<&str> = page.iter().map(|t| t.issue.as_str()).collect();
    assert_eq!(issues, vec!["Issue 1", "Issue 2"]);
}

#[tokio::test]
async fn test_distinct_device_names_are_sorted() {
    let repo = RepairTaskRepositoryImpl::new(setup_db().await);
    for device in ["Radio", "Laptop", "Radio"] {
        repo.create(&RepairTask::new(device, "No power")).await.unwrap();
    }

    let names = repo.distinct_device_names().await.unwrap();

    assert_eq!(names, vec!["Laptop".to_string(), "Radio".to_string()]);
}

#[tokio::test]
async fn test_unknown_stored_status_is_an_error() {
    let db = setup_db().await;
    let repo = RepairTaskRepositoryImpl::new(db.clone());
    let task = RepairTask::new("Radio", "No power");
    repo.create(&task).await.unwrap();

    task_entity::Entity::update_many()
        .col_expr(task_entity::Column::Status, Expr::value("done"))
        .filter(task_entity::Column::Id.eq(task.id))
        .exec(db.as_ref())
        .await
        .unwrap();

    let result = repo.find_by_id(task.id).await;

    assert!(matches!(result, Err(RepositoryError::Database(_))));
}
