// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::setup_db;
use chrono::Utc;
use repairdesk::domain::models::assignment_rule::AssignmentRule;
use repairdesk::domain::models::repair_history::RepairHistoryEntry;
use repairdesk::domain::repositories::assignment_rule_repository::AssignmentRuleRepository;
use repairdesk::domain::repositories::repair_history_repository::RepairHistoryRepository;
use repairdesk::infrastructure::repositories::assignment_rule_repo_impl::AssignmentRuleRepositoryImpl;
use repairdesk::infrastructure::repositories::repair_history_repo_impl::RepairHistoryRepositoryImpl;
use uuid::Uuid;

fn rule(device_name: &str, technician: Option<Uuid>) -> AssignmentRule {
    AssignmentRule {
        id: Uuid::new_v4(),
        device_name: device_name.to_string(),
        assigned_user_id: technician,
        created_at: Utc::now().fixed_offset(),
    }
}

#[tokio::test]
async fn test_rule_lookup_by_device() {
    let repo = AssignmentRuleRepositoryImpl::new(setup_db().await);
    let technician = Uuid::new_v4();
    repo.create(&rule("Radio", Some(technician))).await.unwrap();

    let found = repo.find_by_device("Radio").await.unwrap().unwrap();

    assert_eq!(found.assigned_user_id, Some(technician));
    assert!(repo.find_by_device("Laptop").await.unwrap().is_none());
}

#[tokio::test]
async fn test_one_rule_per_device() {
    let repo = AssignmentRuleRepositoryImpl::new(setup_db().await);
    repo.create(&rule("Radio", None)).await.unwrap();

    let duplicate = repo.create(&rule("Radio", Some(Uuid::new_v4()))).await;

    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_task_history_is_chronological() {
    let repo = RepairHistoryRepositoryImpl::new(setup_db().await);
    let task_id = Uuid::new_v4();
    let mut first = RepairHistoryEntry::new(task_id, "auto-assigned", None);
    first.created_at = first.created_at - chrono::Duration::minutes(5);
    let second = RepairHistoryEntry::new(task_id, "auto-assigned", Some(Uuid::new_v4()));
    repo.append(&first).await.unwrap();
    repo.append(&second).await.unwrap();
    repo.append(&RepairHistoryEntry::new(Uuid::new_v4(), "auto-assigned", None))
        .await
        .unwrap();

    let for_task = repo.list_for_task(task_id).await.unwrap();
    let recent = repo.list_recent(2).await.unwrap();

    assert_eq!(for_task.len(), 2);
    assert_eq!(for_task[0].id, first.id);
    assert!(recent.iter().all(|e| e.id != first.id));
    assert_eq!(recent.len(), 2);
}
