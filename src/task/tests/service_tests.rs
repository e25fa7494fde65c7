//! Service orchestration tests for the task boundary.

use std::sync::Arc;

use super::fixtures::{admin_actor, user_actor};
use crate::identity::{
    adapters::memory::InMemoryUserRepository,
    domain::{OpenId, UserId, UserUpsert},
    ports::UserRepository,
};
use crate::task::{
    adapters::memory::{InMemoryAuditLogRepository, InMemoryTaskRepository},
    domain::{AuditAction, TaskFilter, TaskId, TaskPriority, TaskStatus},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskService, TaskServiceError, UpdateTaskRequest},
};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

struct FrozenClock(DateTime<Utc>);

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

type TestService = TaskService<
    InMemoryTaskRepository,
    InMemoryAuditLogRepository,
    InMemoryUserRepository,
    DefaultClock,
>;

struct Harness {
    service: TestService,
    tasks: Arc<InMemoryTaskRepository>,
    audit: Arc<InMemoryAuditLogRepository>,
    users: Arc<InMemoryUserRepository>,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let audit = Arc::new(InMemoryAuditLogRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    Harness {
        service: TaskService::new(
            Arc::clone(&tasks),
            Arc::clone(&audit),
            Arc::clone(&users),
            Arc::new(DefaultClock),
        ),
        tasks,
        audit,
        users,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_forces_todo_status_and_caller_as_creator(harness: Harness) {
    let creator = user_actor(1);
    let id = harness
        .service
        .create(
            Some(&creator),
            CreateTaskRequest::new("Fix bug").with_priority(TaskPriority::High),
        )
        .await
        .expect("create should succeed");

    let task = harness
        .service
        .get_by_id(Some(&creator), id)
        .await
        .expect("creator should see the task");
    assert_eq!(task.status(), TaskStatus::Todo);
    assert_eq!(task.created_by(), UserId::new(1));
    assert_eq!(task.priority(), TaskPriority::High);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_without_a_caller_is_unauthenticated_and_writes_nothing(harness: Harness) {
    let result = harness
        .service
        .create(None, CreateTaskRequest::new("Fix bug"))
        .await;

    assert!(matches!(result, Err(TaskServiceError::Unauthenticated)));
    let stored = harness
        .tasks
        .list(TaskFilter::none())
        .await
        .expect("listing should succeed");
    assert!(stored.is_empty());
    assert!(harness.audit.all().expect("audit read").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_an_empty_title_before_touching_the_store(harness: Harness) {
    let result = harness
        .service
        .create(Some(&user_actor(1)), CreateTaskRequest::new(""))
        .await;

    assert!(matches!(result, Err(TaskServiceError::Validation(_))));
    let stored = harness
        .tasks
        .list(TaskFilter::none())
        .await
        .expect("listing should succeed");
    assert!(stored.is_empty());
    assert!(harness.audit.all().expect("audit read").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_records_a_created_audit_entry_with_the_submitted_fields(harness: Harness) {
    let id = harness
        .service
        .create(
            Some(&user_actor(1)),
            CreateTaskRequest::new("Fix bug").with_description("Steps to reproduce"),
        )
        .await
        .expect("create should succeed");

    let entries = harness.audit.all().expect("audit read");
    assert_eq!(entries.len(), 1);
    let entry = entries.first().expect("one entry");
    assert_eq!(entry.task_id, id);
    assert_eq!(entry.user_id, UserId::new(1));
    assert_eq!(entry.action, AuditAction::Created);
    assert!(entry.old_value.is_none());
    let new_value = entry.new_value.as_deref().expect("submitted fields snapshot");
    assert!(new_value.contains("Fix bug"));
    assert!(new_value.contains("Steps to reproduce"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_shows_a_task_only_to_its_creator_assignee_and_admins(harness: Harness) {
    let creator = user_actor(1);
    harness
        .service
        .create(
            Some(&creator),
            CreateTaskRequest::new("Fix bug").with_assigned_to(UserId::new(4)),
        )
        .await
        .expect("create should succeed");

    let for_creator = harness
        .service
        .list(Some(&creator), TaskFilter::none())
        .await
        .expect("list should succeed");
    assert_eq!(for_creator.len(), 1);

    let for_assignee = harness
        .service
        .list(Some(&user_actor(4)), TaskFilter::none())
        .await
        .expect("list should succeed");
    assert_eq!(for_assignee.len(), 1);

    let for_outsider = harness
        .service
        .list(Some(&user_actor(2)), TaskFilter::none())
        .await
        .expect("list should succeed");
    assert!(for_outsider.is_empty());

    let for_admin = harness
        .service
        .list(Some(&admin_actor(3)), TaskFilter::none())
        .await
        .expect("list should succeed");
    assert_eq!(for_admin.len(), 1);

    let for_nobody = harness
        .service
        .list(None, TaskFilter::none())
        .await
        .expect("list should succeed");
    assert!(for_nobody.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_applies_the_structured_filter_before_visibility(harness: Harness) {
    let creator = user_actor(1);
    harness
        .service
        .create(
            Some(&creator),
            CreateTaskRequest::new("High priority").with_priority(TaskPriority::High),
        )
        .await
        .expect("create should succeed");
    harness
        .service
        .create(Some(&creator), CreateTaskRequest::new("Medium priority"))
        .await
        .expect("create should succeed");

    let filtered = harness
        .service
        .list(
            Some(&creator),
            TaskFilter::none().with_priority(TaskPriority::High),
        )
        .await
        .expect("list should succeed");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.first().expect("one task").title().as_str(), "High priority");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_by_id_reports_a_missing_task_as_not_found_for_every_caller(harness: Harness) {
    let missing = TaskId::new(404);
    for actor in [None, Some(user_actor(1)), Some(admin_actor(3))] {
        let result = harness.service.get_by_id(actor.as_ref(), missing).await;
        assert!(matches!(result, Err(TaskServiceError::NotFound(id)) if id == missing));
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_by_id_outside_the_caller_scope_is_forbidden(harness: Harness) {
    let id = harness
        .service
        .create(Some(&user_actor(1)), CreateTaskRequest::new("Fix bug"))
        .await
        .expect("create should succeed");

    let result = harness.service.get_by_id(Some(&user_actor(2)), id).await;
    assert!(matches!(result, Err(TaskServiceError::Forbidden(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_by_the_assignee_is_forbidden(harness: Harness) {
    let id = harness
        .service
        .create(
            Some(&user_actor(1)),
            CreateTaskRequest::new("Fix bug").with_assigned_to(UserId::new(4)),
        )
        .await
        .expect("create should succeed");

    let result = harness
        .service
        .update(
            Some(&user_actor(4)),
            id,
            UpdateTaskRequest::new().with_status(TaskStatus::Completed),
        )
        .await;
    assert!(matches!(result, Err(TaskServiceError::Forbidden(_))));
    assert_eq!(harness.audit.all().expect("audit read").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_applies_partial_fields_and_snapshots_both_sides(harness: Harness) {
    let creator = user_actor(1);
    let id = harness
        .service
        .create(
            Some(&creator),
            CreateTaskRequest::new("Fix bug").with_description("Original description"),
        )
        .await
        .expect("create should succeed");

    harness
        .service
        .update(
            Some(&admin_actor(3)),
            id,
            UpdateTaskRequest::new().with_status(TaskStatus::Completed),
        )
        .await
        .expect("admin update should succeed");

    let task = harness
        .service
        .get_by_id(Some(&creator), id)
        .await
        .expect("creator should see the task");
    assert_eq!(task.status(), TaskStatus::Completed);
    assert_eq!(task.description(), Some("Original description"));

    let entries = harness.audit.all().expect("audit read");
    assert_eq!(entries.len(), 2);
    let entry = entries.last().expect("update entry");
    assert_eq!(entry.action, AuditAction::Updated);
    assert_eq!(entry.user_id, UserId::new(3));
    let old_value = entry.old_value.as_deref().expect("pre-update snapshot");
    assert!(old_value.contains("Fix bug"));
    assert!(old_value.contains("todo"));
    // new_value carries only the submitted fields, not the merged row.
    assert_eq!(entry.new_value.as_deref(), Some("{\"status\":\"completed\"}"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_a_missing_task_is_not_found_before_forbidden(harness: Harness) {
    let result = harness
        .service
        .update(
            Some(&user_actor(2)),
            TaskId::new(404),
            UpdateTaskRequest::new().with_title("New title"),
        )
        .await;
    assert!(matches!(result, Err(TaskServiceError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_an_invalid_title_before_touching_the_store(harness: Harness) {
    let result = harness
        .service
        .update(
            Some(&user_actor(1)),
            TaskId::new(404),
            UpdateTaskRequest::new().with_title(""),
        )
        .await;
    // Validation precedes the existence check, so the bad title wins.
    assert!(matches!(result, Err(TaskServiceError::Validation(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_by_the_creator_logs_a_snapshot_then_removes_the_row(harness: Harness) {
    let creator = user_actor(1);
    let id = harness
        .service
        .create(Some(&creator), CreateTaskRequest::new("Fix bug"))
        .await
        .expect("create should succeed");

    harness
        .service
        .delete(Some(&creator), id)
        .await
        .expect("creator delete should succeed");

    for actor in [Some(creator), Some(admin_actor(3)), None] {
        let result = harness.service.get_by_id(actor.as_ref(), id).await;
        assert!(matches!(result, Err(TaskServiceError::NotFound(_))));
    }

    let entries = harness.audit.all().expect("audit read");
    assert_eq!(entries.len(), 2);
    let entry = entries.last().expect("delete entry");
    assert_eq!(entry.action, AuditAction::Deleted);
    assert_eq!(entry.task_id, id);
    let old_value = entry.old_value.as_deref().expect("pre-delete snapshot");
    assert!(old_value.contains("Fix bug"));
    assert!(entry.new_value.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_by_an_unrelated_user_is_forbidden(harness: Harness) {
    let id = harness
        .service
        .create(Some(&user_actor(1)), CreateTaskRequest::new("Fix bug"))
        .await
        .expect("create should succeed");

    let result = harness.service.delete(Some(&user_actor(2)), id).await;
    assert!(matches!(result, Err(TaskServiceError::Forbidden(_))));

    let survivor = harness.service.get_by_id(Some(&user_actor(1)), id).await;
    assert!(survivor.is_ok());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_successful_mutation_records_exactly_one_audit_entry(harness: Harness) {
    let creator = user_actor(1);
    let id = harness
        .service
        .create(Some(&creator), CreateTaskRequest::new("Fix bug"))
        .await
        .expect("create should succeed");
    harness
        .service
        .update(
            Some(&creator),
            id,
            UpdateTaskRequest::new().with_priority(TaskPriority::Low),
        )
        .await
        .expect("update should succeed");
    harness
        .service
        .delete(Some(&creator), id)
        .await
        .expect("delete should succeed");

    let entries = harness.audit.all().expect("audit read");
    let actions: Vec<AuditAction> = entries.iter().map(|entry| entry.action).collect();
    assert_eq!(
        actions,
        vec![AuditAction::Created, AuditAction::Updated, AuditAction::Deleted]
    );
    assert!(entries.iter().all(|entry| entry.task_id == id));
}

#[tokio::test(flavor = "multi_thread")]
async fn audit_entries_are_stamped_from_the_injected_clock() {
    let at = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let audit = Arc::new(InMemoryAuditLogRepository::new());
    let service = TaskService::new(
        Arc::clone(&tasks),
        Arc::clone(&audit),
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(FrozenClock(at)),
    );
    let creator = user_actor(1);

    let id = service
        .create(Some(&creator), CreateTaskRequest::new("Fix bug"))
        .await
        .expect("create should succeed");
    service
        .update(
            Some(&creator),
            id,
            UpdateTaskRequest::new().with_status(TaskStatus::Completed),
        )
        .await
        .expect("update should succeed");
    service
        .delete(Some(&creator), id)
        .await
        .expect("delete should succeed");

    let entries = audit.all().expect("audit read");
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|entry| entry.created_at == at));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn statistics_scope_to_the_given_user(harness: Harness) {
    let alice = user_actor(1);
    let bob = user_actor(2);
    harness
        .service
        .create(Some(&alice), CreateTaskRequest::new("Alice task"))
        .await
        .expect("create should succeed");
    harness
        .service
        .create(
            Some(&bob),
            CreateTaskRequest::new("Bob task assigned to Alice").with_assigned_to(UserId::new(1)),
        )
        .await
        .expect("create should succeed");
    harness
        .service
        .create(Some(&bob), CreateTaskRequest::new("Bob only task"))
        .await
        .expect("create should succeed");

    let global = harness
        .service
        .statistics(None)
        .await
        .expect("statistics should succeed");
    assert_eq!(global.total, 3);
    assert_eq!(global.todo, 3);

    let scoped = harness
        .service
        .statistics(Some(UserId::new(1)))
        .await
        .expect("statistics should succeed");
    assert_eq!(scoped.total, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_listing_is_unrestricted(harness: Harness) {
    for value in ["oauth|alice", "oauth|bob"] {
        let open_id = OpenId::new(value).expect("valid open id");
        harness
            .users
            .upsert(&UserUpsert::new(open_id))
            .await
            .expect("upsert should succeed");
    }

    let users = harness.service.users().await.expect("users should succeed");
    assert_eq!(users.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_lists_the_audit_trail_for_a_visible_task(harness: Harness) {
    let creator = user_actor(1);
    let id = harness
        .service
        .create(Some(&creator), CreateTaskRequest::new("Fix bug"))
        .await
        .expect("create should succeed");
    harness
        .service
        .update(
            Some(&creator),
            id,
            UpdateTaskRequest::new().with_status(TaskStatus::InProgress),
        )
        .await
        .expect("update should succeed");

    let history = harness
        .service
        .history(Some(&creator), id)
        .await
        .expect("history should succeed");
    assert_eq!(history.len(), 2);

    let outsider = harness.service.history(Some(&user_actor(2)), id).await;
    assert!(matches!(outsider, Err(TaskServiceError::Forbidden(_))));
}
