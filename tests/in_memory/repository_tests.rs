//! Storage contract tests for the in-memory task repository.

use super::helpers::{repo, sample_task};
use tasklane::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_then_find_round_trips(repo: InMemoryTaskRepository) {
    let task = sample_task("Stored task");
    repo.store(&task).await.expect("store should succeed");

    let found = repo.find_by_id(task.id()).await.expect("lookup should succeed");
    assert_eq!(found, Some(task));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_store_is_rejected(repo: InMemoryTaskRepository) {
    let task = sample_task("Stored twice");
    repo.store(&task).await.expect("first store should succeed");

    let result = repo.store(&task).await;
    assert!(matches!(
        result,
        Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_require_existing_rows(repo: InMemoryTaskRepository) {
    let task = sample_task("Never stored");

    assert!(matches!(
        repo.update(&task).await,
        Err(TaskRepositoryError::NotFound(id)) if id == task.id()
    ));
    assert!(matches!(
        repo.delete(task.id()).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
    assert_eq!(
        repo.find_by_id(TaskId::new()).await.expect("lookup should succeed"),
        None
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_stored_fields(repo: InMemoryTaskRepository) {
    let task = sample_task("Before update");
    repo.store(&task).await.expect("store should succeed");

    let changed = Task::from_persisted(PersistedTaskData {
        id: task.id(),
        title: "After update".to_owned(),
        description: Some("edited".to_owned()),
        deadline: task.deadline(),
        status: TaskStatus::Completed,
        priority: task.priority(),
        is_completed: true,
        created_at: task.created_at(),
        updated_at: Some(task.created_at()),
    });
    repo.update(&changed).await.expect("update should succeed");

    let found = repo.find_by_id(task.id()).await.expect("lookup should succeed");
    assert_eq!(found, Some(changed));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_keeps_insertion_order_across_deletes(repo: InMemoryTaskRepository) {
    let tasks: Vec<Task> = ["first", "second", "third"]
        .into_iter()
        .map(sample_task)
        .collect();
    for task in &tasks {
        repo.store(task).await.expect("store should succeed");
    }
    let [first, second, third] = tasks.as_slice() else {
        panic!("expected three tasks");
    };
    repo.delete(second.id()).await.expect("delete should succeed");

    let all = repo.find_all().await.expect("listing should succeed");
    let ids: Vec<TaskId> = all.iter().map(Task::id).collect();
    assert_eq!(ids, [first.id(), third.id()]);
}
