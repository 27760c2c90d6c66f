//! In-memory integration tests for task lifecycle operations.

use std::sync::Arc;

use super::helpers::{TestService, in_days, service};
use tasklane::task::{
    domain::{TaskFilter, TaskPriority, TaskStatus},
    services::{CreateTaskRequest, TaskLifecycleError, UpdateTaskRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_over_in_memory_storage(service: TestService) -> Result<(), eyre::Report> {
    let created = service
        .create(CreateTaskRequest::new("Prepare slides !2").with_deadline(in_days(7)))
        .await?;
    eyre::ensure!(created.priority() == TaskPriority::High);
    eyre::ensure!(created.status() == TaskStatus::Active);

    let renamed = service
        .update(UpdateTaskRequest::new(created.id()).with_title("Prepare final slides"))
        .await?;
    eyre::ensure!(renamed.title() == "Prepare final slides");
    eyre::ensure!(renamed.priority() == TaskPriority::High);

    let completed = service.set_completion(created.id(), true).await?;
    eyre::ensure!(completed.status() == TaskStatus::Completed);

    let listed = service
        .list(&TaskFilter::default().with_status("COMPLETED"))
        .await?;
    eyre::ensure!(listed.items() == [completed.clone()]);

    service.delete(created.id()).await?;
    eyre::ensure!(matches!(
        service.get(created.id()).await,
        Err(TaskLifecycleError::NotFound(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_leaves_future_deadlines_alone(service: TestService) -> Result<(), eyre::Report> {
    let created = service
        .create(CreateTaskRequest::new("Quarterly review").with_deadline(in_days(30)))
        .await?;

    let report = service.sweep_overdue().await;
    eyre::ensure!(report.examined == 1);
    eyre::ensure!(report.transitioned == 0);
    eyre::ensure!(service.get(created.id()).await?.status() == TaskStatus::Active);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_completion_changes_serialize(service: TestService) -> Result<(), eyre::Report> {
    let created = service.create(CreateTaskRequest::new("Shared task")).await?;
    let shared = Arc::new(service);

    let handles: Vec<_> = [true, false]
        .into_iter()
        .cycle()
        .take(16)
        .map(|is_completed| {
            let worker = Arc::clone(&shared);
            let id = created.id();
            tokio::spawn(async move { worker.set_completion(id, is_completed).await })
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    let stored = shared.get(created.id()).await?;
    let expected = if stored.is_completed() {
        TaskStatus::Completed
    } else {
        TaskStatus::Active
    };
    eyre::ensure!(stored.status() == expected, "status must match the completion flag");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_paginates_across_pages(service: TestService) -> Result<(), eyre::Report> {
    for index in 0..5 {
        service
            .create(CreateTaskRequest::new(format!("Chore number {index}")))
            .await?;
    }

    let last = service.list(&TaskFilter::new(3, 2)).await?;
    eyre::ensure!(last.items().len() == 1);
    eyre::ensure!(last.total() == 5);
    eyre::ensure!(last.total_pages() == 3);
    eyre::ensure!(
        last.items()
            .first()
            .is_some_and(|task| task.title() == "Chore number 4")
    );
    Ok(())
}
