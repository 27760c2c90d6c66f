//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use rstest_bdd_macros::when;
use tasklane::task::{domain::TaskFilter, services::CreateTaskRequest};

#[when(r#"a task titled "{title}" is created"#)]
fn create_task(world: &mut TaskLifecycleWorld, title: String) {
    let result = run_async(world.service.create(CreateTaskRequest::new(title)));
    world.record(result);
}

#[when("the task is marked completed")]
fn mark_completed(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?.id();
    let result = run_async(world.service.set_completion(task_id, true));
    world.record(result);
    Ok(())
}

#[when("the overdue sweep runs")]
fn sweep_runs(world: &mut TaskLifecycleWorld) {
    world.last_report = Some(run_async(world.service.sweep_overdue()));
}

#[when(r#"tasks are listed sorted by "{field}" in "{order}" order"#)]
fn list_sorted(world: &mut TaskLifecycleWorld, field: String, order: String) {
    let filter = TaskFilter::default().with_sort(field, order);
    list_with(world, &filter);
}

#[when("tasks are listed on page {page:i64}")]
fn list_page(world: &mut TaskLifecycleWorld, page: i64) {
    let filter = TaskFilter {
        page,
        ..TaskFilter::default()
    };
    list_with(world, &filter);
}

fn list_with(world: &mut TaskLifecycleWorld, filter: &TaskFilter) {
    match run_async(world.service.list(filter)) {
        Ok(page) => world.last_page = Some(page),
        Err(err) => world.last_error = Some(err),
    }
}
