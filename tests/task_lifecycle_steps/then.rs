//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use rstest_bdd_macros::then;
use tasklane::task::domain::Task;

#[then(r#"the task title is "{title}""#)]
fn task_title_is(world: &TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    eyre::ensure!(
        task.title() == title,
        "expected title {title:?}, found {:?}",
        task.title()
    );
    Ok(())
}

#[then(r#"the task priority is "{priority}""#)]
fn task_priority_is(world: &TaskLifecycleWorld, priority: String) -> Result<(), eyre::Report> {
    let actual = world.current_task()?.priority();
    eyre::ensure!(
        actual.as_str() == priority,
        "expected priority {priority}, found {actual}"
    );
    Ok(())
}

#[then(r#"the task deadline is "{date}""#)]
fn task_deadline_is(world: &TaskLifecycleWorld, date: String) -> Result<(), eyre::Report> {
    let deadline = world
        .current_task()?
        .deadline()
        .ok_or_else(|| eyre::eyre!("task has no deadline"))?;
    let actual = deadline.format("%Y-%m-%d").to_string();
    eyre::ensure!(actual == date, "expected deadline {date}, found {actual}");
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let actual = world.current_task()?.status();
    eyre::ensure!(
        actual.as_str() == status,
        "expected status {status}, found {actual}"
    );
    Ok(())
}

#[then(r#"the stored task status is "{status}""#)]
fn stored_task_status_is(world: &TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?.id();
    let stored = run_async(world.service.get(task_id))?;
    eyre::ensure!(
        stored.status().as_str() == status,
        "expected stored status {status}, found {}",
        stored.status()
    );
    Ok(())
}

#[then(r#"the operation fails with "{message}""#)]
fn operation_fails_with(world: &TaskLifecycleWorld, message: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the operation to fail"))?;
    eyre::ensure!(
        err.to_string() == message,
        "expected error {message:?}, found {err}"
    );
    Ok(())
}

#[then("the sweep transitions {count} tasks")]
fn sweep_transitions(world: &TaskLifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .ok_or_else(|| eyre::eyre!("missing sweep report"))?;
    eyre::ensure!(
        report.transitioned == count,
        "expected {count} transitions, report was {report:?}"
    );
    eyre::ensure!(report.failed == 0, "sweep reported failures: {report:?}");
    Ok(())
}

#[then(r#"the listed titles are "{titles}""#)]
fn listed_titles_are(world: &TaskLifecycleWorld, titles: String) -> Result<(), eyre::Report> {
    let page = world
        .last_page
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing result"))?;
    let actual: Vec<&str> = page.items().iter().map(Task::title).collect();
    let expected: Vec<&str> = titles.split(", ").collect();
    eyre::ensure!(actual == expected, "expected {expected:?}, found {actual:?}");
    Ok(())
}
