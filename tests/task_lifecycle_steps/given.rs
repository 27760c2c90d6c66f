//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use chrono::TimeDelta;
use eyre::WrapErr;
use mockable::Clock;
use rstest_bdd_macros::given;
use tasklane::task::services::CreateTaskRequest;

#[given("an empty task list")]
fn empty_task_list(world: &mut TaskLifecycleWorld) {
    world.last_task = None;
    world.last_error = None;
}

#[given(r#"an undated task titled "{title}""#)]
fn undated_task(world: &mut TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create(CreateTaskRequest::new(title)))
        .wrap_err("create undated task for scenario")?;
    world.last_task = Some(created);
    Ok(())
}

#[given(r#"a task titled "{title}" due in {hours:i64} hours"#)]
fn task_due_in_hours(
    world: &mut TaskLifecycleWorld,
    title: String,
    hours: i64,
) -> Result<(), eyre::Report> {
    let deadline = world.clock.utc() + TimeDelta::hours(hours);
    let created = run_async(
        world
            .service
            .create(CreateTaskRequest::new(title).with_deadline(deadline)),
    )
    .wrap_err("create dated task for scenario")?;
    world.last_task = Some(created);
    Ok(())
}

#[given("the clock advances {hours:i64} hours")]
fn clock_advances(world: &mut TaskLifecycleWorld, hours: i64) {
    world.clock.advance(TimeDelta::hours(hours));
}
