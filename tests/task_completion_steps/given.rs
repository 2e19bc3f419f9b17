//! Given steps for task completion BDD scenarios.

use super::world::{TaskCompletionWorld, parse_steps, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use upkeep::facility::services::{CreateAssetRequest, CreateLocationRequest};
use upkeep::task::services::CreateTaskRequest;

#[given(r#"a maintenance task with the steps "{steps}""#)]
fn maintenance_task(world: &mut TaskCompletionWorld, steps: String) -> Result<(), eyre::Report> {
    let location = run_async(
        world
            .facility
            .create_location(&world.admin, CreateLocationRequest::new("HQ")),
    )
    .wrap_err("create location for scenario")?;
    let asset = run_async(
        world
            .facility
            .create_asset(&world.admin, CreateAssetRequest::new(location.id(), "Printer")),
    )
    .wrap_err("create asset for scenario")?;

    let task = run_async(world.workflow.create_task(
        &world.admin,
        CreateTaskRequest::new(asset.id(), "Refill paper").with_checklist(parse_steps(&steps)),
    ))
    .wrap_err("create task for scenario")?;

    world.task = Some(task);
    Ok(())
}

#[given(r#"the task is assigned to "{email}""#)]
fn task_assigned(world: &mut TaskCompletionWorld, email: String) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let assigned = run_async(world.workflow.assign_task(&world.admin, task.id(), &email))
        .wrap_err("assign task in scenario setup")?;
    world.task = Some(assigned);
    Ok(())
}
