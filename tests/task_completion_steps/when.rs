//! When steps for task completion BDD scenarios.

use super::world::{TaskCompletionWorld, parse_steps, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use upkeep::identity::domain::{EmailAddress, Identity, Role, UserId};
use upkeep::task::services::CompleteTaskRequest;

fn attempt_completion(
    world: &mut TaskCompletionWorld,
    completer: &Identity,
    checked: Vec<String>,
) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let result = run_async(world.workflow.complete_task(
        completer,
        CompleteTaskRequest::new(task.id()).with_checked_items(checked),
    ));
    if let Ok((ref updated, _)) = result {
        world.task = Some(updated.clone());
    }
    world.last_completion = Some(result);
    Ok(())
}

#[when(r#"the worker completes the task checking "{items}""#)]
fn worker_completes_checking(
    world: &mut TaskCompletionWorld,
    items: String,
) -> Result<(), eyre::Report> {
    let completer = world.assignee_identity()?;
    attempt_completion(world, &completer, parse_steps(&items))
}

#[when("the worker completes the task checking nothing")]
fn worker_completes_checking_nothing(
    world: &mut TaskCompletionWorld,
) -> Result<(), eyre::Report> {
    let completer = world.assignee_identity()?;
    attempt_completion(world, &completer, Vec::new())
}

#[when(r#""{email}" attempts to complete the task"#)]
fn outsider_attempts_completion(
    world: &mut TaskCompletionWorld,
    email: String,
) -> Result<(), eyre::Report> {
    let address = EmailAddress::new(email).wrap_err("outsider email in scenario")?;
    let outsider = Identity::new(UserId::new(), address, Role::Worker);
    attempt_completion(world, &outsider, Vec::new())
}

#[when(r#"the admin reassigns the task to "{email}""#)]
fn admin_reassigns(world: &mut TaskCompletionWorld, email: String) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let assigned = run_async(world.workflow.assign_task(&world.admin, task.id(), &email))
        .wrap_err("reassign task in scenario")?;
    world.task = Some(assigned);
    Ok(())
}
