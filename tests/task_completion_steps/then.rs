//! Then steps for task completion BDD scenarios.

use super::world::{TaskCompletionWorld, parse_steps, run_async};
use rstest_bdd_macros::then;
use upkeep::identity::domain::PermissionError;
use upkeep::task::services::TaskWorkflowError;

#[then("the completion succeeds")]
fn completion_succeeds(world: &TaskCompletionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_completion
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing completion result"))?;

    if let Err(err) = result {
        return Err(eyre::eyre!("expected completion to succeed, got {err}"));
    }
    Ok(())
}

#[then(r#"the task remains assigned to "{email}""#)]
fn task_remains_assigned(world: &TaskCompletionWorld, email: String) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task"))?;

    let assignee = task
        .assigned_to()
        .ok_or_else(|| eyre::eyre!("task lost its assignee"))?;
    if assignee.as_str() != email {
        return Err(eyre::eyre!(
            "expected assignee {email}, found {assignee}"
        ));
    }
    Ok(())
}

#[then(r#"the history records the checked steps "{items}""#)]
fn history_records_checked_steps(
    world: &TaskCompletionWorld,
    items: String,
) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task"))?;

    let entries = run_async(world.workflow.completion_history(task.id()))
        .map_err(|err| eyre::eyre!("history read failed: {err}"))?;
    let record = entries
        .last()
        .ok_or_else(|| eyre::eyre!("no completion history recorded"))?;

    let expected = parse_steps(&items);
    if record.checked_items() != expected.as_slice() {
        return Err(eyre::eyre!(
            "expected checked steps {:?}, found {:?}",
            expected,
            record.checked_items()
        ));
    }
    Ok(())
}

#[then("the completion is rejected for lack of assignment")]
fn completion_rejected_for_assignment(world: &TaskCompletionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_completion
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing completion result"))?;

    if !matches!(
        result,
        Err(TaskWorkflowError::Permission(
            PermissionError::NotAssignee { .. }
        ))
    ) {
        return Err(eyre::eyre!("expected NotAssignee rejection, got {result:?}"));
    }
    Ok(())
}

#[then("no completion history is recorded")]
fn no_history_recorded(world: &TaskCompletionWorld) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task"))?;

    let entries = run_async(world.workflow.completion_history(task.id()))
        .map_err(|err| eyre::eyre!("history read failed: {err}"))?;
    if !entries.is_empty() {
        return Err(eyre::eyre!(
            "expected empty history, found {} entries",
            entries.len()
        ));
    }
    Ok(())
}

#[then("the worker has no actionable tasks")]
fn worker_has_no_actionable_tasks(world: &TaskCompletionWorld) -> Result<(), eyre::Report> {
    let worker = world.assignee_identity()?;
    let actionable = run_async(world.visibility.actionable_tasks(&worker))
        .map_err(|err| eyre::eyre!("worker listing failed: {err}"))?;
    if !actionable.is_empty() {
        return Err(eyre::eyre!(
            "expected no actionable tasks, found {}",
            actionable.len()
        ));
    }
    Ok(())
}

#[then("the worker has one actionable task")]
fn worker_has_one_actionable_task(world: &TaskCompletionWorld) -> Result<(), eyre::Report> {
    let worker = world.assignee_identity()?;
    let actionable = run_async(world.visibility.actionable_tasks(&worker))
        .map_err(|err| eyre::eyre!("worker listing failed: {err}"))?;
    if actionable.len() != 1 {
        return Err(eyre::eyre!(
            "expected one actionable task, found {}",
            actionable.len()
        ));
    }
    Ok(())
}
