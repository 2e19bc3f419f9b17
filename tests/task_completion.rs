//! Behaviour tests for the task completion workflow.

#[path = "task_completion_steps/mod.rs"]
mod task_completion_steps_defs;

use rstest_bdd_macros::scenario;
use task_completion_steps_defs::world::{TaskCompletionWorld, world};

#[scenario(
    path = "tests/features/task_completion.feature",
    name = "Worker completes an assigned task with a partial checklist"
)]
#[tokio::test(flavor = "multi_thread")]
async fn worker_completes_with_partial_checklist(world: TaskCompletionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_completion.feature",
    name = "Completion by a worker who is not the assignee is rejected"
)]
#[tokio::test(flavor = "multi_thread")]
async fn non_assignee_completion_is_rejected(world: TaskCompletionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_completion.feature",
    name = "A completed task leaves the worker's list until reassigned"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_leaves_list_until_reassigned(world: TaskCompletionWorld) {
    let _ = world;
}
