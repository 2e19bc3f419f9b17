//! Shared world state for task completion BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use upkeep::facility::{
    adapters::memory::{InMemoryAssetRepository, InMemoryLocationRepository},
    services::FacilityService,
};
use upkeep::identity::domain::{EmailAddress, Identity, Role, UserId};
use upkeep::task::{
    adapters::memory::{InMemoryCompletionLog, InMemoryTaskRepository},
    domain::{CompletionRecord, Task},
    services::{TaskWorkflowError, TaskWorkflowService, VisibilityService},
};

/// Facility service type used by the BDD world.
pub type TestFacilityService = FacilityService<
    InMemoryLocationRepository,
    InMemoryAssetRepository,
    InMemoryTaskRepository,
    DefaultClock,
>;

/// Workflow service type used by the BDD world.
pub type TestWorkflowService = TaskWorkflowService<
    InMemoryTaskRepository,
    InMemoryCompletionLog,
    InMemoryAssetRepository,
    DefaultClock,
>;

/// Visibility service type used by the BDD world.
pub type TestVisibilityService = VisibilityService<
    InMemoryLocationRepository,
    InMemoryAssetRepository,
    InMemoryTaskRepository,
>;

/// Scenario world for task completion behaviour tests.
pub struct TaskCompletionWorld {
    /// Facility administration service.
    pub facility: TestFacilityService,
    /// Task workflow service.
    pub workflow: TestWorkflowService,
    /// Read-side visibility service.
    pub visibility: TestVisibilityService,
    /// Admin identity used for setup steps.
    pub admin: Identity,
    /// The task under test, refreshed after each successful mutation.
    pub task: Option<Task>,
    /// Result of the most recent completion attempt.
    pub last_completion: Option<Result<(Task, CompletionRecord), TaskWorkflowError>>,
}

impl TaskCompletionWorld {
    /// Creates a world with a fresh in-memory stack.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let locations = Arc::new(InMemoryLocationRepository::new());
        let assets = Arc::new(InMemoryAssetRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let history = Arc::new(InMemoryCompletionLog::new());

        let facility = FacilityService::new(
            Arc::clone(&locations),
            Arc::clone(&assets),
            Arc::clone(&tasks),
            Arc::clone(&clock),
        );
        let workflow = TaskWorkflowService::new(
            Arc::clone(&tasks),
            Arc::clone(&history),
            Arc::clone(&assets),
            Arc::clone(&clock),
        );
        let visibility = VisibilityService::new(locations, assets, tasks);

        let admin = Identity::new(
            UserId::new(),
            EmailAddress::new("admin@example.com").expect("valid admin email"),
            Role::Admin,
        );

        Self {
            facility,
            workflow,
            visibility,
            admin,
            task: None,
            last_completion: None,
        }
    }

    /// Returns the identity of the task's current assignee.
    ///
    /// # Errors
    ///
    /// Returns an error when no task exists or it has no assignee.
    pub fn assignee_identity(&self) -> Result<Identity, eyre::Report> {
        let task = self
            .task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
        let email = task
            .assigned_to()
            .ok_or_else(|| eyre::eyre!("task has no assignee in scenario world"))?;
        Ok(Identity::new(UserId::new(), email.clone(), Role::Worker))
    }
}

impl Default for TaskCompletionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskCompletionWorld {
    TaskCompletionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated scenario list into owned step strings.
#[must_use]
pub fn parse_steps(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
