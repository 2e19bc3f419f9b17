//! Behavioural integration tests for the in-memory service stack.
//!
//! These tests exercise the full path an embedder takes: signup through
//! the auth service, facility administration, task assignment, worker
//! visibility, completion, and the audit trail — all against the
//! in-memory adapters.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use mockable::DefaultClock;
use tokio::runtime::Runtime;
use upkeep::facility::{
    adapters::memory::{InMemoryAssetRepository, InMemoryLocationRepository},
    ports::{LocationEvent, LocationWatch},
    services::{CreateAssetRequest, CreateLocationRequest, FacilityService},
};
use upkeep::identity::{
    adapters::memory::{InMemoryIdentityProvider, InMemoryUserDirectory},
    domain::{Identity, Role},
    services::{AuthService, SignUpRequest},
};
use upkeep::task::{
    adapters::memory::{InMemoryCompletionLog, InMemoryTaskRepository},
    services::{CompleteTaskRequest, CreateTaskRequest, TaskWorkflowService, VisibilityService},
};

type Auth = AuthService<InMemoryIdentityProvider, InMemoryUserDirectory, DefaultClock>;
type Facility = FacilityService<
    InMemoryLocationRepository,
    InMemoryAssetRepository,
    InMemoryTaskRepository,
    DefaultClock,
>;
type Workflow = TaskWorkflowService<
    InMemoryTaskRepository,
    InMemoryCompletionLog,
    InMemoryAssetRepository,
    DefaultClock,
>;
type Visibility = VisibilityService<
    InMemoryLocationRepository,
    InMemoryAssetRepository,
    InMemoryTaskRepository,
>;

struct Stack {
    auth: Auth,
    facility: Facility,
    workflow: Workflow,
    visibility: Visibility,
    locations: Arc<InMemoryLocationRepository>,
}

fn stack() -> Stack {
    let clock = Arc::new(DefaultClock);
    let locations = Arc::new(InMemoryLocationRepository::new());
    let assets = Arc::new(InMemoryAssetRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let history = Arc::new(InMemoryCompletionLog::new());

    Stack {
        auth: AuthService::new(
            Arc::new(InMemoryIdentityProvider::new()),
            Arc::new(InMemoryUserDirectory::new()),
            Arc::clone(&clock),
        ),
        facility: FacilityService::new(
            Arc::clone(&locations),
            Arc::clone(&assets),
            Arc::clone(&tasks),
            Arc::clone(&clock),
        ),
        workflow: TaskWorkflowService::new(
            Arc::clone(&tasks),
            Arc::clone(&history),
            Arc::clone(&assets),
            Arc::clone(&clock),
        ),
        visibility: VisibilityService::new(
            Arc::clone(&locations),
            Arc::clone(&assets),
            Arc::clone(&tasks),
        ),
        locations,
    }
}

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

fn sign_up(rt: &Runtime, stack: &Stack, email: &str, role: Role) -> Identity {
    rt.block_on(stack.auth.sign_up(SignUpRequest::new(email, "password", role)))
        .expect("signup succeeds")
}

#[test]
fn refill_paper_completion_flow() {
    let rt = test_runtime();
    let stack = stack();

    let admin = sign_up(&rt, &stack, "admin@example.com", Role::Admin);
    let worker = sign_up(&rt, &stack, "worker1@x.com", Role::Worker);

    // Admin builds out the facility and the recurring task.
    let hq = rt
        .block_on(stack.facility.create_location(
            &admin,
            CreateLocationRequest::new("HQ").with_address("1 Main St"),
        ))
        .expect("location created");
    let printer = rt
        .block_on(stack.facility.create_asset(
            &admin,
            CreateAssetRequest::new(hq.id(), "Printer"),
        ))
        .expect("asset created");
    let task = rt
        .block_on(stack.workflow.create_task(
            &admin,
            CreateTaskRequest::new(printer.id(), "Refill paper").with_checklist([
                "open tray".to_owned(),
                "insert paper".to_owned(),
                "close tray".to_owned(),
            ]),
        ))
        .expect("task created");
    rt.block_on(
        stack
            .workflow
            .assign_task(&admin, task.id(), "worker1@x.com"),
    )
    .expect("task assigned");

    // The worker sees the task, denormalized with facility names.
    let actionable = rt
        .block_on(stack.visibility.actionable_tasks(&worker))
        .expect("worker listing succeeds");
    assert_eq!(actionable.len(), 1);
    let view = actionable.first().expect("one view");
    assert_eq!(view.asset_name, "Printer");
    assert_eq!(view.location_name, "HQ");

    // Partial check-off, no photo: still a valid completion.
    let (completed, record) = rt
        .block_on(stack.workflow.complete_task(
            &worker,
            CompleteTaskRequest::new(task.id()).with_checked_items([
                "open tray".to_owned(),
                "insert paper".to_owned(),
            ]),
        ))
        .expect("completion succeeds");

    assert!(completed.last_completed_at().is_some());
    assert_eq!(
        completed.assigned_to().map(|email| email.as_str()),
        Some("worker1@x.com")
    );
    assert_eq!(
        record.checked_items(),
        ["open tray".to_owned(), "insert paper".to_owned()]
    );
    assert!(record.evidence().is_none());

    let history = rt
        .block_on(stack.workflow.completion_history(task.id()))
        .expect("history read succeeds");
    assert_eq!(history.len(), 1);

    // Completed, so it leaves the worker's actionable list.
    let after = rt
        .block_on(stack.visibility.actionable_tasks(&worker))
        .expect("worker listing succeeds");
    assert!(after.is_empty());
}

#[test]
fn admins_are_isolated_from_each_other() {
    let rt = test_runtime();
    let stack = stack();

    let alice = sign_up(&rt, &stack, "alice@example.com", Role::Admin);
    let bob = sign_up(&rt, &stack, "bob@example.com", Role::Admin);

    rt.block_on(
        stack
            .facility
            .create_location(&alice, CreateLocationRequest::new("HQ")),
    )
    .expect("location created");
    rt.block_on(
        stack
            .facility
            .create_location(&bob, CreateLocationRequest::new("Depot")),
    )
    .expect("location created");

    let alices = rt
        .block_on(stack.visibility.locations_for(&alice))
        .expect("listing succeeds");
    assert_eq!(alices.len(), 1);
    assert_eq!(alices.first().map(|location| location.name()), Some("HQ"));
}

#[test]
fn cascade_delete_spares_the_audit_trail() {
    let rt = test_runtime();
    let stack = stack();

    let admin = sign_up(&rt, &stack, "admin@example.com", Role::Admin);
    let worker = sign_up(&rt, &stack, "worker1@x.com", Role::Worker);

    let hq = rt
        .block_on(
            stack
                .facility
                .create_location(&admin, CreateLocationRequest::new("HQ")),
        )
        .expect("location created");
    let printer = rt
        .block_on(
            stack
                .facility
                .create_asset(&admin, CreateAssetRequest::new(hq.id(), "Printer")),
        )
        .expect("asset created");
    let task = rt
        .block_on(
            stack
                .workflow
                .create_task(&admin, CreateTaskRequest::new(printer.id(), "Refill paper")),
        )
        .expect("task created");
    rt.block_on(
        stack
            .workflow
            .assign_task(&admin, task.id(), "worker1@x.com"),
    )
    .expect("task assigned");
    rt.block_on(
        stack
            .workflow
            .complete_task(&worker, CompleteTaskRequest::new(task.id())),
    )
    .expect("completion succeeds");

    let report = rt
        .block_on(stack.facility.delete_location(&admin, hq.id()))
        .expect("cascade succeeds");
    assert!(report.is_clean());
    assert_eq!(report.deleted_tasks, 1);
    assert_eq!(report.deleted_assets, 1);

    // Task records are gone; the completion history is not.
    let history = rt
        .block_on(stack.workflow.completion_history(task.id()))
        .expect("history read succeeds");
    assert_eq!(history.len(), 1);
}

#[test]
fn admin_location_feed_reports_changes() {
    let rt = test_runtime();
    let stack = stack();

    let admin = sign_up(&rt, &stack, "admin@example.com", Role::Admin);
    let mut feed = stack.locations.subscribe();

    let hq = rt
        .block_on(
            stack
                .facility
                .create_location(&admin, CreateLocationRequest::new("HQ")),
        )
        .expect("location created");
    rt.block_on(stack.facility.delete_location(&admin, hq.id()))
        .expect("deletion succeeds");

    let created = rt.block_on(feed.recv()).expect("created event");
    assert!(matches!(
        created,
        LocationEvent::Created(ref location) if location.id() == hq.id()
    ));
    let deleted = rt.block_on(feed.recv()).expect("deleted event");
    assert!(matches!(
        deleted,
        LocationEvent::Deleted(id) if id == hq.id()
    ));
}
