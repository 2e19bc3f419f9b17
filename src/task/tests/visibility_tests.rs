//! Tests for role-scoped visibility and denormalized display joins.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};

use crate::facility::{
    adapters::memory::{InMemoryAssetRepository, InMemoryLocationRepository},
    domain::{Asset, Location},
    ports::{AssetRepository, LocationRepository},
};
use crate::identity::domain::{EmailAddress, Identity, PermissionError, Role, UserId};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Checklist, Task},
    ports::TaskRepository,
    services::{UNKNOWN_ASSET, UNKNOWN_LOCATION, VisibilityError, VisibilityService},
};

type TestVisibilityService = VisibilityService<
    InMemoryLocationRepository,
    InMemoryAssetRepository,
    InMemoryTaskRepository,
>;

struct Stack {
    locations: Arc<InMemoryLocationRepository>,
    assets: Arc<InMemoryAssetRepository>,
    tasks: Arc<InMemoryTaskRepository>,
    service: TestVisibilityService,
}

#[fixture]
fn stack() -> Stack {
    let locations = Arc::new(InMemoryLocationRepository::new());
    let assets = Arc::new(InMemoryAssetRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let service = VisibilityService::new(
        Arc::clone(&locations),
        Arc::clone(&assets),
        Arc::clone(&tasks),
    );
    Stack {
        locations,
        assets,
        tasks,
        service,
    }
}

fn admin(address: &str) -> Identity {
    Identity::new(
        UserId::new(),
        EmailAddress::new(address).expect("valid email"),
        Role::Admin,
    )
}

fn worker(address: &str) -> Identity {
    Identity::new(
        UserId::new(),
        EmailAddress::new(address).expect("valid email"),
        Role::Worker,
    )
}

async fn seed_location(stack: &Stack, owner: &Identity, name: &str) -> Location {
    let location =
        Location::new(owner.uid(), name, "", "", &DefaultClock).expect("valid location");
    stack
        .locations
        .store(&location)
        .await
        .expect("location stored");
    location
}

async fn seed_asset(stack: &Stack, location: &Location, name: &str) -> Asset {
    let asset = Asset::new(location.id(), name, "", &DefaultClock).expect("valid asset");
    stack.assets.store(&asset).await.expect("asset stored");
    asset
}

async fn seed_assigned_task(stack: &Stack, asset: &Asset, assignee: &Identity) -> Task {
    let mut task = Task::new(
        asset.id(),
        "Refill paper",
        "",
        Checklist::new(["open tray".to_owned()]).expect("valid checklist"),
        &DefaultClock,
    )
    .expect("valid task");
    task.assign(assignee.email().clone(), &DefaultClock);
    stack.tasks.store(&task).await.expect("task stored");
    task
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admins_see_only_their_own_locations(stack: Stack) {
    let alice = admin("alice@example.com");
    let bob = admin("bob@example.com");
    seed_location(&stack, &alice, "HQ").await;
    seed_location(&stack, &alice, "Warehouse").await;
    seed_location(&stack, &bob, "Depot").await;

    let visible = stack
        .service
        .locations_for(&alice)
        .await
        .expect("listing succeeds");

    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|location| location.owner() == alice.uid()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn workers_cannot_list_locations(stack: Stack) {
    let result = stack.service.locations_for(&worker("w@x.com")).await;
    assert!(matches!(
        result,
        Err(VisibilityError::Permission(
            PermissionError::AdminRequired { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_tasks_under_anothers_location_is_rejected(stack: Stack) {
    let alice = admin("alice@example.com");
    let bob = admin("bob@example.com");
    let location = seed_location(&stack, &alice, "HQ").await;
    let asset = seed_asset(&stack, &location, "Printer").await;

    let result = stack.service.tasks_on(&bob, asset.id()).await;
    assert!(matches!(
        result,
        Err(VisibilityError::Permission(PermissionError::NotOwner { .. }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn worker_sees_only_their_assigned_open_tasks(stack: Stack) {
    let owner = admin("alice@example.com");
    let crew = worker("worker1@x.com");
    let other = worker("worker2@x.com");
    let location = seed_location(&stack, &owner, "HQ").await;
    let asset = seed_asset(&stack, &location, "Printer").await;

    let mine = seed_assigned_task(&stack, &asset, &crew).await;
    seed_assigned_task(&stack, &asset, &other).await;

    // An unassigned task is invisible to every worker.
    let unassigned = Task::new(
        asset.id(),
        "Clean rollers",
        "",
        Checklist::empty(),
        &DefaultClock,
    )
    .expect("valid task");
    stack.tasks.store(&unassigned).await.expect("task stored");

    let actionable = stack
        .service
        .actionable_tasks(&crew)
        .await
        .expect("listing succeeds");

    assert_eq!(actionable.len(), 1);
    let view = actionable.first().expect("one view");
    assert_eq!(view.task.id(), mine.id());
    assert_eq!(view.asset_name, "Printer");
    assert_eq!(view.location_name, "HQ");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_drops_out_until_reassigned(stack: Stack) {
    let owner = admin("alice@example.com");
    let crew = worker("worker1@x.com");
    let location = seed_location(&stack, &owner, "HQ").await;
    let asset = seed_asset(&stack, &location, "Printer").await;
    let mut task = seed_assigned_task(&stack, &asset, &crew).await;

    task.complete(&[], None, &DefaultClock)
        .expect("completion succeeds");
    stack.tasks.update(&task).await.expect("task updated");

    let after_completion = stack
        .service
        .actionable_tasks(&crew)
        .await
        .expect("listing succeeds");
    assert!(after_completion.is_empty());

    task.assign(crew.email().clone(), &DefaultClock);
    stack.tasks.update(&task).await.expect("task updated");

    let after_reassignment = stack
        .service
        .actionable_tasks(&crew)
        .await
        .expect("listing succeeds");
    assert_eq!(after_reassignment.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dangling_asset_reference_resolves_to_sentinels(stack: Stack) {
    let owner = admin("alice@example.com");
    let crew = worker("worker1@x.com");
    let location = seed_location(&stack, &owner, "HQ").await;
    let asset = seed_asset(&stack, &location, "Printer").await;
    seed_assigned_task(&stack, &asset, &crew).await;

    // Deleting the asset individually leaves the task dangling.
    stack
        .assets
        .delete(asset.id())
        .await
        .expect("asset deleted");

    let actionable = stack
        .service
        .actionable_tasks(&crew)
        .await
        .expect("listing succeeds");
    let view = actionable.first().expect("one view");
    assert_eq!(view.asset_name, UNKNOWN_ASSET);
    assert_eq!(view.location_name, UNKNOWN_LOCATION);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dangling_location_reference_keeps_asset_name(stack: Stack) {
    let owner = admin("alice@example.com");
    let crew = worker("worker1@x.com");
    let location = seed_location(&stack, &owner, "HQ").await;
    let asset = seed_asset(&stack, &location, "Printer").await;
    seed_assigned_task(&stack, &asset, &crew).await;

    stack
        .locations
        .delete(location.id())
        .await
        .expect("location deleted");

    let actionable = stack
        .service
        .actionable_tasks(&crew)
        .await
        .expect("listing succeeds");
    let view = actionable.first().expect("one view");
    assert_eq!(view.asset_name, "Printer");
    assert_eq!(view.location_name, UNKNOWN_LOCATION);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_overview_denormalizes_owned_tasks(stack: Stack) {
    let owner = admin("alice@example.com");
    let crew = worker("worker1@x.com");
    let hq = seed_location(&stack, &owner, "HQ").await;
    let depot = seed_location(&stack, &owner, "Depot").await;
    let printer = seed_asset(&stack, &hq, "Printer").await;
    let forklift = seed_asset(&stack, &depot, "Forklift").await;
    seed_assigned_task(&stack, &printer, &crew).await;
    seed_assigned_task(&stack, &forklift, &crew).await;

    let overview = stack
        .service
        .task_overview(&owner)
        .await
        .expect("overview succeeds");

    assert_eq!(overview.len(), 2);
    let mut names: Vec<(&str, &str)> = overview
        .iter()
        .map(|view| (view.asset_name.as_str(), view.location_name.as_str()))
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec![("Forklift", "Depot"), ("Printer", "HQ")]);
}
