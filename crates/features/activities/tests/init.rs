use roster_activities::persistence::{SNAPSHOT_DEBOUNCE, SnapshotStore};
use roster_activities::seed::default_catalog;
use roster_activities::{Activities, Change, RosterChanged, RosterErrorKind, init};
use roster_domain::activity::{Activity, Catalog};
use roster_domain::config::ApiConfig;
use roster_event_bus::{EventBus, EventReceiverExt};
use roster_storage::Storage;
use std::time::Duration;
use tempfile::TempDir;

async fn storage(temp: &TempDir) -> Storage {
    Storage::builder().root(temp.path().join("data")).connect().await.unwrap()
}

fn slice(initialized: &roster_domain::registry::InitializedSlice) -> Activities {
    initialized.downcast_ref::<Activities>().cloned().expect("activities slice")
}

fn small_catalog() -> Catalog {
    Catalog::new().with("Robotics", Activity::new("Build robots", "Mondays", 2))
}

#[tokio::test]
async fn built_in_catalog_is_the_default() {
    let temp = TempDir::new().unwrap();
    let initialized =
        init(&ApiConfig::default(), &storage(&temp).await, &EventBus::new()).await.unwrap();

    assert_eq!(initialized.id, std::any::TypeId::of::<Activities>());
    assert_eq!(slice(&initialized).list_activities(), default_catalog());
}

#[tokio::test]
async fn seed_file_replaces_built_in_catalog() {
    let temp = TempDir::new().unwrap();
    let seed = temp.path().join("seed.json");
    std::fs::write(&seed, serde_json::to_vec(&small_catalog()).unwrap()).unwrap();

    let mut config = ApiConfig::default();
    config.roster.seed = Some(seed);

    let initialized = init(&config, &storage(&temp).await, &EventBus::new()).await.unwrap();
    assert_eq!(slice(&initialized).list_activities(), small_catalog());
}

#[tokio::test]
async fn invalid_seed_file_fails_init() {
    let temp = TempDir::new().unwrap();
    let seed = temp.path().join("seed.json");
    let zero_capacity =
        r#"{"Robotics": {"description": "", "schedule": "", "max_participants": 0}}"#;
    std::fs::write(&seed, zero_capacity).unwrap();

    let mut config = ApiConfig::default();
    config.roster.seed = Some(seed);

    let err = init(&config, &storage(&temp).await, &EventBus::new()).await.unwrap_err();
    assert_eq!(err.kind(), RosterErrorKind::InvalidSeed);
}

#[tokio::test]
async fn existing_snapshot_wins_over_seed() {
    let temp = TempDir::new().unwrap();
    let storage = storage(&temp).await;
    SnapshotStore::new(storage.clone(), "activities.json").save(&small_catalog()).await.unwrap();

    let mut config = ApiConfig::default();
    config.roster.snapshot.enabled = true;
    config.roster.seed = Some(temp.path().join("missing-seed.json"));

    let initialized = init(&config, &storage, &EventBus::new()).await.unwrap();
    assert_eq!(slice(&initialized).list_activities(), small_catalog());
}

#[tokio::test]
async fn changes_are_published_after_commit() {
    let events = EventBus::new();
    let mut rx = events.subscribe::<RosterChanged>().unwrap();
    let activities = Activities::from_catalog(small_catalog(), events).unwrap();

    activities.enroll("Robotics", "ada@mergington.edu").unwrap();
    assert!(activities.enroll("Robotics", "ada@mergington.edu").is_err());
    activities.unregister("Robotics", "ada@mergington.edu").unwrap();

    let first = EventReceiverExt::recv(&mut rx).await.unwrap();
    assert_eq!(first.change, Change::Enrolled);
    assert_eq!(first.activity, "Robotics");
    let second = EventReceiverExt::recv(&mut rx).await.unwrap();
    assert_eq!(second.change, Change::Unregistered);
    assert!(rx.try_recv().is_err(), "rejected operations publish nothing");
}

#[tokio::test]
async fn snapshot_writer_persists_and_restores_changes() {
    let temp = TempDir::new().unwrap();
    let storage = storage(&temp).await;
    let events = EventBus::new();

    let mut config = ApiConfig::default();
    config.roster.snapshot.enabled = true;

    let activities = slice(&init(&config, &storage, &events).await.unwrap());
    activities.enroll("Chess Club", "newstudent@mergington.edu").unwrap();
    activities.unregister("Swimming Club", "james@mergington.edu").unwrap();

    let store = SnapshotStore::new(storage.clone(), "activities.json");
    let mut saved = None;
    for _ in 0..50 {
        tokio::time::sleep(SNAPSHOT_DEBOUNCE + Duration::from_millis(10)).await;
        saved = store.load().await.unwrap();
        if saved.as_ref() == Some(&activities.list_activities()) {
            break;
        }
    }
    assert_eq!(saved.as_ref(), Some(&activities.list_activities()));

    // A restart with the same storage picks the snapshot up.
    let _ = events.shutdown();
    let restored = slice(&init(&config, &storage, &EventBus::new()).await.unwrap());
    assert_eq!(restored.list_activities(), activities.list_activities());
    assert!(
        restored.activity("Chess Club").unwrap().has_participant("newstudent@mergington.edu")
    );
}

#[tokio::test]
async fn shutdown_flushes_the_last_change() {
    let temp = TempDir::new().unwrap();
    let storage = storage(&temp).await;
    let events = EventBus::new();

    let mut config = ApiConfig::default();
    config.roster.snapshot.enabled = true;

    let activities = slice(&init(&config, &storage, &events).await.unwrap());
    activities.enroll("Chess Club", "late@mergington.edu").unwrap();

    let _ = events.shutdown();
    assert!(activities.wait_for_writer(Duration::from_secs(5)).await);

    let saved = SnapshotStore::new(storage, "activities.json").load().await.unwrap().unwrap();
    assert!(saved.get("Chess Club").unwrap().has_participant("late@mergington.edu"));
}

#[tokio::test]
async fn waiting_without_a_writer_returns_at_once() {
    let activities = Activities::from_catalog(small_catalog(), EventBus::new()).unwrap();
    assert!(activities.wait_for_writer(Duration::ZERO).await);
}
