use roster::domain::config::ApiConfig;
use roster::events::EventBus;
use roster::features::activities::Activities;
use roster::storage::Storage;

#[test]
fn activities_are_always_enabled() {
    assert!(roster::features::is_enabled("activities"));
    assert!(!roster::features::is_enabled("billing"));
}

#[tokio::test]
async fn init_yields_the_activities_slice() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::builder().root(dir.path()).connect().await.unwrap();

    let slices = roster::init(&ApiConfig::default(), &storage, &EventBus::new()).await.unwrap();

    assert_eq!(slices.len(), 1);
    let activities = slices[0].downcast_ref::<Activities>().unwrap();
    assert_eq!(activities.manager().len(), 9);
}

#[tokio::test]
async fn init_surfaces_seed_failures() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::builder().root(dir.path()).connect().await.unwrap();
    let mut config = ApiConfig::default();
    config.roster.seed = Some(dir.path().join("missing.json"));

    let err = roster::init(&config, &storage, &EventBus::new()).await.unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}
