use std::time::Duration;

use usher::mock::GenerationProgress;
use usher::search::{EntityKind, SearchHit};
use usher::store::LocalStore;
use uuid::Uuid;

async fn store() -> LocalStore {
    LocalStore::open_in_memory().await.unwrap()
}

// Timestamps order the recents; keep successive writes distinguishable.
async fn breathe() {
    tokio::time::sleep(Duration::from_millis(2)).await;
}

#[tokio::test]
async fn test_recents_come_back_newest_first() {
    let store = store().await;
    let a = SearchHit::new(Uuid::new_v4(), "Alpha Hall");
    let b = SearchHit::new(Uuid::new_v4(), "Bayside Arena");

    store.record_recent(EntityKind::Venue, &a).await.unwrap();
    breathe().await;
    store.record_recent(EntityKind::Venue, &b).await.unwrap();

    let recents = store.recents_for(EntityKind::Venue).await;
    assert_eq!(recents.len(), 2);
    assert_eq!(recents[0].label, "Bayside Arena");
    assert_eq!(recents[1].label, "Alpha Hall");
}

#[tokio::test]
async fn test_recording_again_moves_an_entry_to_the_front() {
    let store = store().await;
    let a = SearchHit::new(Uuid::new_v4(), "Alpha Hall");
    let b = SearchHit::new(Uuid::new_v4(), "Bayside Arena");

    store.record_recent(EntityKind::Venue, &a).await.unwrap();
    breathe().await;
    store.record_recent(EntityKind::Venue, &b).await.unwrap();
    breathe().await;
    store.record_recent(EntityKind::Venue, &a).await.unwrap();

    let recents = store.recents_for(EntityKind::Venue).await;
    assert_eq!(recents.len(), 2);
    assert_eq!(recents[0].id, a.id);
    assert_eq!(recents[1].id, b.id);
}

#[tokio::test]
async fn test_recents_are_capped() {
    let store = store().await;
    let hits: Vec<SearchHit> = (0..8)
        .map(|i| SearchHit::new(Uuid::new_v4(), format!("Artist {}", i)))
        .collect();
    for hit in &hits {
        store.record_recent(EntityKind::Artist, hit).await.unwrap();
        breathe().await;
    }

    let recents = store.recents_for(EntityKind::Artist).await;
    assert_eq!(recents.len(), 5);
    assert_eq!(recents[0].label, "Artist 7");
    assert_eq!(recents[4].label, "Artist 3");
}

#[tokio::test]
async fn test_recents_are_scoped_by_kind() {
    let store = store().await;
    let artist = SearchHit::new(Uuid::new_v4(), "The Hollow Suns");
    let venue = SearchHit::new(Uuid::new_v4(), "Bayside Arena");

    store.record_recent(EntityKind::Artist, &artist).await.unwrap();
    store.record_recent(EntityKind::Venue, &venue).await.unwrap();

    assert_eq!(store.recents_for(EntityKind::Artist).await.len(), 1);
    assert_eq!(store.recents_for(EntityKind::Venue).await.len(), 1);
    assert!(store.recents_for(EntityKind::Organization).await.is_empty());
}

#[tokio::test]
async fn test_blank_labels_survive_the_roundtrip() {
    let store = store().await;
    let hit = SearchHit::new(Uuid::new_v4(), "   ");
    store.record_recent(EntityKind::User, &hit).await.unwrap();

    let recents = store.recents_for(EntityKind::User).await;
    assert_eq!(recents.len(), 1);
    assert_eq!(recents[0].label, "   ");
    assert_eq!(recents[0].id, hit.id);
}

#[tokio::test]
async fn test_clear_recents_reports_removals() {
    let store = store().await;
    store
        .record_recent(EntityKind::City, &SearchHit::new(Uuid::new_v4(), "Lisbon"))
        .await
        .unwrap();
    breathe().await;
    store
        .record_recent(EntityKind::City, &SearchHit::new(Uuid::new_v4(), "Porto"))
        .await
        .unwrap();

    assert_eq!(store.clear_recents(EntityKind::City).await.unwrap(), 2);
    assert!(store.recents_for(EntityKind::City).await.is_empty());
}

#[tokio::test]
async fn test_progress_snapshot_roundtrip() {
    let store = store().await;
    let event_id = Uuid::new_v4();
    let progress = GenerationProgress {
        event_id,
        orders_total: 40,
        orders_done: 12,
        tickets_done: 31,
        rsvps_done: 0,
        finished: false,
    };

    store.save_progress(&progress).await.unwrap();
    let loaded = store.progress_for(event_id).await.unwrap();
    assert_eq!(loaded, progress);

    assert!(store.progress_for(Uuid::new_v4()).await.is_none());
}

#[tokio::test]
async fn test_progress_save_replaces_previous_snapshot() {
    let store = store().await;
    let event_id = Uuid::new_v4();
    let mut progress = GenerationProgress {
        event_id,
        orders_total: 40,
        orders_done: 10,
        tickets_done: 25,
        rsvps_done: 0,
        finished: false,
    };
    store.save_progress(&progress).await.unwrap();

    progress.orders_done = 40;
    progress.tickets_done = 102;
    progress.rsvps_done = 20;
    progress.finished = true;
    store.save_progress(&progress).await.unwrap();

    let loaded = store.progress_for(event_id).await.unwrap();
    assert_eq!(loaded.orders_done, 40);
    assert!(loaded.finished);
}

#[tokio::test]
async fn test_clear_progress_drops_the_snapshot() {
    let store = store().await;
    let event_id = Uuid::new_v4();
    let progress = GenerationProgress {
        event_id,
        orders_total: 10,
        orders_done: 10,
        tickets_done: 18,
        rsvps_done: 3,
        finished: true,
    };
    store.save_progress(&progress).await.unwrap();
    store.clear_progress(event_id).await.unwrap();
    assert!(store.progress_for(event_id).await.is_none());
}

#[tokio::test]
async fn test_disabled_store_swallows_everything() {
    let store = LocalStore::disabled();
    assert!(!store.is_active());

    let hit = SearchHit::new(Uuid::new_v4(), "Ghost");
    store.record_recent(EntityKind::Artist, &hit).await.unwrap();
    assert!(store.recents_for(EntityKind::Artist).await.is_empty());
    assert_eq!(store.clear_recents(EntityKind::Artist).await.unwrap(), 0);

    let progress = GenerationProgress {
        event_id: Uuid::new_v4(),
        orders_total: 1,
        orders_done: 1,
        tickets_done: 1,
        rsvps_done: 0,
        finished: true,
    };
    store.save_progress(&progress).await.unwrap();
    assert!(store.progress_for(progress.event_id).await.is_none());
}
