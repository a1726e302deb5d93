//! End-to-end trending bookkeeping through both store backends.

mod harness;

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Duration;
use hashtrend::adapter::outbound::memory::InMemoryTrendingStore;
use hashtrend::adapter::outbound::sqlite::store::SqliteTrendingStore;
use hashtrend::application::cache::trending::TopTrendingCache;
use hashtrend::application::trending::{EvictionSweeper, SweepOutcome, TrendingService};
use hashtrend::domain::{extract_hashtags, Hashtag, TopicCount};
use hashtrend::port::{PostEvent, TrendingStore};
use hashtrend::testkit::clock::ManualClock;
use hashtrend::testkit::domain::{epoch, post, tag};

use harness::temp_db::TempDb;

struct Rig {
    clock: Arc<ManualClock>,
    store: Arc<dyn TrendingStore>,
    service: TrendingService,
    sweeper: EvictionSweeper,
}

fn rig(store: Arc<dyn TrendingStore>, clock: Arc<ManualClock>) -> Rig {
    let cache = Arc::new(TopTrendingCache::new(Duration::hours(1), clock.clone()));
    let service = TrendingService::new(Arc::clone(&store), cache, clock.clone(), 10);
    let sweeper = EvictionSweeper::new(
        Arc::clone(&store),
        clock.clone(),
        Duration::days(3),
        std::time::Duration::from_secs(3600),
    );
    Rig {
        clock,
        store,
        service,
        sweeper,
    }
}

fn memory_rig() -> Rig {
    let clock = Arc::new(ManualClock::default());
    let store = Arc::new(InMemoryTrendingStore::new(clock.clone()));
    rig(store, clock)
}

fn sqlite_rig(db: &TempDb) -> Rig {
    let clock = Arc::new(ManualClock::default());
    let store = Arc::new(SqliteTrendingStore::new(db.pool().clone(), clock.clone()));
    rig(store, clock)
}

fn counts(topics: &[TopicCount]) -> Vec<(&str, usize)> {
    topics
        .iter()
        .map(|t| (t.hashtag.as_str(), t.post_count))
        .collect()
}

async fn create_delete_scenario(rig: &Rig) {
    rig.service
        .handle(PostEvent::Created {
            post_id: post("P1"),
            content: "Loving #rust and #systems".into(),
            created_at: None,
        })
        .await;
    rig.service
        .handle(PostEvent::Created {
            post_id: post("P2"),
            content: "#rust forever".into(),
            created_at: None,
        })
        .await;

    let top = rig.service.top_n(10).await.unwrap();
    assert_eq!(counts(&top), vec![("rust", 2), ("systems", 1)]);

    let p1_tags = extract_hashtags("Loving #rust and #systems");
    rig.service
        .handle(PostEvent::Deleted {
            post_id: post("P1"),
            hashtags: Some(p1_tags),
            content: None,
        })
        .await;

    let top = rig.service.top_n(10).await.unwrap();
    assert_eq!(counts(&top), vec![("rust", 1)]);
    assert!(rig.store.get(&tag("systems")).await.unwrap().is_none());
}

async fn edit_then_sweep_scenario(rig: &Rig) {
    rig.service
        .on_post_created(&post("old"), "#ai #ml", Some(epoch() - Duration::days(4)))
        .await;
    rig.service
        .on_post_created(&post("edge"), "#ai", Some(epoch() - Duration::days(3)))
        .await;
    rig.service.on_post_created(&post("P"), "#ai", None).await;

    rig.service
        .on_post_edited(&post("P"), "#ai", "now about #ml")
        .await;

    let ai = rig.store.get(&tag("ai")).await.unwrap().unwrap();
    assert!(!ai.contains(&post("P")));
    let ml = rig.store.get(&tag("ml")).await.unwrap().unwrap();
    assert!(ml.contains(&post("P")));

    let SweepOutcome::Completed(report) = rig.sweeper.run_once().await else {
        panic!("sweep skipped");
    };
    assert_eq!(report.evicted, 2);
    assert_eq!(report.failed, 0);

    let ai = rig.store.get(&tag("ai")).await.unwrap().unwrap();
    assert_eq!(ai.post_count(), 1);
    assert!(ai.contains(&post("edge")));
    let ml = rig.store.get(&tag("ml")).await.unwrap().unwrap();
    assert_eq!(ml.post_count(), 1);

    rig.clock.advance(Duration::days(3) + Duration::seconds(1));
    rig.sweeper.run_once().await;
    assert!(rig.store.get(&tag("ai")).await.unwrap().is_none());
    assert!(rig.store.get(&tag("ml")).await.unwrap().is_none());
    assert!(rig.store.hashtags().await.unwrap().is_empty());
}

async fn cached_listing_scenario(rig: &Rig) {
    for (id, content) in [("a", "#go"), ("b", "#go"), ("c", "#zig")] {
        rig.service.on_post_created(&post(id), content, None).await;
    }
    let first = rig.service.trending().await.unwrap();
    assert_eq!(counts(&first), vec![("go", 2), ("zig", 1)]);

    let tags: BTreeSet<Hashtag> = [tag("go")].into_iter().collect();
    rig.service.apply_post_deletion(&post("a"), &tags).await;
    rig.service.apply_post_deletion(&post("b"), &tags).await;
    assert_eq!(rig.service.trending().await.unwrap(), first);

    rig.clock.advance(Duration::hours(1));
    assert_eq!(counts(&rig.service.trending().await.unwrap()), vec![("zig", 1)]);
}

#[tokio::test]
async fn memory_create_then_delete() {
    create_delete_scenario(&memory_rig()).await;
}

#[tokio::test]
async fn sqlite_create_then_delete() {
    let db = TempDb::create("flow-create-delete");
    create_delete_scenario(&sqlite_rig(&db)).await;
}

#[tokio::test]
async fn memory_edit_then_sweep() {
    edit_then_sweep_scenario(&memory_rig()).await;
}

#[tokio::test]
async fn sqlite_edit_then_sweep() {
    let db = TempDb::create("flow-edit-sweep");
    edit_then_sweep_scenario(&sqlite_rig(&db)).await;
}

#[tokio::test]
async fn memory_listing_is_cached() {
    cached_listing_scenario(&memory_rig()).await;
}

#[tokio::test]
async fn sqlite_listing_is_cached() {
    let db = TempDb::create("flow-cache");
    cached_listing_scenario(&sqlite_rig(&db)).await;
}

#[tokio::test]
async fn sqlite_state_survives_reopen() {
    let db = TempDb::create("flow-reopen");
    {
        let rig = sqlite_rig(&db);
        rig.service.on_post_created(&post("p1"), "#persist", None).await;
    }

    let pool = hashtrend::adapter::outbound::sqlite::database::connection::create_pool(
        &db.path().display().to_string(),
        1,
    )
    .unwrap();
    let store = SqliteTrendingStore::new(pool, Arc::new(ManualClock::default()));
    let top = store.top_n(10).await.unwrap();
    assert_eq!(counts(&top), vec![("persist", 1)]);
}

/// Sweeps racing fresh writers on one hashtag full of stale contributions
/// must drop exactly the stale ones and keep every fresh one.
async fn sweeps_racing_writers(store: Arc<dyn TrendingStore>, clock: Arc<ManualClock>) {
    const STALE: usize = 200;
    const FRESH: usize = 200;

    let rust = tag("rust");
    let stale_at = epoch() - Duration::days(4);
    for i in 0..STALE {
        store
            .record(&rust, &post(&format!("stale-{i}")), stale_at)
            .await
            .unwrap();
    }

    let sweeper = Arc::new(EvictionSweeper::new(
        Arc::clone(&store),
        clock,
        Duration::days(3),
        std::time::Duration::from_secs(3600),
    ));

    let mut writers = Vec::new();
    for i in 0..FRESH {
        let store = Arc::clone(&store);
        let rust = rust.clone();
        writers.push(tokio::spawn(async move {
            store
                .record(&rust, &post(&format!("fresh-{i}")), epoch())
                .await
                .unwrap();
        }));
    }
    let mut sweeps = Vec::new();
    for _ in 0..5 {
        let sweeper = Arc::clone(&sweeper);
        sweeps.push(tokio::spawn(async move { sweeper.run_once().await }));
    }

    for writer in writers {
        writer.await.unwrap();
    }
    let mut completed = 0;
    for sweep in sweeps {
        if let SweepOutcome::Completed(report) = sweep.await.unwrap() {
            assert_eq!(report.failed, 0);
            completed += 1;
        }
    }
    assert!(completed >= 1);

    let entry = store.get(&rust).await.unwrap().unwrap();
    assert_eq!(entry.post_count(), FRESH);
    assert!((0..FRESH).all(|i| entry.contains(&post(&format!("fresh-{i}")))));
    assert!(!entry.contains(&post("stale-0")));

    let top = store.top_n(1).await.unwrap();
    assert_eq!(counts(&top), vec![("rust", FRESH)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn memory_sweeps_race_writers() {
    let clock = Arc::new(ManualClock::default());
    let store = Arc::new(InMemoryTrendingStore::new(clock.clone()));
    sweeps_racing_writers(store, clock).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sqlite_sweeps_race_writers() {
    let db = TempDb::create("flow-sweep-race");
    let clock = Arc::new(ManualClock::default());
    let store = Arc::new(SqliteTrendingStore::new(db.pool().clone(), clock.clone()));
    sweeps_racing_writers(store, clock).await;
}
