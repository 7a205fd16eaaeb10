use super::*;
use jobpipe_core::clock::FakeClock;
use jobpipe_core::test_support::sample_job;
use std::sync::Arc;
use tempfile::tempdir;

fn make_store(dir: &std::path::Path, clock: Arc<dyn Clock>) -> PipelineStore {
    PipelineStore::new(
        dir.join("jobs_new.json"),
        dir.join("rejected_jobs.json"),
        PipelineStoreConfig::default(),
        clock,
    )
}

#[test]
fn add_then_get_by_id_round_trips() {
    let dir = tempdir().unwrap();
    let clock: Arc<dyn Clock> = Arc::new(FakeClock::new(chrono::Utc::now()));
    let store = make_store(dir.path(), clock);

    let job = sample_job("greenhouse", "111");
    let id = job.id.clone();
    assert!(store.add(job).unwrap());

    let fetched = store.get_by_id(&id).unwrap().unwrap();
    assert_eq!(fetched.id, id);
    assert_eq!(store.get_all().unwrap().len(), 1);
}

#[test]
fn add_rejects_duplicate_id() {
    let dir = tempdir().unwrap();
    let clock: Arc<dyn Clock> = Arc::new(FakeClock::new(chrono::Utc::now()));
    let store = make_store(dir.path(), clock);

    let job = sample_job("greenhouse", "111");
    assert!(store.add(job.clone()).unwrap());
    assert!(!store.add(job).unwrap());
    assert_eq!(store.get_all().unwrap().len(), 1);
}

#[test]
fn add_rejects_job_in_rejection_memory() {
    let dir = tempdir().unwrap();
    let clock: Arc<dyn Clock> = Arc::new(FakeClock::new(chrono::Utc::now()));
    let store = make_store(dir.path(), clock);

    let job = sample_job("greenhouse", "111");
    let id = job.id.clone();
    store.add(job).unwrap();
    store
        .update_status(
            &id,
            JobStatus::Rejected,
            None,
            None,
            None,
            Some("no fit".to_string()),
        )
        .unwrap();

    let resurfaced = sample_job("greenhouse", "111");
    assert!(!store.add(resurfaced).unwrap());
}

#[test]
fn update_status_into_skip_records_rejection_and_back_out_clears_it() {
    let dir = tempdir().unwrap();
    let clock: Arc<dyn Clock> = Arc::new(FakeClock::new(chrono::Utc::now()));
    let store = make_store(dir.path(), clock);

    let job = sample_job("lever", "222");
    let id = job.id.clone();
    store.add(job).unwrap();

    store
        .update_status(&id, JobStatus::Rejected, None, None, None, None)
        .unwrap();
    assert!(store.is_rejected("222").unwrap());

    store
        .update_status(&id, JobStatus::Applied, None, None, None, None)
        .unwrap();
    assert!(!store.is_rejected("222").unwrap());
}

#[test]
fn update_last_seen_bulk_only_moves_forward() {
    let dir = tempdir().unwrap();
    let base = chrono::Utc::now();
    let clock = Arc::new(FakeClock::new(base));
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    let store = make_store(dir.path(), dyn_clock);

    let job = sample_job("ashby", "333");
    let id = job.id.clone();
    store.add(job).unwrap();

    clock.advance(chrono::Duration::hours(-5).num_milliseconds());
    store.update_last_seen_bulk(&[id.clone()]).unwrap();
    let fetched = store.get_by_id(&id).unwrap().unwrap();
    assert_eq!(fetched.last_seen, base);
}

#[test]
fn mark_missing_closes_stale_applied_jobs_without_touching_rejection_memory() {
    let dir = tempdir().unwrap();
    let base = chrono::Utc::now();
    let clock = Arc::new(FakeClock::new(base));
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    let store = make_store(dir.path(), dyn_clock);

    let job = sample_job("smartrecruiters", "444");
    let id = job.id.clone();
    store.add(job).unwrap();
    store
        .update_status(&id, JobStatus::Applied, None, None, None, None)
        .unwrap();

    clock.advance(chrono::Duration::days(4).num_milliseconds());
    let active: std::collections::HashSet<String> = std::collections::HashSet::new();
    let flagged = store.mark_missing(&active, 3).unwrap();

    assert_eq!(flagged.len(), 1);
    let fetched = store.get_by_id(&id).unwrap().unwrap();
    assert_eq!(fetched.status, JobStatus::Closed);
    assert!(fetched.needs_attention);
    assert!(!store.is_rejected("444").unwrap());
}

#[test]
fn mark_missing_leaves_jobs_seen_in_active_set_alone() {
    let dir = tempdir().unwrap();
    let base = chrono::Utc::now();
    let clock = Arc::new(FakeClock::new(base));
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    let store = make_store(dir.path(), dyn_clock);

    let job = sample_job("workday", "555");
    let id = job.id.clone();
    store.add(job).unwrap();
    store
        .update_status(&id, JobStatus::Applied, None, None, None, None)
        .unwrap();

    clock.advance(chrono::Duration::days(10).num_milliseconds());
    let mut active = std::collections::HashSet::new();
    active.insert(id.as_str().to_string());
    let flagged = store.mark_missing(&active, 3).unwrap();

    assert!(flagged.is_empty());
    let fetched = store.get_by_id(&id).unwrap().unwrap();
    assert_eq!(fetched.status, JobStatus::Applied);
}

#[test]
fn add_bulk_dedups_within_batch_and_against_existing() {
    let dir = tempdir().unwrap();
    let clock: Arc<dyn Clock> = Arc::new(FakeClock::new(chrono::Utc::now()));
    let store = make_store(dir.path(), clock);

    let existing = sample_job("greenhouse", "1");
    store.add(existing).unwrap();

    let batch = vec![
        sample_job("greenhouse", "1"),
        sample_job("greenhouse", "2"),
        sample_job("greenhouse", "2"),
        sample_job("greenhouse", "3"),
    ];
    let added = store.add_bulk(batch).unwrap();
    assert_eq!(added, 2);
    assert_eq!(store.get_all().unwrap().len(), 3);
}

#[test]
fn parse_source_timestamp_accepts_trailing_z() {
    let parsed = parse_source_timestamp("2026-01-02T03:04:05Z").unwrap();
    assert_eq!(parsed.to_rfc3339(), "2026-01-02T03:04:05+00:00");
}
