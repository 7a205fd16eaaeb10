use super::*;
use jobpipe_adapters::ats::RawPosting;
use jobpipe_adapters::FakeAtsParser;
use jobpipe_core::{FakeClock, JobStatus};
use jobpipe_storage::PipelineStoreConfig;
use tempfile::tempdir;

fn store(dir: &tempfile::TempDir, clock: Arc<dyn Clock>) -> PipelineStore {
    PipelineStore::new(
        dir.path().join("jobs.json"),
        dir.path().join("rejected.json"),
        PipelineStoreConfig::default(),
        clock,
    )
}

fn registry_with(parser: Arc<dyn AtsParser>, tag: &str) -> Arc<HashMap<String, Arc<dyn AtsParser>>> {
    let mut map = HashMap::new();
    map.insert(tag.to_string(), parser);
    Arc::new(map)
}

#[tokio::test]
async fn fetches_and_stores_postings_with_annotations() {
    let clock: Arc<dyn Clock> = Arc::new(FakeClock::new(Utc::now()));
    let parser = Arc::new(FakeAtsParser::new("greenhouse"));
    parser.push_ok(vec![RawPosting {
        ats_job_id: "111".to_string(),
        title: "Senior Technical Program Manager".to_string(),
        location: "Raleigh, NC".to_string(),
        department: "Engineering".to_string(),
        url: "https://boards.greenhouse.io/acme/jobs/111".to_string(),
        first_published: "2026-06-01T00:00:00Z".to_string(),
        updated_at: "2026-06-01T00:00:00Z".to_string(),
    }]);

    let registry = registry_with(parser as Arc<dyn AtsParser>, "greenhouse");
    let dir = tempdir().unwrap();
    let store = store(&dir, clock.clone());

    let companies = vec![CompanyConfig {
        company: "Acme".to_string(),
        ats: "greenhouse".to_string(),
        board_url: "acme".to_string(),
        industry: "software".to_string(),
        priority: 5,
        hq_state: Some("NC".to_string()),
        region: None,
        tags: vec![],
    }];

    let statuses = run_ingestion(
        companies,
        "default",
        registry,
        &store,
        Arc::new(GeoConfig::default()),
        Arc::new(RoleClassifierConfig::default()),
        clock,
        3,
        None,
    )
    .await
    .unwrap();

    assert_eq!(statuses.len(), 1);
    assert!(statuses[0].ok);
    assert_eq!(statuses[0].profile, "default");

    let jobs = store.get_all().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].company, "Acme");
    assert_eq!(jobs[0].status, JobStatus::New);
    assert!(jobs[0].company_data.as_ref().unwrap().priority == 5);
    assert!(jobs[0].geo_bucket.is_some());
}

#[tokio::test]
async fn unrecognized_ats_tag_yields_empty_jobs_and_failed_status() {
    let clock: Arc<dyn Clock> = Arc::new(FakeClock::new(Utc::now()));
    let registry: Arc<HashMap<String, Arc<dyn AtsParser>>> = Arc::new(HashMap::new());
    let dir = tempdir().unwrap();
    let store = store(&dir, clock.clone());

    let companies = vec![CompanyConfig {
        company: "Mystery Co".to_string(),
        ats: "unknown_ats".to_string(),
        board_url: "mystery".to_string(),
        industry: String::new(),
        priority: 0,
        hq_state: None,
        region: None,
        tags: vec![],
    }];

    let statuses = run_ingestion(
        companies,
        "default",
        registry,
        &store,
        Arc::new(GeoConfig::default()),
        Arc::new(RoleClassifierConfig::default()),
        clock,
        3,
        None,
    )
    .await
    .unwrap();

    assert!(!statuses[0].ok);
    assert_eq!(store.get_all().unwrap().len(), 0);
}

#[tokio::test]
async fn permanent_fetch_error_records_failed_status_without_retry() {
    let clock: Arc<dyn Clock> = Arc::new(FakeClock::new(Utc::now()));
    let parser = Arc::new(FakeAtsParser::new("lever"));
    parser.push_err(jobpipe_core::FetchError::Permanent("404".to_string()));
    let registry = registry_with(parser as Arc<dyn AtsParser>, "lever");
    let dir = tempdir().unwrap();
    let store = store(&dir, clock.clone());

    let companies = vec![CompanyConfig {
        company: "Gone Corp".to_string(),
        ats: "lever".to_string(),
        board_url: "gone".to_string(),
        industry: String::new(),
        priority: 0,
        hq_state: None,
        region: None,
        tags: vec![],
    }];

    let statuses = run_ingestion(
        companies,
        "default",
        registry,
        &store,
        Arc::new(GeoConfig::default()),
        Arc::new(RoleClassifierConfig::default()),
        clock,
        3,
        None,
    )
    .await
    .unwrap();

    assert!(!statuses[0].ok);
    assert_eq!(statuses[0].error.as_deref(), Some("permanent error: 404"));
}

#[tokio::test]
async fn persists_company_status_keyed_by_profile_and_company() {
    let clock: Arc<dyn Clock> = Arc::new(FakeClock::new(Utc::now()));
    let parser = Arc::new(FakeAtsParser::new("greenhouse"));
    parser.push_ok(vec![]);
    let registry = registry_with(parser as Arc<dyn AtsParser>, "greenhouse");
    let dir = tempdir().unwrap();
    let store = store(&dir, clock.clone());
    let status_path = dir.path().join("company_status.json");

    let companies = vec![CompanyConfig {
        company: "Acme".to_string(),
        ats: "greenhouse".to_string(),
        board_url: "acme".to_string(),
        industry: String::new(),
        priority: 0,
        hq_state: None,
        region: None,
        tags: vec![],
    }];

    run_ingestion(
        companies,
        "alex",
        registry,
        &store,
        Arc::new(GeoConfig::default()),
        Arc::new(RoleClassifierConfig::default()),
        clock,
        3,
        Some(&status_path),
    )
    .await
    .unwrap();

    let persisted = load_company_status(&status_path).unwrap();
    let entry = persisted.get(&fetch_status_key("alex", "Acme")).unwrap();
    assert!(entry.ok);
    assert_eq!(entry.profile, "alex");
    assert_eq!(entry.company, "Acme");

    // A later sweep over a different company must not erase Acme's entry.
    let parser2 = Arc::new(FakeAtsParser::new("lever"));
    parser2.push_ok(vec![]);
    let registry2 = registry_with(parser2 as Arc<dyn AtsParser>, "lever");
    let companies2 = vec![CompanyConfig {
        company: "Globex".to_string(),
        ats: "lever".to_string(),
        board_url: "globex".to_string(),
        industry: String::new(),
        priority: 0,
        hq_state: None,
        region: None,
        tags: vec![],
    }];
    let clock2: Arc<dyn Clock> = Arc::new(FakeClock::new(Utc::now()));
    run_ingestion(
        companies2,
        "alex",
        registry2,
        &store,
        Arc::new(GeoConfig::default()),
        Arc::new(RoleClassifierConfig::default()),
        clock2,
        3,
        Some(&status_path),
    )
    .await
    .unwrap();

    let persisted = load_company_status(&status_path).unwrap();
    assert!(persisted.contains_key(&fetch_status_key("alex", "Acme")));
    assert!(persisted.contains_key(&fetch_status_key("alex", "Globex")));
}
