use super::*;
use crate::clock::FakeClock;

fn clock() -> FakeClock {
    FakeClock::new(Utc::now())
}

#[test]
fn new_job_has_composite_id_and_single_history_entry() {
    let clock = clock();
    let job = Job::new("greenhouse", "111", &clock);

    assert_eq!(job.id.as_str(), "greenhouse:111");
    assert_eq!(job.status, JobStatus::New);
    assert_eq!(job.status_history.len(), 1);
    assert!(job.history_matches_status());
}

#[test]
fn push_status_appends_and_keeps_invariant() {
    let clock = clock();
    let mut job = Job::new("lever", "abc", &clock);

    job.push_status(JobStatus::Applied, None, &clock);
    assert_eq!(job.status, JobStatus::Applied);
    assert_eq!(job.status_history.len(), 2);
    assert!(job.history_matches_status());

    job.push_status(
        JobStatus::Closed,
        Some("Not seen on ATS for 5 days".to_string()),
        &clock,
    );
    assert_eq!(job.status_history.len(), 3);
    assert_eq!(
        job.status_history.last().map(|e| e.reason.as_deref()),
        Some(Some("Not seen on ATS for 5 days"))
    );
}

#[test]
fn skip_statuses_are_exactly_rejected_excluded_withdrawn() {
    assert!(JobStatus::Rejected.is_skip_status());
    assert!(JobStatus::Excluded.is_skip_status());
    assert!(JobStatus::Withdrawn.is_skip_status());
    assert!(!JobStatus::Closed.is_skip_status());
    assert!(!JobStatus::New.is_skip_status());
}
