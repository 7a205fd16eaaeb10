use super::*;

#[tokio::test]
async fn returns_queued_responses_in_order() {
    let fake = FakeAtsParser::new("greenhouse");
    fake.push_ok(vec![RawPosting {
        ats_job_id: "1".to_string(),
        title: "PM".to_string(),
        ..Default::default()
    }]);
    fake.push_err(FetchError::Permanent("board gone".to_string()));

    let first = fake.parse("Acme", "https://example.com/acme").await.unwrap();
    assert_eq!(first.len(), 1);

    let second = fake.parse("Acme", "https://example.com/acme").await;
    assert!(second.is_err());

    assert_eq!(fake.calls().len(), 2);
}

#[tokio::test]
async fn empty_queue_returns_empty_vec() {
    let fake = FakeAtsParser::new("lever");
    let result = fake.parse("Acme", "https://example.com").await.unwrap();
    assert!(result.is_empty());
}
