use super::*;

#[tokio::test]
async fn type_text_then_read_value_round_trips() {
    let page = FakePageController::new();
    page.type_text("#first_name", "Ada").await.unwrap();
    assert_eq!(page.read_value("#first_name").await.unwrap(), "Ada");
}

#[tokio::test]
async fn mark_missing_causes_click_to_fail() {
    let page = FakePageController::new();
    page.mark_missing("#ghost");
    assert!(matches!(
        page.click("#ghost", Duration::from_secs(1)).await,
        Err(PageError::ElementNotFound(_))
    ));
}

#[tokio::test]
async fn actions_are_recorded_in_order() {
    let page = FakePageController::new();
    page.navigate("https://example.com/apply", Duration::from_secs(5))
        .await
        .unwrap();
    page.click("#apply", Duration::from_secs(1)).await.unwrap();
    page.blur_all().await.unwrap();

    assert_eq!(
        page.actions(),
        vec![
            RecordedAction::Navigate("https://example.com/apply".to_string()),
            RecordedAction::Click("#apply".to_string()),
            RecordedAction::Blur,
        ]
    );
}

#[tokio::test]
async fn query_options_returns_scripted_options() {
    let page = FakePageController::new();
    page.set_options(
        "#state",
        vec![DomOption { value: "NC".to_string(), text: "North Carolina".to_string() }],
    );
    let options = page.query_options("#state").await.unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].value, "NC");
}

#[tokio::test]
async fn evaluate_returns_scripted_response() {
    let page = FakePageController::new();
    page.set_evaluate_response("document.title", "Job Application for PM at Acme");
    assert_eq!(page.evaluate("document.title").await.unwrap(), "Job Application for PM at Acme");
    assert_eq!(page.evaluate("window.location.href").await.unwrap(), "");
}

#[tokio::test]
async fn click_reveals_registered_elements() {
    let page = FakePageController::new();
    page.set_elements(vec![RawElement { selector: "#a".to_string(), visible: true, ..Default::default() }]);
    page.reveal_on_click(
        "#add-another",
        vec![RawElement { selector: "#b".to_string(), visible: true, ..Default::default() }],
    );

    let before = page.scan_elements().await.unwrap();
    assert_eq!(before.len(), 1);

    page.click("#add-another", Duration::from_secs(1)).await.unwrap();

    let after = page.scan_elements().await.unwrap();
    assert_eq!(after.len(), 2);
    assert!(after.iter().any(|e| e.selector == "#b"));
}
