use super::*;
use tempfile::tempdir;

#[test]
fn normalize_key_strips_punctuation_and_collapses_whitespace() {
    assert_eq!(
        normalize_key("What's your   *desired* salary?!"),
        "whats your desired salary"
    );
}

#[test]
fn normalize_key_is_idempotent() {
    let once = normalize_key("Do you require   sponsorship??");
    let twice = normalize_key(&once);
    assert_eq!(once, twice);
}

#[test]
fn normalize_key_truncates_to_100_chars() {
    let long = "a".repeat(500);
    assert_eq!(normalize_key(&long).len(), 100);
}

#[test]
fn learn_then_lookup_answer_round_trips() {
    let dir = tempdir().unwrap();
    let db = LearnedDb::load(dir.path().join("learned.json")).unwrap();

    db.learn_answer("What is your desired salary?", "$150,000")
        .unwrap();
    assert_eq!(
        db.lookup_answer("What is your desired salary?"),
        Some("$150,000".to_string())
    );
}

#[test]
fn lookup_answer_falls_back_to_substring_containment() {
    let dir = tempdir().unwrap();
    let db = LearnedDb::load(dir.path().join("learned.json")).unwrap();

    db.learn_answer("desired salary", "$150,000").unwrap();
    assert_eq!(
        db.lookup_answer("What is your desired salary expectation?"),
        Some("$150,000".to_string())
    );
}

#[test]
fn lookup_answer_unknown_question_returns_none() {
    let dir = tempdir().unwrap();
    let db = LearnedDb::load(dir.path().join("learned.json")).unwrap();
    assert_eq!(db.lookup_answer("completely unseen question"), None);
}

#[test]
fn dropdown_choices_are_tracked_separately_from_answers() {
    let dir = tempdir().unwrap();
    let db = LearnedDb::load(dir.path().join("learned.json")).unwrap();

    db.learn_dropdown_choice("Are you authorized to work in the US?", "Yes")
        .unwrap();
    assert_eq!(
        db.lookup_dropdown_choice("Are you authorized to work in the US?"),
        Some("Yes".to_string())
    );
    assert_eq!(
        db.lookup_answer("Are you authorized to work in the US?"),
        None
    );
}

#[test]
fn persists_across_reloads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("learned.json");

    {
        let db = LearnedDb::load(path.clone()).unwrap();
        db.learn_answer("How did you hear about us?", "LinkedIn")
            .unwrap();
    }

    let reloaded = LearnedDb::load(path).unwrap();
    assert_eq!(
        reloaded.lookup_answer("How did you hear about us?"),
        Some("LinkedIn".to_string())
    );
}

#[test]
fn load_tolerates_legacy_field_answers_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("learned.json");
    std::fs::write(
        &path,
        r#"{"field_answers": {"legacy question": "legacy answer"}, "dropdown_choices": {}}"#,
    )
    .unwrap();

    let db = LearnedDb::load(path).unwrap();
    assert_eq!(
        db.lookup_answer("legacy question"),
        Some("legacy answer".to_string())
    );
}

#[test]
fn first_match_in_insertion_order_wins_over_later_containment_matches() {
    let dir = tempdir().unwrap();
    let db = LearnedDb::load(dir.path().join("learned.json")).unwrap();

    db.learn_answer("salary", "first").unwrap();
    db.learn_answer("desired salary range", "second").unwrap();

    assert_eq!(
        db.lookup_answer("what is your desired salary range today"),
        Some("first".to_string())
    );
}
