use super::*;

fn sample_kb() -> KnowledgeBase {
    let mut kb = KnowledgeBase::default();
    kb.experience_snippets.insert(
        "stakeholder management".to_string(),
        "Led cross-functional stakeholder alignment across 4 business units.".to_string(),
    );
    kb.common_answers.insert(
        "salary".to_string(),
        CommonAnswer {
            keywords: vec!["salary".to_string(), "compensation".to_string()],
            answer: "Open to discussing based on total package.".to_string(),
        },
    );
    kb
}

#[test]
fn find_relevant_snippets_matches_direct_keyword() {
    let kb = sample_kb();
    let found = kb.find_relevant_snippets("Describe your stakeholder management experience");
    assert_eq!(found.len(), 1);
}

#[test]
fn find_relevant_snippets_matches_multiword_constituent() {
    let kb = sample_kb();
    // "stakeholder" alone (>3 chars) should match via the multi-word path.
    let found = kb.find_relevant_snippets("How do you handle stakeholder conflicts?");
    assert_eq!(found.len(), 1);
}

#[test]
fn find_relevant_snippets_caps_at_three() {
    let mut kb = KnowledgeBase::default();
    for i in 0..5 {
        kb.experience_snippets.insert(format!("leadership{i}"), format!("snippet {i}"));
    }
    let found = kb.find_relevant_snippets("Tell me about your leadership0 leadership1 leadership2 leadership3 leadership4");
    assert!(found.len() <= 3);
}

#[test]
fn context_for_question_empty_when_no_match() {
    let kb = sample_kb();
    assert_eq!(kb.context_for_question("What is your favorite color?"), "");
}

#[test]
fn find_common_answer_matches_keyword() {
    let kb = sample_kb();
    assert_eq!(
        kb.find_common_answer("What is your expected compensation?"),
        Some("Open to discussing based on total package.")
    );
}

#[test]
fn find_common_answer_none_when_no_keyword_matches() {
    let kb = sample_kb();
    assert_eq!(kb.find_common_answer("What is your favorite animal?"), None);
}
