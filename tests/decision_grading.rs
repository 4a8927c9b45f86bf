use hand_replayer::decision::{DecisionEngine, labels_match};
use hand_replayer::history::HandHistory;

fn history_with_correct(correct: &str) -> HandHistory {
    serde_json::from_value(serde_json::json!({
        "players": [
            {"id": "SB", "name": "SB"},
            {"id": "BB", "name": "BB"}
        ],
        "heroId": "BB",
        "hand": "AhKs",
        "actions": [],
        "available_moves": ["Call", "Fold", "Bet"],
        "correct_decision": correct,
    }))
    .expect("valid history")
}

#[test]
fn grading_is_case_insensitive() {
    let history = history_with_correct("bet");
    for chosen in ["Bet", "bet", "BET"] {
        let mut engine = DecisionEngine::new(&history);
        engine.offer_moves().expect("first offer");
        let verdict = engine.grade(chosen).expect("one grade");
        assert!(verdict.is_correct, "{chosen} should match 'bet'");
        assert_eq!(verdict.correct_decision, "bet");
    }
}

#[test]
fn whitespace_is_not_trimmed() {
    let history = history_with_correct("bet");
    let mut engine = DecisionEngine::new(&history);
    engine.offer_moves().expect("first offer");
    let verdict = engine.grade(" bet").expect("one grade");
    assert!(!verdict.is_correct);
}

#[test]
fn arbitrary_strings_grade_false() {
    let history = history_with_correct("fold");
    let mut engine = DecisionEngine::new(&history);
    engine.offer_moves().expect("first offer");
    let verdict = engine.grade("shove the river").expect("one grade");
    assert!(!verdict.is_correct);
    assert_eq!(verdict.correct_decision, "fold");
}

#[test]
fn offered_moves_come_from_the_history() {
    let history = history_with_correct("fold");
    let mut engine = DecisionEngine::new(&history);
    let moves = engine.offer_moves().expect("first offer");
    assert_eq!(moves, ["Call", "Fold", "Bet"]);
}

#[test]
fn offering_twice_is_an_invalid_state() {
    let history = history_with_correct("fold");
    let mut engine = DecisionEngine::new(&history);
    engine.offer_moves().expect("first offer");
    assert!(engine.offer_moves().is_err());
}

#[test]
fn grading_before_offering_is_an_invalid_state() {
    let history = history_with_correct("fold");
    let mut engine = DecisionEngine::new(&history);
    assert!(engine.grade("fold").is_err());
}

#[test]
fn grading_twice_is_an_invalid_state() {
    let history = history_with_correct("fold");
    let mut engine = DecisionEngine::new(&history);
    engine.offer_moves().expect("first offer");
    engine.grade("fold").expect("one grade");
    assert!(engine.grade("fold").is_err());
}

#[test]
fn label_matching_folds_case_only() {
    assert!(labels_match("Fold", "fold"));
    assert!(labels_match("FOLD", "Fold"));
    assert!(!labels_match("fold ", "fold"));
    assert!(!labels_match("check", "fold"));
}
