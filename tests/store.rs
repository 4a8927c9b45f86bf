use std::io::Write as _;
use std::sync::Arc;

use hand_replayer::source::HandSource;
use hand_replayer::store::{LocalSource, ScenarioStore, sample_hands};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

#[test]
fn built_in_samples_all_validate() {
    for hand in sample_hands() {
        hand.validate().expect("sample hand is valid");
        assert!(!hand.available_moves.is_empty());
    }
}

#[test]
fn missing_file_falls_back_to_samples() {
    let store = ScenarioStore::load_or_sample(Some(std::path::Path::new(
        "/definitely/not/a/real/file.json",
    )));
    assert_eq!(store.len(), sample_hands().len());
}

#[test]
fn file_load_keeps_valid_records_and_skips_invalid_ones() {
    let payload = json!([
        {
            "players": [{"id": "SB", "name": "SB"}, {"id": "BB", "name": "BB"}],
            "heroId": "BB",
            "hand": "AhKs",
            "actions": [],
            "available_moves": ["Call", "Fold"],
            "correct_decision": "Fold"
        },
        {
            "players": [],
            "heroId": "BB",
            "hand": "AhKs",
            "actions": [],
            "available_moves": ["Call"],
            "correct_decision": "Call"
        }
    ]);
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "{payload}").expect("write fixture");

    let store = ScenarioStore::from_file(file.path()).expect("one valid record");
    assert_eq!(store.len(), 1);
}

#[test]
fn unreadable_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "this is not json").expect("write fixture");
    assert!(ScenarioStore::from_file(file.path()).is_err());
}

#[test]
fn random_hand_draws_from_the_store() {
    let store = ScenarioStore::sample();
    let mut rng = StdRng::seed_from_u64(7);
    let hand = store.random_hand(&mut rng).expect("non-empty store");
    hand.validate().expect("sample hand is valid");
}

#[tokio::test]
async fn seeded_sources_fetch_the_same_sequence() {
    let store = Arc::new(ScenarioStore::sample());
    let mut a = LocalSource::new(store.clone(), Some(42));
    let mut b = LocalSource::new(store, Some(42));

    for _ in 0..4 {
        let left = a.fetch_hand().await.expect("store is non-empty");
        let right = b.fetch_hand().await.expect("store is non-empty");
        assert_eq!(left, right);
    }
}
