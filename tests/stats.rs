use hand_replayer::stats::StatsTracker;

#[test]
fn fresh_tracker_reports_zero_percent() {
    let tracker = StatsTracker::new();
    assert_eq!(tracker.percentage(), 0);
    let snapshot = tracker.snapshot();
    assert_eq!((snapshot.correct, snapshot.total, snapshot.percentage), (0, 0, 0));
}

#[test]
fn one_of_three_rounds_to_thirty_three() {
    let mut tracker = StatsTracker::new();
    tracker.record_hand_played();
    tracker.record_hand_played();
    tracker.record_hand_played();
    tracker.record_correct();
    assert_eq!(tracker.percentage(), 33);
}

#[test]
fn half_rounds_up_to_fifty() {
    let mut tracker = StatsTracker::new();
    tracker.record_hand_played();
    tracker.record_hand_played();
    tracker.record_correct();
    assert_eq!(tracker.percentage(), 50);
}

#[test]
fn two_of_three_rounds_up_to_sixty_seven() {
    let mut tracker = StatsTracker::new();
    for _ in 0..3 {
        tracker.record_hand_played();
    }
    tracker.record_correct();
    tracker.record_correct();
    assert_eq!(tracker.percentage(), 67);
}

#[test]
fn counters_only_grow() {
    let mut tracker = StatsTracker::new();
    tracker.record_hand_played();
    tracker.record_correct();
    tracker.record_hand_played();
    assert_eq!((tracker.correct(), tracker.total()), (1, 2));
    assert_eq!(tracker.percentage(), 50);
}
