use traveling_dragon::entities::*;

#[test]
fn body_edges() {
    let b = Body::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(b.right(), 40.0);
    assert_eq!(b.bottom(), 60.0);
    assert_eq!(b.center_y(), 40.0);
}

#[test]
fn new_player_starts_empty() {
    let p = Player::new("Gabriel", "gabriel");
    assert_eq!(p.name, "Gabriel");
    assert_eq!(p.nickname, "gabriel");
    assert_eq!(p.games_played(), 0);
    assert_eq!(p.high_score(), 0);
}

#[test]
fn record_round_counts_games_and_keeps_best() {
    let mut p = Player::new("joao", "joao");
    p.record_round(12);
    p.record_round(4);
    assert_eq!(p.games_played(), 2);
    assert_eq!(p.high_score(), 12);
    p.record_round(20);
    assert_eq!(p.high_score(), 20);
}

#[test]
fn stored_player_keeps_its_numbers() {
    let p = Player::from_stored("Alvaro".into(), "alvaro".into(), 7, 33);
    assert_eq!(p.games_played(), 7);
    assert_eq!(p.high_score(), 33);
}

#[test]
fn round_summary_flags_new_records() {
    let s = RoundSummary::new(10, 8, 12);
    assert!(s.beat_personal);
    assert!(!s.beat_global);

    let s = RoundSummary::new(15, 8, 12);
    assert!(s.beat_personal && s.beat_global);

    // Equalling a record does not beat it.
    let s = RoundSummary::new(8, 8, 8);
    assert!(!s.beat_personal && !s.beat_global);
}

#[test]
fn states_compare_by_variant() {
    assert_eq!(GameState::Menu, GameState::Menu);
    assert_ne!(GameState::Playing, GameState::GameOver);
    assert_ne!(RoundPhase::Populated, RoundPhase::Running);
    assert_eq!(Track::Level(2), Track::Level(2));
    assert_ne!(Track::Level(2), Track::Menu);
}
