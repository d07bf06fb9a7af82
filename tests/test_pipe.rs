use traveling_dragon::pipe::*;

fn make_pipe() -> Pipe {
    // x, gap center, gap height, speed, width, screen height
    Pipe::new(500.0, 300.0, 250.0, 150.0, 134.5, 720.0)
}

#[test]
fn new_pipe_spans_full_height() {
    let p = make_pipe();
    assert_eq!(p.x(), 500.0);
    assert_eq!(p.width(), 134.5);
    assert_eq!(p.body().y, 0.0);
    assert_eq!(p.body().height, 720.0);
    assert!(!p.has_scored());
}

#[test]
fn gap_edges_surround_center() {
    let p = make_pipe();
    assert_eq!(p.top_edge(), 175.0);
    assert_eq!(p.bottom_edge(), 425.0);
    assert_eq!(p.gap_center_y(), 300.0);
    assert_eq!(p.gap_height(), 250.0);
}

#[test]
fn update_moves_left_by_speed_times_dt() {
    let mut p = make_pipe();
    p.update(0.5);
    assert_eq!(p.x(), 425.0);
    p.update(0.0);
    assert_eq!(p.x(), 425.0);
}

#[test]
fn speed_is_stored_as_magnitude() {
    let mut p = Pipe::new(0.0, 300.0, 250.0, -150.0, 100.0, 720.0);
    assert_eq!(p.speed(), 150.0);
    p.set_speed(-200.0);
    assert_eq!(p.speed(), 200.0);
    p.update(1.0);
    assert_eq!(p.x(), -200.0);
}

#[test]
fn off_screen_only_once_right_edge_passes_zero() {
    let mut p = Pipe::new(-5.0, 300.0, 250.0, 100.0, 5.0, 720.0);
    assert!(!p.is_off_screen());
    p.update(0.01);
    assert!(p.is_off_screen());
}

#[test]
fn scored_flag_round_trips() {
    let mut p = make_pipe();
    p.set_scored(true);
    assert!(p.has_scored());
    p.set_scored(false);
    assert!(!p.has_scored());
}
