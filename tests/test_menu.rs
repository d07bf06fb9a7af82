use traveling_dragon::menu::*;

#[test]
fn typing_builds_the_nickname() {
    let mut m = Menu::new();
    for c in "gabriel_1".chars() {
        m.type_char(c);
    }
    assert_eq!(m.nickname(), "gabriel_1");
}

#[test]
fn nickname_is_capped() {
    let mut m = Menu::new();
    for _ in 0..30 {
        m.type_char('a');
    }
    assert_eq!(m.nickname().len(), MAX_NICKNAME_LEN);
}

#[test]
fn disallowed_characters_are_dropped() {
    let mut m = Menu::new();
    for c in "jo ão!".chars() {
        m.type_char(c);
    }
    assert_eq!(m.nickname(), "joo");
}

#[test]
fn backspace_removes_last_char() {
    let mut m = Menu::new();
    m.set_nickname("joao");
    m.backspace();
    assert_eq!(m.nickname(), "joa");

    let mut empty = Menu::new();
    empty.backspace();
    assert_eq!(empty.nickname(), "");
}

#[test]
fn set_nickname_applies_the_same_rules() {
    let mut m = Menu::new();
    m.set_nickname("a very long nickname indeed");
    assert_eq!(m.nickname(), "averylongnickna");
}

#[test]
fn warning_expires_after_its_duration() {
    let mut m = Menu::new();
    m.display_warning("Enter a nickname to play!", 3.0);
    assert_eq!(m.warning(), Some("Enter a nickname to play!"));
    m.update(2.0);
    assert!(m.warning().is_some());
    m.update(1.0);
    assert!(m.warning().is_none());
}

#[test]
fn typing_clears_the_warning() {
    let mut m = Menu::new();
    m.display_warning("oops", 3.0);
    m.type_char('x');
    assert!(m.warning().is_none());
}
