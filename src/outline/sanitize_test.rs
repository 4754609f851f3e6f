use super::*;

// =============================================================================
// clean_title
// =============================================================================

#[test]
fn clean_title_strips_dash_bullet_and_whitespace() {
    assert_eq!(clean_title("    - Alpha  "), "Alpha");
}

#[test]
fn clean_title_strips_dash_without_space() {
    assert_eq!(clean_title("-Alpha"), "Alpha");
}

#[test]
fn clean_title_strips_only_one_marker() {
    assert_eq!(clean_title("- - nested"), "- nested");
}

#[test]
fn clean_title_strips_star_and_plus_bullets() {
    assert_eq!(clean_title("* Star"), "Star");
    assert_eq!(clean_title("\t+ Plus"), "Plus");
}

#[test]
fn clean_title_keeps_leading_emphasis() {
    assert_eq!(clean_title("*bold* idea"), "*bold* idea");
}

#[test]
fn clean_title_empty_and_marker_only() {
    assert_eq!(clean_title(""), "");
    assert_eq!(clean_title("   -   "), "");
}

// =============================================================================
// sanitize
// =============================================================================

#[test]
fn sanitize_replaces_each_symbol_and_space() {
    assert_eq!(sanitize("Stress & Focus!"), "Stress___Focus_");
}

#[test]
fn sanitize_keeps_word_characters() {
    assert_eq!(sanitize("snake_case42"), "snake_case42");
}

#[test]
fn sanitize_keeps_unicode_letters() {
    assert_eq!(sanitize("Café déjà vu"), "Café_déjà_vu");
}

#[test]
fn sanitize_replaces_tabs_and_newlines() {
    assert_eq!(sanitize("a\tb\nc"), "a_b_c");
}

#[test]
fn sanitize_quotes_and_backslashes() {
    assert_eq!(sanitize(r#"say "hi"\now"#), "say__hi__now");
}

#[test]
fn sanitize_empty() {
    assert_eq!(sanitize(""), "");
}

// =============================================================================
// create_node_label
// =============================================================================

#[test]
fn create_node_label_returns_clean_title_and_identifier() {
    let (title, identifier) = create_node_label("  - Stress & Focus!");
    assert_eq!(title, "Stress & Focus!");
    assert_eq!(identifier, "Stress___Focus_");
}

#[test]
fn create_node_label_collisions_are_possible() {
    let (_, a) = create_node_label("A-B");
    let (_, b) = create_node_label("A B");
    assert_eq!(a, b);
}
