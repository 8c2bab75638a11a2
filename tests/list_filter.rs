use cookie_selector::list::ListState;
use cookie_selector::record::CookieRecord;

fn record(name: &str, value: &str, path: &str) -> CookieRecord {
    CookieRecord {
        name: name.to_string(),
        value: value.to_string(),
        domain: "example.com".to_string(),
        path: path.to_string(),
        secure: false,
        http_only: false,
        selected: false,
    }
}

fn sample() -> ListState {
    let mut list = ListState::new();
    list.load(vec![
        record("session_id", "abc123", "/"),
        record("theme", "dark", "/"),
        record("tracking", "SESSION-xyz", "/"),
        record("lang", "en", "/"),
    ]);
    list
}

fn visible_names(list: &ListState) -> Vec<&str> {
    list.filtered_records().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_filter_matches_name_or_value_case_insensitively() {
    let mut list = sample();
    list.set_filter("  Session ");
    assert_eq!(visible_names(&list), vec!["session_id", "tracking"]);
}

#[test]
fn test_filter_is_idempotent() {
    let mut list = sample();
    list.set_filter("a");
    let first: Vec<String> = visible_names(&list).into_iter().map(String::from).collect();
    list.set_filter("a");
    assert_eq!(visible_names(&list), first);
}

#[test]
fn test_empty_filter_restores_full_list() {
    let mut list = sample();
    list.set_filter("theme");
    assert_eq!(list.filtered_len(), 1);
    list.set_filter("");
    assert_eq!(
        visible_names(&list),
        vec!["session_id", "theme", "tracking", "lang"]
    );
}

#[test]
fn test_select_all_under_filter_leaves_hidden_records() {
    let mut list = sample();
    list.set_selected("lang", "example.com", true);
    list.set_filter("session");
    list.select_all();

    let selected: Vec<&str> = list
        .selected_records()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(selected, vec!["session_id", "tracking", "lang"]);
    assert!(!list.records()[1].selected);

    list.deselect_all();
    assert_eq!(list.selected_count(), 1);
    assert!(list.records()[3].selected);
}

#[test]
fn test_filter_never_changes_selection() {
    let mut list = sample();
    list.set_selected("theme", "example.com", true);
    list.set_filter("zzz");
    assert_eq!(list.filtered_len(), 0);
    list.set_filter("");
    assert!(list.records()[1].selected);
    assert_eq!(list.selection_summary().label(), "1 of 4 selected");
}

#[test]
fn test_selection_lookup_ignores_path() {
    let mut list = ListState::new();
    list.load(vec![record("sid", "root", "/"), record("sid", "api", "/api")]);

    list.set_selected("sid", "example.com", true);
    list.set_selected("sid", "example.com", true);
    assert!(list.records()[0].selected);
    assert!(!list.records()[1].selected);
}
