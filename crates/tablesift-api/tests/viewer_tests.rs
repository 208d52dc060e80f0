use std::fs;
use tablesift::{Dataset, SortConfig, SortDirection, ViewConfig, Viewer};
use tempfile::tempdir;

const PEOPLE: &str = "\
name,age,city,note
Ann,31,Beijing,
Bob,9,Shanghai,new hire
Cy,45,Beijing,
Di,27,Chengdu,remote
Eve,100,Beijing,lead
";

fn people() -> Dataset {
    Dataset::from_reader("people.csv", PEOPLE.as_bytes()).unwrap()
}

fn names(viewer: &Viewer) -> Vec<String> {
    viewer
        .view()
        .rows
        .iter()
        .map(|r| r.get("name").unwrap_or("").to_string())
        .collect()
}

#[test]
fn test_filter_sort_and_page() {
    let config = ViewConfig::default().with_rows_per_page(2);
    let mut viewer = Viewer::with_config(people(), config);

    viewer.set_query("city == 'Beijing'");
    viewer.toggle_sort("age");

    let view = viewer.view();
    assert_eq!(view.total_rows, 5);
    assert_eq!(view.filtered_rows, 3);
    assert_eq!(view.total_pages, 2);
    assert_eq!((view.first, view.last), (Some(1), Some(2)));
    assert_eq!(names(&viewer), vec!["Ann", "Cy"]);

    viewer.next_page();
    assert_eq!(names(&viewer), vec!["Eve"]);
    assert_eq!(viewer.view().first, Some(3));
}

#[test]
fn test_sort_toggle_cycle() {
    let mut viewer = Viewer::new(people());

    let sort = viewer.toggle_sort("age").cloned();
    assert_eq!(sort, Some(SortConfig::asc("age")));
    assert_eq!(names(&viewer), vec!["Bob", "Di", "Ann", "Cy", "Eve"]);

    let sort = viewer.toggle_sort("age").cloned();
    assert_eq!(sort.map(|s| s.direction), Some(SortDirection::Desc));
    assert_eq!(names(&viewer), vec!["Eve", "Cy", "Ann", "Di", "Bob"]);

    assert!(viewer.toggle_sort("age").is_none());
    assert_eq!(names(&viewer), vec!["Ann", "Bob", "Cy", "Di", "Eve"]);
}

#[test]
fn test_text_sort_on_column() {
    let mut viewer = Viewer::new(people());
    viewer.set_sort(Some(SortConfig::desc("city")));
    assert_eq!(names(&viewer), vec!["Bob", "Di", "Ann", "Cy", "Eve"]);
}

#[test]
fn test_strict_syntax_error_shows_unfiltered_rows() {
    let config = ViewConfig::default().with_strict_syntax(true);
    let mut viewer = Viewer::with_config(people(), config);
    viewer.toggle_sort("age");

    viewer.set_query("age >");
    let view = viewer.view();
    assert_eq!(view.error.as_deref(), Some("Query syntax error"));
    assert_eq!(view.filtered_rows, 5);
    // Unfiltered rows are shown in file order.
    assert_eq!(names(&viewer), vec!["Ann", "Bob", "Cy", "Di", "Eve"]);

    viewer.set_query("age > 30");
    assert!(viewer.error().is_none());
    assert_eq!(names(&viewer), vec!["Ann", "Cy", "Eve"]);
}

#[test]
fn test_one_bad_side_fails_whole_query() {
    let config = ViewConfig::default().with_strict_syntax(true);
    let mut viewer = Viewer::with_config(people(), config);

    viewer.set_query("city == 'Beijing' and nonsense");
    assert!(viewer.error().is_some());
    assert!(viewer.condition().is_none());
}

#[test]
fn test_empty_checks_on_loaded_data() {
    let mut viewer = Viewer::new(people());

    viewer.set_query("note.isEmpty()");
    assert_eq!(names(&viewer), vec!["Ann", "Cy"]);

    viewer.set_query("note.isNotEmpty() and note.contains('e')");
    assert_eq!(names(&viewer), vec!["Bob", "Di", "Eve"]);
}

#[test]
fn test_export_visible_rows() {
    let mut viewer = Viewer::new(people());
    viewer.set_query("age >= 45");
    viewer.toggle_sort("age");
    viewer.toggle_sort("age");

    let mut out = Vec::new();
    let written = viewer.export_csv(&mut out).unwrap();
    assert_eq!(written, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "name,age,city,note\nEve,100,Beijing,lead\nCy,45,Beijing,\n"
    );
    assert_eq!(viewer.export_file_name(), "filtered_people.csv");
}

#[test]
fn test_export_round_trips_through_file() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("people.csv");
    fs::write(&source, PEOPLE).unwrap();

    let mut viewer = Viewer::new(Dataset::from_path(&source).unwrap());
    viewer.set_query("city.startsWith('B')");

    let target = dir.path().join(viewer.export_file_name());
    let file = fs::File::create(&target).unwrap();
    viewer.export_csv(file).unwrap();

    let exported = Dataset::from_path(&target).unwrap();
    assert_eq!(exported.name, "filtered_people.csv");
    assert_eq!(exported.row_count(), 3);
    assert!(exported
        .rows
        .iter()
        .all(|r| r.get("city") == Some("Beijing")));
}

#[test]
fn test_short_records_use_missing_field_policy() {
    let csv = "name,age\nAnn,31\nBob\n";
    let mut viewer = Viewer::new(Dataset::from_reader("short.csv", csv.as_bytes()).unwrap());

    viewer.set_query("age != '31'");
    assert!(names(&viewer).is_empty());

    viewer.set_query("age.isEmpty()");
    assert_eq!(names(&viewer), vec!["Bob"]);
}

#[test]
fn test_runaway_nesting_is_a_syntax_error() {
    let config = ViewConfig::default().with_strict_syntax(true);
    let mut viewer = Viewer::with_config(people(), config);

    let query = format!("{}age > 30{}", "(".repeat(5_000), ")".repeat(5_000));
    viewer.set_query(query);
    assert_eq!(viewer.error(), Some("Query syntax error"));
    assert_eq!(viewer.view().filtered_rows, 5);

    viewer.set_query("(city == 'Beijing' and nonsense)");
    assert!(viewer.error().is_some());
    assert!(viewer.condition().is_none());
}
