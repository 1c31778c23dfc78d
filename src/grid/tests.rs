//! Tests for the grid component.

use super::*;
use crate::column::{Column, ColumnOption, ColumnType};
use crate::edit::EditSwitchPolicy;
use crate::error::GridError;
use crate::pipeline::{FilterMap, SortDirection};
use crate::selection::CheckState;
use crate::value::{record, Value};
use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use lipgloss_extras::lipgloss::strip_ansi;
use std::collections::BTreeMap;

type Row = BTreeMap<String, Value>;

fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name"),
        Column::new("age", "Age").with_type(ColumnType::Number),
        Column::new("status", "Status")
            .with_type(ColumnType::Text)
            .with_options(vec![
                ColumnOption::new("Active", "Active"),
                ColumnOption::new("Expired", "Expired"),
                ColumnOption::new("Terminated", "Terminated"),
            ])
            .filterable(),
    ]
}

fn person(name: &str, age: i64, status: &str) -> Row {
    record([
        ("name", Value::from(name)),
        ("age", Value::from(age)),
        ("status", Value::from(status)),
    ])
}

fn people() -> Vec<Row> {
    vec![
        person("Bob", 30, "Active"),
        person("Ann", 25, "Expired"),
        person("Cid", 41, "Active"),
    ]
}

fn numbered(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| person(&format!("r{i}"), i as i64, "Active"))
        .collect()
}

fn people_grid() -> Model<Row> {
    Model::new(columns())
        .unwrap()
        .sortable(true)
        .with_rows(people())
}

fn names(grid: &Model<Row>) -> Vec<String> {
    grid.page_rows()
        .iter()
        .map(|(_, row)| row.value("name").as_text())
        .collect()
}

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Msg {
    Box::new(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn click(column: u16, row: u16) -> Msg {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

/// Sends a message and resolves the returned command into its events.
async fn send(grid: &mut Model<Row>, msg: Msg) -> Vec<GridEvent> {
    let Some(cmd) = grid.update(msg) else {
        return Vec::new();
    };
    match cmd.await {
        Some(msg) => msg
            .downcast_ref::<GridEventsMsg>()
            .map(|m| m.0.clone())
            .unwrap_or_default(),
        None => Vec::new(),
    }
}

#[test]
fn test_new_defaults() {
    let grid = people_grid();
    assert_eq!(grid.page(), 1);
    assert_eq!(grid.page_size(), 10);
    assert_eq!(grid.total(), 3);
    assert_eq!(grid.mode(), PaginationMode::Local);
    assert_eq!(grid.layout().visible(), ["name", "age", "status"]);
    assert_eq!(grid.layout().width("name"), Some(120));
    assert!(grid.focused());
    assert!(!grid.filters_controlled());
    // Filterable columns start with an inactive entry.
    assert_eq!(grid.filters().get("status"), Some(&Value::Null));
}

#[test]
fn test_duplicate_columns_rejected() {
    let err = Model::<Row>::new(vec![Column::new("a", "A"), Column::new("a", "B")]).unwrap_err();
    assert_eq!(err, GridError::DuplicateColumn("a".into()));
}

#[test]
fn test_sort_scenarios() {
    let mut grid = people_grid();

    grid.toggle_sort("name").unwrap();
    assert_eq!(names(&grid), ["Ann", "Bob", "Cid"]);

    grid.toggle_sort("age").unwrap();
    assert_eq!(names(&grid), ["Ann", "Bob", "Cid"]);
    grid.toggle_sort("age").unwrap();
    assert_eq!(names(&grid), ["Cid", "Bob", "Ann"]);
    grid.toggle_sort("age").unwrap();
    assert_eq!(names(&grid), ["Ann", "Bob", "Cid"]);

    let directions: Vec<(String, SortDirection)> = grid
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            GridEvent::SortChanged { key, direction } => Some((key, direction)),
            _ => None,
        })
        .collect();
    assert_eq!(
        directions,
        vec![
            ("name".to_string(), SortDirection::Ascending),
            ("age".to_string(), SortDirection::Ascending),
            ("age".to_string(), SortDirection::Descending),
            ("age".to_string(), SortDirection::Ascending),
        ]
    );

    grid.clear_sort();
    assert_eq!(names(&grid), ["Bob", "Ann", "Cid"]);
}

#[test]
fn test_sort_disabled_is_noop() {
    let mut grid = Model::new(columns()).unwrap().with_rows(people());
    grid.toggle_sort("name").unwrap();
    assert!(grid.sort().is_none());
    assert!(grid.take_events().is_empty());

    let mut grid = Model::new(vec![Column::new("name", "Name").unsortable()])
        .unwrap()
        .sortable(true)
        .with_rows(people());
    grid.toggle_sort("name").unwrap();
    assert!(grid.sort().is_none());

    assert_eq!(
        grid.toggle_sort("missing"),
        Err(GridError::UnknownColumn("missing".into()))
    );
}

#[test]
fn test_filter_status_scenario() {
    let mut grid = people_grid();
    grid.set_filter("status", "Active").unwrap();
    assert_eq!(grid.total(), 2);
    assert_eq!(names(&grid), ["Bob", "Cid"]);
    assert_eq!(
        grid.take_events(),
        vec![GridEvent::FilterChanged {
            key: "status".into(),
            value: Value::from("Active"),
        }]
    );

    grid.set_filter("status", Value::Null).unwrap();
    assert_eq!(grid.total(), 3);
}

#[test]
fn test_controlled_filters_only_report() {
    let mut grid = people_grid().with_filters(FilterMap::new());
    assert!(grid.filters_controlled());

    grid.set_filter("status", "Active").unwrap();
    assert_eq!(grid.total(), 3);
    assert!(grid.filters().is_empty());
    assert_eq!(grid.take_events().len(), 1);

    let mut filters = FilterMap::new();
    filters.insert("status".into(), Value::from("Active"));
    grid.set_filters(filters);
    assert_eq!(grid.total(), 2);
}

#[test]
fn test_search_applies_only_when_searchable() {
    let mut grid = people_grid();
    grid.set_search("ann");
    assert_eq!(grid.total(), 3);

    let mut grid = grid.searchable(true);
    assert_eq!(names(&grid), ["Ann"]);
    grid.set_search("");
    assert_eq!(grid.total(), 3);
}

#[test]
fn test_page_two_of_fifteen() {
    let mut grid = Model::new(columns()).unwrap().with_rows(numbered(15));
    grid.set_page(2);
    assert_eq!(grid.page_rows().len(), 5);
    assert_eq!(names(&grid)[0], "r10");
    assert_eq!(
        grid.take_events(),
        vec![GridEvent::PaginationChanged {
            page: 2,
            page_size: 10
        }]
    );

    // Already on the last page.
    grid.next_page();
    assert_eq!(grid.page(), 2);
    assert!(grid.take_events().is_empty());
}

#[test]
fn test_page_size_change_returns_to_first_page() {
    let mut grid = Model::new(columns()).unwrap().with_rows(numbered(60));
    grid.set_page(3);
    grid.take_events();

    grid.set_page_size(25).unwrap();
    assert_eq!(grid.page(), 1);
    assert_eq!(grid.page_rows().len(), 25);
    assert_eq!(
        grid.take_events(),
        vec![GridEvent::PaginationChanged {
            page: 1,
            page_size: 25
        }]
    );

    assert_eq!(grid.set_page_size(7), Err(GridError::PageSizeNotAllowed(7)));
    grid.cycle_page_size();
    assert_eq!(grid.page_size(), 50);
}

#[test]
fn test_stale_page_shows_nothing_until_clamped() {
    let mut grid = Model::new(columns()).unwrap().with_rows(numbered(5));
    grid.set_page(4);
    assert!(grid.page_rows().is_empty());

    // Data changes pull the page back inside the data.
    grid.set_search("r");
    assert_eq!(grid.page(), 1);
}

#[test]
fn test_select_all_then_delete_empties_rows() {
    let mut grid = people_grid();
    grid.toggle_all();
    assert_eq!(grid.header_check_state(), CheckState::Checked);
    assert_eq!(grid.selection().len(), 3);

    assert_eq!(grid.delete_selected(), 3);
    assert!(grid.rows().is_empty());
    assert!(grid.selection().is_empty());
    assert_eq!(grid.take_events(), vec![GridEvent::RowsDeleted { count: 3 }]);

    // Nothing selected: nothing to delete.
    assert_eq!(grid.delete_selected(), 0);
}

#[test]
fn test_select_all_covers_filtered_set() {
    let mut grid = people_grid();
    grid.set_filter("status", "Active").unwrap();
    grid.toggle_all();
    assert_eq!(grid.selection().len(), 2);
    assert_eq!(grid.header_check_state(), CheckState::Checked);

    grid.set_filter("status", Value::Null).unwrap();
    assert_eq!(grid.header_check_state(), CheckState::Indeterminate);

    grid.toggle_all();
    assert_eq!(grid.selection().len(), 3);
    grid.toggle_all();
    assert_eq!(grid.header_check_state(), CheckState::Unchecked);
}

#[test]
fn test_selection_follows_row_across_sort() {
    let mut grid = people_grid();
    grid.toggle_row_at(0).unwrap();
    let (bob, _) = grid.page_rows()[0];

    grid.toggle_sort("name").unwrap();
    assert_eq!(names(&grid), ["Ann", "Bob", "Cid"]);
    assert!(grid.is_selected(bob));
    assert!(grid.is_selected(grid.page_rows()[1].0));
    assert!(!grid.is_selected(grid.page_rows()[0].0));

    grid.toggle_row(bob).unwrap();
    assert!(grid.selection().is_empty());
    assert_eq!(grid.toggle_row_at(9), Err(GridError::RowNotFound(9)));
}

#[test]
fn test_delete_on_last_page_clamps_page() {
    let mut grid = Model::new(columns()).unwrap().with_rows(numbered(11));
    grid.set_page(2);
    grid.toggle_row_at(0).unwrap();
    assert_eq!(grid.delete_selected(), 1);
    assert_eq!(grid.page(), 1);
    assert_eq!(grid.page_rows().len(), 10);
}

#[tokio::test]
async fn test_edit_scenario_via_keys() {
    let mut grid = Model::new(columns()).unwrap().with_rows(vec![
        person("Bob", 30, "Active"),
        person("Ann", 25, "Expired"),
    ]);

    assert!(send(&mut grid, key(KeyCode::Enter)).await.is_empty());
    assert_eq!(grid.edit_draft().map(|d| d.value()), Some("Bob"));

    send(&mut grid, key(KeyCode::Char('b'))).await;
    send(&mut grid, key(KeyCode::Char('y'))).await;
    let events = send(&mut grid, key(KeyCode::Enter)).await;

    assert_eq!(
        events,
        vec![GridEvent::CellEdited {
            row_index: 0,
            key: "name".into(),
            value: Value::from("Bobby"),
        }]
    );
    assert_eq!(grid.rows()[0].value("name"), Value::from("Bobby"));
    assert!(grid.edit_draft().is_none());
}

#[test]
fn test_edit_rejections() {
    let mut grid = people_grid();
    assert_eq!(
        grid.start_edit_at(0, "age"),
        Err(GridError::NotEditable("age".into()))
    );
    assert_eq!(grid.start_edit_at(9, "name"), Err(GridError::RowNotFound(9)));
    assert!(grid.edit_draft().is_none());
}

#[test]
fn test_cancel_leaves_row_untouched() {
    let mut grid = people_grid();
    grid.start_edit_at(0, "name").unwrap();
    grid.set_edit_value("Zed");
    assert!(grid.cancel_edit());
    assert_eq!(grid.rows()[0].value("name"), Value::from("Bob"));
    assert!(grid.take_events().is_empty());
    assert!(!grid.cancel_edit());
}

#[test]
fn test_edit_switch_policies() {
    let mut grid = people_grid();
    grid.start_edit_at(0, "name").unwrap();
    grid.set_edit_value("X");
    grid.start_edit_at(1, "name").unwrap();
    assert_eq!(grid.rows()[0].value("name"), Value::from("Bob"));
    assert!(grid.take_events().is_empty());

    let mut grid = people_grid().with_edit_switch_policy(EditSwitchPolicy::Commit);
    grid.start_edit_at(0, "name").unwrap();
    grid.set_edit_value("X");
    grid.start_edit_at(1, "name").unwrap();
    assert_eq!(grid.rows()[0].value("name"), Value::from("X"));
    assert_eq!(grid.edit_draft().map(|d| d.value()), Some("Ann"));
    assert_eq!(grid.take_events().len(), 1);

    let mut grid = people_grid().with_edit_switch_policy(EditSwitchPolicy::Block);
    grid.start_edit_at(0, "name").unwrap();
    assert_eq!(
        grid.start_edit_at(1, "name"),
        Err(GridError::EditInProgress("name".into()))
    );
    let (bob, _) = grid.page_rows()[0];
    assert_eq!(grid.edit_draft().map(|d| d.row), Some(bob));
}

#[test]
fn test_deleting_edited_row_drops_draft() {
    let mut grid = people_grid();
    grid.start_edit_at(0, "name").unwrap();
    grid.toggle_row_at(0).unwrap();
    grid.delete_selected();
    assert!(grid.edit_draft().is_none());
}

#[test]
fn test_column_toggle_keeps_order() {
    let mut grid = people_grid();
    grid.toggle_column("name").unwrap();
    grid.toggle_column("status").unwrap();
    assert_eq!(grid.layout().visible(), ["age"]);

    grid.toggle_column("name").unwrap();
    assert_eq!(grid.layout().visible(), ["name", "age"]);
    assert_eq!(
        grid.take_events().last(),
        Some(&GridEvent::ColumnsChanged {
            visible: vec!["name".into(), "age".into()]
        })
    );

    grid.set_visible_columns(&["status".to_string(), "name".to_string()])
        .unwrap();
    assert_eq!(grid.layout().visible(), ["name", "status"]);
    assert_eq!(
        grid.toggle_column("nope"),
        Err(GridError::UnknownColumn("nope".into()))
    );
}

#[tokio::test]
async fn test_resize_gesture_via_mouse() {
    // Toolbar on line 0, filter bar on line 1, header on line 2. The name
    // column spans cells 4..19 and its handle sits at cell 19.
    let mut grid = people_grid().resizable(true);

    send(&mut grid, click(19, 2)).await;
    assert!(grid.layout().resizing().is_some());
    send(&mut grid, mouse(MouseEventKind::Drag(MouseButton::Left), 24, 2)).await;
    assert_eq!(grid.layout().width("name"), Some(160));

    let events = send(&mut grid, mouse(MouseEventKind::Up(MouseButton::Left), 24, 2)).await;
    assert_eq!(
        events,
        vec![GridEvent::ColumnResized {
            key: "name".into(),
            width: 160
        }]
    );
    assert!(grid.layout().resizing().is_none());

    // Dragging far left stops at the minimum width.
    send(&mut grid, click(24, 2)).await;
    send(&mut grid, mouse(MouseEventKind::Drag(MouseButton::Left), 0, 2)).await;
    send(&mut grid, mouse(MouseEventKind::Up(MouseButton::Left), 0, 2)).await;
    assert_eq!(grid.layout().width("name"), Some(60));
}

#[tokio::test]
async fn test_resize_at_far_edge_with_large_cell_ratio() {
    let mut grid = people_grid().resizable(true).with_cell_px(u16::MAX);
    assert_eq!(grid.cell_px, MAX_CELL_PX);

    let handle = grid.column_spans()[0].handle;
    send(&mut grid, click(handle, 2)).await;
    assert!(grid.layout().resizing().is_some());
    send(&mut grid, mouse(MouseEventKind::Drag(MouseButton::Left), u16::MAX, 2)).await;
    send(&mut grid, mouse(MouseEventKind::Up(MouseButton::Left), u16::MAX, 2)).await;
    assert_eq!(grid.layout().width("name"), Some(u16::MAX));

    send(&mut grid, click(u16::MAX, 2)).await;
    send(&mut grid, mouse(MouseEventKind::Drag(MouseButton::Left), u16::MAX, u16::MAX)).await;
    assert_eq!(people_grid().with_cell_px(0).cell_px, 1);
}

#[tokio::test]
async fn test_resize_ignored_when_not_resizable() {
    let mut grid = people_grid();
    send(&mut grid, click(19, 2)).await;
    assert!(grid.layout().resizing().is_none());
}

#[tokio::test]
async fn test_mouse_respects_origin() {
    let mut grid = people_grid().with_origin(10, 5);
    let events = send(&mut grid, click(16, 7)).await;
    assert!(matches!(
        events[..],
        [GridEvent::SortChanged {
            direction: SortDirection::Ascending,
            ..
        }]
    ));
    assert_eq!(names(&grid), ["Ann", "Bob", "Cid"]);
}

#[tokio::test]
async fn test_checkbox_clicks() {
    let mut grid = people_grid();
    send(&mut grid, click(1, 3)).await;
    assert_eq!(grid.selection().len(), 1);
    assert_eq!(grid.header_check_state(), CheckState::Indeterminate);

    send(&mut grid, click(1, 2)).await;
    assert_eq!(grid.header_check_state(), CheckState::Checked);

    // The delete action sits at the start of the toolbar.
    let events = send(&mut grid, click(2, 0)).await;
    assert_eq!(events, vec![GridEvent::RowsDeleted { count: 3 }]);
}

#[tokio::test]
async fn test_double_click_edits_and_click_away_commits() {
    let mut grid = people_grid();
    send(&mut grid, click(6, 3)).await;
    assert!(grid.edit_draft().is_none());
    send(&mut grid, click(6, 3)).await;
    assert_eq!(grid.edit_draft().map(|d| d.key.as_str()), Some("name"));

    let events = send(&mut grid, click(22, 3)).await;
    assert_eq!(
        events,
        vec![GridEvent::CellEdited {
            row_index: 0,
            key: "name".into(),
            value: Value::from("Bob"),
        }]
    );
    assert_eq!(grid.cursor(), (0, 1));
}

#[tokio::test]
async fn test_table_keys() {
    let mut grid = people_grid();

    send(&mut grid, key(KeyCode::Char('j'))).await;
    send(&mut grid, key(KeyCode::Char('j'))).await;
    send(&mut grid, key(KeyCode::Char('j'))).await;
    assert_eq!(grid.cursor(), (2, 0));

    let events = send(&mut grid, key(KeyCode::Char('s'))).await;
    assert!(matches!(events[..], [GridEvent::SortChanged { .. }]));

    send(&mut grid, key(KeyCode::Char(' '))).await;
    assert_eq!(grid.selection().len(), 1);

    send(&mut grid, key(KeyCode::Char('a'))).await;
    let delete = Box::new(KeyMsg {
        key: KeyCode::Char('D'),
        modifiers: KeyModifiers::SHIFT,
    });
    let events = send(&mut grid, delete).await;
    assert_eq!(events, vec![GridEvent::RowsDeleted { count: 3 }]);

    // Unbound keys produce no command.
    assert!(grid.update(key(KeyCode::Char('q'))).is_none());
}

#[tokio::test]
async fn test_column_keys() {
    let mut grid = people_grid();
    let events = send(&mut grid, key(KeyCode::Char('2'))).await;
    assert_eq!(
        events,
        vec![GridEvent::ColumnsChanged {
            visible: vec!["name".into(), "status".into()]
        }]
    );

    send(&mut grid, key(KeyCode::Char('>'))).await;
    assert_eq!(grid.layout().width("name"), Some(128));
    for _ in 0..20 {
        send(&mut grid, key(KeyCode::Char('<'))).await;
    }
    assert_eq!(grid.layout().width("name"), Some(60));
}

#[tokio::test]
async fn test_search_keys() {
    let mut grid = people_grid().searchable(true);
    send(&mut grid, key(KeyCode::Char('/'))).await;
    assert_eq!(grid.focus_target(), Focus::Search);

    for c in "ann".chars() {
        send(&mut grid, key(KeyCode::Char(c))).await;
    }
    assert_eq!(grid.search(), "ann");
    assert_eq!(names(&grid), ["Ann"]);

    let events = send(&mut grid, key(KeyCode::Backspace)).await;
    assert_eq!(events, vec![GridEvent::SearchChanged { term: "an".into() }]);

    send(&mut grid, key(KeyCode::Esc)).await;
    assert_eq!(grid.focus_target(), Focus::Table);
}

#[tokio::test]
async fn test_filter_keys_cycle_options() {
    let mut grid = people_grid();
    send(&mut grid, key(KeyCode::Char('f'))).await;
    assert_eq!(grid.focus_target(), Focus::Filter(0));

    send(&mut grid, key(KeyCode::Right)).await;
    assert_eq!(grid.total(), 2);
    send(&mut grid, key(KeyCode::Right)).await;
    assert_eq!(names(&grid), ["Ann"]);
    send(&mut grid, key(KeyCode::Left)).await;
    assert_eq!(grid.total(), 2);
    let events = send(&mut grid, key(KeyCode::Left)).await;
    assert_eq!(
        events,
        vec![GridEvent::FilterChanged {
            key: "status".into(),
            value: Value::Null,
        }]
    );
    assert_eq!(grid.total(), 3);

    send(&mut grid, key(KeyCode::Tab)).await;
    assert_eq!(grid.focus_target(), Focus::Table);
}

#[test]
fn test_remote_mode_uses_host_total() {
    let mut grid = Model::new(columns())
        .unwrap()
        .with_rows(people())
        .with_total(95);
    assert_eq!(grid.total(), 95);
    assert_eq!(grid.paginator().total_pages(), 10);

    // The host filters; the grid only reports.
    grid.set_filter("status", "Expired").unwrap();
    assert_eq!(grid.page_rows().len(), 3);

    grid.take_events();
    grid.next_page();
    assert_eq!(
        grid.take_events(),
        vec![GridEvent::PaginationChanged {
            page: 2,
            page_size: 10
        }]
    );
    assert_eq!(grid.page_rows().len(), 3);
    assert!(strip_ansi(&grid.view()).contains("95 total"));

    grid.set_local();
    assert_eq!(grid.total(), 1);
    assert_eq!(grid.page(), 1);
}

#[test]
fn test_set_rows_resets_state() {
    let mut grid = people_grid().resizable(true);
    grid.toggle_row_at(0).unwrap();
    grid.start_edit_at(1, "name").unwrap();
    grid.begin_resize("age", 0).unwrap();

    grid.set_rows(numbered(4));
    assert!(grid.selection().is_empty());
    assert!(grid.edit_draft().is_none());
    assert!(grid.layout().resizing().is_none());
    assert_eq!(grid.rows().len(), 4);
}

#[test]
fn test_blur_commits_edit() {
    let mut grid = people_grid();
    grid.start_edit_at(0, "name").unwrap();
    grid.set_edit_value("Bo");

    grid.blur();
    assert!(!grid.focused());
    assert_eq!(grid.rows()[0].value("name"), Value::from("Bo"));
    assert!(grid.update(key(KeyCode::Char('j'))).is_none());

    assert!(grid.focus().is_none());
    assert!(grid.focused());
}

#[test]
fn test_contextual_help() {
    let mut grid = people_grid();
    let base = grid.short_help().len();

    grid.toggle_row_at(0).unwrap();
    assert_eq!(grid.short_help().len(), base + 1);

    grid.start_edit_at(0, "name").unwrap();
    let keys: Vec<&str> = grid
        .short_help()
        .iter()
        .map(|b| b.help().key.as_str())
        .collect();
    assert_eq!(keys, ["enter", "esc"]);
    assert!(!grid.full_help().is_empty());
}

#[test]
fn test_view_rows_and_pagination() {
    let grid = people_grid();
    let view = strip_ansi(&grid.view());
    assert!(view.contains("Name"));
    assert!(view.contains("Bob"));
    assert!(view.contains("Ann"));
    assert!(view.contains("Active"));
    assert!(view.contains("3 total"));
    assert!(view.contains("Per page: 10"));
    assert!(view.contains("[1]"));
}

#[test]
fn test_view_empty_state() {
    let grid = Model::<Row>::new(columns())
        .unwrap()
        .with_empty_message("Nothing here");
    let view = strip_ansi(&grid.view());
    assert!(view.contains("Nothing here"));
    assert!(!view.contains("Per page"));
}

#[test]
fn test_view_loading_skeleton() {
    let grid = people_grid().with_loading(true);
    let view = strip_ansi(&grid.view());
    assert!(!view.contains("Bob"));
    let skeleton_lines = view.lines().filter(|l| l.contains(style::SKELETON)).count();
    assert_eq!(skeleton_lines, 10);
}

#[test]
fn test_view_loading_skeleton_follows_visible_columns() {
    let mut grid = people_grid().with_loading(true);
    let cells = |grid: &Model<Row>| {
        let view = strip_ansi(&grid.view());
        let line = view
            .lines()
            .find(|l| l.contains(style::SKELETON))
            .map(str::to_string)
            .unwrap_or_default();
        line.split_whitespace().count()
    };
    let all = grid.layout().visible().len();
    assert_eq!(cells(&grid), all);

    grid.toggle_column("age").unwrap();
    assert_eq!(cells(&grid), all - 1);
}

#[test]
fn test_view_hidden_columns_and_selection() {
    let mut grid = people_grid();
    grid.toggle_column("age").unwrap();
    grid.toggle_row_at(0).unwrap();
    let view = strip_ansi(&grid.view());
    assert!(view.contains("Hidden: Age"));
    assert!(view.contains("[Delete Selected] 1 selected"));
    assert!(view.contains("[-]"));
}

#[test]
fn test_init_builds_empty_grid() {
    let (grid, cmd) = <Model<Row> as BubbleTeaModel>::init();
    assert!(cmd.is_none());
    assert!(grid.columns().is_empty());
    assert!(strip_ansi(&grid.view()).contains(DEFAULT_EMPTY_MESSAGE));
}
