use pagetable::{
    CellValue, ClientPagedTable, Column, EMPTY_TEXT, PagedTable, SortIndicator, SortState,
    TableAction, TableBody,
};

#[derive(Debug, Clone, PartialEq)]
struct Firm {
    id: i64,
    name: String,
}

fn firm(id: i64, name: &str) -> Firm {
    Firm {
        id,
        name: name.to_string(),
    }
}

fn columns() -> Vec<Column<Firm>> {
    vec![
        Column::new("id", "#", 4, |f: &Firm| CellValue::Integer(f.id)),
        Column::new("name", "Firma Adı", 20, |f: &Firm| f.name.as_str().into()),
        Column::display("actions", "", 16, |_: &Firm| "[Sil]".to_string()),
    ]
}

fn numbers(n: i64) -> ClientPagedTable<i64> {
    let columns = vec![Column::new("n", "N", 6, |n: &i64| CellValue::Integer(*n))];
    ClientPagedTable::new(columns, (1..=n).collect())
}

#[test]
fn test_default_page_size() {
    let table = numbers(25);
    assert_eq!(table.pagination().page_size, 10);
    assert_eq!(table.page_count(), 3);
    assert_eq!(table.visible_rows(), (1..=10).collect::<Vec<_>>());
}

#[test]
fn test_sort_then_jump_to_last_page() {
    let table = numbers(25);
    table.toggle_sort("n");
    table.set_page_input("4");
    assert_eq!(table.commit_page_input(), Some(2));
    assert_eq!(table.page_input(), "3");
    assert_eq!(table.visible_rows(), vec![21, 22, 23, 24, 25]);

    let view = table.view();
    assert_eq!(view.footer.summary(), "Sayfa: 3 / 3 · Toplam: 25");
    assert!(view.footer.can_previous);
    assert!(!view.footer.can_next);
}

#[test]
fn test_sort_cycle_and_page_reset() {
    let table = numbers(25);
    table.next_page();
    assert_eq!(table.pagination().page_index, 1);

    assert_eq!(table.toggle_sort("n"), Some(SortState::ascending("n")));
    assert_eq!(table.pagination().page_index, 0);
    assert_eq!(table.page_input(), "1");

    assert_eq!(table.toggle_sort("n"), Some(SortState::descending("n")));
    assert_eq!(table.visible_rows(), (16..=25).rev().collect::<Vec<_>>());

    assert_eq!(table.toggle_sort("n"), Some(SortState::none()));
    assert_eq!(table.visible_rows(), (1..=10).collect::<Vec<_>>());
}

#[test]
fn test_unsortable_column_ignored() {
    let table = ClientPagedTable::new(columns(), vec![firm(1, "b"), firm(2, "a")]);
    assert_eq!(table.toggle_sort("actions"), None);
    assert_eq!(table.toggle_sort("missing"), None);
    assert!(table.sort().is_empty());

    let view = table.view();
    let indicators: Vec<_> = view.header.iter().map(|h| h.indicator).collect();
    assert_eq!(
        indicators,
        vec![
            SortIndicator::Unsorted,
            SortIndicator::Unsorted,
            SortIndicator::Unsortable
        ]
    );
}

#[test]
fn test_sort_is_stable() {
    let rows = vec![firm(1, "b"), firm(2, "a"), firm(3, "b"), firm(4, "a")];
    let table = ClientPagedTable::new(columns(), rows);
    table.toggle_sort("name");
    let ids: Vec<i64> = table.visible_rows().iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![2, 4, 1, 3]);

    table.toggle_sort("name");
    let ids: Vec<i64> = table.visible_rows().iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 3, 2, 4]);
}

#[test]
fn test_switching_column_replaces_sort() {
    let table = ClientPagedTable::new(columns(), vec![firm(2, "a"), firm(1, "b")]);
    table.toggle_sort("name");
    table.toggle_sort("name");
    assert_eq!(table.toggle_sort("id"), Some(SortState::ascending("id")));
    let view = table.view();
    assert_eq!(view.header[0].indicator, SortIndicator::Ascending);
    assert_eq!(view.header[1].indicator, SortIndicator::Unsorted);
}

#[test]
fn test_empty_table() {
    let table = ClientPagedTable::new(columns(), Vec::new());
    assert_eq!(table.page_count(), 1);
    assert!(!table.next_page());
    assert!(!table.previous_page());

    let view = table.view();
    assert_eq!(
        view.body,
        TableBody::Empty {
            text: EMPTY_TEXT,
            colspan: 3
        }
    );
    assert_eq!(view.footer.summary(), "Sayfa: 1 / 1 · Toplam: 0");
    assert!(view.lines().iter().any(|l| l.contains("bulunamadı.")));
}

#[test]
fn test_set_rows_reclamps_page() {
    let table = numbers(25);
    table.set_page_index(2);
    assert_eq!(table.page_input(), "3");

    table.set_rows((1..=12).collect());
    assert_eq!(table.pagination().page_index, 1);
    assert_eq!(table.page_input(), "2");
    assert_eq!(table.visible_rows(), vec![11, 12]);
}

#[test]
fn test_retain_removes_rows() {
    let table = ClientPagedTable::new(columns(), vec![firm(1, "a"), firm(2, "b")]);
    table.retain(|f| f.id != 1);
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.visible_rows(), vec![firm(2, "b")]);
}

#[test]
fn test_replace_where_keeps_sort() {
    let table = ClientPagedTable::new(
        columns(),
        vec![firm(1, "b"), firm(2, "c"), firm(3, "d")],
    );
    table.toggle_sort("name");
    table.clear_dirty();

    assert!(table.replace_where(|f| f.id == 3, firm(3, "a")));
    assert!(table.is_dirty());
    assert_eq!(table.row_count(), 3);
    assert_eq!(
        table.visible_rows(),
        vec![firm(3, "a"), firm(1, "b"), firm(2, "c")]
    );

    table.clear_dirty();
    assert!(!table.replace_where(|f| f.id == 9, firm(9, "z")));
    assert!(!table.is_dirty());
    assert_eq!(table.row_count(), 3);
}

#[test]
fn test_invalid_page_input_reverts() {
    let table = numbers(25).with_page_size(5);
    table.next_page();
    table.set_page_input("abc");
    assert_eq!(table.commit_page_input(), None);
    assert_eq!(table.page_input(), "2");
    assert_eq!(table.pagination().page_index, 1);
}

#[test]
fn test_dispatch_and_dirty() {
    let table = numbers(25);
    assert!(!table.is_dirty());
    assert!(table.dispatch(TableAction::NextPage));
    assert!(table.is_dirty());
    table.clear_dirty();

    assert!(table.dispatch(TableAction::EditPageInput("3".into())));
    assert!(table.dispatch(TableAction::CommitPageInput));
    assert_eq!(table.pagination().page_index, 2);
    assert!(!table.dispatch(TableAction::NextPage));
    assert!(!table.dispatch(TableAction::Search("x".into())));
}

#[test]
fn test_clones_share_state() {
    let table = numbers(25);
    let handle = table.clone();
    handle.next_page();
    assert_eq!(table.pagination().page_index, 1);
    assert_eq!(table.id(), handle.id());
}

#[test]
fn test_view_lines_layout() {
    let table = ClientPagedTable::new(columns(), vec![firm(1, "Acme")]);
    let lines = table.view().lines();
    assert!(lines[0].starts_with("# ↕"));
    assert!(lines[2].contains("Acme"));
    assert!(lines.last().unwrap().contains("← Önceki"));
}
