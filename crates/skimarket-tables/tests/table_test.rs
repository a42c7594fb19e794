
use fixtures::*;
use rstest::*;
use serde_json::{Value, json};
use skimarket_tables::{
	CellValue, Column, DataTable, Filter, FilterValue, PageItem, RowId, SelectionState, SortState,
	TableEvent, TableQuery, TableSettings,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Records every event as a short string
fn record_events(table: &mut DataTable<Value>) -> Rc<RefCell<Vec<String>>> {
	let log = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&log);
	table.subscribe(move |event: &TableEvent<'_, Value>| {
		let entry = match event {
			TableEvent::RowActivated(row) => format!("activated:{}", row["id"]),
			TableEvent::SelectionChanged(rows) => format!(
				"selection:{}",
				rows.iter()
					.map(|row| row["id"].to_string())
					.collect::<Vec<_>>()
					.join(",")
			),
			TableEvent::PageChanged(page) => format!("page:{}", page),
			TableEvent::SortChanged(sort) => {
				format!("sort:{}", sort.to_query().unwrap_or_default())
			}
		};
		sink.borrow_mut().push(entry);
	});
	log
}

#[rstest]
fn test_create_empty_table() {
	let table: DataTable<Value> = DataTable::default();
	let view = table.view();
	assert!(view.rows.is_empty());
	assert_eq!(view.total, 0);
	assert_eq!(view.total_pages, 1);
	assert_eq!(view.start_index, 0);
	assert_eq!(view.end_index, 0);
	assert_eq!(view.page_numbers, vec![PageItem::Page(1)]);
	assert_eq!(view.selection, SelectionState::None);
}

#[rstest]
fn test_twenty_three_rows_in_pages_of_ten(mut table_23: DataTable<Value>) {
	let view = table_23.view();
	assert_eq!(view.total, 23);
	assert_eq!(view.total_pages, 3);
	assert_eq!(ids(&view.rows), (1..=10).collect::<Vec<_>>());

	assert!(table_23.go_to_page(3));
	let view = table_23.view();
	assert_eq!(ids(&view.rows), vec![21, 22, 23]);
	assert_eq!(view.start_index, 21);
	assert_eq!(view.end_index, 23);
	assert_eq!(view.total, 23);
	assert!(!view.has_next);
	assert!(view.has_previous);
}

#[rstest]
#[case(0)]
#[case(4)]
fn test_out_of_range_page_is_noop(mut table_23: DataTable<Value>, #[case] page: usize) {
	table_23.go_to_page(2);
	let log = record_events(&mut table_23);
	assert!(!table_23.go_to_page(page));
	assert_eq!(table_23.view().page, 2);
	assert!(log.borrow().is_empty());
}

#[rstest]
fn test_page_size_change_resets_to_first_page(mut table_100: DataTable<Value>) {
	table_100.go_to_page(5);
	let log = record_events(&mut table_100);
	table_100.set_page_size(50);
	let view = table_100.view();
	assert_eq!(view.page, 1);
	assert_eq!(view.total_pages, 2);
	assert_eq!(*log.borrow(), vec!["page:1"]);
}

#[rstest]
#[case(1, vec![PageItem::Page(1), PageItem::Page(2), PageItem::Page(3), PageItem::Page(4), PageItem::Page(5), PageItem::Ellipsis, PageItem::Page(10)])]
#[case(5, vec![PageItem::Page(1), PageItem::Ellipsis, PageItem::Page(4), PageItem::Page(5), PageItem::Page(6), PageItem::Ellipsis, PageItem::Page(10)])]
#[case(10, vec![PageItem::Page(1), PageItem::Ellipsis, PageItem::Page(6), PageItem::Page(7), PageItem::Page(8), PageItem::Page(9), PageItem::Page(10)])]
fn test_page_strip(
	mut table_100: DataTable<Value>,
	#[case] page: usize,
	#[case] expected: Vec<PageItem>,
) {
	table_100.go_to_page(page);
	assert_eq!(table_100.view().page_numbers, expected);
}

#[rstest]
fn test_next_and_previous_page(mut table_23: DataTable<Value>) {
	assert!(!table_23.previous_page());
	assert!(table_23.next_page());
	assert!(table_23.next_page());
	assert!(!table_23.next_page());
	assert_eq!(table_23.view().page, 3);
	assert!(table_23.previous_page());
	assert_eq!(table_23.view().page, 2);
}

#[rstest]
fn test_filter_change_returns_to_first_page(mut table_100: DataTable<Value>) {
	table_100.go_to_page(4);
	let log = record_events(&mut table_100);
	table_100.set_filter("status", "cancelled");
	let view = table_100.view();
	assert_eq!(view.page, 1);
	assert_eq!(view.total, 33);
	assert!(view.rows.iter().all(|row| row["status"] == "cancelled"));
	assert_eq!(*log.borrow(), vec!["page:1"]);

	table_100.set_filter("status", "all");
	assert_eq!(table_100.view().total, 100);
}

#[test]
fn test_search_for_all_is_a_substring_match() {
	let mut table = DataTable::new(TableSettings::default())
		.with_filters(vec![
			Filter::search("q", "Search", ["name"]),
			Filter::select("station", "Station"),
		])
		.with_rows(vec![
			json!({"id": 1, "name": "Chalet All Seasons", "station": "Tignes"}),
			json!({"id": 2, "name": "Refuge du Lac", "station": "Annecy"}),
		]);

	assert!(table.set_search("alla"));
	assert_eq!(table.view().total, 0);

	table.set_search("All");
	table.set_filter("station", "all");
	assert_eq!(ids(&table.filtered_rows()), vec![1]);
	assert_eq!(
		table.to_query().to_query_string().unwrap(),
		"page=1&page_size=10&q=All"
	);
}

#[rstest]
fn test_search_and_date_range(mut table_100: DataTable<Value>) {
	assert!(table_100.set_search("guest 01"));
	assert_eq!(
		ids(&table_100.filtered_rows()),
		(10..=19).collect::<Vec<_>>()
	);

	table_100.set_filter(
		"check_in",
		FilterValue::range(Some(CellValue::from("2025-01-15")), None),
	);
	// check_in day is (id - 1) % 28 + 1
	assert_eq!(ids(&table_100.filtered_rows()), vec![15, 16, 17, 18, 19]);

	table_100.clear_filter("q");
	table_100.clear_filter("check_in");
	assert_eq!(table_100.view().total, 100);
}

#[rstest]
fn test_search_without_search_filter_is_ignored() {
	let mut table = DataTable::new(TableSettings::default()).with_rows(numbered_bookings(5));
	assert!(!table.set_search("guest"));
	assert_eq!(table.view().total, 5);
}

#[rstest]
fn test_values_for_undeclared_filters_are_ignored(mut table_23: DataTable<Value>) {
	table_23.set_filter("altitude", "2000");
	assert_eq!(table_23.view().total, 23);
}

#[rstest]
fn test_sort_cycle_returns_to_filtered_order(mut table_23: DataTable<Value>) {
	table_23.set_filter("status", "confirmed");
	let original = ids(&table_23.filtered_rows());

	table_23.toggle_sort("total_price");
	assert_eq!(table_23.sort(), &SortState::ascending("total_price"));
	assert_eq!(ids(&table_23.filtered_rows()), original);

	table_23.toggle_sort("total_price");
	let mut reversed = original.clone();
	reversed.reverse();
	assert_eq!(ids(&table_23.filtered_rows()), reversed);

	table_23.toggle_sort("total_price");
	assert_eq!(table_23.sort(), &SortState::Unsorted);
	assert_eq!(ids(&table_23.filtered_rows()), original);
}

#[rstest]
fn test_sort_is_stable_on_ties(mut table_23: DataTable<Value>) {
	table_23.toggle_sort("status");
	let rows = table_23.filtered_rows();
	let cancelled: Vec<i64> = ids(&rows[..7]);
	let confirmed: Vec<i64> = ids(&rows[7..]);
	assert_eq!(cancelled, vec![3, 6, 9, 12, 15, 18, 21]);
	assert!(confirmed.windows(2).all(|pair| pair[0] < pair[1]));
}

#[rstest]
fn test_sort_change_keeps_page_and_emits_event(mut table_23: DataTable<Value>) {
	table_23.go_to_page(2);
	let log = record_events(&mut table_23);
	table_23.toggle_sort("guest");
	table_23.toggle_sort("guest");
	table_23.toggle_sort("guest");
	assert_eq!(table_23.view().page, 2);
	assert_eq!(*log.borrow(), vec!["sort:guest", "sort:-guest", "sort:"]);
	assert!(!table_23.toggle_sort("actions"));
	assert_eq!(log.borrow().len(), 3);
}

#[rstest]
fn test_select_all_covers_filtered_rows_only() {
	// 7 is invertible mod 100, so exactly 37 ids land below the threshold
	let rows: Vec<Value> = (1..=100)
		.map(|id: i64| {
			let station = if (id * 7) % 100 < 37 { "Tignes" } else { "Zermatt" };
			json!({"id": id, "station": station})
		})
		.collect();
	let mut table = DataTable::new(TableSettings::default())
		.with_filters(vec![Filter::select("station", "Station")])
		.with_rows(rows);

	table.set_filter("station", "Tignes");
	assert_eq!(table.view().total, 37);
	assert_eq!(table.view().rows.len(), 10);

	table.toggle_all();
	assert_eq!(table.selection().len(), 37);
	assert_eq!(table.selection_state(), SelectionState::All);
	assert!(table.selected_rows().iter().all(|row| row["station"] == "Tignes"));

	table.clear_filters();
	assert_eq!(table.selection_state(), SelectionState::Partial);

	table.set_filter("station", "Tignes");
	table.toggle_all();
	assert!(table.selection().is_empty());
}

#[rstest]
fn test_selection_survives_filter_sort_and_paging(mut table_23: DataTable<Value>) {
	table_23.toggle_row(&RowId::from(2));
	table_23.toggle_row(&RowId::from(21));
	table_23.set_filter("status", "cancelled");
	table_23.toggle_sort("id");
	table_23.go_to_page(1);
	table_23.clear_filters();
	table_23.go_to_page(3);
	assert!(table_23.is_selected(&RowId::from(2)));
	assert!(table_23.is_selected(&RowId::from(21)));
	assert_eq!(ids(&table_23.selected_rows()), vec![2, 21]);
}

#[rstest]
fn test_toggle_unknown_row_is_ignored(mut table_23: DataTable<Value>) {
	assert!(!table_23.toggle_row(&RowId::from(999)));
	assert!(table_23.selection().is_empty());
}

#[rstest]
fn test_selection_changed_carries_full_rows(mut table_23: DataTable<Value>) {
	let log = record_events(&mut table_23);
	table_23.toggle_row(&RowId::from(5));
	table_23.toggle_row(&RowId::from(1));
	table_23.clear_selection();
	table_23.clear_selection();
	assert_eq!(
		*log.borrow(),
		vec!["selection:5", "selection:1,5", "selection:"]
	);
}

#[rstest]
fn test_removing_rows_prunes_selection(mut table_23: DataTable<Value>) {
	table_23.toggle_row(&RowId::from(4));
	table_23.toggle_row(&RowId::from(8));
	let log = record_events(&mut table_23);

	let removed = table_23.remove_row(&RowId::from(4));
	assert_eq!(removed.map(|row| row["id"].clone()), Some(json!(4)));
	assert_eq!(ids(&table_23.selected_rows()), vec![8]);
	assert_eq!(*log.borrow(), vec!["selection:8"]);

	assert_eq!(table_23.retain_rows(|row| row["id"] != 8), 1);
	assert!(table_23.selection().is_empty());
	assert_eq!(table_23.view().total, 21);
	assert!(table_23.remove_row(&RowId::from(4)).is_none());
}

#[rstest]
fn test_replacing_rows_clamps_page_and_prunes_selection(mut table_100: DataTable<Value>) {
	table_100.go_to_page(9);
	table_100.toggle_row(&RowId::from(90));
	table_100.toggle_row(&RowId::from(3));
	let log = record_events(&mut table_100);

	table_100.set_rows(numbered_bookings(25));
	assert_eq!(table_100.view().page, 3);
	assert_eq!(*log.borrow(), vec!["page:3", "selection:3"]);
}

#[rstest]
fn test_push_row(mut table_23: DataTable<Value>) {
	table_23.push_row(json!({"id": 24, "guest": "Late Guest", "status": "confirmed"}));
	assert_eq!(table_23.view().total, 24);
	assert_eq!(table_23.view().total_pages, 3);
}

#[rstest]
fn test_activate_row(mut table_23: DataTable<Value>) {
	let log = record_events(&mut table_23);
	assert!(table_23.activate_row(&RowId::from(7)));
	assert!(!table_23.activate_row(&RowId::from(70)));
	assert_eq!(*log.borrow(), vec!["activated:7"]);
}

#[rstest]
fn test_unsubscribe(mut table_23: DataTable<Value>) {
	let hits = Rc::new(RefCell::new(0));
	let counter = Rc::clone(&hits);
	let id = table_23.subscribe(move |_: &TableEvent<'_, Value>| *counter.borrow_mut() += 1);
	table_23.go_to_page(2);
	assert!(table_23.unsubscribe(id));
	table_23.go_to_page(3);
	assert_eq!(*hits.borrow(), 1);
}

#[rstest]
fn test_apply_query(mut table_100: DataTable<Value>) {
	let log = record_events(&mut table_100);
	let query = TableQuery::parse("status=confirmed&sort=-total_price&page_size=20&page=2&q=guest").unwrap();
	table_100.apply_query(&query);

	let view = table_100.view();
	assert_eq!(view.total, 67);
	assert_eq!(view.page_size, 20);
	assert_eq!(view.page, 2);
	assert_eq!(view.sort, &SortState::descending("total_price"));
	assert_eq!(view.rows[0]["id"], 70);
	assert_eq!(*log.borrow(), vec!["page:2", "sort:-total_price"]);

	let snapshot = table_100.to_query();
	assert_eq!(
		snapshot.to_query_string().unwrap(),
		"page=2&page_size=20&sort=-total_price&q=guest&status=confirmed"
	);
}

#[rstest]
fn test_apply_query_clamps_bad_values(mut table_23: DataTable<Value>) {
	let query = TableQuery::parse("page=9&page_size=-3&sort=altitude").unwrap();
	table_23.apply_query(&query);
	let view = table_23.view();
	assert_eq!(view.page, 1);
	assert_eq!(view.page_size, 10);
	assert_eq!(view.sort, &SortState::Unsorted);
}

#[rstest]
fn test_typed_records(sample_lodgings: Vec<TestLodging>) {
	let mut table = DataTable::new(TableSettings::default().with_page_size(2))
		.with_columns(vec![
			Column::new("name", "Name"),
			Column::new("price", "Price"),
			Column::new("available_from", "Available from"),
		])
		.with_filters(vec![Filter::select("station", "Station")])
		.with_rows(sample_lodgings);

	table.toggle_sort("price");
	let names: Vec<String> = table.view().rows.iter().map(|l| l.name.clone()).collect();
	assert_eq!(names, vec!["Refuge Gaspard", "Hôtel du Lac"]);

	table.set_sort(SortState::descending("available_from"));
	assert_eq!(table.view().rows[0].id, 3);

	table.set_filter("station", "Zermatt");
	table.toggle_all();
	let selected: Vec<i64> = table.selected_rows().iter().map(|l| l.id).collect();
	assert_eq!(selected, vec![1, 3]);
}

#[rstest]
fn test_custom_identity_field() {
	let rows = vec![
		json!({"reference": "PAY-1", "amount": 10}),
		json!({"reference": "PAY-2", "amount": 20}),
	];
	let mut table = DataTable::new(TableSettings::default().with_identity_field("reference"))
		.with_rows(rows);
	assert!(table.toggle_row(&RowId::from("PAY-2")));
	assert_eq!(table.selected_rows()[0]["amount"], 20);
}
