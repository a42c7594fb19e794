//! Property-based tests for the filter, sort and pagination stages
//!
//! Uses proptest to verify:
//! 1. Filtering returns an ordered subset, and no filter is the identity
//! 2. Sorting is idempotent and stable
//! 3. Cycling a column's sort returns to the filtered order
//! 4. Pagination keeps the page in range and the page strip well formed

use proptest::prelude::*;
use serde_json::{Value, json};
use skimarket_tables::{
	Column, DataTable, Filter, FilterChain, FilterValues, PageItem, Pagination, RowId, Selection,
	SelectionState, SortState, TableSettings, filter_indices, filter_rows, sort_rows,
};

const STATUSES: [&str; 3] = ["confirmed", "pending", "cancelled"];

fn rows_strategy() -> impl Strategy<Value = Vec<Value>> {
	prop::collection::vec((0..STATUSES.len(), 0i64..20, "[a-z]{0,6}"), 0..60).prop_map(|specs| {
		specs
			.into_iter()
			.enumerate()
			.map(|(index, (status, price, guest))| {
				json!({
					"id": index as i64 + 1,
					"status": STATUSES[status],
					"price": price,
					"guest": guest,
				})
			})
			.collect()
	})
}

fn filters() -> Vec<Filter> {
	vec![
		Filter::search("q", "Search", ["guest"]),
		Filter::select("status", "Status"),
	]
}

fn ids(rows: &[&Value]) -> Vec<i64> {
	rows.iter()
		.map(|row| row["id"].as_i64().unwrap_or_default())
		.collect()
}

// ============================================================================
// Filtering
// ============================================================================

proptest! {
	#![proptest_config(ProptestConfig::with_cases(100))]

	/// Property: the filtered rows are an order-preserving subset of the input
	#[test]
	fn test_filter_is_ordered_subset(
		rows in rows_strategy(),
		status in prop::sample::select(vec!["confirmed", "pending", "cancelled", "all", ""]),
		needle in "[a-z]{0,2}",
	) {
		let filters = filters();
		let values = FilterValues::new().with("status", status).with("q", needle);
		let chain = FilterChain::new(&filters, &values);

		let indices = filter_indices(&rows, &chain);
		prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
		prop_assert!(indices.iter().all(|&index| index < rows.len()));
		for &index in &indices {
			prop_assert!(chain.matches(&rows[index]));
		}
		for (index, row) in rows.iter().enumerate() {
			if !indices.contains(&index) {
				prop_assert!(!chain.matches(row));
			}
		}
	}

	/// Property: no active filter keeps every row
	#[test]
	fn test_empty_filter_is_identity(rows in rows_strategy()) {
		let filters = filters();
		let values = FilterValues::new().with("status", "all").with("q", "  ");
		let chain = FilterChain::new(&filters, &values);
		prop_assert!(chain.is_identity());
		let kept = filter_rows(&rows, &chain);
		let all: Vec<&Value> = rows.iter().collect();
		prop_assert_eq!(kept, all);
	}
}

// ============================================================================
// Sorting
// ============================================================================

proptest! {
	#![proptest_config(ProptestConfig::with_cases(100))]

	/// Property: sorting a sorted sequence again changes nothing
	#[test]
	fn test_sort_is_idempotent(
		rows in rows_strategy(),
		key in prop::sample::select(vec!["price", "status", "guest", "id"]),
		descending in any::<bool>(),
	) {
		let sort = if descending { SortState::descending(key) } else { SortState::ascending(key) };
		let refs: Vec<&Value> = rows.iter().collect();
		let once = sort_rows(&refs, &sort);
		let twice = sort_rows(&once, &sort);
		prop_assert_eq!(ids(&once), ids(&twice));
	}

	/// Property: rows with equal keys keep their input order in both directions
	#[test]
	fn test_sort_is_stable(rows in rows_strategy(), descending in any::<bool>()) {
		let sort = if descending { SortState::descending("price") } else { SortState::ascending("price") };
		let refs: Vec<&Value> = rows.iter().collect();
		let sorted = sort_rows(&refs, &sort);
		prop_assert_eq!(sorted.len(), rows.len());
		for pair in sorted.windows(2) {
			let (a, b) = (&pair[0], &pair[1]);
			if a["price"] == b["price"] {
				prop_assert!(a["id"].as_i64() < b["id"].as_i64());
			} else if descending {
				prop_assert!(a["price"].as_i64() > b["price"].as_i64());
			} else {
				prop_assert!(a["price"].as_i64() < b["price"].as_i64());
			}
		}
	}

	/// Property: ascending, descending, off returns to the filtered order
	#[test]
	fn test_sort_cycle_restores_order(
		rows in rows_strategy(),
		status in prop::sample::select(vec!["confirmed", "pending", "all"]),
	) {
		let mut table = DataTable::new(TableSettings::default())
			.with_columns(vec![Column::new("price", "Price"), Column::new("status", "Status")])
			.with_filters(filters())
			.with_rows(rows);
		table.set_filter("status", status);
		let original = ids(&table.filtered_rows());

		table.toggle_sort("price");
		table.toggle_sort("price");
		prop_assert_eq!(table.sort(), &SortState::descending("price"));
		table.toggle_sort("price");
		prop_assert_eq!(ids(&table.filtered_rows()), original);
	}
}

// ============================================================================
// Pagination and selection
// ============================================================================

proptest! {
	#![proptest_config(ProptestConfig::with_cases(200))]

	/// Property: the page stays in range and the strip always shows the
	/// first, current and last pages
	#[test]
	fn test_pagination_invariants(
		total in 0usize..500,
		page_size in 0usize..40,
		target in 0usize..60,
	) {
		let mut pagination = Pagination::new(page_size);
		pagination.set_total(total);
		pagination.go_to(target);

		let total_pages = pagination.total_pages();
		prop_assert!(total_pages >= 1);
		prop_assert!((1..=total_pages).contains(&pagination.page()));
		prop_assert!(pagination.range().len() <= pagination.page_size());

		let strip = pagination.page_numbers();
		prop_assert!(strip.len() <= 7);
		prop_assert_eq!(strip.first(), Some(&PageItem::Page(1)));
		prop_assert_eq!(strip.last(), Some(&PageItem::Page(total_pages)));
		prop_assert!(strip.contains(&PageItem::Page(pagination.page())));
		prop_assert!(strip.windows(2).all(|pair| pair != [PageItem::Ellipsis, PageItem::Ellipsis]));
	}

	/// Property: select-all selects exactly the scope, and a second click clears it
	#[test]
	fn test_toggle_all_selects_exactly_scope(
		preselected in prop::collection::btree_set(0i64..50, 0..10),
		scope in prop::collection::btree_set(0i64..50, 0..30),
	) {
		let already_all = !scope.is_empty() && scope.is_subset(&preselected);
		let scope: Vec<RowId> = scope.into_iter().map(RowId::Int).collect();
		let mut selection = Selection::new();
		for id in preselected {
			selection.select(RowId::Int(id));
		}

		selection.toggle_all(&scope);
		if scope.is_empty() || already_all {
			prop_assert!(selection.is_empty());
		} else {
			prop_assert_eq!(selection.iter().cloned().collect::<Vec<_>>(), scope.clone());
			prop_assert_eq!(selection.state(&scope), SelectionState::All);
			selection.toggle_all(&scope);
			prop_assert!(selection.is_empty());
		}
	}
}
