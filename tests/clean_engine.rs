mod common;

use common::text_table;
use proptest::prelude::*;
use sheet_cleaner::clean::{apply, clean};
use sheet_cleaner::data::Value;
use sheet_cleaner::selection::{Operation, OperationSelection};
use sheet_cleaner::table::Table;

#[test]
fn scenario_trims_dedupes_and_normalizes_headers() {
    let table = text_table(
        &["first name", "EMAIL "],
        &[&[" Bob ", "b@x.com"], &["bob", "B@X.COM"], &["", ""]],
    );
    let selection = OperationSelection::only(&[
        Operation::RemoveDuplicates,
        Operation::TrimSpaces,
        Operation::NormalizeColumnNames,
    ]);

    let (cleaned, stats) = clean(table, &selection);

    assert_eq!(cleaned.headers(), ["First Name".to_string(), "Email".to_string()]);
    assert_eq!(cleaned.row_count(), 3, "blank row retained without empty-row removal");
    assert_eq!(
        cleaned.rows()[0],
        vec![Value::text("Bob"), Value::text("b@x.com")]
    );
    assert_eq!(
        cleaned.rows()[1],
        vec![Value::text("bob"), Value::text("B@X.COM")]
    );
    assert!(cleaned.rows()[2].iter().all(Value::is_blank));
    assert_eq!(stats.duplicates_removed, 0);
    assert_eq!(stats.cells_trimmed, 1);
    assert_eq!(stats.columns_renamed, 2);
}

#[test]
fn scenario_with_empty_row_removal_drops_blank_row() {
    let table = text_table(
        &["first name", "EMAIL "],
        &[&[" Bob ", "b@x.com"], &["bob", "B@X.COM"], &["", ""]],
    );
    let selection = OperationSelection::only(&[
        Operation::RemoveDuplicates,
        Operation::RemoveEmptyRows,
        Operation::TrimSpaces,
        Operation::NormalizeColumnNames,
    ]);

    let (cleaned, stats) = clean(table, &selection);

    assert_eq!(cleaned.row_count(), 2);
    assert_eq!(stats.empty_rows_removed, 1);
    assert_eq!(stats.rows_before, 3);
    assert_eq!(stats.rows_after, 2);
}

// Duplicates are detected before trimming, so rows that only differ in
// surrounding whitespace survive step 1 and stay distinct.
#[test]
fn duplicate_check_runs_before_trimming() {
    let table = text_table(&["a"], &[&["x"], &[" x"], &["x"]]);
    let (cleaned, stats) = clean(table, &OperationSelection::all());
    assert_eq!(stats.duplicates_removed, 1);
    assert_eq!(cleaned.row_count(), 2);
    assert_eq!(cleaned.rows()[1][0], Value::text("X"));
}

// Colliding normalized names keep every column via numeric suffixes.
#[test]
fn header_collisions_are_disambiguated() {
    let table = text_table(
        &["order_id", "Order ID", "order-id", "ORDER  ID 2"],
        &[&["1", "2", "3", "4"]],
    );
    let (cleaned, _) = clean(
        table,
        &OperationSelection::only(&[Operation::NormalizeColumnNames]),
    );
    assert_eq!(
        cleaned.headers(),
        [
            "Order Id".to_string(),
            "Order Id 3".to_string(),
            "Order Id 4".to_string(),
            "Order Id 2".to_string()
        ]
    );
}

#[test]
fn title_case_cells_capitalize_after_leading_punctuation() {
    let table = text_table(&["label"], &[&["(new york)"], &["\"quoted text\""], &["'bob' smith"]]);
    let (cleaned, stats) = clean(table, &OperationSelection::only(&[Operation::TitleCaseCells]));
    let labels: Vec<String> = cleaned.column(0).map(Value::as_display).collect();
    assert_eq!(labels, vec!["(New York)", "\"Quoted Text\"", "'Bob' Smith"]);
    assert_eq!(stats.cells_title_cased, 3);
}

#[test]
fn sparse_cells_keep_their_rows_and_columns() {
    let table = text_table(&["keep", "sparse"], &[&["a", ""], &["", "only here"], &["b", ""]]);
    let (cleaned, stats) = clean(
        table,
        &OperationSelection::only(&[Operation::RemoveEmptyRows, Operation::RemoveEmptyColumns]),
    );
    assert_eq!(stats.empty_rows_removed, 0);
    assert_eq!(stats.empty_columns_removed, 0);
    assert_eq!(cleaned.column_count(), 2);
}

#[test]
fn header_only_table_is_left_alone_by_row_and_column_steps() {
    let table = text_table(&["a", "b"], &[]);
    let (cleaned, stats) = clean(
        table.clone(),
        &OperationSelection::only(&[
            Operation::RemoveDuplicates,
            Operation::RemoveEmptyRows,
            Operation::RemoveEmptyColumns,
            Operation::TrimSpaces,
            Operation::TitleCaseCells,
        ]),
    );
    assert_eq!(cleaned, table);
    assert!(stats.is_unchanged());
}

fn cell_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Blank),
        "[ a-cA-C0-2_'\"(-]{0,6}".prop_map(Value::Text),
        (0u8..4).prop_map(|n| Value::Number(f64::from(n))),
        any::<bool>().prop_map(Value::Boolean),
    ]
}

fn table_strategy() -> impl Strategy<Value = Table> {
    (1usize..4, 0usize..8).prop_flat_map(|(columns, rows)| {
        (
            proptest::collection::vec("[ a-cA-C_'\"(-]{0,5}", columns),
            proptest::collection::vec(proptest::collection::vec(cell_strategy(), columns), rows),
        )
            .prop_map(|(names, rows)| {
                let headers = names
                    .into_iter()
                    .enumerate()
                    .map(|(idx, name)| format!("{name}#{idx}"))
                    .collect();
                Table::new(headers, rows).expect("generated table is valid")
            })
    })
}

fn reapplied(table: &Table, op: Operation) -> (Table, Table) {
    let mut once = table.clone();
    apply(&mut once, op);
    let mut twice = once.clone();
    apply(&mut twice, op);
    (once, twice)
}

proptest! {
    #[test]
    fn disabled_selection_is_identity(table in table_strategy()) {
        let (cleaned, stats) = clean(table.clone(), &OperationSelection::none());
        prop_assert_eq!(cleaned, table);
        prop_assert!(stats.is_unchanged());
        prop_assert_eq!(stats.rows_before, stats.rows_after);
        prop_assert_eq!(stats.columns_before, stats.columns_after);
    }

    #[test]
    fn every_step_is_idempotent(table in table_strategy()) {
        for op in Operation::ALL {
            let (once, twice) = reapplied(&table, op);
            prop_assert_eq!(once, twice, "{} is not idempotent", op);
        }
    }

    #[test]
    fn removals_never_grow_the_table(table in table_strategy()) {
        let selection = OperationSelection::only(&[
            Operation::RemoveDuplicates,
            Operation::RemoveEmptyRows,
            Operation::RemoveEmptyColumns,
        ]);
        let (cleaned, stats) = clean(table.clone(), &selection);
        prop_assert!(cleaned.row_count() <= table.row_count());
        prop_assert!(cleaned.column_count() <= table.column_count());
        prop_assert_eq!(
            stats.rows_before - stats.rows_after,
            stats.duplicates_removed + stats.empty_rows_removed
        );
    }

    #[test]
    fn normalized_headers_are_unique(table in table_strategy()) {
        let (cleaned, _) = clean(
            table,
            &OperationSelection::only(&[Operation::NormalizeColumnNames]),
        );
        let mut names = cleaned.headers().to_vec();
        let total = names.len();
        names.sort();
        names.dedup();
        prop_assert_eq!(names.len(), total);
    }

    #[test]
    fn trimmed_tables_have_no_padded_text(table in table_strategy()) {
        let (cleaned, _) = clean(table, &OperationSelection::only(&[Operation::TrimSpaces]));
        for value in cleaned.rows().iter().flatten() {
            if let Some(text) = value.as_text() {
                prop_assert_eq!(text, text.trim());
            }
        }
    }
}
