// tabmask-core/tests/masking_properties_tests.rs
use anyhow::Result;
use std::sync::Arc;

use tabmask_core::{
    compile_rules, CellValue, Column, RecognizerRule, Sanitizer, Table,
};

fn contacts_table() -> Result<Table> {
    Ok(Table::from_columns(vec![
        Column::new(
            "name",
            vec!["Jane Doe".into(), "Ann Lee".into(), CellValue::Null],
        ),
        Column::new(
            "contact",
            vec![
                "jane@doe.org".into(),
                "call 555-123-4567".into(),
                "no contact".into(),
            ],
        ),
        Column::new("age", vec![31i64.into(), 44i64.into(), CellValue::Null]),
        Column::new(
            "active",
            vec![true.into(), false.into(), CellValue::Float(0.5)],
        ),
    ])?)
}

#[test]
fn test_mask_table_preserves_shape() -> Result<()> {
    let sanitizer = Sanitizer::builtin()?;
    let table = contacts_table()?;
    let masked = sanitizer.mask_table(&table);

    assert_eq!(masked.column_names(), table.column_names());
    assert_eq!(masked.row_count(), table.row_count());
    assert_eq!(masked.column("age"), table.column("age"));
    assert_eq!(masked.column("active"), table.column("active"));
    assert_eq!(
        masked.column("name").unwrap().values,
        vec![CellValue::from("FULL_NAME"), CellValue::from("FULL_NAME"), CellValue::Null]
    );
    assert_eq!(
        masked.column("contact").unwrap().values,
        vec![
            CellValue::from("EMAIL"),
            CellValue::from("call PHONE_NUMBER"),
            CellValue::from("no contact"),
        ]
    );
    Ok(())
}

#[test]
fn test_mask_table_leaves_input_untouched() -> Result<()> {
    let sanitizer = Sanitizer::builtin()?;
    let table = contacts_table()?;
    let snapshot = table.clone();
    let _ = sanitizer.mask_table(&table);
    assert_eq!(table, snapshot);
    Ok(())
}

#[test]
fn test_column_reordering_is_independent() -> Result<()> {
    let sanitizer = Sanitizer::builtin()?;
    let table = contacts_table()?;
    let mut reversed_columns = table.clone().into_columns();
    reversed_columns.reverse();
    let reversed = Table::from_columns(reversed_columns)?;

    let a = sanitizer.mask_table(&table);
    let b = sanitizer.mask_table(&reversed);
    for name in table.column_names() {
        assert_eq!(a.column(name), b.column(name), "column '{}' differs", name);
    }
    Ok(())
}

#[test]
fn test_empty_and_header_only_tables() -> Result<()> {
    let sanitizer = Sanitizer::builtin()?;
    assert_eq!(sanitizer.mask_table(&Table::empty()), Table::empty());

    let header_only = Table::from_columns(vec![Column::new("a", vec![]), Column::new("b", vec![])])?;
    let masked = sanitizer.mask_table(&header_only);
    assert_eq!(masked, header_only);
    assert!(masked.is_empty());
    Ok(())
}

#[test]
fn test_masking_is_deterministic() -> Result<()> {
    let sanitizer = Sanitizer::builtin()?;
    let table = contacts_table()?;
    let (first, first_summary) = sanitizer.mask_table_with_summary(&table);
    let (second, second_summary) = sanitizer.mask_table_with_summary(&table);
    assert_eq!(first, second);
    assert_eq!(first_summary, second_summary);
    assert_eq!(first, sanitizer.mask_table(&table));
    Ok(())
}

#[test]
fn test_later_recognizers_see_earlier_output() -> Result<()> {
    // The second rule matches text that only exists after the first has run.
    let rules = vec![
        RecognizerRule {
            name: "secret".to_string(),
            label: "TOKEN".to_string(),
            pattern: "secret".to_string(),
            ..Default::default()
        },
        RecognizerRule {
            name: "tok".to_string(),
            label: "X".to_string(),
            pattern: "TOK".to_string(),
            ..Default::default()
        },
    ];
    let sanitizer = Sanitizer::new(Arc::new(compile_rules(rules)?));
    assert_eq!(sanitizer.mask_text("my secret"), "my XEN");
    Ok(())
}

#[test]
fn test_every_name_pair_in_a_run_is_masked() -> Result<()> {
    let sanitizer = Sanitizer::builtin()?;
    let out = sanitizer.mask_text("Alice Bob Carol Dave signed; John Smith Mary Jones witnessed.");
    assert_eq!(out, "FULL_NAME FULL_NAME signed; FULL_NAME FULL_NAME witnessed.");
    assert!(!out.contains("Alice") && !out.contains("Mary"));
    Ok(())
}

#[test]
fn test_pathological_inputs_finish() -> Result<()> {
    let sanitizer = Sanitizer::builtin()?;

    let words = "Ab ".repeat(50_000);
    assert_eq!(sanitizer.mask_text(&words), "FULL_NAME ".repeat(25_000));

    let odd_run = "Ab ".repeat(50_001);
    let expected = format!("Ab {}", "FULL_NAME ".repeat(25_000));
    assert_eq!(sanitizer.mask_text(&odd_run), expected);

    let no_at = "a.".repeat(100_000);
    assert_eq!(sanitizer.mask_text(&no_at), no_at);

    let digits = "1".repeat(100_000);
    assert_eq!(sanitizer.mask_text(&digits), digits);
    Ok(())
}
