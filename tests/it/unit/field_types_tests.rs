//! Unit tests for column type inference.

use panelgrid::import::{FieldType, ParseConfig, infer_field_type, infer_table_types, parse_double, try_parse_csv};

#[test]
fn test_numbers() {
    assert_eq!(infer_field_type(["1", "2", "-3"]), FieldType::Long);
    assert_eq!(infer_field_type(["1", "2.5"]), FieldType::Double);
    assert_eq!(infer_field_type(["$1,200.50", "12%"]), FieldType::Double);
    assert_eq!(parse_double("12%"), Some(0.12));
    assert_eq!(parse_double("1,2,3"), None);
}

#[test]
fn test_nulls_are_ignored() {
    assert_eq!(infer_field_type(["", "null", "7", "undefined"]), FieldType::Long);
    assert_eq!(infer_field_type(["", "null"]), FieldType::Text);
}

#[test]
fn test_booleans_and_dates() {
    assert_eq!(infer_field_type(["true", "false"]), FieldType::Boolean);
    assert_eq!(infer_field_type(["01/31/2020", "2020-02-01"]), FieldType::Date);
}

#[test]
fn test_mixed_values_fall_back_to_text() {
    assert_eq!(infer_field_type(["1", "true"]), FieldType::Text);
    assert_eq!(infer_field_type(["[1, 2]", "3"]), FieldType::Text);
}

#[test]
fn test_arrays() {
    assert_eq!(
        infer_field_type(["[1, 2]", "[3]", "[]"]),
        FieldType::Array(Box::new(FieldType::Long))
    );
}

#[test]
fn test_table_columns() {
    let table = try_parse_csv(
        "name,age,joined\nada,36,2020-01-01\ngrace,,1999-12-31\n",
        &ParseConfig::default(),
    )
    .unwrap();

    let types = infer_table_types(&table);
    assert_eq!(
        types,
        vec![
            ("age".to_string(), FieldType::Long),
            ("joined".to_string(), FieldType::Date),
            ("name".to_string(), FieldType::Text),
        ]
    );
}
