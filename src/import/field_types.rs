//! Column type inference for previewed tables
//!
//! Each value is classified on its own, then the per-column set of types is
//! merged into the best common type. Missing values never influence the
//! result.

use crate::constants::NULL_LIKE_VALUES;
use crate::import::csv_parser::ParsedTable;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static MM_DD_YYYY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0?[1-9]|1[012])/(0?[1-9]|[12][0-9]|3[01])/([0-9]{4})$")
        .expect("date pattern MM/DD/YYYY: invalid regex")
});

static YYYY_MM_DD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{4}-[01][0-9]-[0-3][0-9]").expect("date pattern YYYY-MM-DD: invalid regex")
});

static ISO_DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{4})-([01][0-9])-([0-3][0-9])( |T)?([0-2][0-9]):?([0-5][0-9]):?([0-9]{2})(\.([0-9]{3,6})|([-+]?[0-9]{2}:[0-9]{2}))?Z?$",
    )
    .expect("ISO datetime pattern: invalid regex")
});

/// Inferred type of a column
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Long,
    Double,
    Boolean,
    Date,
    Array(Box<FieldType>),
}

/// Classification of a single value; `None` element types mean "empty array".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum ValueType {
    Null,
    Scalar(FieldType),
    Array(Option<Box<ValueType>>),
}

/// Parse a number the way spreadsheets print them.
///
/// Accepts plain numbers, thousands separators (`1,105.20`), a leading `$`,
/// and a trailing `%` (which divides by 100).
pub fn parse_double(value: &str) -> Option<f64> {
    if let Some(parsed) = parse_grouped(value) {
        return Some(parsed);
    }
    if let Some(dollars) = value.strip_prefix('$').and_then(parse_grouped) {
        return Some(dollars);
    }
    value
        .strip_suffix('%')
        .and_then(parse_grouped)
        .map(|percent| percent / 100.0)
}

fn parse_grouped(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = trimmed.parse::<f64>() {
        return parsed.is_finite().then_some(parsed);
    }

    // Commas are only allowed every three digits left of the decimal point
    let decimal = trimmed.find('.').unwrap_or(trimmed.len());
    let mut digits = trimmed.to_string();
    let mut index = decimal as isize - 4;
    while index > 0 {
        let at = index as usize;
        if digits.as_bytes().get(at) != Some(&b',') {
            return None;
        }
        digits.remove(at);
        index -= 4;
    }

    digits
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

fn is_date(value: &str) -> bool {
    MM_DD_YYYY.is_match(value) || YYYY_MM_DD.is_match(value) || ISO_DATETIME.is_match(value)
}

fn classify(value: &str) -> ValueType {
    if NULL_LIKE_VALUES.contains(&value) {
        return ValueType::Null;
    }

    match serde_json::from_str::<Value>(value) {
        Ok(Value::Bool(_)) => return ValueType::Scalar(FieldType::Boolean),
        Ok(Value::Array(items)) => return classify_array(&items),
        _ => {}
    }

    if parse_double(value).is_some() {
        if value.contains('.') {
            return ValueType::Scalar(FieldType::Double);
        }
        return ValueType::Scalar(FieldType::Long);
    }

    if is_date(value) {
        return ValueType::Scalar(FieldType::Date);
    }

    ValueType::Scalar(FieldType::Text)
}

fn classify_array(items: &[Value]) -> ValueType {
    let Some(first) = items.first() else {
        return ValueType::Array(None);
    };

    let consistent = items
        .iter()
        .all(|item| std::mem::discriminant(item) == std::mem::discriminant(first));
    if !consistent {
        return ValueType::Scalar(FieldType::Text);
    }

    let inner = match first {
        Value::String(s) => classify(s),
        other => classify(&other.to_string()),
    };
    ValueType::Array(Some(Box::new(inner)))
}

/// Merge a set of value types; `None` means the mix is not representable.
fn best_type(types: BTreeSet<ValueType>) -> Option<FieldType> {
    let types: BTreeSet<ValueType> = types
        .into_iter()
        .filter(|t| *t != ValueType::Null)
        .collect();

    if types.is_empty() {
        return Some(FieldType::Text);
    }

    let array_count = types
        .iter()
        .filter(|t| matches!(t, ValueType::Array(_)))
        .count();
    if array_count > 0 {
        if array_count != types.len() {
            return None;
        }
        let inner: BTreeSet<ValueType> = types
            .into_iter()
            .map(|t| match t {
                ValueType::Array(Some(inner)) => *inner,
                _ => ValueType::Null,
            })
            .collect();
        return Some(match best_type(inner) {
            Some(inner) => FieldType::Array(Box::new(inner)),
            None => FieldType::Text,
        });
    }

    let scalars: BTreeSet<&FieldType> = types
        .iter()
        .filter_map(|t| match t {
            ValueType::Scalar(scalar) => Some(scalar),
            _ => None,
        })
        .collect();

    if scalars.len() == 1 {
        return scalars.into_iter().next().cloned();
    }
    if scalars
        .iter()
        .all(|t| matches!(t, FieldType::Long | FieldType::Double))
    {
        return Some(FieldType::Double);
    }

    Some(FieldType::Text)
}

/// Best type for a column of raw string values.
pub fn infer_field_type<'a, I>(values: I) -> FieldType
where
    I: IntoIterator<Item = &'a str>,
{
    let types: BTreeSet<ValueType> = values.into_iter().map(classify).collect();
    best_type(types).unwrap_or(FieldType::Text)
}

/// Infer a type for every column of a previewed table.
///
/// Header-less tables name columns by position (`"0"`, `"1"`, ...).
pub fn infer_table_types(table: &ParsedTable) -> Vec<(String, FieldType)> {
    match table {
        ParsedTable::Rows(rows) => {
            let width = rows.first().map_or(0, Vec::len);
            (0..width)
                .map(|col| {
                    let values = rows.iter().filter_map(|row| row.get(col).map(String::as_str));
                    (col.to_string(), infer_field_type(values))
                })
                .collect()
        }
        ParsedTable::Records(records) => {
            let names: BTreeSet<&String> = records.iter().flat_map(|r| r.keys()).collect();
            names
                .into_iter()
                .map(|name| {
                    let values = records
                        .iter()
                        .filter_map(|record| record.get(name).map(String::as_str));
                    (name.clone(), infer_field_type(values))
                })
                .collect()
        }
    }
}
