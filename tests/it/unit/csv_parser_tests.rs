//! Unit tests for delimited text parsing.

use panelgrid::import::{ImportError, Newline, ParseConfig, ParsedTable, parse_csv, try_parse_csv, write_csv};
use std::cell::Cell;

fn no_header() -> ParseConfig {
    ParseConfig {
        has_header_row: false,
        ..Default::default()
    }
}

fn rows(table: &ParsedTable) -> Vec<Vec<&str>> {
    table
        .rows()
        .unwrap_or_default()
        .iter()
        .map(|row| row.iter().map(String::as_str).collect())
        .collect()
}

#[test]
fn test_header_row_becomes_keys() {
    let table = try_parse_csv("a,b\n1,2\n3,4", &ParseConfig::default()).unwrap();
    let records = table.records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["a"], "1");
    assert_eq!(records[1]["b"], "4");
}

#[test]
fn test_quoted_fields_keep_delimiters_and_newlines() {
    let table = try_parse_csv("x,\"a,b\",\"two\nlines\"\ny,z,w", &no_header()).unwrap();
    assert_eq!(
        rows(&table),
        vec![vec!["x", "a,b", "two\nlines"], vec!["y", "z", "w"]]
    );
}

#[test]
fn test_doubled_quote_is_literal() {
    let table = try_parse_csv("\"say \"\"hi\"\"\",b\nc,d", &no_header()).unwrap();
    assert_eq!(rows(&table)[0], vec!["say \"hi\"", "b"]);
}

#[test]
fn test_comment_rows_skipped() {
    let text = "# exported 2024\na,b\n# midway note\n1,2\n";
    let table = try_parse_csv(text, &no_header()).unwrap();
    assert_eq!(rows(&table), vec![vec!["a", "b"], vec!["1", "2"]]);
}

#[test]
fn test_blank_rows_dropped() {
    let table = try_parse_csv("a,b\n\n1,2\n\n", &no_header()).unwrap();
    assert_eq!(table.len(), 2);
}

#[test]
fn test_preview_limits_rows() {
    let text = "h1,h2\n1,2\n3,4\n5,6\n7,8";
    let config = ParseConfig {
        preview: 2,
        ..Default::default()
    };
    let table = try_parse_csv(text, &config).unwrap();
    // header plus two data rows
    assert_eq!(table.len(), 2);

    let config = ParseConfig {
        preview: 2,
        ..no_header()
    };
    assert_eq!(try_parse_csv(text, &config).unwrap().len(), 2);
}

#[test]
fn test_preview_stops_before_bad_rows() {
    let text = "a,b\n1,2\nbroken\n";
    let config = ParseConfig {
        preview: 1,
        ..no_header()
    };
    assert!(try_parse_csv(text, &config).is_ok());
    assert!(try_parse_csv(text, &no_header()).is_err());
}

#[test]
fn test_inconsistent_width_reports_once() {
    let calls = Cell::new(0);
    let mut message = String::new();
    let result = parse_csv("a,b\n1,2,3\n4\n", &no_header(), |err| {
        calls.set(calls.get() + 1);
        message = err.to_string();
    });

    assert!(result.is_none());
    assert_eq!(calls.get(), 1);
    assert!(message.contains("each row must have the same number of fields"));
}

#[test]
fn test_configuration_errors() {
    assert!(matches!(
        try_parse_csv("a,b", &no_header()),
        Err(ImportError::NoLineBreaks)
    ));

    let tab_newline = ParseConfig {
        delimiter: '\n',
        ..no_header()
    };
    assert!(matches!(
        try_parse_csv("a\nb\n", &tab_newline),
        Err(ImportError::InvalidDelimiter('\n'))
    ));

    let comment_is_delimiter = ParseConfig {
        delimiter: ';',
        comments: ";".to_string(),
        ..no_header()
    };
    assert!(matches!(
        try_parse_csv("a;b\nc;d", &comment_is_delimiter),
        Err(ImportError::CommentMatchesDelimiter)
    ));

    assert!(matches!(
        try_parse_csv("\na,b\n", &no_header()),
        Err(ImportError::EmptyFirstLine)
    ));

    assert!(matches!(
        try_parse_csv("a,\"b\nc,d", &no_header()),
        Err(ImportError::UnterminatedQuote)
    ));
}

#[test]
fn test_explicit_newline_skips_detection() {
    let config = ParseConfig {
        newline: Some(Newline::CrLf),
        ..no_header()
    };
    let table = try_parse_csv("a,b", &config).unwrap();
    assert_eq!(rows(&table), vec![vec!["a", "b"]]);

    let table = try_parse_csv("a,b\r\nc,d\r\n", &no_header()).unwrap();
    assert_eq!(rows(&table), vec![vec!["a", "b"], vec!["c", "d"]]);
}

#[test]
fn test_custom_delimiter_and_quote() {
    let config = ParseConfig {
        delimiter: '\t',
        quote_char: '\'',
        escape_char: '\'',
        ..no_header()
    };
    let table = try_parse_csv("'a\tb'\tc\nd\te", &config).unwrap();
    assert_eq!(rows(&table), vec![vec!["a\tb", "c"], vec!["d", "e"]]);
}

#[test]
fn test_written_text_parses_back() {
    let original = vec![
        vec!["name".to_string(), "note".to_string()],
        vec!["ada".to_string(), "said \"hi\", then left".to_string()],
    ];
    let text = write_csv(&original, &no_header());
    let parsed = try_parse_csv(&text, &no_header()).unwrap();
    assert_eq!(parsed, ParsedTable::Rows(original));
}
