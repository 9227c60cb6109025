//! Delimited text (CSV/TSV) preview parsing
//!
//! A single left-to-right scan that turns uploaded text into a table of
//! string fields. The scan tracks a quoted-field flag and a start-of-row flag
//! (for comment lines) and can stop early once the preview row budget is used.
//!
//! ## Blank rows
//!
//! A row made of a single empty field (two newline sequences in a row) is
//! dropped and does not consume the preview budget. Rows made only of
//! delimiters are not blank and go through the width check like any other.

use crate::constants::{
    BAD_DELIMITERS, DEFAULT_COMMENTS, DEFAULT_DELIMITER, DEFAULT_ESCAPE_CHAR, DEFAULT_QUOTE_CHAR,
};
use crate::import::error::{ImportError, ImportResult};
use crate::profile_scope;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Line break sequence separating rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Newline {
    Lf,
    CrLf,
    Cr,
}

impl Newline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
            Newline::Cr => "\r",
        }
    }

    /// Pick whichever line break occurs first in `text`.
    ///
    /// `\r\n` wins over a bare `\r` at the same position.
    pub fn detect(text: &str) -> Option<Self> {
        [Newline::CrLf, Newline::Cr, Newline::Lf]
            .into_iter()
            .filter_map(|nl| text.find(nl.as_str()).map(|index| (index, nl)))
            .min_by_key(|(index, _)| *index)
            .map(|(_, nl)| nl)
    }
}

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    pub delimiter: char,
    /// `None` autodetects the line break from the text
    pub newline: Option<Newline>,
    pub quote_char: char,
    /// Followed by `quote_char` inside a quoted field, yields a literal quote
    pub escape_char: char,
    /// Rows starting with this prefix are skipped; empty disables comments
    pub comments: String,
    /// Maximum number of data rows to parse; 0 parses everything
    pub preview: usize,
    /// Treat the first row as field names
    pub has_header_row: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            newline: None,
            quote_char: DEFAULT_QUOTE_CHAR,
            escape_char: DEFAULT_ESCAPE_CHAR,
            comments: DEFAULT_COMMENTS.to_string(),
            preview: 0,
            has_header_row: true,
        }
    }
}

impl ParseConfig {
    /// Check the configuration against `text` and resolve the newline to use.
    pub fn validate(&self, text: &str) -> ImportResult<Newline> {
        let newline = match self.newline {
            Some(newline) => newline,
            None => Newline::detect(text).ok_or(ImportError::NoLineBreaks)?,
        };

        if BAD_DELIMITERS.contains(&self.delimiter) || self.delimiter == self.quote_char {
            return Err(ImportError::InvalidDelimiter(self.delimiter));
        }

        let mut buf = [0u8; 4];
        if self.comments == *self.delimiter.encode_utf8(&mut buf) {
            return Err(ImportError::CommentMatchesDelimiter);
        }

        if text.starts_with(newline.as_str()) {
            return Err(ImportError::EmptyFirstLine);
        }

        Ok(newline)
    }

    /// Total rows to accumulate before stopping, counting the header row.
    fn row_limit(&self) -> Option<usize> {
        (self.preview > 0).then(|| self.preview + usize::from(self.has_header_row))
    }
}

/// Result of a successful parse
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedTable {
    /// Raw rows of fields (no header row)
    Rows(Vec<Vec<String>>),
    /// One mapping per data row, keyed by header cell
    Records(Vec<BTreeMap<String, String>>),
}

impl ParsedTable {
    /// Number of data rows
    pub fn len(&self) -> usize {
        match self {
            ParsedTable::Rows(rows) => rows.len(),
            ParsedTable::Records(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> Option<&[Vec<String>]> {
        match self {
            ParsedTable::Rows(rows) => Some(rows),
            ParsedTable::Records(_) => None,
        }
    }

    pub fn records(&self) -> Option<&[BTreeMap<String, String>]> {
        match self {
            ParsedTable::Records(records) => Some(records),
            ParsedTable::Rows(_) => None,
        }
    }
}

/// Parse delimited text, reporting failures through `on_error`.
///
/// `on_error` runs at most once; when it runs the function returns `None`
/// and no partial table is produced.
pub fn parse_csv<F>(text: &str, config: &ParseConfig, on_error: F) -> Option<ParsedTable>
where
    F: FnOnce(&ImportError),
{
    match try_parse_csv(text, config) {
        Ok(table) => Some(table),
        Err(err) => {
            tracing::debug!(error = %err, "CSV preview rejected");
            on_error(&err);
            None
        }
    }
}

/// Parse delimited text into a [`ParsedTable`].
pub fn try_parse_csv(text: &str, config: &ParseConfig) -> ImportResult<ParsedTable> {
    profile_scope!("try_parse_csv");

    let newline = config.validate(text)?;
    let rows = scan_rows(text, config, newline.as_str())?;

    if config.has_header_row {
        Ok(ParsedTable::Records(apply_header(rows)))
    } else {
        Ok(ParsedTable::Rows(rows))
    }
}

/// Accumulates fields and rows during the scan
struct RowBuilder {
    rows: Vec<Vec<String>>,
    current: Vec<String>,
    expected_fields: Option<usize>,
    limit: Option<usize>,
}

impl RowBuilder {
    fn new(limit: Option<usize>) -> Self {
        Self {
            rows: Vec::new(),
            current: vec![String::new()],
            expected_fields: None,
            limit,
        }
    }

    fn push_char(&mut self, ch: char) {
        if let Some(field) = self.current.last_mut() {
            field.push(ch);
        }
    }

    fn next_field(&mut self) {
        self.current.push(String::new());
    }

    /// Close the current row. Returns true once the row limit is reached.
    fn close_row(&mut self) -> ImportResult<bool> {
        let row = std::mem::replace(&mut self.current, vec![String::new()]);
        if is_blank(&row) {
            return Ok(false);
        }

        let expected = *self.expected_fields.get_or_insert(row.len());
        if row.len() != expected {
            return Err(ImportError::InconsistentFieldCount {
                row: self.rows.len(),
                expected,
                found: row.len(),
            });
        }

        self.rows.push(row);
        Ok(self.limit.is_some_and(|limit| self.rows.len() >= limit))
    }
}

fn is_blank(row: &[String]) -> bool {
    matches!(row, [only] if only.is_empty())
}

fn scan_rows(text: &str, config: &ParseConfig, newline: &str) -> ImportResult<Vec<Vec<String>>> {
    let mut builder = RowBuilder::new(config.row_limit());
    let comments = config.comments.as_str();
    let quote_len = config.quote_char.len_utf8();

    let mut in_quote = false;
    let mut row_start = true;
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if row_start && !comments.is_empty() && rest.starts_with(comments) {
            pos = match rest.find(newline) {
                Some(index) => pos + index + newline.len(),
                None => text.len(),
            };
            continue;
        }
        row_start = false;

        let Some(ch) = rest.chars().next() else {
            break;
        };
        let next = pos + ch.len_utf8();

        if in_quote && ch == config.escape_char && text[next..].starts_with(config.quote_char) {
            builder.push_char(config.quote_char);
            pos = next + quote_len;
            continue;
        }

        if ch == config.quote_char {
            in_quote = !in_quote;
            pos = next;
            continue;
        }

        if !in_quote && ch == config.delimiter {
            builder.next_field();
            pos = next;
            continue;
        }

        if !in_quote && rest.starts_with(newline) {
            pos += newline.len();
            row_start = true;
            if builder.close_row()? {
                tracing::trace!(rows = builder.rows.len(), "CSV preview limit reached");
                return Ok(builder.rows);
            }
            continue;
        }

        builder.push_char(ch);
        pos = next;
    }

    if in_quote {
        return Err(ImportError::UnterminatedQuote);
    }

    builder.close_row()?;
    Ok(builder.rows)
}

/// Turn the first row into keys for every following row.
///
/// Duplicate header names overwrite earlier values in the same record.
fn apply_header(rows: Vec<Vec<String>>) -> Vec<BTreeMap<String, String>> {
    let mut rows = rows.into_iter();
    let Some(headers) = rows.next() else {
        return Vec::new();
    };

    rows.map(|row| headers.iter().cloned().zip(row).collect())
        .collect()
}

/// Serialize rows back into delimited text using `config`.
///
/// Fields containing the delimiter, the quote character, a line break or a
/// leading comment prefix are quoted.
pub fn write_csv(rows: &[Vec<String>], config: &ParseConfig) -> String {
    let newline = config.newline.unwrap_or(Newline::Lf).as_str();
    let delimiter = config.delimiter.to_string();

    rows.iter()
        .map(|row| {
            row.iter()
                .map(|field| quote_field(field, config))
                .collect::<Vec<_>>()
                .join(&delimiter)
        })
        .collect::<Vec<_>>()
        .join(newline)
}

fn quote_field(value: &str, config: &ParseConfig) -> String {
    let needs_quoting = value.contains(config.delimiter)
        || value.contains(config.quote_char)
        || value.contains('\n')
        || value.contains('\r')
        || (!config.comments.is_empty() && value.starts_with(config.comments.as_str()));

    if !needs_quoting {
        return value.to_string();
    }

    let mut escaped_quote = String::new();
    escaped_quote.push(config.escape_char);
    escaped_quote.push(config.quote_char);
    let escaped = value.replace(config.quote_char, &escaped_quote);

    format!("{q}{escaped}{q}", q = config.quote_char)
}
