//! JSON preview parsing
//!
//! Previews the first few objects of a JSON array (or newline-delimited JSON)
//! without parsing the whole file. The array variant counts braces to find
//! where the N-th top-level object ends, cuts the text there and closes the
//! array artificially with `]`.

use crate::import::error::{ImportError, ImportResult};
use crate::profile_scope;
use serde_json::Value;

/// Parse the first `num_lines` top-level objects of an array-of-objects text.
///
/// The text is expected to be a prefix of a JSON array whose elements are
/// `{...}` objects. Anything else surfaces as [`ImportError::Json`].
pub fn parse_json_subset(text: &str, num_lines: usize) -> ImportResult<Vec<Value>> {
    profile_scope!("parse_json_subset");

    let cut = subset_end(text, num_lines);
    let mut truncated = String::with_capacity(cut + 1);
    truncated.push_str(&text[..cut]);
    truncated.push(']');

    Ok(serde_json::from_str(&truncated)?)
}

/// Byte index where the preview text is cut.
///
/// Braces are counted without regard to strings; a `{` or `}` inside a string
/// value shifts the count just as it does for any brace-counting reader.
fn subset_end(text: &str, num_lines: usize) -> usize {
    let mut objects = 0;
    let mut open = 0usize;
    let mut close = 0usize;
    let mut cut = 0;
    let mut prev_start = 0;
    let mut chars = text.char_indices().peekable();

    while objects < num_lines {
        let Some((index, ch)) = chars.next() else {
            break;
        };

        // The final character is never consumed; a trailing newline also
        // drops the character before it (normally the closing bracket).
        if chars.peek().is_none() {
            cut = if ch == '\n' { prev_start } else { index };
            break;
        }

        match ch {
            '{' => open += 1,
            '}' => close += 1,
            _ => {}
        }
        prev_start = index;
        cut = index + ch.len_utf8();

        if open == close && open != 0 {
            objects += 1;
            open = 0;
            close = 0;
        }
    }

    cut
}

/// Parse up to `num_lines` documents from newline-delimited JSON.
///
/// Empty lines are skipped. A line that fails to parse aborts with
/// [`ImportError::InvalidNewlineJson`].
pub fn parse_newline_json_subset(text: &str, num_lines: usize) -> ImportResult<Vec<Value>> {
    profile_scope!("parse_newline_json_subset");

    let mut items = Vec::new();
    for line in text.split(['\r', '\n']).filter(|line| !line.is_empty()) {
        if items.len() >= num_lines {
            break;
        }
        let value = serde_json::from_str(line).map_err(|_| ImportError::InvalidNewlineJson {
            line: line.to_string(),
        })?;
        items.push(value);
    }

    Ok(items)
}
