//! Formatting normalizer
//!
//! Canonicalizes serialized config text into one deterministic, line-stable
//! shape. All line-position reasoning in the crate (change location, comment
//! offsets, reassembly) assumes text has passed through [`fix_formatting`].

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

/// Matches a line break between a key's colon and the opening bracket/brace
static DANGLING_BRACKET: Lazy<Regex> = Lazy::new(|| Regex::new(r":\s*\n\s*([\[{])").unwrap());

/// Matches a `"key": []` occurrence that fits on a single line
static EMPTY_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([ \t]*)("[^\[\n"]+": )\[[\t ]*\](,?)"#).unwrap());

/// Matches a `"key": {}` occurrence that fits on a single line
static EMPTY_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([ \t]*)("[^{\n"]+": )\{[\t ]*\}(,?)"#).unwrap());

/// Indentation used for all serialized output, project-wide.
pub const INDENT: &str = "    ";

/// Normalize serialized config text into the canonical line layout.
///
/// Two rewrites, in order:
/// 1. collapse a newline between a key's colon and a following `[`/`{`
///    onto one line;
/// 2. split `"key": []` / `"key": {}` onto two lines so every container
///    occupies at least two lines, empty or not.
///
/// Idempotent: applying it twice never changes the output again.
pub fn fix_formatting(text: &str) -> String {
    let text = DANGLING_BRACKET.replace_all(text, ": ${1}");
    let text = EMPTY_ARRAY.replace_all(&text, "${1}${2}[\n${1}]${3}");
    let text = EMPTY_OBJECT.replace_all(&text, "${1}${2}{\n${1}}${3}");
    text.into_owned()
}

/// Serialize a value with the canonical 4-space indentation and normalize it.
pub fn to_formatted_string(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT.as_bytes());
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(|e| Error::Serialize {
        message: e.to_string(),
    })?;
    let text = String::from_utf8(buf).map_err(|e| Error::Serialize {
        message: e.to_string(),
    })?;
    Ok(fix_formatting(&text))
}

/// Serialize a value into its canonical line sequence.
pub fn formatted_lines(value: &Value) -> Result<Vec<String>> {
    Ok(to_formatted_string(value)?
        .split('\n')
        .map(str::to_owned)
        .collect())
}
