//! JSON documents on disk.
//!
//! Every tool loads one document, works on it in memory, and writes it back.
//! Saving goes through `serde_json::Value`, whose object map is key-sorted, and
//! a fixed 4-space indent, so re-saving an unmodified document is a no-op diff.

use crate::error::DbError;
use regex::{Captures, Regex};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const INDENT: &[u8] = b"    ";

/// Accepted input syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Plain JSON.
    #[default]
    Strict,
    /// JSON with `//` line comments.
    Commented,
}

fn line_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)("(?:[^"\\\n]|\\.)*")|//.*$"#).expect("line comment regex must compile")
    })
}

/// Strip `//` comments line by line.
///
/// String literals are matched first and kept whole, so `//` inside a value
/// (`"http://..."`, `"a // b"`) is never treated as a comment.
pub fn strip_line_comments(text: &str) -> String {
    line_comment_re()
        .replace_all(text, |caps: &Captures<'_>| {
            caps.get(1).map_or(String::new(), |quoted| quoted.as_str().to_string())
        })
        .into_owned()
}

/// Parse document text. `label` names the source in error messages.
pub fn parse_document<T>(text: &str, dialect: Dialect, label: &str) -> Result<T, DbError>
where
    T: DeserializeOwned,
{
    let parsed = match dialect {
        Dialect::Strict => serde_json::from_str::<T>(text),
        Dialect::Commented => serde_json::from_str::<T>(&strip_line_comments(text)),
    };
    parsed.map_err(|e| DbError::Parse {
        path: label.to_string(),
        message: e.to_string(),
    })
}

/// Read and parse a document from `path`.
pub fn load_document<T>(path: impl AsRef<Path>, dialect: Dialect) -> Result<T, DbError>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| DbError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_document(&text, dialect, &path.display().to_string())
}

/// Render a document with sorted keys, 4-space indent and a trailing newline.
pub fn to_pretty_string<T>(document: &T) -> Result<String, DbError>
where
    T: Serialize,
{
    let value =
        serde_json::to_value(document).map_err(|e| DbError::Serialize(e.to_string()))?;
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut serializer)
        .map_err(|e| DbError::Serialize(e.to_string()))?;
    let mut text = String::from_utf8(out).map_err(|e| DbError::Serialize(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

/// Write a document to `path`, creating parent directories as needed.
pub fn save_document<T>(path: impl AsRef<Path>, document: &T) -> Result<(), DbError>
where
    T: Serialize,
{
    let path = path.as_ref();
    let text = to_pretty_string(document)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| DbError::Io {
            path: parent.display().to_string(),
            message: e.to_string(),
        })?;
    }
    fs::write(path, text).map_err(|e| DbError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), "saved document");
    Ok(())
}
