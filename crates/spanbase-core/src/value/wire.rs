//! Text form of sort values inside cursor payloads.
//!
//! The tag travels separately; this module only owns the value half.

use crate::value::{SortValue, SortValueTag};
use chrono::{DateTime, SecondsFormat};
use thiserror::Error as ThisError;

///
/// SortValueParseError
///
/// Value text could not be converted to the type named by its tag.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SortValueParseError {
    #[error("'{text}' is not a valid {tag} value")]
    Malformed { tag: SortValueTag, text: String },

    #[error("NULL sort values carry no payload, found '{text}'")]
    NullWithPayload { text: String },
}

impl SortValueParseError {
    fn malformed(tag: SortValueTag, text: &str) -> Self {
        Self::Malformed {
            tag,
            text: text.to_string(),
        }
    }
}

/// Render a value's wire text.
///
/// FLOAT uses the shortest text that parses back to the same `f64` and always
/// keeps a decimal point or exponent (`296.0`, `1e-7`, `NaN`, `inf`).
#[must_use]
pub fn format(value: &SortValue) -> String {
    match value {
        SortValue::Int(v) => v.to_string(),
        SortValue::Float(v) => format!("{v:?}"),
        SortValue::String(v) => v.clone(),
        SortValue::DateTime(v) => v.to_rfc3339_opts(SecondsFormat::AutoSi, false),
        SortValue::Null => String::new(),
    }
}

/// Parse wire text for the given tag.
pub fn parse(tag: SortValueTag, text: &str) -> Result<SortValue, SortValueParseError> {
    match tag {
        SortValueTag::Int => text
            .parse::<i64>()
            .map(SortValue::Int)
            .map_err(|_| SortValueParseError::malformed(tag, text)),
        SortValueTag::Float => text
            .parse::<f64>()
            .map(SortValue::Float)
            .map_err(|_| SortValueParseError::malformed(tag, text)),
        SortValueTag::String => Ok(SortValue::String(text.to_string())),
        // Years outside 0000..=9999 carry a sign that strict RFC 3339 rejects.
        SortValueTag::DateTime => DateTime::parse_from_rfc3339(text)
            .or_else(|_| DateTime::parse_from_str(text, "%+"))
            .map(SortValue::DateTime)
            .map_err(|_| SortValueParseError::malformed(tag, text)),
        SortValueTag::Null => {
            if text.is_empty() {
                Ok(SortValue::Null)
            } else {
                Err(SortValueParseError::NullWithPayload {
                    text: text.to_string(),
                })
            }
        }
    }
}
