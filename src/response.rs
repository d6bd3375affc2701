//! Normalization of raw engine responses into commit message candidates.
//!
//! Engines are instructed to return a bare JSON array of strings, but real
//! responses regularly arrive wrapped in prose ("Here you go: [...] Hope this
//! helps!"). A strict parse of the whole blob runs first; on failure the
//! substring between the first `[` and the last `]` gets a second attempt.

use serde_json::Value;

use crate::error::{Result, SuggestError};

/// Upper bound on candidates surfaced to the picker.
pub const MAX_CANDIDATES: usize = 10;

/// Extract a bounded, cleaned candidate list from a raw engine response.
///
/// Fails with [`SuggestError::MalformedResponse`] when no JSON array can be
/// recovered, and with [`SuggestError::EmptyResponse`] when the array holds
/// nothing but blanks.
pub fn extract_candidates(raw: &str) -> Result<Vec<String>> {
   let value = parse_array_value(raw)?;

   let Value::Array(items) = value else {
      return Err(SuggestError::MalformedResponse { raw: raw.to_string() });
   };

   let mut cleaned: Vec<String> = items
      .iter()
      .map(|item| element_text(item).trim().to_string())
      .filter(|candidate| !candidate.is_empty())
      .collect();

   if cleaned.is_empty() {
      return Err(SuggestError::EmptyResponse);
   }

   cleaned.truncate(MAX_CANDIDATES);
   Ok(cleaned)
}

/// Strict parse first, bracket-extraction fallback second.
fn parse_array_value(raw: &str) -> Result<Value> {
   if let Ok(value) = serde_json::from_str(raw) {
      return Ok(value);
   }

   let (Some(start), Some(end)) = (raw.find('['), raw.rfind(']')) else {
      return Err(SuggestError::MalformedResponse { raw: raw.to_string() });
   };
   if end <= start {
      return Err(SuggestError::MalformedResponse { raw: raw.to_string() });
   }

   serde_json::from_str(&raw[start..=end])
      .map_err(|_| SuggestError::MalformedResponse { raw: raw.to_string() })
}

/// Strings are used as-is; every other element keeps its JSON rendering.
fn element_text(value: &Value) -> String {
   match value {
      Value::String(s) => s.clone(),
      other => other.to_string(),
   }
}
