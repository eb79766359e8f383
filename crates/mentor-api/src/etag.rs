//! ETag computation for the current study plan.
//!
//! The tag is a SHA-256 hash over the plan's canonical JSON encoding. Plan
//! metadata is a sorted map, so equal plans always hash equally.

use axum::http::{HeaderMap, header};
use mentor_core::plan::StudyPlan;
use sha2::{Digest, Sha256};

/// Compute a quoted strong ETag for `plan`.
pub fn compute_etag(plan: &StudyPlan) -> Result<String, serde_json::Error> {
  let bytes = serde_json::to_vec(plan)?;
  let hash = Sha256::digest(&bytes);
  Ok(format!("\"{}\"", hex::encode(hash)))
}

/// Whether an `If-None-Match` header already names `etag`.
///
/// Accepts a comma-separated list, `*`, weak tags and bare (unquoted) tags.
pub fn if_none_match(headers: &HeaderMap, etag: &str) -> bool {
  let Some(value) = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
  else {
    return false;
  };
  let wanted = etag.trim_matches('"');
  value.split(',').map(str::trim).any(|candidate| {
    candidate == "*"
      || candidate.trim_start_matches("W/").trim_matches('"') == wanted
  })
}
