use chrono::{DateTime, FixedOffset, Utc};
use sha2::{Digest, Sha256};

pub const RESPONSE_BODY_LIMIT: usize = 300;

pub fn format_time_ago(t: Option<DateTime<FixedOffset>>) -> String {
    format_time_ago_at(t, Utc::now())
}

/// Relative age of `t` as seen at `now`, truncated to the largest whole unit.
/// Timestamps in the future read as "just now".
pub fn format_time_ago_at(t: Option<DateTime<FixedOffset>>, now: DateTime<Utc>) -> String {
    let t = match t {
        Some(t) => t,
        None => return "N/A".to_string(),
    };

    let d = now.with_timezone(t.offset()) - t;

    if d.num_days() > 0 {
        format!("{}d ago", d.num_days())
    } else if d.num_hours() > 0 {
        format!("{}h ago", d.num_hours())
    } else if d.num_minutes() > 0 {
        format!("{}m ago", d.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Parses a Kubernetes timestamp (RFC 3339, `Z` accepted). Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

/// First `RESPONSE_BODY_LIMIT` characters of a response body, whitespace-trimmed.
pub fn truncate_body(body: &str) -> String {
    body.chars()
        .take(RESPONSE_BODY_LIMIT)
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn sha256_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
