//! Derived video metrics.

use chrono::{DateTime, Utc};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Views per elapsed day since publication.
///
/// Elapsed days are floored at one so same-day uploads divide by 1. No
/// smoothing or outlier clamping is applied: a fresh viral upload reports
/// an arbitrarily large velocity.
#[must_use]
pub fn viral_velocity(view_count: u64, published_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    #[allow(clippy::cast_precision_loss)]
    let elapsed_days = ((now - published_at).num_milliseconds() as f64 / MS_PER_DAY).max(1.0);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let velocity = (view_count as f64 / elapsed_days).round() as u64;
    velocity
}

/// Velocity from an RFC 3339 publish timestamp. An unparseable timestamp is
/// treated as published now (elapsed days floored to one).
#[must_use]
pub fn viral_velocity_from_rfc3339(view_count: u64, published_at: &str, now: DateTime<Utc>) -> u64 {
    let published = DateTime::parse_from_rfc3339(published_at)
        .map_or(now, |dt| dt.with_timezone(&Utc));
    viral_velocity(view_count, published, now)
}

/// Formats a count with comma thousands separators: `1234567` -> `"1,234,567"`.
#[must_use]
pub fn format_view_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
