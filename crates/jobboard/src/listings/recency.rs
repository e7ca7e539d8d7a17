use chrono::{DateTime, Utc};

/// Postings this many days old (or newer) get the "New" badge.
pub const NEW_BADGE_MAX_DAYS: i64 = 3;

/// Whole days between `ts` and `now`, in either direction.
pub fn days_since(ts: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
    let ts = ts?;
    Some((now - ts).num_days().abs())
}

pub fn is_new(ts: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    days_since(ts, now).is_some_and(|d| d <= NEW_BADGE_MAX_DAYS)
}
