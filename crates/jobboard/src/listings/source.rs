use std::future::Future;

use super::error::ListingResult;
use super::filter::ListingFilter;
use super::model::{JobPosting, MatchCounts, RoleCount};

/// Largest page a listing query will return.
pub const MAX_LIMIT: i64 = 50;

/// Caps `limit` at [`MAX_LIMIT`]. Zero and negative limits mean "no rows".
pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(0, MAX_LIMIT)
}

/// Read side of the `jobs` table.
///
/// Implementations report failures; deciding what to show instead is the
/// caller's job (see [`ListingService`](super::ListingService)).
pub trait ListingSource: Send + Sync {
    /// Active matches and how many of them count as remote.
    fn count_matching(
        &self,
        filter: &ListingFilter,
    ) -> impl Future<Output = ListingResult<MatchCounts>> + Send;

    /// Newest first, undated postings last, at most `limit` rows.
    fn list_matching(
        &self,
        filter: &ListingFilter,
        limit: i64,
    ) -> impl Future<Output = ListingResult<Vec<JobPosting>>> + Send;

    /// Distinct non-null company names, most recently posting company first.
    fn list_distinct_companies(
        &self,
        filter: &ListingFilter,
        limit: i64,
    ) -> impl Future<Output = ListingResult<Vec<String>>> + Send;

    /// Mean parsed day rate across matches; `None` if no compensation parses.
    fn average_day_rate(
        &self,
        filter: &ListingFilter,
    ) -> impl Future<Output = ListingResult<Option<i64>>> + Send;

    /// Match counts per role category, largest first.
    fn role_breakdown(
        &self,
        filter: &ListingFilter,
    ) -> impl Future<Output = ListingResult<Vec<RoleCount>>> + Send;
}
