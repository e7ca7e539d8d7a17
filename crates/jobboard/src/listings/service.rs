use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::error::{ListingError, ListingResult};
use super::filter::ListingFilter;
use super::model::{JobPosting, MatchCounts, RoleCount};
use super::source::ListingSource;

/// Request-facing wrapper around a [`ListingSource`].
///
/// Every call is bounded by `query_timeout`. The `try_*` methods hand back the
/// typed error; the plain methods never fail and substitute the caller's
/// fallback instead, logging what went wrong.
#[derive(Clone)]
pub struct ListingService<S> {
    source: S,
    query_timeout: Duration,
}

impl<S: ListingSource> ListingService<S> {
    pub fn new(source: S, query_timeout: Duration) -> Self {
        Self {
            source,
            query_timeout,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    pub async fn try_count_matching(&self, filter: &ListingFilter) -> ListingResult<MatchCounts> {
        self.bounded("count_matching", self.source.count_matching(filter))
            .await
    }

    pub async fn try_list_matching(
        &self,
        filter: &ListingFilter,
        limit: i64,
    ) -> ListingResult<Vec<JobPosting>> {
        self.bounded("list_matching", self.source.list_matching(filter, limit))
            .await
    }

    pub async fn try_list_distinct_companies(
        &self,
        filter: &ListingFilter,
        limit: i64,
    ) -> ListingResult<Vec<String>> {
        self.bounded(
            "list_distinct_companies",
            self.source.list_distinct_companies(filter, limit),
        )
        .await
    }

    pub async fn try_average_day_rate(&self, filter: &ListingFilter) -> ListingResult<Option<i64>> {
        self.bounded("average_day_rate", self.source.average_day_rate(filter))
            .await
    }

    pub async fn try_role_breakdown(&self, filter: &ListingFilter) -> ListingResult<Vec<RoleCount>> {
        self.bounded("role_breakdown", self.source.role_breakdown(filter))
            .await
    }

    /// Counts for `filter`, or `fallback` if the source is unavailable.
    pub async fn count_matching(&self, filter: &ListingFilter, fallback: MatchCounts) -> MatchCounts {
        or_fallback("count_matching", self.try_count_matching(filter).await, fallback)
    }

    /// Up to `limit` postings; empty if the source is unavailable.
    pub async fn list_matching(&self, filter: &ListingFilter, limit: i64) -> Vec<JobPosting> {
        or_fallback(
            "list_matching",
            self.try_list_matching(filter, limit).await,
            Vec::new(),
        )
    }

    pub async fn list_distinct_companies(&self, filter: &ListingFilter, limit: i64) -> Vec<String> {
        or_fallback(
            "list_distinct_companies",
            self.try_list_distinct_companies(filter, limit).await,
            Vec::new(),
        )
    }

    /// Parsed mean day rate. A source with no parseable rates yields `fallback`
    /// too, since the page always shows a number.
    pub async fn average_day_rate(&self, filter: &ListingFilter, fallback: i64) -> i64 {
        or_fallback(
            "average_day_rate",
            self.try_average_day_rate(filter).await,
            None,
        )
        .unwrap_or(fallback)
    }

    pub async fn role_breakdown(&self, filter: &ListingFilter) -> Vec<RoleCount> {
        or_fallback(
            "role_breakdown",
            self.try_role_breakdown(filter).await,
            Vec::new(),
        )
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = ListingResult<T>>,
    ) -> ListingResult<T> {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(ListingError::Timeout {
                op,
                after: self.query_timeout,
            }),
        }
    }
}

pub(crate) fn or_fallback<T>(op: &'static str, res: ListingResult<T>, fallback: T) -> T {
    match res {
        Ok(v) => v,
        Err(e) => {
            warn!(op, error = %e, "listing query failed; serving fallback");
            fallback
        }
    }
}
