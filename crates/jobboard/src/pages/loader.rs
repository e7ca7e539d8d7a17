use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::catalog::PagePreset;
use crate::listings::service::or_fallback;
use crate::listings::{
    ListingResult, ListingService, ListingSource, ListingStats, MatchCounts, PageData,
};

impl<S: ListingSource> ListingService<S> {
    /// Everything a landing page needs, fetched as one concurrent batch.
    ///
    /// Each query falls back on its own: a failed company lookup still leaves
    /// live counts and jobs on the page.
    pub async fn load_page(&self, preset: &PagePreset) -> PageData {
        let filter = &preset.filter;
        let degraded = AtomicBool::new(false);

        let stats = async {
            let counts = async {
                // floors lift live totals only
                let res = self
                    .try_count_matching(filter)
                    .await
                    .map(|live| MatchCounts {
                        total: preset
                            .count_floor
                            .map_or(live.total, |floor| live.total.max(floor)),
                        ..live
                    });
                settle(&degraded, "count_matching", res, preset.fallback.counts())
            };
            let rate = async {
                let fallback = preset.fallback.avg_day_rate?;
                let res = self.try_average_day_rate(filter).await;
                // no parseable compensation is not a failure, but the page
                // still needs a number
                Some(settle(&degraded, "average_day_rate", res, None).unwrap_or(fallback))
            };
            let (counts, avg_day_rate) = tokio::join!(counts, rate);

            ListingStats {
                total: counts.total,
                remote_count: counts.remote_count,
                avg_day_rate,
            }
        };

        let companies = async {
            if preset.company_limit == 0 {
                return Vec::new();
            }
            let res = self
                .try_list_distinct_companies(filter, preset.company_limit)
                .await;
            settle(&degraded, "list_distinct_companies", res, Vec::new())
        };

        let jobs = async {
            let res = self.try_list_matching(filter, preset.job_limit).await;
            settle(&degraded, "list_matching", res, Vec::new())
        };

        let role_breakdown = async {
            if !preset.role_breakdown {
                return Vec::new();
            }
            let res = self.try_role_breakdown(filter).await;
            settle(&degraded, "role_breakdown", res, Vec::new())
        };

        let (stats, companies, jobs, role_breakdown) =
            tokio::join!(stats, companies, jobs, role_breakdown);

        PageData {
            path: preset.path.to_string(),
            stats,
            companies,
            jobs,
            role_breakdown,
            degraded: degraded.load(Ordering::Relaxed),
            generated_at: Utc::now(),
        }
    }
}

fn settle<T>(degraded: &AtomicBool, op: &'static str, res: ListingResult<T>, fallback: T) -> T {
    if res.is_err() {
        degraded.store(true, Ordering::Relaxed);
    }
    or_fallback(op, res, fallback)
}
