use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the externally managed `jobs` table, as the listing pages see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
    pub id: Uuid,
    pub slug: String,

    pub title: String,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub description_snippet: Option<String>,

    pub role_category: Option<String>,
    pub skills_required: Option<Vec<String>>,

    pub compensation: Option<String>,

    pub is_remote: bool,
    pub workplace_type: Option<String>,

    pub posted_date: Option<DateTime<Utc>>,
    pub hours_per_week: Option<String>,

    pub is_active: bool,
}

impl JobPosting {
    /// Remote in the sense the summary counts use.
    pub fn counts_as_remote(&self) -> bool {
        self.is_remote || self.workplace_type.as_deref() == Some("Remote")
    }
}

/// Column list shared by every listing query.
pub(crate) const POSTING_COLUMNS: &str = "id, slug, title, company_name, location, \
     description_snippet, role_category, skills_required, compensation, is_remote, \
     workplace_type, posted_date, hours_per_week, is_active";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCounts {
    pub total: i64,
    pub remote_count: i64,
}

impl MatchCounts {
    pub const fn new(total: i64, remote_count: i64) -> Self {
        Self {
            total,
            remote_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RoleCount {
    pub role_category: String,
    pub count: i64,
}

/// Headline numbers for a landing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingStats {
    pub total: i64,
    pub remote_count: i64,
    pub avg_day_rate: Option<i64>,
}

impl ListingStats {
    pub const fn new(total: i64, remote_count: i64) -> Self {
        Self {
            total,
            remote_count,
            avg_day_rate: None,
        }
    }

    pub const fn with_rate(mut self, avg_day_rate: i64) -> Self {
        self.avg_day_rate = Some(avg_day_rate);
        self
    }

    pub fn counts(&self) -> MatchCounts {
        MatchCounts::new(self.total, self.remote_count)
    }
}

/// Everything one landing page renders from the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageData {
    pub path: String,
    pub stats: ListingStats,
    pub companies: Vec<String>,
    pub jobs: Vec<JobPosting>,
    pub role_breakdown: Vec<RoleCount>,
    /// At least one value on the page is a fallback rather than live data.
    pub degraded: bool,
    pub generated_at: DateTime<Utc>,
}
