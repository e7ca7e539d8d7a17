use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::listings::{
    clamp_limit, is_new, JobPosting, ListingFilter, ListingService, ListingsRepo, MatchCounts,
    PageData,
};
use crate::pages::{self, PageCache};

pub mod models;

use models::{PageSummary, PagesResponse};

#[derive(Clone)]
pub struct ApiState {
    pub listings: ListingService<ListingsRepo>,
    pub pages: Arc<PageCache>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        // Landing pages
        .route("/pages", get(list_pages))
        .route("/pages/*path", get(get_page))
        // Ad-hoc search
        .route("/jobs", get(search_jobs))
        // Health
        .route("/health", get(health))
        .with_state(state)
}

pub async fn list_pages(State(state): State<ApiState>) -> Json<PagesResponse> {
    Json(PagesResponse {
        revalidate_secs: state.pages.revalidate_interval().as_secs(),
        pages: pages::catalog().iter().map(PageSummary::from).collect(),
    })
}

/// Known paths always render; data-source trouble only shows up as fallback
/// values and `degraded: true`.
pub async fn get_page(
    State(state): State<ApiState>,
    Path(path): Path<String>,
) -> Result<Json<PageData>, (StatusCode, String)> {
    let Some(preset) = pages::find(&path) else {
        return Err((StatusCode::NOT_FOUND, format!("unknown page: {path}")));
    };

    let page = state
        .pages
        .get_or_load(preset.path, || state.listings.load_page(preset))
        .await;

    Ok(Json(PageData::clone(&page)))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub location: Option<String>,
    pub remote: Option<bool>,
    pub limit: Option<i64>,
}

impl SearchQuery {
    pub fn to_filter(&self) -> ListingFilter {
        let mut filter = ListingFilter::all();
        if let Some(category) = non_blank(&self.category) {
            filter = filter.category(category);
        }
        if let Some(q) = non_blank(&self.q) {
            filter = filter.search(q);
        }
        if let Some(location) = non_blank(&self.location) {
            filter = filter.location(location);
        }
        if self.remote.unwrap_or(false) {
            filter = filter.remote_only();
        }
        filter
    }
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub items: Vec<JobPosting>,
    /// Every active match, not just the returned page.
    pub total: i64,
    pub new_count: usize,
    pub now_utc: DateTime<Utc>,
}

pub async fn search_jobs(
    State(state): State<ApiState>,
    Query(q): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let filter = q.to_filter();
    let limit = clamp_limit(q.limit.unwrap_or(20));
    let (items, counts) = tokio::join!(
        state.listings.list_matching(&filter, limit),
        state.listings.count_matching(&filter, MatchCounts::default()),
    );

    let now_utc = Utc::now();
    let new_count = items
        .iter()
        .filter(|j| is_new(j.posted_date, now_utc))
        .count();

    Json(SearchResponse {
        total: counts.total,
        new_count,
        items,
        now_utc,
    })
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
