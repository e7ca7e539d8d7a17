use serde::Serialize;

use crate::pages::PagePreset;

#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub path: &'static str,
    pub job_limit: i64,
    pub company_limit: i64,
    pub shows_rate: bool,
}

impl From<&PagePreset> for PageSummary {
    fn from(p: &PagePreset) -> Self {
        Self {
            path: p.path,
            job_limit: p.job_limit,
            company_limit: p.company_limit,
            shows_rate: p.shows_rate(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PagesResponse {
    pub revalidate_secs: u64,
    pub pages: Vec<PageSummary>,
}
