//! Role / location predicates for listing queries.
//!
//! A [`ListingFilter`] is built once per page and rendered into a parameterised
//! `WHERE` clause. The same filter can be evaluated against an in-memory
//! [`JobPosting`], which keeps test fakes honest about the SQL semantics.

use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};

use super::model::JobPosting;

/// Text column a keyword is matched against (case-insensitive substring).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchField {
    Title,
    CompanyName,
    DescriptionSnippet,
    RoleCategory,
}

impl MatchField {
    pub fn column(&self) -> &'static str {
        match self {
            MatchField::Title => "title",
            MatchField::CompanyName => "company_name",
            MatchField::DescriptionSnippet => "description_snippet",
            MatchField::RoleCategory => "role_category",
        }
    }

    fn value<'a>(&self, job: &'a JobPosting) -> Option<&'a str> {
        match self {
            MatchField::Title => Some(job.title.as_str()),
            MatchField::CompanyName => job.company_name.as_deref(),
            MatchField::DescriptionSnippet => job.description_snippet.as_deref(),
            MatchField::RoleCategory => job.role_category.as_deref(),
        }
    }
}

/// Work-arrangement restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    /// `is_remote = true OR workplace_type = 'Remote'`
    Remote,
    /// Remote, or `workplace_type = 'Hybrid'`.
    RemoteOrHybrid,
}

impl Arrangement {
    fn sql(&self) -> &'static str {
        match self {
            Arrangement::Remote => "(is_remote = true OR workplace_type = 'Remote')",
            Arrangement::RemoteOrHybrid => {
                "(is_remote = true OR workplace_type = 'Remote' OR workplace_type = 'Hybrid')"
            }
        }
    }

    pub fn admits(&self, job: &JobPosting) -> bool {
        match self {
            Arrangement::Remote => job.counts_as_remote(),
            Arrangement::RemoteOrHybrid => {
                job.counts_as_remote() || job.workplace_type.as_deref() == Some("Hybrid")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub field: MatchField,
    pub text: String,
}

/// `(category OR any keyword) AND (any location) AND search AND arrangement`,
/// always restricted to active postings. Empty groups impose no restriction.
///
/// `search` is free text that must appear in the title or the company name.
///
/// A `*` inside keyword or location text matches any run of characters, so
/// `"project*manager"` also finds "Project Delivery Manager".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    pub category: Option<String>,
    pub keywords: Vec<Keyword>,
    pub locations: Vec<String>,
    pub search: Option<String>,
    pub arrangement: Option<Arrangement>,
}

impl ListingFilter {
    /// Every active posting.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_category(category: impl Into<String>) -> Self {
        Self::all().category(category)
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn keyword(mut self, field: MatchField, text: impl Into<String>) -> Self {
        self.keywords.push(Keyword {
            field,
            text: text.into(),
        });
        self
    }

    pub fn title_keyword(self, text: impl Into<String>) -> Self {
        self.keyword(MatchField::Title, text)
    }

    pub fn location(mut self, text: impl Into<String>) -> Self {
        self.locations.push(text.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn arrangement(mut self, arrangement: Arrangement) -> Self {
        self.arrangement = Some(arrangement);
        self
    }

    pub fn remote_only(self) -> Self {
        self.arrangement(Arrangement::Remote)
    }

    fn has_role_terms(&self) -> bool {
        self.category.is_some() || !self.keywords.is_empty()
    }

    /// Appends ` WHERE ...` for this filter. Every piece of caller text is bound.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" WHERE is_active = true");

        if self.has_role_terms() {
            qb.push(" AND (");
            let mut first = true;
            if let Some(category) = &self.category {
                qb.push("role_category = ").push_bind(category.clone());
                first = false;
            }
            for kw in &self.keywords {
                if !first {
                    qb.push(" OR ");
                }
                qb.push(kw.field.column())
                    .push(" ILIKE ")
                    .push_bind(like_pattern(&kw.text));
                first = false;
            }
            qb.push(")");
        }

        if !self.locations.is_empty() {
            qb.push(" AND (");
            for (i, loc) in self.locations.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push("location ILIKE ").push_bind(like_pattern(loc));
            }
            qb.push(")");
        }

        if let Some(text) = &self.search {
            let pattern = like_pattern(text);
            qb.push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR company_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(arrangement) = &self.arrangement {
            qb.push(" AND ").push(arrangement.sql());
        }
    }

    /// In-memory evaluation with the same semantics as [`push_where`](Self::push_where).
    pub fn matches(&self, job: &JobPosting) -> bool {
        if !job.is_active {
            return false;
        }

        if self.has_role_terms() {
            let by_category = self
                .category
                .as_deref()
                .is_some_and(|c| job.role_category.as_deref() == Some(c));
            let by_keyword = self.keywords.iter().any(|kw| {
                kw.field
                    .value(job)
                    .is_some_and(|v| contains_ignore_case(v, &kw.text))
            });
            if !(by_category || by_keyword) {
                return false;
            }
        }

        if !self.locations.is_empty() {
            let Some(location) = job.location.as_deref() else {
                return false;
            };
            if !self
                .locations
                .iter()
                .any(|l| contains_ignore_case(location, l))
            {
                return false;
            }
        }

        if let Some(text) = &self.search {
            let in_title = contains_ignore_case(&job.title, text);
            let in_company = job
                .company_name
                .as_deref()
                .is_some_and(|c| contains_ignore_case(c, text));
            if !(in_title || in_company) {
                return false;
            }
        }

        self.arrangement.map_or(true, |a| a.admits(job))
    }
}

/// `%text%` with LIKE metacharacters escaped and `*` turned into `%`.
fn like_pattern(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('%');
    for ch in text.trim().chars() {
        match ch {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(ch);
            }
            '*' => out.push('%'),
            _ => out.push(ch),
        }
    }
    out.push('%');
    out
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let mut rest = haystack.as_str();
    for part in needle.trim().to_lowercase().split('*') {
        match rest.find(part) {
            Some(at) => rest = &rest[at + part.len()..],
            None => return false,
        }
    }
    true
}
