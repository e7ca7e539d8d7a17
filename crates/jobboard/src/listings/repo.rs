use sqlx::{PgPool, Postgres, QueryBuilder};

use super::day_rate;
use super::error::ListingResult;
use super::filter::ListingFilter;
use super::model::{JobPosting, MatchCounts, RoleCount, POSTING_COLUMNS};
use super::source::{clamp_limit, ListingSource};

#[derive(Clone)]
pub struct ListingsRepo {
    pool: PgPool,
}

impl ListingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl ListingSource for ListingsRepo {
    async fn count_matching(&self, filter: &ListingFilter) -> ListingResult<MatchCounts> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT
              COUNT(*) AS total,
              COUNT(*) FILTER (WHERE is_remote = true OR workplace_type = 'Remote') AS remote_count
            FROM jobs"#,
        );
        filter.push_where(&mut qb);

        let (total, remote_count): (i64, i64) =
            qb.build_query_as().fetch_one(&self.pool).await?;

        Ok(MatchCounts::new(total, remote_count))
    }

    async fn list_matching(
        &self,
        filter: &ListingFilter,
        limit: i64,
    ) -> ListingResult<Vec<JobPosting>> {
        let limit = clamp_limit(limit);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {POSTING_COLUMNS} FROM jobs"));
        filter.push_where(&mut qb);
        qb.push(" ORDER BY posted_date DESC NULLS LAST, id ASC LIMIT ")
            .push_bind(limit);

        let rows = qb
            .build_query_as::<JobPosting>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn list_distinct_companies(
        &self,
        filter: &ListingFilter,
        limit: i64,
    ) -> ListingResult<Vec<String>> {
        let limit = clamp_limit(limit);
        if limit == 0 {
            return Ok(Vec::new());
        }

        // DISTINCT can't order by a column outside the select list, so group
        // and order each company by its newest posting instead.
        let mut qb = QueryBuilder::<Postgres>::new("SELECT company_name FROM jobs");
        filter.push_where(&mut qb);
        qb.push(" AND company_name IS NOT NULL")
            .push(" GROUP BY company_name")
            .push(" ORDER BY MAX(posted_date) DESC NULLS LAST, company_name ASC")
            .push(" LIMIT ")
            .push_bind(limit);

        let rows: Vec<(String,)> = qb.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn average_day_rate(&self, filter: &ListingFilter) -> ListingResult<Option<i64>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT compensation FROM jobs");
        filter.push_where(&mut qb);
        qb.push(" AND compensation IS NOT NULL");

        let rows: Vec<(String,)> = qb.build_query_as().fetch_all(&self.pool).await?;

        Ok(day_rate::average_day_rate(
            rows.iter().map(|(c,)| c.as_str()),
        ))
    }

    async fn role_breakdown(&self, filter: &ListingFilter) -> ListingResult<Vec<RoleCount>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT role_category, COUNT(*) AS count FROM jobs");
        filter.push_where(&mut qb);
        qb.push(" AND role_category IS NOT NULL")
            .push(" GROUP BY role_category")
            .push(" ORDER BY count DESC, role_category ASC");

        let rows = qb
            .build_query_as::<RoleCount>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
