use serde::Serialize;
use std::sync::LazyLock;

use crate::listings::{Arrangement, ListingFilter, ListingStats, MatchField};

/// What one landing page queries, and what it shows when the database is down.
#[derive(Debug, Clone, Serialize)]
pub struct PagePreset {
    pub path: &'static str,
    pub filter: ListingFilter,
    pub job_limit: i64,
    /// 0 = the page has no featured-companies strip.
    pub company_limit: i64,
    pub fallback: ListingStats,
    /// Live totals below this are shown as this.
    pub count_floor: Option<i64>,
    pub role_breakdown: bool,
}

impl PagePreset {
    fn role(path: &'static str, filter: ListingFilter, fallback: ListingStats) -> Self {
        Self {
            path,
            filter,
            job_limit: 12,
            company_limit: 8,
            fallback,
            count_floor: None,
            role_breakdown: false,
        }
    }

    fn city(path: &'static str, filter: ListingFilter, fallback: ListingStats) -> Self {
        Self {
            path,
            filter,
            job_limit: 6,
            company_limit: 0,
            fallback,
            count_floor: None,
            role_breakdown: false,
        }
    }

    fn jobs(mut self, limit: i64) -> Self {
        self.job_limit = limit;
        self
    }

    fn companies(mut self, limit: i64) -> Self {
        self.company_limit = limit;
        self
    }

    fn floor(mut self, floor: i64) -> Self {
        self.count_floor = Some(floor);
        self
    }

    fn with_breakdown(mut self) -> Self {
        self.role_breakdown = true;
        self
    }

    /// The page displays an average day rate.
    pub fn shows_rate(&self) -> bool {
        self.fallback.avg_day_rate.is_some()
    }
}

fn stats(total: i64, remote: i64) -> ListingStats {
    ListingStats::new(total, remote)
}

fn titled(category: &str, titles: &[&str]) -> ListingFilter {
    titles
        .iter()
        .fold(ListingFilter::for_category(category), |f, t| {
            f.title_keyword(*t)
        })
}

fn located(places: &[&str]) -> ListingFilter {
    places
        .iter()
        .fold(ListingFilter::all(), |f, p| f.location(*p))
}

static CATALOG: LazyLock<Vec<PagePreset>> = LazyLock::new(|| {
    vec![
        // role pages
        PagePreset::role("fractional-cfo-jobs-uk", ListingFilter::for_category("Finance"), stats(45, 18)),
        PagePreset::role("part-time-cfo-jobs-uk", ListingFilter::for_category("Finance"), stats(45, 18)),
        PagePreset::role(
            "fractional-finance-director-jobs-uk",
            titled("Finance", &["Finance Director", "FD"]),
            stats(35, 15),
        ),
        PagePreset::role("fractional-cto-jobs-uk", ListingFilter::for_category("Engineering"), stats(35, 20)),
        PagePreset::role(
            "fractional-cio-jobs-uk",
            titled("Engineering", &["CIO", "information officer", "IT Director"]),
            stats(35, 14),
        ),
        PagePreset::role(
            "fractional-cmo-jobs-uk",
            ListingFilter::for_category("Marketing"),
            stats(38, 15).with_rate(950),
        ),
        PagePreset::role(
            "fractional-ceo-jobs-uk",
            ListingFilter::for_category("Executive"),
            stats(24, 8).with_rate(1200),
        ),
        PagePreset::role(
            "interim-ceo",
            ListingFilter::for_category("Executive"),
            stats(18, 5).with_rate(1400),
        )
        .jobs(9),
        PagePreset::role("fractional-coo-jobs-uk", ListingFilter::for_category("Operations"), stats(28, 12)),
        PagePreset::role(
            "fractional-managing-director-jobs-uk",
            titled("Operations", &["Managing Director", "MD"]),
            stats(22, 8),
        ),
        PagePreset::role(
            "fractional-project-manager-jobs-uk",
            titled("Operations", &["project*manager", "programme*manager"]),
            stats(32, 14),
        ),
        PagePreset::role(
            "fractional-cgo-jobs-uk",
            titled("Operations", &["Sustainability", "Green", "ESG"]),
            stats(12, 5),
        ),
        PagePreset::role(
            "fractional-cpo-jobs-uk",
            titled("Product", &["CPO", "Chief Product"]),
            stats(24, 12),
        ),
        PagePreset::role("fractional-product-jobs-uk", ListingFilter::for_category("Product"), stats(28, 18)),
        PagePreset::role(
            "fractional-product-manager-jobs-uk",
            titled("Product", &["Product Manager", "PM"]),
            stats(35, 18),
        ),
        PagePreset::role(
            "fractional-cro-jobs-uk",
            titled("Sales", &["CRO", "Chief Revenue"]),
            stats(28, 10),
        ),
        PagePreset::role(
            "fractional-sales-director-jobs-uk",
            titled("Sales", &["Sales Director"]),
            stats(40, 15),
        ),
        PagePreset::role(
            "fractional-client-services-director-jobs-uk",
            titled("Sales", &["Client Services", "Customer Success", "Account Director"]),
            stats(28, 12),
        ),
        PagePreset::role(
            "fractional-ciso-jobs-uk",
            titled("Security", &["CISO", "Security"]),
            stats(24, 18).with_rate(1200),
        ),
        PagePreset::role(
            "fractional-cdo-jobs-uk",
            titled("Data", &["CDO", "Chief Data"]),
            stats(18, 8),
        ),
        PagePreset::role(
            "fractional-cao-jobs-uk",
            titled("Data", &["Analytics", "CAO"]),
            stats(14, 7),
        ),
        PagePreset::role(
            "fractional-cco-jobs-uk",
            titled("Compliance", &["Compliance"]),
            stats(15, 6),
        ),
        PagePreset::role(
            "fractional-compliance-jobs-uk",
            titled("Compliance/Legal", &["Compliance", "Regulatory"]),
            stats(18, 14).with_rate(800),
        ),
        PagePreset::role(
            "fractional-dpo-jobs-uk",
            titled("Compliance", &["DPO", "Data Protection"]),
            stats(15, 10),
        ),
        PagePreset::role(
            "fractional-legal-jobs-uk",
            titled("Legal", &["Legal"]),
            stats(24, 9),
        ),
        PagePreset::role("fractional-hr-jobs-uk", ListingFilter::for_category("HR"), stats(32, 14)).jobs(8),
        PagePreset::role("fractional-chro-jobs-uk", ListingFilter::for_category("HR"), stats(32, 14)).jobs(8),
        PagePreset::role(
            "fractional-hr-jobs-remote",
            ListingFilter::for_category("HR").remote_only(),
            stats(32, 18),
        )
        .jobs(8),
        // sector pages
        PagePreset::city(
            "fractional-jobs-tech",
            ListingFilter::all()
                .keyword(MatchField::RoleCategory, "tech")
                .keyword(MatchField::RoleCategory, "CTO")
                .keyword(MatchField::RoleCategory, "engineering")
                .title_keyword("CTO")
                .title_keyword("tech"),
            stats(45, 0).with_rate(1100),
        ),
        PagePreset::city(
            "fractional-jobs-startups",
            ListingFilter::all()
                .keyword(MatchField::CompanyName, "startup")
                .keyword(MatchField::DescriptionSnippet, "series")
                .keyword(MatchField::DescriptionSnippet, "scale-up")
                .keyword(MatchField::DescriptionSnippet, "venture"),
            stats(80, 0).with_rate(950),
        )
        .floor(80),
        // city pages
        PagePreset::city("fractional-jobs-london", located(&["london"]), stats(12, 0).with_rate(1050))
            .jobs(15)
            .with_breakdown(),
        PagePreset::city(
            "fractional-jobs-manchester",
            located(&["manchester"]),
            stats(25, 0).with_rate(900),
        )
        .floor(25),
        PagePreset::city(
            "fractional-jobs-birmingham",
            located(&["birmingham"]),
            stats(20, 0).with_rate(850),
        )
        .floor(20),
        PagePreset::city(
            "fractional-jobs-leeds",
            located(&["leeds", "yorkshire", "sheffield"]),
            stats(18, 0).with_rate(800),
        ),
        PagePreset::city(
            "fractional-jobs-belfast",
            located(&["belfast", "northern ireland"]),
            stats(15, 0).with_rate(700),
        )
        .floor(15),
        // overview pages
        PagePreset::city("fractional-jobs", ListingFilter::all(), stats(17, 8))
            .jobs(15)
            .with_breakdown(),
        PagePreset::city(
            "remote-fractional-jobs",
            ListingFilter::all().arrangement(Arrangement::RemoteOrHybrid),
            stats(120, 120),
        )
        .companies(8),
    ]
});

pub fn catalog() -> &'static [PagePreset] {
    &CATALOG
}

/// Preset for a URL path; leading and trailing slashes are ignored.
pub fn find(path: &str) -> Option<&'static PagePreset> {
    let path = path.trim_matches('/');
    catalog().iter().find(|p| p.path == path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn paths_are_unique() {
        let mut seen = HashSet::new();
        for preset in catalog() {
            assert!(seen.insert(preset.path), "duplicate path {}", preset.path);
        }
    }

    #[test]
    fn limits_are_small_and_positive() {
        for preset in catalog() {
            assert!(
                (1..=crate::listings::MAX_LIMIT).contains(&preset.job_limit),
                "{}",
                preset.path
            );
            assert!(preset.company_limit >= 0);
        }
    }

    #[test]
    fn floors_never_exceed_their_fallback_total() {
        for preset in catalog() {
            if let Some(floor) = preset.count_floor {
                assert!(floor <= preset.fallback.total, "{}", preset.path);
            }
        }
    }

    #[test]
    fn find_ignores_surrounding_slashes() {
        let preset = find("/fractional-cfo-jobs-uk/").expect("cfo page");
        assert_eq!(preset.fallback, ListingStats::new(45, 18));
        assert_eq!(preset.filter, ListingFilter::for_category("Finance"));
        assert!(find("fractional-astronaut-jobs").is_none());
    }

    #[test]
    fn city_pages_match_on_location_only() {
        let leeds = find("fractional-jobs-leeds").expect("leeds page");
        assert_eq!(leeds.filter.locations, vec!["leeds", "yorkshire", "sheffield"]);
        assert!(leeds.filter.category.is_none());
        assert!(leeds.shows_rate());
    }
}
