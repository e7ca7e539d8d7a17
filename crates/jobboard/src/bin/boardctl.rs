use chrono::{Duration, Utc};
use jobboard::db;
use jobboard::listings::{ListingService, ListingsRepo};
use jobboard::pages;
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::env;
use uuid::Uuid;

const CATEGORIES: &[(&str, &[&str])] = &[
    ("Finance", &["Fractional CFO", "Part-Time Finance Director", "Interim FD"]),
    ("Engineering", &["Fractional CTO", "Interim CIO", "Fractional IT Director"]),
    ("Marketing", &["Fractional CMO", "Part-Time Marketing Director"]),
    ("Operations", &["Fractional COO", "Fractional Project Manager", "Interim Managing Director"]),
    ("HR", &["Fractional CHRO", "Part-Time HR Director"]),
    ("Sales", &["Fractional CRO", "Fractional Sales Director"]),
    ("Product", &["Fractional CPO", "Fractional Product Manager"]),
    ("Security", &["Fractional CISO"]),
    ("Executive", &["Fractional CEO", "Interim CEO"]),
];

const LOCATIONS: &[&str] = &[
    "London",
    "Manchester",
    "Birmingham",
    "Leeds, West Yorkshire",
    "Belfast, Northern Ireland",
    "Bristol",
    "Remote, UK",
];

const COMPANIES: &[&str] = &[
    "Northwind Capital",
    "Brightpath Startup Studio",
    "Kestrel Health",
    "Oakline Logistics",
    "Harbour SaaS",
    "Meridian Retail",
];

const WORKPLACES: &[&str] = &["Remote", "Hybrid", "Onsite"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "boardctl <command>\n\
             Commands:\n\
             - migrate\n\
             - reset\n\
             - seed <n>\n\
             - demo\n\
             - counts\n\
             - page <path>\n\
             \n\
             Uses DATABASE_URL or TEST_DATABASE_URL.\n"
        );
        std::process::exit(2);
    }

    dotenvy::dotenv().ok();
    jobboard::telemetry::init_tracing();

    let url = env::var("DATABASE_URL")
        .or_else(|_| env::var("TEST_DATABASE_URL"))
        .map_err(|_| anyhow::anyhow!("DATABASE_URL or TEST_DATABASE_URL must be set"))?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;

    match args[1].as_str() {
        "migrate" => {
            db::run_migrations(&pool).await?;
            println!("migrations OK");
        }
        "reset" => reset(&pool).await?,
        "seed" => {
            let n: i64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10);
            seed(&pool, n).await?;
        }
        "demo" => {
            reset(&pool).await?;
            seed(&pool, 25).await?;
            show_counts(&pool).await?;
        }
        "counts" => show_counts(&pool).await?,
        "page" => {
            let path = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("usage: boardctl page <path>"))?;
            print_page(pool, path).await?;
        }
        other => {
            eprintln!("Unknown command: {other}");
            std::process::exit(2);
        }
    }

    Ok(())
}

async fn reset(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query("TRUNCATE TABLE jobs").execute(pool).await?;

    println!("reset OK");
    Ok(())
}

async fn seed(pool: &PgPool, n: i64) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();

    for _ in 0..n {
        let (category, titles) = CATEGORIES.choose(&mut rng).copied().unwrap_or(CATEGORIES[0]);
        let title = titles.choose(&mut rng).copied().unwrap_or("Fractional Executive");
        let location = LOCATIONS.choose(&mut rng).copied();
        let company = COMPANIES.choose(&mut rng).copied();
        let workplace = WORKPLACES.choose(&mut rng).copied();

        // one in eight postings has no date, one in ten is already expired
        let posted_date = (!rng.gen_ratio(1, 8))
            .then(|| Utc::now() - Duration::hours(rng.gen_range(0..24 * 30)));
        let is_active = !rng.gen_ratio(1, 10);

        let low: i64 = rng.gen_range(6..=12) * 100;
        let compensation = format!("£{low}-£{}/day", low + 400);

        let slug = format!(
            "{}-{}",
            title.to_lowercase().replace(' ', "-"),
            &Uuid::new_v4().simple().to_string()[..8]
        );

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO jobs (
                slug, title, company_name, location, description_snippet,
                role_category, skills_required, compensation,
                is_remote, workplace_type, posted_date, hours_per_week, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(&slug)
        .bind(title)
        .bind(company)
        .bind(location)
        .bind(format!("{title} for a growing {category} team"))
        .bind(category)
        .bind(vec!["Leadership".to_string(), category.to_string()])
        .bind(compensation)
        .bind(workplace == Some("Remote"))
        .bind(workplace)
        .bind(posted_date)
        .bind("2-3 days/week")
        .bind(is_active)
        .fetch_one(pool)
        .await?;

        println!("+ inserted {category} posting {slug} id={id} active={is_active}");
    }
    Ok(())
}

async fn show_counts(pool: &PgPool) -> anyhow::Result<()> {
    let (active, remote, inactive): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
          COUNT(*) FILTER (WHERE is_active),
          COUNT(*) FILTER (WHERE is_active AND (is_remote = true OR workplace_type = 'Remote')),
          COUNT(*) FILTER (WHERE NOT is_active)
        FROM jobs
        "#,
    )
    .fetch_one(pool)
    .await?;

    println!("jobs: active={active} remote={remote} inactive={inactive}");
    Ok(())
}

async fn print_page(pool: PgPool, path: &str) -> anyhow::Result<()> {
    let preset = pages::find(path).ok_or_else(|| anyhow::anyhow!("unknown page: {path}"))?;

    let listings = ListingService::new(ListingsRepo::new(pool), std::time::Duration::from_secs(5));
    let page = listings.load_page(preset).await;

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
