pub mod day_rate;
pub mod error;
pub mod filter;
pub mod model;
pub mod recency;
pub mod repo;
pub mod service;
pub mod source;

pub use error::{ListingError, ListingResult};
pub use filter::{Arrangement, ListingFilter, MatchField};
pub use model::{JobPosting, ListingStats, MatchCounts, PageData, RoleCount};
pub use recency::{days_since, is_new};
pub use repo::ListingsRepo;
pub use service::ListingService;
pub use source::{clamp_limit, ListingSource, MAX_LIMIT};
