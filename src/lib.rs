//! Seasonal Guide
//!
//! Seasonal gardening task engine for a plant-care companion app.
//!
//! - `repository`: async task store seam + JSON-backed adapter
//! - `cache`: TTL cache of task collections keyed by canonical filter
//! - `filters`: plant-type narrowing and text search
//! - `scorer` / `ranker`: relevance scoring and recommendation ranking
//! - `summary` / `tips`: monthly statistics and seasonal tips
//! - `service`: the public operations, composed over the cache
//! - `api_server` (feature `api`): Axum JSON API

pub mod error;
pub mod models;
pub mod repository;
pub mod cache;
pub mod filters;
pub mod scorer;
pub mod ranker;
pub mod summary;
pub mod tips;
pub mod service;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use error::{GuideError, Result};
pub use models::*;
pub use repository::{JsonTaskRepository, TaskRepository};
pub use cache::{CacheKey, Clock, ManualClock, SystemClock, TaskCache};
pub use scorer::{month_diff, score_task};
pub use ranker::{rank_recommendations, MAX_RECOMMENDATIONS};
pub use tips::{seasonal_tips, Season};
pub use service::SeasonalTaskService;
pub use config::ServerConfig;

#[cfg(feature = "api")]
pub use api_server::{AppState, create_router};
