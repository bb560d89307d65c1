// Axum API Server Module
//
// Purpose: JSON surface over SeasonalTaskService for the presentation layer
// Task collections are cached by the service; summary and search responses are
// additionally memoized in a short-lived Moka cache.

#[cfg(feature = "api")]
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use moka::future::Cache;

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use std::time::Duration;

#[cfg(feature = "api")]
use crate::cache::TaskCache;

#[cfg(feature = "api")]
use crate::config::ServerConfig;

#[cfg(feature = "api")]
use crate::error::GuideError;

#[cfg(feature = "api")]
use crate::models::{Category, Priority, RecommendationContext, SeasonalTask, SeasonalTaskFilter};

#[cfg(feature = "api")]
use crate::repository::{JsonTaskRepository, TaskRepository};

#[cfg(feature = "api")]
use crate::service::SeasonalTaskService;

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SeasonalTaskService>,
    pub cache: Cache<String, serde_json::Value>,
}

#[cfg(feature = "api")]
impl AppState {
    pub async fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading seasonal tasks from {}...", config.tasks_file.display());
        let repository = JsonTaskRepository::from_file(&config.tasks_file)?;
        Ok(Self::with_repository(Arc::new(repository), config))
    }

    /// Build state around any task store
    pub fn with_repository(repository: Arc<dyn TaskRepository>, config: &ServerConfig) -> Self {
        tracing::info!("Initializing task cache ({}s TTL)...", config.task_cache_ttl_secs);
        let task_cache = Arc::new(TaskCache::with_clock(
            chrono::Duration::seconds(config.task_cache_ttl_secs),
            Arc::new(crate::cache::SystemClock),
        ));

        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(config.response_cache_capacity)
            .time_to_live(Duration::from_secs(config.response_cache_ttl_secs))
            .build();

        Self {
            service: Arc::new(SeasonalTaskService::new(repository, task_cache)),
            cache,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Task queries (JSON API)
        .route("/api/tasks", get(list_tasks))
        .route("/api/tasks/search", get(search_tasks))
        .route("/api/tasks/priority/:priority", get(tasks_by_priority))
        .route("/api/tasks/category/:category", get(tasks_by_category))

        // Per-user guidance
        .route("/api/guide/current", post(current_month_guide))
        .route("/api/recommendations", post(recommendations))
        .route("/api/summary/:month", get(monthly_summary))

        // Forced refresh
        .route("/api/cache/clear", post(clear_cache))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let filter = query.to_filter()?;
    let filter = if filter.is_empty() { None } else { Some(filter) };
    let tasks = state.service.get_seasonal_tasks(filter.as_ref()).await?;
    Ok(Json(rows_json(&tasks)))
}

#[cfg(feature = "api")]
async fn search_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    // A missing or blank `q` matches every task the other parameters select
    let text = query.q.as_deref().unwrap_or_default().trim().to_string();

    let cache_key = format!("search:{:?}", query);
    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for search query");
        return Ok(Json(cached));
    }

    let filter = query.to_filter()?;
    let filter = if filter.is_empty() { None } else { Some(filter) };
    let tasks = state.service.search_tasks(&text, filter.as_ref()).await?;
    let result = rows_json(&tasks);

    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn tasks_by_priority(
    State(state): State<AppState>,
    Path(priority): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let priority = Priority::parse(&priority)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown priority: {}", priority)))?;
    let tasks = state.service.get_tasks_by_priority(priority, query.month).await?;
    Ok(Json(rows_json(&tasks)))
}

#[cfg(feature = "api")]
async fn tasks_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = Category::parse(&category)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown category: {}", category)))?;
    let tasks = state.service.get_tasks_by_category(category, query.month).await?;
    Ok(Json(rows_json(&tasks)))
}

#[cfg(feature = "api")]
async fn current_month_guide(
    State(state): State<AppState>,
    Json(context): Json<RecommendationContext>,
) -> Result<Json<serde_json::Value>, AppError> {
    let guide = state.service.get_current_month_guide(&context).await?;
    Ok(Json(to_json(&guide)?))
}

#[cfg(feature = "api")]
async fn recommendations(
    State(state): State<AppState>,
    Json(context): Json<RecommendationContext>,
) -> Result<Json<serde_json::Value>, AppError> {
    tracing::info!(
        "Recommending tasks for month {} in {} ({} plant types)",
        context.current_month,
        context.climate_zone,
        context.user_plants.len()
    );
    let ranked = state.service.get_task_recommendations(&context).await?;
    Ok(Json(serde_json::json!({
        "rows": ranked.len(),
        "data": to_json(&ranked)?,
    })))
}

#[cfg(feature = "api")]
async fn monthly_summary(
    State(state): State<AppState>,
    Path(month): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let month: u32 = month
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid month: {}", month)))?;
    let cache_key = format!("summary:{}:{}", month, query.climate_zone);
    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for summary {}:{}", month, query.climate_zone);
        return Ok(Json(cached));
    }

    let summary = state
        .service
        .get_monthly_task_summary(month, &query.climate_zone)
        .await?;
    let result = to_json(&summary)?;

    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn clear_cache(State(state): State<AppState>) -> impl IntoResponse {
    state.service.clear_cache();
    state.cache.invalidate_all();
    tracing::info!("Task and response caches cleared");
    Json(serde_json::json!({ "cleared": true }))
}

// ============================================================================
// Request Types
// ============================================================================

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct TaskQuery {
    q: Option<String>,
    month: Option<u32>,
    priority: Option<String>,
    category: Option<String>,
    /// Comma-separated: "herb,vegetable"
    plant_types: Option<String>,
    climate_zone: Option<String>,
}

#[cfg(feature = "api")]
impl TaskQuery {
    fn to_filter(&self) -> Result<SeasonalTaskFilter, AppError> {
        let priority = match self.priority {
            Some(ref p) => Some(
                Priority::parse(p)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown priority: {}", p)))?,
            ),
            None => None,
        };
        let category = match self.category {
            Some(ref c) => Some(
                Category::parse(c)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown category: {}", c)))?,
            ),
            None => None,
        };
        let plant_types = self.plant_types.as_ref().map(|s| {
            s.split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect::<Vec<String>>()
        });

        Ok(SeasonalTaskFilter {
            month: self.month,
            priority,
            category,
            plant_types,
            climate_zone: self.climate_zone.clone(),
        })
    }
}

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct MonthQuery {
    month: Option<u32>,
}

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct SummaryQuery {
    climate_zone: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

#[cfg(feature = "api")]
fn rows_json(tasks: &[SeasonalTask]) -> serde_json::Value {
    serde_json::json!({
        "rows": tasks.len(),
        "data": tasks,
    })
}

#[cfg(feature = "api")]
fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(format!("JSON encode error: {}", e)))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    Repository(String),
    BadRequest(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl From<GuideError> for AppError {
    fn from(err: GuideError) -> Self {
        match err {
            GuideError::Repository(_) => AppError::Repository(err.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Repository(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
