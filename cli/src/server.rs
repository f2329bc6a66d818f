//! HTTP host for fontshelf (made by FontLab https://www.fontlab.com/)
//!
//! Every request carries its own criteria, so the server holds nothing but
//! the read-only catalog.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use fontshelf_core::catalog::{Catalog, FontRecord, WritingSystem};
use fontshelf_core::criteria::{parse_reveal_limit, CategoryFilter, FilterCriteria};
use fontshelf_core::projection::Projection;
use fontshelf_core::reveal::{grow_reveal, INITIAL_REVEAL, REVEAL_STEP};

/// Filter parameters sent by a browsing client. Missing fields take the
/// session-start defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectRequest {
    pub query: String,
    /// Category label or "All"
    pub category: Option<String>,
    /// Writing system label
    pub language: Option<String>,
    pub reveal_limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub fonts: Vec<FontRecord>,
    pub total_matches: usize,
    pub reveal_limit: usize,
    pub has_more: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GrowRequest {
    pub current: usize,
    pub step: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GrowResponse {
    pub reveal_limit: usize,
}

/// Bind and serve until the process is stopped.
pub async fn serve(bind: &str, catalog: Catalog) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;
    info!("serving {} fonts on http://{bind}", catalog.len());

    axum::serve(listener, router(Arc::new(catalog)))
        .await
        .context("serving HTTP")?;
    Ok(())
}

pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/catalog", get(catalog_handler))
        .route("/project", post(project_handler))
        .route("/grow", post(grow_handler))
        .with_state(catalog)
}

async fn catalog_handler(State(catalog): State<Arc<Catalog>>) -> Json<Vec<FontRecord>> {
    Json(catalog.records().to_vec())
}

async fn project_handler(
    State(catalog): State<Arc<Catalog>>,
    Json(req): Json<ProjectRequest>,
) -> Result<Json<ProjectResponse>, (StatusCode, String)> {
    let criteria = criteria_from_request(&req).map_err(to_bad_request)?;
    let projection = Projection::compute(&catalog, &criteria);
    debug!(
        "project {:?}: {} of {} matches",
        criteria.query(),
        projection.fonts.len(),
        projection.total_matches
    );

    Ok(Json(ProjectResponse {
        has_more: projection.has_more(),
        total_matches: projection.total_matches,
        reveal_limit: criteria.reveal_limit(),
        fonts: projection.fonts.into_iter().cloned().collect(),
    }))
}

async fn grow_handler(
    State(catalog): State<Arc<Catalog>>,
    Json(req): Json<GrowRequest>,
) -> Json<GrowResponse> {
    let step = req.step.unwrap_or(REVEAL_STEP);
    Json(GrowResponse {
        reveal_limit: grow_reveal(req.current, catalog.len(), step),
    })
}

fn criteria_from_request(req: &ProjectRequest) -> Result<FilterCriteria> {
    let category = match &req.category {
        Some(raw) => raw.parse::<CategoryFilter>()?,
        None => CategoryFilter::All,
    };
    let language = match &req.language {
        Some(raw) => raw.parse::<WritingSystem>()?,
        None => WritingSystem::default(),
    };
    let limit = parse_reveal_limit(req.reveal_limit.unwrap_or(INITIAL_REVEAL))?;

    Ok(FilterCriteria::new()
        .with_query(req.query.clone())
        .with_category(category)
        .with_writing_system(language)
        .with_reveal_limit(limit))
}

fn to_bad_request(err: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}
