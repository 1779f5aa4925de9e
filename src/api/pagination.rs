use axum::{
    extract::{Query, State},
    middleware,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::QueryCacheMiddleware,
    state::State as AppState,
    types::{calculate_pagination, generate_page_numbers, MAX_VISIBLE_CAP},
};

#[derive(Deserialize)]
pub struct CalculateQuery {
    pub total_items: usize,
    pub page: Option<i64>,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct PagesQuery {
    pub current_page: usize,
    pub total_pages: usize,
    pub max_visible: Option<usize>,
}

pub fn routes(state: AppState) -> Router<()> {
    Router::new()
        .route("/", get(calculate))
        .route("/pages", get(pages))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            QueryCacheMiddleware::handler,
        ))
        .with_state(state)
}

pub async fn calculate(
    Query(query): Query<CalculateQuery>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let limit = query
        .limit
        .unwrap_or(state.config.paging.default_limit.get());
    let pagination = calculate_pagination(query.total_items, query.page.unwrap_or(1), limit)
        .map_err(AppError::bad_request)?;

    Ok(Json(json!({
        "data": pagination,
    })))
}

pub async fn pages(
    Query(query): Query<PagesQuery>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let max_visible = query.max_visible.unwrap_or(state.config.paging.max_visible);
    if !(1..=MAX_VISIBLE_CAP).contains(&max_visible) {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "max_visible must be between 1 and {}, got {}",
            MAX_VISIBLE_CAP,
            max_visible
        )));
    }

    Ok(Json(json!({
        "data": generate_page_numbers(query.current_page, query.total_pages, max_visible),
    })))
}
