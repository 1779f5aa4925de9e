use anyhow::anyhow;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::{
    controller::PaginationController, error::AppError, state::State as AppState,
    types::validate_limit,
};

pub fn routes(state: AppState) -> Router<()> {
    Router::new()
        .route("/:name", get(view))
        .route("/:name/next", post(next_page))
        .route("/:name/prev", post(prev_page))
        .route("/:name/first", post(first_page))
        .route("/:name/last", post(last_page))
        .route("/:name/page/:page", post(go_to_page))
        .route("/:name/limit/:limit", post(change_limit))
        .with_state(state)
}

fn navigate(
    state: &AppState,
    name: &str,
    action: impl FnOnce(&mut PaginationController<Value>) -> Result<(), AppError>,
) -> Result<Json<Value>, AppError> {
    let mut view = state.view(name).ok_or_else(|| {
        AppError::status(
            StatusCode::SERVICE_UNAVAILABLE,
            anyhow!("view limit of {} reached", state.config.max_views),
        )
    })?;
    action(&mut *view)?;
    Ok(Json(json!({
        "data": view.view(),
    })))
}

pub async fn view(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    navigate(&state, &name, |_| Ok(()))
}

pub async fn next_page(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    navigate(&state, &name, |view| {
        view.next_page();
        Ok(())
    })
}

pub async fn prev_page(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    navigate(&state, &name, |view| {
        view.prev_page();
        Ok(())
    })
}

pub async fn first_page(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    navigate(&state, &name, |view| {
        view.first_page();
        Ok(())
    })
}

pub async fn last_page(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    navigate(&state, &name, |view| {
        view.last_page();
        Ok(())
    })
}

pub async fn go_to_page(
    Path((name, page)): Path<(String, i64)>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    navigate(&state, &name, |view| {
        view.go_to_page(page);
        Ok(())
    })
}

pub async fn change_limit(
    Path((name, limit)): Path<(String, i64)>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let limit = validate_limit(limit).map_err(AppError::bad_request)?;
    navigate(&state, &name, |view| {
        view.change_limit(limit.get()).map_err(AppError::bad_request)
    })
}
