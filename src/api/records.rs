use axum::{
    extract::{RawQuery, State},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::QueryCacheMiddleware,
    state::State as AppState,
    types::{build_pagination_query, generate_page_numbers, paginate_array, parse_pagination_params},
};

pub fn routes(state: AppState) -> Router<()> {
    Router::new()
        .route("/", get(records))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            QueryCacheMiddleware::handler,
        ))
        .with_state(state)
}

/// One page of the loaded records, with navigation links mirroring the
/// `page`/`limit` query parameters.
pub async fn records(
    RawQuery(query): RawQuery,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let params = parse_pagination_params(query.as_deref(), state.config.param_defaults());
    let page = paginate_array(&state.records[..], params.page, params.limit.get())?;
    let pagination = page.pagination;
    let limit = pagination.limit;
    let current = pagination.current_page as i64;

    Ok(Json(json!({
        "data": page.data,
        "pagination": pagination,
        "page_numbers": generate_page_numbers(
            pagination.current_page,
            pagination.total_pages,
            state.config.paging.max_visible,
        ),
        "links": {
            "self": build_pagination_query(current, limit),
            "next": pagination.has_next_page.then(|| build_pagination_query(current + 1, limit)),
            "prev": pagination.has_prev_page.then(|| build_pagination_query(current - 1, limit)),
        },
    })))
}
