use axum::Router;

use crate::state::State;

pub mod events;
pub mod pagination;
pub mod records;
pub mod views;

pub fn routes(state: State) -> Router<()> {
    Router::new()
        .nest("/pagination", pagination::routes(state.clone()))
        .nest("/records", records::routes(state.clone()))
        .nest("/views", views::routes(state.clone()))
        .nest("/events", events::routes(state))
}
