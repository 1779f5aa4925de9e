use anyhow::Error;
use async_stream::try_stream;
use axum::{
    extract::{Query, State},
    response::{
        sse::{Event, KeepAlive},
        Sse,
    },
    routing::get,
    Router,
};
use futures_util::Stream;
use serde::Deserialize;

use crate::state::State as AppState;

pub fn routes(state: AppState) -> Router<()> {
    Router::new()
        .route("/sse", get(events_sse))
        .with_state(state)
}

#[derive(Deserialize)]
pub struct EventsQuery {
    view: Option<String>,
}

/// Streams pagination events published after the client connected,
/// restricted to one view when `?view=` is given.
pub async fn events_sse(
    Query(query): Query<EventsQuery>,
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Error>>> {
    let mut subscriber = match query.view {
        Some(view) => state.events.subscribe_view(view),
        None => state.events.subscribe(),
    };
    Sse::new(try_stream! {
        while let Some(message) = subscriber.recv().await {
            yield Event::default()
                .event(message.event.event_type())
                .json_data(&message)?;
        }
    })
    .keep_alive(KeepAlive::default())
}
