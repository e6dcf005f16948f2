use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppResult,
    state::AppState,
    types::{ItemsResponse, UpdatesQuery},
};

/// `GET /updates?date=`: nodes changed during the 24 hours up to `date`.
pub async fn get_updates(
    State(state): State<AppState>,
    query: Result<Query<UpdatesQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(q) = query?;
    state.metrics.inc_update_queries();
    let items = state.tree.updates(&q.date).await?;
    Ok(Json(ItemsResponse { items }))
}
