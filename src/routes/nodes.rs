use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppResult,
    state::AppState,
    tree::date::now_timestamp,
    types::{DeleteQuery, DeleteResponse, NodeLookup},
};

/// `GET /nodes/{id}`: files come back flat, folders with nested children.
pub async fn get_node(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<impl IntoResponse> {
    state.metrics.inc_node_lookups();
    let view = state.tree.get_node(&id).await?;
    Ok(Json(NodeLookup::from(view)))
}

/// `DELETE /delete/{id}?date=`: removes the node and, for folders, its subtree.
///
/// Without `date` the deletion is stamped with the current time.
pub async fn delete_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(q) = query?;
    let date = q.date.unwrap_or_else(now_timestamp);
    let outcome = state.tree.delete(&id, &date).await?;
    state.metrics.add_deleted(outcome.removed);
    Ok((StatusCode::OK, Json(DeleteResponse { status: "ok".into(), removed: outcome.removed })))
}
