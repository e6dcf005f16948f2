use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppResult,
    state::AppState,
    types::{ChildrenQuery, ItemsResponse},
};

/// `GET /children?path=home/...`: direct children of the folder at `path`.
pub async fn list_children(
    State(state): State<AppState>,
    query: Result<Query<ChildrenQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(q) = query?;
    state.metrics.inc_path_listings();
    let items = state.tree.list_path_children(&q.path).await?;
    Ok(Json(ItemsResponse { items }))
}
