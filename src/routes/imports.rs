use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    error::{AppResult, TreeError},
    state::AppState,
    types::{ImportRequest, ImportResponse},
};

/// `POST /imports`: validates and applies one batch atomically.
pub async fn import_items(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            state.metrics.inc_imports_rejected();
            return Err(rejection.into());
        }
    };

    match state.tree.import(&req).await {
        Ok(outcome) => {
            state.metrics.record_import(outcome.created, outcome.updated);
            let body = ImportResponse {
                status: "ok".into(),
                imported: req.items.len(),
                created: outcome.created,
                updated: outcome.updated,
            };
            Ok((StatusCode::OK, Json(body)))
        }
        Err(e) => {
            if matches!(e, TreeError::InvalidDate(_) | TreeError::InvalidItem(_)) {
                tracing::info!("Import rejected: {}", e);
                state.metrics.inc_imports_rejected();
            }
            Err(e.into())
        }
    }
}
