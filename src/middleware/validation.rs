use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::CONTENT_LENGTH, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::config::AppConfig;

/// Rejects write requests whose declared `Content-Length` exceeds
/// `http.max_body_bytes` before the body is read.
///
/// `DefaultBodyLimit` still guards bodies without a length header.
pub async fn body_limit_middleware(State(cfg): State<Arc<AppConfig>>, req: Request, next: Next) -> Response {
    if matches!(req.method(), &Method::POST | &Method::PUT) {
        let declared = req
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok());
        if let Some(length) = declared {
            let max_body_size = cfg.http.max_body_bytes;
            if length > max_body_size {
                tracing::warn!("Rejected request body of {} bytes (limit {})", length, max_body_size);
                return (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    Json(json!({
                        "error": {
                            "code": "PAYLOAD_TOO_LARGE",
                            "message": format!("Request body exceeds maximum size of {} bytes", max_body_size),
                        },
                        "status": 413,
                    })),
                )
                    .into_response();
            }
        }
    }

    next.run(req).await
}

/// Sanitizes user input for logging purposes.
///
/// Control characters (except whitespace) are dropped, the result is capped
/// at 200 characters and quotes are escaped.
pub fn sanitize_for_logging(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .take(200)
        .collect::<String>()
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\'', "\\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_for_logging() {
        assert_eq!(sanitize_for_logging("folder-1"), "folder-1");
        assert_eq!(sanitize_for_logging("id\nwith\nnewlines"), "id\nwith\nnewlines");

        let sanitized = sanitize_for_logging("id\x00with\x01control\x02chars");
        assert!(!sanitized.contains('\x00'));
        assert!(!sanitized.contains('\x01'));
        assert!(!sanitized.contains('\x02'));

        assert_eq!(sanitize_for_logging(&"a".repeat(300)).len(), 200);
        assert_eq!(sanitize_for_logging("it's"), "it\\'s");
    }
}
