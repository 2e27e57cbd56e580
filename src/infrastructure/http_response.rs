// HTTP response utilities for JSON (optionally Brotli-encoded) replies
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    Json,
    body::Body,
    http::{HeaderMap, HeaderValue, Response, StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::json;
use tokio::io::AsyncReadExt;

/// True when the client advertises Brotli in `Accept-Encoding`.
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

/// `{"status":"error","message":...}` with the given status.
pub fn error_response(status: StatusCode, message: &str) -> Response<Body> {
    (status, Json(json!({ "status": "error", "message": message }))).into_response()
}

pub fn success_response(message: &str) -> Response<Body> {
    Json(json!({ "status": "success", "message": message })).into_response()
}

pub async fn brotli_compress(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = BrotliEncoder::new(bytes);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Serialize `data` as JSON, Brotli-compressing the body when `compress` is set.
pub async fn json_response<T: Serialize>(data: &T, compress: bool) -> Response<Body> {
    let json_bytes = match serde_json::to_vec(data) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("JSON serialization error: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Serialization failed");
        }
    };

    let (body_bytes, content_encoding) = if compress {
        match brotli_compress(&json_bytes).await {
            Ok(compressed) => {
                tracing::debug!(
                    "Compressed {} -> {} bytes with Brotli",
                    json_bytes.len(),
                    compressed.len()
                );
                (compressed, Some("br"))
            }
            Err(e) => {
                tracing::warn!("Brotli compression failed, sending identity: {}", e);
                (json_bytes, None)
            }
        }
    } else {
        (json_bytes, None)
    };

    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body_bytes.len())
        .header(header::VARY, "accept-encoding");

    if let Some(encoding) = content_encoding {
        response = response.header(header::CONTENT_ENCODING, HeaderValue::from_static(encoding));
    }

    match response.body(Body::from(body_bytes)) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_compression::tokio::bufread::BrotliDecoder;

    async fn body_bytes(response: Response<Body>) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_accepts_brotli() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_brotli(&headers));
        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
        assert!(accepts_brotli(&headers));
    }

    #[tokio::test]
    async fn test_plain_json_response() {
        let response = json_response(&json!({"html": "<div></div>"}), false).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
        let body = body_bytes(response).await;
        assert_eq!(body, br#"{"html":"<div></div>"}"#);
    }

    #[tokio::test]
    async fn test_brotli_json_response_decodes() {
        let value = json!({"js": "x".repeat(4096)});
        let response = json_response(&value, true).await;
        assert_eq!(response.headers().get(header::CONTENT_ENCODING).unwrap(), "br");

        let compressed = body_bytes(response).await;
        let mut decoder = BrotliDecoder::new(compressed.as_slice());
        let mut decoded = Vec::new();
        decoder.read_to_end(&mut decoded).await.unwrap();
        assert_eq!(serde_json::from_slice::<serde_json::Value>(&decoded).unwrap(), value);
    }

    #[tokio::test]
    async fn test_error_response_shape() {
        let response = error_response(StatusCode::FORBIDDEN, "API endpoint not allowed");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, json!({"status": "error", "message": "API endpoint not allowed"}));
    }
}
