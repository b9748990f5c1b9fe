//! 宽松的 JSON 请求体提取器
//!
//! 与 `axum::Json` 不同：只有 `Content-Type` 为 JSON 时才解析请求体，
//! 其他类型或空请求体一律按 `T::default()` 处理。解析失败返回 400，
//! 超过请求体大小限制返回 413。

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
};
use serde::de::DeserializeOwned;

use super::error::CoreError;

#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(Self(T::default()));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                CoreError::PayloadTooLarge(e.body_text())
            } else {
                CoreError::BadRequest(e.body_text())
            }
        })?;

        decode(&bytes).map(Self)
    }
}

fn decode<T: DeserializeOwned + Default>(bytes: &[u8]) -> Result<T, CoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(bytes).map_err(|e| CoreError::BadRequest(format!("Invalid JSON body: {e}")))
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Body {
        name: Option<String>,
    }

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn test_json_content_types() {
        assert!(has_json_content_type(&headers("application/json")));
        assert!(has_json_content_type(&headers("application/json; charset=utf-8")));
        assert!(has_json_content_type(&headers("Application/JSON")));
        assert!(has_json_content_type(&headers("application/merge-patch+json")));
        assert!(!has_json_content_type(&headers("text/plain")));
        assert!(!has_json_content_type(&HeaderMap::new()));
    }

    #[test]
    fn test_decode_empty_body_is_default() {
        let body: Body = decode(b"").unwrap();
        assert_eq!(body, Body::default());

        let body: Body = decode(b"  \n").unwrap();
        assert_eq!(body, Body::default());
    }

    #[test]
    fn test_decode_malformed_body() {
        let err = decode::<Body>(b"{\"name\":").unwrap_err();
        assert!(matches!(err, CoreError::BadRequest(msg) if msg.starts_with("Invalid JSON body")));
    }
}
