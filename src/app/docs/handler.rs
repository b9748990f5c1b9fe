//! API 文档处理器

use axum::{
    response::{Html, Json},
    routing::get,
    Router,
};
use serde_json::Value;

use super::model::{openapi_document, EndpointDoc, ENDPOINTS};

/// 构建文档路由：`<path>` 为 HTML 页面，`<path>/openapi.json` 为 JSON 描述
pub fn router<S>(path: &str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let base = path.trim_end_matches('/');
    let json_path = format!("{base}/openapi.json");
    let link = json_path.clone();

    Router::new()
        .route(base, get(move || docs_page(link.clone())))
        .route(&json_path, get(openapi_json))
}

pub async fn openapi_json() -> Json<Value> {
    Json(openapi_document())
}

pub async fn docs_page(json_path: String) -> Html<String> {
    Html(render_page(ENDPOINTS, &json_path))
}

fn render_row(endpoint: &EndpointDoc) -> String {
    let responses = endpoint
        .responses
        .iter()
        .map(|(status, description, _)| format!("<li><code>{status}</code> {description}</li>"))
        .collect::<String>();
    let body = if endpoint.has_body {
        "<code>{ name?, age?, hobby? }</code>"
    } else {
        "&mdash;"
    };

    format!(
        "<tr><td class=\"method {method}\">{upper}</td><td><code>{path}</code></td>\
         <td>{summary}</td><td>{body}</td><td><ul>{responses}</ul></td></tr>",
        method = endpoint.method,
        upper = endpoint.method.to_uppercase(),
        path = endpoint.path,
        summary = endpoint.summary,
    )
}

fn render_page(endpoints: &[EndpointDoc], json_path: &str) -> String {
    let rows = endpoints.iter().map(render_row).collect::<String>();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>User Record Service API</title>
    <meta charset="UTF-8">
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; vertical-align: top; }}
        th {{ background: #f5f5f5; }}
        .method {{ font-weight: bold; }}
        .get {{ color: #2e7d32; }}
        .post {{ color: #1565c0; }}
        .put {{ color: #ef6c00; }}
        .delete {{ color: #c62828; }}
    </style>
</head>
<body>
    <h1>User Record Service API</h1>
    <p>Version {version}. User objects have the shape
    <code>{{ id: integer, name: string|null, age: string|null, hobby: string|null }}</code>.</p>
    <p>Machine-readable description: <a href="{json_path}">{json_path}</a></p>
    <table>
        <tr><th>Method</th><th>Path</th><th>Description</th><th>Body</th><th>Responses</th></tr>
        {rows}
    </table>
    <footer><small>Generated at {generated_at}</small></footer>
</body>
</html>"#,
        version = env!("CARGO_PKG_VERSION"),
        generated_at = chrono::Utc::now().to_rfc3339(),
    )
}
