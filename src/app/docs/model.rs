//! API 文档数据
//!
//! 静态描述，与用户路由的实际行为没有运行时关联，修改路由时需要同步维护。

use serde_json::{json, Value};

/// 单个接口的描述
#[derive(Debug, Clone, Copy)]
pub struct EndpointDoc {
    pub method: &'static str,
    /// OpenAPI 风格路径，如 `/users/{id}`
    pub path: &'static str,
    pub summary: &'static str,
    pub has_id_param: bool,
    pub has_body: bool,
    /// (状态码, 描述, 响应体 schema 名称)
    pub responses: &'static [(u16, &'static str, &'static str)],
}

pub const ENDPOINTS: &[EndpointDoc] = &[
    EndpointDoc {
        method: "get",
        path: "/users",
        summary: "Returns every user in collection order",
        has_id_param: false,
        has_body: false,
        responses: &[(200, "A list of users", "UserList")],
    },
    EndpointDoc {
        method: "post",
        path: "/users",
        summary: "Creates a new user; missing fields are stored as null",
        has_id_param: false,
        has_body: true,
        responses: &[
            (200, "The created user", "UserResponse"),
            (400, "The body is not valid JSON", "MessageResponse"),
        ],
    },
    EndpointDoc {
        method: "put",
        path: "/users/{id}",
        summary: "Updates the supplied fields of a user; empty values keep the old value",
        has_id_param: true,
        has_body: true,
        responses: &[
            (200, "The updated user", "UserResponse"),
            (400, "The body is not valid JSON", "MessageResponse"),
            (404, "No user has this id", "MessageResponse"),
        ],
    },
    EndpointDoc {
        method: "delete",
        path: "/users/{id}",
        summary: "Deletes the user with this id; succeeds even when nothing matched",
        has_id_param: true,
        has_body: false,
        responses: &[(200, "Deletion acknowledged", "MessageResponse")],
    },
];

fn schema_ref(name: &str) -> Value {
    if name == "UserList" {
        json!({ "type": "array", "items": { "$ref": "#/components/schemas/User" } })
    } else {
        json!({ "$ref": format!("#/components/schemas/{name}") })
    }
}

fn operation(endpoint: &EndpointDoc) -> Value {
    let mut responses = serde_json::Map::new();
    for (status, description, schema) in endpoint.responses {
        responses.insert(
            status.to_string(),
            json!({
                "description": description,
                "content": { "application/json": { "schema": schema_ref(schema) } }
            }),
        );
    }

    let mut op = json!({
        "tags": ["Users"],
        "summary": endpoint.summary,
        "responses": responses,
    });

    if endpoint.has_id_param {
        op["parameters"] = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "description": "Numeric id of the user",
            "schema": { "type": "integer" }
        }]);
    }
    if endpoint.has_body {
        op["requestBody"] = json!({
            "required": false,
            "content": {
                "application/json": { "schema": { "$ref": "#/components/schemas/UserInput" } }
            }
        });
    }

    op
}

/// 生成 OpenAPI 3.0 文档
pub fn openapi_document() -> Value {
    let mut paths = serde_json::Map::new();
    for endpoint in ENDPOINTS {
        let item = paths
            .entry(endpoint.path.to_string())
            .or_insert_with(|| json!({}));
        item[endpoint.method] = operation(endpoint);
    }

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "User Record Service",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "CRUD operations over an in-memory collection of users"
        },
        "paths": paths,
        "components": {
            "schemas": {
                "User": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "name": { "type": "string", "nullable": true },
                        "age": { "type": "string", "nullable": true },
                        "hobby": { "type": "string", "nullable": true }
                    }
                },
                "UserInput": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "age": { "type": "string" },
                        "hobby": { "type": "string" }
                    }
                },
                "UserResponse": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" },
                        "user": { "$ref": "#/components/schemas/User" }
                    }
                },
                "MessageResponse": {
                    "type": "object",
                    "properties": { "message": { "type": "string" } }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_all_routes() {
        let doc = openapi_document();
        assert_eq!(doc["openapi"], "3.0.3");
        assert!(doc["paths"]["/users"]["get"].is_object());
        assert!(doc["paths"]["/users"]["post"].is_object());
        assert!(doc["paths"]["/users/{id}"]["put"].is_object());
        assert!(doc["paths"]["/users/{id}"]["delete"].is_object());
    }

    #[test]
    fn test_put_documents_not_found() {
        let doc = openapi_document();
        let put = &doc["paths"]["/users/{id}"]["put"];
        assert!(put["responses"]["404"].is_object());
        assert_eq!(put["parameters"][0]["name"], "id");
        assert!(put["requestBody"].is_object());
    }
}
