use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

pub const OPENAPI_PATH: &str = "/openapi/v1.json";

/// Only mounted in the development environment.
pub fn router() -> Router {
    Router::new().route(OPENAPI_PATH, get(serve_document))
}

async fn serve_document() -> Json<Value> {
    Json(document())
}

pub fn document() -> Value {
    json!({
        "openapi": "3.0.1",
        "info": {
            "title": "shopfront",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/api/products": {
                "get": {
                    "tags": ["Products"],
                    "summary": "Get all products",
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Product" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "/api/products/{id}": {
                "get": {
                    "tags": ["Products"],
                    "summary": "Get a product by ID",
                    "parameters": [{
                        "name": "id",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "integer", "format": "int32" }
                    }],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Product" }
                                }
                            }
                        },
                        "404": { "description": "Not Found" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Product": {
                    "type": "object",
                    "required": ["id", "name", "description", "price", "stock"],
                    "properties": {
                        "id": { "type": "integer", "format": "int32" },
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "price": { "type": "number", "format": "double", "minimum": 0 },
                        "stock": { "type": "integer", "format": "int32", "minimum": 0 }
                    }
                }
            }
        }
    })
}
