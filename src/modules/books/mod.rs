pub mod filters;
pub mod handlers;
pub mod models;
pub mod repository;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{get, post},
    Router,
};
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use repository::{InMemoryBookRepository, SharedBookRepository};

/// Routes of the books resource, relative to its mount point
pub fn router(repository: SharedBookRepository) -> Router {
    Router::new()
        .route("/", post(handlers::create_book).get(handlers::list_books))
        .route(
            "/{id}",
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
        .with_state(repository)
}

/// Books module: CRUD over the book collection
pub struct BooksModule {
    repository: SharedBookRepository,
}

impl BooksModule {
    pub fn new(repository: SharedBookRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        router(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let remaining = self.repository.count().await?;
        tracing::info!(
            module = self.name(),
            books = remaining,
            "books module stopped, in-memory books discarded"
        );
        Ok(())
    }
}

/// Create the books module backed by a fresh in-memory store
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::new(InMemoryBookRepository::shared()))
}

fn fail_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/FailEnvelope" }
            }
        }
    })
}

fn success_response(description: &str, schema: serde_json::Value) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": schema }
        }
    })
}

fn message_envelope() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "status": { "type": "string", "enum": ["success"] },
            "message": { "type": "string" }
        },
        "required": ["status", "message"]
    })
}

fn id_parameter() -> serde_json::Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    })
}

fn flag_parameter(name: &str, description: &str) -> serde_json::Value {
    json!({
        "name": name,
        "in": "query",
        "required": false,
        "description": description,
        "schema": { "type": "string", "enum": ["0", "1"] }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let payload_body = json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookPayload" }
            }
        }
    });

    json!({
        "paths": {
            "/": {
                "post": {
                    "summary": "Add a book",
                    "tags": ["Books"],
                    "requestBody": payload_body,
                    "responses": {
                        "201": success_response("Book added", json!({
                            "type": "object",
                            "properties": {
                                "status": { "type": "string", "enum": ["success"] },
                                "message": { "type": "string" },
                                "data": {
                                    "type": "object",
                                    "properties": { "bookId": { "type": "string" } },
                                    "required": ["bookId"]
                                }
                            },
                            "required": ["status", "data"]
                        })),
                        "400": fail_response("Missing name, readPage above pageCount, or malformed body"),
                        "500": fail_response("Book could not be stored")
                    }
                },
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "parameters": [
                        {
                            "name": "name",
                            "in": "query",
                            "required": false,
                            "description": "Case-insensitive substring of the book name",
                            "schema": { "type": "string" }
                        },
                        flag_parameter("reading", "1 for books being read, 0 for the rest"),
                        flag_parameter("finished", "1 for finished books, 0 for the rest")
                    ],
                    "responses": {
                        "200": success_response("Matching books", json!({
                            "type": "object",
                            "properties": {
                                "status": { "type": "string", "enum": ["success"] },
                                "data": {
                                    "type": "object",
                                    "properties": {
                                        "books": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/BookSummary" }
                                        }
                                    },
                                    "required": ["books"]
                                }
                            },
                            "required": ["status", "data"]
                        }))
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": success_response("The book", json!({
                            "type": "object",
                            "properties": {
                                "status": { "type": "string", "enum": ["success"] },
                                "data": {
                                    "type": "object",
                                    "properties": {
                                        "book": { "$ref": "#/components/schemas/Book" }
                                    },
                                    "required": ["book"]
                                }
                            },
                            "required": ["status", "data"]
                        })),
                        "404": fail_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "parameters": [id_parameter()],
                    "requestBody": payload_body,
                    "responses": {
                        "200": success_response("Book updated", message_envelope()),
                        "400": fail_response("Missing name, readPage above pageCount, or malformed body"),
                        "404": fail_response("Book not found")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": success_response("Book deleted", message_envelope()),
                        "404": fail_response("Book not found")
                    }
                }
            }
        },
        "components": {
            "schemas": component_schemas()
        }
    })
}

fn component_schemas() -> serde_json::Value {
    json!({
        "Book": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "name": { "type": "string" },
                "year": { "type": "integer", "nullable": true },
                "author": { "type": "string", "nullable": true },
                "summary": { "type": "string", "nullable": true },
                "publisher": { "type": "string", "nullable": true },
                "pageCount": { "type": "integer", "minimum": 0 },
                "readPage": { "type": "integer", "minimum": 0 },
                "finished": {
                    "type": "boolean",
                    "description": "pageCount == readPage when the book was added"
                },
                "reading": {
                    "type": "boolean",
                    "description": "Omitted when the client never sent it"
                },
                "insertedAt": { "type": "string", "format": "date-time" },
                "updatedAt": { "type": "string", "format": "date-time" }
            },
            "required": [
                "id", "name", "pageCount", "readPage", "finished",
                "insertedAt", "updatedAt"
            ]
        },
        "BookSummary": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "name": { "type": "string" },
                "publisher": { "type": "string", "nullable": true }
            },
            "required": ["id", "name"]
        },
        "BookPayload": {
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "year": { "type": "integer" },
                "author": { "type": "string" },
                "summary": { "type": "string" },
                "publisher": { "type": "string" },
                "pageCount": { "type": "integer", "minimum": 0 },
                "readPage": { "type": "integer", "minimum": 0 },
                "reading": { "type": "boolean" }
            },
            "required": ["name"]
        }
    })
}
