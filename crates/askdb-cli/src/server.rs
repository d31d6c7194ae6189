//! HTTP front end: a thin JSON wrapper over the generator and executor.
//!
//! No decision logic lives here; every fault is already a value by the time
//! it reaches a handler, and the response mirrors it as `success: false`.

use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use askdb_backend::Database;
use askdb_backend_duckdb::DuckDbBackend;
use askdb_llm::{SqlGenerator, TextToSql};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Shared handler state: one backend connection and one generator for the
/// server's lifetime.
pub struct AppState {
    pub backend: DuckDbBackend,
    pub generator: SqlGenerator,
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub question: String,
    pub sql: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[get("/")]
async fn root() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok", "service": "askdb"}))
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "healthy"}))
}

#[post("/query")]
async fn query(state: web::Data<AppState>, request: web::Json<QuestionRequest>) -> impl Responder {
    let question = request.into_inner().question;

    let sql = match state.generator.generate_sql(&question).await {
        Ok(sql) => sql,
        Err(err) => {
            return HttpResponse::Ok().json(QueryResponse {
                question,
                sql: String::new(),
                success: false,
                result: None,
                error: Some(err.to_string()),
            });
        }
    };

    let response = match state.backend.execute_sql(&sql).await {
        Ok(result) => QueryResponse {
            question,
            sql,
            success: true,
            result: Some(result.to_row_objects()),
            error: None,
        },
        Err(err) => QueryResponse {
            question,
            sql,
            success: false,
            result: None,
            error: Some(err.to_string()),
        },
    };

    HttpResponse::Ok().json(response)
}

/// Bind and run the API server until interrupted.
pub async fn run_server(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(state);
    info!("askdb API listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(root)
            .service(health)
            .service(query)
    })
    .bind((host, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_web::test]
    async fn test_root_status() {
        let app = test::init_service(App::new().service(root)).await;
        let request = test::TestRequest::get().uri("/").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "askdb");
    }

    #[actix_web::test]
    async fn test_health_status() {
        let app = test::init_service(App::new().service(health)).await;
        let request = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["status"], "healthy");
    }

    #[::core::prelude::v1::test]
    fn test_query_response_omits_empty_fields() {
        let response = QueryResponse {
            question: "q".to_string(),
            sql: "SELECT 1;".to_string(),
            success: true,
            result: Some(vec![json!({"total": 1})]),
            error: None,
        };

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["result"][0]["total"], 1);
        assert!(body.get("error").is_none());
    }
}
