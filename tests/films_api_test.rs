//! Integration tests for the films HTTP API
//!
//! These tests drive the full router (middleware included) against fresh
//! stores:
//! 1. Listing and creating films against an in-memory fixture
//! 2. Request validation at the API boundary
//! 3. The same flow end to end against a SQLite table

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use films_api::api;
use films_api::config::{StoreBackend, StoreConfig};
use films_api::state::AppState;
use films_api::store::{Film, InMemoryFilmStore};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn fixture_films() -> Vec<Film> {
    vec![
        Film {
            id: 0,
            title: "Title 1".to_string(),
            year: 2000,
            director: "Director 1".to_string(),
        },
        Film {
            id: 1,
            title: "Title 2".to_string(),
            year: 2000,
            director: "Director 2".to_string(),
        },
    ]
}

fn app_with(films: Vec<Film>) -> Router {
    api::router(AppState::new(Arc::new(InMemoryFilmStore::with_films(films))))
}

/// Send a request and return the status with the parsed JSON body
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/films")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_list_films_returns_store_contents() {
    let app = app_with(fixture_films());

    let (status, body) = send(&app, get("/api/films")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": 0, "title": "Title 1", "year": 2000, "director": "Director 1"},
            {"id": 1, "title": "Title 2", "year": 2000, "director": "Director 2"}
        ])
    );
}

#[tokio::test]
async fn test_list_films_is_repeatable() {
    let app = app_with(fixture_films());

    let (_, first) = send(&app, get("/api/films")).await;
    let (_, second) = send(&app, get("/api/films")).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_create_film_on_empty_store_gets_id_zero() {
    let app = app_with(Vec::new());
    let film = json!({"title": "Title 3", "year": 2000, "director": "Director 3"});

    let (status, body) = send(&app, post_json(&film)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"id": 0, "title": "Title 3", "year": 2000, "director": "Director 3"})
    );

    let (status, body) = send(
        &app,
        post_json(&json!({"title": "Title 4", "year": 2001, "director": "Director 4"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn test_create_film_continues_after_existing_record() {
    let app = app_with(fixture_films().into_iter().take(1).collect());
    let film = json!({"title": "Title 2", "year": 2000, "director": "Director 2"});

    let (status, body) = send(&app, post_json(&film)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"id": 1, "title": "Title 2", "year": 2000, "director": "Director 2"})
    );
}

#[tokio::test]
async fn test_create_film_without_body_is_rejected() {
    let app = app_with(Vec::new());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/films")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(body["status"], 400);

    let (_, films) = send(&app, get("/api/films")).await;
    assert_eq!(films, json!([]));
}

#[tokio::test]
async fn test_create_film_with_null_or_empty_json_is_rejected() {
    let app = app_with(Vec::new());

    for payload in ["", "null", "{}", "{\"title\": \"Title 1\""] {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/films")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {:?}", payload);
        assert!(!body["error"].is_null(), "payload {:?}", payload);
    }

    let (_, films) = send(&app, get("/api/films")).await;
    assert_eq!(films, json!([]));
}

#[tokio::test]
async fn test_create_film_with_empty_title_is_rejected() {
    let app = app_with(Vec::new());
    let film = json!({"title": "", "year": 2000, "director": "Director 1"});

    let (status, body) = send(&app, post_json(&film)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error: Film title cannot be empty");
}

#[tokio::test]
async fn test_get_film_by_id() {
    let app = app_with(fixture_films());

    let (status, body) = send(&app, get("/api/films/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Title 2");

    let (status, body) = send(&app, get("/api/films/7")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Film not found: 7");

    let (status, _) = send(&app, get("/api/films/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_ids() {
    let app = app_with(Vec::new());

    let mut handles = Vec::new();
    for i in 0..32 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let film = json!({"title": format!("Title {}", i), "year": 2000, "director": "D"});
            let (status, body) = send(&app, post_json(&film)).await;
            assert_eq!(status, StatusCode::CREATED);
            body["id"].as_u64().unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (0..32).collect::<Vec<u64>>());
}

#[tokio::test]
async fn test_health_check() {
    let app = app_with(Vec::new());
    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_sqlite_backed_service_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        backend: StoreBackend::Sqlite,
        data_dir: dir.path().to_string_lossy().into_owned(),
        database_url: dir.path().join("films.db").to_string_lossy().into_owned(),
        table: "films".to_string(),
    };
    let store = films_api::open_store(&config).await.unwrap();
    let app = api::router(AppState::new(store));

    // Preload one film the same way a client would
    let (status, _) = send(
        &app,
        post_json(&json!({"title": "Title 1", "year": 2000, "director": "Director 1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, get("/api/films")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], 0);
    assert_eq!(body[0]["title"], "Title 1");

    let film = json!({"title": "Title 2", "year": 2000, "director": "Director 2"});
    let (status, body) = send(&app, post_json(&film)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"id": 1, "title": "Title 2", "year": 2000, "director": "Director 2"})
    );
}

#[tokio::test]
async fn test_open_store_memory_backend() {
    let config = StoreConfig {
        backend: StoreBackend::Memory,
        data_dir: ".films-api".to_string(),
        database_url: ".films-api/films.db".to_string(),
        table: "films".to_string(),
    };
    let store = films_api::open_store(&config).await.unwrap();
    assert!(store.is_empty().await.unwrap());
}
