//! Fake TMDB upstream served from a local port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

pub const TEST_API_KEY: &str = "test-key";

/// Start the fake API and return its base URL
pub async fn spawn_fake_tmdb() -> String {
    let app = Router::new()
        .route("/search/movie", get(search))
        .route("/trending/movie/day", get(trending))
        .route("/movie/:id", get(movie_segment))
        .route("/movie/:id/recommendations", get(recommendations));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// A base URL nothing is listening on
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

type Params = Query<HashMap<String, String>>;

/// Mirror TMDB's checks on the shared query parameters
fn check_common(params: &HashMap<String, String>) -> Option<Response> {
    if params.get("api_key").map(String::as_str) != Some(TEST_API_KEY) {
        return Some(
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"status_code": 7, "status_message": "Invalid API key"})),
            )
                .into_response(),
        );
    }
    if params.get("language").map(String::as_str) != Some("en-US") {
        return Some((StatusCode::BAD_REQUEST, "missing language").into_response());
    }
    None
}

fn entry(id: u64, title: &str, date: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "release_date": date,
        "vote_average": 7.5,
        "overview": format!("Overview of {}", title),
        "poster_path": format!("/poster{}.jpg", id),
        "backdrop_path": null
    })
}

fn list(results: Vec<Value>) -> Response {
    Json(json!({
        "page": 1,
        "results": results,
        "total_pages": 1,
        "total_results": 0
    }))
    .into_response()
}

async fn search(Query(params): Params) -> Response {
    if let Some(rejection) = check_common(&params) {
        return rejection;
    }

    match params.get("query").map(String::as_str) {
        Some("Matrix") => {
            let mut results = vec![
                entry(603, "The Matrix", "1999-03-30"),
                json!({"id": "bad", "title": "Malformed"}),
                entry(604, "The Matrix Reloaded", "2003-05-15"),
                entry(605, "The Matrix Revolutions", "2003-11-05"),
            ];
            for i in 0..5 {
                results.push(entry(
                    1000 + i,
                    &format!("Matrix Documentary {}", i),
                    "",
                ));
            }
            list(results)
        }
        Some("broken") => (StatusCode::OK, "{not json").into_response(),
        Some("fail") => (StatusCode::INTERNAL_SERVER_ERROR, "upstream down").into_response(),
        Some("slow") => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            list(vec![entry(1, "Too Late", "2000-01-01")])
        }
        _ => list(Vec::new()),
    }
}

async fn trending(Query(params): Params) -> Response {
    if let Some(rejection) = check_common(&params) {
        return rejection;
    }
    list(vec![
        entry(550, "Fight Club", "1999-10-15"),
        entry(603, "The Matrix", "1999-03-30"),
    ])
}

async fn movie_segment(Path(segment): Path<String>, Query(params): Params) -> Response {
    if let Some(rejection) = check_common(&params) {
        return rejection;
    }

    match segment.as_str() {
        "popular" => list(vec![entry(238, "The Godfather", "1972-03-14")]),
        "top_rated" => list(vec![entry(278, "The Shawshank Redemption", "1994-09-23")]),
        "603" => Json(json!({
            "id": 603,
            "title": "The Matrix",
            "release_date": "1999-03-30",
            "vote_average": 8.2,
            "overview": "Set in the 22nd century, The Matrix tells the story of a computer hacker.",
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "backdrop_path": "/fNG7i7RqMErkcqhohV2a6cV1Ehy.jpg",
            "genres": [
                {"id": 28, "name": "Action"},
                {"id": 878, "name": "Science Fiction"}
            ],
            "runtime": 136
        }))
        .into_response(),
        "550" => Json(json!({
            "id": 550,
            "title": "Fight Club",
            "release_date": "1999-10-15",
            "overview": null,
            "genres": []
        }))
        .into_response(),
        "777" => Json(json!({"id": 777, "title": ""})).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"status_code": 34, "status_message": "The resource you requested could not be found."})),
        )
            .into_response(),
    }
}

async fn recommendations(Path(id): Path<u64>, Query(params): Params) -> Response {
    if let Some(rejection) = check_common(&params) {
        return rejection;
    }
    if params.get("page").map(String::as_str) != Some("1") {
        return (StatusCode::BAD_REQUEST, "missing page").into_response();
    }

    match id {
        603 => list(
            (0..12)
                .map(|i| entry(2000 + i, &format!("Cyberpunk Pick {}", i), "2001-01-01"))
                .collect(),
        ),
        _ => list(Vec::new()),
    }
}
