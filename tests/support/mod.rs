//! Shared fixtures for gallery integration tests: payload builders and mock mounting.
//!
//! Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GROUP: &str = "vintage-cars";
pub const WEB_BASE: &str = "http://web.example/neo/groups";

/// API base served by `server`.
pub fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

/// Path of `endpoint` (`albums`, `photos`, `albums/12`) under the mock API.
pub fn api_path(endpoint: &str) -> String {
    format!("/api/{GROUP}/{endpoint}")
}

pub fn album_json(id: u64, name: &str, photos: u64) -> Value {
    json!({
        "albumId": id,
        "albumName": name,
        "creatorNickname": "ann",
        "description": format!("{name} album"),
        "total": photos,
    })
}

/// A photo with a small thumbnail and a full-size variant served at `url`.
pub fn photo_json(id: u64, album_id: u64, name: &str, filename: &str, url: &str) -> Value {
    json!({
        "photoId": id,
        "albumId": album_id,
        "photoName": name,
        "photoFilename": filename,
        "fileType": "image/jpeg",
        "creatorNickname": "bob",
        "description": null,
        "photoInfo": [
            { "height": 75, "width": 100, "size": 900, "displayURL": format!("{url}/thumb") },
            { "height": 600, "width": 800, "size": 48000, "displayURL": url },
        ],
    })
}

pub fn data(payload: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "ygData": payload }))
}

pub fn server_error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(json!({ "ygError": { "httpStatus": status, "errorMessage": message } }))
}

/// What the gallery serves to a session that is not logged in.
pub fn login_page() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "text/html; charset=utf-8")
        .set_body_string("<html><body>Sign in</body></html>")
}

/// Mounts one page of `endpoint` starting at `start`.
pub async fn mount_page(server: &MockServer, endpoint: &str, start: u64, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(api_path(endpoint)))
        .and(query_param("start", start.to_string()))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Mounts the access probe (`count=1` on albums and group photos).
///
/// Takes priority over pages mounted with [`mount_page`].
pub async fn mount_stats(server: &MockServer, albums: u64, photos: u64) {
    Mock::given(method("GET"))
        .and(path(api_path("albums")))
        .and(query_param("count", "1"))
        .respond_with(data(json!({ "total": albums, "albums": [] })))
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("photos")))
        .and(query_param("count", "1"))
        .respond_with(data(json!({ "totalPhotos": photos, "photos": [] })))
        .with_priority(1)
        .mount(server)
        .await;
}

/// Mounts a photo body at `url_path`.
pub async fn mount_image(server: &MockServer, url_path: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}
