//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which wires an in-memory database pool and a
//! tempdir-backed blob store into the full router, plus helpers for building
//! multipart bodies and driving requests with `tower::ServiceExt::oneshot`.

// Not every test binary uses every helper.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use stockpile::server::{create_router, AppContext};
use stockpile::store::BlobStore;
use stockpile_db::pool::{get_conn, init_memory_pool, DbPool, PooledConnection};

/// Fixed boundary for hand-built multipart bodies.
pub const BOUNDARY: &str = "stockpile-test-boundary";

/// Test harness wrapping the full router backed by an in-memory database
/// and a temporary cache directory.
pub struct TestHarness {
    pub db: DbPool,
    pub cache: TempDir,
    pub app: Router,
}

impl TestHarness {
    /// Create a new harness with an in-memory DB and empty cache dir.
    pub fn new() -> Self {
        let db = init_memory_pool().expect("failed to create in-memory pool");
        let cache = tempfile::tempdir().expect("failed to create cache dir");
        let blobs = BlobStore::new(cache.path()).expect("failed to create blob store");
        let app = create_router(AppContext {
            db_pool: db.clone(),
            blobs,
        });
        Self { db, cache, app }
    }

    /// Drive one request through the router.
    pub async fn send(&self, req: Request<Body>) -> Response {
        self.app.clone().oneshot(req).await.expect("request failed")
    }

    /// Get a database connection from the pool.
    pub fn conn(&self) -> PooledConnection {
        get_conn(&self.db).expect("failed to get db connection")
    }

    /// Count blob files currently in the cache directory.
    pub fn cache_file_count(&self) -> usize {
        std::fs::read_dir(self.cache.path()).unwrap().count()
    }

    /// Register an item through the API, returning the parsed response item.
    pub async fn register(
        &self,
        name: &str,
        description: Option<&str>,
        photo: Option<(&str, &[u8])>,
    ) -> serde_json::Value {
        let mut form = MultipartBody::new().text("inventory_name", name);
        if let Some(description) = description {
            form = form.text("description", description);
        }
        if let Some((filename, data)) = photo {
            form = form.file("photo", filename, data);
        }

        let response = self
            .send(multipart_request("POST", "/register", form.finish()))
            .await;
        assert_eq!(response.status(), 201);
        body_json(response).await
    }
}

/// Minimal multipart/form-data body builder.
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    /// Append a plain text field.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Append a file field.
    pub fn file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                name, filename
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Close the body with the final boundary.
    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.body
    }
}

/// Build a multipart request for the given method and uri.
pub fn multipart_request(method: &str, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Build a JSON request for the given method and uri.
pub fn json_request(method: &str, uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

/// Build a bodyless request for the given method and uri.
pub fn bare_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Collect a response body as a UTF-8 string.
pub async fn body_string(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Collect and parse a JSON response body.
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
