use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use usersvc_api::{build_router, serve, AppState, ErrorBody, IdPolicy, MessageBody};
use usersvc_core::{
    connect_pool, PgUserRepository, RepoError, RepoResult, SampleUserRepository, StoreConfig,
    User, UserId, UserKey, UserPayload, UserRepository, UserService,
};

/// Persistent in-process store with auto-incrementing ids.
#[derive(Default)]
struct MemoryUserRepository {
    rows: Mutex<(UserId, BTreeMap<UserId, User>)>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list_users(&self) -> RepoResult<Vec<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.1.values().cloned().collect())
    }

    async fn get_user(&self, key: &UserKey) -> RepoResult<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(key.as_id().and_then(|id| rows.1.get(&id).cloned()))
    }

    async fn create_user(&self, payload: &UserPayload) -> RepoResult<User> {
        let mut rows = self.rows.lock().unwrap();
        rows.0 += 1;
        let user = User::from_payload(rows.0, payload);
        rows.1.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, key: &UserKey, payload: &UserPayload) -> RepoResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let existing = key
            .as_id()
            .and_then(|id| rows.1.get_mut(&id))
            .ok_or_else(|| RepoError::NotFound(key.clone()))?;
        *existing = User::from_payload(existing.id, payload);
        Ok(existing.clone())
    }

    async fn delete_user(&self, key: &UserKey) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        key.as_id()
            .and_then(|id| rows.1.remove(&id))
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(key.clone()))
    }
}

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    async fn start(repo: Arc<dyn UserRepository>, id_policy: IdPolicy) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = build_router(AppState::new(UserService::new(repo), id_policy));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(serve(listener, router, async move {
            let _ = shutdown_rx.await;
        }));

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            _shutdown: shutdown_tx,
        }
    }

    async fn sample() -> Self {
        Self::start(Arc::new(SampleUserRepository::new()), IdPolicy::Permissive).await
    }

    async fn memory() -> Self {
        Self::start(Arc::new(MemoryUserRepository::default()), IdPolicy::Permissive).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        read(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap();
        read(response).await
    }

    async fn put(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap();
        read(response).await
    }

    async fn delete(&self, path: &str) -> (StatusCode, String) {
        let response = self.client.delete(self.url(path)).send().await.unwrap();
        let status = response.status();
        (status, response.text().await.unwrap())
    }
}

async fn read(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.json::<Value>().await.unwrap();
    (status, body)
}

fn test_user() -> Value {
    json!({"name": "Test User", "email": "test@example.com"})
}

#[tokio::test]
async fn list_users_returns_array() {
    let server = TestServer::sample().await;

    let (status, body) = server.get("/api/users").await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().expect("body should be an array");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["name"], "John Doe");

    let server = TestServer::memory().await;
    let (status, body) = server.get("/api/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_user_returns_201_with_generated_id() {
    for server in [TestServer::sample().await, TestServer::memory().await] {
        let (status, body) = server.post("/api/users", &test_user()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["id"].is_i64());
        assert_eq!(body["name"], "Test User");
        assert_eq!(body["email"], "test@example.com");
    }
}

#[tokio::test]
async fn get_unknown_user_returns_404_message() {
    let server = TestServer::sample().await;

    let response = server
        .client
        .get(server.url("/api/users/9999"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response.json::<MessageBody>().await.unwrap();
    assert_eq!(body.message, "User not found");
}

#[tokio::test]
async fn get_sample_user_returns_record() {
    let server = TestServer::sample().await;

    let response = server
        .client
        .get(server.url("/api/users/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let user = response.json::<User>().await.unwrap();
    assert_eq!(user, User::new(1, "John Doe", "john@example.com"));
}

#[tokio::test]
async fn repeated_get_returns_identical_output() {
    let server = TestServer::sample().await;

    let first = server.get("/api/users/2").await;
    let second = server.get("/api/users/2").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn full_lifecycle_against_persistent_store() {
    let server = TestServer::memory().await;

    let (_, created) = server.post("/api/users", &test_user()).await;
    let id = created["id"].as_i64().unwrap();
    let path = format!("/api/users/{id}");

    let (status, fetched) = server.get(&path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = server
        .put(&path, &json!({"name": "Renamed", "email": "renamed@example.com"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({"id": id, "name": "Renamed", "email": "renamed@example.com"})
    );

    let (status, body) = server.delete(&path).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = server.delete(&path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.get(&path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_and_delete_in_mock_mode_do_not_persist() {
    let server = TestServer::sample().await;

    let (status, updated) = server
        .put("/api/users/1", &json!({"name": "Changed", "email": "c@example.com"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["name"], "Changed");

    let (status, body) = server.delete("/api/users/2").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (_, users) = server.get("/api/users").await;
    assert_eq!(users.as_array().unwrap().len(), 2);
    assert_eq!(users[0]["name"], "John Doe");
}

#[tokio::test]
async fn update_and_delete_unknown_user_return_404() {
    let server = TestServer::sample().await;

    let (status, body) = server.put("/api/users/9999", &test_user()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, _) = server.delete("/api/users/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_fields_are_stored_as_null() {
    let server = TestServer::memory().await;

    let response = server
        .client
        .post(server.url("/api/users"))
        .send()
        .await
        .unwrap();
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1, "name": null, "email": null}));

    let (status, body) = server.put("/api/users/1", &json!({"name": "Only"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Only", "email": null}));
}

#[tokio::test]
async fn malformed_body_returns_400_error() {
    let server = TestServer::memory().await;

    let response = server
        .client
        .post(server.url("/api/users"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorBody>().await.unwrap();
    assert!(body.error.contains("invalid JSON body"));

    let (_, users) = server.get("/api/users").await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn array_bodies_are_rejected_for_create_and_update() {
    for server in [TestServer::sample().await, TestServer::memory().await] {
        let (status, body) = server.post("/api/users", &json!(["Mallory", "m@x"])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("a JSON object"));

        let (status, _) = server.post("/api/users", &json!([])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = server.put("/api/users/1", &json!(["Mallory", "m@x"])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let server = TestServer::memory().await;
    let _ = server.post("/api/users", &json!(["Mallory", "m@x"])).await;
    let (_, users) = server.get("/api/users").await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn non_numeric_id_is_permissive_by_default() {
    let server = TestServer::sample().await;

    let (status, _) = server.get("/api/users/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn strict_ids_reject_non_numeric_id() {
    let server =
        TestServer::start(Arc::new(SampleUserRepository::new()), IdPolicy::Strict).await;

    let (status, body) = server.get("/api/users/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid user id `abc`");

    let (status, _) = server.delete("/api/users/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server.get("/api/users/1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn version_probes_return_static_payloads() {
    let server = TestServer::sample().await;

    let (status, body) = server.get("/api/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"version": "2.0", "message": "Updated API!"}));

    let (status, body) = server.get("/api/version100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"version": "2.00000", "message": "Updated API0000000!"})
    );
}

#[tokio::test]
async fn unreachable_store_returns_500_with_error() {
    let config = StoreConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        acquire_timeout: Duration::from_millis(500),
        ..StoreConfig::default()
    };
    let repo = PgUserRepository::new(connect_pool(&config));
    let server = TestServer::start(Arc::new(repo), IdPolicy::Permissive).await;

    let (status, body) = server.get("/api/users").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap().is_empty());

    let (status, body) = server.post("/api/users", &test_user()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}
