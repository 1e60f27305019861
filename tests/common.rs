use rsvp_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        memory_draft_repo::InMemoryDraftRepo,
        sqlite_auth_repo::SqliteAuthRepo,
        sqlite_event_repo::SqliteEventRepo,
        sqlite_field_repo::SqliteFieldRepo,
        sqlite_guest_repo::SqliteGuestRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    domain::services::auth_service::AuthService,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::{json, Value};

pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            draft_ttl_hours: 24,
            maintenance_interval_secs: 60,
        };

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            auth_repo,
            field_repo: Arc::new(SqliteFieldRepo::new(pool.clone())),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            guest_repo: Arc::new(SqliteGuestRepo::new(pool.clone())),
            draft_repo: Arc::new(InMemoryDraftRepo::new()),
            auth_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Sends a request, attaching the session cookie and CSRF header when given.
    pub async fn send(&self, method: &str, uri: &str, auth: Option<&AuthHeaders>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn register(&self, username: &str) -> Response {
        self.send(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({ "username": username, "password": TEST_PASSWORD })),
        ).await
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthHeaders {
        let payload = json!({
            "username": username,
            "password": password
        });

        let response = self.send("POST", "/api/v1/auth/login", None, Some(payload)).await;

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let access_token = cookie_value(&response, "access_token").expect("No access_token cookie returned");

        let body_json = parse_body(response).await;
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }

    pub async fn register_and_login(&self, username: &str) -> AuthHeaders {
        let response = self.register(username).await;
        assert!(response.status().is_success(), "register failed: {}", response.status());
        self.login(username, TEST_PASSWORD).await
    }

    /// Creates an event dated 30 days ahead and returns its JSON.
    pub async fn create_event(&self, auth: &AuthHeaders, link: &str, fields: &[&str]) -> Value {
        let response = self.send("POST", "/api/v1/events", Some(auth), Some(event_payload(link, fields))).await;
        let status = response.status();
        let body = parse_body(response).await;
        assert!(status.is_success(), "event creation failed: {} {}", status, body);
        body
    }

    pub async fn confirm_guest(&self, event_id: &str, fields: Value) -> Response {
        self.send(
            "POST",
            "/api/v1/public/guests",
            None,
            Some(json!({ "event_id": event_id, "fields": fields, "action": "next" })),
        ).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

#[allow(dead_code)]
pub fn event_payload(link: &str, fields: &[&str]) -> Value {
    let date = chrono::Utc::now() + chrono::Duration::days(30);
    json!({
        "name": "Festa Junina",
        "link": link,
        "description": "Quadrilha, pamonha e quentão",
        "image_url": "https://images.example.com/festa.png",
        "date": date.to_rfc3339(),
        "confirmation_deadline": (date - chrono::Duration::days(5)).to_rfc3339(),
        "fields": fields,
    })
}

#[allow(dead_code)]
pub fn cookie_value(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .filter_map(|c| c.split(';').next())
        .find_map(|pair| pair.strip_prefix(prefix.as_str()).map(str::to_string))
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
