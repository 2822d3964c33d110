use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use eduassess::config::{AdminSignup, Config, LoginLimit};

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: &str,
    ) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({ "email": email, "password": password, "name": name, "role": role }))
            .send()
            .await
            .expect("register request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Register the first admin, return its token.
    pub async fn admin_token(&self) -> String {
        let (body, status) = self
            .register("admin@test.com", "password123", "Admin", "admin")
            .await;
        assert_eq!(status, StatusCode::CREATED, "admin register failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Register a student, return its token.
    pub async fn student_token(&self, email: &str) -> String {
        let (body, status) = self.register(email, "password123", "Student", "student").await;
        assert_eq!(status, StatusCode::CREATED, "student register failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Create an assessment through the admin API, return its id.
    pub async fn create_assessment(&self, token: &str, category: &str, questions: Value) -> i64 {
        let (body, status) = self
            .post_auth(
                "/api/admin/assessments",
                token,
                &json!({
                    "title": format!("{category} basics"),
                    "description": "A short quiz",
                    "skill_category": category,
                    "questions": questions,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create assessment failed: {body}");
        body["assessmentId"].as_i64().unwrap()
    }

    /// Question ids of an assessment in display order.
    pub async fn question_ids(&self, token: &str, assessment_id: i64) -> Vec<i64> {
        let (body, status) = self
            .get_auth(&format!("/api/assessments/{assessment_id}"), token)
            .await;
        assert_eq!(status, StatusCode::OK, "get assessment failed: {body}");
        body["questions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["id"].as_i64().unwrap())
            .collect()
    }

    pub async fn submit(&self, token: &str, assessment_id: i64, answers: Value) -> (Value, StatusCode) {
        self.post_auth(
            &format!("/api/assessments/{assessment_id}/submit"),
            token,
            &json!({ "answers": answers }),
        )
        .await
    }

    /// Make an authenticated GET request.
    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated POST request with JSON body.
    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// `n` one-point questions whose answer key is always "A".
pub fn one_point_questions(n: usize) -> Value {
    Value::Array(
        (0..n)
            .map(|i| {
                json!({
                    "question_text": format!("Question {}", i + 1),
                    "option_a": "right",
                    "option_b": "wrong",
                    "option_c": "wrong",
                    "option_d": "wrong",
                    "correct_answer": "A",
                    "points": 1,
                })
            })
            .collect(),
    )
}

fn admin_url(base_url: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.to_string())
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let db_name = format!("eduassess_test_{}", Uuid::now_v7().simple());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url: test_url,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        log_level: "warn".to_string(),
        token_ttl_hours: 24,
        max_body_size: 1_048_576,
        db_max_connections: 5,
        admin_signup: AdminSignup::Bootstrap,
        login_limit: LoginLimit::default(),
        cors_origins: vec![],
        static_dir: None,
    };

    let app = eduassess::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        pool,
        client: Client::new(),
        db_name,
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
