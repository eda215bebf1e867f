// tests/common/mod.rs

use std::path::PathBuf;

use quiz_backend::{config::Config, db, routes, seed, state::AppState};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub client: reqwest::Client,
}

/// Spawns the app on a random port backed by a fresh in-memory database.
/// When `seeded` is true the built-in question set is loaded first.
pub async fn spawn_app(seeded: bool) -> TestApp {
    // A single connection that never expires: every in-memory connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    db::run_migrations(&pool)
        .await
        .expect("Failed to migrate database");

    if seeded {
        seed::seed_questions(&pool)
            .await
            .expect("Failed to seed questions");
    }

    let config = test_config("sqlite::memory:".to_string(), 1, seeded);
    serve(pool, config).await
}

/// Spawns the app over a pooled database file in the temp dir, opened the
/// way the binary opens it. Returns the file path so the caller can remove it.
#[allow(dead_code)]
pub async fn spawn_app_on_file(max_connections: u32) -> (TestApp, PathBuf) {
    let path = std::env::temp_dir().join(format!("quiz-backend-{}.db", Uuid::new_v4()));
    let config = test_config(
        format!("sqlite://{}", path.display()),
        max_connections,
        false,
    );

    let pool = db::connect(&config)
        .await
        .expect("Failed to open database file");
    db::run_migrations(&pool)
        .await
        .expect("Failed to migrate database");

    (serve(pool, config).await, path)
}

fn test_config(database_url: String, database_max_connections: u32, seed_questions: bool) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url,
        database_max_connections,
        cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
        seed_questions,
    }
}

async fn serve(pool: SqlitePool, config: Config) -> TestApp {
    let state = AppState {
        pool: pool.clone(),
        config,
    };
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        pool,
        client: reqwest::Client::new(),
    }
}

/// Creates a question through the API and returns its id.
#[allow(dead_code)]
pub async fn create_question(app: &TestApp, options: &[&str], correct_answer: i64) -> i64 {
    let response = app
        .client
        .post(format!("{}/api/v1/questions", app.address))
        .json(&serde_json::json!({
            "question": format!("Pick option {}", correct_answer),
            "options": options,
            "correctAnswer": correct_answer,
            "explanation": "Because.",
            "category": "Test",
            "difficulty": "easy"
        }))
        .send()
        .await
        .expect("Failed to create question");

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    body["data"]["id"].as_i64().expect("Question id missing")
}
