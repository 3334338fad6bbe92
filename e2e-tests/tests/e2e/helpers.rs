use spamcheck_rs::analysis::AnalysisEngine;
use spamcheck_rs::api::{ApiServer, AppState};
use spamcheck_rs::history::ScanStore;
use spamcheck_rs::model::ModelRegistry;
use sqlx::sqlite::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub const SPAM_TEXT: &str =
    "WINNER! You have won $1,000,000! Click here NOW to claim your prize!!!";
pub const HAM_TEXT: &str = "Hi John, can we schedule a meeting tomorrow at 3pm?";

/// One in-process API server over temporary model artifacts and database
pub struct TestServer {
    pub base_url: String,
    _dir: TempDir,
}

/// Write a small vectorizer and two model artifacts into `dir`
fn write_artifacts(dir: &Path) {
    let vectorizer = serde_json::json!({
        "vocabulary": {"claim": 0, "click": 1, "free": 2, "prize": 3, "winner": 4},
        "idf": [1.0, 1.0, 1.0, 1.0, 1.0],
    });
    std::fs::write(dir.join("vectorizer.json"), vectorizer.to_string()).unwrap();

    let logreg = serde_json::json!({
        "name": "Logistic Regression",
        "kind": "logistic_regression",
        "coef": [4.0, 4.0, 4.0, 4.0, 4.0],
        "intercept": -3.178,
    });
    std::fs::write(dir.join("01_logreg.json"), logreg.to_string()).unwrap();

    let bayes = serde_json::json!({
        "name": "Naive Bayes",
        "kind": "naive_bayes",
        "class_log_prior": [-0.693, -0.693],
        "feature_log_prob": [
            [-3.0, -3.0, -3.0, -3.0, -3.0],
            [-0.5, -0.5, -0.5, -0.5, -0.5],
        ],
    });
    std::fs::write(dir.join("02_bayes.json"), bayes.to_string()).unwrap();
}

/// Spawn a server with two loaded models
pub async fn spawn_server() -> TestServer {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path());

    let registry = ModelRegistry::load(dir.path(), "logistic_regression").unwrap();
    let engine = AnalysisEngine::new(Arc::new(registry), Default::default()).unwrap();

    spawn_with_engine(Some(Arc::new(engine)), dir).await
}

/// Spawn a server with no models loaded (degraded mode)
pub async fn spawn_degraded_server() -> TestServer {
    let dir = TempDir::new().unwrap();
    spawn_with_engine(None, dir).await
}

async fn spawn_with_engine(engine: Option<Arc<AnalysisEngine>>, dir: TempDir) -> TestServer {
    let db_path = dir.path().join("scans.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePool::connect(&db_url).await.unwrap();
    let store = ScanStore::new(pool);
    store.init_db().await.unwrap();

    let state = Arc::new(AppState {
        engine,
        store,
        batch_limit: 100,
    });

    let server = ApiServer::new(state, "127.0.0.1:0".to_string());
    let router = server.router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        _dir: dir,
    }
}
