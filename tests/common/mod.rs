use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use sublog::config::Config;

pub const ROUTE: &str = "/api/submission-logs";

/// A running test server reading from its own temporary logs directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub logs_dir: PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Write raw content to the log file for `date`, creating the directory if needed.
    pub fn write_log(&self, date: &str, content: &str) {
        self.write_file(&format!("submissions-{date}.jsonl"), content);
    }

    /// Write an arbitrary file into the logs directory.
    pub fn write_file(&self, name: &str, content: &str) {
        std::fs::create_dir_all(&self.logs_dir).expect("create logs dir failed");
        std::fs::write(self.logs_dir.join(name), content).expect("write log file failed");
    }

    /// Write one JSON record per line.
    pub fn write_records(&self, date: &str, records: &[Value]) {
        let content: String = records.iter().map(|r| format!("{r}\n")).collect();
        self.write_log(date, &content);
    }

    /// GET a path, return (body, status).
    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// List log files.
    pub async fn list(&self) -> (Value, StatusCode) {
        self.get(ROUTE).await
    }

    /// Fetch one day's submissions.
    pub async fn for_date(&self, date: &str) -> (Value, StatusCode) {
        self.get(&format!("{ROUTE}?date={date}")).await
    }
}

/// Spawn a test app whose logs directory exists and is empty.
pub async fn spawn_app() -> TestApp {
    let app = spawn_app_without_dir().await;
    std::fs::create_dir_all(&app.logs_dir).expect("create logs dir failed");
    app
}

/// Spawn a test app pointed at a logs directory that does not exist.
pub async fn spawn_app_without_dir() -> TestApp {
    let logs_dir = std::env::temp_dir().join(format!(
        "sublog_test_{}",
        Uuid::now_v7().to_string().replace('-', "")
    ));

    let config = Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        logs_dir: logs_dir.clone(),
        file_prefix: "submissions-".to_string(),
        file_suffix: ".jsonl".to_string(),
        route: ROUTE.to_string(),
        log_level: "warn".to_string(),
    };

    let app = sublog::build_app(config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        logs_dir,
    }
}

/// Remove the test logs directory.
pub fn cleanup(app: TestApp) {
    let _ = std::fs::remove_dir_all(&app.logs_dir);
}
