use reqwest::{Method, Response};
use sqlx::SqlitePool;
use std::path::PathBuf;
use uuid::Uuid;

use mailinglist::{
    config::Settings,
    startup::{get_connection_db_pool, Application},
};

pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
    pub db_path: PathBuf,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        // Every test gets its own database file, so ids always start at 1.
        let db_path = std::env::temp_dir().join(format!("mailinglist_{}.db", Uuid::new_v4()));
        let config = Settings {
            db: db_path.to_string_lossy().into_owned(),
            // Port 0 lets the OS pick a free port per test
            bind_json: String::from("127.0.0.1:0"),
        };

        let application = Application::build(config.clone())
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        let db_pool = get_connection_db_pool(&config);

        TestApp {
            address,
            db_pool,
            db_path,
        }
    }

    pub async fn send(&self, method: Method, path: &str, body: serde_json::Value) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.address, path);

        client
            .request(method, &url)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn create_email(&self, email: &str) -> Response {
        self.send(
            Method::POST,
            "/email/create",
            serde_json::json!({ "Email": email }),
        )
        .await
    }

    pub async fn get_email(&self, email: &str) -> Response {
        self.send(
            Method::GET,
            "/email/get",
            serde_json::json!({ "Email": email }),
        )
        .await
    }

    pub async fn get_email_batch(&self, page: i64, count: i64) -> Response {
        self.send(
            Method::GET,
            "/email/get_batch",
            serde_json::json!({ "Page": page, "Count": count }),
        )
        .await
    }

    pub async fn update_email(&self, body: serde_json::Value) -> Response {
        self.send(Method::PUT, "/email/update", body).await
    }

    pub async fn delete_email(&self, email: &str) -> Response {
        self.send(
            Method::POST,
            "/email/delete",
            serde_json::json!({ "Email": email }),
        )
        .await
    }

    pub async fn count_emails(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM emails")
            .fetch_one(&self.db_pool)
            .await
            .expect("Query to count emails failed.")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        // The server task may still hold the file open; unlinking it is fine on unix.
        let _ = std::fs::remove_file(&self.db_path);
    }
}

pub async fn error_message(response: Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Body is not JSON.");

    body["Err"]
        .as_str()
        .expect("Body has no Err field.")
        .to_string()
}
