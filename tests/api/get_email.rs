use mailinglist::domain::email_entry::EmailEntry;
use reqwest::Method;

use crate::helpers::TestApp;

#[tokio::test]
async fn get_returns_the_stored_record() {
    let test_app = TestApp::spawn_app().await;

    test_app.create_email("frank@test.com").await;

    let response = test_app.get_email("frank@test.com").await;

    assert_eq!(200, response.status().as_u16());

    let entry: EmailEntry = response.json().await.unwrap();

    assert_eq!(entry.email, "frank@test.com");
    assert_eq!(entry.confirmed_at.map(|at| at.timestamp()), Some(0));
    assert!(!entry.opt_out);
}

#[tokio::test]
async fn get_returns_null_for_unknown_email() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.get_email("nobody@test.com").await;

    assert_eq!(200, response.status().as_u16());

    let entry: Option<EmailEntry> = response.json().await.unwrap();

    assert!(entry.is_none());
}

#[tokio::test]
async fn get_returns_500_when_the_store_fails() {
    let test_app = TestApp::spawn_app().await;

    sqlx::query("DROP TABLE emails")
        .execute(&test_app.db_pool)
        .await
        .unwrap();

    let response = test_app.get_email("frank@test.com").await;

    assert_eq!(500, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();

    assert!(body["Err"].is_string());
}

#[tokio::test]
async fn get_rejects_post() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app
        .send(
            Method::POST,
            "/email/get",
            serde_json::json!({ "Email": "frank@test.com" }),
        )
        .await;

    assert_eq!(405, response.status().as_u16());
}
