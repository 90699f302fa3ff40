use mailinglist::domain::email_entry::EmailEntry;
use reqwest::Method;

use crate::helpers::TestApp;

#[tokio::test]
async fn delete_opts_out_the_record() {
    let test_app = TestApp::spawn_app().await;

    test_app.create_email("frank@test.com").await;

    let response = test_app.delete_email("frank@test.com").await;

    assert_eq!(200, response.status().as_u16());

    let entry: EmailEntry = response.json().await.unwrap();

    assert_eq!(entry.email, "frank@test.com");
    assert!(entry.opt_out);
}

#[tokio::test]
async fn deleted_record_is_still_retrievable_and_not_listed() {
    let test_app = TestApp::spawn_app().await;

    test_app.create_email("frank@test.com").await;
    test_app.delete_email("frank@test.com").await;

    let entry: EmailEntry = test_app
        .get_email("frank@test.com")
        .await
        .json()
        .await
        .unwrap();
    let batch: Vec<EmailEntry> = test_app
        .get_email_batch(1, 10)
        .await
        .json()
        .await
        .unwrap();

    assert!(entry.opt_out);
    assert!(batch.is_empty());
    assert_eq!(test_app.count_emails().await, 1);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let test_app = TestApp::spawn_app().await;

    test_app.create_email("frank@test.com").await;

    let first: EmailEntry = test_app
        .delete_email("frank@test.com")
        .await
        .json()
        .await
        .unwrap();
    let second = test_app.delete_email("frank@test.com").await;

    assert_eq!(200, second.status().as_u16());

    let second: EmailEntry = second.json().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn delete_of_unknown_email_returns_null() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.delete_email("nobody@test.com").await;

    assert_eq!(200, response.status().as_u16());

    let entry: Option<EmailEntry> = response.json().await.unwrap();

    assert!(entry.is_none());
    assert_eq!(test_app.count_emails().await, 0);
}

#[tokio::test]
async fn delete_rejects_get() {
    let test_app = TestApp::spawn_app().await;

    test_app.create_email("frank@test.com").await;

    let response = test_app
        .send(
            Method::GET,
            "/email/delete",
            serde_json::json!({ "Email": "frank@test.com" }),
        )
        .await;

    assert_eq!(405, response.status().as_u16());

    let entry: EmailEntry = test_app
        .get_email("frank@test.com")
        .await
        .json()
        .await
        .unwrap();

    assert!(!entry.opt_out);
}
