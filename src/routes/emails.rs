use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::SqlitePool;

use crate::domain::{
    email_batch_query::{EmailBatchBody, EmailBatchQuery},
    email_body::{EmailBody, UpdateEmailBody},
    email_entry::EmailEntry,
};
use crate::routes::error::EmailApiError;
use crate::storage;

#[tracing::instrument(
    name = "Creating a new email handler",
    skip(body, db_pool),
    fields(email = tracing::field::Empty)
)]
pub async fn handle_create_email(
    body: web::Bytes,
    db_pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, EmailApiError> {
    let body: EmailBody = decode_body(&body)?;
    tracing::Span::current().record("email", &tracing::field::display(&body.email));

    storage::create_email(&db_pool, &body.email)
        .await
        .map_err(EmailApiError::from_storage)?;

    tracing::info!("Email created: {}", body.email);

    read_back(&db_pool, &body.email).await
}

#[tracing::instrument(
    name = "Getting an email handler",
    skip(body, db_pool),
    fields(email = tracing::field::Empty)
)]
pub async fn handle_get_email(
    body: web::Bytes,
    db_pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, EmailApiError> {
    let body: EmailBody = decode_body(&body)?;
    tracing::Span::current().record("email", &tracing::field::display(&body.email));

    tracing::info!("Get email: {}", body.email);

    read_back(&db_pool, &body.email).await
}

#[tracing::instrument(
    name = "Getting a batch of emails handler",
    skip(body, db_pool),
    fields(
        page = tracing::field::Empty,
        count = tracing::field::Empty
    )
)]
pub async fn handle_get_email_batch(
    body: web::Bytes,
    db_pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, EmailApiError> {
    let body: EmailBatchBody = decode_body(&body)?;
    let span = tracing::Span::current();
    span.record("page", body.page);
    span.record("count", body.count);

    let query = EmailBatchQuery::try_from(body).map_err(|err: String| {
        tracing::error!("Validation error: {}", err);
        EmailApiError::InvalidArgument(err)
    })?;

    tracing::info!("Get email batch: {}, {}", query.page(), query.count());

    let entries = storage::get_email_batch(&db_pool, &query)
        .await
        .map_err(EmailApiError::RetrievalFailure)?;

    json_response(&entries)
}

#[tracing::instrument(
    name = "Updating an email handler",
    skip(body, db_pool),
    fields(email = tracing::field::Empty)
)]
pub async fn handle_update_email(
    body: web::Bytes,
    db_pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, EmailApiError> {
    let body: UpdateEmailBody = decode_body(&body)?;
    tracing::Span::current().record("email", &tracing::field::display(&body.email));

    let entry = EmailEntry::try_from(body).map_err(|err: String| {
        tracing::error!("Validation error: {}", err);
        EmailApiError::InvalidArgument(err)
    })?;

    storage::update_email(&db_pool, &entry)
        .await
        .map_err(EmailApiError::from_storage)?;

    tracing::info!("Email updated: {}", entry.email);

    read_back(&db_pool, &entry.email).await
}

#[tracing::instrument(
    name = "Opting out an email handler",
    skip(body, db_pool),
    fields(email = tracing::field::Empty)
)]
pub async fn handle_delete_email(
    body: web::Bytes,
    db_pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, EmailApiError> {
    let body: EmailBody = decode_body(&body)?;
    tracing::Span::current().record("email", &tracing::field::display(&body.email));

    storage::delete_email(&db_pool, &body.email)
        .await
        .map_err(EmailApiError::from_storage)?;

    tracing::info!("Email deleted: {}", body.email);

    read_back(&db_pool, &body.email).await
}

/// Fallback for every `/email/*` resource hit with the wrong method.
pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, EmailApiError> {
    tracing::warn!("Method {} is not allowed on {}", req.method(), req.path());

    Err(EmailApiError::MethodNotAllowed)
}

fn decode_body<T: DeserializeOwned>(body: &web::Bytes) -> Result<T, EmailApiError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::error!("Failed to decode request body: {:?}", err);
        EmailApiError::InvalidArgument(format!("Invalid request body: {}", err))
    })
}

async fn read_back(db_pool: &SqlitePool, email: &str) -> Result<HttpResponse, EmailApiError> {
    let entry = storage::get_email(db_pool, email)
        .await
        .map_err(EmailApiError::RetrievalFailure)?;

    json_response(&entry)
}

fn json_response<T: Serialize>(data: &T) -> Result<HttpResponse, EmailApiError> {
    let body = serde_json::to_vec(data).map_err(|err| {
        tracing::error!("Failed to serialize response: {:?}", err);
        EmailApiError::SerializationFailure(err)
    })?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}
