use actix_web::HttpResponse;

/// Liveness probe: answers 200 with an empty body without touching the store.
#[tracing::instrument(name = "Health check handler")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
