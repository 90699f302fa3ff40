use actix_web::web;

mod emails;
mod error;
mod health_check;

pub use emails::*;
pub use error::EmailApiError;
pub use health_check::health_check;

/// Route table of the JSON API. Every `/email/*` resource accepts exactly one
/// method and answers any other with 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health_check", web::get().to(health_check))
        .service(
            web::resource("/email/create")
                .route(web::post().to(handle_create_email))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/email/get")
                .route(web::get().to(handle_get_email))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/email/get_batch")
                .route(web::get().to(handle_get_email_batch))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/email/update")
                .route(web::put().to(handle_update_email))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/email/delete")
                .route(web::post().to(handle_delete_email))
                .default_service(web::to(method_not_allowed)),
        );
}
