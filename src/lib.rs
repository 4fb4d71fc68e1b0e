pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;

use actix_web::web;

use crate::errors::AppError;

/// Malformed JSON bodies surface as validation failures (422) instead of the
/// framework's default 400, keeping one error shape across the API.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

/// Same treatment for unparseable query strings (e.g. `?active=maybe`).
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health::health)))
        .service(
            web::resource("/departments")
                .route(web::post().to(handlers::department::create_department))
                .route(web::get().to(handlers::department::list_departments)),
        )
        .service(
            web::resource("/departments/{id}")
                .route(web::get().to(handlers::department::get_department))
                .route(web::delete().to(handlers::department::delete_department)),
        )
        .service(
            web::resource("/employees")
                .route(web::post().to(handlers::employee::create_employee))
                .route(web::get().to(handlers::employee::list_employees)),
        )
        .service(
            web::resource("/employees/{id}")
                .route(web::get().to(handlers::employee::get_employee))
                .route(web::patch().to(handlers::employee::update_employee))
                .route(web::put().to(handlers::employee::update_employee))
                .route(web::delete().to(handlers::employee::delete_employee)),
        );
}
