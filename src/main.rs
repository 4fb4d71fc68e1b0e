use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use minierp_backend::{configure_routes, db, json_config, query_config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let pool = db::create_pool()
        .await
        .expect("Failed to connect to the database");
    db::init_schema(&pool)
        .await
        .expect("Failed to initialize the database schema");

    info!("Starting server at 127.0.0.1:8080");

    HttpServer::new(move || {
        App::new()
            .app_data(json_config())
            .app_data(query_config())
            .app_data(web::Data::new(pool.clone()))
            .configure(configure_routes)
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
}
