use actix_web::{get, web, App, HttpResponse, HttpServer, Responder, Result};
use anyhow::Context;

use crate::config::Config;
use crate::models::response::Response;
use crate::repository::database::Database;
use crate::repository::file_store::FileStore;

mod api;
mod config;
mod models;
mod repository;
mod telemetry;
mod ui;

#[get("/health")]
async fn healthcheck() -> impl Responder {
    HttpResponse::Ok().json(Response::new("Everything is working fine"))
}

async fn not_found() -> Result<HttpResponse> {
    Ok(HttpResponse::NotFound().json(Response::new("Resource not found")))
}

async fn setup(config: &Config) -> anyhow::Result<web::Data<Database>> {
    let todo_db = Database::new(FileStore::new(&config.todos_file));
    todo_db
        .initialize()
        .await
        .with_context(|| format!("failed to initialize {}", config.todos_file.display()))?;
    Ok(web::Data::new(todo_db))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init_subscriber(env!("CARGO_PKG_NAME"))?;

    let app_data = setup(&config).await?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        todos_file = %config.todos_file.display(),
        "starting todo server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .configure(api::api::config)
            .configure(ui::config)
            .service(healthcheck)
            .default_service(web::route().to(not_found))
            .wrap(actix_web::middleware::Logger::default())
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;
    Ok(())
}
