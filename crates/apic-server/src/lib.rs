//! Authentication Server
//!
//! Serves token issuance, revocation, and claim inspection over actix-web,
//! backed by PostgreSQL for users and revocation markers.
//!
//! ## Routes
//!
//! - `POST /token` — credentials in, signed token out
//! - `POST /token/revoke` — invalidate the presented bearer token
//! - `GET /me` — decoded claims of the presented bearer token
//! - `GET /health` — database liveness
mod config;

pub use config::Config;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use apic_auth::Crypto;
use apic_auth::Directory;
use apic_auth::Registry;
use std::sync::Arc;
use tokio_postgres::Client;

/// Connect to PostgreSQL and keep the connection driven in the background.
pub async fn db(url: &str) -> anyhow::Result<Arc<Client>> {
    log::info!("connecting to database");
    let (client, connection) = tokio_postgres::connect(url, tokio_postgres::NoTls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    Ok(Arc::new(client))
}

async fn health(client: web::Data<Client>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    log::info!("starting with {:?}", config);
    let client = db(&config.db_url).await?;
    apic_auth::migrate(&client).await?;
    let crypto = web::Data::new(Crypto::new(config.secret.as_bytes(), config.revocation)?);
    let directory = web::Data::from(Arc::new(client.clone()) as Arc<dyn Directory>);
    let registry = web::Data::from(Arc::new(client.clone()) as Arc<dyn Registry>);
    let client = web::Data::from(client);
    log::info!("revocation mode {}", config.revocation);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(crypto.clone())
            .app_data(directory.clone())
            .app_data(registry.clone())
            .app_data(client.clone())
            .route("/health", web::get().to(health))
            .configure(apic_auth::routes)
    })
    .workers(config.workers)
    .bind(&config.bind)?
    .run()
    .await?;
    Ok(())
}
