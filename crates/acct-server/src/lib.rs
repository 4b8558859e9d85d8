//! Account API Server
//!
//! Wires the authentication core into an actix-web application.
//! Route handlers are thin dispatch: every access decision goes through
//! [`acct_auth::policy`].
//!
//! ## Routes
//!
//! - `POST   /login`         — credentials in, bearer token out
//! - `POST   /users`         — open registration
//! - `GET    /users`         — all accounts, administrators only
//! - `GET    /users/profile` — the caller's own account
//! - `PATCH  /users/{id}`    — owner or administrator
//! - `DELETE /users/{id}`    — owner or administrator
mod config;

pub use config::Config;

use acct_auth::Account;
use acct_auth::AuthError;
use acct_auth::Crypto;
use acct_auth::Directory;
use acct_auth::Memory;
use acct_core::Unique;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

/// Registers every route against directory type `D`.
/// Body and path extraction failures answer with the same JSON error shape.
#[rustfmt::skip]
pub fn routes<D>(cfg: &mut web::ServiceConfig)
where
    D: Directory + 'static,
{
    cfg.app_data(web::JsonConfig::default().error_handler(|e, _| AuthError::Invalid(e.to_string()).into()))
        .app_data(web::PathConfig::default().error_handler(|_, _| AuthError::NotFound.into()))
        .route("/health", web::get().to(health))
        .route("/login", web::post().to(acct_auth::login::<D>))
        .service(
            web::scope("/users")
                .route("", web::post().to(acct_auth::register::<D>))
                .route("", web::get().to(acct_auth::list::<D>))
                .route("/profile", web::get().to(acct_auth::profile::<D>))
                .route("/{id}", web::patch().to(acct_auth::update::<D>))
                .route("/{id}", web::delete().to(acct_auth::remove::<D>)),
        );
}

/// Inserts the configured administrator unless the email is already taken.
pub async fn seed<D>(directory: &D, email: &str, password: &str) -> Result<(), AuthError>
where
    D: Directory,
{
    let hashword = acct_auth::password::hash(password)?;
    let admin = Account::new(String::from("administrator"), email.to_string(), hashword)
        .with_admin(true);
    match directory.insert(admin).await {
        Ok(admin) => log::info!("seeded administrator {}", admin.id()),
        Err(AuthError::Conflict) => log::info!("administrator email already registered"),
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Serves the API from `directory` until shutdown.
pub async fn serve<D>(config: Config, directory: D) -> anyhow::Result<()>
where
    D: Directory + Send + Sync + 'static,
{
    if let Some((email, password)) = config.admin() {
        seed(&directory, email, password).await?;
    }
    let crypto = web::Data::new(Crypto::new(config.secret.as_bytes()));
    let directory = web::Data::new(directory);
    log::info!("listening on {}:{}", config.host, config.port);
    let server = HttpServer::new(move || {
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
            .configure(routes::<D>)
    });
    let server = match config.workers {
        Some(n) => server.workers(n),
        None => server,
    };
    server.bind(config.bind())?.run().await?;
    Ok(())
}

/// Validates configuration, picks a directory, and serves.
pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;
    #[cfg(feature = "database")]
    if let Some(url) = config.database_url.clone() {
        let client = db(&url).await?;
        return serve(config, client).await;
    }
    log::warn!("no database configured, accounts are kept in memory");
    serve(config, Memory::default()).await
}

/// Connects to PostgreSQL and ensures the accounts table exists.
#[cfg(feature = "database")]
async fn db(url: &str) -> anyhow::Result<std::sync::Arc<tokio_postgres::Client>> {
    log::info!("connecting to database");
    let (client, connection) = tokio_postgres::connect(url, tokio_postgres::NoTls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    acct_auth::migrate(&client).await?;
    Ok(std::sync::Arc::new(client))
}
