use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use taskbook::{
    auth::SessionKeys,
    config::Config,
    routes,
    store::{PgTaskStore, PgUserStore},
    AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if config.uses_default_secret() {
        log::warn!("SECRET_KEY is not set; sessions are signed with the development default");
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(io_error)?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(io_error)?;

    let state = web::Data::new(AppState::new(
        Arc::new(PgTaskStore::new(pool.clone())),
        Arc::new(PgUserStore::new(pool)),
        SessionKeys::new(config.secret_key.as_bytes()),
        config.password_cost,
    ));

    log::info!("Starting TaskBook server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::mount(state.clone()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}

fn io_error<E>(error: E) -> std::io::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    std::io::Error::new(std::io::ErrorKind::Other, error)
}
