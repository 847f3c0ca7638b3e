use actix_web::{web, App, HttpServer};
use api::auth::token::TokenManager;
use api::config::AppConfig;
use api::infra::db::{connect_db, run_migrations};
use api::middleware::request_log::RequestLog;
use api::routes;
use api::state::app_state::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let tokens = TokenManager::new(config.token_config());

    let app_state = match &config.database_url {
        Some(url) => {
            let db = match connect_db(url).await {
                Ok(db) => db,
                Err(e) => {
                    eprintln!("failed to connect to database: {e}");
                    std::process::exit(1);
                }
            };
            if let Err(e) = run_migrations(&db).await {
                eprintln!("failed to run migrations: {e}");
                std::process::exit(1);
            }
            tracing::info!("database connected");
            AppState::new(db, tokens)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, running without a database");
            AppState::without_db(tokens)
        }
    };

    tracing::info!(host = %config.host, port = config.port, env = %config.env, "starting api server");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(RequestLog)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
