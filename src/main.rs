use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use mentor_match::config::{LoggingSettings, Settings};
use mentor_match::core::catalogue::catalogue;
use mentor_match::routes::{self, handle_json_payload_error, handle_path_error, AppState};
use mentor_match::services::ResultStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // MENTOR_CONFIG points at an explicit file instead of the config/ directory
    let settings = match std::env::var("MENTOR_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    }
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Configuration error: {}", e)))?;

    init_tracing(&settings.logging);

    info!("Starting mentor matching service...");

    let defaults = settings.matching.match_config().map_err(|e| {
        error!("Invalid matching defaults: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!(
        "Matching defaults: threshold {}, {} strategy, {} policy, {} catalogue topics",
        defaults.threshold(),
        defaults.strategy().as_str(),
        defaults.policy().as_str(),
        catalogue().len()
    );

    let results = ResultStore::new(settings.export.capacity, settings.export.ttl_secs);

    info!(
        "Result store initialized ({} entries, TTL: {}s)",
        settings.export.capacity, settings.export.ttl_secs
    );

    let app_state = AppState {
        results,
        defaults,
        max_population: settings.matching.max_population,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().limit(16 * 1024 * 1024).error_handler(handle_json_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
