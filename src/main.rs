use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use datajpa_api::api::{self, AppState};
use datajpa_api::config::AppConfig;
use datajpa_api::infrastructure::database;
use datajpa_api::infrastructure::logging::init_logging;
use datajpa_api::infrastructure::repositories::SqliteMemberRepository;
use datajpa_api::infrastructure::seed::{seed_members, SEED_MEMBER_COUNT};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::load().expect("Invalid configuration");

    init_logging(&config.log_level);
    tracing::info!(
        database = %config.database.url,
        default_page_size = config.paging.default_page_size,
        max_page_size = config.paging.max_page_size,
        "Configuration loaded"
    );

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = database::init(&config.database)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connected successfully");

    if config.seed_members {
        let member_repo = SqliteMemberRepository::new(pool.clone());
        seed_members(&member_repo, SEED_MEMBER_COUNT)
            .await
            .expect("Failed to seed members");
    }

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = api::router(AppState::new(pool, config.paging))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Server listening on {}", config.server_addr);

    let listener = tokio::net::TcpListener::bind(config.server_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
