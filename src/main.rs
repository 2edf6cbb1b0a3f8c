use enrollment_service::{
    AppState, SeedData,
    config::{AppConfig, Env},
    create_router,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point: loads configuration, initializes logging,
/// seeds the in-memory stores and serves the HTTP API.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    // Without an explicit APP_ENV=local this is Production, and a missing JWT_SECRET panics here.
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // RUST_LOG wins; otherwise verbose defaults for the service and the HTTP stack.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "enrollment_service=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment
    match config.env {
        Env::Local => {
            // LOCAL: pretty, multi-line output for reading in a terminal.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: one JSON object per line for log aggregation.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Seed Data
    // SEED_FILE is optional; without it both stores start empty.
    let seed = match &config.seed_file {
        Some(path) => SeedData::from_path(path).expect("FATAL: failed to load SEED_FILE"),
        None => SeedData::default(),
    };
    tracing::info!(
        students = seed.students.len(),
        enrollments = seed.enrollments.len(),
        "seed data loaded"
    );

    // 5. Unified State Assembly
    // Builds the in-memory enrollment store and student directory, and wires
    // them into the enrollment service shared by every handler.
    let bind_addr = config.bind_addr.clone();
    let app_state = AppState::from_seed(seed, config);

    // 6. Router and Server Startup
    let app = create_router(app_state);

    // Binds the TCP listener on BIND_ADDR (default 0.0.0.0:3000).
    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: failed to bind BIND_ADDR");

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    // The long-running Axum server process.
    axum::serve(listener, app).await.expect("FATAL: server error");
}
