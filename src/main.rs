//! Bloom Studio server binary.
//!
//! Loads configuration from the environment, picks PostgreSQL or in-memory
//! repositories, and serves the HTTP API.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bloom_studio::adapters::http::{build_router, ApiPorts, ApiSettings};
use bloom_studio::adapters::memory::{
    InMemoryAnnouncementRepository, InMemoryBookingRepository, InMemoryClassSessionRepository,
    InMemoryClassTypeRepository, InMemoryMemberRepository, InMemoryStore,
};
use bloom_studio::adapters::postgres::{
    connect, run_migrations, PostgresAnnouncementRepository, PostgresBookingRepository,
    PostgresClassSessionRepository, PostgresClassTypeRepository, PostgresMemberRepository,
};
use bloom_studio::adapters::{JwtSessionValidator, TracingEventPublisher};
use bloom_studio::config::AppConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let addr = config.server.socket_addr()?;
    let settings = ApiSettings::from_config(&config)?;
    let ports = build_ports(&config).await?;
    let app = build_router(ports, &settings);

    tracing::info!(
        environment = ?config.server.environment,
        auto_promote_waitlist = settings.auto_promote_waitlist,
        "starting Bloom Studio on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn build_ports(config: &AppConfig) -> Result<ApiPorts, BoxError> {
    let events = Arc::new(TracingEventPublisher::new());
    let validator = Arc::new(JwtSessionValidator::new(&config.auth));

    if config.database.is_in_memory() {
        tracing::warn!("no database url configured; using in-memory storage");
        let store = InMemoryStore::new();
        return Ok(ApiPorts {
            class_types: Arc::new(InMemoryClassTypeRepository::new(store.clone())),
            sessions: Arc::new(InMemoryClassSessionRepository::new(store.clone())),
            bookings: Arc::new(InMemoryBookingRepository::new(store.clone())),
            members: Arc::new(InMemoryMemberRepository::new(store.clone())),
            announcements: Arc::new(InMemoryAnnouncementRepository::new(store)),
            events,
            validator,
        });
    }

    let pool = connect(&config.database).await?;
    if config.database.run_migrations {
        run_migrations(&pool).await?;
    }

    Ok(ApiPorts {
        class_types: Arc::new(PostgresClassTypeRepository::new(pool.clone())),
        sessions: Arc::new(PostgresClassSessionRepository::new(pool.clone())),
        bookings: Arc::new(PostgresBookingRepository::new(pool.clone())),
        members: Arc::new(PostgresMemberRepository::new(pool.clone())),
        announcements: Arc::new(PostgresAnnouncementRepository::new(pool)),
        events,
        validator,
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
