//! # gesturehubd — gesturehub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Connect the MQTT actuation publisher
//! - Construct application services, injecting adapters via port traits
//! - Start the retrain scheduler
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use gesturehub_adapter_http_axum::state::AppState;
use gesturehub_adapter_mqtt::MqttPublisher;
use gesturehub_adapter_storage_sqlite_sqlx::{
    Config as DatabaseConfig, SqliteCapabilityStore, SqliteCheckpointStore, SqliteEventLog,
    SqliteMappingRepository, SqliteStatusRepository,
};
use gesturehub_adapter_trainer_process::ProcessTrainer;
use gesturehub_app::retrain_scheduler::RetrainScheduler;
use gesturehub_app::services::actuation::ActuationDispatcher;
use gesturehub_app::services::control_resolver::ControlResolver;
use gesturehub_app::services::gesture_service::GestureService;
use gesturehub_app::services::mapping_service::MappingService;
use gesturehub_app::services::mode_service::ModeService;
use gesturehub_app::services::statistics_service::StatisticsService;
use gesturehub_app::services::status_service::StatusService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter);

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Adapters
    let capabilities = Arc::new(SqliteCapabilityStore::new(pool.clone()));
    let mappings = Arc::new(SqliteMappingRepository::new(pool.clone()));
    let statuses = SqliteStatusRepository::new(pool.clone());
    let events = Arc::new(SqliteEventLog::new(pool.clone()));
    let checkpoints = SqliteCheckpointStore::new(pool);
    let publisher = MqttPublisher::connect(&config.mqtt);

    // Services
    let mode_service = Arc::new(ModeService::new(Arc::clone(&mappings)));
    let status_service = Arc::new(StatusService::new(statuses));
    let gesture_service = GestureService::new(
        Arc::clone(&mode_service),
        ControlResolver::new(Arc::clone(&capabilities), Arc::clone(&mappings)),
        Arc::clone(&status_service),
        ActuationDispatcher::with_timeout(publisher, config.publish_timeout()),
        Arc::clone(&events),
    );
    let mapping_service = MappingService::new(capabilities, mappings, config.vocabulary());
    let statistics_service = StatisticsService::new(Arc::clone(&events));

    // Retrain scheduler
    let scheduler = if config.scheduler.enabled {
        let scheduler_config = config.scheduler_config();
        tracing::info!(interval = ?scheduler_config.interval, "retrain scheduler started");
        Some(
            Arc::new(RetrainScheduler::new(
                events,
                checkpoints,
                ProcessTrainer::new(config.trainer.clone()),
                scheduler_config,
            ))
            .start(),
        )
    } else {
        tracing::info!("retrain scheduler disabled");
        None
    };

    // HTTP
    let state = AppState::new(
        gesture_service,
        mode_service,
        status_service,
        mapping_service,
        statistics_service,
    );
    let app = gesturehub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "gesturehubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = scheduler {
        handle.abort();
    }
    tracing::info!("gesturehubd stopped");
    Ok(())
}

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
