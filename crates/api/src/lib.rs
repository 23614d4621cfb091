//! # Slotbook API
//!
//! HTTP surface of the appointment booking engine: slot listing, booking,
//! appointment lookup and status updates.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Extract and validate request input, call the services
//! - **Middleware**: Error-to-status mapping
//! - **Config**: Environment configuration
//!
//! Handlers never touch storage directly; they go through the slot query and
//! booking services from `slotbook-core`, which in production sit on the
//! PostgreSQL store from `slotbook-db`.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling middleware
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, error_handling::HandleErrorLayer, http::HeaderValue};
use eyre::{Result, WrapErr};
use slotbook_core::models::settings::Settings;
use slotbook_core::services::booking::BookingService;
use slotbook_core::services::slot_query::SlotQueryService;
use slotbook_core::services::{Clock, SystemClock};
use slotbook_core::store::AvailabilityStore;
use slotbook_db::{DbPool, PgStore};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::middleware::error_handling::handle_middleware_error;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub slots: SlotQueryService,
    pub bookings: BookingService,
}

impl ApiState {
    /// Wires both services to the same store, settings and clock.
    pub fn new(
        store: Arc<dyn AvailabilityStore>,
        settings: Settings,
        clock: Arc<dyn Clock>,
        booking_timeout: Duration,
        max_slot_range_days: i64,
    ) -> Self {
        Self {
            slots: SlotQueryService::new(
                store.clone(),
                settings.clone(),
                clock.clone(),
                max_slot_range_days,
            ),
            bookings: BookingService::new(store, settings, clock, booking_timeout),
        }
    }
}

/// Reads the settings row once. A missing row falls back to the defaults.
pub async fn load_settings(store: &dyn AvailabilityStore) -> Result<Settings> {
    match store
        .settings()
        .await
        .wrap_err("Failed to load booking settings")?
    {
        Some(settings) => {
            info!(
                timezone = %settings.timezone,
                slot_duration_minutes = settings.slot_duration_minutes,
                min_booking_notice_hours = settings.min_booking_notice_hours,
                "Loaded booking settings"
            );
            Ok(settings)
        }
        None => {
            warn!("No settings row found, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Builds the router with every route and the tracing layer attached.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot listing
        .merge(routes::slots::routes())
        // Booking and appointment management
        .merge(routes::appointments::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and database connection
///
/// Installs the global tracing subscriber, loads settings once, and serves
/// until the listener fails.
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store: Arc<dyn AvailabilityStore> = Arc::new(PgStore::new(db_pool));
    let settings = load_settings(store.as_ref()).await?;

    let state = Arc::new(ApiState::new(
        store,
        settings,
        Arc::new(SystemClock),
        config.booking_timeout(),
        config.max_slot_range_days,
    ));

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS value")?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PATCH,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
