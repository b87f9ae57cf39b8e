//! HTTP server startup.
//!
//! Wires services, middleware and routes. The visitor routes (`/{code}`)
//! are registered last: they are wildcards, and everything mounted before
//! them takes precedence.

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::middleware::{OperatorAuth, RequestIdMiddleware};
use crate::api::services::console::console_v1_routes;
use crate::api::services::{CaptureEndpoint, HealthService, RedirectService};
use crate::config::{CorsConfig, get_config};
use crate::services::{CaptureService, LinkService, OwnershipService, ResolverService};
use crate::storage::SeaOrmStorage;

fn validate_cors_config(cors: &CorsConfig) {
    if cors.enabled && cors.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty; no cross-origin \
            requests will be allowed. Set allowed_origins explicitly."
        );
    }
}

fn build_cors_middleware(config: &CorsConfig) -> Cors {
    // Disabled means the browser's default same-origin policy.
    if !config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default();

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            "Content-Type",
            get_config().api.identity_header.as_str(),
        ])
        .max_age(config.max_age as usize)
}

/// Start the HTTP server and block until shutdown.
pub async fn run_server(storage: Arc<SeaOrmStorage>) -> Result<()> {
    let config = get_config();

    validate_cors_config(&config.api.cors);

    let resolver = Arc::new(ResolverService::new(storage.clone()));
    let capture = Arc::new(CaptureService::new(storage.clone()));
    let link_service = Arc::new(LinkService::new(storage.clone()));
    let ownership = Arc::new(OwnershipService::new(storage.clone()));

    let console_prefix = config.api.console_prefix.clone();
    let cors_config = config.api.cors.clone();

    info!(
        "Starting server at http://{}:{} (console at {})",
        config.server.host, config.server.port, console_prefix
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(resolver.clone()))
            .app_data(web::Data::new(capture.clone()))
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(ownership.clone()))
            .wrap(Compress::default())
            .route("/healthz", web::get().to(HealthService::health))
            .service(
                web::scope(&console_prefix)
                    .wrap(OperatorAuth)
                    .wrap(RequestIdMiddleware)
                    .wrap(build_cors_middleware(&cors_config))
                    .service(console_v1_routes()),
            )
            .route("/{code}", web::get().to(RedirectService::handle_redirect))
            .route("/{code}", web::post().to(CaptureEndpoint::handle_capture))
    })
    .workers(config.server.cpu_count)
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
