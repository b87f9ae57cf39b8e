//! Visitor-facing redirect endpoint.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::errors::GatelinkError;
use crate::services::ResolverService;

/// Plain-text error surface for visitor endpoints. The 404 is cacheable:
/// unknown codes stay unknown for at least a while.
pub fn visitor_error(err: &GatelinkError) -> HttpResponse {
    match err {
        GatelinkError::NotFound(_) | GatelinkError::InvalidCode(_) => {
            HttpResponse::build(StatusCode::NOT_FOUND)
                .insert_header(("Content-Type", "text/html; charset=utf-8"))
                .insert_header(("Cache-Control", "public, max-age=60"))
                .body("link not found")
        }
        _ => HttpResponse::build(err.http_status())
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("service unavailable"),
    }
}

pub struct RedirectService {}

impl RedirectService {
    #[instrument(skip(resolver), fields(code = %path))]
    pub async fn handle_redirect(
        path: web::Path<String>,
        resolver: web::Data<Arc<ResolverService>>,
    ) -> impl Responder {
        let code = path.into_inner();

        match resolver.resolve(&code).await {
            Ok(destination) => HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                .insert_header(("Location", destination))
                .finish(),
            Err(e) => {
                debug!("Redirect for '{}' failed: {}", code, e);
                visitor_error(&e)
            }
        }
    }
}
