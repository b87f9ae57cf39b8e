//! Operator identity middleware.
//!
//! The console sits behind an external identity provider; by the time a
//! request reaches this process, the fronting auth layer has already
//! authenticated it and put the opaque operator identity in a trusted
//! header (configurable, `x-operator-id` by default). This middleware
//! rejects console requests without that header and exposes the identity to
//! handlers through the `OperatorId` extractor. The core never issues or
//! validates identities itself.

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::{Method, header::CONTENT_TYPE},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::api::services::console::types::{ApiResponse, ErrorCode};
use crate::config::get_config;

/// Opaque operator identity, extractable in console handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorId(pub String);

impl OperatorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for OperatorId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<OperatorId>()
                .cloned()
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("operator identity missing")),
        )
    }
}

/// Console identity guard
#[derive(Clone)]
pub struct OperatorAuth;

impl<S, B> Transform<S, ServiceRequest> for OperatorAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = OperatorAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OperatorAuthMiddleware {
            service: Rc::new(service),
            identity_header: get_config().api.identity_header.clone(),
        }))
    }
}

pub struct OperatorAuthMiddleware<S> {
    service: Rc<S>,
    identity_header: String,
}

impl<S, B> OperatorAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// CORS preflight never carries the identity header.
    fn handle_options_request(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::NoContent()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .finish()
                .map_into_right_body(),
        )
    }

    fn handle_unauthorized(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!("Console request rejected - operator identity header missing or empty");
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: ErrorCode::Unauthorized as i32,
                    message: "Unauthorized: operator identity not supplied".to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }

    fn extract_identity(req: &ServiceRequest, header: &str) -> Option<String> {
        req.headers()
            .get(header)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty() && s.len() <= 128)
            .map(|s| s.to_string())
    }
}

impl<S, B> Service<ServiceRequest> for OperatorAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        if req.method() == Method::OPTIONS {
            return Box::pin(async move { Ok(Self::handle_options_request(req)) });
        }

        let identity = Self::extract_identity(&req, &self.identity_header);

        Box::pin(async move {
            match identity {
                Some(operator) => {
                    req.extensions_mut().insert(OperatorId(operator));
                    let res = srv.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                None => Ok(Self::handle_unauthorized(req)),
            }
        })
    }
}
