//! Liveness endpoint.

use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use std::sync::Arc;

use crate::storage::SeaOrmStorage;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    backend: String,
}

pub struct HealthService {}

impl HealthService {
    pub async fn health(storage: web::Data<Arc<SeaOrmStorage>>) -> impl Responder {
        HttpResponse::Ok().json(HealthStatus {
            status: "ok",
            backend: storage.info().backend,
        })
    }
}
