//! Console submission listing handler.
//!
//! Thin HTTP shim over `OwnershipService`; the tenant-isolation check lives
//! in the service, not here.

use actix_web::{Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::trace;

use crate::api::middleware::OperatorId;
use crate::services::{OwnershipService, SubmissionQuery};

use super::helpers::{clamp_pagination, error_from_gatelink, paginated_response};
use super::types::{GetSubmissionsQuery, SubmissionResponse};

pub async fn get_submissions(
    operator: OperatorId,
    query: web::Query<GetSubmissionsQuery>,
    service: web::Data<Arc<OwnershipService>>,
) -> ActixResult<impl Responder> {
    let query = query.into_inner();
    trace!(
        "Console: list submissions for '{}' (code filter: {:?})",
        operator.as_str(),
        query.code
    );

    let (page, page_size) = clamp_pagination(query.page, query.page_size);

    let result = service
        .list_submissions_for_owner(
            operator.as_str(),
            SubmissionQuery {
                code: query.code,
                page,
                page_size,
            },
        )
        .await;

    let response = match result {
        Ok((rows, total)) => {
            let rows: Vec<SubmissionResponse> =
                rows.into_iter().map(SubmissionResponse::from).collect();
            paginated_response(rows, page, page_size, total)
        }
        Err(e) => error_from_gatelink(&e),
    };

    Ok(response)
}
