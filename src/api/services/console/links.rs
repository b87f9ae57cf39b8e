//! Console link management handlers.
//!
//! Every handler takes the operator identity from the `OperatorId`
//! extractor; the service layer enforces that operators only ever touch
//! their own links.

use actix_web::{Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{info, trace};

use crate::api::middleware::OperatorId;
use crate::services::{CreateLinkRequest, LinkService};

use super::helpers::{api_result, clamp_pagination, paginated_response, error_from_gatelink};
use super::types::{GetLinksQuery, LinkResponse, PostNewLink};

pub async fn post_link(
    operator: OperatorId,
    body: web::Json<PostNewLink>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let body = body.into_inner();
    info!(
        "Console: create link request from '{}' (destination: {})",
        operator.as_str(),
        body.destination
    );

    let result = service
        .create_link(
            operator.as_str(),
            CreateLinkRequest {
                code: body.code,
                destination: body.destination,
                label: body.label,
            },
        )
        .await
        .map(|created| LinkResponse::from(created.link));

    Ok(api_result(result))
}

pub async fn get_links(
    operator: OperatorId,
    query: web::Query<GetLinksQuery>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    trace!("Console: list links for '{}'", operator.as_str());
    let (page, page_size) = clamp_pagination(query.page, query.page_size);

    let response = match service.list_links(operator.as_str(), page, page_size).await {
        Ok((links, total)) => {
            let links: Vec<LinkResponse> = links.into_iter().map(LinkResponse::from).collect();
            paginated_response(links, page, page_size, total)
        }
        Err(e) => error_from_gatelink(&e),
    };

    Ok(response)
}

pub async fn get_link(
    operator: OperatorId,
    path: web::Path<String>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let code = path.into_inner();

    let result = service
        .get_link_for_owner(operator.as_str(), &code)
        .await
        .map(LinkResponse::from);

    Ok(api_result(result))
}

pub async fn delete_link(
    operator: OperatorId,
    path: web::Path<String>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let code = path.into_inner();
    info!(
        "Console: delete link '{}' requested by '{}'",
        code,
        operator.as_str()
    );

    let result = service
        .delete_link(operator.as_str(), &code)
        .await
        .map(|()| serde_json::json!({ "deleted": code }));

    Ok(api_result(result))
}
