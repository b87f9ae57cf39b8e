//! Console API route configuration.
//!
//! Mounted behind `OperatorAuth`; every route in here runs with an
//! authenticated operator identity in scope.

pub mod helpers;
pub mod links;
pub mod submissions;
pub mod types;

use actix_web::web;

/// Link management routes `/links`
///
/// - GET    /links          - list own links (paginated)
/// - POST   /links          - create a link
/// - GET    /links/{code}   - fetch one own link
/// - DELETE /links/{code}   - delete one own link
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .route("", web::get().to(links::get_links))
        .route("", web::post().to(links::post_link))
        .route("/{code}", web::get().to(links::get_link))
        .route("/{code}", web::delete().to(links::delete_link))
}

/// Submission routes `/submissions`
///
/// - GET /submissions[?code=][&page=][&page_size=] - ownership-scoped listing
pub fn submissions_routes() -> actix_web::Scope {
    web::scope("/submissions").route("", web::get().to(submissions::get_submissions))
}

/// Console API v1 routes
pub fn console_v1_routes() -> actix_web::Scope {
    web::scope("/v1")
        .service(links_routes())
        .service(submissions_routes())
}
