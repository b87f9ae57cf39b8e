//! Visitor-facing capture endpoint.
//!
//! The interstitial form (rendered elsewhere) posts here. The body is
//! either `application/x-www-form-urlencoded` or a JSON object; both are
//! normalized into the same ordered field map before recording. On success
//! the visitor is forwarded to the link's destination.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::redirect::visitor_error;
use crate::services::CaptureService;
use crate::storage::FieldMap;

pub struct CaptureEndpoint {}

impl CaptureEndpoint {
    #[instrument(skip(req, body, capture), fields(code = %path))]
    pub async fn handle_capture(
        path: web::Path<String>,
        req: HttpRequest,
        body: web::Bytes,
        capture: web::Data<Arc<CaptureService>>,
    ) -> impl Responder {
        let code = path.into_inner();

        let fields = match parse_fields(&req, &body) {
            Ok(fields) => fields,
            Err(msg) => {
                debug!("Rejected capture body for '{}': {}", code, msg);
                return HttpResponse::build(StatusCode::BAD_REQUEST)
                    .insert_header(("Content-Type", "text/plain; charset=utf-8"))
                    .body(msg);
            }
        };

        match capture.record(&code, fields).await {
            Ok(record) => HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                .insert_header(("Location", record.destination))
                .finish(),
            Err(e) => {
                debug!("Capture for '{}' failed: {}", code, e);
                visitor_error(&e)
            }
        }
    }
}

/// Normalize the submitted body into an ordered field map.
///
/// Form bodies are decoded pair by pair so fields keep the order the
/// client sent them in; a repeated name keeps its first position and the
/// last value. JSON bodies must be an object.
fn parse_fields(req: &HttpRequest, body: &[u8]) -> Result<FieldMap, String> {
    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if content_type.starts_with("application/json") {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|e| format!("invalid JSON body: {}", e))?;
        match value {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err("JSON body must be an object".to_string()),
        }
    } else {
        let mut fields = FieldMap::new();
        for (name, value) in url::form_urlencoded::parse(body) {
            fields.insert(name.into_owned(), serde_json::Value::String(value.into_owned()));
        }
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_parse_form_fields_in_submit_order() {
        let req = TestRequest::post()
            .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
            .to_http_request();

        let fields = parse_fields(&req, b"email=a%40b.com&name=Ada&note=hi+there").unwrap();
        let keys: Vec<&str> = fields.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["email", "name", "note"]);
        assert_eq!(fields["email"], "a@b.com");
        assert_eq!(fields["note"], "hi there");
    }

    #[test]
    fn test_parse_json_fields() {
        let req = TestRequest::post()
            .insert_header(("Content-Type", "application/json"))
            .to_http_request();

        let fields = parse_fields(&req, br#"{"email":"a@b.com","consent":true}"#).unwrap();
        assert_eq!(fields["email"], "a@b.com");
        assert_eq!(fields["consent"], true);
    }

    #[test]
    fn test_parse_json_non_object_rejected() {
        let req = TestRequest::post()
            .insert_header(("Content-Type", "application/json"))
            .to_http_request();

        assert!(parse_fields(&req, b"[1,2,3]").is_err());
        assert!(parse_fields(&req, b"{broken").is_err());
    }
}
