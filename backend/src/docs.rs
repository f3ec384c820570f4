#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    error::ErrorResponse,
    handlers::health::HealthResponse,
    models::request::{
        CreateRequestPayload, RejectRequestPayload, RequestResponse, RequestStatus,
    },
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_doc,
        list_requests_doc,
        create_request_doc,
        get_request_doc,
        approve_request_doc,
        reject_request_doc
    ),
    components(schemas(
        CreateRequestPayload,
        RejectRequestPayload,
        RequestResponse,
        RequestStatus,
        ErrorResponse,
        HealthResponse
    )),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Requests", description = "Remote-work and desk requests"),
        (name = "System", description = "Service health")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, body = HealthResponse)),
    tag = "System",
    security(())
)]
fn health_doc() {}

#[utoipa::path(
    get,
    path = "/api/requests",
    responses(
        (status = 200, description = "Requests visible to the caller, newest first", body = [RequestResponse]),
        (status = 401, body = ErrorResponse),
        (status = 403, description = "Office admin without an office", body = ErrorResponse)
    ),
    tag = "Requests"
)]
fn list_requests_doc() {}

#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = CreateRequestPayload,
    responses(
        (status = 201, body = RequestResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, body = ErrorResponse),
        (status = 404, description = "Unknown office or requester", body = ErrorResponse),
        (status = 409, description = "Requester already has a pending request", body = ErrorResponse)
    ),
    tag = "Requests"
)]
fn create_request_doc() {}

#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    params(("id" = String, Path, description = "Request id")),
    responses(
        (status = 200, body = RequestResponse),
        (status = 404, body = ErrorResponse)
    ),
    tag = "Requests"
)]
fn get_request_doc() {}

#[utoipa::path(
    put,
    path = "/api/requests/{id}/approve",
    params(("id" = String, Path, description = "Request id")),
    responses(
        (status = 200, body = RequestResponse),
        (status = 403, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, description = "Request is no longer pending", body = ErrorResponse)
    ),
    tag = "Requests"
)]
fn approve_request_doc() {}

#[utoipa::path(
    put,
    path = "/api/requests/{id}/reject",
    params(("id" = String, Path, description = "Request id")),
    request_body = RejectRequestPayload,
    responses(
        (status = 200, body = RequestResponse),
        (status = 400, body = ErrorResponse),
        (status = 403, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, description = "Request is no longer pending", body = ErrorResponse)
    ),
    tag = "Requests"
)]
fn reject_request_doc() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_request_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/requests",
            "/api/requests/{id}",
            "/api/requests/{id}/approve",
            "/api/requests/{id}/reject",
            "/api/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerAuth"));
    }
}
