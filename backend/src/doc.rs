//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the SOS endpoints, the health probes and the session
//! cookie security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{AlertStatus, Error, ErrorCode};
use crate::inbound::http::sos::{
    DeliveryCounts, SosActivationResponse, SosHistoryEntry, SosHistoryResponse,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Signed session cookie identifying the user.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "AllergySafety SOS API",
        description = "Emergency alert fanout to a user's emergency contacts.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::sos::raise_sos,
        crate::inbound::http::sos::sos_history,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        AlertStatus,
        DeliveryCounts,
        SosActivationResponse,
        SosHistoryEntry,
        SosHistoryResponse,
    )),
    tags(
        (name = "sos", description = "SOS activation and history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
