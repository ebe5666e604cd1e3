//! Probes for orchestrators.
//!
//! Liveness only says the process answers HTTP. Readiness additionally
//! requires the socket to be bound and at least one notification channel to
//! be wired, because an instance that cannot deliver SMS or email would
//! answer every activation with an error.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Notification channels wired at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChannelAvailability {
    pub sms: bool,
    pub email: bool,
}

impl ChannelAvailability {
    fn any(self) -> bool {
        self.sms || self.email
    }
}

/// Startup progress shared with the probe handlers.
pub struct HealthState {
    started: AtomicBool,
    channels: ChannelAvailability,
}

impl HealthState {
    /// Probe state for a server whose transports are already built.
    pub fn new(channels: ChannelAvailability) -> Self {
        Self {
            started: AtomicBool::new(false),
            channels,
        }
    }

    /// Record that the listener is bound.
    pub fn mark_ready(&self) {
        self.started.store(true, Ordering::Release);
    }

    fn is_ready(&self) -> bool {
        self.started.load(Ordering::Acquire) && self.channels.any()
    }
}

fn no_store(mut response: actix_web::HttpResponseBuilder) -> actix_web::HttpResponseBuilder {
    response.insert_header((header::CACHE_CONTROL, "no-store"));
    response
}

/// Readiness probe. The body lists which channels are wired.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Listening with at least one notification channel", body = ChannelAvailability),
        (status = 503, description = "Starting, or no notification channel configured", body = ChannelAvailability)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let builder = if state.is_ready() {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    no_store(builder).json(state.channels)
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Process is serving requests"))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    no_store(HttpResponse::Ok()).finish()
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    async fn get(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let app =
            test::init_service(App::new().app_data(state).service(ready).service(live)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        let cache = res
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        (status, cache, test::read_body(res).await.to_vec())
    }

    #[rstest]
    #[case(true, false, false, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(true, false, true, StatusCode::OK)]
    #[case(false, true, true, StatusCode::OK)]
    #[case(false, false, true, StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn readiness_needs_a_bound_socket_and_a_channel(
        #[case] sms: bool,
        #[case] email: bool,
        #[case] started: bool,
        #[case] expected: StatusCode,
    ) {
        let state = web::Data::new(HealthState::new(ChannelAvailability { sms, email }));
        if started {
            state.mark_ready();
        }

        let (status, cache, body) = get(state, "/health/ready").await;
        assert_eq!(status, expected);
        assert_eq!(cache.as_deref(), Some("no-store"));
        let body: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(body, json!({ "sms": sms, "email": email }));
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_does_not_wait_for_startup() {
        let state = web::Data::new(HealthState::new(ChannelAvailability {
            sms: false,
            email: false,
        }));
        let (status, cache, _) = get(state, "/health/live").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("no-store"));
    }
}
