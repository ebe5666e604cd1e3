//! Session helpers for identifying the user raising an SOS alert.
//!
//! Wraps the Actix cookie session so handlers only see a [`UserId`]. A
//! missing or tampered identifier yields `401 Unauthorized`.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Authenticated-session view used by the SOS handlers.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind the session cookie to `user_id`.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|err| Error::internal(format!("failed to persist session: {err}")))
    }

    /// The user bound to this session, if any.
    ///
    /// A stored value that is not a UUID is treated as absent.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let stored = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|err| Error::internal(format!("failed to read session: {err}")))?;
        Ok(stored.and_then(parse_stored_user_id))
    }

    /// The bound user, or `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

fn parse_stored_user_id(raw: String) -> Option<UserId> {
    UserId::new(&raw)
        .inspect_err(|err| warn!(error = %err, "discarding invalid user id from session cookie"))
        .ok()
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use actix_session::Session;
    use actix_web::cookie::Cookie;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    use super::*;
    use crate::inbound::http::test_utils::test_session_middleware;

    const USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(Cookie::into_owned)
            .expect("session cookie set")
    }

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = session.require_user_id()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    #[rstest]
    #[case("   ", false)]
    #[case("not-a-uuid", false)]
    #[case(USER, true)]
    fn stored_ids_must_be_uuids(#[case] raw: &str, #[case] accepted: bool) {
        assert_eq!(parse_stored_user_id(raw.to_owned()).is_some(), accepted);
    }

    #[rstest]
    #[actix_web::test]
    async fn persisted_user_is_read_back() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/bind",
                    web::post().to(|session: SessionContext| async move {
                        let id = UserId::new(USER).expect("fixture id");
                        session.persist_user(&id)?;
                        Ok::<_, Error>(HttpResponse::NoContent())
                    }),
                )
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let bound =
            actix_test::call_service(&app, actix_test::TestRequest::post().uri("/bind").to_request()).await;
        assert_eq!(bound.status(), StatusCode::NO_CONTENT);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(session_cookie(&bound))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(res).await, USER);
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_requests_are_unauthorised() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn tampered_user_id_is_unauthorised() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/tamper",
                    web::post().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-uuid")
                            .expect("store raw value");
                        HttpResponse::NoContent()
                    }),
                )
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let tampered =
            actix_test::call_service(&app, actix_test::TestRequest::post().uri("/tamper").to_request()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(session_cookie(&tampered))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
