//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use allergysafety_backend::domain::ports::{EmailSender, SmsSender};
use allergysafety_backend::inbound::http::session_config::BuildMode;
use allergysafety_backend::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Process settings loaded via OrthoConfig.
///
/// Environment variables use the `ALLERGYSAFETY_` prefix, for example
/// `ALLERGYSAFETY_DATABASE_URL`.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ALLERGYSAFETY")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Required in release builds; debug builds fall back to
    /// fixture repositories when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address '{raw}': {err}"),
            )
        })
    }

    /// Return the database URL when one is configured and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Resolve the database URL for `mode`.
    ///
    /// Release builds refuse to start without one: fixture repositories
    /// know no contacts, so every activation would report "no contacts"
    /// without notifying anyone.
    pub fn database_url_for(&self, mode: BuildMode) -> std::io::Result<Option<&str>> {
        match (self.database_url(), mode) {
            (None, BuildMode::Release) => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "ALLERGYSAFETY_DATABASE_URL must be set in release builds",
            )),
            (url, _) => Ok(url),
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) sms: Option<Arc<dyn SmsSender>>,
    pub(crate) email: Option<Arc<dyn EmailSender>>,
}

impl ServerConfig {
    /// Construct a server configuration with no database and no transports.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            sms: None,
            email: None,
        }
    }

    /// Attach a database connection pool for the SOS repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach the notification transports that were configured.
    #[must_use]
    pub fn with_transports(
        mut self,
        sms: Option<Arc<dyn SmsSender>>,
        email: Option<Arc<dyn EmailSender>>,
    ) -> Self {
        self.sms = sms;
        self.email = email;
        self
    }
}
