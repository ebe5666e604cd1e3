//! Backend entry-point: loads configuration, wires adapters, runs the server.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use allergysafety_backend::inbound::http::health::{ChannelAvailability, HealthState};
use allergysafety_backend::inbound::http::session_config::{
    BuildMode, session_settings_from_env,
};
use allergysafety_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use allergysafety_backend::outbound::transport_config::TransportSettings;
use server::{ServerConfig, ServerSettings, build_transports, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let env = DefaultEnv::new();
    let mode = BuildMode::from_debug_assertions();
    let database_url = settings.database_url_for(mode)?;
    let session = session_settings_from_env(&env, mode)
        .map_err(std::io::Error::other)?;
    let transports = TransportSettings::from_env(&env).map_err(std::io::Error::other)?;
    let (sms, email) = build_transports(&transports);
    let channels = ChannelAvailability {
        sms: sms.is_some(),
        email: email.is_some(),
    };
    if !channels.sms && !channels.email {
        warn!("no notification transport configured; SOS activations will fail");
    }

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr()?,
    )
    .with_transports(sms, email);

    match database_url {
        Some(url) => {
            let migration_url = url.to_owned();
            tokio::task::spawn_blocking(move || run_migrations(&migration_url))
                .await
                .map_err(std::io::Error::other)?
                .map_err(std::io::Error::other)?;
            let mut pool_config = PoolConfig::new(url);
            if let Some(max) = settings.db_max_connections {
                pool_config = pool_config.with_max_size(max);
            }
            let pool = DbPool::new(pool_config)
                .await
                .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; debug build using fixture repositories"),
    }

    let bind_addr = config.bind_addr;
    let health_state = web::Data::new(HealthState::new(channels));
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "allergysafety backend listening");
    server.await
}
