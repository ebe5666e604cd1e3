//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureSosAlertCommand, FixtureSosHistoryQuery, SosAlertCommand, SosHistoryQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sos: Arc<dyn SosAlertCommand>,
    pub sos_history: Arc<dyn SosHistoryQuery>,
}

impl HttpState {
    /// Construct state from the SOS driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use allergysafety_backend::domain::ports::{FixtureSosAlertCommand, FixtureSosHistoryQuery};
    /// use allergysafety_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureSosAlertCommand), Arc::new(FixtureSosHistoryQuery));
    /// let _sos = state.sos.clone();
    /// ```
    pub fn new(sos: Arc<dyn SosAlertCommand>, sos_history: Arc<dyn SosHistoryQuery>) -> Self {
        Self { sos, sos_history }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureSosAlertCommand), Arc::new(FixtureSosHistoryQuery))
    }
}
