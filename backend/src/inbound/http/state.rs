//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data` so they depend
//! only on the domain's driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ConnectionsCommand, ConnectionsQuery, ProfilesCommand, ProfilesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Connection ledger mutations.
    pub connections: Arc<dyn ConnectionsCommand>,
    /// Connection ledger listings.
    pub connections_query: Arc<dyn ConnectionsQuery>,
    /// Profile discovery and statistics.
    pub profiles: Arc<dyn ProfilesQuery>,
    /// Profile self-service mutations.
    pub profiles_command: Arc<dyn ProfilesCommand>,
}
