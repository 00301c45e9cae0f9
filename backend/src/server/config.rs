//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use task_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) allowed_origins: Vec<String>,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Construct a configuration serving tasks from `db_pool` on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            allowed_origins: Vec::new(),
            db_pool,
        }
    }

    /// Allow cross-origin requests from `origins`.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
