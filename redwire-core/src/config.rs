//! Client and subscriber configuration

/// Parameters shared by the pooled client and the subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Host name or IP address of the server
    pub host: String,

    /// TCP port on which the server is listening
    pub port: u16,

    /// Maximum number of connections held by the connection pool
    pub max_connections: usize,

    /// Username for authentication. If a password is set and the username is
    /// left blank, `default` is used.
    pub username: String,

    /// Password for authentication; empty disables the AUTH handshake
    pub password: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            max_connections: 8,
            username: String::new(),
            password: String::new(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with default parameters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host name of the server
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port of the server
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the maximum number of pooled connections
    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Set the username used for authentication
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Set the password used for authentication
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Whether connections must perform the AUTH handshake before use
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        !self.password.is_empty()
    }

    /// The username sent during authentication: the configured one, or
    /// `default` when a password is set and the username is blank.
    #[must_use]
    pub fn effective_username(&self) -> &str {
        if self.username.is_empty() && !self.password.is_empty() {
            "default"
        } else {
            &self.username
        }
    }
}
