/// HTTP server configuration constants.
///
/// This module defines the default listen address and request timeout.
pub const BIND_HOST: &str = "127.0.0.1";

/// Default listen port.
pub const BIND_PORT: u16 = 8080;

/// Time (in seconds) a client has to send its request headers before the server gives up.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
