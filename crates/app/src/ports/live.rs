//! Live channel port: the WebSocket the dashboard listens on, plus the
//! timer used between reconnect attempts.

use std::future::Future;
use std::time::Duration;

/// Failure of the live channel. Never fatal: the feed reconnects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiveError {
    /// The channel could not be opened.
    #[error("failed to open live channel: {0}")]
    Connect(String),

    /// The open channel reported an error.
    #[error("live channel error: {0}")]
    Stream(String),
}

/// Opens live channels.
pub trait LiveTransport {
    type Connection: LiveConnection;

    /// Open a channel to `url`, resolving once it is open.
    fn connect(&self, url: &str) -> impl Future<Output = Result<Self::Connection, LiveError>>;
}

/// One open channel. Dropping it closes the underlying socket.
pub trait LiveConnection {
    /// Next text frame; `None` once the channel has closed.
    fn next_frame(&mut self) -> impl Future<Output = Option<Result<String, LiveError>>>;
}

/// Waits between reconnect attempts.
///
/// Dropping the returned future must cancel the underlying timer.
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}
