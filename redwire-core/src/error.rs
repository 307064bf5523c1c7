//! Error types shared across the redwire client

use thiserror::Error;

/// Result type for redwire operations
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the client can report.
///
/// I/O and decode failures are carried as values on a reply rather than
/// unwound, so the type is cheap to clone and compare.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The server answered the round trip with a RESP error reply
    #[error("the server returned an error: {0}")]
    Server(String),

    /// The connection to the server was lost or never established
    #[error("the client was disconnected")]
    Disconnected,

    /// Writing the command to the server failed
    #[error("there was an error while writing the command to the server")]
    Write,

    /// Reading a response from the server failed
    #[error("there was an error while reading a response from the server")]
    Read,

    /// The client has been stopped and no further requests will succeed
    #[error("the client has been stopped and no further requests will succeed")]
    ClientStopped,

    /// An in-flight operation was cancelled
    #[error("the operation was cancelled")]
    Cancelled,

    /// The AUTH handshake was rejected by the server
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The end of the buffer was reached before a complete RESP unit
    #[error("the end of the buffer was reached unexpectedly")]
    Eof,

    /// A numeric body could not be represented as a signed 64-bit integer
    #[error("the parsed number was too large for the container")]
    OutOfRange,

    /// A length header was not a valid integer
    #[error("the message did not meet the Redis standard")]
    Malformed,

    /// A demanded conversion did not match the value's type
    #[error("the requested conversion could not be performed")]
    WrongType,
}

impl Error {
    /// True for failures of the transport itself, as opposed to errors the
    /// server answered with or local decode/conversion failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Disconnected | Self::Write | Self::Read | Self::ClientStopped | Self::Cancelled
        )
    }
}
