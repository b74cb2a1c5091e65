use thiserror::Error;

/// Failure to accept a published message.
///
/// Always local and recoverable; the boundary surfaces it as a client error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PublishError {
    /// The request carried no payload, or its body could not be read.
    #[error("empty or unreadable payload")]
    EmptyPayload,
}

/// Failure to pull a message from a topic queue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsumeError {
    /// The topic is unknown or holds nothing queued. The two cases are
    /// indistinguishable by design.
    #[error("no queued messages for topic")]
    TopicEmpty,
}

/// Failure to register a connection in a room.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinError {
    #[error("connection limit reached ({limit})")]
    TooManyConnections { limit: usize },
}
