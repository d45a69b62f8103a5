use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown event `{0}`")]
    UnknownEvent(String),

    #[error("malformed `{event}` payload: {source}")]
    MalformedPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown role `{0}`")]
    UnknownRole(String),

    #[error("invalid session configuration: {0}")]
    Config(String),

    #[error("transport closed")]
    TransportClosed,
}

impl GameError {
    pub fn config(msg: impl Into<String>) -> Self {
        GameError::Config(msg.into())
    }

    /// Client and server disagree on the protocol; the session cannot go on.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            GameError::UnknownEvent(_)
                | GameError::MalformedPayload { .. }
                | GameError::UnknownRole(_)
        )
    }
}
