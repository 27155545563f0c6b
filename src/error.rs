/// Boxed source of a transport-class failure.
pub type TransportSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can end a prediction attempt without a result.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    /// The trigger fired while nothing was selected.
    #[error("Please select an image first!")]
    NoFileSelected,
    /// No usable response: the request failed or the body was not the expected JSON.
    #[error("Connection failed. Ensure the server is running.")]
    Transport(#[source] TransportSource),
    /// The server answered with a failure status.
    #[error("{0}")]
    Server(String),
    /// Another prediction is still in flight.
    #[error("a prediction is already in flight")]
    Busy,
}

/// Coarse classification of a [`PredictionError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    UserInput,
    Transport,
    Server,
    Busy,
}

impl PredictionError {
    pub fn transport(source: impl Into<TransportSource>) -> Self {
        PredictionError::Transport(source.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictionError::NoFileSelected => ErrorKind::UserInput,
            PredictionError::Transport(_) => ErrorKind::Transport,
            PredictionError::Server(_) => ErrorKind::Server,
            PredictionError::Busy => ErrorKind::Busy,
        }
    }

    /// Whether the error is surfaced through the error area.
    ///
    /// A rejected trigger leaves the UI of the running attempt alone.
    pub fn is_presented(&self) -> bool {
        !matches!(self, PredictionError::Busy)
    }
}
