use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Client error: {0}")]
    ClientError(String),

    #[error("Server responded with status {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Decode error: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("WebSocket error: {0}")]
    WebSocketError(#[from] Box<tungstenite::Error>),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    pub fn from_client(msg: &str) -> Self {
        Error::ClientError(msg.to_string())
    }

    pub fn from_server(status: u16, msg: &str) -> Self {
        Error::ServerError {
            status,
            message: msg.to_string(),
        }
    }

    pub fn from_transport(msg: &str) -> Self {
        Error::TransportError(msg.to_string())
    }

    pub fn from_config(msg: &str) -> Self {
        Error::ConfigError(msg.to_string())
    }
}

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(status, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "<unreadable body>".to_string());
                Error::ServerError { status, message }
            }
            ureq::Error::Transport(t) => Error::TransportError(t.to_string()),
        }
    }
}

impl From<tungstenite::Error> for Error {
    fn from(e: tungstenite::Error) -> Self {
        Error::WebSocketError(Box::new(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::TransportError(e.to_string())
    }
}
