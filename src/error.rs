use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlexaError {
    #[error("authentication rejected by Alexa (HTTP {status}): the session cookie is missing, expired or invalid")]
    Authentication { status: u16 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("device index {index} is out of range ({len} device(s) known, indexes start at 0)")]
    InvalidIndex { index: usize, len: usize },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("Alexa API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("cookie file not found (searched: {0})")]
    CookieNotFound(String),

    #[error("invalid cookie data: {0}")]
    InvalidCookie(String),

    #[error("device '{device}' has no attribute '{attribute}'")]
    UnknownAttribute { device: String, attribute: String },

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AlexaError {
    /// Stable machine-readable name, used for `--json` error output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "authentication",
            Self::Transport(_) => "transport",
            Self::InvalidIndex { .. } => "invalid_index",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Api { .. } => "api",
            Self::CookieNotFound(_) => "cookie_not_found",
            Self::InvalidCookie(_) => "invalid_cookie",
            Self::UnknownAttribute { .. } => "unknown_attribute",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
        }
    }
}

pub type Result<T> = std::result::Result<T, AlexaError>;
