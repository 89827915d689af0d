use std::fmt;


// What the page was trying to do when a request failed. Determines which toast the user sees.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyncOperation {
    Fetch,
    Update,
}

// All network-layer failures are handled uniformly: they are reported to the user and the next
// tick (or the next user action) is the only retry.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SyncError {
    // The request never produced a response (offline, CORS, aborted, ...).
    Transport(String),
    // The server answered with a non-2xx status.
    HttpStatus(u16),
    // The response body is not the JSON we expect.
    Json(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ConfigError {
    Json(String),
    UnknownLogLevel(String),
    InvalidValue { field: &'static str, reason: String },
}

impl SyncOperation {
    pub fn toast_name(self) -> &'static str {
        match self {
            SyncOperation::Fetch => "itinerary-fetch-error",
            SyncOperation::Update => "itinerary-update-error",
        }
    }

    pub fn user_message(self) -> &'static str {
        match self {
            SyncOperation::Fetch => "Failed to fetch itinerary",
            SyncOperation::Update => "Failed to update itinerary",
        }
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Transport(message) => write!(f, "request failed: {message}"),
            SyncError::HttpStatus(status) => write!(f, "server returned HTTP {status}"),
            SyncError::Json(message) => write!(f, "cannot parse response: {message}"),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self { SyncError::Json(err.to_string()) }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(message) => write!(f, "cannot parse config: {message}"),
            ConfigError::UnknownLogLevel(level) => write!(f, "unknown log level \"{level}\""),
            ConfigError::InvalidValue { field, reason } => write!(f, "invalid {field}: {reason}"),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self { ConfigError::Json(err.to_string()) }
}
