use thiserror::Error;

/// Errors raised while talking to Google Sheets
///
/// Everything except [`SheetsError::Decode`] means the backend could not be
/// reached or refused us (credentials, network, permissions).
#[derive(Error, Debug)]
pub enum SheetsError {
    /// Service-account key file could not be read
    #[error("Failed to read credentials file: {0}")]
    CredentialsIo(#[from] std::io::Error),

    /// Service-account key file is not valid JSON or misses fields
    #[error("Invalid credentials file: {0}")]
    CredentialsFormat(String),

    /// Private key rejected while signing the assertion
    #[error("Failed to sign service-account assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// Transport-level HTTP failure (DNS, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the token or values endpoint
    #[error("HTTP request failed with status {status}: {body}")]
    HttpStatus { status: reqwest::StatusCode, body: String },

    /// Request URL could not be built
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Backend answered 2xx with a body we cannot interpret
    #[error("Unexpected response from Sheets API: {0}")]
    Decode(String),
}

impl SheetsError {
    /// True when the failure is about reaching or authenticating with the backend
    pub fn is_connection_failure(&self) -> bool {
        !matches!(self, SheetsError::Decode(_))
    }
}

/// Outcome kinds of a score lookup that do not produce a score
///
/// Each variant maps to exactly one user-facing message via [`LookupError::message_key`].
#[derive(Error, Debug)]
pub enum LookupError {
    /// Credential, network or permission failure when contacting the sheet
    #[error("score backend unavailable: {0}")]
    BackendUnavailable(#[source] SheetsError),

    /// Sheet has no data rows (empty or header only)
    #[error("score sheet has no data rows")]
    EmptyDataset,

    /// Sheet is readable and non-empty but has no row for the number
    #[error("phone number not found")]
    NotFound,

    /// Shared contact does not belong to the sender
    #[error("contact owner {owner:?} does not match sender {sender}")]
    IdentityMismatch { sender: u64, owner: Option<u64> },

    /// Anything else that went wrong during resolution
    #[error("unexpected lookup failure: {0}")]
    Unexpected(String),
}

impl LookupError {
    /// Localization key of the message shown to the user
    pub fn message_key(&self) -> &'static str {
        match self {
            LookupError::BackendUnavailable(_) => "score-connection-error",
            LookupError::EmptyDataset => "score-empty",
            LookupError::NotFound => "score-not-found",
            LookupError::IdentityMismatch { .. } => "contact-not-yours",
            LookupError::Unexpected(_) => "score-unexpected-error",
        }
    }
}

impl From<SheetsError> for LookupError {
    fn from(err: SheetsError) -> Self {
        if err.is_connection_failure() {
            LookupError::BackendUnavailable(err)
        } else {
            LookupError::Unexpected(err.to_string())
        }
    }
}

/// Type alias for Result with LookupError
pub type LookupResult<T> = Result<T, LookupError>;
