use thiserror::Error;

/// Failures talking to the Ecount API.
///
/// `context` names the operation (`Login`, `API call`, `Purchase slip
/// creation`) so messages read e.g. `Login failed: HTTP 500 Internal Server Error`.
#[derive(Debug, Error)]
pub enum EcountError {
    #[error(
        "Missing required environment variables: ECOUNT_COM_CODE, ECOUNT_USER_ID, ECOUNT_API_CERT_KEY, ECOUNT_ZONE"
    )]
    MissingConfig,

    #[error("{context} failed: HTTP {status} {reason}")]
    Http {
        context: &'static str,
        status: u16,
        reason: String,
    },

    /// HTTP succeeded but the body's `Status` was not a success code.
    #[error("{context} failed: {message}")]
    Api {
        context: &'static str,
        message: String,
    },

    #[error("{context} failed: malformed response: {detail}")]
    Malformed {
        context: &'static str,
        detail: String,
    },

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}
