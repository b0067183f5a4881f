use derive_more::{Display, Error, From};
use reqwest::{Error as ReqwestError, StatusCode};

use super::config::ConfigError;

/// Possible errors of performing requests to [SRS HTTP API][1].
///
/// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Display, Error, From)]
pub enum SrsClientError {
    /// [`SrsClient`] cannot be built from the provided configuration.
    ///
    /// [`SrsClient`]: crate::SrsClient
    #[display(fmt = "Invalid SRS client configuration: {_0}")]
    Config(ConfigError),

    /// Underlying HTTP client rejected the provided proxy or TLS settings.
    #[display(fmt = "Failed to build HTTP client: {_0}")]
    #[from(ignore)]
    ClientBuildFailed(ReqwestError),

    /// Failed to create [`SrsClient`] API Url
    ///
    /// [`SrsClient`]: crate::SrsClient
    #[display(fmt = "Failed to parse URL: {_0}")]
    IncorrectApiUrl(url::ParseError),

    /// Performing HTTP request failed itself.
    #[display(fmt = "Failed to perform HTTP request: {_0}")]
    #[from(ignore)]
    RequestFailed(ReqwestError),

    /// [SRS HTTP API][1] responded with a bad [`StatusCode`] and no error
    /// payload of its own.
    ///
    /// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
    #[display(fmt = "SRS HTTP API responded with bad status: {_0}")]
    BadStatus(#[error(not(source))] StatusCode),

    /// [SRS HTTP API][1] response body is not a valid JSON.
    ///
    /// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
    #[display(fmt = "Failed to decode SRS HTTP API response: {_0}")]
    DeserializeError(serde_json::Error),

    /// [SRS HTTP API][1] reported a nonzero application `code`.
    ///
    /// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
    #[display(fmt = "SRS HTTP API error {code} (status {status}): {message}")]
    #[from(ignore)]
    Api {
        /// Application code reported by [SRS].
        ///
        /// [SRS]: https://ossrs.io
        code: i64,

        /// HTTP-like status the `code` maps onto. See [`map_srs_code`].
        status: u16,

        /// Message reported in the `data` field of the response.
        message: String,
    },

    /// Requested client is absent in the [SRS HTTP API][1] response.
    ///
    /// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
    #[display(fmt = "Client not found: {_0}")]
    #[from(ignore)]
    ClientNotFound(#[error(not(source))] String),
}

impl SrsClientError {
    /// HTTP-like status describing this error, if there is one.
    ///
    /// This is the mapped status for [`SrsClientError::Api`], and the HTTP
    /// status for [`SrsClientError::BadStatus`] and for transport errors
    /// carrying one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::BadStatus(status) => Some(status.as_u16()),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            Self::Config(_)
            | Self::ClientBuildFailed(_)
            | Self::IncorrectApiUrl(_)
            | Self::DeserializeError(_)
            | Self::ClientNotFound(_) => None,
        }
    }

    /// Indicates whether this error means the requested resource doesn't
    /// exist on the server.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Maps an application error `code` of [SRS HTTP API][1] onto an HTTP-like
/// status.
///
/// Unknown codes map onto `500`.
///
/// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
#[must_use]
pub fn map_srs_code(code: i64) -> u16 {
    match code {
        1000 => 400,
        1001 => 401,
        1002 => 403,
        1003 | 2048 | 2049 => 404,
        1004 => 409,
        _ => 500,
    }
}
