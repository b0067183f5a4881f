//! Configuration of [`SrsClient`].
//!
//! [`SrsClient`]: crate::SrsClient

use std::{env, fmt, path::PathBuf, time::Duration};

use derive_more::{Display, Error};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, InvalidHeaderName, InvalidHeaderValue,
    ACCEPT, CONTENT_TYPE,
};
use url::Url;

/// Possible errors of building a [`SrsClientConfig`].
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    /// Provided base URL cannot be parsed.
    #[display(fmt = "Failed to parse base URL: {_0}")]
    IncorrectBaseUrl(url::ParseError),

    /// Provided base URL is not an absolute `http`/`https` URL.
    #[display(fmt = "Base URL must be an absolute http(s) URL, got: {_0}")]
    UnsupportedBaseUrl(#[error(not(source))] String),

    /// Provided timeout is zero.
    #[display(fmt = "Timeout must be greater than 0 seconds")]
    InvalidTimeout,

    /// Only one of username and password is provided.
    #[display(fmt = "Both username and password must be provided")]
    PartialCredentials,

    /// Provided proxy URL cannot be parsed.
    #[display(fmt = "Failed to parse proxy URL: {_0}")]
    IncorrectProxyUrl(url::ParseError),

    /// Provided header name is not a valid HTTP header name.
    #[display(fmt = "Invalid header name: {_0}")]
    InvalidHeaderName(InvalidHeaderName),

    /// Provided header value is not a valid HTTP header value.
    #[display(fmt = "Invalid header value: {_0}")]
    InvalidHeaderValue(InvalidHeaderValue),

    /// Provided CA bundle cannot be read.
    #[display(fmt = "Failed to read CA bundle: {_0}")]
    UnreadableCaBundle(std::io::Error),

    /// No base URL is present in the environment.
    #[display(fmt = "`{}` environment variable is not set", ENV_URL)]
    MissingBaseUrl,
}

/// Environment variable holding the base URL of [SRS HTTP API][1].
///
/// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
pub const ENV_URL: &str = "SRS_HTTP_API_URL";
const ENV_USERNAME: &str = "SRS_HTTP_API_USERNAME";
const ENV_PASSWORD: &str = "SRS_HTTP_API_PASSWORD";
const ENV_TIMEOUT: &str = "SRS_HTTP_API_TIMEOUT";
const ENV_PROXY: &str = "SRS_HTTP_API_PROXY";
const ENV_INSECURE: &str = "SRS_HTTP_API_INSECURE";
const ENV_CA_BUNDLE: &str = "SRS_HTTP_API_CA_BUNDLE";
const ENV_DEBUG: &str = "SRS_HTTP_API_DEBUG";

/// Mode of TLS certificates verification.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum TlsVerify {
    /// Verify against the system trust store.
    #[default]
    Enabled,

    /// Accept any certificate.
    Disabled,

    /// Verify against the PEM-encoded CA bundle at the given path, in addition
    /// to the system trust store.
    CaBundle(PathBuf),
}

/// Basic authentication credentials.
#[derive(Clone, Eq, PartialEq)]
pub struct Credentials {
    /// Username to authenticate with.
    pub username: String,

    /// Password to authenticate with.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated settings of [`SrsClient`].
///
/// [`SrsClient`]: crate::SrsClient
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug)]
pub struct SrsClientConfig {
    base_url: String,
    timeout: Duration,
    tls_verify: TlsVerify,
    proxy: Option<Url>,
    debug: bool,
    headers: HeaderMap,
    credentials: Option<Credentials>,
}

impl SrsClientConfig {
    /// Request timeout used when none is configured, in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Starts building a [`SrsClientConfig`] for the server at `base_url`.
    #[must_use]
    pub fn builder<S: Into<String>>(base_url: S) -> SrsClientConfigBuilder {
        SrsClientConfigBuilder::new(base_url.into())
    }

    /// Creates a [`SrsClientConfig`] with default settings.
    ///
    /// # Errors
    ///
    /// If `base_url` is not an absolute `http`/`https` URL.
    pub fn new<S: Into<String>>(base_url: S) -> Result<Self, ConfigError> {
        Self::builder(base_url).build()
    }

    /// Creates a [`SrsClientConfig`] from `SRS_HTTP_API_*` environment
    /// variables.
    ///
    /// `SRS_HTTP_API_URL` is required, while `SRS_HTTP_API_USERNAME`,
    /// `SRS_HTTP_API_PASSWORD`, `SRS_HTTP_API_TIMEOUT` (seconds),
    /// `SRS_HTTP_API_PROXY`, `SRS_HTTP_API_INSECURE`,
    /// `SRS_HTTP_API_CA_BUNDLE` and `SRS_HTTP_API_DEBUG` are optional.
    ///
    /// # Errors
    ///
    /// If some variable is missing or holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Creates a [`SrsClientConfig`] reading the same variables as
    /// [`SrsClientConfig::from_env()`] via the provided `var` function.
    ///
    /// # Errors
    ///
    /// If some variable is missing or holds an invalid value.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = var(ENV_URL).ok_or(ConfigError::MissingBaseUrl)?;
        let mut builder = Self::builder(base_url);

        if let Some(timeout) = var(ENV_TIMEOUT) {
            let secs = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout)?;
            builder = builder.timeout(secs);
        }
        if let Some(username) = var(ENV_USERNAME) {
            builder = builder.username(username);
        }
        if let Some(password) = var(ENV_PASSWORD) {
            builder = builder.password(password);
        }
        if let Some(proxy) = var(ENV_PROXY) {
            builder = builder.proxy(proxy);
        }
        if let Some(path) = var(ENV_CA_BUNDLE) {
            builder = builder.tls_verify(TlsVerify::CaBundle(path.into()));
        }
        if var(ENV_INSECURE).is_some_and(|v| is_truthy(&v)) {
            builder = builder.tls_verify(TlsVerify::Disabled);
        }
        builder
            .debug(var(ENV_DEBUG).is_some_and(|v| is_truthy(&v)))
            .build()
    }

    /// Base URL of the server, without trailing slashes.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Timeout of a single request.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Mode of TLS certificates verification.
    #[must_use]
    pub fn tls_verify(&self) -> &TlsVerify {
        &self.tls_verify
    }

    /// Proxy to send requests through, if any.
    #[must_use]
    pub fn proxy(&self) -> Option<&Url> {
        self.proxy.as_ref()
    }

    /// Indicates whether verbose request logging is enabled.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Additional headers provided by user.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Basic authentication credentials, if any.
    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Indicates whether both username and password are configured.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Headers to send with every request: JSON defaults overridden by
    /// [`SrsClientConfig::headers()`].
    #[must_use]
    pub fn request_headers(&self) -> HeaderMap {
        let json = HeaderValue::from_static("application/json");
        let mut headers = HeaderMap::new();
        drop(headers.insert(ACCEPT, json.clone()));
        drop(headers.insert(CONTENT_TYPE, json));
        for (name, value) in &self.headers {
            drop(headers.insert(name.clone(), value.clone()));
        }
        headers
    }
}

/// Builder of a [`SrsClientConfig`].
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug)]
pub struct SrsClientConfigBuilder {
    base_url: String,
    timeout_secs: u64,
    tls_verify: TlsVerify,
    proxy: Option<String>,
    debug: bool,
    headers: Vec<(String, String)>,
    username: Option<String>,
    password: Option<String>,
}

impl SrsClientConfigBuilder {
    fn new(base_url: String) -> Self {
        Self {
            base_url,
            timeout_secs: SrsClientConfig::DEFAULT_TIMEOUT_SECS,
            tls_verify: TlsVerify::default(),
            proxy: None,
            debug: false,
            headers: Vec::new(),
            username: None,
            password: None,
        }
    }

    /// Sets request timeout in seconds.
    #[must_use]
    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets mode of TLS certificates verification.
    #[must_use]
    pub fn tls_verify(mut self, mode: TlsVerify) -> Self {
        self.tls_verify = mode;
        self
    }

    /// Sets proxy URL to send requests through.
    #[must_use]
    pub fn proxy<S: Into<String>>(mut self, url: S) -> Self {
        self.proxy = Some(url.into());
        self
    }

    /// Enables or disables verbose request logging.
    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Adds a header to send with every request.
    ///
    /// Overrides the default `Accept` and `Content-Type` headers and any
    /// previously added header of the same name.
    #[must_use]
    pub fn header<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets both username and password for basic authentication.
    #[must_use]
    pub fn credentials<U, P>(self, username: U, password: P) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        self.username(username).password(password)
    }

    /// Sets username for basic authentication.
    #[must_use]
    pub fn username<S: Into<String>>(mut self, username: S) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets password for basic authentication.
    #[must_use]
    pub fn password<S: Into<String>>(mut self, password: S) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Validates the settings and builds a [`SrsClientConfig`].
    ///
    /// # Errors
    ///
    /// See [`ConfigError`] for details.
    pub fn build(self) -> Result<SrsClientConfig, ConfigError> {
        let base_url = self.base_url.trim_end_matches('/').to_owned();
        let parsed =
            Url::parse(&base_url).map_err(ConfigError::IncorrectBaseUrl)?;
        if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host()
        {
            return Err(ConfigError::UnsupportedBaseUrl(base_url));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let credentials = match (self.username, self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username,
                password,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialCredentials),
        };

        let proxy = self
            .proxy
            .map(|p| Url::parse(&p))
            .transpose()
            .map_err(ConfigError::IncorrectProxyUrl)?;

        let mut headers = HeaderMap::new();
        for (name, value) in self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(ConfigError::InvalidHeaderName)?;
            let value = HeaderValue::from_str(&value)
                .map_err(ConfigError::InvalidHeaderValue)?;
            drop(headers.insert(name, value));
        }

        Ok(SrsClientConfig {
            base_url,
            timeout: Duration::from_secs(self.timeout_secs),
            tls_verify: self.tls_verify,
            proxy,
            debug: self.debug,
            headers,
            credentials,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod spec {
    use std::collections::HashMap;

    use super::*;

    const BASE_URL: &str = "http://localhost:1985";

    #[test]
    fn creates_with_defaults() {
        let cfg = SrsClientConfig::new(BASE_URL).unwrap();

        assert_eq!(cfg.base_url(), BASE_URL);
        assert!(cfg.credentials().is_none());
        assert!(!cfg.has_credentials());
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.tls_verify(), &TlsVerify::Enabled);
        assert!(cfg.proxy().is_none());
        assert!(!cfg.debug());
        assert!(cfg.headers().is_empty());
    }

    #[test]
    fn creates_with_options() {
        let cfg = SrsClientConfig::builder(BASE_URL)
            .credentials("admin", "password")
            .timeout(5)
            .tls_verify(TlsVerify::Disabled)
            .debug(true)
            .header("User-Agent", "Test-App/1.0")
            .proxy("http://proxy:8080")
            .build()
            .unwrap();

        assert_eq!(
            cfg.credentials(),
            Some(&Credentials {
                username: "admin".into(),
                password: "password".into(),
            }),
        );
        assert_eq!(cfg.timeout(), Duration::from_secs(5));
        assert_eq!(cfg.tls_verify(), &TlsVerify::Disabled);
        assert!(cfg.debug());
        assert_eq!(cfg.headers()["user-agent"], "Test-App/1.0");
        assert_eq!(cfg.proxy().unwrap().as_str(), "http://proxy:8080/");
    }

    #[test]
    fn strips_trailing_slashes() {
        let cfg = SrsClientConfig::new("http://localhost:1985//").unwrap();

        assert_eq!(cfg.base_url(), BASE_URL);
    }

    #[test]
    fn rejects_malformed_base_url() {
        assert!(matches!(
            SrsClientConfig::new("invalid-url"),
            Err(ConfigError::IncorrectBaseUrl(_)),
        ));
        assert!(matches!(
            SrsClientConfig::new("ftp://localhost:1985"),
            Err(ConfigError::UnsupportedBaseUrl(_)),
        ));
        assert!(matches!(
            SrsClientConfig::new("mailto:admin@localhost"),
            Err(ConfigError::UnsupportedBaseUrl(_)),
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(matches!(
            SrsClientConfig::builder(BASE_URL).timeout(0).build(),
            Err(ConfigError::InvalidTimeout),
        ));
    }

    #[test]
    fn rejects_partial_credentials() {
        assert!(matches!(
            SrsClientConfig::builder(BASE_URL).username("admin").build(),
            Err(ConfigError::PartialCredentials),
        ));
        assert!(matches!(
            SrsClientConfig::builder(BASE_URL).password("secret").build(),
            Err(ConfigError::PartialCredentials),
        ));
    }

    #[test]
    fn rejects_invalid_proxy_and_headers() {
        assert!(matches!(
            SrsClientConfig::builder(BASE_URL).proxy("not a url").build(),
            Err(ConfigError::IncorrectProxyUrl(_)),
        ));
        assert!(matches!(
            SrsClientConfig::builder(BASE_URL)
                .header("bad header", "x")
                .build(),
            Err(ConfigError::InvalidHeaderName(_)),
        ));
        assert!(matches!(
            SrsClientConfig::builder(BASE_URL).header("X-Id", "a\nb").build(),
            Err(ConfigError::InvalidHeaderValue(_)),
        ));
    }

    #[test]
    fn user_headers_override_defaults() {
        let cfg = SrsClientConfig::builder(BASE_URL)
            .header("accept", "text/plain")
            .header("X-Trace", "1")
            .build()
            .unwrap();

        let headers = cfg.request_headers();
        assert_eq!(headers[ACCEPT], "text/plain");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers["x-trace"], "1");
        assert_eq!(headers.get_all(ACCEPT).iter().count(), 1);
    }

    #[test]
    fn reads_variables() {
        let vars: HashMap<_, _> = [
            (ENV_URL, "https://srs.example.com/"),
            (ENV_USERNAME, "admin"),
            (ENV_PASSWORD, "secret"),
            (ENV_TIMEOUT, "7"),
            (ENV_INSECURE, "true"),
            (ENV_DEBUG, "1"),
        ]
        .into_iter()
        .collect();

        let cfg =
            SrsClientConfig::from_vars(|k| vars.get(k).map(|v| (*v).to_owned()))
                .unwrap();

        assert_eq!(cfg.base_url(), "https://srs.example.com");
        assert!(cfg.has_credentials());
        assert_eq!(cfg.timeout(), Duration::from_secs(7));
        assert_eq!(cfg.tls_verify(), &TlsVerify::Disabled);
        assert!(cfg.debug());
    }

    #[test]
    fn validates_variables() {
        assert!(matches!(
            SrsClientConfig::from_vars(|_| None),
            Err(ConfigError::MissingBaseUrl),
        ));
        assert!(matches!(
            SrsClientConfig::from_vars(|k| match k {
                ENV_URL => Some(BASE_URL.into()),
                ENV_TIMEOUT => Some("-1".into()),
                _ => None,
            }),
            Err(ConfigError::InvalidTimeout),
        ));
        assert!(matches!(
            SrsClientConfig::from_vars(|k| match k {
                ENV_URL => Some(BASE_URL.into()),
                ENV_USERNAME => Some("admin".into()),
                _ => None,
            }),
            Err(ConfigError::PartialCredentials),
        ));
    }
}
