//! [HTTP API] definitions of [SRS].
//!
//! [SRS]: https://ossrs.io/
//! [HTTP API]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api

mod authors;
mod client;
mod common;
mod config;
mod error;
mod feature;
mod meminfos;
mod response;
mod rusages;
mod self_proc_stats;
mod stream;
mod summary;
mod system_proc_stats;
mod version;
mod vhost;

use std::fs;

use derive_more::Display;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Certificate, Client as HttpClient, Proxy, StatusCode};
use serde_json::Value;
use url::Url;

pub use self::{
    authors::Authors,
    client::Client,
    common::Envelope,
    config::{
        ConfigError, Credentials, SrsClientConfig, SrsClientConfigBuilder,
        TlsVerify, ENV_URL,
    },
    error::{map_srs_code, SrsClientError},
    feature::Features,
    meminfos::MemoryInfo,
    response::SrsClientResp,
    rusages::ResourceUsage,
    self_proc_stats::{ProcessStats, ThreadStats},
    stream::Stream,
    summary::Summary,
    system_proc_stats::SystemStats,
    version::Version,
    vhost::Vhost,
};

/// Characters escaped in identifiers put into a URL path: everything except
/// [RFC 3986] unreserved ones.
///
/// [RFC 3986]: https://www.rfc-editor.org/rfc/rfc3986#section-2.3
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// HTTP method of a request to [SRS HTTP API][1].
///
/// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Method {
    /// `GET` method.
    #[display(fmt = "GET")]
    Get,

    /// `DELETE` method.
    #[display(fmt = "DELETE")]
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Delete => Self::DELETE,
        }
    }
}

/// Client for performing requests to [HTTP API][1] of spawned [SRS].
///
/// [SRS]: https://ossrs.io/
/// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
#[derive(Clone, Debug)]
pub struct SrsClient {
    http_client: HttpClient,
    config: SrsClientConfig,
}

impl SrsClient {
    /// Number of clients [SRS] lists by default.
    ///
    /// [SRS]: https://ossrs.io/
    pub const DEFAULT_CLIENTS_COUNT: u32 = 10;

    /// Default page of [`SrsClient::get_tcmalloc()`].
    pub const DEFAULT_TCMALLOC_PAGE: &'static str = "summary";

    /// Build [`SrsClient`] for future call to [HTTP API][1] API of spawned
    /// [SRS], using default settings.
    ///
    /// # Errors
    ///
    /// If incorrect `base_url` passed.
    ///
    /// [SRS]: https://ossrs.io/
    /// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
    pub fn build<S: Into<String>>(base_url: S) -> Result<Self, SrsClientError> {
        Self::new(SrsClientConfig::new(base_url)?)
    }

    /// Creates a new [`SrsClient`] with the provided [`SrsClientConfig`].
    ///
    /// # Errors
    ///
    /// If the configured CA bundle cannot be read or parsed, or the
    /// configured proxy is rejected.
    pub fn new(config: SrsClientConfig) -> Result<Self, SrsClientError> {
        let mut builder = HttpClient::builder()
            .timeout(config.timeout())
            .default_headers(config.request_headers())
            .connection_verbose(config.debug());

        match config.tls_verify() {
            TlsVerify::Enabled => {}
            TlsVerify::Disabled => {
                builder = builder.danger_accept_invalid_certs(true);
            }
            TlsVerify::CaBundle(path) => {
                let pem =
                    fs::read(path).map_err(ConfigError::UnreadableCaBundle)?;
                let cert = Certificate::from_pem(&pem)
                    .map_err(SrsClientError::ClientBuildFailed)?;
                builder = builder.add_root_certificate(cert);
            }
        }

        if let Some(proxy) = config.proxy() {
            let proxy = Proxy::all(proxy.clone())
                .map_err(SrsClientError::ClientBuildFailed)?;
            builder = builder.proxy(proxy);
        }

        let http_client =
            builder.build().map_err(SrsClientError::ClientBuildFailed)?;
        tracing::debug!(base_url = config.base_url(), "SrsClient created");

        Ok(Self {
            http_client,
            config,
        })
    }

    /// [`SrsClientConfig`] this [`SrsClient`] was created with.
    #[must_use]
    pub fn config(&self) -> &SrsClientConfig {
        &self.config
    }

    /// Performs a single request to the given `path` of [HTTP API][1].
    ///
    /// Returns the whole decoded response, not only its `data` field.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    ///
    /// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
    pub async fn send(
        &self,
        path: &str,
        method: Method,
        query: &[(&str, &str)],
    ) -> Result<SrsClientResp, SrsClientError> {
        let url = Url::parse(&format!("{}{path}", self.config.base_url()))?;

        let mut req = self.http_client.request(method.into(), url.clone());
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(creds) = self.config.credentials() {
            req = req.basic_auth(&creds.username, Some(&creds.password));
        }

        tracing::debug!(%method, %url, "sending request to SRS HTTP API");
        let resp = req.send().await.map_err(SrsClientError::RequestFailed)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(SrsClientError::RequestFailed)?;
        if self.config.debug() {
            tracing::debug!(
                %method,
                %url,
                status = status.as_u16(),
                size = body.len(),
                "received response from SRS HTTP API"
            );
        }

        process_resp(status, &body)
    }

    async fn get(&self, path: &str) -> Result<SrsClientResp, SrsClientError> {
        self.send(path, Method::Get, &[]).await
    }

    async fn delete(
        &self,
        path: &str,
    ) -> Result<SrsClientResp, SrsClientError> {
        self.send(path, Method::Delete, &[]).await
    }

    /// Retrieves the server version.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    pub async fn get_version(&self) -> Result<Version, SrsClientError> {
        Ok(self.get("/api/v1/versions").await?.into_inner().into())
    }

    /// Retrieves the summary of [SRS] process and its host.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    ///
    /// [SRS]: https://ossrs.io/
    pub async fn get_summaries(&self) -> Result<Summary, SrsClientError> {
        Ok(self.get("/api/v1/summaries").await?.into_inner().into())
    }

    /// Retrieves the resource usage of [SRS] process.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    ///
    /// [SRS]: https://ossrs.io/
    pub async fn get_resource_usage(
        &self,
    ) -> Result<ResourceUsage, SrsClientError> {
        Ok(self.get("/api/v1/rusages").await?.into_inner().into())
    }

    /// Alias of [`SrsClient::get_resource_usage()`].
    ///
    /// # Errors
    ///
    /// Same as [`SrsClient::get_resource_usage()`].
    pub async fn get_rusages(&self) -> Result<ResourceUsage, SrsClientError> {
        self.get_resource_usage().await
    }

    /// Retrieves the stats of [SRS] process itself.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    ///
    /// [SRS]: https://ossrs.io/
    pub async fn get_self_proc_stats(
        &self,
    ) -> Result<ProcessStats, SrsClientError> {
        Ok(self.get("/api/v1/summaries/self").await?.into_inner().into())
    }

    /// Retrieves the stats of the host [SRS] runs on.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    ///
    /// [SRS]: https://ossrs.io/
    pub async fn get_system_proc_stats(
        &self,
    ) -> Result<SystemStats, SrsClientError> {
        Ok(self.get("/api/v1/summaries/system").await?.into_inner().into())
    }

    /// Retrieves the memory info of [SRS] process and its host.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    ///
    /// [SRS]: https://ossrs.io/
    pub async fn get_meminfos(&self) -> Result<MemoryInfo, SrsClientError> {
        Ok(self.get("/api/v1/meminfos").await?.into_inner().into())
    }

    /// Retrieves the authors and license of [SRS].
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    ///
    /// [SRS]: https://ossrs.io/
    pub async fn get_authors(&self) -> Result<Authors, SrsClientError> {
        Ok(self.get("/api/v1/authors").await?.into_inner().into())
    }

    /// Retrieves the build options and feature flags of [SRS].
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    ///
    /// [SRS]: https://ossrs.io/
    pub async fn get_features(&self) -> Result<Features, SrsClientError> {
        Ok(self.get("/api/v1/features").await?.into_inner().into())
    }

    /// Retrieves the request info as seen by [SRS].
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    ///
    /// [SRS]: https://ossrs.io/
    pub async fn get_requests(&self) -> Result<SrsClientResp, SrsClientError> {
        self.get("/api/v1/requests").await
    }

    /// Retrieves the raw configuration of [SRS].
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    ///
    /// [SRS]: https://ossrs.io/
    pub async fn get_raw_config(
        &self,
    ) -> Result<SrsClientResp, SrsClientError> {
        self.get("/api/v1/raw").await
    }

    /// Retrieves the origin cluster info.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    pub async fn get_clusters(&self) -> Result<SrsClientResp, SrsClientError> {
        self.get("/api/v1/clusters").await
    }

    /// Retrieves the performance stats of [SRS].
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    ///
    /// [SRS]: https://ossrs.io/
    pub async fn get_performance(
        &self,
    ) -> Result<SrsClientResp, SrsClientError> {
        self.get("/api/v1/perf").await
    }

    /// Retrieves the given `page` of [tcmalloc] stats, like
    /// [`SrsClient::DEFAULT_TCMALLOC_PAGE`].
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    ///
    /// [tcmalloc]: https://github.com/google/tcmalloc
    pub async fn get_tcmalloc(
        &self,
        page: &str,
    ) -> Result<SrsClientResp, SrsClientError> {
        self.send("/api/v1/tcmalloc", Method::Get, &[("page", page)])
            .await
    }

    /// Lists all vhosts.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    pub async fn get_vhosts(&self) -> Result<Vec<Vhost>, SrsClientError> {
        let resp = self.get("/api/v1/vhosts").await?;
        Ok(resp.list("vhosts").iter().cloned().map(Vhost::from).collect())
    }

    /// Retrieves the vhost with the given `name`.
    ///
    /// Returns [`None`] if the server reports there is no such vhost.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails for another reason. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    pub async fn get_vhost(
        &self,
        name: &str,
    ) -> Result<Option<Vhost>, SrsClientError> {
        let path = format!("/api/v1/vhosts/{}", encode_segment(name));
        match self.get(&path).await {
            Ok(resp) => Ok(Some(single(resp, "vhost").into())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Lists all streams.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    pub async fn get_streams(&self) -> Result<Vec<Stream>, SrsClientError> {
        let resp = self.get("/api/v1/streams").await?;
        Ok(resp.list("streams").iter().cloned().map(Stream::from).collect())
    }

    /// Retrieves the stream with the given `id`.
    ///
    /// Returns [`None`] if the server reports there is no such stream.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails for another reason. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    pub async fn get_stream(
        &self,
        id: &str,
    ) -> Result<Option<Stream>, SrsClientError> {
        let path = format!("/api/v1/streams/{}", encode_segment(id));
        match self.get(&path).await {
            Ok(resp) => Ok(Some(single(resp, "stream").into())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Lists at most `count` clients, like
    /// [`SrsClient::DEFAULT_CLIENTS_COUNT`].
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    pub async fn get_clients(
        &self,
        count: u32,
    ) -> Result<Vec<Client>, SrsClientError> {
        let count = count.to_string();
        let resp = self
            .send("/api/v1/clients", Method::Get, &[("count", count.as_str())])
            .await?;
        Ok(resp.list("clients").iter().cloned().map(Client::from).collect())
    }

    /// Retrieves the client with the given `id`.
    ///
    /// # Errors
    ///
    /// With [`SrsClientError::ClientNotFound`] if the response contains no
    /// client. If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    pub async fn get_client(&self, id: &str) -> Result<Client, SrsClientError> {
        let path = format!("/api/v1/clients/{}", encode_segment(id));
        let resp = self.get(&path).await?;
        first_client(resp)
            .map(Client::from)
            .ok_or_else(|| SrsClientError::ClientNotFound(id.to_owned()))
    }

    /// Deletes the stream with the given `id`.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    pub async fn delete_stream(
        &self,
        id: &str,
    ) -> Result<SrsClientResp, SrsClientError> {
        self.delete(&format!("/api/v1/streams/{}", encode_segment(id)))
            .await
    }

    /// [Kicks off][1] a client connected to [SRS] server by its `id`.
    ///
    /// # Errors
    ///
    /// If API request cannot be performed, or fails. See
    /// [`SrsClientError`](enum@SrsClientError) for details.
    ///
    /// [SRS]: https://ossrs.io/
    /// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api#kickoff-client
    pub async fn delete_client(
        &self,
        id: &str,
    ) -> Result<SrsClientResp, SrsClientError> {
        self.delete(&format!("/api/v1/clients/{}", encode_segment(id)))
            .await
    }

    /// Alias of [`SrsClient::delete_client()`].
    ///
    /// # Errors
    ///
    /// Same as [`SrsClient::delete_client()`].
    pub async fn kickoff_client(
        &self,
        id: &str,
    ) -> Result<SrsClientResp, SrsClientError> {
        self.delete_client(id).await
    }
}

/// Decodes the `body` of a response having the given `status`.
///
/// A nonzero `code` in the body wins over the HTTP `status`.
fn process_resp(
    status: StatusCode,
    body: &[u8],
) -> Result<SrsClientResp, SrsClientError> {
    let resp = match serde_json::from_slice::<Value>(body) {
        Ok(v) => SrsClientResp::new(v),
        Err(e) if status.is_success() => {
            return Err(SrsClientError::DeserializeError(e))
        }
        Err(_) => return Err(SrsClientError::BadStatus(status)),
    };

    let code = resp.code();
    if code != 0 {
        let status = map_srs_code(code);
        let message = resp.error_message();
        tracing::warn!(code, status, %message, "SRS HTTP API reported error");
        return Err(SrsClientError::Api {
            code,
            status,
            message,
        });
    }
    if !status.is_success() {
        return Err(SrsClientError::BadStatus(status));
    }
    Ok(resp)
}

fn encode_segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

/// Object under the given `key` of a single-resource response, or the whole
/// response if there is no such object.
fn single(resp: SrsClientResp, key: &str) -> Value {
    let mut value = resp.into_inner();
    if value.get(key).is_some_and(Value::is_object) {
        value.get_mut(key).map(Value::take).unwrap_or_default()
    } else {
        value
    }
}

/// Client object of a `/clients/{id}` response: the `client` object, or the
/// first element of the `clients` array.
fn first_client(resp: SrsClientResp) -> Option<Value> {
    let mut value = resp.into_inner();
    if value.get("client").is_some_and(Value::is_object) {
        return value.get_mut("client").map(Value::take);
    }
    value
        .get_mut("clients")
        .and_then(Value::as_array_mut)
        .filter(|clients| !clients.is_empty())
        .map(|clients| clients.swap_remove(0))
}
