//! SRS Client helps to
//!
//! Simplify to working process with [HTTP API][1] of [SRS] under Rust.
//!
//! [SRS]: https://ossrs.io
//! [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
mod http_api;

pub use crate::http_api::{
    map_srs_code, Authors, Client, ConfigError, Credentials, Envelope,
    Features, MemoryInfo, Method, ProcessStats, ResourceUsage, SrsClient,
    SrsClientConfig, SrsClientConfigBuilder, SrsClientError, SrsClientResp,
    Stream, Summary, SystemStats, ThreadStats, TlsVerify, Version, Vhost,
    ENV_URL,
};
