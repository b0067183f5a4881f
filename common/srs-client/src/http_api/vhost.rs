use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::Lookup as _;

/// [Virtual host][1] configured on [SRS], as listed by `/api/v1/vhosts`.
///
/// [SRS]: https://ossrs.io
/// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/rtmp-url-vhost
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Vhost(Value);

impl Vhost {
    #[must_use]
    pub fn id(&self) -> &str {
        self.0.str_at(&["id"])
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.0.str_at(&["name"])
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.0.bool_at(&["enabled"])
    }

    /// Number of clients connected to this vhost.
    #[must_use]
    pub fn clients(&self) -> i64 {
        self.0.i64_at(&["clients"])
    }

    /// Number of streams published to this vhost.
    #[must_use]
    pub fn streams(&self) -> i64 {
        self.0.i64_at(&["streams"])
    }

    #[must_use]
    pub fn recv_bytes(&self) -> i64 {
        self.0.i64_at(&["recv_bytes"])
    }

    #[must_use]
    pub fn send_bytes(&self) -> i64 {
        self.0.i64_at(&["send_bytes"])
    }

    #[must_use]
    pub fn recv_kbps(&self) -> i64 {
        self.0.i64_at(&["kbps", "recv_30s"])
    }

    #[must_use]
    pub fn send_kbps(&self) -> i64 {
        self.0.i64_at(&["kbps", "send_30s"])
    }

    #[must_use]
    pub fn is_hls_enabled(&self) -> bool {
        self.0.bool_at(&["hls", "enabled"])
    }

    /// Duration of a single [HLS] fragment, in seconds.
    ///
    /// [HLS]: https://en.wikipedia.org/wiki/HTTP_Live_Streaming
    #[must_use]
    pub fn hls_fragment(&self) -> f64 {
        self.0.f64_at(&["hls", "fragment"])
    }

    /// Total bandwidth of this vhost, in kbps.
    #[must_use]
    pub fn total_kbps(&self) -> i64 {
        self.recv_kbps().saturating_add(self.send_kbps())
    }

    /// Total data transferred through this vhost, in bytes.
    #[must_use]
    pub fn total_bytes(&self) -> i64 {
        self.recv_bytes().saturating_add(self.send_bytes())
    }
}

impl From<Value> for Vhost {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
