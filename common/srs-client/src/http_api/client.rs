use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{kbps_to_mbps, Lookup as _};

/// Client session connected to [SRS], as listed by `/api/v1/clients`.
///
/// [SRS]: https://ossrs.io
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Client(Value);

impl Client {
    /// [`Client::kind`] of a client publishing a stream.
    pub const PUBLISHER_KIND: &'static str = "fmle-publish";

    /// [`Client::kind`] of a client playing a stream via [HLS].
    ///
    /// [HLS]: https://en.wikipedia.org/wiki/HTTP_Live_Streaming
    pub const HLS_PLAYER_KIND: &'static str = "hls-player";

    #[must_use]
    pub fn id(&self) -> &str {
        self.0.str_at(&["id"])
    }

    #[must_use]
    pub fn vhost(&self) -> &str {
        self.0.str_at(&["vhost"])
    }

    #[must_use]
    pub fn stream(&self) -> &str {
        self.0.str_at(&["stream"])
    }

    #[must_use]
    pub fn ip(&self) -> &str {
        self.0.str_at(&["ip"])
    }

    #[must_use]
    pub fn page_url(&self) -> &str {
        self.0.str_at(&["pageUrl"])
    }

    #[must_use]
    pub fn swf_url(&self) -> &str {
        self.0.str_at(&["swfUrl"])
    }

    #[must_use]
    pub fn tc_url(&self) -> &str {
        self.0.str_at(&["tcUrl"])
    }

    #[must_use]
    pub fn url(&self) -> &str {
        self.0.str_at(&["url"])
    }

    /// Type of the client session, like `fmle-publish` or `rtmp-play`.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.0.str_at(&["type"])
    }

    /// Value of the `publish` flag reported by the server.
    #[must_use]
    pub fn publish(&self) -> bool {
        self.0.bool_at(&["publish"])
    }

    #[must_use]
    pub fn is_publisher(&self) -> bool {
        self.kind() == Self::PUBLISHER_KIND
    }

    #[must_use]
    pub fn is_player(&self) -> bool {
        !self.is_publisher()
    }

    #[must_use]
    pub fn is_hls_player(&self) -> bool {
        self.kind() == Self::HLS_PLAYER_KIND
    }

    /// Time the session is alive for, in seconds.
    #[must_use]
    pub fn alive_duration(&self) -> f64 {
        self.0.f64_at(&["alive"])
    }

    /// Bytes sent to the client.
    ///
    /// Read from the `kbps` section, falling back to the top-level
    /// `send_bytes` field.
    #[must_use]
    pub fn send_bytes(&self) -> i64 {
        self.bytes("send_bytes")
    }

    /// Bytes received from the client.
    ///
    /// Read from the `kbps` section, falling back to the top-level
    /// `recv_bytes` field.
    #[must_use]
    pub fn recv_bytes(&self) -> i64 {
        self.bytes("recv_bytes")
    }

    fn bytes(&self, key: &str) -> i64 {
        if self.0.at(&["kbps", key]).is_some() {
            self.0.i64_at(&["kbps", key])
        } else {
            self.0.i64_at(&[key])
        }
    }

    #[must_use]
    pub fn send_bitrate_mbps(&self) -> f64 {
        kbps_to_mbps(self.0.i64_at(&["kbps", "send_30s"]))
    }

    #[must_use]
    pub fn recv_bitrate_mbps(&self) -> f64 {
        kbps_to_mbps(self.0.i64_at(&["kbps", "recv_30s"]))
    }

    #[must_use]
    pub fn total_bitrate_mbps(&self) -> f64 {
        self.send_bitrate_mbps() + self.recv_bitrate_mbps()
    }
}

impl From<Value> for Client {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
