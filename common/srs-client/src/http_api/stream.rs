use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{kbps_to_mbps, Lookup as _};

/// Media stream active on [SRS], as listed by `/api/v1/streams`.
///
/// [SRS]: https://ossrs.io
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Stream(Value);

impl Stream {
    #[must_use]
    pub fn id(&self) -> &str {
        self.0.str_at(&["id"])
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.0.str_at(&["name"])
    }

    #[must_use]
    pub fn vhost(&self) -> &str {
        self.0.str_at(&["vhost"])
    }

    #[must_use]
    pub fn app(&self) -> &str {
        self.0.str_at(&["app"])
    }

    #[must_use]
    pub fn tc_url(&self) -> &str {
        self.0.str_at(&["tcUrl"])
    }

    #[must_use]
    pub fn url(&self) -> &str {
        self.0.str_at(&["url"])
    }

    /// Time the stream is alive for, in milliseconds.
    #[must_use]
    pub fn live_ms(&self) -> i64 {
        self.0.i64_at(&["live_ms"])
    }

    /// Number of clients connected to the stream.
    #[must_use]
    pub fn clients(&self) -> i64 {
        self.0.i64_at(&["clients"])
    }

    #[must_use]
    pub fn frames(&self) -> i64 {
        self.0.i64_at(&["frames"])
    }

    #[must_use]
    pub fn send_bytes(&self) -> i64 {
        self.0.i64_at(&["send_bytes"])
    }

    #[must_use]
    pub fn recv_bytes(&self) -> i64 {
        self.0.i64_at(&["recv_bytes"])
    }

    /// Receiving bitrate over the last 30 seconds, in kbps.
    #[must_use]
    pub fn recv_kbps(&self) -> i64 {
        self.0.i64_at(&["kbps", "recv_30s"])
    }

    /// Sending bitrate over the last 30 seconds, in kbps.
    #[must_use]
    pub fn send_kbps(&self) -> i64 {
        self.0.i64_at(&["kbps", "send_30s"])
    }

    /// Total bitrate of the stream, in kbps.
    #[must_use]
    pub fn bitrate_kbps(&self) -> i64 {
        self.recv_kbps().saturating_add(self.send_kbps())
    }

    #[must_use]
    pub fn send_bitrate_mbps(&self) -> f64 {
        kbps_to_mbps(self.send_kbps())
    }

    #[must_use]
    pub fn recv_bitrate_mbps(&self) -> f64 {
        kbps_to_mbps(self.recv_kbps())
    }

    #[must_use]
    pub fn total_bitrate_mbps(&self) -> f64 {
        self.send_bitrate_mbps() + self.recv_bitrate_mbps()
    }

    /// Indicates whether the stream is being published right now.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.0.bool_at(&["publish", "active"])
    }

    /// ID of the client publishing the stream, if reported.
    #[must_use]
    pub fn publish_client_id(&self) -> Option<&str> {
        self.0.at(&["publish", "cid"]).and_then(Value::as_str)
    }

    /// ID of the client publishing the stream, or an empty string.
    #[must_use]
    pub fn publisher_id(&self) -> &str {
        self.publish_client_id().unwrap_or_default()
    }

    /// Duration the stream is alive for, in seconds.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn duration_in_seconds(&self) -> f64 {
        self.live_ms() as f64 / 1000.0
    }

    #[must_use]
    pub fn video_codec(&self) -> &str {
        self.0.str_at(&["video", "codec"])
    }

    #[must_use]
    pub fn video_profile(&self) -> &str {
        self.0.str_at(&["video", "profile"])
    }

    #[must_use]
    pub fn video_level(&self) -> &str {
        self.0.str_at(&["video", "level"])
    }

    #[must_use]
    pub fn video_width(&self) -> i64 {
        self.0.i64_at(&["video", "width"])
    }

    #[must_use]
    pub fn video_height(&self) -> i64 {
        self.0.i64_at(&["video", "height"])
    }

    #[must_use]
    pub fn video_fps(&self) -> f64 {
        self.0.f64_at(&["video", "fps"])
    }

    #[must_use]
    pub fn audio_codec(&self) -> &str {
        self.0.str_at(&["audio", "codec"])
    }

    #[must_use]
    pub fn audio_sample_rate(&self) -> i64 {
        self.0.i64_at(&["audio", "sample_rate"])
    }

    /// Audio channels, as reported in the `channel` field.
    #[must_use]
    pub fn audio_channel(&self) -> i64 {
        self.0.i64_at(&["audio", "channel"])
    }

    /// Audio channels, as reported in the `channels` field.
    #[must_use]
    pub fn audio_channels(&self) -> i64 {
        self.0.i64_at(&["audio", "channels"])
    }

    #[must_use]
    pub fn audio_profile(&self) -> &str {
        self.0.str_at(&["audio", "profile"])
    }
}

impl From<Value> for Stream {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
