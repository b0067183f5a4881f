use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{Envelope, Lookup as _};

/// Build options and feature flags of [SRS], as reported by
/// `/api/v1/features`.
///
/// [SRS]: https://ossrs.io
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Features(Value);

impl Features {
    /// Raw `data.build` value, if reported.
    #[must_use]
    pub fn build(&self) -> Option<&Value> {
        self.0.at(&["data", "build"])
    }

    /// Date [SRS] was built on.
    ///
    /// Read from `data.build.date`, or from `data.build` itself when the
    /// server reports it as a plain string.
    ///
    /// [SRS]: https://ossrs.io
    #[must_use]
    pub fn build_date(&self) -> &str {
        match self.build() {
            Some(Value::String(date)) => date.as_str(),
            _ => self.0.str_at(&["data", "build", "date"]),
        }
    }

    #[must_use]
    pub fn build_mode(&self) -> &str {
        self.0.str_at(&["data", "build", "mode"])
    }

    #[must_use]
    pub fn build_version(&self) -> &str {
        self.0.str_at(&["data", "build", "version"])
    }

    #[must_use]
    pub fn build2(&self) -> &str {
        self.0.str_at(&["data", "build2"])
    }

    /// Options [SRS] was configured with.
    ///
    /// [SRS]: https://ossrs.io
    #[must_use]
    pub fn options(&self) -> &str {
        self.0.str_at(&["data", "options"])
    }

    #[must_use]
    pub fn options2(&self) -> &str {
        self.0.str_at(&["data", "options2"])
    }

    /// Raw `data.features` map, if reported.
    #[must_use]
    pub fn features(&self) -> Option<&Map<String, Value>> {
        self.0.at(&["data", "features"]).and_then(Value::as_object)
    }

    /// Names of all the features reported as enabled.
    #[must_use]
    pub fn enabled_features(&self) -> Vec<&str> {
        self.features()
            .into_iter()
            .flatten()
            .filter(|(_, on)| on.as_bool() == Some(true))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Indicates whether the given `feature` is reported and is exactly
    /// `true`.
    #[must_use]
    pub fn has_feature(&self, feature: &str) -> bool {
        self.0.bool_at(&["data", "features", feature])
    }

    #[must_use]
    pub fn is_ssl_enabled(&self) -> bool {
        self.has_feature("ssl")
    }

    #[must_use]
    pub fn is_hls_enabled(&self) -> bool {
        self.has_feature("hls")
    }

    #[must_use]
    pub fn is_hds_enabled(&self) -> bool {
        self.has_feature("hds")
    }

    #[must_use]
    pub fn is_callback_enabled(&self) -> bool {
        self.has_feature("callback")
    }

    #[must_use]
    pub fn is_api_enabled(&self) -> bool {
        self.has_feature("api")
    }

    #[must_use]
    pub fn is_httpd_enabled(&self) -> bool {
        self.has_feature("httpd")
    }

    #[must_use]
    pub fn is_dvr_enabled(&self) -> bool {
        self.has_feature("dvr")
    }

    #[must_use]
    pub fn is_transcode_enabled(&self) -> bool {
        self.has_feature("transcode")
    }

    #[must_use]
    pub fn is_ingest_enabled(&self) -> bool {
        self.has_feature("ingest")
    }

    #[must_use]
    pub fn is_stat_enabled(&self) -> bool {
        self.has_feature("stat")
    }

    #[must_use]
    pub fn is_caster_enabled(&self) -> bool {
        self.has_feature("caster")
    }

    #[must_use]
    pub fn is_complex_send_enabled(&self) -> bool {
        self.has_feature("complex_send")
    }

    #[must_use]
    pub fn is_tcp_nodelay_enabled(&self) -> bool {
        self.has_feature("tcp_nodelay")
    }

    #[must_use]
    pub fn is_so_sendbuf_enabled(&self) -> bool {
        self.has_feature("so_sendbuf")
    }

    /// Indicates whether merged-read is enabled.
    #[must_use]
    pub fn is_mr_enabled(&self) -> bool {
        self.has_feature("mr")
    }
}

impl Envelope for Features {
    fn raw(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Features {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
