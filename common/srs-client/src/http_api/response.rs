use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{Envelope, Lookup as _};

/// Decoded response of [SRS HTTP API][1], kept as is.
///
/// Returned by endpoints having no dedicated view, and used to build the views
/// of the others.
///
/// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SrsClientResp(Value);

impl SrsClientResp {
    /// Wraps the decoded `value`.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// `data` field of the response, if any.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.0.get("data")
    }

    /// Value at the given `key` of the response, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Elements of the array at the given `key`, or nothing if there is no
    /// such array.
    #[must_use]
    pub fn list(&self, key: &str) -> &[Value] {
        self.0.array_at(&[key])
    }

    /// Message describing a failed response: its `data` field rendered as text.
    pub(crate) fn error_message(&self) -> String {
        match self.data() {
            None | Some(Value::Null) => "Unknown error".to_owned(),
            Some(Value::String(msg)) => msg.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Unwraps the decoded value.
    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl Envelope for SrsClientResp {
    fn raw(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for SrsClientResp {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<SrsClientResp> for Value {
    fn from(resp: SrsClientResp) -> Self {
        resp.0
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::*;

    #[test]
    fn exposes_envelope() {
        let resp = SrsClientResp::new(json!({
            "code": 0,
            "server": "vid-0xk989d",
            "service": "d7hu6b7w",
            "pid": "1",
            "data": {"ok": true},
        }));

        assert!(resp.is_ok());
        assert_eq!(resp.server(), "vid-0xk989d");
        assert_eq!(resp.service(), "d7hu6b7w");
        assert_eq!(resp.pid(), "1");
        assert_eq!(resp.data(), Some(&json!({"ok": true})));
    }

    #[test]
    fn renders_error_message() {
        let text =
            SrsClientResp::new(json!({"code": 2048, "data": "no stream"}));
        assert_eq!(text.error_message(), "no stream");

        let object = SrsClientResp::new(json!({"code": 1, "data": {"a": 1}}));
        assert_eq!(object.error_message(), r#"{"a":1}"#);

        let absent = SrsClientResp::new(json!({"code": 1}));
        assert_eq!(absent.error_message(), "Unknown error");
    }

    #[test]
    fn lists_default_to_empty() {
        let resp = SrsClientResp::new(json!({"streams": [{"id": "1"}]}));

        assert_eq!(resp.list("streams").len(), 1);
        assert!(resp.list("clients").is_empty());
    }
}
