use std::borrow::Cow;

use serde_json::Value;

/// Defaulting lookups over a decoded [SRS HTTP API][1] payload.
///
/// Every getter walks the given `path` of object keys and falls back to the
/// zero value of its type whenever a key is absent or holds a value of another
/// JSON type.
///
/// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
pub(crate) trait Lookup {
    /// Returns the value at the given `path`, if any.
    fn at(&self, path: &[&str]) -> Option<&Value>;

    fn str_at(&self, path: &[&str]) -> &str {
        self.at(path).and_then(Value::as_str).unwrap_or_default()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn i64_at(&self, path: &[&str]) -> i64 {
        self.at(path)
            .and_then(|v| {
                v.as_i64()
                    .or_else(|| {
                        v.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX))
                    })
                    .or_else(|| v.as_f64().map(|f| f as i64))
            })
            .unwrap_or_default()
    }

    fn f64_at(&self, path: &[&str]) -> f64 {
        self.at(path).and_then(Value::as_f64).unwrap_or_default()
    }

    fn bool_at(&self, path: &[&str]) -> bool {
        self.at(path).and_then(Value::as_bool).unwrap_or_default()
    }

    fn array_at(&self, path: &[&str]) -> &[Value] {
        self.at(path)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl Lookup for Value {
    fn at(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |v, key| v.get(key))
    }
}

/// Common wrapper `{code, server, service, pid, data}` of most
/// [SRS HTTP API][1] responses.
///
/// [1]: https://ossrs.io/lts/en-us/docs/v5/doc/http-api
pub trait Envelope {
    /// Decoded response this view was built from.
    fn raw(&self) -> &Value;

    /// Application code of the response, `0` meaning success.
    fn code(&self) -> i64 {
        self.raw().i64_at(&["code"])
    }

    /// ID of the [SRS] server instance.
    ///
    /// [SRS]: https://ossrs.io
    fn server(&self) -> &str {
        self.raw().str_at(&["server"])
    }

    /// ID of the [SRS] service (changes on every restart).
    ///
    /// [SRS]: https://ossrs.io
    fn service(&self) -> &str {
        self.raw().str_at(&["service"])
    }

    /// PID of the [SRS] process, as reported by the server.
    ///
    /// Numeric PIDs are rendered as decimal strings.
    ///
    /// [SRS]: https://ossrs.io
    fn pid(&self) -> Cow<'_, str> {
        match self.raw().at(&["pid"]) {
            Some(Value::String(pid)) => Cow::Borrowed(pid.as_str()),
            Some(Value::Number(pid)) => Cow::Owned(pid.to_string()),
            _ => Cow::Borrowed(""),
        }
    }

    /// Indicates whether [`Envelope::code`] reports success.
    fn is_ok(&self) -> bool {
        self.code() == 0
    }
}

/// Converts a kilobits-per-second counter into megabits per second.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn kbps_to_mbps(kbps: i64) -> f64 {
    kbps as f64 / 1024.0
}

/// Rounds `value` to 2 decimal places, half away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `part` in `total`, rounded to 2 decimal places, or `0.0` if
/// `total` is zero.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percent(part: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod spec {
    use super::*;
    use serde_json::json;

    #[test]
    fn looks_up_nested_paths_with_defaults() {
        let v = json!({"a": {"b": {"s": "x", "i": 3, "f": 1.5, "t": true}}});

        assert_eq!(v.str_at(&["a", "b", "s"]), "x");
        assert_eq!(v.i64_at(&["a", "b", "i"]), 3);
        assert_eq!(v.f64_at(&["a", "b", "f"]), 1.5);
        assert_eq!(v.f64_at(&["a", "b", "i"]), 3.0);
        assert!(v.bool_at(&["a", "b", "t"]));

        assert_eq!(v.str_at(&["a", "missing", "s"]), "");
        assert_eq!(v.i64_at(&["a", "b", "s"]), 0);
        assert_eq!(v.f64_at(&["nope"]), 0.0);
        assert!(!v.bool_at(&["a", "b", "i"]));
        assert!(v.array_at(&["a"]).is_empty());
    }

    #[test]
    fn lookup_through_non_objects_is_absent() {
        let v = json!({"list": [1, 2], "num": 7});

        assert!(v.at(&["num", "inner"]).is_none());
        assert_eq!(v.array_at(&["list"]).len(), 2);
    }

    #[test]
    fn rounds_percentages() {
        assert_eq!(percent(3_670_016, 16_777_216), 21.88);
        assert_eq!(percent(1810, 9910), 18.26);
        assert_eq!(percent(5, 0), 0.0);
    }

    struct Raw(Value);

    impl Envelope for Raw {
        fn raw(&self) -> &Value {
            &self.0
        }
    }

    #[test]
    fn renders_numeric_pid() {
        assert_eq!(Raw(json!({"pid": "42"})).pid(), "42");
        assert_eq!(Raw(json!({"pid": 12345})).pid(), "12345");
        assert_eq!(Raw(json!({"pid": null})).pid(), "");
        assert_eq!(Raw(json!({})).pid(), "");
    }
}
