use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{Envelope, Lookup as _};

/// Build version of [SRS], as reported by `/api/v1/versions`.
///
/// [SRS]: https://ossrs.io
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Version(Value);

impl Version {
    /// ID of the [SRS] server instance.
    ///
    /// [SRS]: https://ossrs.io
    #[must_use]
    pub fn server_id(&self) -> &str {
        self.server()
    }

    /// ID of the [SRS] service.
    ///
    /// [SRS]: https://ossrs.io
    #[must_use]
    pub fn service_id(&self) -> &str {
        self.service()
    }

    #[must_use]
    pub fn major(&self) -> i64 {
        self.0.i64_at(&["data", "major"])
    }

    #[must_use]
    pub fn minor(&self) -> i64 {
        self.0.i64_at(&["data", "minor"])
    }

    #[must_use]
    pub fn revision(&self) -> i64 {
        self.0.i64_at(&["data", "revision"])
    }

    /// Full version string, like `5.0.170`.
    ///
    /// `0.0.0` if the server reported none.
    #[must_use]
    pub fn version(&self) -> &str {
        match self.0.str_at(&["data", "version"]) {
            "" => "0.0.0",
            v => v,
        }
    }

    /// Indicates whether [`Version::version`] equals the given `version`.
    #[must_use]
    pub fn is_version(&self, version: &str) -> bool {
        compare_versions(self.version(), version) == Ordering::Equal
    }

    /// Indicates whether [`Version::version`] is newer than the given
    /// `version`.
    #[must_use]
    pub fn is_newer_than(&self, version: &str) -> bool {
        compare_versions(self.version(), version) == Ordering::Greater
    }

    /// Indicates whether [`Version::version`] is older than the given
    /// `version`.
    #[must_use]
    pub fn is_older_than(&self, version: &str) -> bool {
        compare_versions(self.version(), version) == Ordering::Less
    }
}

impl Envelope for Version {
    fn raw(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Version {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Compares dot-separated version strings numerically, component by
/// component.
///
/// Missing components count as `0`, and anything after the leading digits of
/// a component is ignored, so `4.0` equals `4.0.0`. A pre-release tag after
/// `-` ranks below the bare version, so `5.0.1-rc` is older than `5.0.1`.
/// Build metadata after `+` is ignored.
fn compare_versions(a: &str, b: &str) -> Ordering {
    let (a, a_pre) = parse_version(a);
    let (b, b_pre) = parse_version(b);
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or_default();
            let y = b.get(i).copied().unwrap_or_default();
            x.cmp(&y)
        })
        .find(|o| o.is_ne())
        .unwrap_or_else(|| match (a_pre, b_pre) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => x.cmp(y),
        })
}

/// Splits `version` into its numeric components and its pre-release tag.
fn parse_version(version: &str) -> (Vec<u64>, Option<&str>) {
    let version = version.trim().trim_start_matches(['v', 'V']);
    let version = version.split_once('+').map_or(version, |(v, _)| v);
    let (core, pre) = match version.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (version, None),
    };
    let components = core
        .split('.')
        .map(|part| {
            let digits = part
                .find(|c: char| !c.is_ascii_digit())
                .map_or(part, |end| &part[..end]);
            digits.parse().unwrap_or_default()
        })
        .collect();
    (components, pre)
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::*;

    fn version(v: &str) -> Version {
        Version::from(json!({
            "code": 0,
            "server": "vid-0xk989d",
            "service": "d7hu6b7w",
            "pid": "12345",
            "data": {"major": 4, "minor": 0, "revision": 0, "version": v},
        }))
    }

    #[test]
    fn reads_fields() {
        let v = version("4.0.0");

        assert_eq!(v.server_id(), "vid-0xk989d");
        assert_eq!(v.service_id(), "d7hu6b7w");
        assert_eq!(v.pid(), "12345");
        assert_eq!(v.major(), 4);
        assert_eq!(v.minor(), 0);
        assert_eq!(v.revision(), 0);
        assert_eq!(v.version(), "4.0.0");
    }

    #[test]
    fn compares_semantically() {
        let v = version("4.0.0");

        assert!(v.is_newer_than("3.9.9"));
        assert!(v.is_version("4.0.0"));
        assert!(v.is_older_than("5.0.0"));
        assert!(!v.is_newer_than("4.0.0"));
        assert!(!v.is_older_than("4.0.0"));
    }

    #[test]
    fn compares_numerically_not_lexically() {
        let v = version("4.10.0");

        assert!(v.is_newer_than("4.9.0"));
        assert!(v.is_version("4.10"));
        assert!(v.is_older_than("v4.10.1"));
    }

    #[test]
    fn ranks_pre_releases_below_releases() {
        let rc = version("5.0.1-rc1");

        assert!(rc.is_older_than("5.0.1"));
        assert!(!rc.is_version("5.0.1"));
        assert!(rc.is_newer_than("5.0.0"));
        assert!(rc.is_newer_than("5.0.1-rc0"));
        assert!(rc.is_version("5.0.1-rc1+build7"));
        assert!(version("5.0.1").is_newer_than("5.0.1-rc1"));
        assert!(version("5.0.1+build7").is_version("5.0.1"));
    }

    #[test]
    fn defaults_on_empty() {
        let v = Version::from(json!({}));

        assert_eq!(v.server_id(), "");
        assert_eq!(v.service_id(), "");
        assert_eq!(v.pid(), "");
        assert_eq!(v.major(), 0);
        assert_eq!(v.minor(), 0);
        assert_eq!(v.revision(), 0);
        assert_eq!(v.version(), "0.0.0");
        assert!(v.is_version("0.0.0"));
    }
}
