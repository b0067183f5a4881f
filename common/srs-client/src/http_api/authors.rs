use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{Envelope, Lookup as _};

/// Authors and license of [SRS], as reported by `/api/v1/authors`.
///
/// [SRS]: https://ossrs.io
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Authors(Value);

impl Authors {
    /// Names of the authors. Non-string entries are skipped.
    #[must_use]
    pub fn authors(&self) -> Vec<&str> {
        self.0
            .array_at(&["data", "authors"])
            .iter()
            .filter_map(Value::as_str)
            .collect()
    }

    #[must_use]
    pub fn license(&self) -> &str {
        self.0.str_at(&["data", "license"])
    }

    /// URL of the contributors list.
    #[must_use]
    pub fn contributors_url(&self) -> &str {
        self.0.str_at(&["data", "contributors"])
    }
}

impl Envelope for Authors {
    fn raw(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Authors {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
