use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{Envelope, Lookup as _};

/// [getrusage(2)][1] of [SRS] process, as reported by `/api/v1/rusages`.
///
/// [SRS]: https://ossrs.io
/// [1]: https://man7.org/linux/man-pages/man2/getrusage.2.html
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ResourceUsage(Value);

impl ResourceUsage {
    fn int(&self, key: &str) -> i64 {
        self.0.i64_at(&["data", "rusage", key])
    }

    /// Raw `data.rusage` object, if reported.
    #[must_use]
    pub fn resource_info(&self) -> Option<&Value> {
        self.0.at(&["data", "rusage"])
    }

    /// CPU time spent in user mode, in seconds.
    #[must_use]
    pub fn user_time(&self) -> f64 {
        self.0.f64_at(&["data", "rusage", "ru_utime"])
    }

    /// CPU time spent in kernel mode, in seconds.
    #[must_use]
    pub fn system_time(&self) -> f64 {
        self.0.f64_at(&["data", "rusage", "ru_stime"])
    }

    #[must_use]
    pub fn total_cpu_time(&self) -> f64 {
        self.user_time() + self.system_time()
    }

    /// Maximum resident set size, in kilobytes.
    #[must_use]
    pub fn max_rss(&self) -> i64 {
        self.int("ru_maxrss")
    }

    #[must_use]
    pub fn shared_memory(&self) -> i64 {
        self.int("ru_ixrss")
    }

    #[must_use]
    pub fn unshared_data(&self) -> i64 {
        self.int("ru_idrss")
    }

    #[must_use]
    pub fn unshared_stack(&self) -> i64 {
        self.int("ru_isrss")
    }

    #[must_use]
    pub fn minor_faults(&self) -> i64 {
        self.int("ru_minflt")
    }

    #[must_use]
    pub fn major_faults(&self) -> i64 {
        self.int("ru_majflt")
    }

    #[must_use]
    pub fn swaps(&self) -> i64 {
        self.int("ru_nswap")
    }

    #[must_use]
    pub fn block_input_operations(&self) -> i64 {
        self.int("ru_inblock")
    }

    #[must_use]
    pub fn block_output_operations(&self) -> i64 {
        self.int("ru_oublock")
    }

    /// Alias of [`ResourceUsage::block_input_operations`].
    #[must_use]
    pub fn input_operations(&self) -> i64 {
        self.block_input_operations()
    }

    /// Alias of [`ResourceUsage::block_output_operations`].
    #[must_use]
    pub fn output_operations(&self) -> i64 {
        self.block_output_operations()
    }

    #[must_use]
    pub fn messages_sent(&self) -> i64 {
        self.int("ru_msgsnd")
    }

    #[must_use]
    pub fn messages_received(&self) -> i64 {
        self.int("ru_msgrcv")
    }

    #[must_use]
    pub fn signals_received(&self) -> i64 {
        self.int("ru_nsignals")
    }

    #[must_use]
    pub fn voluntary_context_switches(&self) -> i64 {
        self.int("ru_nvcsw")
    }

    #[must_use]
    pub fn involuntary_context_switches(&self) -> i64 {
        self.int("ru_nivcsw")
    }

    #[must_use]
    pub fn total_context_switches(&self) -> i64 {
        self.voluntary_context_switches()
            .saturating_add(self.involuntary_context_switches())
    }
}

impl Envelope for ResourceUsage {
    fn raw(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for ResourceUsage {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
