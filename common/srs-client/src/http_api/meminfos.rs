use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{percent, round2, Envelope, Lookup as _};

/// Memory of the host and of [SRS] process, as reported by `/api/v1/meminfos`.
///
/// Host memory is read from `data.system_mem_kb`, and process memory from
/// `data.memory_kb`. All the values are in kilobytes.
///
/// [SRS]: https://ossrs.io
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MemoryInfo(Value);

impl MemoryInfo {
    fn system(&self, key: &str) -> i64 {
        self.0.i64_at(&["data", "system_mem_kb", key])
    }

    fn process(&self, key: &str) -> i64 {
        self.0.i64_at(&["data", "memory_kb", key])
    }

    #[must_use]
    pub fn total_memory_kb(&self) -> i64 {
        self.system("total")
    }

    #[must_use]
    pub fn free_memory_kb(&self) -> i64 {
        self.system("free")
    }

    #[must_use]
    pub fn shared_memory_kb(&self) -> i64 {
        self.system("shared")
    }

    #[must_use]
    pub fn buffers_memory_kb(&self) -> i64 {
        self.system("buffers")
    }

    #[must_use]
    pub fn cached_memory_kb(&self) -> i64 {
        self.system("cached")
    }

    /// Memory used by applications, excluding buffers and cache.
    #[must_use]
    pub fn actual_used_memory_kb(&self) -> i64 {
        self.system("actual_used")
    }

    /// Memory available to applications, including buffers and cache.
    #[must_use]
    pub fn actual_free_memory_kb(&self) -> i64 {
        self.system("actual_free")
    }

    #[must_use]
    pub fn active_memory_kb(&self) -> i64 {
        self.system("active")
    }

    #[must_use]
    pub fn swap_total(&self) -> i64 {
        self.system("swap_total")
    }

    #[must_use]
    pub fn swap_free(&self) -> i64 {
        self.system("swap_free")
    }

    /// Share of [`MemoryInfo::actual_used_memory_kb`] in
    /// [`MemoryInfo::total_memory_kb`], rounded to 2 decimal places.
    #[must_use]
    pub fn memory_usage_percent(&self) -> f64 {
        percent(self.actual_used_memory_kb(), self.total_memory_kb())
    }

    #[must_use]
    pub fn memory_free_percent(&self) -> f64 {
        round2(100.0 - self.memory_usage_percent())
    }

    #[must_use]
    pub fn swap_usage_percent(&self) -> f64 {
        let total = self.swap_total();
        percent(total.saturating_sub(self.swap_free()), total)
    }

    /// Resident set size of [SRS] process.
    ///
    /// [SRS]: https://ossrs.io
    #[must_use]
    pub fn rss_kb(&self) -> i64 {
        self.process("rss")
    }

    #[must_use]
    pub fn shared_kb(&self) -> i64 {
        self.process("shared")
    }

    #[must_use]
    pub fn private_kb(&self) -> i64 {
        self.process("private")
    }

    /// Alias of [`MemoryInfo::total_memory_kb`].
    #[must_use]
    pub fn mem_total(&self) -> i64 {
        self.total_memory_kb()
    }

    /// Alias of [`MemoryInfo::free_memory_kb`].
    #[must_use]
    pub fn mem_free(&self) -> i64 {
        self.free_memory_kb()
    }

    /// Alias of [`MemoryInfo::active_memory_kb`].
    #[must_use]
    pub fn mem_active(&self) -> i64 {
        self.active_memory_kb()
    }

    /// Alias of [`MemoryInfo::actual_used_memory_kb`].
    #[must_use]
    pub fn real_in_use(&self) -> i64 {
        self.actual_used_memory_kb()
    }

    /// Alias of [`MemoryInfo::actual_free_memory_kb`].
    #[must_use]
    pub fn not_in_use(&self) -> i64 {
        self.actual_free_memory_kb()
    }

    /// Alias of [`MemoryInfo::buffers_memory_kb`].
    #[must_use]
    pub fn buffers(&self) -> i64 {
        self.buffers_memory_kb()
    }

    /// Alias of [`MemoryInfo::cached_memory_kb`].
    #[must_use]
    pub fn cached(&self) -> i64 {
        self.cached_memory_kb()
    }

    /// Alias of [`MemoryInfo::actual_used_memory_kb`].
    #[must_use]
    pub fn real_memory_usage(&self) -> i64 {
        self.actual_used_memory_kb()
    }

    /// Alias of [`MemoryInfo::memory_usage_percent`].
    #[must_use]
    pub fn percent_ram(&self) -> f64 {
        self.memory_usage_percent()
    }

    /// Alias of [`MemoryInfo::swap_usage_percent`].
    #[must_use]
    pub fn percent_swap(&self) -> f64 {
        self.swap_usage_percent()
    }
}

impl Envelope for MemoryInfo {
    fn raw(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for MemoryInfo {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
