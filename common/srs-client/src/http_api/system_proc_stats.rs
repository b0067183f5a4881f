use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{percent, Envelope, Lookup as _};

/// Snapshot of the host [SRS] runs on, as reported by
/// `/api/v1/summaries/system`.
///
/// [SRS]: https://ossrs.io
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SystemStats(Value);

impl SystemStats {
    fn cpu(&self, key: &str) -> i64 {
        self.0.i64_at(&["data", "cpu", key])
    }

    fn network(&self, key: &str) -> i64 {
        self.0.i64_at(&["data", "network", key])
    }

    fn disk(&self, key: &str) -> i64 {
        self.0.i64_at(&["data", "disk", key])
    }

    /// CPU usage of the host, as reported by the server.
    #[must_use]
    pub fn cpu_percent(&self) -> f64 {
        self.0.f64_at(&["data", "cpu", "percent"])
    }

    /// Alias of [`SystemStats::cpu_percent`].
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.cpu_percent()
    }

    #[must_use]
    pub fn load_average_1(&self) -> f64 {
        self.0.f64_at(&["data", "cpu", "load_1"])
    }

    #[must_use]
    pub fn load_average_5(&self) -> f64 {
        self.0.f64_at(&["data", "cpu", "load_5"])
    }

    #[must_use]
    pub fn load_average_15(&self) -> f64 {
        self.0.f64_at(&["data", "cpu", "load_15"])
    }

    #[must_use]
    pub fn user_time(&self) -> i64 {
        self.cpu("user")
    }

    #[must_use]
    pub fn nice(&self) -> i64 {
        self.cpu("nice")
    }

    #[must_use]
    pub fn system_time(&self) -> i64 {
        self.cpu("sys")
    }

    #[must_use]
    pub fn idle(&self) -> i64 {
        self.cpu("idle")
    }

    #[must_use]
    pub fn io_wait(&self) -> i64 {
        self.cpu("iowait")
    }

    #[must_use]
    pub fn irq(&self) -> i64 {
        self.cpu("irq")
    }

    #[must_use]
    pub fn soft_irq(&self) -> i64 {
        self.cpu("softirq")
    }

    #[must_use]
    pub fn steal(&self) -> i64 {
        self.cpu("steal")
    }

    #[must_use]
    pub fn guest(&self) -> i64 {
        self.cpu("guest")
    }

    /// Sum of all the CPU tick counters.
    #[must_use]
    pub fn total_time(&self) -> i64 {
        [
            self.user_time(),
            self.nice(),
            self.system_time(),
            self.idle(),
            self.io_wait(),
            self.irq(),
            self.soft_irq(),
            self.steal(),
            self.guest(),
        ]
        .into_iter()
        .fold(0, i64::saturating_add)
    }

    /// CPU ticks spent neither idle nor waiting for I/O.
    #[must_use]
    pub fn active_time(&self) -> i64 {
        self.total_time()
            .saturating_sub(self.idle())
            .saturating_sub(self.io_wait())
    }

    /// CPU usage computed from the tick counters, rounded to 2 decimal places.
    #[must_use]
    pub fn cpu_usage_percent(&self) -> f64 {
        percent(self.active_time(), self.total_time())
    }

    #[must_use]
    pub fn network_send_bytes_total(&self) -> i64 {
        self.network("bytes_send")
    }

    #[must_use]
    pub fn network_recv_bytes_total(&self) -> i64 {
        self.network("bytes_recv")
    }

    #[must_use]
    pub fn network_send_bytes_per_second(&self) -> i64 {
        self.network("bytes_send_delta")
    }

    #[must_use]
    pub fn network_recv_bytes_per_second(&self) -> i64 {
        self.network("bytes_recv_delta")
    }

    #[must_use]
    pub fn disk_read_bytes_total(&self) -> i64 {
        self.disk("read_bytes")
    }

    #[must_use]
    pub fn disk_write_bytes_total(&self) -> i64 {
        self.disk("write_bytes")
    }

    #[must_use]
    pub fn disk_read_bytes_per_second(&self) -> i64 {
        self.disk("read_bytes_delta")
    }

    #[must_use]
    pub fn disk_write_bytes_per_second(&self) -> i64 {
        self.disk("write_bytes_delta")
    }

    /// Time the disks were busy, in percent.
    #[must_use]
    pub fn disk_usage_percent(&self) -> f64 {
        self.0.f64_at(&["data", "disk", "busy"])
    }
}

impl Envelope for SystemStats {
    fn raw(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for SystemStats {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
