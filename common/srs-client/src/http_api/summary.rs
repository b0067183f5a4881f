use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{Envelope, Lookup as _};

/// Aggregated snapshot of [SRS] process and its host, as reported by
/// `/api/v1/summaries`.
///
/// [SRS]: https://ossrs.io
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Summary(Value);

impl Summary {
    fn data_i64(&self, key: &str) -> i64 {
        self.0.i64_at(&["data", key])
    }

    fn data_f64(&self, key: &str) -> f64 {
        self.0.f64_at(&["data", key])
    }

    fn self_i64(&self, key: &str) -> i64 {
        self.0.i64_at(&["data", "self", key])
    }

    fn self_f64(&self, key: &str) -> f64 {
        self.0.f64_at(&["data", "self", key])
    }

    fn system_i64(&self, key: &str) -> i64 {
        self.0.i64_at(&["data", "system", key])
    }

    fn system_f64(&self, key: &str) -> f64 {
        self.0.f64_at(&["data", "system", key])
    }

    /// Indicates whether the server managed to sample its stats.
    ///
    /// `true` if the server doesn't report it.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.0
            .at(&["data", "ok"])
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// Server time of the snapshot, in Unix milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> i64 {
        self.data_i64("now_ms")
    }

    /// Version of the running [SRS].
    ///
    /// [SRS]: https://ossrs.io
    #[must_use]
    pub fn version(&self) -> &str {
        self.0.str_at(&["data", "self", "version"])
    }

    #[must_use]
    pub fn ppid(&self) -> i64 {
        self.self_i64("ppid")
    }

    #[must_use]
    pub fn argv(&self) -> &str {
        self.0.str_at(&["data", "argv"])
    }

    #[must_use]
    pub fn cwd(&self) -> &str {
        self.0.str_at(&["data", "cwd"])
    }

    /// Memory used by [SRS] process, in kilobytes.
    ///
    /// [SRS]: https://ossrs.io
    #[must_use]
    pub fn memory_kbyte(&self) -> i64 {
        self.self_i64("mem_kbyte")
    }

    #[must_use]
    pub fn memory_percent(&self) -> f64 {
        self.self_f64("mem_percent")
    }

    #[must_use]
    pub fn cpu_percent(&self) -> f64 {
        self.data_f64("cpu_percent")
    }

    /// Uptime of [SRS] process, in seconds.
    ///
    /// [SRS]: https://ossrs.io
    #[must_use]
    pub fn srs_uptime(&self) -> i64 {
        self.self_i64("srs_uptime")
    }

    /// [`Summary::srs_uptime`] formatted as `{days} days, HH:MM:SS`.
    #[must_use]
    pub fn uptime_duration(&self) -> String {
        let secs = self.srs_uptime().max(0);
        format!(
            "{} days, {:02}:{:02}:{:02}",
            secs / 86_400,
            secs % 86_400 / 3600,
            secs % 3600 / 60,
            secs % 60,
        )
    }

    #[must_use]
    pub fn system_cpu_percent(&self) -> f64 {
        self.data_f64("system_cpu_percent")
    }

    #[must_use]
    pub fn disk_read_kbps(&self) -> i64 {
        self.data_i64("disk_read_KBps")
    }

    #[must_use]
    pub fn disk_write_kbps(&self) -> i64 {
        self.data_i64("disk_write_KBps")
    }

    #[must_use]
    pub fn disk_busy_percent(&self) -> f64 {
        self.data_f64("disk_busy_percent")
    }

    #[must_use]
    pub fn mem_ram_kbyte(&self) -> i64 {
        self.self_i64("mem_ram_kbyte")
    }

    #[must_use]
    pub fn mem_ram_percent(&self) -> f64 {
        self.self_f64("mem_ram_percent")
    }

    #[must_use]
    pub fn mem_swap_kbyte(&self) -> i64 {
        self.self_i64("mem_swap_kbyte")
    }

    #[must_use]
    pub fn mem_swap_percent(&self) -> f64 {
        self.self_f64("mem_swap_percent")
    }

    #[must_use]
    pub fn cpu_count(&self) -> i64 {
        self.data_i64("cpus")
    }

    #[must_use]
    pub fn cpus_online(&self) -> i64 {
        self.data_i64("cpus_online")
    }

    /// Uptime of the host, in seconds.
    #[must_use]
    pub fn uptime(&self) -> f64 {
        self.system_f64("uptime")
    }

    #[must_use]
    pub fn idle_time(&self) -> f64 {
        self.system_f64("idle_time")
    }

    #[must_use]
    pub fn load_1m(&self) -> f64 {
        self.system_f64("load_1m")
    }

    #[must_use]
    pub fn load_5m(&self) -> f64 {
        self.system_f64("load_5m")
    }

    #[must_use]
    pub fn load_15m(&self) -> f64 {
        self.system_f64("load_15m")
    }

    #[must_use]
    pub fn network_recv_bytes(&self) -> i64 {
        self.system_i64("net_recv_bytes")
    }

    #[must_use]
    pub fn network_send_bytes(&self) -> i64 {
        self.system_i64("net_send_bytes")
    }

    /// Bytes received over the internal network interfaces.
    #[must_use]
    pub fn network_received_bytes(&self) -> i64 {
        self.system_i64("net_recvi_bytes")
    }

    /// Bytes sent over the internal network interfaces.
    #[must_use]
    pub fn network_sent_bytes(&self) -> i64 {
        self.system_i64("net_sendi_bytes")
    }

    #[must_use]
    pub fn srs_recv_bytes(&self) -> i64 {
        self.data_i64("srs_recv_bytes")
    }

    #[must_use]
    pub fn srs_send_bytes(&self) -> i64 {
        self.data_i64("srs_send_bytes")
    }

    /// Number of TCP connections on the host.
    #[must_use]
    pub fn connections_sys(&self) -> i64 {
        self.data_i64("conn_sys")
    }

    /// Number of established TCP connections on the host.
    #[must_use]
    pub fn connections_sys_et(&self) -> i64 {
        self.data_i64("conn_sys_et")
    }

    /// Number of TCP connections in `TIME_WAIT` state on the host.
    #[must_use]
    pub fn connections_sys_tw(&self) -> i64 {
        self.data_i64("conn_sys_tw")
    }

    /// Number of UDP sockets on the host.
    #[must_use]
    pub fn connections_sys_udp(&self) -> i64 {
        self.data_i64("conn_sys_udp")
    }

    /// Number of connections served by [SRS].
    ///
    /// [SRS]: https://ossrs.io
    #[must_use]
    pub fn connections_srs(&self) -> i64 {
        self.data_i64("conn_srs")
    }

    /// Memory used by [SRS] process, like `100.00 MB (5.50%)`.
    ///
    /// [SRS]: https://ossrs.io
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn memory_usage_formatted(&self) -> String {
        format!(
            "{:.2} MB ({:.2}%)",
            self.memory_kbyte() as f64 / 1024.0,
            self.memory_percent(),
        )
    }

    /// RAM and swap usage, like
    /// `RAM: 8.00 GB (75.50%), Swap: 4.00 GB (25.50%)`.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn system_memory_formatted(&self) -> String {
        format!(
            "RAM: {:.2} GB ({:.2}%), Swap: {:.2} GB ({:.2}%)",
            self.mem_ram_kbyte() as f64 / 1024.0 / 1024.0,
            self.mem_ram_percent(),
            self.mem_swap_kbyte() as f64 / 1024.0 / 1024.0,
            self.mem_swap_percent(),
        )
    }

    /// Load averages, like `1.50, 1.20, 1.00`.
    #[must_use]
    pub fn load_average_formatted(&self) -> String {
        format!(
            "{:.2}, {:.2}, {:.2}",
            self.load_1m(),
            self.load_5m(),
            self.load_15m(),
        )
    }

    /// Network totals, like `Recv: 0.98 MB, Send: 1.95 MB`.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn network_stats_formatted(&self) -> String {
        format!(
            "Recv: {:.2} MB, Send: {:.2} MB",
            self.network_recv_bytes() as f64 / 1024.0 / 1024.0,
            self.network_send_bytes() as f64 / 1024.0 / 1024.0,
        )
    }
}

impl Envelope for Summary {
    fn raw(&self) -> &Value {
        &self.0
    }

    fn is_ok(&self) -> bool {
        Summary::is_ok(self)
    }
}

impl From<Value> for Summary {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::*;

    fn summary() -> Summary {
        Summary::from(json!({
            "code": 0,
            "server": "test-server",
            "service": "test-service",
            "pid": "12345",
            "data": {
                "ok": true,
                "now_ms": 1_615_478_400_000_i64,
                "self": {
                    "version": "4.0.0",
                    "ppid": 1,
                    "mem_kbyte": 102_400,
                    "mem_percent": 5.5,
                    "srs_uptime": 86400,
                    "mem_ram_kbyte": 8_388_608,
                    "mem_ram_percent": 75.5,
                    "mem_swap_kbyte": 4_194_304,
                    "mem_swap_percent": 25.5,
                },
                "system": {
                    "uptime": 604_800.0,
                    "idle_time": 302_400.0,
                    "load_1m": 1.5,
                    "load_5m": 1.2,
                    "load_15m": 1.0,
                    "net_recv_bytes": 1_024_000,
                    "net_send_bytes": 2_048_000,
                    "net_recvi_bytes": 512_000,
                    "net_sendi_bytes": 256_000,
                },
                "argv": "--config server.conf",
                "cwd": "/usr/local/srs",
                "cpu_percent": 25.5,
                "system_cpu_percent": 45.5,
                "disk_read_KBps": 1024,
                "disk_write_KBps": 512,
                "disk_busy_percent": 35.5,
                "cpus": 8,
                "cpus_online": 8,
                "srs_recv_bytes": 4_096_000,
                "srs_send_bytes": 8_192_000,
                "conn_sys": 1000,
                "conn_sys_et": 800,
                "conn_sys_tw": 100,
                "conn_sys_udp": 50,
                "conn_srs": 500,
            },
        }))
    }

    #[test]
    fn reads_self_info() {
        let s = summary();

        assert!(Summary::is_ok(&s));
        assert_eq!(s.now_ms(), 1_615_478_400_000);
        assert_eq!(s.version(), "4.0.0");
        assert_eq!(s.pid(), "12345");
        assert_eq!(s.ppid(), 1);
        assert_eq!(s.argv(), "--config server.conf");
        assert_eq!(s.cwd(), "/usr/local/srs");
        assert_eq!(s.memory_kbyte(), 102_400);
        assert_eq!(s.memory_percent(), 5.5);
        assert_eq!(s.cpu_percent(), 25.5);
        assert_eq!(s.srs_uptime(), 86400);
        assert_eq!(s.uptime_duration(), "1 days, 00:00:00");
    }

    #[test]
    fn reads_system_info() {
        let s = summary();

        assert_eq!(s.system_cpu_percent(), 45.5);
        assert_eq!(s.disk_read_kbps(), 1024);
        assert_eq!(s.disk_write_kbps(), 512);
        assert_eq!(s.disk_busy_percent(), 35.5);
        assert_eq!(s.mem_ram_kbyte(), 8_388_608);
        assert_eq!(s.mem_ram_percent(), 75.5);
        assert_eq!(s.mem_swap_kbyte(), 4_194_304);
        assert_eq!(s.mem_swap_percent(), 25.5);
        assert_eq!(s.cpu_count(), 8);
        assert_eq!(s.cpus_online(), 8);
        assert_eq!(s.uptime(), 604_800.0);
        assert_eq!(s.idle_time(), 302_400.0);
        assert_eq!(s.load_1m(), 1.5);
        assert_eq!(s.load_5m(), 1.2);
        assert_eq!(s.load_15m(), 1.0);
    }

    #[test]
    fn reads_network_and_connections() {
        let s = summary();

        assert_eq!(s.network_recv_bytes(), 1_024_000);
        assert_eq!(s.network_send_bytes(), 2_048_000);
        assert_eq!(s.network_received_bytes(), 512_000);
        assert_eq!(s.network_sent_bytes(), 256_000);
        assert_eq!(s.srs_recv_bytes(), 4_096_000);
        assert_eq!(s.srs_send_bytes(), 8_192_000);
        assert_eq!(s.connections_sys(), 1000);
        assert_eq!(s.connections_sys_et(), 800);
        assert_eq!(s.connections_sys_tw(), 100);
        assert_eq!(s.connections_sys_udp(), 50);
        assert_eq!(s.connections_srs(), 500);
    }

    #[test]
    fn formats_values() {
        let s = summary();

        assert_eq!(s.memory_usage_formatted(), "100.00 MB (5.50%)");
        assert_eq!(
            s.system_memory_formatted(),
            "RAM: 8.00 GB (75.50%), Swap: 4.00 GB (25.50%)",
        );
        assert_eq!(s.load_average_formatted(), "1.50, 1.20, 1.00");
        assert_eq!(s.network_stats_formatted(), "Recv: 0.98 MB, Send: 1.95 MB");
    }

    #[test]
    fn formats_uptime_with_remainder() {
        let s = Summary::from(json!({"data": {"self": {"srs_uptime": 90061}}}));

        assert_eq!(s.uptime_duration(), "1 days, 01:01:01");
    }

    #[test]
    fn defaults_on_empty() {
        let s = Summary::from(json!({}));

        assert_eq!(s.code(), 0);
        assert_eq!(s.server(), "");
        assert_eq!(s.service(), "");
        assert_eq!(s.pid(), "");
        assert!(Summary::is_ok(&s));
        assert!(Envelope::is_ok(&s));
        assert_eq!(s.version(), "");
        assert_eq!(s.ppid(), 0);
        assert_eq!(s.memory_kbyte(), 0);
        assert_eq!(s.memory_percent(), 0.0);
        assert_eq!(s.uptime(), 0.0);
        assert_eq!(s.load_15m(), 0.0);
        assert_eq!(s.network_sent_bytes(), 0);
        assert_eq!(s.uptime_duration(), "0 days, 00:00:00");
        assert_eq!(s.memory_usage_formatted(), "0.00 MB (0.00%)");
        assert_eq!(s.load_average_formatted(), "0.00, 0.00, 0.00");
    }
}
