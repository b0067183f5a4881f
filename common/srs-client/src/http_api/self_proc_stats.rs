use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{Envelope, Lookup as _};

/// Snapshot of [SRS] process itself, as reported by `/api/v1/summaries/self`.
///
/// Process counters are read from `data.process`, and per-thread stats from
/// `data.threads`.
///
/// [SRS]: https://ossrs.io
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ProcessStats(Value);

impl ProcessStats {
    fn int(&self, key: &str) -> i64 {
        self.0.i64_at(&["data", "process", key])
    }

    fn float(&self, key: &str) -> f64 {
        self.0.f64_at(&["data", "process", key])
    }

    /// Raw `data.process` object, if reported.
    #[must_use]
    pub fn process_info(&self) -> Option<&Value> {
        self.0.at(&["data", "process"])
    }

    /// Threads of the process.
    #[must_use]
    pub fn threads(&self) -> Vec<ThreadStats> {
        self.0
            .array_at(&["data", "threads"])
            .iter()
            .cloned()
            .map(ThreadStats)
            .collect()
    }

    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.0.array_at(&["data", "threads"]).len()
    }

    /// Looks up the thread with the given `id`.
    #[must_use]
    pub fn thread(&self, id: i64) -> Option<ThreadStats> {
        self.0
            .array_at(&["data", "threads"])
            .iter()
            .find(|t| t.i64_at(&["id"]) == id)
            .cloned()
            .map(ThreadStats)
    }

    /// CPU usage of the thread with the given `id`, or `0.0` if there is no
    /// such thread.
    #[must_use]
    pub fn thread_cpu_percent(&self, id: i64) -> f64 {
        self.thread(id).map_or(0.0, |t| t.cpu_percent())
    }

    /// State of the thread with the given `id`, or an empty string if there
    /// is no such thread.
    #[must_use]
    pub fn thread_state(&self, id: i64) -> String {
        self.thread(id)
            .map(|t| t.state().to_owned())
            .unwrap_or_default()
    }

    /// Uptime of the process, in milliseconds.
    #[must_use]
    pub fn uptime(&self) -> i64 {
        self.int("uptime")
    }

    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn uptime_seconds(&self) -> f64 {
        self.uptime() as f64 / 1000.0
    }

    #[must_use]
    pub fn cpu_percent(&self) -> f64 {
        self.float("cpu_percent")
    }

    /// Alias of [`ProcessStats::cpu_percent`].
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.cpu_percent()
    }

    #[must_use]
    pub fn memory_kb(&self) -> i64 {
        self.int("mem_kb")
    }

    #[must_use]
    pub fn memory_percent(&self) -> f64 {
        self.float("mem_percent")
    }

    /// Executable name of the process.
    #[must_use]
    pub fn command(&self) -> &str {
        self.0.str_at(&["data", "process", "comm"])
    }

    /// State of the process, like `R` or `S`.
    #[must_use]
    pub fn state(&self) -> &str {
        self.0.str_at(&["data", "process", "state"])
    }

    /// [`Envelope::pid`] parsed as a number, or `0` if it's not one.
    #[must_use]
    pub fn process_id(&self) -> i64 {
        self.pid().trim().parse().unwrap_or_default()
    }

    #[must_use]
    pub fn parent_pid(&self) -> i64 {
        self.int("ppid")
    }

    #[must_use]
    pub fn process_group(&self) -> i64 {
        self.int("pgrp")
    }

    #[must_use]
    pub fn session(&self) -> i64 {
        self.int("session")
    }

    #[must_use]
    pub fn tty_nr(&self) -> i64 {
        self.int("tty_nr")
    }

    #[must_use]
    pub fn tpgid(&self) -> i64 {
        self.int("tpgid")
    }

    #[must_use]
    pub fn user_time(&self) -> f64 {
        self.float("ru_utime")
    }

    #[must_use]
    pub fn system_time(&self) -> f64 {
        self.float("ru_stime")
    }

    #[must_use]
    pub fn children_user_time(&self) -> f64 {
        self.float("ru_cutime")
    }

    #[must_use]
    pub fn children_system_time(&self) -> f64 {
        self.float("ru_cstime")
    }

    #[must_use]
    pub fn total_cpu_time(&self) -> f64 {
        self.user_time() + self.system_time()
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
    pub fn children_minor_faults(&self) -> i64 {
        self.int("ru_cminflt")
    }

    #[must_use]
    pub fn children_major_faults(&self) -> i64 {
        self.int("ru_cmajflt")
    }

    #[must_use]
    pub fn block_input_operations(&self) -> i64 {
        self.int("ru_inblock")
    }

    #[must_use]
    pub fn block_output_operations(&self) -> i64 {
        self.int("ru_oublock")
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

    #[must_use]
    pub fn max_rss(&self) -> i64 {
        self.int("ru_maxrss")
    }

    #[must_use]
    pub fn guest_time(&self) -> f64 {
        self.float("guest_time")
    }

    #[must_use]
    pub fn cguest_time(&self) -> f64 {
        self.float("cguest_time")
    }

    /// Virtual memory size, in bytes.
    #[must_use]
    pub fn virtual_memory_size(&self) -> i64 {
        self.int("vsize")
    }

    /// Resident set size, in pages.
    #[must_use]
    pub fn rss(&self) -> i64 {
        self.int("rss")
    }

    #[must_use]
    pub fn rss_limit(&self) -> i64 {
        self.int("rsslim")
    }

    #[must_use]
    pub fn priority(&self) -> i64 {
        self.int("priority")
    }

    #[must_use]
    pub fn nice(&self) -> i64 {
        self.int("nice")
    }

    /// Number of threads, as reported by the kernel.
    #[must_use]
    pub fn num_threads(&self) -> i64 {
        self.int("num_threads")
    }

    #[must_use]
    pub fn rt_priority(&self) -> i64 {
        self.int("rt_priority")
    }

    #[must_use]
    pub fn policy(&self) -> i64 {
        self.int("policy")
    }

    #[must_use]
    pub fn start_code(&self) -> i64 {
        self.int("startcode")
    }

    #[must_use]
    pub fn end_code(&self) -> i64 {
        self.int("endcode")
    }

    #[must_use]
    pub fn start_stack(&self) -> i64 {
        self.int("startstack")
    }

    #[must_use]
    pub fn signal(&self) -> i64 {
        self.int("signal")
    }

    #[must_use]
    pub fn blocked(&self) -> i64 {
        self.int("blocked")
    }

    #[must_use]
    pub fn sigignore(&self) -> i64 {
        self.int("sigignore")
    }

    #[must_use]
    pub fn sigcatch(&self) -> i64 {
        self.int("sigcatch")
    }

    #[must_use]
    pub fn exit_signal(&self) -> i64 {
        self.int("exit_signal")
    }
}

impl Envelope for ProcessStats {
    fn raw(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for ProcessStats {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Single thread of [SRS] process, as listed in [`ProcessStats::threads`].
///
/// [SRS]: https://ossrs.io
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ThreadStats(Value);

impl ThreadStats {
    #[must_use]
    pub fn id(&self) -> i64 {
        self.0.i64_at(&["id"])
    }

    #[must_use]
    pub fn cpu_percent(&self) -> f64 {
        self.0.f64_at(&["cpu_percent"])
    }

    #[must_use]
    pub fn state(&self) -> &str {
        self.0.str_at(&["state"])
    }
}

impl From<Value> for ThreadStats {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::*;

    fn stats() -> ProcessStats {
        let mut process = json!({
            "uptime": 3_600_000,
            "cpu_percent": 25.5,
            "mem_kb": 102_400,
            "mem_percent": 5.5,
            "comm": "srs",
            "state": "R",
            "ppid": 1,
            "pgrp": 12345,
            "session": 12345,
            "tty_nr": 0,
            "tpgid": -1,
        });
        let rusage = json!({
            "ru_utime": 120.5,
            "ru_stime": 30.25,
            "ru_cutime": 0.0,
            "ru_cstime": 0.0,
            "ru_minflt": 1000,
            "ru_majflt": 10,
            "ru_cminflt": 0,
            "ru_cmajflt": 0,
            "ru_inblock": 500,
            "ru_oublock": 300,
            "ru_nvcsw": 1500,
            "ru_nivcsw": 500,
            "ru_maxrss": 204_800,
        });
        let stat = json!({
            "guest_time": 0.0,
            "cguest_time": 0.0,
            "vsize": 1_073_741_824_i64,
            "rss": 25600,
            "rsslim": -1,
            "priority": 20,
            "nice": 0,
            "num_threads": 8,
            "rt_priority": 0,
            "policy": 0,
            "startcode": 4_194_304,
            "endcode": 8_388_608,
            "startstack": 140_737_488_355_328_i64,
            "signal": 0,
            "blocked": 0,
            "sigignore": 4096,
            "sigcatch": 16384,
            "exit_signal": 17,
        });
        for part in [rusage, stat] {
            if let (Value::Object(all), Value::Object(part)) =
                (&mut process, part)
            {
                all.extend(part);
            }
        }

        ProcessStats::from(json!({
            "code": 0,
            "server": "test-server",
            "service": "test-service",
            "pid": "12345",
            "data": {
                "process": process,
                "threads": [
                    {"id": 1, "cpu_percent": 15.5, "state": "R"},
                    {"id": 2, "cpu_percent": 10.0, "state": "S"},
                ],
            },
        }))
    }

    #[test]
    fn reads_process_info() {
        let s = stats();

        assert!(s.is_ok());
        assert_eq!(s.server(), "test-server");
        assert_eq!(s.process_id(), 12345);
        assert_eq!(s.uptime(), 3_600_000);
        assert_eq!(s.uptime_seconds(), 3600.0);
        assert_eq!(s.cpu_percent(), 25.5);
        assert_eq!(s.percent(), s.cpu_percent());
        assert_eq!(s.memory_kb(), 102_400);
        assert_eq!(s.memory_percent(), 5.5);
        assert_eq!(s.command(), "srs");
        assert_eq!(s.state(), "R");
        assert_eq!(s.parent_pid(), 1);
        assert_eq!(s.process_group(), 12345);
        assert_eq!(s.session(), 12345);
        assert_eq!(s.tpgid(), -1);
        assert_eq!(s.rss_limit(), -1);
        assert_eq!(s.num_threads(), 8);
        assert_eq!(s.exit_signal(), 17);
        assert_eq!(s.virtual_memory_size(), 1_073_741_824);
        assert_eq!(s.start_stack(), 140_737_488_355_328);
    }

    #[test]
    fn aggregates_usage() {
        let s = stats();

        assert_eq!(s.user_time(), 120.5);
        assert_eq!(s.system_time(), 30.25);
        assert_eq!(s.total_cpu_time(), 150.75);
        assert_eq!(s.voluntary_context_switches(), 1500);
        assert_eq!(s.involuntary_context_switches(), 500);
        assert_eq!(s.total_context_switches(), 2000);
        assert_eq!(s.block_input_operations(), 500);
        assert_eq!(s.block_output_operations(), 300);
        assert_eq!(s.max_rss(), 204_800);
    }

    #[test]
    fn reads_threads() {
        let s = stats();

        assert_eq!(s.thread_count(), 2);
        assert_eq!(s.threads()[1].id(), 2);
        assert_eq!(s.thread(1).map(|t| t.state().to_owned()), Some("R".into()));
        assert_eq!(s.thread_cpu_percent(1), 15.5);
        assert_eq!(s.thread_cpu_percent(2), 10.0);
        assert_eq!(s.thread_state(2), "S");

        assert!(s.thread(3).is_none());
        assert_eq!(s.thread_cpu_percent(3), 0.0);
        assert_eq!(s.thread_state(3), "");
    }

    #[test]
    fn defaults_on_empty() {
        let s = ProcessStats::from(json!({}));

        assert_eq!(s.code(), 0);
        assert_eq!(s.pid(), "");
        assert_eq!(s.process_id(), 0);
        assert!(s.process_info().is_none());
        assert!(s.threads().is_empty());
        assert_eq!(s.thread_count(), 0);
        assert_eq!(s.uptime(), 0);
        assert_eq!(s.uptime_seconds(), 0.0);
        assert_eq!(s.cpu_percent(), 0.0);
        assert_eq!(s.command(), "");
        assert_eq!(s.state(), "");
        assert_eq!(s.total_cpu_time(), 0.0);
        assert_eq!(s.total_context_switches(), 0);
        assert_eq!(s.sigcatch(), 0);
    }

    #[test]
    fn unparsable_pid_is_zero() {
        let s = ProcessStats::from(json!({"pid": "srs-1"}));

        assert_eq!(s.process_id(), 0);
    }

    #[test]
    fn parses_numeric_pid() {
        let s = ProcessStats::from(json!({"pid": 4321}));

        assert_eq!(s.pid(), "4321");
        assert_eq!(s.process_id(), 4321);
    }
}
