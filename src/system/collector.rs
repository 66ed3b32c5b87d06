use std::net::{IpAddr, ToSocketAddrs};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};
use sysinfo::{
    MINIMUM_CPU_UPDATE_INTERVAL, Process, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate,
    System,
};
use tracing::debug;

use super::platform;
use super::process::{ProcessGone, ProcessRecord, ProcessSample};
use super::snapshot::{CpuSample, MemorySample, SystemSample};
use crate::error::{DashboardError, Result};
use crate::format::bytes_to_gb;

/// Source of the per-cycle metric samples.
pub trait Sampler {
    fn sample_cpu(&mut self) -> CpuSample;
    fn sample_memory(&mut self) -> MemorySample;
    /// Fails when the hostname cannot be resolved to an address.
    fn sample_system(&mut self) -> Result<SystemSample>;
    fn sample_processes(&mut self) -> ProcessSample;
}

pub struct Collector {
    sys: System,
    cpu_window: Duration,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(MINIMUM_CPU_UPDATE_INTERVAL)
    }
}

impl Collector {
    /// `cpu_window` is how long `sample_cpu` blocks between its two reads.
    /// It is raised to sysinfo's minimum when shorter.
    pub fn new(cpu_window: Duration) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        Collector {
            sys,
            cpu_window: cpu_window.max(MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    fn read_process(
        &self,
        process: &Process,
        total_memory: u64,
    ) -> Result<ProcessRecord, ProcessGone> {
        let pid = process.pid().as_u32();
        if process.status() == ProcessStatus::Dead {
            return Err(ProcessGone(pid));
        }
        let memory_percent = if total_memory == 0 {
            0.0
        } else {
            (process.memory() as f64 / total_memory as f64 * 100.0) as f32
        };
        Ok(ProcessRecord {
            pid,
            name: process.name().to_string_lossy().into_owned(),
            cpu_percent: process.cpu_usage(),
            memory_percent,
        })
    }
}

impl Sampler for Collector {
    fn sample_cpu(&mut self) -> CpuSample {
        self.sys.refresh_cpu_all();
        std::thread::sleep(self.cpu_window);
        self.sys.refresh_cpu_usage();

        let frequency_mhz = self
            .sys
            .cpus()
            .first()
            .map(|cpu| cpu.frequency())
            .filter(|&mhz| mhz > 0)
            .map(|mhz| mhz as f64);

        CpuSample {
            core_count: self.sys.cpus().len(),
            frequency_mhz,
            usage_percent: f64::from(self.sys.global_cpu_usage()).clamp(0.0, 100.0),
        }
    }

    fn sample_memory(&mut self) -> MemorySample {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        let used = self.sys.used_memory().min(total);
        let available = self.sys.available_memory().min(total);

        let usage_percent = if total == 0 {
            0.0
        } else {
            ((total - available) as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
        };

        MemorySample {
            used_gb: bytes_to_gb(used),
            total_gb: bytes_to_gb(total),
            usage_percent,
        }
    }

    fn sample_system(&mut self) -> Result<SystemSample> {
        let hostname = require_hostname(System::host_name())?;
        let ip_address = resolve_host(&hostname)?;
        Ok(system_sample(hostname, ip_address))
    }

    fn sample_processes(&mut self) -> ProcessSample {
        self.sys.refresh_memory();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        let total_memory = self.sys.total_memory();

        let mut entries: Vec<&Process> = self.sys.processes().values().collect();
        entries.sort_unstable_by_key(|p| p.pid().as_u32());

        let sample = ProcessSample::from_reads(
            entries
                .into_iter()
                .map(|process| self.read_process(process, total_memory)),
        );
        debug!(count = sample.processes.len(), "processes sampled");
        sample
    }
}

/// A machine without a hostname cannot resolve its own address either.
fn require_hostname(name: Option<String>) -> Result<String> {
    name.filter(|n| !n.is_empty())
        .ok_or_else(|| DashboardError::HostResolution {
            host: String::new(),
            reason: "hostname unavailable".to_string(),
        })
}

fn system_sample(hostname: String, ip_address: IpAddr) -> SystemSample {
    let boot_secs = System::boot_time();
    let boot_time = DateTime::<Local>::from(UNIX_EPOCH + Duration::from_secs(boot_secs));
    let now_secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(boot_secs);

    SystemSample {
        os_description: os_description(),
        hostname,
        boot_time,
        uptime_seconds: now_secs.saturating_sub(boot_secs),
        logged_in_user_count: platform::logged_in_user_count(),
        ip_address: ip_address.to_string(),
    }
}

fn os_description() -> String {
    let os = System::long_os_version().unwrap_or_else(|| "unknown OS".to_string());
    match System::kernel_version() {
        Some(kernel) => format!("{os} (kernel {kernel}) {}", std::env::consts::ARCH),
        None => format!("{os} {}", std::env::consts::ARCH),
    }
}

/// Resolves `host` through the system resolver, preferring IPv4.
pub fn resolve_host(host: &str) -> Result<IpAddr> {
    let addrs: Vec<IpAddr> = (host, 0)
        .to_socket_addrs()
        .map_err(|e| DashboardError::HostResolution {
            host: host.to_string(),
            reason: e.to_string(),
        })?
        .map(|addr| addr.ip())
        .collect();

    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| DashboardError::HostResolution {
            host: host.to_string(),
            reason: "resolver returned no addresses".to_string(),
        })
}
