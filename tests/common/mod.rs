#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Local, TimeZone};
use snapdash::error::{DashboardError, Result};
use snapdash::system::Sampler;
use snapdash::system::process::{ProcessRecord, ProcessSample};
use snapdash::system::snapshot::{CpuSample, MemorySample, SystemSample};

/// Deterministic sampler; counts how many system samples were taken.
#[derive(Clone, Default)]
pub struct FakeSampler {
    pub cycles: Arc<AtomicUsize>,
    pub unresolvable: bool,
}

impl FakeSampler {
    pub fn cycles(&self) -> usize {
        self.cycles.load(Ordering::SeqCst)
    }
}

pub fn mock_process(pid: u32, name: &str, cpu_percent: f32, memory_percent: f32) -> ProcessRecord {
    ProcessRecord {
        pid,
        name: name.to_string(),
        cpu_percent,
        memory_percent,
    }
}

impl Sampler for FakeSampler {
    fn sample_cpu(&mut self) -> CpuSample {
        CpuSample {
            core_count: 8,
            frequency_mhz: Some(2_400.4),
            usage_percent: 63.24,
        }
    }

    fn sample_memory(&mut self) -> MemorySample {
        MemorySample {
            used_gb: 12.5,
            total_gb: 16.0,
            usage_percent: 85.0,
        }
    }

    fn sample_system(&mut self) -> Result<SystemSample> {
        self.cycles.fetch_add(1, Ordering::SeqCst);
        if self.unresolvable {
            return Err(DashboardError::HostResolution {
                host: "testbox".into(),
                reason: "no address".into(),
            });
        }
        Ok(SystemSample {
            hostname: "testbox".into(),
            os_description: "TestOS 1.0".into(),
            boot_time: Local.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
            uptime_seconds: 90_061,
            logged_in_user_count: 2,
            ip_address: "192.0.2.10".into(),
        })
    }

    fn sample_processes(&mut self) -> ProcessSample {
        ProcessSample::from_reads(vec![
            Ok(mock_process(1, "init", 10.0, 0.5)),
            Ok(mock_process(2, "builder", 90.0, 12.0)),
            Ok(mock_process(3, "editor", 50.0, 4.3)),
            Ok(mock_process(4, "indexer", 90.0, 2.0)),
            Ok(mock_process(5, "shell", 5.0, 0.1)),
        ])
    }
}
