use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq)]
pub struct CpuSample {
    pub core_count: usize,
    /// `None` when the OS does not report a clock speed.
    pub frequency_mhz: Option<f64>,
    pub usage_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemorySample {
    pub used_gb: f64,
    pub total_gb: f64,
    /// OS accounting (total minus available), not `used_gb / total_gb`.
    pub usage_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemSample {
    pub hostname: String,
    pub os_description: String,
    pub boot_time: DateTime<Local>,
    pub uptime_seconds: u64,
    pub logged_in_user_count: usize,
    pub ip_address: String,
}
