const TOP_COUNT: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
}

/// The process was gone by the time its attributes were read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessGone(pub u32);

#[derive(Clone, Debug, Default)]
pub struct ProcessSample {
    pub processes: Vec<ProcessRecord>,
    pub top: Vec<ProcessRecord>,
}

impl ProcessSample {
    /// Builds a sample from per-process reads, dropping the ones that failed.
    pub fn from_reads<I>(reads: I) -> Self
    where
        I: IntoIterator<Item = Result<ProcessRecord, ProcessGone>>,
    {
        let processes: Vec<ProcessRecord> = reads.into_iter().filter_map(Result::ok).collect();
        let top = top_by_cpu(&processes, TOP_COUNT);
        ProcessSample { processes, top }
    }
}

/// Highest `cpu_percent` first. The sort is stable, so equal values keep
/// their input order. NaN ranks above every number.
pub fn top_by_cpu(processes: &[ProcessRecord], n: usize) -> Vec<ProcessRecord> {
    let mut sorted: Vec<&ProcessRecord> = processes.iter().collect();
    sorted.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    sorted.into_iter().take(n).cloned().collect()
}
