use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use super::context::RenderContext;
use super::template::{Template, unresolved_placeholders};
use crate::error::{DashboardError, Result};
use crate::folder::{FolderAnalysis, TrackedExtension, analyze_folder};
use crate::format::{format_percent, format_uptime};
use crate::severity::Severity;
use crate::system::Sampler;
use crate::system::process::{ProcessRecord, ProcessSample};
use crate::system::snapshot::{CpuSample, MemorySample, SystemSample};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone)]
pub struct DashboardPaths {
    pub template: PathBuf,
    pub output: PathBuf,
    pub analysis_folder: PathBuf,
}

#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output: PathBuf,
    pub generated_at: String,
}

pub struct DashboardGenerator<S> {
    sampler: S,
    paths: DashboardPaths,
}

impl<S: Sampler> DashboardGenerator<S> {
    pub fn new(sampler: S, paths: DashboardPaths) -> Self {
        DashboardGenerator { sampler, paths }
    }

    pub fn paths(&self) -> &DashboardPaths {
        &self.paths
    }

    /// Samples every metric and assembles this cycle's render context.
    pub fn build_context(&mut self) -> Result<RenderContext> {
        let cpu = self.sampler.sample_cpu();
        let memory = self.sampler.sample_memory();
        let system = self.sampler.sample_system()?;
        let processes = self.sampler.sample_processes();
        let folder = analyze_folder(&self.paths.analysis_folder);

        let mut ctx = RenderContext::new();
        insert_system(&mut ctx, &system);
        insert_cpu(&mut ctx, &cpu);
        insert_memory(&mut ctx, &memory);
        insert_processes(&mut ctx, &processes);
        insert_folder(&mut ctx, &self.paths.analysis_folder, &folder);
        insert_generation_time(&mut ctx, Local::now());
        Ok(ctx)
    }

    /// Runs one cycle. A missing template aborts before anything is written.
    pub fn generate(&mut self) -> Result<GenerationReport> {
        let ctx = self.build_context()?;
        let template = Template::load(&self.paths.template)?;
        let rendered = template.render(&ctx);

        let leftover = unresolved_placeholders(&rendered);
        if !leftover.is_empty() {
            debug!(placeholders = ?leftover, "template contains unknown placeholders");
        }

        write_atomically(&self.paths.output, &rendered)?;

        Ok(GenerationReport {
            output: self.paths.output.clone(),
            generated_at: ctx.get("generation_timestamp").unwrap_or_default().to_string(),
        })
    }
}

fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let to_err = |source| DashboardError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };
    std::fs::write(&tmp, contents).map_err(to_err)?;
    if let Err(source) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(to_err(source));
    }
    Ok(())
}

fn insert_system(ctx: &mut RenderContext, system: &SystemSample) {
    ctx.insert("system_hostname", &system.hostname);
    ctx.insert("system_os_name", &system.os_description);
    ctx.insert("system_uptime", format_uptime(system.uptime_seconds));
    ctx.insert("system_users_count", system.logged_in_user_count);
    ctx.insert("network_ip_address", &system.ip_address);
    ctx.insert("system_boot_time", system.boot_time.format(DATETIME_FORMAT));
}

fn insert_cpu(ctx: &mut RenderContext, cpu: &CpuSample) {
    let severity = Severity::classify(cpu.usage_percent);
    ctx.insert("cpu_core_count", cpu.core_count);
    ctx.insert(
        "cpu_frequency_mhz",
        cpu.frequency_mhz
            .map(|mhz| format!("{mhz:.0}"))
            .unwrap_or_else(|| "N/A".to_string()),
    );
    ctx.insert("cpu_usage_percent", format_percent(cpu.usage_percent));
    ctx.insert("cpu_usage_color", severity.color());
    ctx.insert("cpu_usage_severity", severity.label());
}

fn insert_memory(ctx: &mut RenderContext, memory: &MemorySample) {
    let severity = Severity::classify(memory.usage_percent);
    ctx.insert("memory_total_gb", format!("{:.2}", memory.total_gb));
    ctx.insert("memory_used_gb", format!("{:.2}", memory.used_gb));
    ctx.insert("memory_usage_percent", format_percent(memory.usage_percent));
    ctx.insert("memory_usage_color", severity.color());
    ctx.insert("memory_usage_severity", severity.label());
}

fn insert_processes(ctx: &mut RenderContext, sample: &ProcessSample) {
    ctx.insert("process_list_html", process_rows_html(&sample.top));
    ctx.insert("process_total_count", sample.processes.len());
}

/// One `<tr>` per process: name, cpu%, mem%.
pub fn process_rows_html(processes: &[ProcessRecord]) -> String {
    let mut html = String::new();
    for proc in processes {
        let name = if proc.name.is_empty() {
            "N/A"
        } else {
            proc.name.as_str()
        };
        let _ = writeln!(
            html,
            "<tr><td>{name}</td><td>{:.1}%</td><td>{:.1}%</td></tr>",
            proc.cpu_percent, proc.memory_percent
        );
    }
    html
}

fn insert_folder(ctx: &mut RenderContext, folder_path: &Path, analysis: &FolderAnalysis) {
    let absolute = std::path::absolute(folder_path).unwrap_or_else(|_| folder_path.to_path_buf());
    ctx.insert("file_analysis_directory", absolute.display());
    ctx.insert("files_total_count", analysis.total_files_scanned);
    for ext in TrackedExtension::ALL {
        let name = ext.as_str();
        ctx.insert(format!("files_{name}_count"), analysis.count(ext));
        ctx.insert(format!("files_{name}_percent"), format_percent(analysis.percent(ext)));
    }
}

fn insert_generation_time(ctx: &mut RenderContext, now: DateTime<Local>) {
    ctx.insert("generation_timestamp", now.format(TIME_FORMAT));
    ctx.insert("generation_datetime", now.format(DATETIME_FORMAT));
}
