mod common;

use std::fs;
use std::sync::{Arc, Mutex};
use std::task::Poll;
use std::time::Duration;

use common::FakeSampler;
use snapdash::dashboard::{DashboardGenerator, DashboardPaths};
use snapdash::error::DashboardError;
use snapdash::scheduler::Scheduler;

const INTERVAL: Duration = Duration::from_secs(30);

fn scheduler_in(dir: &std::path::Path, sampler: FakeSampler) -> Scheduler<FakeSampler> {
    let paths = DashboardPaths {
        template: dir.join("template.html"),
        output: dir.join("index.html"),
        analysis_folder: dir.join("Documents"),
    };
    Scheduler::new(DashboardGenerator::new(sampler, paths), INTERVAL)
}

#[tokio::test(start_paused = true)]
async fn runs_every_interval_until_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("template.html"), "{{ system_hostname }}").unwrap();
    let sampler = FakeSampler::default();
    let scheduler = scheduler_in(dir.path(), sampler.clone());

    // Cycles at 0s, 30s and 60s; shutdown lands during the third wait.
    scheduler
        .run(tokio::time::sleep(Duration::from_secs(75)))
        .await
        .unwrap();

    assert_eq!(sampler.cycles(), 3);
    assert_eq!(
        fs::read_to_string(dir.path().join("index.html")).unwrap(),
        "testbox"
    );
}

#[tokio::test(start_paused = true)]
async fn missing_template_does_not_stop_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let sampler = FakeSampler::default();
    let scheduler = scheduler_in(dir.path(), sampler.clone());

    scheduler
        .run(tokio::time::sleep(Duration::from_secs(45)))
        .await
        .unwrap();

    assert_eq!(sampler.cycles(), 2);
    assert!(!dir.path().join("index.html").exists());
}

#[tokio::test(start_paused = true)]
async fn fatal_error_ends_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("template.html"), "x").unwrap();
    let sampler = FakeSampler {
        unresolvable: true,
        ..FakeSampler::default()
    };
    let scheduler = scheduler_in(dir.path(), sampler.clone());

    let err = scheduler
        .run(std::future::pending::<()>())
        .await
        .unwrap_err();

    assert!(matches!(err, DashboardError::HostResolution { .. }));
    assert_eq!(sampler.cycles(), 1);
}

#[tokio::test(start_paused = true)]
async fn shutdown_is_polled_before_the_first_cycle() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("template.html"), "x").unwrap();
    let sampler = FakeSampler::default();
    let scheduler = scheduler_in(dir.path(), sampler.clone());

    let seen_at_first_poll = Arc::new(Mutex::new(None));
    let seen = Arc::clone(&seen_at_first_poll);
    let counter = sampler.clone();
    let shutdown = std::future::poll_fn(move |_| {
        let cycles = counter.cycles();
        seen.lock().unwrap().get_or_insert(cycles);
        if cycles >= 2 {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    });

    scheduler.run(shutdown).await.unwrap();

    assert_eq!(*seen_at_first_poll.lock().unwrap(), Some(0));
    assert_eq!(sampler.cycles(), 2);
}

#[tokio::test(start_paused = true)]
async fn shutdown_before_start_runs_no_cycle() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("template.html"), "x").unwrap();
    let sampler = FakeSampler::default();
    let scheduler = scheduler_in(dir.path(), sampler.clone());

    scheduler.run(std::future::ready(())).await.unwrap();

    assert_eq!(sampler.cycles(), 0);
    assert!(!dir.path().join("index.html").exists());
}

#[test]
fn single_cycle_reports_recoverable_failure_as_ok() {
    let dir = tempfile::tempdir().unwrap();
    let mut scheduler = scheduler_in(dir.path(), FakeSampler::default());
    assert!(scheduler.run_cycle().is_ok());
    assert!(!dir.path().join("index.html").exists());
}

#[derive(Clone, Default)]
struct SharedBuf(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn missing_template_logs_exactly_one_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut scheduler = scheduler_in(dir.path(), FakeSampler::default());

    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        scheduler.run_cycle().unwrap();
    });

    let logs = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    let errors: Vec<&str> = logs.lines().filter(|l| l.contains("ERROR")).collect();
    assert_eq!(errors.len(), 1, "logs:\n{logs}");
    assert!(errors[0].contains("not found"));
}
