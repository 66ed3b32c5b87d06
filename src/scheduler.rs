use std::future::Future;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::dashboard::DashboardGenerator;
use crate::error::Result;
use crate::system::{Sampler, platform};

pub struct Scheduler<S> {
    generator: DashboardGenerator<S>,
    interval: Duration,
}

impl<S: Sampler> Scheduler<S> {
    pub fn new(generator: DashboardGenerator<S>, interval: Duration) -> Self {
        Scheduler {
            generator,
            interval,
        }
    }

    /// Generates, waits `interval`, and repeats until `shutdown` resolves.
    /// A missing template skips the cycle; any other error ends the loop.
    pub async fn run<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(
            interval_secs = self.interval.as_secs(),
            output = %self.generator.paths().output.display(),
            "starting monitoring service"
        );

        // Poll once up front so signal handlers are registered before the
        // first (blocking) cycle; a signal during a cycle then waits for it.
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("shutdown requested before first cycle");
                return Ok(());
            }
            _ = std::future::ready(()) => {}
        }

        loop {
            self.run_cycle()?;

            info!(
                secs = self.interval.as_secs(),
                "waiting before next generation"
            );
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("shutdown requested, stopping");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    /// One generation; recoverable failures are logged and swallowed.
    pub fn run_cycle(&mut self) -> Result<()> {
        match self.generator.generate() {
            Ok(report) => {
                info!(
                    path = %report.output.display(),
                    at = %report.generated_at,
                    "dashboard generated"
                );
                Ok(())
            }
            Err(err) if err.is_recoverable() => {
                error!(error = %err, "dashboard generation skipped");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    let terminate = platform::terminate_signal();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
}
