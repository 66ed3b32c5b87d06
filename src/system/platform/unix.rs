use tokio::signal::unix::{SignalKind, signal};
use tracing::warn;

use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn logged_in_user_count() -> Option<usize> {
        // Walk the utmpx database and count USER_PROCESS records, one per
        // login session (tty, ssh, X display).
        let mut count = 0;
        unsafe {
            libc::setutxent();
            loop {
                let entry = libc::getutxent();
                if entry.is_null() {
                    break;
                }
                if (*entry).ut_type == libc::USER_PROCESS {
                    count += 1;
                }
            }
            libc::endutxent();
        }
        Some(count)
    }
}

pub async fn terminate_signal() {
    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            warn!(error = %e, "failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}
