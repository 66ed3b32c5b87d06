pub trait PlatformExtensions {
    /// Number of active login sessions, or `None` if the OS gives no answer.
    fn logged_in_user_count() -> Option<usize>;
}

#[cfg(unix)]
mod unix;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(unix)]
use unix as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

#[cfg(any(unix, target_os = "windows"))]
pub fn logged_in_user_count() -> usize {
    platform_impl::Platform::logged_in_user_count().unwrap_or(0)
}

#[cfg(not(any(unix, target_os = "windows")))]
pub fn logged_in_user_count() -> usize {
    0
}

/// Resolves when the OS asks the process to terminate (SIGTERM on unix).
/// Never resolves where there is no such signal.
#[cfg(unix)]
pub async fn terminate_signal() {
    unix::terminate_signal().await
}

#[cfg(not(unix))]
pub async fn terminate_signal() {
    std::future::pending::<()>().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_count_does_not_panic() {
        let _ = logged_in_user_count();
    }
}
