use super::PlatformExtensions;

use windows_sys::Win32::System::RemoteDesktop::{
    WTS_CURRENT_SERVER_HANDLE, WTS_SESSION_INFOW, WTSActive, WTSEnumerateSessionsW, WTSFreeMemory,
};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn logged_in_user_count() -> Option<usize> {
        unsafe {
            let mut sessions: *mut WTS_SESSION_INFOW = std::ptr::null_mut();
            let mut count: u32 = 0;
            let ok = WTSEnumerateSessionsW(WTS_CURRENT_SERVER_HANDLE, 0, 1, &mut sessions, &mut count);
            if ok == 0 || sessions.is_null() {
                return None;
            }
            let active = std::slice::from_raw_parts(sessions, count as usize)
                .iter()
                .filter(|s| s.State == WTSActive)
                .count();
            WTSFreeMemory(sessions.cast());
            Some(active)
        }
    }
}
