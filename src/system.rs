//! Reading the system clock, which this library is unable to do without
//! help from the OS.

#[cfg(any(target_os = "macos", target_os = "ios"))]
extern {
    fn gettimeofday(tp: *mut libc::timeval, tzp: *mut libc::timezone) -> libc::c_int;
}

#[cfg(all(unix, not(target_os = "macos"), not(target_os = "ios")))]
use libc::clock_gettime;


/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the millisecond of the second.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub(crate) unsafe fn sys_time() -> (i64, i16) {
    use std::ptr::null_mut;

    let mut tv = libc::timeval { tv_sec: 0, tv_usec: 0 };
    let _ = gettimeofday(&mut tv, null_mut());
    (i64::from(tv.tv_sec), (tv.tv_usec / 1000) as i16)
}

#[cfg(windows)] use winapi::shared::minwindef::FILETIME;
#[cfg(windows)] const HECTONANOSECS_IN_SEC: i64 = 10_000_000;
#[cfg(windows)] const HECTONANOSEC_TO_UNIX_EPOCH: i64 = 11_644_473_600 * HECTONANOSECS_IN_SEC;

/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the millisecond of the second.
#[cfg(windows)]
pub(crate) unsafe fn sys_time() -> (i64, i16) {
    use winapi::um::sysinfoapi::GetSystemTimeAsFileTime;

    let mut ft = std::mem::zeroed();
    GetSystemTimeAsFileTime(&mut ft);

    let hectonanos = file_time_as_u64(&ft) as i64 - HECTONANOSEC_TO_UNIX_EPOCH;
    (hectonanos / HECTONANOSECS_IN_SEC, (hectonanos % HECTONANOSECS_IN_SEC / 10_000) as i16)
}

#[cfg(windows)]
fn file_time_as_u64(ft: &FILETIME) -> u64 {
    ((ft.dwHighDateTime as u64) << 32) | (ft.dwLowDateTime as u64)
}

/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the millisecond of the second.
#[cfg(not(any(target_os = "macos", target_os = "ios", windows)))]
pub(crate) unsafe fn sys_time() -> (i64, i16) {
    let mut tv = libc::timespec { tv_sec: 0, tv_nsec: 0 };
    let _ = clock_gettime(libc::CLOCK_REALTIME, &mut tv);
    (i64::from(tv.tv_sec), (tv.tv_nsec / 1_000_000) as i16)
}


/// Returns the number of milliseconds elapsed since **midnight, 1st
/// January, 1970**, UTC.
pub fn now_millis() -> i64 {
    let (seconds, millis) = unsafe { sys_time() };
    seconds * 1000 + i64::from(millis)
}
