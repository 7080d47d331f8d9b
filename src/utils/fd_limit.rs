//! File descriptor limit detection for capping concurrent connections (Unix).

use log::debug;

/// Descriptors one worker may hold at once: its socket plus resolver and TLS handles.
pub const FDS_PER_WORKER: usize = 4;

/// Share of the soft limit workers may use; the rest stays with stdio and the allocator.
const FD_LIMIT_FRACTION: f64 = 0.8;

/// Soft limit for open file descriptors, or `None` when unlimited or unavailable (e.g. Windows).
#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    use std::mem::MaybeUninit;
    let mut rlim = MaybeUninit::<libc::rlimit>::uninit();
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, rlim.as_mut_ptr()) } != 0 {
        return None;
    }
    let rlim = unsafe { rlim.assume_init() };
    let cur = rlim.rlim_cur;
    if cur == libc::RLIM_INFINITY || cur > i64::MAX as u64 {
        return None;
    }
    Some(cur)
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// Max workers that keep open connections under ~80% of the FD limit.
/// Returns `None` if no limit is available.
pub fn max_workers_by_fd_limit() -> Option<usize> {
    let limit = max_open_fds()?;
    let usable = (limit as f64 * FD_LIMIT_FRACTION) as usize;
    Some((usable / FDS_PER_WORKER).max(1))
}

/// Cap `requested` workers by the FD limit. Never returns 0.
pub fn cap_workers_by_fd_limit(requested: usize) -> usize {
    let requested = requested.max(1);
    match max_workers_by_fd_limit() {
        Some(cap) if cap < requested => {
            debug!("Capping workers from {requested} to {cap} (open file limit)");
            cap
        }
        _ => requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_workers_never_zero() {
        assert!(cap_workers_by_fd_limit(0) >= 1);
        assert!(cap_workers_by_fd_limit(1) == 1);
    }

    #[test]
    fn cap_does_not_raise_request() {
        assert!(cap_workers_by_fd_limit(3) <= 3);
    }
}
