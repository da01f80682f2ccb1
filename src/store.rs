//! Live limit storage
//!
//! The governor never enforces limits itself. It reads and writes them
//! through a `LimitStore`, which is whatever the host uses to hold the
//! process-wide values:
//!
//! - `InMemoryStore`: plain values, for embedding and tests
//! - `ProcessStore`: soft rlimits of the current process (unix, `rlimit` feature)

use crate::RawLimitValue;

/// Host-side holder of the live memory and time limits
///
/// Memory values use the memory encoding (`-1` for unlimited), time values
/// are seconds with `0` for unlimited.
pub trait LimitStore {
    /// Current memory limit
    fn get_memory_limit(&self) -> RawLimitValue;

    /// Apply a new memory limit. The host is expected to accept it.
    fn set_memory_limit(&mut self, value: RawLimitValue);

    /// Current time limit in seconds
    fn get_time_limit(&self) -> u64;

    /// Apply a new time limit
    ///
    /// Returns `false` when the host does not allow the time limit to be
    /// changed at all.
    fn set_time_limit(&mut self, seconds: u64) -> bool;
}

impl<S: LimitStore + ?Sized> LimitStore for &mut S {
    fn get_memory_limit(&self) -> RawLimitValue {
        (**self).get_memory_limit()
    }

    fn set_memory_limit(&mut self, value: RawLimitValue) {
        (**self).set_memory_limit(value)
    }

    fn get_time_limit(&self) -> u64 {
        (**self).get_time_limit()
    }

    fn set_time_limit(&mut self, seconds: u64) -> bool {
        (**self).set_time_limit(seconds)
    }
}

/// Limits held in plain fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryStore {
    memory_limit: RawLimitValue,
    time_limit: u64,
    time_locked: bool,
}

impl InMemoryStore {
    /// Create a store with the given initial limits
    pub fn new(memory_limit: impl Into<RawLimitValue>, time_limit: u64) -> Self {
        Self {
            memory_limit: memory_limit.into(),
            time_limit,
            time_locked: false,
        }
    }

    /// Refuse every later time-limit change, like a host that disables them
    pub fn with_time_locked(mut self) -> Self {
        self.time_locked = true;
        self
    }

    pub fn is_time_locked(&self) -> bool {
        self.time_locked
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(128i64 * 1024 * 1024, 30)
    }
}

impl LimitStore for InMemoryStore {
    fn get_memory_limit(&self) -> RawLimitValue {
        self.memory_limit.clone()
    }

    fn set_memory_limit(&mut self, value: RawLimitValue) {
        self.memory_limit = value;
    }

    fn get_time_limit(&self) -> u64 {
        self.time_limit
    }

    fn set_time_limit(&mut self, seconds: u64) -> bool {
        if self.time_locked {
            return false;
        }
        self.time_limit = seconds;
        true
    }
}

/// Soft rlimits of the running process
///
/// Memory maps to `RLIMIT_DATA` and time to `RLIMIT_CPU`. Only
/// `RLIM_INFINITY` is read back as unlimited. A finite soft CPU limit of `0`
/// seconds is reported as `1`, since `0` is the unlimited time encoding.
/// A failed read reports the most restrictive value (`0` bytes, `1` second)
/// so the governor never widens a limit it could not see.
///
/// Only the soft limit is changed, so the hard limit set by the administrator
/// still bounds what the host accepts.
#[cfg(all(unix, feature = "rlimit"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessStore;

#[cfg(all(unix, feature = "rlimit"))]
mod process {
    use super::{LimitStore, ProcessStore};
    use crate::raw::{MEMORY_UNLIMITED, TIME_UNLIMITED};
    use crate::{CanonicalSize, RawLimitValue};
    use tracing::warn;

    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    type Resource = libc::__rlimit_resource_t;
    #[cfg(not(all(target_os = "linux", target_env = "gnu")))]
    type Resource = libc::c_int;

    /// Smallest finite time limit the store reports
    const MIN_TIME_LIMIT: u64 = 1;

    fn get_limits(resource: Resource) -> std::io::Result<libc::rlimit> {
        let mut rlim = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        // SAFETY: rlim is a valid out pointer and resource is a libc constant.
        if unsafe { libc::getrlimit(resource, &mut rlim) } != 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(rlim)
    }

    fn set_soft(resource: Resource, soft: libc::rlim_t) -> std::io::Result<()> {
        let mut rlim = get_limits(resource)?;
        rlim.rlim_cur = soft;
        // SAFETY: rlim is fully initialized; the hard limit is left unchanged.
        if unsafe { libc::setrlimit(resource, &rlim) } != 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(())
    }

    fn memory_from_soft(soft: std::io::Result<libc::rlim_t>) -> RawLimitValue {
        match soft {
            Ok(libc::RLIM_INFINITY) => RawLimitValue::Int(MEMORY_UNLIMITED),
            Ok(bytes) => RawLimitValue::from_canonical(CanonicalSize::Finite(bytes as u64)),
            Err(err) => {
                warn!("Failed to read memory limit, assuming 0: {}", err);
                RawLimitValue::Int(0)
            }
        }
    }

    fn time_from_soft(soft: std::io::Result<libc::rlim_t>) -> u64 {
        match soft {
            Ok(libc::RLIM_INFINITY) => TIME_UNLIMITED,
            Ok(seconds) => (seconds as u64).max(MIN_TIME_LIMIT),
            Err(err) => {
                warn!("Failed to read time limit, assuming {}s: {}", MIN_TIME_LIMIT, err);
                MIN_TIME_LIMIT
            }
        }
    }

    impl LimitStore for ProcessStore {
        fn get_memory_limit(&self) -> RawLimitValue {
            memory_from_soft(get_limits(libc::RLIMIT_DATA).map(|rlim| rlim.rlim_cur))
        }

        fn set_memory_limit(&mut self, value: RawLimitValue) {
            let soft = match value.to_canonical() {
                Ok(CanonicalSize::Unlimited) => libc::RLIM_INFINITY,
                Ok(CanonicalSize::Finite(bytes)) => bytes as libc::rlim_t,
                Err(err) => {
                    warn!("Ignoring memory limit write: {}", err);
                    return;
                }
            };
            if let Err(err) = set_soft(libc::RLIMIT_DATA, soft) {
                warn!("Failed to set memory limit to {}: {}", value, err);
            }
        }

        fn get_time_limit(&self) -> u64 {
            time_from_soft(get_limits(libc::RLIMIT_CPU).map(|rlim| rlim.rlim_cur))
        }

        fn set_time_limit(&mut self, seconds: u64) -> bool {
            let soft = match seconds {
                TIME_UNLIMITED => libc::RLIM_INFINITY,
                n => n as libc::rlim_t,
            };
            match set_soft(libc::RLIMIT_CPU, soft) {
                Ok(()) => true,
                Err(err) => {
                    warn!("Host refused time limit {}s: {}", seconds, err);
                    false
                }
            }
        }
    }

}
