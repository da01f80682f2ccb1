//! Resource limit governor
//!
//! Manages a process-wide memory limit and execution time limit that may only
//! be raised, never above an administrator-configured ceiling. The live values
//! are held by a [`LimitStore`]; this crate only decides what to write there.

mod comparator;
mod config;
mod error;
mod governor;
mod memory;
mod raw;
mod size;
mod store;
mod time;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use comparator::{clamp_to_max, resolve};
pub use config::{GovernorConfig, MemoryLimitMax, TimeLimitMax};
pub use error::{GovernorError, Result};
pub use governor::Governor;
pub use memory::MemoryLimitManager;
pub use raw::{
    MEMORY_UNLIMITED, RawLimitValue, TIME_UNLIMITED, time_from_canonical, time_to_canonical,
};
pub use size::{CanonicalSize, GB, KB, MB, parse_size};
#[cfg(all(unix, feature = "rlimit"))]
pub use store::ProcessStore;
pub use store::{InMemoryStore, LimitStore};
pub use time::TimeLimitManager;
