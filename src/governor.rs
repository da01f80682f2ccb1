use crate::{
    CanonicalSize, GovernorConfig, LimitStore, MemoryLimitManager, RawLimitValue, Result,
    TimeLimitManager,
};

/// Memory and time limit managers bound to one store
///
/// Callers are expected to be sequential; the governor does no locking.
#[derive(Debug)]
pub struct Governor<S: LimitStore> {
    store: S,
    memory: MemoryLimitManager,
    time: TimeLimitManager,
}

impl<S: LimitStore> Governor<S> {
    /// Create a governor with no ceilings
    pub fn new(store: S) -> Self {
        Self {
            store,
            memory: MemoryLimitManager::default(),
            time: TimeLimitManager::default(),
        }
    }

    /// Create a governor with ceilings from configuration
    pub fn from_config(store: S, config: GovernorConfig) -> Result<Self> {
        let (memory_max, time_max) = config.into_ceilings()?;
        Ok(Self {
            store,
            memory: MemoryLimitManager::new(memory_max),
            time: TimeLimitManager::new(time_max),
        })
    }

    pub fn set_memory_limit_max(&mut self, value: Option<RawLimitValue>) -> Result<()> {
        self.memory.set_memory_limit_max(value)
    }

    pub fn get_memory_limit_max(&self) -> Option<&RawLimitValue> {
        self.memory.get_memory_limit_max()
    }

    /// See [`MemoryLimitManager::increase_memory_limit_to`]
    pub fn increase_memory_limit_to(
        &mut self,
        request: Option<RawLimitValue>,
    ) -> Result<CanonicalSize> {
        self.memory.increase_memory_limit_to(&mut self.store, request)
    }

    pub fn memory_limit(&self) -> Result<CanonicalSize> {
        self.memory.memory_limit(&self.store)
    }

    pub fn set_time_limit_max(&mut self, seconds: Option<u64>) {
        self.time.set_time_limit_max(seconds)
    }

    pub fn get_time_limit_max(&self) -> Option<u64> {
        self.time.get_time_limit_max()
    }

    /// See [`TimeLimitManager::increase_time_limit_to`]
    pub fn increase_time_limit_to(&mut self, request: Option<u64>) -> bool {
        self.time.increase_time_limit_to(&mut self.store, request)
    }

    pub fn time_limit(&self) -> CanonicalSize {
        self.time.time_limit(&self.store)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
