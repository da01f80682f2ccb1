use crate::comparator::{clamp_to_max, resolve};
use crate::{CanonicalSize, LimitStore, MemoryLimitMax, RawLimitValue, Result};
use tracing::{debug, info};

/// Raises the memory limit, never above its ceiling and never downwards
#[derive(Debug, Clone, Default)]
pub struct MemoryLimitManager {
    max: MemoryLimitMax,
}

impl MemoryLimitManager {
    pub fn new(max: MemoryLimitMax) -> Self {
        Self { max }
    }

    /// Set the memory ceiling (`None` removes it)
    pub fn set_memory_limit_max(&mut self, value: Option<RawLimitValue>) -> Result<()> {
        self.max.set(value)?;
        info!(
            max = %self.max.ceiling(),
            "Memory limit ceiling configured"
        );
        Ok(())
    }

    /// The ceiling as it was set
    ///
    /// `None` is the host default: no ceiling was ever configured (or it was
    /// reset), so increases are bounded only by the host itself.
    pub fn get_memory_limit_max(&self) -> Option<&RawLimitValue> {
        self.max.get()
    }

    /// Current live memory limit
    pub fn memory_limit<S: LimitStore + ?Sized>(&self, store: &S) -> Result<CanonicalSize> {
        store.get_memory_limit().to_canonical()
    }

    /// Raise the live memory limit towards `request`
    ///
    /// `None` asks for unlimited, which a finite ceiling turns into the
    /// ceiling itself. Returns the value written to the store.
    pub fn increase_memory_limit_to<S: LimitStore + ?Sized>(
        &self,
        store: &mut S,
        request: Option<RawLimitValue>,
    ) -> Result<CanonicalSize> {
        let requested = request.as_ref().map(RawLimitValue::to_canonical).transpose()?;
        let current = self.memory_limit(&*store)?;
        let max = self.max.ceiling();

        let resolved = resolve(current, requested, max);

        let target = requested.unwrap_or(CanonicalSize::Unlimited);
        if clamp_to_max(target, max) != target {
            info!(
                requested = %target,
                max = %max,
                "Memory limit request clamped to ceiling"
            );
        }
        debug!(
            current = %current,
            resolved = %resolved,
            "Resolved memory limit"
        );

        store.set_memory_limit(RawLimitValue::from_canonical(resolved));
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStore;
    use crate::size::MB;

    fn manager(max: &str) -> MemoryLimitManager {
        MemoryLimitManager::new(MemoryLimitMax::new(Some(max.into())).unwrap())
    }

    #[test]
    fn writes_native_encoding() {
        let mut store = InMemoryStore::new("330M", 30);
        let applied = manager("512M")
            .increase_memory_limit_to(&mut store, Some((1024 * 1024 * 350).into()))
            .unwrap();
        assert_eq!(applied, CanonicalSize::Finite(350 * MB));
        assert_eq!(store.get_memory_limit(), RawLimitValue::from("350M"));
    }

    #[test]
    fn omitted_request_without_ceiling_is_unlimited() {
        let mut store = InMemoryStore::new("330M", 30);
        let manager = MemoryLimitManager::default();
        manager.increase_memory_limit_to(&mut store, None).unwrap();
        assert_eq!(store.get_memory_limit(), RawLimitValue::Int(-1));
    }

    #[test]
    fn malformed_request_leaves_store_untouched() {
        let mut store = InMemoryStore::new("330M", 30);
        let err = manager("512M")
            .increase_memory_limit_to(&mut store, Some("lots".into()))
            .unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(store.get_memory_limit(), RawLimitValue::from("330M"));
    }

    #[test]
    fn unset_ceiling_reads_as_host_default() {
        let mut manager = MemoryLimitManager::default();
        assert_eq!(manager.get_memory_limit_max(), None);

        manager.set_memory_limit_max(Some("1G".into())).unwrap();
        manager.set_memory_limit_max(None).unwrap();
        assert_eq!(manager.get_memory_limit_max(), None);

        let mut store = InMemoryStore::new("330M", 30);
        manager
            .increase_memory_limit_to(&mut store, Some("2G".into()))
            .unwrap();
        assert_eq!(store.get_memory_limit(), RawLimitValue::from("2G"));
    }

    #[test]
    fn malformed_ceiling_is_rejected() {
        let mut manager = manager("512M");
        assert!(manager.set_memory_limit_max(Some("512X".into())).is_err());
        assert_eq!(manager.get_memory_limit_max(), Some(&RawLimitValue::from("512M")));
    }
}
