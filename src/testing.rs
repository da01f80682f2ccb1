//! Generic test suite for `LimitStore` implementations
//!
//! Runs the standard governor scenarios against any store whose limits can
//! be freely raised.
//!
//! # Usage
//!
//! ```ignore
//! use limit_governor::generate_store_tests;
//!
//! // Constructor taking (initial memory limit, initial time limit in seconds)
//! generate_store_tests!(MyStore::new);
//! ```

/// Generate standard governor tests for a store
///
/// `$ctor` is called as `$ctor(RawLimitValue, u64)` and must return a store
/// holding exactly those initial limits.
#[macro_export]
macro_rules! generate_store_tests {
    ($ctor:expr) => {
        use $crate::LimitStore as _;

        fn store_suite_governor(
            memory: &str,
            time: u64,
        ) -> $crate::Governor<impl $crate::LimitStore> {
            $crate::Governor::new(($ctor)($crate::RawLimitValue::from(memory), time))
        }

        fn store_suite_memory<S: $crate::LimitStore>(governor: &$crate::Governor<S>) -> String {
            governor.store().get_memory_limit().to_string()
        }

        #[test]
        fn store_scenario_memory_goes_up_not_down() {
            let mut governor = store_suite_governor("330M", 6000);
            governor
                .set_memory_limit_max(Some("512M".into()))
                .expect("Ceiling should parse");

            // It can go up
            governor
                .increase_memory_limit_to(Some("340M".into()))
                .expect("Request should parse");
            assert_eq!(store_suite_memory(&governor), "340M");

            // But not down
            governor
                .increase_memory_limit_to(Some("320M".into()))
                .expect("Request should parse");
            assert_eq!(store_suite_memory(&governor), "340M");
        }

        #[test]
        fn store_scenario_memory_syntaxes() {
            let mut governor = store_suite_governor("340M", 6000);
            governor
                .set_memory_limit_max(Some("512M".into()))
                .expect("Ceiling should parse");

            governor
                .increase_memory_limit_to(Some((1024 * 1024 * 350).into()))
                .expect("Request should parse");
            assert_eq!(store_suite_memory(&governor), "350M");

            governor
                .increase_memory_limit_to(Some("109600K".into()))
                .expect("Request should parse");
            assert_eq!(store_suite_memory(&governor), "350M");
        }

        #[test]
        fn store_scenario_memory_clamped_to_max() {
            let mut governor = store_suite_governor("350M", 6000);
            governor
                .set_memory_limit_max(Some("512M".into()))
                .expect("Ceiling should parse");

            let applied = governor
                .increase_memory_limit_to(Some("1G".into()))
                .expect("Request should parse");
            assert_eq!(applied.to_string(), "512M");
            assert_eq!(store_suite_memory(&governor), "512M");

            // Omitted request also stops at the ceiling
            governor
                .increase_memory_limit_to(None)
                .expect("Omitted request should resolve");
            assert_eq!(store_suite_memory(&governor), "512M");
        }

        #[test]
        fn store_scenario_memory_unlimited_without_max() {
            let mut governor = store_suite_governor("350M", 6000);
            governor
                .set_memory_limit_max(Some((-1).into()))
                .expect("Ceiling should parse");

            let applied = governor
                .increase_memory_limit_to(None)
                .expect("Omitted request should resolve");
            assert!(applied.is_unlimited());
            assert_eq!(governor.store().get_memory_limit(), $crate::RawLimitValue::Int(-1));

            // Nothing finite goes above unlimited
            governor
                .increase_memory_limit_to(Some("1G".into()))
                .expect("Request should parse");
            assert_eq!(governor.store().get_memory_limit(), $crate::RawLimitValue::Int(-1));
        }

        #[test]
        fn store_scenario_time_goes_up_then_unlimited() {
            let mut governor = store_suite_governor("128M", 6000);

            // It can go up
            assert!(governor.increase_time_limit_to(Some(7000)));
            assert_eq!(governor.store().get_time_limit(), 7000);

            // But not down
            assert!(governor.increase_time_limit_to(Some(5000)));
            assert_eq!(governor.store().get_time_limit(), 7000);

            // Nothing means no limit
            assert!(governor.increase_time_limit_to(None));
            assert_eq!(governor.store().get_time_limit(), 0);

            // Can't go down from there
            assert!(governor.increase_time_limit_to(Some(10000)));
            assert_eq!(governor.store().get_time_limit(), 0);
        }
    };
}
