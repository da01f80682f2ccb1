use limit_governor::{
    CanonicalSize, Governor, GovernorConfig, InMemoryStore, LimitStore, MB, RawLimitValue,
    parse_size, resolve,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn governor(memory: &str, time: u64) -> Governor<InMemoryStore> {
    init_tracing();
    let mut governor = Governor::new(InMemoryStore::new(memory, time));
    governor
        .set_memory_limit_max(Some("512M".into()))
        .expect("Ceiling should parse");
    governor
}

#[test]
fn memory_scenarios_in_sequence() {
    let mut governor = governor("330M", 6000);

    let steps: [(RawLimitValue, &str); 5] = [
        ("340M".into(), "340M"),
        ("320M".into(), "340M"),
        ((1024 * 1024 * 350).into(), "350M"),
        ("109600K".into(), "350M"),
        ("1G".into(), "512M"),
    ];

    for (request, expected) in steps {
        governor
            .increase_memory_limit_to(Some(request.clone()))
            .expect("Request should parse");
        assert_eq!(
            governor.store().get_memory_limit(),
            RawLimitValue::from(expected),
            "after requesting {}",
            request
        );
    }
}

#[test]
fn time_limit_refused_by_host() {
    init_tracing();
    let mut governor = Governor::new(InMemoryStore::new("128M", 6000).with_time_locked());

    assert!(!governor.increase_time_limit_to(Some(7000)));
    assert!(!governor.increase_time_limit_to(None));
    assert_eq!(governor.time_limit(), CanonicalSize::Finite(6000));
}

#[test]
fn ceilings_are_reported_as_set() {
    let mut governor = Governor::new(InMemoryStore::default());
    assert_eq!(governor.get_memory_limit_max(), None);
    assert_eq!(governor.get_time_limit_max(), None);

    governor.set_memory_limit_max(Some(536_870_912.into())).unwrap();
    assert_eq!(governor.get_memory_limit_max(), Some(&RawLimitValue::Int(536_870_912)));

    governor.set_time_limit_max(Some(3600));
    assert_eq!(governor.get_time_limit_max(), Some(3600));

    // Teardown-style reset
    governor.set_memory_limit_max(None).unwrap();
    governor.set_time_limit_max(None);
    assert_eq!(governor.get_memory_limit_max(), None);
    assert_eq!(governor.get_time_limit_max(), None);
}

#[test]
fn malformed_requests_propagate() {
    let mut governor = governor("330M", 6000);
    let err = governor
        .increase_memory_limit_to(Some("1.5G".into()))
        .unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("1.5G"));
    assert_eq!(governor.memory_limit().unwrap(), CanonicalSize::Finite(330 * MB));
}

#[test]
fn unlimited_current_survives_lowered_ceiling() {
    init_tracing();
    let mut governor = Governor::new(InMemoryStore::new(-1i64, 0));
    governor.set_memory_limit_max(Some("512M".into())).unwrap();
    governor.set_time_limit_max(Some(60));

    let applied = governor.increase_memory_limit_to(Some("128M".into())).unwrap();
    assert!(applied.is_unlimited());
    assert_eq!(governor.store().get_memory_limit(), RawLimitValue::Int(-1));

    assert!(governor.increase_time_limit_to(Some(30)));
    assert_eq!(governor.store().get_time_limit(), 0);
}

#[test]
fn built_from_json_config() {
    init_tracing();
    let config = GovernorConfig::from_json(r#"{"memory_limit_max": "1G", "time_limit_max": 600}"#)
        .expect("Config should decode");
    let mut governor = Governor::from_config(InMemoryStore::new("256M", 30), config)
        .expect("Ceilings should parse");

    governor.increase_memory_limit_to(None).unwrap();
    assert_eq!(governor.store().get_memory_limit(), RawLimitValue::from("1G"));

    assert!(governor.increase_time_limit_to(Some(3600)));
    assert_eq!(governor.into_store().get_time_limit(), 600);
}

#[test]
fn invalid_config_ceiling_is_rejected() {
    let config = GovernorConfig {
        memory_limit_max: Some("12Q".into()),
        time_limit_max: None,
    };
    let err = Governor::from_config(InMemoryStore::default(), config).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn resolved_values_never_decrease() {
    let requests = [
        Some(10 * MB),
        Some(5 * MB),
        None,
        Some(700 * MB),
        Some(MB),
        Some(0),
    ];
    let max = CanonicalSize::Finite(512 * MB);
    let mut current = CanonicalSize::Finite(MB);

    for request in requests {
        let next = resolve(current, request.map(CanonicalSize::Finite), max);
        assert!(next >= current);
        assert!(next <= max);
        current = next;
    }
    assert_eq!(current, max);
}

#[test]
fn canonical_text_round_trips() {
    for input in ["512M", "512m", "1G", "1024M", "109600K", "4097", "0", "-1", "unlimited"] {
        let parsed = parse_size(input).unwrap();
        assert_eq!(parse_size(&parsed.to_string()).unwrap(), parsed, "input {}", input);
    }
}
