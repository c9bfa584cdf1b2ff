use super::*;

#[test]
fn test_empty_config_uses_defaults() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.sel_depth, 4);
    assert_eq!(config.evaluators, vec![EvaluatorKind::Material]);
    assert_eq!(config.limits(), SearchLimits::infinite());
    assert_eq!(config.report_interval(), Duration::from_secs(1));
}

#[test]
fn test_full_config() {
    let config = EngineConfig::from_toml_str(
        r#"
        sel_depth = 6
        max_nodes = 50000
        move_time_ms = 1500
        report_interval_ms = 250
        evaluators = ["material", "space"]
        "#,
    )
    .unwrap();

    assert_eq!(config.sel_depth, 6);
    assert_eq!(
        config.limits(),
        SearchLimits {
            max_nodes: Some(50_000),
            move_time: Some(Duration::from_millis(1500)),
        }
    );
    assert_eq!(config.report_interval(), Duration::from_millis(250));
    assert_eq!(
        config.evaluators,
        vec![EvaluatorKind::Material, EvaluatorKind::Space]
    );
}

#[test]
fn test_unknown_evaluator_rejected() {
    let err = EngineConfig::from_toml_str(r#"evaluators = ["mobility"]"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_unknown_key_rejected() {
    let err = EngineConfig::from_toml_str("seldepth = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_zero_values_rejected() {
    let err = EngineConfig::from_toml_str("sel_depth = 0").unwrap_err();
    assert_eq!(err.to_string(), "sel_depth must be at least 1");

    let err = EngineConfig::from_toml_str("report_interval_ms = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Zero("report_interval_ms")));
}

#[test]
fn test_missing_file() {
    let err = EngineConfig::load("/nonexistent/dfs_engine.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/dfs_engine.toml"));
}

#[test]
fn test_evaluator_kinds_build() {
    let start = chess_core::Position::startpos();
    for kind in [EvaluatorKind::Material, EvaluatorKind::Space] {
        assert_eq!(kind.build().evaluate(&start), 0.0);
    }
}
