use velgraph::{ConfigError, DashboardConfig, DashboardSession, TableSource};

#[test]
fn missing_file_reports_its_path() {
    let path = std::env::temp_dir().join("velgraph-does-not-exist.yaml");
    match DashboardConfig::load(&path) {
        Err(ConfigError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn file_config_drives_session_layout() {
    let yaml = r#"
title: Bench
time_plots:
  - title: left
    target_key: bench/left_cmd
    actual_key: bench/left_meas
trace_plot: null
trace_reset_key: null
"#;
    let path = std::env::temp_dir().join(format!("velgraph-config-{}.yaml", std::process::id()));
    std::fs::write(&path, yaml).unwrap();
    let cfg = DashboardConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.title, "Bench");
    let session = DashboardSession::new(cfg, TableSource::new()).unwrap();
    assert_eq!(session.plots().len(), 1);
    assert_eq!(session.channels().len(), 2);
    assert_eq!(session.keys(), ["bench/left_cmd", "bench/left_meas"]);
    assert_eq!(session.pairs().len(), 1);
}
