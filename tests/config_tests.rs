mod support;

use std::fs;

use hashtrend::error::{ConfigError, Error};
use hashtrend::infrastructure::config::settings::Config;
use hashtrend::infrastructure::config::store::StoreBackend;
use support::config::write_temp_config;

#[test]
fn config_loads_documented_example() {
    let toml = r#"
database = "trending.db"

[logging]
level = "info"
format = "json"

[store]
backend = "sqlite"
pool_size = 5

[trending]
retention_secs = 259200
sweep_interval_secs = 3600
cache_ttl_secs = 3600
top_n = 10

[server]
bind = "0.0.0.0:8080"
api_tokens = ["dev-token"]
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    let config = result.expect("load config");
    assert_eq!(config.database, "trending.db");
    assert_eq!(config.store.backend, StoreBackend::Sqlite);
    assert_eq!(config.trending.retention(), chrono::Duration::days(3));
    assert_eq!(config.trending.cache_ttl(), chrono::Duration::hours(1));
    assert!(config.server.token_set().contains("dev-token"));
    assert!(config.validate_for_serve().is_ok());
}

#[test]
fn config_rejects_zero_sweep_interval() {
    let path = write_temp_config("[trending]\nsweep_interval_secs = 0\n");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
            assert_eq!(field, "sweep_interval_secs");
        }
        other => panic!("expected invalid sweep interval, got {other:?}"),
    }
}

#[test]
fn config_reports_malformed_toml() {
    let path = write_temp_config("[trending\ntop_n = 3\n");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn config_reports_missing_file() {
    let mut path = std::env::temp_dir();
    path.push("hashtrend-config-test-does-not-exist.toml");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}
