use figment::Jail;
use ink_config::{CacheBackend, InkConfig};
use std::path::Path;

/// Bridge `ConfigError` into the error type `Jail` closures return.
fn load(explicit: Option<&Path>) -> Result<InkConfig, figment::Error> {
    InkConfig::load(explicit).map_err(|e| e.to_string().into())
}

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("INK_SERVER__PORT", "3001");
        jail.set_env("INK_DATABASE__PATH", ":memory:");
        jail.set_env("INK_CACHE__BACKEND", "database");

        let config = load(None)?;
        assert_eq!(config.server.port, 3001);
        assert!(config.database.is_in_memory());
        assert_eq!(config.cache.backend, CacheBackend::Database);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".ink")?;
        jail.create_file(".ink/config.toml", "[logging]\nfilter = \"warn\"\njson = true\n")?;
        jail.set_env("INK_LOGGING__FILTER", "debug");

        let config = load(None)?;
        assert_eq!(config.logging.filter, "debug");
        assert!(config.logging.json);
        Ok(())
    });
}
