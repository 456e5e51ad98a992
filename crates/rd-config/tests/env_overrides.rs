use figment::Jail;
use rd_config::DashConfig;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("RDASH_SERVER__PAGE_SIZE", "5");
        jail.set_env("RDASH_STORAGE__MEDIA_DIR", "/srv/media");

        let config = DashConfig::load().expect("config loads");
        assert_eq!(config.server.page_size, 5);
        assert_eq!(config.storage.media_dir, "/srv/media");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".rdash")?;
        jail.create_file(
            ".rdash/config.toml",
            r#"
            [survey]
            cache_ttl_secs = 60
            "#,
        )?;
        jail.set_env("RDASH_SURVEY__CACHE_TTL_SECS", "120");

        let config = DashConfig::load().expect("config loads");
        assert_eq!(config.survey.cache_ttl_secs, 120);
        Ok(())
    });
}

#[test]
fn log_level_var_does_not_break_extraction() {
    Jail::expect_with(|jail| {
        jail.set_env("RDASH_LOG", "debug");
        let config = DashConfig::load().expect("config loads");
        assert_eq!(config.server.page_size, 10);
        Ok(())
    });
}
