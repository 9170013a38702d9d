#[cfg(test)]
mod tests {
    use crate::config::{Config, ConfigLoader};
    use serial_test::serial;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    struct EnvGuard(Vec<&'static str>);

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in &self.0 {
                std::env::remove_var(key);
            }
        }
    }

    fn set_env(vars: &[(&'static str, &str)]) -> EnvGuard {
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        EnvGuard(vars.iter().map(|(key, _)| *key).collect())
    }

    #[test]
    #[serial]
    fn test_default_config() {
        let config = ConfigLoader::load_default_config().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert_eq!(config.listen_addr().unwrap().to_string(), "0.0.0.0:3000");
        assert_eq!(config.match_options().url_host(), "localhost");
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        let _guard = set_env(&[
            ("HOMEGANTRY_POLL_INTERVAL", "30"),
            ("HOMEGANTRY_SHOW_STOPPED", "true"),
            ("HOMEGANTRY_HOST", "nas.lan"),
            ("HOMEGANTRY_DATA_DIR", "/srv/homegantry"),
        ]);
        let config = ConfigLoader::load_default_config().unwrap();
        assert_eq!(config.poll_interval, 30);
        assert!(config.show_stopped);
        assert!(config.scan_options().include_stopped);
        assert_eq!(config.match_options().url_host(), "nas.lan");
        assert_eq!(config.data_dir, PathBuf::from("/srv/homegantry"));
    }

    #[test]
    #[serial]
    fn test_file_then_environment() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "port = 8080\ntitle = \"Lab\"\ncompose_only = true\nknown_services_file = \"/etc/homegantry/known.yml\""
        )
        .unwrap();
        let _guard = set_env(&[("HOMEGANTRY_PORT", "9090")]);

        let config = ConfigLoader::load(Some(file.path())).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.title, "Lab");
        assert!(config.compose_only);
        assert_eq!(
            config.known_services_file.as_deref(),
            Some(Path::new("/etc/homegantry/known.yml"))
        );
        assert_eq!(config.default_settings().dashboard_title, "Lab");
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_error() {
        assert!(ConfigLoader::load(Some(Path::new("/nonexistent/homegantry.toml"))).is_err());
    }

    #[test]
    #[serial]
    fn test_invalid_values_rejected() {
        {
            let _guard = set_env(&[("HOMEGANTRY_POLL_INTERVAL", "0")]);
            assert!(ConfigLoader::load_default_config().is_err());
        }
        {
            let _guard = set_env(&[
                ("HOMEGANTRY_RECONNECT_INITIAL_MS", "5000"),
                ("HOMEGANTRY_RECONNECT_MAX_MS", "1000"),
            ]);
            assert!(ConfigLoader::load_default_config().is_err());
        }
        {
            let _guard = set_env(&[("HOMEGANTRY_BIND_ADDRESS", "not-an-ip")]);
            assert!(ConfigLoader::load_default_config().is_err());
        }
    }

    #[test]
    fn test_backoff_options() {
        let config = Config {
            reconnect_initial_ms: 500,
            reconnect_max_ms: 8000,
            ..Default::default()
        };
        let backoff = config.backoff_options();
        assert_eq!(backoff.initial, Duration::from_millis(500));
        assert_eq!(backoff.max, Duration::from_millis(8000));
    }
}
