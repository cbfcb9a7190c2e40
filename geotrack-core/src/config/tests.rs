#[cfg(test)]
mod tests {
    use crate::client::{Dialect, Locator, GOOGLE, MOZILLA, YANDEX};
    use crate::config::loader::load_config_from_path;
    use crate::config::model::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;

    fn create_test_provider(service_url: &str) -> Provider {
        Provider {
            name: "Test Provider".to_string(),
            service_url: service_url.to_string(),
            api_key: "test-api-key".to_string(),
            dialect: None,
            enabled: true,
        }
    }

    fn create_test_config() -> Config {
        let mut providers = HashMap::new();
        providers.insert("mozilla".to_string(), create_test_provider(MOZILLA));
        providers.insert("yandex".to_string(), create_test_provider(YANDEX));

        Config {
            settings: GlobalSettings::default(),
            providers,
        }
    }

    #[test]
    fn test_config_validation_success() {
        let config = create_test_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_no_providers() {
        let mut config = create_test_config();
        config.providers.clear();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("No providers"));
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = create_test_config();
        config.settings.request_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_user_agent() {
        let mut config = create_test_config();
        config.settings.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_service_url() {
        let mut config = create_test_config();
        config
            .providers
            .insert("broken".to_string(), create_test_provider("not a url"));
        let error = config.validate().unwrap_err().to_string();
        assert!(error.contains("broken"));
    }

    #[test]
    fn test_config_validation_empty_name() {
        let mut config = create_test_config();
        let mut provider = create_test_provider(GOOGLE);
        provider.name = String::new();
        config.providers.insert("google".to_string(), provider);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_provider_dialect_inference() {
        assert_eq!(create_test_provider(MOZILLA).dialect(), Dialect::Standard);
        assert_eq!(create_test_provider(YANDEX).dialect(), Dialect::Yandex);

        let mut provider = create_test_provider("http://localhost:8080/geolocation");
        provider.dialect = Some(Dialect::Yandex);
        assert_eq!(provider.dialect(), Dialect::Yandex);
    }

    #[test]
    fn test_global_settings_conversion() {
        let settings = GlobalSettings {
            request_timeout_seconds: 5,
            ignore_ip_method: true,
            user_agent: "Tracker/2.0".to_string(),
        };
        let locator_settings = settings.locator_settings();
        assert_eq!(locator_settings.request_timeout, Duration::from_secs(5));
        assert!(locator_settings.ignore_ip_method);
        assert_eq!(locator_settings.user_agent, "Tracker/2.0");
    }

    #[test]
    fn test_create_locator() {
        let config = create_test_config();

        let locator = config.create_locator("yandex").unwrap();
        assert_eq!(locator.dialect(), Dialect::Yandex);

        let locator = config.create_locator("mozilla").unwrap();
        assert_eq!(locator.dialect(), Dialect::Standard);
        assert_eq!(locator.service_url(), MOZILLA);

        assert!(config.create_locator("missing").is_err());
    }

    #[test]
    fn test_create_locator_disabled_provider() {
        let mut config = create_test_config();
        if let Some(provider) = config.providers.get_mut("mozilla") {
            provider.enabled = false;
        }
        assert!(config.create_locator("mozilla").is_err());

        let enabled: Vec<_> = config
            .enabled_providers()
            .into_iter()
            .map(|(id, _)| id.clone())
            .collect();
        assert_eq!(enabled, vec!["yandex".to_string()]);
    }

    #[test]
    fn test_parse_toml_with_defaults() {
        let config: Config = toml::from_str(
            r#"
[providers.mozilla]
name = "Mozilla Location Service"
service_url = "https://location.services.mozilla.com/v1/geolocate"
"#,
        )
        .unwrap();

        assert_eq!(config.settings.request_timeout_seconds, 30);
        assert!(!config.settings.ignore_ip_method);
        assert_eq!(config.settings.user_agent, "GeoTrack/1.0");

        let provider = config.get_provider("mozilla").unwrap();
        assert!(provider.enabled);
        assert!(provider.api_key.is_empty());
        assert!(provider.dialect.is_none());
    }

    #[test]
    fn test_parse_toml_dialect_override() {
        let config: Config = toml::from_str(
            r#"
[settings]
request_timeout_seconds = 10
ignore_ip_method = true

[providers.local]
name = "Local Yandex mirror"
service_url = "http://127.0.0.1:9000/geolocation"
api_key = "local-key"
dialect = "yandex"
"#,
        )
        .unwrap();

        assert_eq!(config.settings.request_timeout_seconds, 10);
        assert!(config.settings.ignore_ip_method);
        let provider = config.get_provider("local").unwrap();
        assert_eq!(provider.dialect(), Dialect::Yandex);
    }

    #[test]
    fn test_load_config_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[providers.google]
name = "Google"
service_url = "https://www.googleapis.com/geolocation/v1/geolocate"
api_key = "google-key"
"#
        )
        .unwrap();

        let config = load_config_from_path(file.path()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.get_provider("google").unwrap().api_key, "google-key");
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path("/nonexistent/geotrack/config.toml");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read config"));
    }
}
