use figment::{
    providers::{Env, Serialized},
    Figment,
};

use super::{types::EngineConfig, ConfigError};

/// Load configuration from built-in defaults with environment variable
/// overrides (prefix `RECODA_`)
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = Figment::from(Serialized::defaults(EngineConfig::default()))
        .merge(Env::prefixed("RECODA_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<EngineConfig, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_load_config_defaults() {
        let config = load_config().unwrap();
        assert_eq!(config.encoder_path, PathBuf::from("ffmpeg"));
        assert_eq!(config.probe_timeout_secs, 5);
        assert_eq!(config.progress_tick_ms, 100);
    }

    #[test]
    fn test_load_config_from_str_partial() {
        let toml = r#"
encoder_path = "/usr/local/bin/ffmpeg"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.encoder_path, PathBuf::from("/usr/local/bin/ffmpeg"));
        assert_eq!(config.probe_timeout_secs, 5);
        assert_eq!(config.progress_tick_ms, 100);
    }

    #[test]
    fn test_load_config_from_str_invalid() {
        let result = load_config_from_str(r#"probe_timeout_secs = "soon""#);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
