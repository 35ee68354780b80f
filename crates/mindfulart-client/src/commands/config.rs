//! Configuration commands.

use std::path::Path;

use crate::config::{ApiKeyOverrides, ClientConfig};
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig, config_path: &Path) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", config_path.display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig, keys: &ApiKeyOverrides) -> ClientResult<()> {
    for line in validation_report(config, keys)? {
        println!("{}", line);
    }
    println!("Configuration is valid.");
    Ok(())
}

/// Checks every section and describes each provider's state.
///
/// Fails on the first invalid value. A missing API key is reported, not an
/// error: searches still run and show a note for that museum.
pub fn validation_report(
    config: &ClientConfig,
    keys: &ApiKeyOverrides,
) -> ClientResult<Vec<String>> {
    config.validate_search()?;
    #[allow(unused_mut)]
    let mut report = Vec::new();

    #[cfg(feature = "rijksmuseum")]
    {
        let rijks = config
            .rijksmuseum
            .to_provider_config(keys.rijksmuseum.as_deref(), config.search.timeout())?;
        rijks
            .validate()
            .map_err(|e| ClientError::Config(format!("invalid [rijksmuseum] settings: {}", e)))?;
        report.push(key_status("Rijksmuseum", rijks.api_key().is_some()));
    }

    #[cfg(feature = "harvard")]
    {
        let harvard = config
            .harvard
            .to_provider_config(keys.harvard.as_deref(), config.search.timeout())?;
        harvard
            .validate()
            .map_err(|e| ClientError::Config(format!("invalid [harvard] settings: {}", e)))?;
        report.push(key_status("Harvard", harvard.api_key().is_some()));
    }

    #[cfg(not(any(feature = "harvard", feature = "rijksmuseum")))]
    let _ = keys;

    Ok(report)
}

#[cfg(any(feature = "harvard", feature = "rijksmuseum"))]
fn key_status(provider: &str, has_key: bool) -> String {
    if has_key {
        format!("{} API key is set.", provider)
    } else {
        format!(
            "{} API key is not set; searches will skip this museum.",
            provider
        )
    }
}

/// Show the configuration and gallery file paths.
pub fn path(config: &ClientConfig, config_path: &Path) -> ClientResult<()> {
    println!("config: {}", config_path.display());
    println!("galleries: {}", config.gallery_path().display());
    Ok(())
}

#[cfg(test)]
#[cfg(all(feature = "harvard", feature = "rijksmuseum"))]
mod tests {
    use super::*;

    #[test]
    fn report_lists_key_state() {
        let mut config = ClientConfig::default();
        config.rijksmuseum.api_key = Some("rk".to_string());
        let report = validation_report(&config, &ApiKeyOverrides::default()).unwrap();
        insta::assert_snapshot!(report.join("\n"), @r"
        Rijksmuseum API key is set.
        Harvard API key is not set; searches will skip this museum.
        ");
    }

    #[test]
    fn override_counts_as_configured() {
        let keys = ApiKeyOverrides {
            harvard: Some("hk".to_string()),
            rijksmuseum: None,
        };
        let report = validation_report(&ClientConfig::default(), &keys).unwrap();
        assert_eq!(report[1], "Harvard API key is set.");
    }

    #[test]
    fn bad_base_url_fails() {
        let mut config = ClientConfig::default();
        config.harvard.base_url = Some("ftp://example.org".to_string());
        let err = validation_report(&config, &ApiKeyOverrides::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: invalid [harvard] settings: base_url must use http or https, got 'ftp'"
        );
    }

    #[test]
    fn bad_language_fails() {
        let mut config = ClientConfig::default();
        config.rijksmuseum.language = Some("fr".to_string());
        assert!(validation_report(&config, &ApiKeyOverrides::default()).is_err());
    }
}
