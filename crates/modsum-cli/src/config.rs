use anyhow::{Context, Result};
use modsum_core::SelectorConfig;
use serde::Deserialize;
use std::path::Path;

/// File name searched for when no explicit config path is given
pub const CONFIG_FILE: &str = "modsum.toml";

/// The main modsum configuration file structure (modsum.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ModsumConfig {
    /// Adaptive modulus selection tunables
    pub selector: SelectorConfig,

    /// Comparison report settings
    pub report: ReportConfig,
}

/// Comparison report configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Largest target for which the dense table DP is still run in comparisons
    pub naive_limit: u64,

    /// Default upper bound on moduli picked by the adaptive solver
    pub max_moduli: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            naive_limit: 100_000,
            max_moduli: 3,
        }
    }
}

impl ModsumConfig {
    /// Load configuration from modsum.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.exists() {
                return Self::load_file(&config_path).map(Some);
            }

            // Move to parent directory
            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Load configuration from an explicit path
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ModsumConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .selector
            .validate()
            .with_context(|| format!("Invalid [selector] section in {}", path.display()))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration by searching upward from the current working directory
    pub fn load_from_cwd() -> Result<Option<Self>> {
        let cwd = std::env::current_dir()?;
        Self::load(&cwd)
    }

    /// Resolve the effective configuration: explicit path, discovered file, or defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => Ok(Self::load_from_cwd()?.unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config() {
        let config: ModsumConfig = toml::from_str("").unwrap();
        assert_eq!(config.selector, SelectorConfig::default());
        assert_eq!(config.report.naive_limit, 100_000);
        assert_eq!(config.report.max_moduli, 3);
    }

    #[test]
    fn test_parse_selector_config() {
        let toml = r#"
[selector]
prime_pool = [3, 5, 7]
pool_size = 2
threshold = 0.25
fallback_modulus = 5
"#;
        let config: ModsumConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.selector.prime_pool, vec![3, 5, 7]);
        assert_eq!(config.selector.pool_size, 2);
        assert_eq!(config.selector.threshold, 0.25);
        assert_eq!(config.selector.fallback_modulus, 5);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let toml = r#"
[report]
naive_limit = 500

[selector]
threshold = 0.5
"#;
        let config: ModsumConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.report.naive_limit, 500);
        assert_eq!(config.report.max_moduli, 3);
        assert_eq!(config.selector.threshold, 0.5);
        assert_eq!(config.selector.pool_size, 10);
    }

    #[test]
    fn test_load_searches_upward() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[report]\nmax_moduli = 5\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = ModsumConfig::load(&nested).unwrap().unwrap();
        assert_eq!(config.report.max_moduli, 5);
    }

    #[test]
    fn test_load_rejects_invalid_selector() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[selector]\nprime_pool = [2, 1]\n").unwrap();

        let err = ModsumConfig::load_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid modulus 1"));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[report]\nnaive_limit = \"lots\"\n").unwrap();

        assert!(ModsumConfig::load_file(&path).is_err());
    }
}
