//! Render configuration loaded from TOML and overridden from the command line.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "bench-viz.toml";

const MIN_DPI: u32 = 10;
const MAX_DPI: u32 = 600;

/// Where and how charts are rendered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Image artifact path; each pipeline has its own default.
    pub output_path: Option<PathBuf>,
    /// Rendering resolution in dots per inch.
    pub dpi: u32,
    /// Whether to open a window showing the chart after saving it.
    pub show_interactive: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_path: None,
            dpi: 100,
            show_interactive: true,
        }
    }
}

impl RenderConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the config file
    ///
    /// # Returns
    /// * `Ok(RenderConfig)` if the file was successfully loaded and validated
    /// * `Err(String)` with a descriptive error message otherwise
    pub fn load(config_path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(config_path).map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else `bench-viz.toml` from the working directory if present, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, String> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    log::info!("Using config file {}", default_path.display());
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_DPI..=MAX_DPI).contains(&self.dpi) {
            return Err(format!("dpi must be between {} and {}, got {}", MIN_DPI, MAX_DPI, self.dpi));
        }
        Ok(())
    }

    /// Configured output path, or `default` when none is set.
    pub fn output_path_or(&self, default: &str) -> PathBuf {
        self.output_path.clone().unwrap_or_else(|| PathBuf::from(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(RenderConfig::from_toml_str("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_kebab_case_keys() {
        let config = RenderConfig::from_toml_str(
            r#"
            output-path = "out/plot.png"
            dpi = 300
            show-interactive = false
            "#,
        )
        .unwrap();
        assert_eq!(config.output_path, Some(PathBuf::from("out/plot.png")));
        assert_eq!(config.dpi, 300);
        assert!(!config.show_interactive);
        assert_eq!(config.output_path_or("benchmark_plot.png"), PathBuf::from("out/plot.png"));
    }

    #[test]
    fn test_load_fixture() {
        let config = RenderConfig::load(Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/render.toml"))).unwrap();
        assert_eq!(config.dpi, 300);
        assert_eq!(config.output_path, Some(PathBuf::from("benchmark_plot.png")));
        assert!(config.show_interactive);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RenderConfig::load(Path::new("/nonexistent/bench-viz.toml")).unwrap_err();
        assert!(err.starts_with("Failed to read config file"));
    }

    #[test]
    fn test_invalid_dpi_rejected() {
        let err = RenderConfig::from_toml_str("dpi = 5000").unwrap_err();
        assert!(err.contains("dpi must be between"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(RenderConfig::from_toml_str("resolution = 3").is_err());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            RenderConfig::default().output_path_or("benchmark_plot.png"),
            PathBuf::from("benchmark_plot.png")
        );
    }
}
