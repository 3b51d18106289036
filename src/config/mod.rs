/// Configuration system for code-graph
///
/// Supports loading from multiple sources with priority:
/// CLI args > Environment variables > Config file > Defaults
use crate::error::{ConfigError, GraphError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Parsing configuration
    #[serde(default)]
    pub parsing: ParsingConfig,

    /// Node sizing configuration
    #[serde(default)]
    pub sizing: SizingConfig,

    /// Node palette configuration
    #[serde(default)]
    pub palette: PaletteConfig,
}

/// Parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Language tag used when the requested tag is not recognized
    #[serde(default = "default_fallback_language")]
    pub fallback_language: String,

    /// Maximum source size to parse (in bytes)
    #[serde(default = "default_max_source_bytes")]
    pub max_source_bytes: usize,
}

/// Node sizing configuration
///
/// Node size is recomputed from edge degree as
/// `max(base_size, degree * degree_multiplier + base_size)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingConfig {
    /// Minimum node size, also the size of isolated nodes
    #[serde(default = "default_base_size")]
    pub base_size: u32,

    /// Size added per touching edge
    #[serde(default = "default_degree_multiplier")]
    pub degree_multiplier: u32,
}

/// Node palette configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Color assigned to definition kinds not covered by the palette
    #[serde(default = "default_neutral_color")]
    pub neutral_color: String,

    /// Per-kind color overrides, e.g. `class_declaration = "#ff6b6b"`
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

// Default value functions
fn default_fallback_language() -> String {
    "javascript".to_string()
}

fn default_max_source_bytes() -> usize {
    1_048_576 // 1 MB
}

fn default_base_size() -> u32 {
    10
}

fn default_degree_multiplier() -> u32 {
    5
}

fn default_neutral_color() -> String {
    "#95a5a6".to_string()
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            fallback_language: default_fallback_language(),
            max_source_bytes: default_max_source_bytes(),
        }
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            base_size: default_base_size(),
            degree_multiplier: default_degree_multiplier(),
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            neutral_color: default_neutral_color(),
            overrides: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, GraphError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location or create default
    pub fn load_or_default() -> Result<Self, GraphError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), GraphError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::SaveFailed(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.parsing.fallback_language.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "parsing.fallback_language".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if self.parsing.max_source_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "parsing.max_source_bytes".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.sizing.degree_multiplier == 0 {
            return Err(ConfigError::InvalidValue {
                key: "sizing.degree_multiplier".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if !is_hex_color(&self.palette.neutral_color) {
            return Err(ConfigError::InvalidValue {
                key: "palette.neutral_color".to_string(),
                reason: format!(
                    "must be a hex color like '#aabbcc', got '{}'",
                    self.palette.neutral_color
                ),
            }
            .into());
        }

        for (kind, color) in &self.palette.overrides {
            if !is_hex_color(color) {
                return Err(ConfigError::InvalidValue {
                    key: format!("palette.overrides.{}", kind),
                    reason: format!("must be a hex color like '#aabbcc', got '{}'", color),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(lang) = std::env::var("CODE_GRAPH_FALLBACK_LANGUAGE") {
            self.parsing.fallback_language = lang;
        }

        if let Ok(max_bytes) = std::env::var("CODE_GRAPH_MAX_SOURCE_BYTES")
            && let Ok(max) = max_bytes.parse()
        {
            self.parsing.max_source_bytes = max;
        }

        if let Ok(base) = std::env::var("CODE_GRAPH_BASE_NODE_SIZE")
            && let Ok(size) = base.parse()
        {
            self.sizing.base_size = size;
        }

        if let Ok(mult) = std::env::var("CODE_GRAPH_DEGREE_MULTIPLIER")
            && let Ok(m) = mult.parse()
        {
            self.sizing.degree_multiplier = m;
        }
    }

    /// Create a new Config with defaults and environment overrides
    pub fn new() -> Result<Self, GraphError> {
        let mut config = Self::load_or_default()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}

/// Check for a `#rgb` or `#rrggbb` hex color string
fn is_hex_color(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests;
