/// Centralized platform-specific path computation
///
/// Provides consistent config-file locations across Windows, macOS, and Linux
/// following the XDG Base Directory specification on Unix-like systems.
use std::path::PathBuf;

/// Platform-agnostic path utilities
pub struct PlatformPaths;

impl PlatformPaths {
    /// Get the appropriate config directory for the current platform
    ///
    /// - Windows: %APPDATA%
    /// - macOS: ~/Library/Application Support
    /// - Linux/Unix: $XDG_CONFIG_HOME or ~/.config
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            std::env::var("APPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        } else if cfg!(target_os = "macos") {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join("Library/Application Support"))
                .unwrap_or_else(|_| PathBuf::from("."))
        } else {
            // Linux/Unix - follow XDG Base Directory specification
            std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    std::env::var("HOME").map(|home| PathBuf::from(home).join(".config"))
                })
                .unwrap_or_else(|_| PathBuf::from("."))
        }
    }

    /// Default location of the code-graph config file
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("code-graph").join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_not_empty() {
        let dir = PlatformPaths::config_dir();
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn test_default_config_path_ends_with_toml() {
        let path = PlatformPaths::default_config_path();
        assert!(path.ends_with("code-graph/config.toml"));
    }
}
