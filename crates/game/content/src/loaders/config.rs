//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`GameConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_action_tries == 0 {
            anyhow::bail!("max_action_tries must be at least 1");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let config = ConfigLoader::parse("max_action_tries = 4\nseed = 99\n").unwrap();

        assert_eq!(config.max_action_tries, 4);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.map_width, GameConfig::DEFAULT_MAP_WIDTH);
        assert_eq!(config.dodge_stride, GameConfig::DEFAULT_DODGE_STRIDE);
    }

    #[test]
    fn rejects_zero_tries() {
        assert!(ConfigLoader::parse("max_action_tries = 0").is_err());
    }
}
