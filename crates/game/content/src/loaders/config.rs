//! Combat configuration loader.

use std::path::Path;

use fight_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`CombatConfig::default`].
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.tick_rate == 0 {
            anyhow::bail!("tick_rate must be positive");
        }
        tracing::debug!(?config, "loaded combat config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "contact_hit_stop = 4\nmotion_window_millis = 250").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.contact_hit_stop, 4);
        assert_eq!(config.motion_window_millis, 250);
        assert_eq!(
            config.counter_stun_permille,
            CombatConfig::DEFAULT_COUNTER_STUN_PERMILLE
        );
        assert_eq!(
            config.crouch_stun_permille,
            CombatConfig::DEFAULT_CROUCH_STUN_PERMILLE
        );
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        assert!(ConfigLoader::parse("tick_rate = 0").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
