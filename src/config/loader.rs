use super::{default_config_path, AppConfig};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Reads the config file, applies environment overrides and validates
///
/// An explicit path wins over the platform default location.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    skip_env: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Ignore `MEDAL_HELPER_*` variables
    pub fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    pub fn resolve_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => default_config_path(),
        }
    }

    pub async fn load(&self) -> Result<AppConfig> {
        let path = self.resolve_path()?;
        self.load_from(&path).await
    }

    pub async fn load_from(&self, path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).await?;
        let mut config = AppConfig::from_toml_str(&content)?;

        if !self.skip_env {
            config.merge_env_vars()?;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_from_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[[accounts]]\naccess_key = \"abcdefghijkl\"\n").unwrap();

        let config = ConfigLoader::new()
            .with_path(&path)
            .without_env()
            .load()
            .await
            .unwrap();

        assert_eq!(config.accounts.len(), 1);
    }

    #[test]
    fn test_resolve_path_prefers_explicit_path() {
        let loader = ConfigLoader::new().with_path("/tmp/medal/config.toml");
        assert_eq!(
            loader.resolve_path().unwrap(),
            PathBuf::from("/tmp/medal/config.toml")
        );
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::new()
            .with_path(dir.path().join("absent.toml"))
            .load()
            .await
            .unwrap_err();

        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[engine]\nmode = \"sequential\"\n").unwrap();

        let result = ConfigLoader::new().with_path(&path).without_env().load().await;
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }
}
