use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::error::Result;
use crate::infrastructure::storage::default_data_dir;

/// Optional settings file, read from the working directory
pub const SETTINGS_FILE: &str = "Settings.toml";

/// Prefix for environment overrides, e.g. `FAKENEWS_SERVER__PORT`
pub const ENV_PREFIX: &str = "FAKENEWS_";

/// Optional dotenv file, read from the working directory
pub const DOTENV_FILE: &str = ".env";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerSettings {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerSettings {
    pub data_dir: PathBuf,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub explorer: ExplorerSettings,
}

impl Settings {
    /// Defaults, then `Settings.toml`, then `PORT`, then `FAKENEWS_*` variables.
    /// A `.env` file in the working directory is loaded into the environment first.
    pub fn load() -> Result<Self> {
        load_env_file(Path::new(DOTENV_FILE));
        Ok(Self::figment().extract()?)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(SETTINGS_FILE))
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

/// Load a dotenv file into the environment. A missing file is skipped quietly;
/// any other failure is logged and skipped.
pub fn load_env_file(path: &Path) -> bool {
    match dotenvy::from_path(path) {
        Ok(()) => true,
        Err(err) if err.not_found() => false,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Ignoring unreadable dotenv file");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let settings: Settings = Settings::figment().extract()?;
            assert_eq!(settings.server.port, 5000);
            assert_eq!(settings.server.host, "127.0.0.1");
            assert!(settings.explorer.data_dir.ends_with("data"));
            Ok(())
        });
    }

    #[test]
    fn test_port_env_override() {
        Jail::expect_with(|jail| {
            jail.set_env("PORT", "8080");
            let settings: Settings = Settings::figment().extract()?;
            assert_eq!(settings.server.port, 8080);
            Ok(())
        });
    }

    #[test]
    fn test_toml_then_prefixed_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                SETTINGS_FILE,
                r#"
                [server]
                port = 7000

                [explorer]
                data_dir = "/srv/datasets"
                "#,
            )?;
            jail.set_env("FAKENEWS_SERVER__HOST", "0.0.0.0");

            let settings: Settings = Settings::figment().extract()?;
            assert_eq!(settings.server.port, 7000);
            assert_eq!(settings.server.host, "0.0.0.0");
            assert_eq!(settings.explorer.data_dir, PathBuf::from("/srv/datasets"));
            assert_eq!(settings.server.url(), "http://0.0.0.0:7000");
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_beats_port() {
        Jail::expect_with(|jail| {
            jail.set_env("PORT", "8080");
            jail.set_env("FAKENEWS_SERVER__PORT", "9090");
            let settings: Settings = Settings::figment().extract()?;
            assert_eq!(settings.server.port, 9090);
            Ok(())
        });
    }

    #[test]
    fn test_missing_env_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!load_env_file(&dir.path().join(".env")));
    }

    #[test]
    fn test_malformed_env_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "THIS LINE HAS NO EQUALS SIGN\n").unwrap();
        assert!(!load_env_file(&path));
    }

    #[test]
    fn test_valid_env_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "FAKENEWS_TEST_DOTENV_MARKER=loaded\n").unwrap();
        assert!(load_env_file(&path));
        assert_eq!(
            std::env::var("FAKENEWS_TEST_DOTENV_MARKER").as_deref(),
            Ok("loaded")
        );
    }
}
