use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub tables: TablesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesConfig {
    /// Directory with replacement table JSON files.
    /// If None, the embedded defaults are used.
    pub override_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let override_dir = std::env::var("LINKLENS_TABLES_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        if let Some(ref dir) = override_dir {
            if !dir.is_dir() {
                tracing::warn!(
                    "LINKLENS_TABLES_DIR '{}' is not a directory, using embedded tables",
                    dir.display()
                );
            }
        }

        Ok(Self {
            tables: TablesConfig { override_dir },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_defaults_to_embedded_tables() {
        // Not set in the test environment
        std::env::remove_var("LINKLENS_TABLES_DIR");
        let config = Config::from_env().unwrap();
        assert!(config.tables.override_dir.is_none());
    }
}
