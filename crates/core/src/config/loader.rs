//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

const CANDIDATES: [&str; 3] = [".polish.toml", "polish.toml", ".config/polish.toml"];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents, or defaults
    pub schema: ConfigSchema,
    /// File the schema was read from
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path, or search the current directory
    /// for one, falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if !p.exists() => Err(Error::config_not_found(p)),
            Some(p) => Self::from_file(p),
            None => match find_config_file(Path::new(".")) {
                Some(found) => Self::from_file(&found),
                None => Ok(Self::default()),
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        Ok(Self {
            schema: load_config_file(path)?,
            path: Some(path.to_path_buf()),
        })
    }

    /// Directory relative paths in the file are resolved against
    pub fn base_dir(&self) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }

    /// Directory the sniffs run in
    pub fn checks_root(&self) -> PathBuf {
        let base = self.base_dir();
        match &self.schema.general.checks_root {
            Some(root) => base.join(root),
            None => base,
        }
    }
}

/// Find configuration file in standard locations under `dir`
fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|candidate| dir.join(candidate))
        .find(|path| path.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    let schema = toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))?;
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.general.default_env, "dev");
        assert_eq!(config.checks_root(), PathBuf::from("."));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("polish.toml");
        std::fs::write(&path, "[general]\nchecks_root = \"src\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.path.as_deref(), Some(path.as_path()));
        assert_eq!(config.base_dir(), temp.path());
        assert_eq!(config.checks_root(), temp.path().join("src"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let temp = TempDir::new().unwrap();
        let err = Config::load(Some(&temp.path().join("nope.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("polish.toml");
        std::fs::write(&path, "tasks = [unterminated").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.is_some());
    }

    #[test]
    fn test_load_misplaced_tasks_list() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("polish.toml");
        std::fs::write(&path, "[general]\nchecks_root = \".\"\ntasks = [\"fix_white_space\"]\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert_eq!(err.exit_code(), crate::error::exit_codes::CONFIG_ERROR);
    }

    #[test]
    fn test_find_config_file_order() {
        let temp = TempDir::new().unwrap();
        assert!(find_config_file(temp.path()).is_none());

        std::fs::create_dir(temp.path().join(".config")).unwrap();
        std::fs::write(temp.path().join(".config/polish.toml"), "").unwrap();
        std::fs::write(temp.path().join("polish.toml"), "").unwrap();

        assert_eq!(find_config_file(temp.path()), Some(temp.path().join("polish.toml")));
    }
}
