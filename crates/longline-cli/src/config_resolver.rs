//! Locating the config file for a run.
//!
//! First match wins: the `--config` path, then `longline.toml` or
//! `.longline.toml` in the project directory, then `config.toml` in the
//! user config directory. With none of these, built-in defaults apply.

use std::path::{Path, PathBuf};

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line; not checked for existence here.
    Explicit(PathBuf),
    /// Next to the analyzed code.
    Project(PathBuf),
    /// From the per-user directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// The config file path, unless defaults are in use.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Whether the per-user config is in use.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const PROJECT_FILES: [&str; 2] = ["longline.toml", ".longline.toml"];
const USER_FILE: &str = "config.toml";
const USER_DIR_ENV: &str = "LONGLINE_CONFIG_DIR";

/// Finds the config for a project rooted at `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    search(project_dir, user_config_dir().as_deref())
}

/// Searches the project directory, then `user_dir`.
fn search(project_dir: &Path, user_dir: Option<&Path>) -> ConfigSource {
    let project = PROJECT_FILES
        .iter()
        .map(|name| project_dir.join(name))
        .map(ConfigSource::Project);
    let user = user_dir
        .map(|dir| dir.join(USER_FILE))
        .map(ConfigSource::Global);

    let found = project
        .chain(user)
        .find(|source| source.path().is_some_and(Path::is_file));
    match found {
        Some(source) => {
            if let Some(path) = source.path() {
                tracing::debug!("Config file: {}", path.display());
            }
            source
        }
        None => ConfigSource::Default,
    }
}

/// `$LONGLINE_CONFIG_DIR`, falling back to `~/.longline`.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    match std::env::var_os(USER_DIR_ENV) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|home| home.join(".longline")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn command_line_path_wins() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "longline.toml");
        let given = tmp.path().join("elsewhere.toml");

        let source = resolve(tmp.path(), Some(&given));
        assert_eq!(source, ConfigSource::Explicit(given));
    }

    #[test]
    fn dotfile_is_found() {
        let tmp = TempDir::new().unwrap();
        let path = touch(tmp.path(), ".longline.toml");

        assert_eq!(search(tmp.path(), None), ConfigSource::Project(path));
    }

    #[test]
    fn plain_name_before_dotfile() {
        let tmp = TempDir::new().unwrap();
        let plain = touch(tmp.path(), "longline.toml");
        touch(tmp.path(), ".longline.toml");

        assert_eq!(search(tmp.path(), None), ConfigSource::Project(plain));
    }

    #[test]
    fn user_config_is_the_fallback() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        let path = touch(user.path(), "config.toml");

        let source = search(project.path(), Some(user.path()));
        assert!(source.is_global());
        assert_eq!(source.path(), Some(path.as_path()));
    }

    #[test]
    fn project_config_shadows_user_config() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        touch(project.path(), "longline.toml");
        touch(user.path(), "config.toml");

        let source = search(project.path(), Some(user.path()));
        assert!(matches!(source, ConfigSource::Project(_)));
    }

    #[test]
    fn directories_named_like_configs_are_ignored() {
        let project = TempDir::new().unwrap();
        fs::create_dir(project.path().join("longline.toml")).unwrap();

        assert_eq!(search(project.path(), None), ConfigSource::Default);
    }

    #[test]
    fn defaults_when_nothing_exists() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();

        let source = search(project.path(), Some(user.path()));
        assert_eq!(source, ConfigSource::Default);
        assert!(source.path().is_none());
    }
}
