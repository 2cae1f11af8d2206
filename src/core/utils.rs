use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".kakeibo";
const STORAGE_FILE: &str = "local_storage.json";
const HOME_ENV: &str = "KAKEIBO_HOME";

/// Resolves the on-disk locations used by the CLI.
pub struct PathResolver;

impl PathResolver {
    /// Returns the application data directory, defaulting to `~/.kakeibo`.
    pub fn base_dir() -> PathBuf {
        Self::resolve_base(env::var_os(HOME_ENV).map(PathBuf::from))
    }

    /// Prefers an explicit root over the home-directory default.
    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        if let Some(path) = custom {
            return path;
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    /// Path of the key-value storage file inside `base`.
    pub fn storage_file_in(base: &Path) -> PathBuf {
        base.join(STORAGE_FILE)
    }
}

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)
}
