use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "TODOS_CONFIG";

/// Get the config file path (`$TODOS_CONFIG`, else `~/.config/todos.toml`)
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("todos.toml"))
}

/// Expand a leading `~` to the home directory; other paths are returned as is
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    // Both variables are read by one test only, so nothing else races on them.
    #[test]
    fn test_get_config_path() {
        let original_home = env::var("HOME").ok();
        let original_config = env::var(CONFIG_ENV_VAR).ok();

        // SAFETY: Setting environment variables in tests is safe as long as:
        // 1. No other test reads these variables concurrently
        // 2. We restore the original values afterwards
        unsafe {
            env::remove_var(CONFIG_ENV_VAR);
            env::set_var("HOME", "/Users/testuser");
        }
        assert_eq!(get_config_path().unwrap(), PathBuf::from("/Users/testuser/.config/todos.toml"));

        unsafe {
            env::set_var(CONFIG_ENV_VAR, "/etc/todos.toml");
        }
        assert_eq!(get_config_path().unwrap(), PathBuf::from("/etc/todos.toml"));

        unsafe {
            env::remove_var(CONFIG_ENV_VAR);
            env::remove_var("HOME");
        }
        let err = get_config_path().unwrap_err();
        assert!(err.to_string().contains("HOME environment variable not set"));

        // Restore original values
        unsafe {
            if let Some(home) = original_home {
                env::set_var("HOME", home);
            }
            if let Some(config) = original_config {
                env::set_var(CONFIG_ENV_VAR, config);
            }
        }
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde(Path::new("/data/store")), PathBuf::from("/data/store"));
        assert_eq!(expand_tilde(Path::new("relative/store")), PathBuf::from("relative/store"));
        // Only a whole `~` component is expanded
        assert_eq!(expand_tilde(Path::new("~user/store")), PathBuf::from("~user/store"));
    }

    #[test]
    fn test_expand_tilde_expands_home() {
        let expanded = expand_tilde(Path::new("~/store"));
        if dirs::home_dir().is_some() {
            assert!(!expanded.starts_with("~"));
            assert!(expanded.ends_with("store"));
        }
    }
}
