use std::env;
use std::path::PathBuf;

use dirs_next::{config_dir, home_dir};

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Resolve a configuration file location.
///
/// A non-blank `override_var` wins and is tilde-expanded; otherwise the file
/// lives at `<config_dir>/<app>/<file_name>`, falling back to the working
/// directory when the platform has no config directory.
pub fn resolve_config_path(override_var: &str, app: &str, file_name: &str) -> PathBuf {
    if let Ok(path) = env::var(override_var)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir().unwrap_or_else(|| PathBuf::from(".")).join(app).join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_tilde("  /etc/tapwire.json "), PathBuf::from("/etc/tapwire.json"));
    }

    #[test]
    fn override_variable_wins() {
        temp_env::with_var("TAPWIRE_TEST_CONFIG", Some("/tmp/custom.json"), || {
            let path = resolve_config_path("TAPWIRE_TEST_CONFIG", "tapwire", "config.json");
            assert_eq!(path, PathBuf::from("/tmp/custom.json"));
        });
    }

    #[test]
    fn blank_override_falls_back_to_config_dir() {
        temp_env::with_var("TAPWIRE_TEST_CONFIG_BLANK", Some("   "), || {
            let path = resolve_config_path("TAPWIRE_TEST_CONFIG_BLANK", "tapwire", "config.json");
            assert!(path.ends_with("tapwire/config.json"), "unexpected path: {}", path.display());
        });
    }
}
