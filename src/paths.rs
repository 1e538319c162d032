//! Settings path resolution
//!
//! Where the Windows Terminal settings file lives depends on the host
//! environment, so the lookup is a pluggable strategy injected into
//! [`ConfigFile`](crate::config_file::ConfigFile) construction instead of a
//! load-time global.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Relative location of the settings file under the local app data root.
const SETTINGS_SUBPATH: &[&str] = &[
    "Packages",
    "Microsoft.WindowsTerminal_8wekyb3d8bbwe",
    "LocalState",
    "profiles.json",
];

/// Strategy for locating the settings file on the current host.
pub trait SettingsLocator {
    /// Absolute path of the settings file.
    fn settings_path(&self) -> Result<PathBuf>;
}

/// Default strategy: resolve through the `LOCALAPPDATA` environment
/// variable, as set on Windows hosts.
#[derive(Debug, Clone, Default)]
pub struct LocalAppData;

impl SettingsLocator for LocalAppData {
    fn settings_path(&self) -> Result<PathBuf> {
        let root = std::env::var_os("LOCALAPPDATA").ok_or_else(|| Error::SettingsPath {
            message: "LOCALAPPDATA is not set".to_string(),
        })?;
        let mut path = PathBuf::from(root);
        for part in SETTINGS_SUBPATH {
            path.push(part);
        }
        Ok(path)
    }
}

/// Fixed-path strategy, for tests and for callers that already know where
/// the settings file lives.
#[derive(Debug, Clone)]
pub struct FixedPath(pub PathBuf);

impl SettingsLocator for FixedPath {
    fn settings_path(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_path_returns_its_path() {
        let locator = FixedPath(PathBuf::from("/tmp/profiles.json"));
        assert_eq!(
            locator.settings_path().unwrap(),
            PathBuf::from("/tmp/profiles.json")
        );
    }

    #[test]
    fn local_app_data_builds_the_package_path() {
        // Environment-dependent; only check the shape when the variable is
        // present so the test is stable on any host.
        if std::env::var_os("LOCALAPPDATA").is_some() {
            let path = LocalAppData.settings_path().unwrap();
            assert!(path.ends_with("LocalState/profiles.json"));
        }
    }
}
