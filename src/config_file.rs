//! Settings file handle
//!
//! Owns the on-disk path and the parsed [`TerminalConfig`]. Writing always
//! assembles the full output text in memory first, then backs up the
//! previous file contents, then overwrites. The backup is the only
//! mitigation for a crash mid-write; the write itself is not atomic.

use crate::document::TerminalConfig;
use crate::error::{Error, Result};
use crate::paths::SettingsLocator;
use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Backup filenames: `profiles_<YYYYMMDDHHMM>.json`
static BACKUP_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^profiles_\d{12}\.json$").unwrap());

const BACKUP_DATE_FORMAT: &str = "%Y%m%d%H%M";

/// The settings file on disk plus its parsed document.
#[derive(Debug)]
pub struct ConfigFile {
    path: PathBuf,
    config: TerminalConfig,
}

impl ConfigFile {
    /// Open the settings file a locator strategy points at.
    pub fn open(locator: &dyn SettingsLocator) -> Result<Self> {
        Self::open_path(locator.settings_path()?)
    }

    /// Open a settings file at an explicit path.
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let config = Self::load(&path)?;
        Ok(Self { path, config })
    }

    fn load(path: &Path) -> Result<TerminalConfig> {
        log::info!("Trying to load Terminal config from {}", path.display());
        let text = fs::read_to_string(path)?;
        TerminalConfig::parse(&text)
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed document.
    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// The parsed document, for mutation.
    pub fn config_mut(&mut self) -> &mut TerminalConfig {
        &mut self.config
    }

    /// Re-read and re-parse the file, discarding in-memory changes.
    pub fn reload(&mut self) -> Result<()> {
        self.config = Self::load(&self.path)?;
        Ok(())
    }

    /// Copy the current file contents to a timestamped backup next to it.
    ///
    /// The timestamp is the file's modification time, so repeated backups
    /// of an unchanged file coalesce into one. Returns the backup path, or
    /// `None` when there is no file to back up.
    pub fn backup(&self) -> Result<Option<PathBuf>> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "No file found at {}, nothing to backup",
                    self.path.display()
                );
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        let modified: DateTime<Local> = metadata.modified()?.into();
        let filename = format!("profiles_{}.json", modified.format(BACKUP_DATE_FORMAT));
        let backup_path = match self.path.parent() {
            Some(dir) => dir.join(filename),
            None => PathBuf::from(filename),
        };
        log::info!(
            "Backing up Terminal config file to {}",
            backup_path.display()
        );
        fs::copy(&self.path, &backup_path)?;
        Ok(Some(backup_path))
    }

    /// Delete every timestamped backup next to the settings file. Returns
    /// how many files were removed.
    pub fn remove_backups(&self) -> Result<usize> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut removed = 0;
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if entry.file_type()?.is_file() && BACKUP_FILENAME.is_match(name) {
                fs::remove_file(entry.path())?;
                log::info!("Deleted backup file {}", name);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Assemble the document and overwrite the settings file, backing up
    /// the previous contents first.
    pub fn write(&self) -> Result<()> {
        let assembled = self.config.assemble()?;
        self.backup()?;
        log::info!(
            "Trying to write Terminal config file to {}",
            self.path.display()
        );
        fs::write(&self.path, assembled)?;
        log::info!("Finished writing Terminal config file");
        Ok(())
    }

    /// Assemble the document and write it to an alternate path, leaving
    /// the real settings file untouched.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let assembled = self.config.assemble()?;
        fs::write(path, assembled)?;
        Ok(())
    }
}
