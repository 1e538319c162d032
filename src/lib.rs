//! terminal-scheme-manager: comment-preserving editor for the Windows
//! Terminal settings file
//!
//! The settings file is JSON extended with `//` comment lines and blank
//! lines. This library parses it into a value tree plus a position-indexed
//! comment map, applies mutations (set a profile attribute, append a color
//! scheme, switch or cycle the active scheme), and reassembles the file
//! with every comment still next to the content it originally annotated.

pub mod comments;
pub mod config_file;
pub mod document;
pub mod error;
pub mod formatting;
pub mod locate;
pub mod paths;
pub mod scheme;

pub use config_file::ConfigFile;
pub use document::{CycleDirection, ProfileTarget, TerminalConfig};
pub use error::{Error, Result};

// Re-export commonly used types
pub use comments::CommentMap;
pub use locate::{locate_change, ChangeLocation};
pub use paths::{FixedPath, LocalAppData, SettingsLocator};
pub use scheme::ColorScheme;
