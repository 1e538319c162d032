//! Color scheme value object
//!
//! The shape external scheme suppliers hand to `TerminalConfig::add_scheme`:
//! a palette name, the 16 ANSI colors, and the background/foreground pair.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One named terminal color palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub name: String,
    pub black: String,
    pub red: String,
    pub green: String,
    pub yellow: String,
    pub blue: String,
    pub purple: String,
    pub cyan: String,
    pub white: String,
    pub bright_black: String,
    pub bright_red: String,
    pub bright_green: String,
    pub bright_yellow: String,
    pub bright_blue: String,
    pub bright_purple: String,
    pub bright_cyan: String,
    pub bright_white: String,
    pub background: String,
    pub foreground: String,
}

impl ColorScheme {
    /// Convert into the value-tree form stored in the config.
    pub fn into_value(self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
