//! Document model for the terminal settings file
//!
//! [`TerminalConfig`] owns the parsed value tree and its comment map as
//! siblings. Every structural mutation runs the same protocol: snapshot the
//! normalized serialization, apply the change, locate the first changed
//! line, and shift the comment offsets past it — so reassembly can put
//! every comment back next to the content it originally annotated.

use crate::comments::{is_comment_line, CommentMap};
use crate::error::{Error, Result};
use crate::formatting::{fix_formatting, formatted_lines};
use crate::locate::locate_change;
use serde_json::{Map, Value};

/// Which profile a scheme operation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileTarget {
    /// The `profiles.defaults` block, applying to all profiles
    Defaults,
    /// A single profile in `profiles.list`, addressed by its `name`
    Named(String),
}

impl ProfileTarget {
    /// Target from an optional profile name; `None` means the defaults.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(name) => ProfileTarget::Named(name.to_string()),
            None => ProfileTarget::Defaults,
        }
    }
}

impl std::fmt::Display for ProfileTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileTarget::Defaults => write!(f, "DEFAULTS"),
            ProfileTarget::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Direction for cycling through the scheme list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Forward,
    Backward,
}

/// The live settings document: parsed value plus comment map.
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    value: Value,
    comments: CommentMap,
}

impl TerminalConfig {
    /// Parse annotated config text into a value tree and a comment map.
    ///
    /// The text is normalized first, then split into lines; comment and
    /// blank lines are recorded under their index in the full normalized
    /// line sequence, and the remaining lines are parsed as JSON.
    pub fn parse(text: &str) -> Result<Self> {
        log::info!("Parsing config file");
        let normalized = fix_formatting(text);
        let mut comments = CommentMap::new();
        let mut content_lines = Vec::new();
        for (i, line) in normalized.split('\n').enumerate() {
            if is_comment_line(line) {
                comments.insert(i, line.to_string());
            } else {
                content_lines.push(line);
            }
        }
        let value: Value = serde_json::from_str(&content_lines.join("\n"))?;
        Ok(Self { value, comments })
    }

    /// The parsed value tree.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The comment map, keyed by assembled-document line index.
    pub fn comments(&self) -> &CommentMap {
        &self.comments
    }

    /// Read-only lookup by key path.
    pub fn get(&self, path: &[&str]) -> Result<&Value> {
        let mut node = &self.value;
        for key in path {
            node = node.get(key).ok_or_else(|| Error::Lookup {
                path: path.join("."),
            })?;
        }
        Ok(node)
    }

    /// The `profiles.list` sequence.
    pub fn profiles(&self) -> Result<&Vec<Value>> {
        self.get(&["profiles", "list"])?
            .as_array()
            .ok_or_else(|| Error::Lookup {
                path: "profiles.list".to_string(),
            })
    }

    /// The `profiles.defaults` map.
    pub fn defaults(&self) -> Result<&Map<String, Value>> {
        self.get(&["profiles", "defaults"])?
            .as_object()
            .ok_or_else(|| Error::Lookup {
                path: "profiles.defaults".to_string(),
            })
    }

    /// Names of all profiles in `profiles.list`, in storage order.
    pub fn profile_names(&self) -> Result<Vec<String>> {
        self.profiles()?
            .iter()
            .map(|profile| {
                profile
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .ok_or_else(|| Error::Lookup {
                        path: "profiles.list.name".to_string(),
                    })
            })
            .collect()
    }

    /// The profile whose `guid` matches the top-level `defaultProfile`.
    pub fn default_profile(&self) -> Result<&Map<String, Value>> {
        let guid = self
            .get(&["defaultProfile"])?
            .as_str()
            .ok_or_else(|| Error::Lookup {
                path: "defaultProfile".to_string(),
            })?;
        self.profiles()?
            .iter()
            .filter_map(Value::as_object)
            .find(|profile| profile.get("guid").and_then(Value::as_str) == Some(guid))
            .ok_or_else(|| Error::ProfileNotFound {
                name: guid.to_string(),
            })
    }

    /// Names of all schemes in the `schemes` sequence, in storage order.
    pub fn scheme_names(&self) -> Result<Vec<String>> {
        self.get(&["schemes"])?
            .as_array()
            .ok_or_else(|| Error::Lookup {
                path: "schemes".to_string(),
            })?
            .iter()
            .map(|scheme| {
                scheme
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .ok_or_else(|| Error::Lookup {
                        path: "schemes.name".to_string(),
                    })
            })
            .collect()
    }

    fn profile(&self, target: &ProfileTarget) -> Result<&Map<String, Value>> {
        match target {
            ProfileTarget::Defaults => self.defaults(),
            ProfileTarget::Named(name) => self
                .profiles()?
                .iter()
                .filter_map(Value::as_object)
                .find(|profile| {
                    profile.get("name").and_then(Value::as_str) == Some(name.as_str())
                })
                .ok_or_else(|| Error::ProfileNotFound { name: name.clone() }),
        }
    }

    fn profile_mut(&mut self, target: &ProfileTarget) -> Result<&mut Map<String, Value>> {
        match target {
            ProfileTarget::Defaults => self
                .value
                .get_mut("profiles")
                .and_then(|profiles| profiles.get_mut("defaults"))
                .and_then(Value::as_object_mut)
                .ok_or_else(|| Error::Lookup {
                    path: "profiles.defaults".to_string(),
                }),
            ProfileTarget::Named(name) => self
                .value
                .get_mut("profiles")
                .and_then(|profiles| profiles.get_mut("list"))
                .and_then(Value::as_array_mut)
                .ok_or_else(|| Error::Lookup {
                    path: "profiles.list".to_string(),
                })?
                .iter_mut()
                .filter_map(Value::as_object_mut)
                .find(|profile| {
                    profile.get("name").and_then(Value::as_str) == Some(name.as_str())
                })
                .ok_or_else(|| Error::ProfileNotFound { name: name.clone() }),
        }
    }

    /// Read one attribute of a profile.
    pub fn profile_attribute(&self, target: &ProfileTarget, key: &str) -> Result<Option<&Value>> {
        Ok(self.profile(target)?.get(key))
    }

    /// Set one attribute on a profile.
    ///
    /// Overwriting an existing key keeps the line count stable, so the
    /// comment map needs no reconciliation. A new key grows the document by
    /// one line and shifts every comment past the insertion point.
    pub fn set_profile_attribute(
        &mut self,
        target: &ProfileTarget,
        key: &str,
        value: Value,
    ) -> Result<()> {
        if self.profile(target)?.contains_key(key) {
            self.profile_mut(target)?.insert(key.to_string(), value);
            return Ok(());
        }
        let before = formatted_lines(&self.value)?;
        self.profile_mut(target)?.insert(key.to_string(), value);
        let after = formatted_lines(&self.value)?;
        self.reconcile_after_growth(&before, &after)
    }

    /// Append an element to a named sequence unless an element with the
    /// same identifying key already exists. Returns whether it was added.
    pub fn append_to_collection(
        &mut self,
        path: &[&str],
        id_key: &str,
        element: Value,
    ) -> Result<bool> {
        if element.get(id_key).is_none() {
            return Err(Error::internal(format!(
                "appended element is missing its identifying key {:?}",
                id_key
            )));
        }
        let collection = self.get(path)?.as_array().ok_or_else(|| Error::Lookup {
            path: path.join("."),
        })?;
        if collection
            .iter()
            .any(|existing| existing.get(id_key) == element.get(id_key))
        {
            return Ok(false);
        }

        let before = formatted_lines(&self.value)?;
        self.collection_mut(path)?.push(element);
        let after = formatted_lines(&self.value)?;
        self.reconcile_after_growth(&before, &after)?;
        Ok(true)
    }

    fn collection_mut(&mut self, path: &[&str]) -> Result<&mut Vec<Value>> {
        let mut node = &mut self.value;
        for key in path {
            node = node.get_mut(key).ok_or_else(|| Error::Lookup {
                path: path.join("."),
            })?;
        }
        node.as_array_mut().ok_or_else(|| Error::Lookup {
            path: path.join("."),
        })
    }

    /// Append one color scheme to the `schemes` sequence.
    pub fn add_scheme(&mut self, scheme: Value) -> Result<bool> {
        let name = scheme
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
            .to_string();
        let added = self.append_to_collection(&["schemes"], "name", scheme)?;
        if added {
            log::info!("Added scheme {} to config", name);
        } else {
            log::debug!("Not adding scheme {} (already in config)", name);
        }
        Ok(added)
    }

    /// The scheme currently set for a profile, if any.
    pub fn current_scheme(&self, target: &ProfileTarget) -> Result<Option<String>> {
        Ok(self
            .profile(target)?
            .get("colorScheme")
            .and_then(Value::as_str)
            .map(str::to_owned))
    }

    /// Set the color scheme for a profile, or for all profiles via the
    /// defaults block.
    pub fn set_scheme(&mut self, name: &str, target: &ProfileTarget) -> Result<()> {
        if self.scheme_names()?.is_empty() {
            return Err(Error::NoSchemes);
        }
        self.set_profile_attribute(target, "colorScheme", Value::String(name.to_string()))?;
        log::info!("Scheme {} set for {}", name, target);
        Ok(())
    }

    /// Switch a profile to the next or previous scheme in storage order,
    /// wrapping at either end. Returns the newly selected scheme name.
    pub fn cycle_scheme(
        &mut self,
        target: &ProfileTarget,
        direction: CycleDirection,
    ) -> Result<String> {
        let next = self.next_scheme(target, direction)?;
        log::info!("Cycling schemes, next scheme: {}", next);
        self.set_scheme(&next, target)?;
        Ok(next)
    }

    fn next_scheme(&self, target: &ProfileTarget, direction: CycleDirection) -> Result<String> {
        let schemes = self.scheme_names()?;
        if schemes.is_empty() {
            return Err(Error::NoSchemes);
        }
        let current = match self.current_scheme(target)? {
            Some(current) => current,
            // No scheme set yet: select the first known scheme, in both
            // directions.
            None => return Ok(schemes[0].clone()),
        };
        log::debug!("profile: {}, scheme: {}", target, current);
        let n = schemes.len();
        let next = match schemes.iter().position(|scheme| *scheme == current) {
            Some(i) => match direction {
                CycleDirection::Forward => schemes[(i + 1) % n].clone(),
                CycleDirection::Backward => schemes[(i + n - 1) % n].clone(),
            },
            // The set scheme no longer exists; start over at the first.
            None => schemes[0].clone(),
        };
        Ok(next)
    }

    /// Serialize the value and reinterleave the stored comments.
    ///
    /// Walks the serialized lines; before each line, emits every comment
    /// whose key matches the next output position, so runs of consecutive
    /// comment lines come out together. Comments keyed past the final
    /// content line (trailing blanks and comments) are appended at the end.
    pub fn assemble(&self) -> Result<String> {
        let lines = formatted_lines(&self.value)?;
        let mut out: Vec<&str> = Vec::with_capacity(lines.len() + self.comments.len());
        let mut emitted = 0usize;
        for (i, line) in lines.iter().enumerate() {
            while let Some(comment) = self.comments.get(i + emitted) {
                out.push(comment);
                emitted += 1;
            }
            out.push(line);
        }
        let total = lines.len() + emitted;
        for (key, comment) in self.comments.iter() {
            if key >= total {
                out.push(comment);
            }
        }
        Ok(out.join("\n"))
    }

    fn reconcile_after_growth(&mut self, before: &[String], after: &[String]) -> Result<()> {
        let change = locate_change(before, after).ok_or_else(|| Error::OffsetInvariant {
            message: "mutation did not change the serialized config".to_string(),
        })?;
        if change.line_delta == 0 {
            return Err(Error::OffsetInvariant {
                message: format!(
                    "line {} changed but the line count did not grow",
                    change.first_changed_line
                ),
            });
        }
        let position = self.comments.document_position(change.first_changed_line);
        self.comments.shift_after(position, change.line_delta);
        Ok(())
    }
}
