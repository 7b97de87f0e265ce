//! Declarative menu tree.
//!
//! A plugin describes its selectable actions as a tree of [`MenuOption`]s
//! with typed parameter metadata. The tree is presentation-agnostic: the
//! host walks it, prompts however it likes, and eventually executes a
//! leaf command. Parents with a submenu are entry points only; selecting
//! one never executes anything plugin-side.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{HostError, Result};

/// Typed metadata for one command parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name, the key the host sends in `CommandRequest::parameters`.
    pub name: String,
    /// Human-readable prompt text.
    pub description: String,
    /// Required parameters absent or empty in a request are rejected
    /// before the handler runs.
    #[serde(default)]
    pub required: bool,
}

impl ParameterInfo {
    /// A required parameter.
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: true,
        }
    }

    /// An optional parameter.
    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: false,
        }
    }
}

/// One selectable action, possibly with a nested submenu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    /// Label shown by the host.
    pub label: String,
    /// Command identifier; unique within its sibling set, and for leaves
    /// unique across the whole tree.
    pub command: String,
    /// Parameters the command accepts, in prompt order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterInfo>,
    /// Nested options. Empty for leaf (directly executable) commands.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submenu: Vec<MenuOption>,
}

impl MenuOption {
    /// Create a leaf option with no parameters.
    pub fn new(label: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            command: command.into(),
            parameters: Vec::new(),
            submenu: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn parameter(mut self, parameter: ParameterInfo) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Append a nested option, turning this option into a submenu entry
    /// point.
    pub fn submenu(mut self, option: MenuOption) -> Self {
        self.submenu.push(option);
        self
    }

    /// Whether this option is directly executable.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.submenu.is_empty()
    }

    /// Names of the required parameters, in declaration order.
    pub fn required_parameters(&self) -> Vec<String> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.clone())
            .collect()
    }
}

/// Validate a menu tree.
///
/// Checks that no sibling set repeats a command identifier and that leaf
/// identifiers are unique across the whole tree.
pub fn validate(options: &[MenuOption]) -> Result<()> {
    let mut leaf_commands = HashSet::new();
    validate_level(options, &mut leaf_commands)
}

fn validate_level<'a>(
    options: &'a [MenuOption],
    leaf_commands: &mut HashSet<&'a str>,
) -> Result<()> {
    let mut siblings = HashSet::new();
    for option in options {
        if !siblings.insert(option.command.as_str()) {
            return Err(HostError::InvalidMenu(format!(
                "command `{}` appears twice in one sibling set",
                option.command
            )));
        }
        if option.is_leaf() {
            if !leaf_commands.insert(option.command.as_str()) {
                return Err(HostError::InvalidMenu(format!(
                    "leaf command `{}` is not unique across the menu",
                    option.command
                )));
            }
        } else {
            validate_level(&option.submenu, leaf_commands)?;
        }
    }
    Ok(())
}

/// Flatten the tree into its leaf options, depth-first.
pub fn leaves(options: &[MenuOption]) -> Vec<&MenuOption> {
    let mut out = Vec::new();
    collect_leaves(options, &mut out);
    out
}

fn collect_leaves<'a>(options: &'a [MenuOption], out: &mut Vec<&'a MenuOption>) {
    for option in options {
        if option.is_leaf() {
            out.push(option);
        } else {
            collect_leaves(&option.submenu, out);
        }
    }
}
