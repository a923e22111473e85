//! Binding configuration files.
//!
//! Users declare bindings in a TOML document of `[[binding]]` tables.
//! The triggering sequence is given either literally (`seq`) or as a
//! terminfo key name (`key`) resolved through the terminal's key table
//! when the file is applied:
//!
//! ```toml
//! [[binding]]
//! key = "key_up"
//! commands = ["up-line"]
//!
//! [[binding]]
//! seq = ""
//! commands = ["history-search-backward"]
//! mode = "default"
//! sets_mode = "default"
//! ```

use crate::binding::DEFAULT_BIND_MODE;
use crate::dispatcher::Dispatcher;
use crate::error::{InputError, InputResult};
use crate::escape::escape_sequence;
use crate::host::Host;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One `[[binding]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingEntry {
    /// Literal character sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<String>,
    /// Terminfo key name, resolved at apply time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Editor function names and/or shell commands.
    pub commands: Vec<String>,
    /// Mode the binding is eligible in.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Mode to switch to after dispatch.
    #[serde(default = "default_mode")]
    pub sets_mode: String,
}

fn default_mode() -> String {
    DEFAULT_BIND_MODE.to_string()
}

/// A parsed bindings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindingsFile {
    #[serde(default, rename = "binding")]
    pub bindings: Vec<BindingEntry>,
}

impl BindingsFile {
    /// Parse a bindings document.
    pub fn parse(content: &str) -> InputResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a bindings file from disk.
    pub fn load(path: &Path) -> InputResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Apply every entry to the dispatcher's binding table, in file
    /// order. Terminfo key names are resolved against the current
    /// terminal; an unresolvable entry aborts the apply.
    pub fn apply<H: Host>(&self, dispatcher: &mut Dispatcher<H>) -> InputResult<()> {
        for entry in &self.bindings {
            if entry.commands.is_empty() {
                return Err(InputError::Config(format!(
                    "binding '{}' has no commands",
                    escape_sequence(entry.seq.as_deref().unwrap_or_default())
                )));
            }
            let sequence = match (&entry.seq, &entry.key) {
                (Some(seq), None) => seq.clone(),
                (None, Some(key)) => dispatcher.terminfo_sequence(key)?,
                _ => {
                    return Err(InputError::Config(
                        "a binding takes exactly one of `seq` or `key`".to_string(),
                    ))
                }
            };
            dispatcher.bindings_mut().add(
                &sequence,
                entry.commands.clone(),
                &entry.mode,
                &entry.sets_mode,
            );
        }
        Ok(())
    }
}
