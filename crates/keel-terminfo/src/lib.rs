//! # keel-terminfo
//!
//! Name → escape-sequence registry for special keys, used by the keel
//! shell as the symbolic source of key sequences for bindings.
//!
//! The registry covers the classic `key_*` terminfo capability names
//! (`key_left`, `key_f1`, …). Sequences are resolved against a built-in
//! database of terminal families selected from the terminal name; names
//! the selected terminal does not define remain present but undefined, so
//! callers can distinguish "no such key" from "this terminal has no
//! sequence for it".

mod database;
mod names;

pub use names::KEY_NAMES;

use thiserror::Error;
use tracing::debug;

/// Errors from key registry lookups and terminal selection.
#[derive(Debug, Error)]
pub enum TerminfoError {
    /// The terminal name does not match any built-in family.
    #[error("terminal type '{0}' is not supported")]
    UnknownTerminal(String),

    /// No terminal name was provided at all.
    #[error("no terminal type is set")]
    Unset,

    /// The key name is not a known capability name.
    #[error("unknown key name '{0}'")]
    UnknownKey(String),

    /// The key name is known but the terminal defines no sequence for it.
    #[error("key '{0}' has no sequence for this terminal")]
    UndefinedKey(String),
}

/// A single entry in the key table.
#[derive(Debug, Clone, Copy)]
struct KeyEntry {
    /// Capability name, e.g. `key_left`.
    name: &'static str,
    /// Escape sequence the terminal generates, when it defines one.
    seq: Option<&'static [u8]>,
}

/// The key table for one terminal: every known capability name, each with
/// the sequence the terminal generates for it (or nothing).
#[derive(Debug, Clone)]
pub struct KeyTable {
    term: String,
    entries: Vec<KeyEntry>,
}

impl KeyTable {
    /// Build the key table for the given terminal name.
    ///
    /// Fails with [`TerminfoError::Unset`] when no name is given, and with
    /// [`TerminfoError::UnknownTerminal`] when the name matches no
    /// built-in family.
    pub fn for_term(term: Option<&str>) -> Result<Self, TerminfoError> {
        let term = match term {
            Some(t) if !t.is_empty() => t,
            _ => return Err(TerminfoError::Unset),
        };
        let family = database::family_for(term)
            .ok_or_else(|| TerminfoError::UnknownTerminal(term.to_string()))?;
        debug!(term, family = family.name, "selected terminal family");

        let entries = KEY_NAMES
            .iter()
            .map(|&name| KeyEntry {
                name,
                seq: family.sequence(name),
            })
            .collect();
        Ok(KeyTable {
            term: term.to_string(),
            entries,
        })
    }

    /// The terminal name this table was built for.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Look up the sequence for a key name.
    ///
    /// Distinguishes an unknown name ([`TerminfoError::UnknownKey`]) from
    /// a known name the terminal leaves undefined
    /// ([`TerminfoError::UndefinedKey`]).
    pub fn sequence(&self, name: &str) -> Result<&'static [u8], TerminfoError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| TerminfoError::UnknownKey(name.to_string()))?;
        entry
            .seq
            .ok_or_else(|| TerminfoError::UndefinedKey(name.to_string()))
    }

    /// Reverse lookup: the key name that generates the given sequence.
    pub fn name_for_sequence(&self, seq: &[u8]) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.seq == Some(seq))
            .map(|e| e.name)
    }

    /// All key names, optionally skipping ones this terminal leaves
    /// undefined.
    pub fn names(&self, skip_undefined: bool) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|e| !skip_undefined || e.seq.is_some())
            .map(|e| e.name)
            .collect()
    }

    /// Iterate over `(name, sequence)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&'static [u8]>)> + '_ {
        self.entries.iter().map(|e| (e.name, e.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xterm_arrow_keys() {
        let table = KeyTable::for_term(Some("xterm-256color")).unwrap();
        assert_eq!(table.sequence("key_up").unwrap(), b"\x1bOA");
        assert_eq!(table.sequence("key_left").unwrap(), b"\x1bOD");
    }

    #[test]
    fn test_unknown_key_name() {
        let table = KeyTable::for_term(Some("xterm")).unwrap();
        assert!(matches!(
            table.sequence("key_bogus"),
            Err(TerminfoError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_undefined_key() {
        // The ansi family defines no function keys beyond the basics.
        let table = KeyTable::for_term(Some("ansi")).unwrap();
        assert!(matches!(
            table.sequence("key_f5"),
            Err(TerminfoError::UndefinedKey(_))
        ));
    }

    #[test]
    fn test_unknown_terminal() {
        assert!(matches!(
            KeyTable::for_term(Some("dumb")),
            Err(TerminfoError::UnknownTerminal(_))
        ));
        assert!(matches!(KeyTable::for_term(None), Err(TerminfoError::Unset)));
        assert!(matches!(
            KeyTable::for_term(Some("")),
            Err(TerminfoError::Unset)
        ));
    }

    #[test]
    fn test_reverse_lookup() {
        let table = KeyTable::for_term(Some("xterm")).unwrap();
        assert_eq!(table.name_for_sequence(b"\x1b[3~"), Some("key_dc"));
        assert_eq!(table.name_for_sequence(b"\x1b[99z"), None);
    }

    #[test]
    fn test_names_skip_undefined() {
        let table = KeyTable::for_term(Some("ansi")).unwrap();
        let all = table.names(false);
        let defined = table.names(true);
        assert_eq!(all.len(), KEY_NAMES.len());
        assert!(defined.len() < all.len());
        assert!(defined.contains(&"key_left"));
        assert!(!defined.contains(&"key_f5"));
    }
}
