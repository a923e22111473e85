//! The key binding table.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The mode bindings belong to unless another is named.
pub const DEFAULT_BIND_MODE: &str = "default";

/// A single key binding: a character sequence that, in a given mode,
/// triggers a list of commands and switches to a new mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    sequence: String,
    commands: Vec<String>,
    mode: String,
    sets_mode: String,
    specification_order: u32,
}

impl Binding {
    /// The triggering character sequence. Empty for the generic
    /// catch-all binding of its mode.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// The commands to run: editor function names and/or shell commands.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// The mode in which this binding is eligible.
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// The mode to switch to after a completed dispatch.
    pub fn sets_mode(&self) -> &str {
        &self.sets_mode
    }

    /// Stamp assigned at first insertion; stable across updates.
    pub fn specification_order(&self) -> u32 {
        self.specification_order
    }

    /// Whether this is the generic catch-all of its mode.
    pub fn is_generic(&self) -> bool {
        self.sequence.is_empty()
    }

    fn sequence_len(&self) -> usize {
        self.sequence.chars().count()
    }
}

/// An ordered collection of bindings.
///
/// The list is kept sorted descending by sequence length so matching
/// tries longer sequences first; among equal lengths, position reflects
/// insertion time. User-facing enumeration instead follows the order
/// bindings were first specified in.
#[derive(Debug, Default)]
pub struct BindingTable {
    bindings: Vec<Binding>,
    last_specification_order: u32,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, or update the existing one for the same
    /// `(sequence, mode)` pair in place, keeping its position and
    /// specification order.
    pub fn add(&mut self, sequence: &str, commands: Vec<String>, mode: &str, sets_mode: &str) {
        debug_assert!(!commands.is_empty(), "a binding needs at least one command");
        if let Some(m) = self
            .bindings
            .iter_mut()
            .find(|m| m.sequence == sequence && m.mode == mode)
        {
            m.commands = commands;
            m.sets_mode = sets_mode.to_string();
            return;
        }

        self.last_specification_order += 1;
        let binding = Binding {
            sequence: sequence.to_string(),
            commands,
            mode: mode.to_string(),
            sets_mode: sets_mode.to_string(),
            specification_order: self.last_specification_order,
        };
        debug!(sequence, mode, "adding binding");

        // Keep descending length order so longer sequences shadow their
        // prefixes during matching.
        let len = binding.sequence_len();
        let pos = self.bindings.partition_point(|m| m.sequence_len() > len);
        self.bindings.insert(pos, binding);
    }

    /// Add a binding with a single command.
    pub fn add_one(&mut self, sequence: &str, command: &str, mode: &str, sets_mode: &str) {
        self.add(sequence, vec![command.to_string()], mode, sets_mode);
    }

    /// Remove the first binding with this sequence, in the given mode or
    /// in any mode. Returns whether one was removed.
    pub fn erase(&mut self, sequence: &str, mode: Option<&str>) -> bool {
        let pos = self
            .bindings
            .iter()
            .position(|m| m.sequence == sequence && mode.map_or(true, |md| md == m.mode));
        match pos {
            Some(i) => {
                debug!(sequence, "erasing binding");
                self.bindings.remove(i);
                true
            }
            None => false,
        }
    }

    /// The first binding with this sequence, regardless of mode.
    pub fn get(&self, sequence: &str) -> Option<&Binding> {
        self.bindings.iter().find(|m| m.sequence == sequence)
    }

    /// Binding sequences in the order the user specified them.
    pub fn names(&self) -> Vec<String> {
        let mut list: Vec<&Binding> = self.bindings.iter().collect();
        list.sort_by_key(|m| m.specification_order);
        list.into_iter().map(|m| m.sequence.clone()).collect()
    }

    /// Iterate in match order (descending sequence length).
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
