//! The seam between the dispatcher and the rest of the shell.

/// Services the dispatcher needs from the embedding shell: the variable
/// store, the command evaluator with its last-status state, and the hooks
/// the interrupt path touches (pending events, background jobs, the
/// reader's interrupted flag).
///
/// The event and job hooks default to no-ops so hosts without those
/// subsystems stay small.
pub trait Host {
    /// Read a shell variable.
    fn get_var(&self, name: &str) -> Option<String>;

    /// Set a shell variable, visible to the whole session.
    fn set_var(&mut self, name: &str, value: &str);

    /// Evaluate a shell command bound to a key.
    fn eval(&mut self, command: &str);

    /// The status of the last command the user can observe as `$status`.
    fn last_status(&self) -> i32;

    /// Overwrite the observable last status.
    fn set_last_status(&mut self, status: i32);

    /// Fire any pending shell events.
    fn fire_events(&mut self) {}

    /// Reap finished background jobs; returns whether any were reaped.
    fn reap_jobs(&mut self) -> bool {
        false
    }

    /// Ask the line editor to repaint the prompt.
    fn schedule_repaint(&mut self) {}

    /// Whether the line editor's read was interrupted by the user.
    fn reading_interrupted(&mut self) -> bool {
        false
    }

    /// Clear the line editor's interrupted flag.
    fn reset_interrupted(&mut self) {}
}
