//! The input dispatcher: matching, dispatch, and the read loop.

use crate::binding::{Binding, BindingTable, DEFAULT_BIND_MODE};
use crate::error::{InputError, InputResult};
use crate::event::{InputEvent, ReadlineCmd};
use crate::function;
use crate::host::Host;
use crate::stream::{CharSource, InputStream};
use keel_terminfo::KeyTable;
use tracing::{trace, warn};

/// Shell variable holding the current bind mode.
pub const BIND_MODE_VAR: &str = "keel_bind_mode";

/// Shell variable overriding 256-color detection.
pub const TERM256_VAR: &str = "keel_term256";

/// Terminal type used when the user's `TERM` cannot be set up.
pub const DEFAULT_TERM: &str = "ansi";

/// Capacity of the function argument stack.
pub const MAX_FUNCTION_ARGS: usize = 20;

/// Arguments captured for arity-bearing editor functions, handed to the
/// line editor out of band. Overflow is clamped.
#[derive(Debug, Default)]
struct ArgStack {
    args: Vec<char>,
}

impl ArgStack {
    fn push(&mut self, c: char) {
        debug_assert!(
            self.args.len() < MAX_FUNCTION_ARGS,
            "function argument stack overflow"
        );
        if self.args.len() < MAX_FUNCTION_ARGS {
            self.args.push(c);
        }
    }

    fn pop(&mut self) -> Option<char> {
        self.args.pop()
    }

    fn get(&self, index: usize) -> Option<char> {
        self.args.get(index).copied()
    }

    fn clear(&mut self) {
        self.args.clear();
    }
}

/// The keyboard input dispatcher.
///
/// Owns the binding table, the terminfo key table, the input stream and
/// the per-dispatch state, and turns raw characters into editor commands
/// or shell command evaluations. One dispatcher exists per shell session;
/// every entry point takes `&mut self`, which is what serializes access.
pub struct Dispatcher<H: Host> {
    host: H,
    stream: InputStream,
    bindings: BindingTable,
    terminfo: Option<KeyTable>,
    args: ArgStack,
    function_status: bool,
    supports_term256: bool,
    initialized: bool,
    in_readch: bool,
}

impl<H: Host> Dispatcher<H> {
    pub fn new(host: H, source: Box<dyn CharSource>) -> Self {
        Dispatcher {
            host,
            stream: InputStream::new(source),
            bindings: BindingTable::new(),
            terminfo: None,
            args: ArgStack::default(),
            function_status: true,
            supports_term256: false,
            initialized: false,
            in_readch: false,
        }
    }

    // --- lifecycle ---

    /// One-shot initialization: set up the terminal's key table (falling
    /// back to [`DEFAULT_TERM`] if the user's `TERM` is unsupported),
    /// infer 256-color support, and install the default bindings if the
    /// table is empty. Subsequent calls are no-ops.
    pub fn init(&mut self) -> InputResult<()> {
        if self.initialized {
            return Ok(());
        }
        self.initialized = true;

        let term = self.host.get_var("TERM");
        let table = match KeyTable::for_term(term.as_deref()) {
            Ok(table) => table,
            Err(err) => {
                warn!(%err, "could not set up terminal, trying '{DEFAULT_TERM}' instead");
                self.host.set_var("TERM", DEFAULT_TERM);
                KeyTable::for_term(Some(DEFAULT_TERM)).map_err(InputError::TerminalSetup)?
            }
        };
        self.terminfo = Some(table);
        self.update_term256();

        if self.bindings.is_empty() {
            let d = DEFAULT_BIND_MODE;
            self.bindings.add_one("", "self-insert", d, d);
            self.bindings.add_one("\n", "execute", d, d);
            self.bindings.add_one("\t", "complete", d, d);
            self.bindings.add_one("\u{3}", "commandline \"\"", d, d);
            self.bindings.add_one("\u{4}", "exit", d, d);
            self.bindings.add_one("\u{5}", "bind", d, d);
        }
        Ok(())
    }

    /// Tear down what [`Dispatcher::init`] set up. Bindings survive, so a
    /// later re-init keeps the user's table. Idempotent.
    pub fn destroy(&mut self) {
        if !self.initialized {
            return;
        }
        self.initialized = false;
        self.terminfo = None;
        self.stream.clear_pushback();
    }

    /// Infer 256-color support. An explicit override variable wins;
    /// otherwise the terminal name decides, with all xterms assumed
    /// capable except Apple's terminal.
    fn update_term256(&mut self) {
        let explicit = self.host.get_var(TERM256_VAR).filter(|v| !v.is_empty());
        let support = if let Some(value) = explicit {
            parse_bool_var(&value)
        } else if let Some(term) = self.host.get_var("TERM") {
            if term.contains("256color") {
                true
            } else if term.contains("xterm") {
                self.host.get_var("TERM_PROGRAM").as_deref() != Some("Apple_Terminal")
            } else {
                false
            }
        } else {
            false
        };
        self.supports_term256 = support;
    }

    /// Whether the terminal was inferred to support 256 colors.
    pub fn supports_term256(&self) -> bool {
        self.supports_term256
    }

    // --- mode ---

    /// The current bind mode, from the shell variable.
    pub fn bind_mode(&self) -> String {
        self.host
            .get_var(BIND_MODE_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_MODE.to_string())
    }

    /// Switch the bind mode by writing the shell variable.
    pub fn set_bind_mode(&mut self, mode: &str) {
        self.host.set_var(BIND_MODE_VAR, mode);
    }

    // --- function state ---

    /// Record the success of the most recently executed editor function;
    /// `and` chains consult this.
    pub fn set_function_status(&mut self, status: bool) {
        self.function_status = status;
    }

    /// A captured function argument, by position.
    pub fn function_arg(&self, index: usize) -> Option<char> {
        self.args.get(index)
    }

    /// Pop the topmost captured function argument.
    pub fn pop_function_arg(&mut self) -> Option<char> {
        self.args.pop()
    }

    // --- tables ---

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut BindingTable {
        &mut self.bindings
    }

    /// The terminal key table, once initialized.
    pub fn terminfo(&self) -> Option<&KeyTable> {
        self.terminfo.as_ref()
    }

    /// The escape sequence for a terminfo key name, initializing on
    /// demand.
    pub fn terminfo_sequence(&mut self, name: &str) -> InputResult<String> {
        let seq = self.key_table()?.sequence(name)?;
        Ok(String::from_utf8_lossy(seq).into_owned())
    }

    /// The terminfo key name generating a sequence, if any.
    pub fn terminfo_name_of(&mut self, sequence: &str) -> InputResult<Option<&'static str>> {
        Ok(self.key_table()?.name_for_sequence(sequence.as_bytes()))
    }

    /// All terminfo key names, optionally skipping undefined ones.
    pub fn terminfo_names(&mut self, skip_undefined: bool) -> InputResult<Vec<&'static str>> {
        Ok(self.key_table()?.names(skip_undefined))
    }

    fn key_table(&mut self) -> InputResult<&KeyTable> {
        self.init()?;
        // init either stored a table or returned the error above
        self.terminfo
            .as_ref()
            .ok_or(InputError::TerminalSetup(keel_terminfo::TerminfoError::Unset))
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Push an event back onto the input stream.
    pub fn unread(&mut self, ev: InputEvent) {
        self.stream.push(ev);
    }

    // --- the read loop ---

    /// Read one event for the line editor: an ordinary character, an
    /// editor command produced by a binding, the null sentinel, or EOF.
    ///
    /// `allow_commands` controls whether bindings to shell commands may
    /// be evaluated now; when false such a dispatch is deferred (the
    /// triggering keys are re-presented and `Null` returned) so the
    /// caller can retry from a safer context. Reentrant calls return
    /// `Null` immediately.
    pub fn readch(&mut self, allow_commands: bool) -> InputEvent {
        if self.in_readch {
            return InputEvent::Null;
        }
        self.in_readch = true;
        let ev = self.readch_inner(allow_commands);
        self.in_readch = false;
        ev
    }

    fn readch_inner(&mut self, allow_commands: bool) -> InputEvent {
        let mut allow_commands = allow_commands;
        'restart: loop {
            self.host.reset_interrupted();
            loop {
                let ev = self.stream.read(&mut self.host);
                match ev {
                    InputEvent::Eof => return ev,
                    InputEvent::Readline(ReadlineCmd::SelfInsert) => {
                        // Deliver the next event raw, whatever it is.
                        return self.stream.read(&mut self.host);
                    }
                    InputEvent::Readline(ReadlineCmd::And) => {
                        if !self.function_status {
                            // The previous function failed: discard the
                            // rest of the queued chain.
                            let mut next = self.stream.read(&mut self.host);
                            while next.is_reserved() && next != InputEvent::Eof {
                                next = self.stream.read(&mut self.host);
                            }
                            self.stream.push(next);
                        }
                        allow_commands = true;
                        continue 'restart;
                    }
                    InputEvent::Readline(_) | InputEvent::Null => return ev,
                    InputEvent::Char(_) => {
                        self.stream.push(ev);
                        self.execute_matching_or_generic(allow_commands);
                        // If a shell command ran, Null was pushed and the
                        // next iteration returns it; otherwise we either
                        // return the pushed function code or keep
                        // matching.
                    }
                }
            }
        }
    }

    /// Scan the table in match order for a binding in the current mode.
    /// Concrete sequences are tried first; the generic catch-all runs
    /// only if none matched. With no generic either, one character is
    /// dropped on the floor (EOF excepted).
    fn execute_matching_or_generic(&mut self, allow_commands: bool) {
        let bind_mode = self.bind_mode();
        let mappings: Vec<Binding> = self.bindings.iter().cloned().collect();
        let mut generic: Option<&Binding> = None;

        for m in &mappings {
            if m.mode() != bind_mode {
                continue;
            }
            if m.is_generic() {
                if generic.is_none() {
                    generic = Some(m);
                }
            } else if self.mapping_is_match(m.sequence()) {
                self.mapping_execute(m, allow_commands);
                return;
            }
        }

        if let Some(generic) = generic {
            self.mapping_execute(generic, allow_commands);
        } else {
            trace!("no binding matched, dropping one character");
            let ev = self.stream.read(&mut self.host);
            if ev == InputEvent::Eof {
                self.stream.push(ev);
            }
        }
    }

    /// Try to consume `sequence` from the stream. On failure everything
    /// read is pushed back, so the stream is exactly as it was.
    ///
    /// Continuation characters of a sequence that starts with a control
    /// character are read with the escape timeout; that is what tells an
    /// arrow key's sequence apart from a lone ESC press.
    fn mapping_is_match(&mut self, sequence: &str) -> bool {
        let chars: Vec<char> = sequence.chars().collect();
        for (j, &expected) in chars.iter().enumerate() {
            let timed = j > 0 && chars[0].is_control();
            let ev = if timed {
                match self.stream.read_timed(&mut self.host) {
                    Some(ev) => ev,
                    None => {
                        // Timed out: nothing read, restore the prefix.
                        for &c in chars[..j].iter().rev() {
                            self.stream.push(InputEvent::Char(c));
                        }
                        return false;
                    }
                }
            } else {
                self.stream.read(&mut self.host)
            };

            if ev != InputEvent::Char(expected) {
                self.stream.push(ev);
                for &c in chars[..j].iter().rev() {
                    self.stream.push(InputEvent::Char(c));
                }
                return false;
            }
        }
        true
    }

    /// Perform the action of a matched binding.
    ///
    /// Commands are walked in reverse twice: the first pass captures
    /// arguments for arity-bearing functions, the second pushes function
    /// codes back onto the stream (so the read loop delivers them in
    /// specification order) and evaluates shell commands. Editor-bound
    /// commands must not disturb the user-visible last status, so it is
    /// saved around the evaluation.
    fn mapping_execute(&mut self, m: &Binding, allow_commands: bool) {
        // Input functions succeed until one reports otherwise.
        self.function_status = true;

        for command in m.commands().iter().rev() {
            if let Some(code) = function::code_of(command) {
                for _ in 0..code.arity() {
                    let arg = self.stream.read(&mut self.host);
                    self.args.push(arg.to_wide());
                }
            }
        }

        for command in m.commands().iter().rev() {
            match function::code_of(command) {
                Some(code) => {
                    self.stream.push(InputEvent::Readline(code));
                }
                None if allow_commands => {
                    let saved_status = self.host.last_status();
                    self.host.eval(command);
                    self.host.set_last_status(saved_status);
                    self.stream.push(InputEvent::Null);
                }
                None => {
                    // Commands may not run now. Re-present the triggering
                    // keys for a later match, hand the caller a null, and
                    // leave the mode alone.
                    for c in m.sequence().chars().rev() {
                        self.stream.push(InputEvent::Char(c));
                    }
                    self.stream.push(InputEvent::Null);
                    self.args.clear();
                    return;
                }
            }
        }

        trace!(mode = m.sets_mode(), "dispatch complete");
        self.set_bind_mode(m.sets_mode());
    }
}

/// Truthiness of a shell variable value.
fn parse_bool_var(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::SourceEvent;
    use std::collections::{HashMap, VecDeque};

    /// One step of a scripted input source.
    #[derive(Clone, Copy)]
    enum Step {
        Ev(SourceEvent),
        Timeout,
    }

    struct ScriptedSource {
        steps: VecDeque<Step>,
    }

    impl ScriptedSource {
        fn of(text: &str) -> Box<Self> {
            Box::new(ScriptedSource {
                steps: text.chars().map(|c| Step::Ev(SourceEvent::Char(c))).collect(),
            })
        }

        fn steps(steps: Vec<Step>) -> Box<Self> {
            Box::new(ScriptedSource {
                steps: steps.into(),
            })
        }
    }

    impl CharSource for ScriptedSource {
        fn read_char(&mut self) -> SourceEvent {
            match self.steps.pop_front() {
                Some(Step::Ev(ev)) => ev,
                Some(Step::Timeout) => panic!("untimed read consumed a scripted timeout"),
                None => SourceEvent::Eof,
            }
        }

        fn read_char_timed(&mut self) -> Option<SourceEvent> {
            match self.steps.pop_front() {
                Some(Step::Ev(ev)) => Some(ev),
                Some(Step::Timeout) => None,
                None => Some(SourceEvent::Eof),
            }
        }
    }

    #[derive(Default)]
    struct TestHost {
        vars: HashMap<String, String>,
        evaluated: Vec<String>,
        status: i32,
    }

    impl Host for TestHost {
        fn get_var(&self, name: &str) -> Option<String> {
            self.vars.get(name).cloned()
        }
        fn set_var(&mut self, name: &str, value: &str) {
            self.vars.insert(name.to_string(), value.to_string());
        }
        fn eval(&mut self, command: &str) {
            self.evaluated.push(command.to_string());
            self.status = 1;
        }
        fn last_status(&self) -> i32 {
            self.status
        }
        fn set_last_status(&mut self, status: i32) {
            self.status = status;
        }
    }

    fn dispatcher(term: &str, source: Box<dyn CharSource>) -> Dispatcher<TestHost> {
        let mut host = TestHost::default();
        host.set_var("TERM", term);
        Dispatcher::new(host, source)
    }

    #[test]
    fn test_init_installs_defaults_once() {
        let mut d = dispatcher("xterm", ScriptedSource::of(""));
        d.init().unwrap();
        assert_eq!(d.bindings().len(), 6);
        assert!(d.bindings().get("").is_some());
        assert!(d.bindings().get("\n").is_some());

        // A second init must not disturb user changes.
        d.bindings_mut().erase("\t", None);
        d.init().unwrap();
        assert_eq!(d.bindings().len(), 5);
    }

    #[test]
    fn test_init_falls_back_to_ansi() {
        let mut d = dispatcher("dumb", ScriptedSource::of(""));
        d.init().unwrap();
        assert_eq!(d.host().get_var("TERM").as_deref(), Some(DEFAULT_TERM));
        assert_eq!(d.terminfo().unwrap().term(), DEFAULT_TERM);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut d = dispatcher("xterm", ScriptedSource::of(""));
        d.init().unwrap();
        d.destroy();
        assert!(d.terminfo().is_none());
        d.destroy();
        d.init().unwrap();
        assert!(d.terminfo().is_some());
    }

    #[test]
    fn test_term256_inference() {
        let mut d = dispatcher("xterm-256color", ScriptedSource::of(""));
        d.init().unwrap();
        assert!(d.supports_term256());

        let mut d = dispatcher("linux", ScriptedSource::of(""));
        d.init().unwrap();
        assert!(!d.supports_term256());

        // All xterms count, except Apple's terminal.
        let mut d = dispatcher("xterm", ScriptedSource::of(""));
        d.host_mut().set_var("TERM_PROGRAM", "Apple_Terminal");
        d.init().unwrap();
        assert!(!d.supports_term256());

        // The override variable beats inference.
        let mut d = dispatcher("linux", ScriptedSource::of(""));
        d.host_mut().set_var(TERM256_VAR, "1");
        d.init().unwrap();
        assert!(d.supports_term256());
    }

    #[test]
    fn test_matcher_restores_stream_on_mismatch() {
        let mut d = dispatcher("xterm", ScriptedSource::of("abd"));
        assert!(!d.mapping_is_match("abc"));
        // The stream must read back exactly as scripted.
        assert_eq!(d.stream.read(&mut d.host), InputEvent::Char('a'));
        assert_eq!(d.stream.read(&mut d.host), InputEvent::Char('b'));
        assert_eq!(d.stream.read(&mut d.host), InputEvent::Char('d'));
    }

    #[test]
    fn test_matcher_match_consumes_sequence() {
        let mut d = dispatcher("xterm", ScriptedSource::of("abc!"));
        assert!(d.mapping_is_match("abc"));
        assert_eq!(d.stream.read(&mut d.host), InputEvent::Char('!'));
    }

    #[test]
    fn test_matcher_timeout_restores_prefix() {
        // A lone ESC: the continuation read times out, and only the ESC
        // goes back on the stream.
        let steps = vec![
            Step::Ev(SourceEvent::Char('\u{1b}')),
            Step::Timeout,
        ];
        let mut d = dispatcher("xterm", ScriptedSource::steps(steps));
        assert!(!d.mapping_is_match("\u{1b}[A"));
        assert_eq!(d.stream.read(&mut d.host), InputEvent::Char('\u{1b}'));
        assert_eq!(d.stream.read(&mut d.host), InputEvent::Eof);
    }

    #[test]
    fn test_matcher_printable_prefix_reads_untimed() {
        // A sequence not starting with a control character never uses
        // the timeout; the scripted source panics if it sees one.
        let mut d = dispatcher("xterm", ScriptedSource::of("gx"));
        assert!(!d.mapping_is_match("gg"));
        assert_eq!(d.stream.read(&mut d.host), InputEvent::Char('g'));
        assert_eq!(d.stream.read(&mut d.host), InputEvent::Char('x'));
    }

    #[test]
    fn test_terminfo_lookups_init_on_demand() {
        let mut d = dispatcher("xterm", ScriptedSource::of(""));
        let seq = d.terminfo_sequence("key_up").unwrap();
        assert_eq!(seq, "\u{1b}OA");
        assert_eq!(d.terminfo_name_of("\u{1b}OA").unwrap(), Some("key_up"));
        assert!(d.terminfo_names(true).unwrap().contains(&"key_up"));
        assert!(matches!(
            d.terminfo_sequence("key_bogus"),
            Err(InputError::Terminfo(_))
        ));
    }

    #[test]
    fn test_arg_stack_clamps_at_capacity() {
        let mut args = ArgStack::default();
        for _ in 0..MAX_FUNCTION_ARGS {
            args.push('x');
        }
        assert_eq!(args.get(MAX_FUNCTION_ARGS - 1), Some('x'));
        assert_eq!(args.get(MAX_FUNCTION_ARGS), None);
    }

    #[test]
    fn test_bind_mode_round_trip() {
        let mut d = dispatcher("xterm", ScriptedSource::of(""));
        assert_eq!(d.bind_mode(), DEFAULT_BIND_MODE);
        d.set_bind_mode("visual");
        assert_eq!(d.bind_mode(), "visual");
        assert_eq!(
            d.host().get_var(BIND_MODE_VAR).as_deref(),
            Some("visual")
        );
    }
}
