//! Scripted doubles for driving the dispatcher in tests.

#![allow(dead_code)]

use keel_input::{CharSource, Dispatcher, Host, SourceEvent};
use std::collections::{HashMap, VecDeque};

/// One step of a scripted input source.
#[derive(Clone, Copy, Debug)]
pub enum Step {
    /// The terminal produced a character.
    Char(char),
    /// A timed read expired before anything arrived.
    Timeout,
    /// A blocking read was interrupted by a signal.
    Interrupt,
}

/// A [`CharSource`] that replays a fixed script, then reports EOF.
pub struct ScriptedSource {
    steps: VecDeque<Step>,
}

impl ScriptedSource {
    pub fn text(text: &str) -> Box<Self> {
        Self::steps(text.chars().map(Step::Char).collect())
    }

    pub fn steps(steps: Vec<Step>) -> Box<Self> {
        Box::new(ScriptedSource {
            steps: steps.into(),
        })
    }
}

impl CharSource for ScriptedSource {
    fn read_char(&mut self) -> SourceEvent {
        match self.steps.pop_front() {
            Some(Step::Char(c)) => SourceEvent::Char(c),
            Some(Step::Interrupt) => SourceEvent::Interrupted,
            Some(Step::Timeout) => panic!("untimed read consumed a scripted timeout"),
            None => SourceEvent::Eof,
        }
    }

    fn read_char_timed(&mut self) -> Option<SourceEvent> {
        match self.steps.pop_front() {
            Some(Step::Char(c)) => Some(SourceEvent::Char(c)),
            Some(Step::Interrupt) => Some(SourceEvent::Interrupted),
            Some(Step::Timeout) => None,
            None => Some(SourceEvent::Eof),
        }
    }
}

/// A [`Host`] that records everything the dispatcher does to it.
#[derive(Default)]
pub struct RecordingHost {
    pub vars: HashMap<String, String>,
    pub evaluated: Vec<String>,
    pub status: i32,
    pub interrupted: bool,
    pub interrupt_resets: usize,
    pub events_fired: usize,
    pub repaints: usize,
}

impl Host for RecordingHost {
    fn get_var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn set_var(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    fn eval(&mut self, command: &str) {
        self.evaluated.push(command.to_string());
        // Commands leave a status behind, like real ones do.
        self.status = 1;
    }

    fn last_status(&self) -> i32 {
        self.status
    }

    fn set_last_status(&mut self, status: i32) {
        self.status = status;
    }

    fn fire_events(&mut self) {
        self.events_fired += 1;
    }

    fn schedule_repaint(&mut self) {
        self.repaints += 1;
    }

    fn reading_interrupted(&mut self) -> bool {
        self.interrupted
    }

    fn reset_interrupted(&mut self) {
        self.interrupted = false;
        self.interrupt_resets += 1;
    }
}

/// An initialized dispatcher over a text script, with the default
/// bindings installed.
pub fn dispatcher(term: &str, text: &str) -> Dispatcher<RecordingHost> {
    dispatcher_with_steps(term, text.chars().map(Step::Char).collect())
}

/// Same, but with explicit script steps.
pub fn dispatcher_with_steps(term: &str, steps: Vec<Step>) -> Dispatcher<RecordingHost> {
    let mut host = RecordingHost::default();
    host.vars.insert("TERM".to_string(), term.to_string());
    let mut d = Dispatcher::new(host, ScriptedSource::steps(steps));
    d.init().expect("terminal setup");
    d
}
