//! The input stream: a character source with push-back.
//!
//! The low-level reader sits behind [`CharSource`] and yields decoded
//! wide characters one at a time. [`InputStream`] wraps it with the LIFO
//! push-back stack the matcher and dispatcher need, and with the policy
//! for reads interrupted by a signal.

use crate::event::InputEvent;
use crate::host::Host;

/// What the low-level reader produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceEvent {
    /// A decoded wide character. Values in the reserved range are legal
    /// and decode to the corresponding directive.
    Char(char),
    /// The underlying descriptor is closed.
    Eof,
    /// The blocking read was interrupted by a signal.
    Interrupted,
}

/// A blocking source of decoded wide characters.
///
/// The timed variant applies the short inter-byte timeout used to tell an
/// escape sequence from a lone ESC keypress, and reports expiry as
/// `None`, consuming nothing.
pub trait CharSource {
    /// Block until the next character arrives.
    fn read_char(&mut self) -> SourceEvent;

    /// Wait for the next character, giving up after the escape timeout.
    fn read_char_timed(&mut self) -> Option<SourceEvent>;
}

/// A [`CharSource`] with a LIFO push-back stack in front of it.
///
/// Pushed events are drained before the source is consulted again, so
/// restoring a partially-consumed sequence is a matter of pushing it back
/// in reverse.
pub struct InputStream {
    source: Box<dyn CharSource>,
    pushback: Vec<InputEvent>,
}

impl InputStream {
    pub fn new(source: Box<dyn CharSource>) -> Self {
        InputStream {
            source,
            pushback: Vec::new(),
        }
    }

    /// Push an event back onto the stream. The next read returns it.
    pub fn push(&mut self, ev: InputEvent) {
        self.pushback.push(ev);
    }

    /// Whether any pushed-back events are waiting.
    pub fn has_lookahead(&self) -> bool {
        !self.pushback.is_empty()
    }

    /// Drop all pushed-back events.
    pub fn clear_pushback(&mut self) {
        self.pushback.clear();
    }

    /// Read the next event, blocking until one arrives.
    pub fn read(&mut self, host: &mut dyn Host) -> InputEvent {
        if let Some(ev) = self.pushback.pop() {
            return ev;
        }
        match self.source.read_char() {
            SourceEvent::Char(c) => InputEvent::from_wide(c),
            SourceEvent::Eof => InputEvent::Eof,
            SourceEvent::Interrupted => on_interrupt(host),
        }
    }

    /// Read the next event with the escape timeout applied. Returns
    /// `None` when the timeout expires; nothing was consumed.
    pub fn read_timed(&mut self, host: &mut dyn Host) -> Option<InputEvent> {
        if let Some(ev) = self.pushback.pop() {
            return Some(ev);
        }
        match self.source.read_char_timed()? {
            SourceEvent::Char(c) => Some(InputEvent::from_wide(c)),
            SourceEvent::Eof => Some(InputEvent::Eof),
            SourceEvent::Interrupted => Some(on_interrupt(host)),
        }
    }
}

/// An interrupted read gives the shell a chance to catch up: fire pending
/// events, reap finished jobs (repainting if any were), then surface
/// either the character a Ctrl-C would have produced or the null
/// sentinel, depending on whether the line editor saw an interrupt.
fn on_interrupt(host: &mut dyn Host) -> InputEvent {
    host.fire_events();
    if host.reap_jobs() {
        host.schedule_repaint();
    }
    if host.reading_interrupted() {
        InputEvent::Char('\u{3}')
    } else {
        InputEvent::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct FakeSource {
        events: VecDeque<SourceEvent>,
    }

    impl FakeSource {
        fn new(events: &[SourceEvent]) -> Box<Self> {
            Box::new(FakeSource {
                events: events.iter().copied().collect(),
            })
        }
    }

    impl CharSource for FakeSource {
        fn read_char(&mut self) -> SourceEvent {
            self.events.pop_front().unwrap_or(SourceEvent::Eof)
        }

        fn read_char_timed(&mut self) -> Option<SourceEvent> {
            Some(self.read_char())
        }
    }

    struct FakeHost {
        interrupted: bool,
        events_fired: usize,
        jobs_to_reap: bool,
        repaints: usize,
    }

    impl FakeHost {
        fn new() -> Self {
            FakeHost {
                interrupted: false,
                events_fired: 0,
                jobs_to_reap: false,
                repaints: 0,
            }
        }
    }

    impl Host for FakeHost {
        fn get_var(&self, _name: &str) -> Option<String> {
            None
        }
        fn set_var(&mut self, _name: &str, _value: &str) {}
        fn eval(&mut self, _command: &str) {}
        fn last_status(&self) -> i32 {
            0
        }
        fn set_last_status(&mut self, _status: i32) {}
        fn fire_events(&mut self) {
            self.events_fired += 1;
        }
        fn reap_jobs(&mut self) -> bool {
            self.jobs_to_reap
        }
        fn schedule_repaint(&mut self) {
            self.repaints += 1;
        }
        fn reading_interrupted(&mut self) -> bool {
            self.interrupted
        }
    }

    #[test]
    fn test_pushback_is_lifo() {
        let mut host = FakeHost::new();
        let mut stream = InputStream::new(FakeSource::new(&[SourceEvent::Char('z')]));
        stream.push(InputEvent::Char('a'));
        stream.push(InputEvent::Char('b'));
        assert_eq!(stream.read(&mut host), InputEvent::Char('b'));
        assert_eq!(stream.read(&mut host), InputEvent::Char('a'));
        assert_eq!(stream.read(&mut host), InputEvent::Char('z'));
        assert_eq!(stream.read(&mut host), InputEvent::Eof);
    }

    #[test]
    fn test_pushback_accepts_directives() {
        let mut host = FakeHost::new();
        let mut stream = InputStream::new(FakeSource::new(&[]));
        stream.push(InputEvent::Null);
        stream.push(InputEvent::Readline(crate::event::ReadlineCmd::Execute));
        assert_eq!(
            stream.read(&mut host),
            InputEvent::Readline(crate::event::ReadlineCmd::Execute)
        );
        assert_eq!(stream.read(&mut host), InputEvent::Null);
    }

    #[test]
    fn test_reserved_wide_values_decode() {
        let mut host = FakeHost::new();
        let wide = InputEvent::Readline(crate::event::ReadlineCmd::UpLine).to_wide();
        let mut stream = InputStream::new(FakeSource::new(&[SourceEvent::Char(wide)]));
        assert_eq!(
            stream.read(&mut host),
            InputEvent::Readline(crate::event::ReadlineCmd::UpLine)
        );
    }

    #[test]
    fn test_interrupt_without_cancel_yields_null() {
        let mut host = FakeHost::new();
        host.jobs_to_reap = true;
        let mut stream = InputStream::new(FakeSource::new(&[SourceEvent::Interrupted]));
        assert_eq!(stream.read(&mut host), InputEvent::Null);
        assert_eq!(host.events_fired, 1);
        assert_eq!(host.repaints, 1);
    }

    #[test]
    fn test_interrupt_with_cancel_yields_ctrl_c() {
        let mut host = FakeHost::new();
        host.interrupted = true;
        let mut stream = InputStream::new(FakeSource::new(&[SourceEvent::Interrupted]));
        assert_eq!(stream.read(&mut host), InputEvent::Char('\u{3}'));
        assert_eq!(host.repaints, 0);
    }
}
