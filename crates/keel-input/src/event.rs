//! Input events and their wide-character encoding.
//!
//! The dispatcher communicates with the line editor through in-band wide
//! values: ordinary characters, plus a reserved range of codes in the
//! Unicode private use area that carry editor commands and the
//! end-of-file and null sentinels. In-process the values are carried as
//! the tagged [`InputEvent`]; at the reader boundary they convert
//! losslessly to and from the wide encoding.

use crate::function;

/// First wide value of the reserved range (the null sentinel).
pub const RESERVED_MIN: char = '\u{F700}';

/// Last wide value of the reserved range (the final editor command).
pub const RESERVED_MAX: char = '\u{F731}';

const NULL_WIDE: u32 = 0xF700;
const EOF_WIDE: u32 = 0xF701;
const FIRST_COMMAND_WIDE: u32 = 0xF702;

const _: () = assert!(
    FIRST_COMMAND_WIDE + ReadlineCmd::COUNT as u32 - 1 == RESERVED_MAX as u32,
    "reserved range must cover exactly the editor command table"
);

/// A readline-style editor command, delivered to the line editor when a
/// binding names the corresponding editor function.
///
/// Variants are declared in registry order; the discriminant is the
/// command's offset within the reserved wide range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ReadlineCmd {
    BeginningOfLine,
    EndOfLine,
    ForwardChar,
    BackwardChar,
    ForwardWord,
    BackwardWord,
    HistorySearchBackward,
    HistorySearchForward,
    DeleteChar,
    BackwardDeleteChar,
    KillLine,
    Yank,
    YankPop,
    Complete,
    CompleteAndSearch,
    BeginningOfHistory,
    EndOfHistory,
    BackwardKillLine,
    KillWholeLine,
    KillWord,
    BackwardKillWord,
    BackwardKillPathComponent,
    HistoryTokenSearchBackward,
    HistoryTokenSearchForward,
    SelfInsert,
    TransposeChars,
    TransposeWords,
    UpcaseWord,
    DowncaseWord,
    CapitalizeWord,
    ViArgDigit,
    ViDeleteTo,
    Execute,
    BeginningOfBuffer,
    EndOfBuffer,
    Repaint,
    ForceRepaint,
    UpLine,
    DownLine,
    SuppressAutosuggestion,
    AcceptAutosuggestion,
    BeginSelection,
    EndSelection,
    KillSelection,
    ForwardJump,
    BackwardJump,
    And,
    Cancel,
}

impl ReadlineCmd {
    /// Number of editor commands.
    pub const COUNT: usize = 48;

    /// How many raw characters the command captures as arguments
    /// immediately after being identified.
    pub fn arity(self) -> usize {
        match self {
            ReadlineCmd::ForwardJump | ReadlineCmd::BackwardJump => 1,
            _ => 0,
        }
    }
}

/// One event on the input stream.
///
/// `Char` never carries a value from the reserved range; [`InputEvent::from_wide`]
/// canonicalizes those into the tagged variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// An ordinary character typed by the user.
    Char(char),
    /// An editor command directed at the line editor.
    Readline(ReadlineCmd),
    /// The input source is closed.
    Eof,
    /// No-op sentinel: something happened, nothing to deliver.
    Null,
}

impl InputEvent {
    /// Whether this event is an in-band directive rather than text.
    pub fn is_reserved(self) -> bool {
        !matches!(self, InputEvent::Char(_))
    }

    /// Encode as a wide character for the reader boundary.
    pub fn to_wide(self) -> char {
        let v = match self {
            InputEvent::Char(c) => return c,
            InputEvent::Null => NULL_WIDE,
            InputEvent::Eof => EOF_WIDE,
            InputEvent::Readline(cmd) => FIRST_COMMAND_WIDE + cmd as u32,
        };
        // The reserved range lies inside the private use area, so every
        // encoded value is a valid scalar.
        char::from_u32(v).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Decode a wide character from the reader boundary.
    pub fn from_wide(c: char) -> InputEvent {
        match c as u32 {
            NULL_WIDE => InputEvent::Null,
            EOF_WIDE => InputEvent::Eof,
            v @ FIRST_COMMAND_WIDE..=0xF731 => {
                InputEvent::Readline(function::command_at((v - FIRST_COMMAND_WIDE) as usize))
            }
            _ => InputEvent::Char(c),
        }
    }
}
