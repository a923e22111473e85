//! The editor function registry.
//!
//! A static bidirectional table between editor function names, as they
//! appear in binding command lists, and their [`ReadlineCmd`] codes. A
//! command string that resolves here is delivered to the line editor as a
//! code; anything else is a shell command.

use crate::event::{InputEvent, ReadlineCmd};

struct FunctionEntry {
    name: &'static str,
    cmd: ReadlineCmd,
}

const fn entry(name: &'static str, cmd: ReadlineCmd) -> FunctionEntry {
    FunctionEntry { name, cmd }
}

/// All editor functions, in registry order. The position of each entry is
/// the discriminant of its command, which keeps name lookup, code lookup
/// and the wide encoding in lockstep.
#[rustfmt::skip]
const FUNCTION_TABLE: &[FunctionEntry] = &[
    entry("beginning-of-line", ReadlineCmd::BeginningOfLine),
    entry("end-of-line", ReadlineCmd::EndOfLine),
    entry("forward-char", ReadlineCmd::ForwardChar),
    entry("backward-char", ReadlineCmd::BackwardChar),
    entry("forward-word", ReadlineCmd::ForwardWord),
    entry("backward-word", ReadlineCmd::BackwardWord),
    entry("history-search-backward", ReadlineCmd::HistorySearchBackward),
    entry("history-search-forward", ReadlineCmd::HistorySearchForward),
    entry("delete-char", ReadlineCmd::DeleteChar),
    entry("backward-delete-char", ReadlineCmd::BackwardDeleteChar),
    entry("kill-line", ReadlineCmd::KillLine),
    entry("yank", ReadlineCmd::Yank),
    entry("yank-pop", ReadlineCmd::YankPop),
    entry("complete", ReadlineCmd::Complete),
    entry("complete-and-search", ReadlineCmd::CompleteAndSearch),
    entry("beginning-of-history", ReadlineCmd::BeginningOfHistory),
    entry("end-of-history", ReadlineCmd::EndOfHistory),
    entry("backward-kill-line", ReadlineCmd::BackwardKillLine),
    entry("kill-whole-line", ReadlineCmd::KillWholeLine),
    entry("kill-word", ReadlineCmd::KillWord),
    entry("backward-kill-word", ReadlineCmd::BackwardKillWord),
    entry("backward-kill-path-component", ReadlineCmd::BackwardKillPathComponent),
    entry("history-token-search-backward", ReadlineCmd::HistoryTokenSearchBackward),
    entry("history-token-search-forward", ReadlineCmd::HistoryTokenSearchForward),
    entry("self-insert", ReadlineCmd::SelfInsert),
    entry("transpose-chars", ReadlineCmd::TransposeChars),
    entry("transpose-words", ReadlineCmd::TransposeWords),
    entry("upcase-word", ReadlineCmd::UpcaseWord),
    entry("downcase-word", ReadlineCmd::DowncaseWord),
    entry("capitalize-word", ReadlineCmd::CapitalizeWord),
    entry("vi-arg-digit", ReadlineCmd::ViArgDigit),
    entry("vi-delete-to", ReadlineCmd::ViDeleteTo),
    entry("execute", ReadlineCmd::Execute),
    entry("beginning-of-buffer", ReadlineCmd::BeginningOfBuffer),
    entry("end-of-buffer", ReadlineCmd::EndOfBuffer),
    entry("repaint", ReadlineCmd::Repaint),
    entry("force-repaint", ReadlineCmd::ForceRepaint),
    entry("up-line", ReadlineCmd::UpLine),
    entry("down-line", ReadlineCmd::DownLine),
    entry("suppress-autosuggestion", ReadlineCmd::SuppressAutosuggestion),
    entry("accept-autosuggestion", ReadlineCmd::AcceptAutosuggestion),
    entry("begin-selection", ReadlineCmd::BeginSelection),
    entry("end-selection", ReadlineCmd::EndSelection),
    entry("kill-selection", ReadlineCmd::KillSelection),
    entry("forward-jump", ReadlineCmd::ForwardJump),
    entry("backward-jump", ReadlineCmd::BackwardJump),
    entry("and", ReadlineCmd::And),
    entry("cancel", ReadlineCmd::Cancel),
];

const _: () = assert!(
    FUNCTION_TABLE.len() == ReadlineCmd::COUNT,
    "function table out of sync with the command enum"
);

/// The command at a registry position. The caller guarantees the index is
/// below [`ReadlineCmd::COUNT`].
pub(crate) fn command_at(index: usize) -> ReadlineCmd {
    FUNCTION_TABLE[index].cmd
}

/// Resolve an editor function name to its command code.
pub fn code_of(name: &str) -> Option<ReadlineCmd> {
    FUNCTION_TABLE
        .iter()
        .find(|e| e.name == name)
        .map(|e| e.cmd)
}

/// The name of an editor command.
pub fn name_of(cmd: ReadlineCmd) -> &'static str {
    FUNCTION_TABLE[cmd as usize].name
}

/// All editor function names, in registry order.
pub fn names() -> Vec<&'static str> {
    FUNCTION_TABLE.iter().map(|e| e.name).collect()
}

/// Describe a wide character for diagnostics: its hex value, and the
/// editor function name when it encodes one.
pub fn describe_char(c: char) -> String {
    match InputEvent::from_wide(c) {
        InputEvent::Readline(cmd) => format!("{:02x} ({})", c as u32, name_of(cmd)),
        _ => format!("{:02x}", c as u32),
    }
}
