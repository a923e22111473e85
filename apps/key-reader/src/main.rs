use std::env;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{bail, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use keel_input::{
    escape_bytes, escape_sequence, function, Binding, BindingsFile, CharSource, Dispatcher, Host,
    InputEvent, SourceEvent,
};
use keel_terminfo::KeyTable;

fn main() -> Result<()> {
    if env::var_os("KEEL_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_env("KEEL_LOG"))
            .init();
    }

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("functions") => list_functions(),
        Some("keys") => list_keys(args.get(2).map(String::as_str)),
        Some("describe") => describe(args.get(2).map(String::as_str)),
        Some("bindings") => show_bindings(args.get(2).map(String::as_str)),
        Some("watch") => watch(),
        _ => {
            usage();
            Ok(())
        }
    }
}

fn usage() {
    eprintln!("usage: key-reader <command>");
    eprintln!();
    eprintln!("  functions          list editor functions with codes and arities");
    eprintln!("  keys [TERM]        list terminfo key sequences for a terminal");
    eprintln!("  describe CHAR|HEX  describe a (wide) character value");
    eprintln!("  bindings FILE      resolve a bindings file and list the table");
    eprintln!("  watch              echo raw keypresses until q is pressed");
}

/// Reads and writes the process environment; binding files never
/// evaluate anything here.
struct EnvHost;

impl Host for EnvHost {
    fn get_var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
    fn set_var(&mut self, name: &str, value: &str) {
        env::set_var(name, value);
    }
    fn eval(&mut self, _command: &str) {}
    fn last_status(&self) -> i32 {
        0
    }
    fn set_last_status(&mut self, _status: i32) {}
}

/// A source with nothing to say.
struct ClosedSource;

impl CharSource for ClosedSource {
    fn read_char(&mut self) -> SourceEvent {
        SourceEvent::Eof
    }
    fn read_char_timed(&mut self) -> Option<SourceEvent> {
        Some(SourceEvent::Eof)
    }
}

fn show_bindings(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        bail!("bindings needs a file path");
    };
    let file = BindingsFile::load(Path::new(path))?;

    let mut dispatcher = Dispatcher::new(EnvHost, Box::new(ClosedSource));
    dispatcher.init()?;
    file.apply(&mut dispatcher)?;

    let mut list: Vec<&Binding> = dispatcher.bindings().iter().collect();
    list.sort_by_key(|m| m.specification_order());
    for m in list {
        println!(
            "{:<20} {:<10} {}",
            escape_sequence(m.sequence()),
            m.mode(),
            m.commands().join(" ; ")
        );
    }
    Ok(())
}

fn list_functions() -> Result<()> {
    for name in function::names() {
        if let Some(cmd) = function::code_of(name) {
            let wide = InputEvent::Readline(cmd).to_wide() as u32;
            println!("{wide:04x}  arity {}  {name}", cmd.arity());
        }
    }
    Ok(())
}

fn list_keys(term: Option<&str>) -> Result<()> {
    let term = term.map(str::to_string).or_else(|| env::var("TERM").ok());
    let table = KeyTable::for_term(term.as_deref())?;
    println!("# {}", table.term());
    for (name, seq) in table.iter() {
        match seq {
            Some(seq) => println!("{name:<16} {}", escape_bytes(seq)),
            None => println!("{name:<16} (undefined)"),
        }
    }
    Ok(())
}

fn describe(arg: Option<&str>) -> Result<()> {
    let Some(arg) = arg else {
        bail!("describe needs a character or hex value");
    };
    let mut chars = arg.chars();
    let c = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            let hex = arg.trim_start_matches("0x");
            let value = u32::from_str_radix(hex, 16)?;
            match char::from_u32(value) {
                Some(c) => c,
                None => bail!("{value:#x} is not a character value"),
            }
        }
    };
    println!("{}", function::describe_char(c));
    Ok(())
}

fn watch() -> Result<()> {
    let table = KeyTable::for_term(env::var("TERM").ok().as_deref())?;
    println!("Press keys to see their sequences; q quits.");
    enable_raw_mode()?;
    let result = watch_loop(&table);
    disable_raw_mode()?;
    result
}

fn watch_loop(table: &KeyTable) -> Result<()> {
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();
    let mut pending: Vec<u8> = Vec::new();
    let mut buf = [0u8; 1];

    loop {
        let n = stdin.read(&mut buf)?;
        if n == 0 {
            return Ok(());
        }
        let byte = buf[0];
        if pending.is_empty() && (byte == b'q' || byte == 0x4) {
            return Ok(());
        }
        pending.push(byte);

        // A completed terminfo sequence is reported by name; otherwise
        // wait while the bytes could still grow into one.
        if let Some(name) = table.name_for_sequence(&pending) {
            write!(stdout, "{name:<16} {}\r\n", escape_bytes(&pending))?;
            stdout.flush()?;
            pending.clear();
            continue;
        }
        let could_grow = table.iter().any(|(_, seq)| {
            seq.map_or(false, |s| s.len() > pending.len() && s.starts_with(&pending))
        });
        if !could_grow {
            for &b in &pending {
                write!(
                    stdout,
                    "{:<16} {}\r\n",
                    escape_bytes(&[b]),
                    function::describe_char(b as char)
                )?;
            }
            stdout.flush()?;
            pending.clear();
        }
    }
}
