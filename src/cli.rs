use console::{pad_str, style, Alignment, StyledObject, Term};
use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};

const PREFIX_LEN: usize = 6;

lazy_static! {
    pub static ref WRITER: Writer = Writer::new();
}

/// Writes prefixed messages to stderr
pub struct Writer {
    term: Term,
    verbose: AtomicBool,
}

impl Writer {
    pub fn new() -> Self {
        Writer {
            term: Term::stderr(),
            verbose: AtomicBool::new(false),
        }
    }

    pub fn set_verbose(&self, verbose: bool) {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    /// Write a message, continuation lines are aligned after the prefix
    pub fn writeln(&self, prefix: StyledObject<&str>, msg: &str) {
        let prefix = prefix.to_string();
        let prefix = pad_str(&prefix, PREFIX_LEN, Alignment::Right, None);
        let indent = " ".repeat(PREFIX_LEN);
        for (i, line) in msg.lines().enumerate() {
            let head: &str = if i == 0 { &prefix } else { &indent };
            // Nothing sensible to do if stderr is gone
            let _ = self.term.write_line(&format!("{} {}", head, line));
        }
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn info_prefix() -> StyledObject<&'static str> {
    style("INFO").blue().bold()
}

pub fn success_prefix() -> StyledObject<&'static str> {
    style("OK").green().bold()
}

pub fn warn_prefix() -> StyledObject<&'static str> {
    style("WARN").yellow().bold()
}

pub fn error_prefix() -> StyledObject<&'static str> {
    style("ERROR").red().bold()
}

pub fn due_to_prefix() -> StyledObject<&'static str> {
    style("DUE TO").yellow().bold()
}

pub fn debug_prefix() -> StyledObject<&'static str> {
    style("DEBUG").dim()
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::cli::WRITER.writeln($crate::cli::info_prefix(), &format!($($arg)+))
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        $crate::cli::WRITER.writeln($crate::cli::success_prefix(), &format!($($arg)+))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::cli::WRITER.writeln($crate::cli::warn_prefix(), &format!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::cli::WRITER.writeln($crate::cli::error_prefix(), &format!($($arg)+))
    };
}

#[macro_export]
macro_rules! due_to {
    ($($arg:tt)+) => {
        $crate::cli::WRITER.writeln($crate::cli::due_to_prefix(), &format!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        if $crate::cli::WRITER.is_verbose() {
            $crate::cli::WRITER.writeln($crate::cli::debug_prefix(), &format!($($arg)+))
        }
    };
}
