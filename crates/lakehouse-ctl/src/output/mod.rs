//! Styled terminal output for `lakehouse-ctl`.
//!
//! `anstream` strips the ANSI codes when stdout is piped, so generated
//! content printed through [`plain`] stays byte-exact.

mod styles;

use std::io::Write;

pub(crate) use styles::clap_styles;

use styles::{ERROR, HEADER, HINT, LABEL};

/// Red error line on stderr.
pub(crate) fn error(msg: impl std::fmt::Display) {
    let mut out = anstream::stderr().lock();
    writeln!(out, "{ERROR}✗ {msg}{ERROR:#}").ok();
}

pub(crate) fn header(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{HEADER}{msg}{HEADER:#}").ok();
}

/// "  key = value" with the key bolded.
pub(crate) fn setting(key: impl std::fmt::Display, value: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "  {LABEL}{key}{LABEL:#} = {value}").ok();
}

pub(crate) fn hint(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{HINT}{msg}{HINT:#}").ok();
}

pub(crate) fn blank() {
    let mut out = anstream::stdout().lock();
    writeln!(out).ok();
}

/// Unstyled text, written without a trailing newline.
pub(crate) fn raw(text: &str) {
    let mut out = anstream::stdout().lock();
    write!(out, "{text}").ok();
    out.flush().ok();
}

/// Unstyled line. Used for the generate confirmation, which scripts match
/// verbatim.
pub(crate) fn plain(msg: impl std::fmt::Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{msg}").ok();
}
