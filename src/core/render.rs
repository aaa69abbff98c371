//! Message arguments and placeholder substitution
//!
//! A log call carries its format string and its arguments separately so that
//! processors can rewrite either before the message is rendered.

use std::fmt::{self, Write};

/// An owned argument value of a log call
#[derive(Debug, Clone, PartialEq)]
pub enum LogArg {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Char(char),
}

impl fmt::Display for LogArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogArg::Str(s) => write!(f, "{}", s),
            LogArg::Int(i) => write!(f, "{}", i),
            LogArg::UInt(u) => write!(f, "{}", u),
            LogArg::Float(fl) => write!(f, "{}", fl),
            LogArg::Bool(b) => write!(f, "{}", b),
            LogArg::Char(c) => write!(f, "{}", c),
        }
    }
}

impl LogArg {
    /// The `{:?}` rendering: strings and chars quoted, numbers as-is
    fn write_debug(&self, out: &mut String) {
        let _ = match self {
            LogArg::Str(s) => write!(out, "{:?}", s),
            LogArg::Char(c) => write!(out, "{:?}", c),
            LogArg::Float(fl) => write!(out, "{:?}", fl),
            other => write!(out, "{}", other),
        };
    }
}

impl From<String> for LogArg {
    fn from(s: String) -> Self {
        LogArg::Str(s)
    }
}

impl From<&str> for LogArg {
    fn from(s: &str) -> Self {
        LogArg::Str(s.to_string())
    }
}

impl From<&String> for LogArg {
    fn from(s: &String) -> Self {
        LogArg::Str(s.clone())
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($t:ty),+) => {
        $(
            impl From<$t> for LogArg {
                fn from(v: $t) -> Self {
                    LogArg::$variant(v as $target)
                }
            }
        )+
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64, isize);
impl_from_int!(UInt, u64, u8, u16, u32, u64, usize);
impl_from_int!(Float, f64, f32, f64);

impl From<bool> for LogArg {
    fn from(b: bool) -> Self {
        LogArg::Bool(b)
    }
}

impl From<char> for LogArg {
    fn from(c: char) -> Self {
        LogArg::Char(c)
    }
}

/// Marker written where a placeholder has no matching argument
pub const MISSING_ARG: &str = "{!missing}";

/// Substitute `args` into `format`.
///
/// `{}` takes the next argument in `Display` form, `{:?}` in `Debug` form,
/// `{{` and `}}` are literal braces. Any other `{...}` sequence is copied
/// through untouched. A placeholder without an argument renders as
/// [`MISSING_ARG`]; unused arguments are appended as ` {!extra: a, b}`.
pub fn render(format: &str, args: &[LogArg]) -> String {
    let mut out = String::with_capacity(format.len() + args.len() * 8);
    let mut next = args.iter();
    let mut rest = format;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with("{}") {
            match next.next() {
                Some(arg) => {
                    let _ = write!(out, "{}", arg);
                }
                None => out.push_str(MISSING_ARG),
            }
            rest = &tail[2..];
        } else if tail.starts_with("{:?}") {
            match next.next() {
                Some(arg) => arg.write_debug(&mut out),
                None => out.push_str(MISSING_ARG),
            }
            rest = &tail[4..];
        } else {
            out.push_str(&tail[..1]);
            rest = &tail[1..];
        }
    }
    out.push_str(rest);

    let extra: Vec<String> = next.map(ToString::to_string).collect();
    if !extra.is_empty() {
        let _ = write!(out, " {{!extra: {}}}", extra.join(", "));
    }

    out
}
