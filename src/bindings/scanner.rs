//! Zig source scanner for exported function signatures.
//!
//! Zig cannot currently emit usable C headers, so signatures are recovered
//! from the source text instead. The scanner is a line-oriented state machine:
//! it idles until a line starts an `export fn` declaration, then accumulates
//! lines until the body's `{` is visible, and only then parses the signature.
//! A `// bun-ffi-z:` directive line is handed to the annotation reader and the
//! line after it is skipped.
//!
//! Parentheses are matched by first occurrence only. Declarations with nested
//! parentheses in a parameter type (function pointers, `callconv(...)` before
//! the parameter list) are not supported.

use std::iter::{Enumerate, Fuse};
use std::sync::OnceLock;

use regex::Regex;

use super::annotation::OverrideDirective;
use super::error::BindingError;
use super::mapper::map_type;
use super::types::FunctionDescriptor;

/// Matches the start of an exported function on a trimmed line.
fn declaration_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:pub )?export fn ([A-Za-z0-9_]+)\(").expect("declaration pattern is valid")
    })
}

/// Text of one exported declaration, from its `export fn` line through the
/// line holding the body's `{`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDeclaration {
    /// Function name captured from the start line
    pub name: String,

    /// 1-based line of the `export fn`
    pub line: usize,

    /// Trimmed lines joined with single spaces
    pub text: String,
}

impl RawDeclaration {
    fn start(name: &str, line: usize, first: &str) -> Self {
        RawDeclaration {
            name: name.to_string(),
            line,
            text: first.to_string(),
        }
    }

    fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() && !line.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(line);
    }

    /// Whether the body delimiter has been reached.
    pub fn is_complete(&self) -> bool {
        self.text.contains('{')
    }

    /// Parse the accumulated text into a descriptor.
    pub fn parse(&self) -> Result<FunctionDescriptor, BindingError> {
        let text = self.text.as_str();
        let malformed = |reason: &str| BindingError::malformed(&self.name, self.line, reason);

        let open = text.find('(').ok_or_else(|| malformed("no `(`"))?;
        let close = text.find(')').ok_or_else(|| malformed("no `)`"))?;
        let body = text.find('{').ok_or_else(|| malformed("no `{`"))?;

        if close < open || body < close {
            return Err(malformed("parameter list is not closed before the body"));
        }

        let args = text[open + 1..close]
            .split(',')
            .map(str::trim)
            .filter(|param| !param.is_empty())
            .map(|param| {
                let (_, ty) = param
                    .split_once(':')
                    .ok_or_else(|| malformed(&format!("parameter `{}` has no type", param)))?;
                map_type(ty).map_err(|e| BindingError::unsupported(e, &self.name, self.line))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let return_type = text[close + 1..body].trim();
        if return_type.is_empty() {
            return Err(malformed("empty return type"));
        }
        let returns =
            map_type(return_type).map_err(|e| BindingError::unsupported(e, &self.name, self.line))?;

        Ok(FunctionDescriptor::new(self.name.clone(), returns).with_args(args))
    }
}

/// Something the scanner found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanItem {
    /// A complete `export fn` declaration
    Declaration(RawDeclaration),
    /// A `// bun-ffi-z:` override line
    Override(OverrideDirective),
}

impl ScanItem {
    /// Parse the item into a descriptor.
    pub fn parse(&self) -> Result<FunctionDescriptor, BindingError> {
        match self {
            ScanItem::Declaration(decl) => decl.parse(),
            ScanItem::Override(directive) => directive.parse(),
        }
    }
}

#[derive(Debug)]
enum State {
    Idle,
    Accumulating(RawDeclaration),
    Finished,
}

/// Lazy, single-pass scan over the lines of one source file.
///
/// Yields items in file order. Once an error has been yielded the scanner is
/// exhausted; to scan again, build a new one over the same lines.
pub struct Scanner<I> {
    lines: Fuse<Enumerate<I>>,
    state: State,
}

impl<'a> Scanner<std::str::Lines<'a>> {
    /// Scan the lines of a source string.
    pub fn new(source: &'a str) -> Self {
        Scanner::from_lines(source.lines())
    }
}

impl<'a, I> Scanner<I>
where
    I: Iterator<Item = &'a str>,
{
    /// Scan an arbitrary line iterator.
    pub fn from_lines(lines: I) -> Self {
        Scanner {
            lines: lines.enumerate().fuse(),
            state: State::Idle,
        }
    }
}

impl<'a, I> Iterator for Scanner<I>
where
    I: Iterator<Item = &'a str>,
{
    type Item = Result<ScanItem, BindingError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match std::mem::replace(&mut self.state, State::Finished) {
                State::Finished => return None,

                State::Idle => {
                    let (index, line) = match self.lines.next() {
                        Some(next) => next,
                        None => return None,
                    };
                    let line_number = index + 1;
                    let line = line.trim();
                    self.state = State::Idle;

                    if let Some(directive) = OverrideDirective::detect(line, line_number) {
                        if let Some((_, skipped)) = self.lines.next() {
                            tracing::trace!(
                                "line {} replaced by directive: {}",
                                line_number + 1,
                                skipped.trim()
                            );
                        }
                        return Some(Ok(ScanItem::Override(directive)));
                    }

                    let Some(caps) = declaration_start().captures(line) else {
                        continue;
                    };
                    let decl = RawDeclaration::start(&caps[1], line_number, line);
                    tracing::trace!("`{}` starts at line {}", decl.name, line_number);

                    if decl.is_complete() {
                        return Some(Ok(ScanItem::Declaration(decl)));
                    }
                    self.state = State::Accumulating(decl);
                }

                State::Accumulating(mut decl) => match self.lines.next() {
                    Some((_, line)) => {
                        decl.push_line(line.trim());
                        if decl.is_complete() {
                            self.state = State::Idle;
                            return Some(Ok(ScanItem::Declaration(decl)));
                        }
                        self.state = State::Accumulating(decl);
                    }
                    None => {
                        return Some(Err(BindingError::malformed(
                            &decl.name,
                            decl.line,
                            "reached end of file before the function body `{`",
                        )));
                    }
                },
            }
        }
    }
}

/// Scan one source text into its descriptors, in the order they appear.
///
/// Directives and declarations share the same stream, so when both name the
/// same function the one further down the file comes later in the result.
pub fn scan_source(source: &str) -> Result<Vec<FunctionDescriptor>, BindingError> {
    Scanner::new(source)
        .map(|item| item.and_then(|item| item.parse()))
        .collect()
}
