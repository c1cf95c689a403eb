//! `// bun-ffi-z:` override directives.
//!
//! A directive lets the author state a function's FFI signature by hand:
//!
//! ```text
//! // bun-ffi-z: myFunction (u32, *u8) i32
//! ```
//!
//! Argument tokens are bare types (no `name:` prefix) and are trusted as
//! written; they are never checked against a real declaration. A token may be
//! a Zig type or a `bun:ffi` tag such as `ptr`.
//!
//! The line right after a directive is not scanned, so a directive placed
//! directly above a declaration replaces it.

use super::error::{BindingError, UnsupportedTypeError};
use super::mapper::map_type;
use super::types::{AbiType, FunctionDescriptor};

/// The literal that marks a directive line.
pub const DIRECTIVE_MARKER: &str = "// bun-ffi-z:";

/// Directive types are either `bun:ffi` tags or Zig types.
fn directive_type(token: &str) -> Result<AbiType, UnsupportedTypeError> {
    match AbiType::from_tag(token.trim()) {
        Some(abi) => Ok(abi),
        None => map_type(token),
    }
}

/// A directive found in a source file, not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideDirective {
    /// Text from the marker to the end of the line
    pub text: String,

    /// 1-based source line
    pub line: usize,
}

impl OverrideDirective {
    /// Recognize a directive anywhere on a line.
    pub fn detect(line: &str, line_number: usize) -> Option<Self> {
        let start = line.find(DIRECTIVE_MARKER)?;
        Some(OverrideDirective {
            text: line[start..].trim().to_string(),
            line: line_number,
        })
    }

    /// Parse the directive into a descriptor.
    pub fn parse(&self) -> Result<FunctionDescriptor, BindingError> {
        let text = self.text.as_str();

        // The marker itself ends in `:`, so the name starts right after it.
        let name_start = text.find(':').map(|i| i + 1).unwrap_or(0);
        let open = text
            .find('(')
            .ok_or_else(|| BindingError::malformed(text, self.line, "directive has no `(`"))?;
        let close = text
            .find(')')
            .ok_or_else(|| BindingError::malformed(text, self.line, "directive has no `)`"))?;

        if open < name_start || close < open {
            return Err(BindingError::malformed(
                text,
                self.line,
                "directive parentheses are out of order",
            ));
        }

        let name = text[name_start..open].trim();
        if name.is_empty() {
            return Err(BindingError::malformed(
                text,
                self.line,
                "directive has no function name",
            ));
        }

        let args = text[open + 1..close]
            .split(',')
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .map(|arg| directive_type(arg).map_err(|e| BindingError::unsupported(e, name, self.line)))
            .collect::<Result<Vec<_>, _>>()?;

        let returns = directive_type(&text[close + 1..])
            .map_err(|e| BindingError::unsupported(e, name, self.line))?;

        tracing::debug!("override for `{}` at line {}", name, self.line);

        Ok(FunctionDescriptor::new(name, returns).with_args(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<FunctionDescriptor, BindingError> {
        OverrideDirective::detect(line, 1)
            .expect("directive not detected")
            .parse()
    }

    #[test]
    fn test_parse_directive() {
        let desc = parse("// bun-ffi-z: add (i32, i32) i32").unwrap();
        assert_eq!(desc.name, "add");
        assert_eq!(desc.args, vec![AbiType::I32, AbiType::I32]);
        assert_eq!(desc.returns, AbiType::I32);
    }

    #[test]
    fn test_zero_args_and_trailing_comma() {
        let desc = parse("// bun-ffi-z: tick () void").unwrap();
        assert!(desc.args.is_empty());
        assert_eq!(desc.returns, AbiType::Void);

        let desc = parse("// bun-ffi-z: write (*u8, usize,) c_int").unwrap();
        assert_eq!(desc.args, vec![AbiType::Ptr, AbiType::U64]);
        assert_eq!(desc.returns, AbiType::I32);
    }

    #[test]
    fn test_ffi_tags_accepted() {
        let desc = parse("// bun-ffi-z: sum (ptr, usize) u64").unwrap();
        assert_eq!(desc.args, vec![AbiType::Ptr, AbiType::U64]);

        let desc = parse("// bun-ffi-z: handle () ptr").unwrap();
        assert_eq!(desc.returns, AbiType::Ptr);
    }

    #[test]
    fn test_detects_indented_and_trailing_directives() {
        assert!(OverrideDirective::detect("    // bun-ffi-z: f () void", 4).is_some());
        assert!(OverrideDirective::detect("const x = 1; // bun-ffi-z: f () void", 4).is_some());
        assert!(OverrideDirective::detect("// bun-ffi-z f () void", 4).is_none());
        assert!(OverrideDirective::detect("/// bun-ffi-z: f () void", 4).is_some());
    }

    #[test]
    fn test_trailing_directive_parses_from_marker() {
        let desc = parse("const x: u8 = 1; // bun-ffi-z: get () u8").unwrap();
        assert_eq!(desc.name, "get");
        assert_eq!(desc.returns, AbiType::U8);
    }

    #[test]
    fn test_unsupported_override_type() {
        let err = parse("// bun-ffi-z: scale (f32) f32").unwrap_err();
        assert!(matches!(
            err,
            BindingError::UnsupportedType { ref token, ref function, line: 1 }
                if token == "f32" && function == "scale"
        ));
    }

    #[test]
    fn test_empty_return_type_is_unsupported() {
        let err = parse("// bun-ffi-z: f (i32)").unwrap_err();
        assert!(matches!(err, BindingError::UnsupportedType { ref token, .. } if token.is_empty()));
    }

    #[test]
    fn test_malformed_directive() {
        assert!(matches!(
            parse("// bun-ffi-z: f i32").unwrap_err(),
            BindingError::MalformedDeclaration { .. }
        ));
        assert!(matches!(
            parse("// bun-ffi-z: (i32) i32").unwrap_err(),
            BindingError::MalformedDeclaration { .. }
        ));
    }
}
